// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! One run of the networker: load the description of the host, compile it, render the
//! configuration of the routing daemon and commit it.

use commit::{Artifact, CommandValidator, CommitError, CommitOutcome, ConfigCommitter, Reloader};
use commit::committer::{DEFAULT_RELOAD_TIMEOUT, DEFAULT_VALIDATION_TIMEOUT};
use config::{ConfigError, NetworkModel};
use derive_builder::Builder;
use routing::{DerivationWarning, build_internal_config, render_config};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_FRR_CONFIG: &str = "/etc/frr/frr.conf";

/// Parameters of a run. N.B we derive a builder type `RunParamsBuilder`
/// and provide defaults for most fields.
#[derive(Builder, Debug)]
pub struct RunParams {
    #[builder(setter(into))]
    pub input: PathBuf,

    #[builder(setter(into), default = PathBuf::from(DEFAULT_FRR_CONFIG))]
    pub frr_config: PathBuf,

    #[builder(default = Some(CommandValidator::frr()))]
    pub frr_validator: Option<CommandValidator>,

    #[builder(setter(into), default = Some("frr.service".to_string()))]
    pub frr_reload_unit: Option<String>,

    #[builder(default = DEFAULT_VALIDATION_TIMEOUT)]
    pub validation_timeout: Duration,

    #[builder(default = DEFAULT_RELOAD_TIMEOUT)]
    pub reload_timeout: Duration,

    #[builder(default)]
    pub dry_run: bool,
}

impl Display for RunParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Run parameters")?;
        writeln!(f, "  input      : {}", self.input.display())?;
        writeln!(f, "  frr config : {}", self.frr_config.display())?;
        match &self.frr_validator {
            Some(validator) => writeln!(f, "  validator  : {}", validator.program())?,
            None => writeln!(f, "  validator  : none")?,
        }
        writeln!(
            f,
            "  reload     : {}",
            self.frr_reload_unit.as_deref().unwrap_or("none")
        )?;
        write!(f, "  dry run    : {}", self.dry_run)
    }
}

/// Failures that prevent a run from committing anything
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Could not read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Invalid network description: {0}")]
    Config(#[from] ConfigError),
}

/// What a run did
#[derive(Debug)]
pub struct RunReport {
    pub rendered: String,
    pub warnings: Vec<DerivationWarning>,
    pub commits: Vec<(String, Result<CommitOutcome, CommitError>)>,
}

impl RunReport {
    /// Tell if any file could not be committed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.commits.iter().any(|(_, result)| result.is_err())
    }
}

fn frr_artifact(params: &RunParams) -> Artifact {
    let mut artifact = Artifact::new("frr", &params.frr_config);
    if let Some(validator) = &params.frr_validator {
        artifact = artifact.set_validator(Arc::new(validator.clone()));
    }
    if let Some(unit) = &params.frr_reload_unit {
        artifact = artifact.set_reload_unit(unit);
    }
    artifact
}

/// Compile the network description of the host and commit the resulting configuration.
/// Nothing is committed if the description is invalid. In dry-run mode, the configuration is
/// only rendered.
pub async fn run(params: &RunParams, reloader: Arc<dyn Reloader>) -> Result<RunReport, RunError> {
    debug!("{params}");
    let yaml = std::fs::read_to_string(&params.input)
        .map_err(|e| RunError::Read(params.input.clone(), e))?;
    let model = NetworkModel::from_yaml(&yaml)?;
    info!(
        "Loaded network description of {} with {} networks",
        model.hostname(),
        model.networks().len()
    );

    let compiled = build_internal_config(&model)?;
    let rendered = render_config(&compiled.internal);
    let mut report = RunReport {
        rendered,
        warnings: compiled.warnings,
        commits: vec![],
    };
    if params.dry_run {
        info!("Dry run: not committing anything");
        return Ok(report);
    }

    let committer = ConfigCommitter::new(reloader)
        .set_validation_timeout(params.validation_timeout)
        .set_reload_timeout(params.reload_timeout);
    let artifacts = vec![(frr_artifact(params), report.rendered.clone())];
    let results = committer.commit_all(&artifacts).await;
    report.commits = artifacts
        .into_iter()
        .map(|(artifact, _)| artifact.name)
        .zip(results)
        .collect();
    Ok(report)
}
