// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Commit of configuration files: render, validate, compare, replace and reload

use sha2::{Digest, Sha256};
use std::fs::{self, Permissions};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::artifact::Artifact;
use crate::errors::CommitError;
use crate::reload::Reloader;

/// Default bound on the duration of the validation of a file
pub const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(30);
/// Default bound on the duration of the reload of a service
pub const DEFAULT_RELOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// What committing a file did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The destination already had the content: nothing was done
    Unchanged,
    /// The destination was replaced, and its service reloaded if it has one
    Replaced { reloaded: bool },
}

/// Object to commit configuration files
pub struct ConfigCommitter {
    reloader: Arc<dyn Reloader>,
    validation_timeout: Duration,
    reload_timeout: Duration,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CommitError + '_ {
    move |e| CommitError::Io(path.to_path_buf(), e)
}

/// Digest of the current content of a file, if it exists
fn file_digest(path: &Path) -> Result<Option<Vec<u8>>, CommitError> {
    match fs::read(path) {
        Ok(content) => Ok(Some(Sha256::digest(&content).to_vec())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CommitError::Io(path.to_path_buf(), e)),
    }
}

/// Write content to a new scratch file in the directory of the destination, so that it can be
/// renamed over it atomically
fn write_scratch(artifact: &Artifact, content: &str) -> Result<NamedTempFile, CommitError> {
    let dir = artifact.directory();
    let mut scratch = tempfile::Builder::new()
        .prefix(&format!(".{}.", artifact.name))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_error(dir))?;
    let file = scratch.as_file_mut();
    file.write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(io_error(&artifact.destination))?;
    debug!(
        "Wrote {} bytes for {} to {}",
        content.len(),
        artifact.name,
        scratch.path().display()
    );
    Ok(scratch)
}

impl ConfigCommitter {
    #[must_use]
    pub fn new(reloader: Arc<dyn Reloader>) -> Self {
        Self {
            reloader,
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
            reload_timeout: DEFAULT_RELOAD_TIMEOUT,
        }
    }
    #[must_use]
    pub fn set_validation_timeout(mut self, duration: Duration) -> Self {
        self.validation_timeout = duration;
        self
    }
    #[must_use]
    pub fn set_reload_timeout(mut self, duration: Duration) -> Self {
        self.reload_timeout = duration;
        self
    }

    async fn validate(&self, artifact: &Artifact, scratch: &Path) -> Result<(), CommitError> {
        let Some(validator) = &artifact.validator else {
            debug!("No validator for {}", artifact.name);
            return Ok(());
        };
        match timeout(self.validation_timeout, validator.validate(scratch)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(CommitError::ValidationFailure(artifact.name.clone(), e)),
            Err(_) => Err(CommitError::ValidationTimeout(
                artifact.name.clone(),
                self.validation_timeout,
            )),
        }
    }

    async fn reload(&self, unit: &str) -> Result<(), CommitError> {
        match timeout(self.reload_timeout, self.reloader.reload(unit)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(CommitError::ReloadFailure(unit.to_owned(), e)),
            Err(_) => Err(CommitError::ReloadTimeout(
                unit.to_owned(),
                self.reload_timeout,
            )),
        }
    }

    /// Commit a configuration file. The destination is only replaced if the new content is
    /// valid and differs from the current one. If it is replaced and the artifact has a unit,
    /// the unit gets reloaded. On validation failure, the destination is left untouched.
    pub async fn commit(
        &self,
        artifact: &Artifact,
        content: &str,
    ) -> Result<CommitOutcome, CommitError> {
        let scratch = write_scratch(artifact, content)?;
        self.validate(artifact, scratch.path()).await?;

        let digest = Sha256::digest(content.as_bytes()).to_vec();
        if file_digest(&artifact.destination)?.is_some_and(|current| current == digest) {
            debug!("{} is up to date", artifact.destination.display());
            return Ok(CommitOutcome::Unchanged);
        }

        fs::set_permissions(scratch.path(), Permissions::from_mode(artifact.mode))
            .map_err(io_error(scratch.path()))?;
        scratch
            .persist(&artifact.destination)
            .map_err(|e| CommitError::Io(artifact.destination.clone(), e.error))?;
        info!("Replaced {}", artifact.destination.display());

        let Some(unit) = &artifact.reload_unit else {
            return Ok(CommitOutcome::Replaced { reloaded: false });
        };
        self.reload(unit).await?;
        info!("Reloaded {unit}");
        Ok(CommitOutcome::Replaced { reloaded: true })
    }

    /// Commit a set of independent configuration files. A failure for one of them does not
    /// prevent committing the others. There is one result per file, in the same order.
    pub async fn commit_all(
        &self,
        artifacts: &[(Artifact, String)],
    ) -> Vec<Result<CommitOutcome, CommitError>> {
        let mut results = Vec::with_capacity(artifacts.len());
        for (artifact, content) in artifacts {
            let result = self.commit(artifact, content).await;
            match &result {
                Ok(outcome) => debug!("Committed {}: {outcome:?}", artifact.name),
                Err(e) if e.destination_replaced() => warn!("{e}"),
                Err(e) => error!("Could not commit {}: {e}", artifact.name),
            }
            results.push(result);
        }
        results
    }
}
