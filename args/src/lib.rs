// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

pub use clap::Parser;
use commit::PATH_PLACEHOLDER;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// A command to validate a configuration file, as `PROGRAM [ARGS...]` where one of the
/// arguments is `{}`, replaced by the path of the file to check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorArg {
    program: String,
    args: Vec<String>,
}
impl ValidatorArg {
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}
impl FromStr for ValidatorArg {
    type Err = String;
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace().map(str::to_owned);
        let program = words.next().ok_or("Empty validator command".to_string())?;
        let args: Vec<String> = words.collect();
        if !args.iter().any(|arg| arg == PATH_PLACEHOLDER) {
            return Err(format!(
                "Validator command '{input}' has no '{PATH_PLACEHOLDER}' argument for the file to check"
            ));
        }
        Ok(ValidatorArg { program, args })
    }
}


#[derive(Parser)]
#[command(name = "networker")]
#[command(version)]
#[command(about = "Compiles the network description of a host into its routing daemon configuration", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct CmdArgs {
    #[arg(
        long,
        value_name = "PATH",
        default_value = "/etc/metal/install.yaml",
        help = "YAML description of the networks the host is attached to"
    )]
    input: PathBuf,

    #[arg(
        long,
        value_name = "PATH",
        default_value = "/etc/frr/frr.conf",
        help = "Routing daemon configuration file to replace"
    )]
    frr_config: PathBuf,

    #[arg(
        long,
        value_name = "COMMAND",
        value_parser = ValidatorArg::from_str,
        help = "Command to check the generated routing daemon configuration, with {} standing for the file to check.
Defaults to 'vtysh --dryrun --inputfile {}'"
    )]
    frr_validator: Option<ValidatorArg>,

    #[arg(
        long,
        value_name = "UNIT",
        default_value = "frr.service",
        help = "Service unit to reload when the routing daemon configuration changes"
    )]
    frr_reload_unit: String,

    #[arg(long, help = "Don't check generated configurations before installing them")]
    skip_validation: bool,

    #[arg(long, help = "Don't reload services whose configuration changed")]
    skip_reload: bool,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..=3600),
        help = "Time allowed for a validator to check a configuration, in [1..3600]"
    )]
    validation_timeout: u64,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..=3600),
        help = "Time allowed for a service to reload, in [1..3600]"
    )]
    reload_timeout: u64,

    #[arg(long, help = "Print the generated configuration and exit without installing it")]
    dry_run: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Show the available tracing tags and exit"
    )]
    show_tracing_tags: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Show configurable tracing targets and exit"
    )]
    show_tracing_targets: bool,

    #[arg(
        long,
        value_name = "tracing configuration",
        help = "Tracing config string as comma-separated sequence of tag=level, with level one in [off,error,warn,info,debug,trace].
Passing default=level sets the default log-level.
Passing all=level allows setting the log-level of all targets to level.
E.g. default=error,all=info,compiler=debug will set the default target to error, and all the registered targets to info, but enable debug for the compiler"
    )]
    tracing: Option<String>,
}

impl CmdArgs {
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }
    #[must_use]
    pub fn frr_config(&self) -> &Path {
        &self.frr_config
    }
    #[must_use]
    pub fn frr_validator(&self) -> Option<&ValidatorArg> {
        self.frr_validator.as_ref()
    }
    /// The unit to reload, if reloads are enabled
    #[must_use]
    pub fn frr_reload_unit(&self) -> Option<&str> {
        (!self.skip_reload).then_some(self.frr_reload_unit.as_str())
    }
    #[must_use]
    pub fn skip_validation(&self) -> bool {
        self.skip_validation
    }
    #[must_use]
    pub fn skip_reload(&self) -> bool {
        self.skip_reload
    }
    #[must_use]
    pub fn validation_timeout(&self) -> Duration {
        Duration::from_secs(self.validation_timeout)
    }
    #[must_use]
    pub fn reload_timeout(&self) -> Duration {
        Duration::from_secs(self.reload_timeout)
    }
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
    #[must_use]
    pub fn show_tracing_tags(&self) -> bool {
        self.show_tracing_tags
    }
    #[must_use]
    pub fn show_tracing_targets(&self) -> bool {
        self.show_tracing_targets
    }
    #[must_use]
    pub fn tracing(&self) -> Option<&String> {
        self.tracing.as_ref()
    }
}
