// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Validation of configuration files by external checkers

use async_trait::async_trait;
use std::path::Path;

use crate::command::run_command;
use crate::errors::CommandError;

/// Placeholder for the path of the file to validate, in the arguments of a validator
pub const PATH_PLACEHOLDER: &str = "{}";

/// Trait for checkers of configuration files
#[async_trait]
pub trait Validator: Send + Sync {
    /// Check the file at `path`. An error means that the file must not be used.
    async fn validate(&self, path: &Path) -> Result<(), CommandError>;
}

/// A validator running a program. Any argument equal to [`PATH_PLACEHOLDER`] gets replaced by
/// the path of the file to validate. The file is valid if the program exits successfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandValidator {
    program: String,
    args: Vec<String>,
}

impl CommandValidator {
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_owned(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
        }
    }
    /// Dry-run parse of an FRR configuration
    #[must_use]
    pub fn frr() -> Self {
        Self::new("vtysh", &["--dryrun", "--inputfile", PATH_PLACEHOLDER])
    }
    /// Check-only load of an nftables ruleset
    #[must_use]
    pub fn nftables() -> Self {
        Self::new("nft", &["-c", "-f", PATH_PLACEHOLDER])
    }
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
    fn args_for(&self, path: &Path) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                if arg == PATH_PLACEHOLDER {
                    path.display().to_string()
                } else {
                    arg.clone()
                }
            })
            .collect()
    }
}

#[async_trait]
impl Validator for CommandValidator {
    async fn validate(&self, path: &Path) -> Result<(), CommandError> {
        run_command(&self.program, &self.args_for(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_presets() {
        let path = Path::new("/etc/frr/.frr.conf.tmp");
        assert_eq!(CommandValidator::frr().program(), "vtysh");
        assert_eq!(
            CommandValidator::frr().args_for(path),
            vec!["--dryrun", "--inputfile", "/etc/frr/.frr.conf.tmp"]
        );
        assert_eq!(
            CommandValidator::nftables().args_for(path),
            vec!["-c", "-f", "/etc/frr/.frr.conf.tmp"]
        );
    }

    #[tokio::test]
    async fn test_validate_file() {
        /* "test -s" accepts non-empty files only */
        let validator = CommandValidator::new("test", &["-s", PATH_PLACEHOLDER]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        assert!(validator.validate(file.path()).await.is_err());
        file.write_all(b"frr defaults datacenter\n").unwrap();
        file.flush().unwrap();
        assert!(validator.validate(file.path()).await.is_ok());
    }
}
