// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Errors when committing configuration files

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Failure of an external command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Could not run '{0}': {1}")]
    Spawn(String, std::io::Error),
    #[error("'{0}' failed ({1}): {2}")]
    Failed(String, ExitStatus, String),
}

/// The reasons why committing a configuration file may fail
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("I/O error on {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("Validation of {0} failed: {1}")]
    ValidationFailure(String, CommandError),
    #[error("Validation of {0} did not complete within {1:?}")]
    ValidationTimeout(String, Duration),
    #[error("Reload of unit {0} failed: {1}")]
    ReloadFailure(String, CommandError),
    #[error("Reload of unit {0} did not complete within {1:?}")]
    ReloadTimeout(String, Duration),
}

impl CommitError {
    /// Tell if the destination file was replaced despite the error
    #[must_use]
    pub fn destination_replaced(&self) -> bool {
        matches!(
            self,
            CommitError::ReloadFailure(..) | CommitError::ReloadTimeout(..)
        )
    }
}
