// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Reload of the services owning configuration files

use async_trait::async_trait;

use crate::command::run_command;
use crate::errors::CommandError;

/// Trait for the service manager
#[async_trait]
pub trait Reloader: Send + Sync {
    /// Reload a unit, returning once the reload completed
    async fn reload(&self, unit: &str) -> Result<(), CommandError>;
}

/// Reload units with systemd. `systemctl` waits for the reload job to complete and tells
/// if it failed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemctlReloader;

#[async_trait]
impl Reloader for SystemctlReloader {
    async fn reload(&self, unit: &str) -> Result<(), CommandError> {
        run_command("systemctl", &["reload".to_owned(), unit.to_owned()]).await
    }
}
