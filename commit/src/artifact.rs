// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Configuration files to commit

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::validate::Validator;

/// Default mode of configuration files
pub const DEFAULT_MODE: u32 = 0o644;

/// A configuration file: where it goes, how to check it and which service uses it
#[derive(Clone)]
pub struct Artifact {
    pub name: String,
    pub destination: PathBuf,
    pub mode: u32,
    pub validator: Option<Arc<dyn Validator>>,
    pub reload_unit: Option<String>,
}

impl Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("name", &self.name)
            .field("destination", &self.destination)
            .field("mode", &format_args!("{:o}", self.mode))
            .field("validated", &self.validator.is_some())
            .field("reload_unit", &self.reload_unit)
            .finish()
    }
}

impl Artifact {
    #[must_use]
    pub fn new(name: &str, destination: &Path) -> Self {
        Self {
            name: name.to_owned(),
            destination: destination.to_path_buf(),
            mode: DEFAULT_MODE,
            validator: None,
            reload_unit: None,
        }
    }
    #[must_use]
    pub fn set_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }
    #[must_use]
    pub fn set_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }
    #[must_use]
    pub fn set_reload_unit(mut self, unit: &str) -> Self {
        self.reload_unit = Some(unit.to_owned());
        self
    }
    /// The directory holding the destination, where scratch files get created
    #[must_use]
    pub fn directory(&self) -> &Path {
        match self.destination.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_directory() {
        let artifact = Artifact::new("frr", Path::new("/etc/frr/frr.conf"));
        assert_eq!(artifact.directory(), Path::new("/etc/frr"));
        assert_eq!(artifact.mode, DEFAULT_MODE);
        let artifact = Artifact::new("local", Path::new("frr.conf"));
        assert_eq!(artifact.directory(), Path::new("."));
    }
}
