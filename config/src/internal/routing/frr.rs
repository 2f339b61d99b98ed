// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Internal configuration model: global settings of the routing daemon

use std::fmt::Display;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrrProfile {
    #[default]
    Datacenter,
    Traditional,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyslogLevel {
    Debugging,
    #[default]
    Informational,
    Warnings,
    Errors,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frr {
    pub profile: FrrProfile,
    pub hostname: String,
    pub syslog: Option<SyslogLevel>,
}
impl Frr {
    #[must_use]
    pub fn new(profile: FrrProfile, hostname: &str) -> Self {
        Self {
            profile,
            hostname: hostname.to_owned(),
            syslog: None,
        }
    }
    #[must_use]
    pub fn set_syslog(mut self, level: SyslogLevel) -> Self {
        self.syslog = Some(level);
        self
    }
}

/* Display */
impl Display for FrrProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrrProfile::Datacenter => write!(f, "datacenter"),
            FrrProfile::Traditional => write!(f, "traditional"),
        }
    }
}
impl Display for SyslogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyslogLevel::Debugging => write!(f, "debugging"),
            SyslogLevel::Informational => write!(f, "informational"),
            SyslogLevel::Warnings => write!(f, "warnings"),
            SyslogLevel::Errors => write!(f, "errors"),
        }
    }
}
