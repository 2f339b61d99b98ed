// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Type for configuration / validation failures.
//! Any invariant violation found while validating a network model is a `ConfigError`.
//! These are fatal to a run and get reported before any file is touched.

use thiserror::Error;

/// The reasons why we may reject a network model
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Expected exactly one {0} network, found {1}")]
    WrongNetworkCount(&'static str, usize),
    #[error("Network '{0}' has no ASN")]
    MissingAsn(String),
    #[error("Network '{0}' has invalid ASN {1}")]
    InvalidAsn(String, u32),
    #[error("Network '{0}' has no IP addresses")]
    MissingIps(String),
    #[error("Network '{0}' has no VRF")]
    MissingVrf(String),
    #[error("Network '{0}' has invalid VRF {1}")]
    InvalidVrf(String, u32),
    #[error("VRF {0} is used by more than one network")]
    DuplicateVrf(u32),
    #[error("Network '{0}' has unknown type '{1}'")]
    UnknownRole(String, String),
    #[error("Invalid IP address '{1}' in network '{0}'")]
    InvalidAddress(String, String),
    #[error("Invalid prefix '{1}' in network '{0}'")]
    InvalidPrefix(String, String),
    #[error("Invalid MAC address '{1}' on nic '{0}'")]
    InvalidMac(String, String),
    #[error("External network '{0}' requires NAT but has no destination prefixes")]
    MissingDestinationPrefixes(String),
    #[error("Failed to parse network description: {0}")]
    Parse(String),
    #[error("Internal error: {0}")]
    InternalFailure(String),
}

/// Result-like type for configurations
pub type ConfigResult = Result<(), ConfigError>;
