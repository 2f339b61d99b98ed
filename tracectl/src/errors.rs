// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TraceCtlError {
    #[error("Invalid syntax '{0}': it should be tag=level")]
    Syntax(String),
    #[error("Invalid level '{1}' for '{0}'")]
    InvalidLevel(String, String),
    #[error("No tracing target has tag '{0}'")]
    UnknownTag(String),
    #[error("Tracing is already installed")]
    AlreadyInstalled,
    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}
