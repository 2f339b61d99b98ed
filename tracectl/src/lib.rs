// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Tracing setup for the networker. Every crate declares its tracing targets with
//! [`trace_target!`] or [`custom_target!`], and the binary controls their levels
//! through a [`TracingControl`].

pub mod control;
mod display;
pub mod errors;
pub mod targets;

// re-exports
pub use control::{TargetCfg, TracingControl};
pub use errors::TraceCtlError;
pub use tracing_subscriber::filter::LevelFilter;
