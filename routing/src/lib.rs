// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Route-leak policy compiler. From a validated `NetworkModel`, derive for every network
//! the VRFs and prefixes it imports routes from, build the prefix lists and route maps that
//! implement those imports and assemble everything into an `InternalConfig` that can be
//! rendered as a configuration for the FRR routing daemon.

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod confbuild;
pub mod frr;

// re-exports
pub use confbuild::{Compiled, DerivationWarning, build_internal_config};
pub use frr::renderer::render_config;

use tracectl::trace_target;
trace_target!("routing", LevelFilter::INFO, &["compiler"]);
