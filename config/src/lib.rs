// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Configuration models for the networker. The external model is the description of the
//! network attachments of a host, as loaded from its YAML description and validated into a
//! `NetworkModel`. The internal model is the set of routing policy objects (import rules,
//! prefix lists, route maps, VRFs and BGP instances) that get derived from it and rendered
//! for the routing daemon.

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod errors;
pub mod external;
pub mod internal;

pub use errors::{ConfigError, ConfigResult}; // re-export
pub use external::network::{Asn, NetworkAttachment, NetworkRole, Nic, Vrf}; // re-export
pub use external::{NetworkModel, NetworkModelSpec}; // re-export
pub use internal::InternalConfig; // re-export

use tracectl::trace_target;
trace_target!("config", LevelFilter::DEBUG, &["model"]);
