// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Safe replacement of configuration files. A generated configuration is written to a scratch
//! file next to its destination, checked by an external validator and compared with the
//! current file. The destination is only replaced, atomically, when the new content is valid
//! and differs. The service owning the file may then be reloaded.

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

pub mod artifact;
mod command;
pub mod committer;
pub mod errors;
pub mod reload;
pub mod validate;

// re-exports
pub use artifact::Artifact;
pub use committer::{CommitOutcome, ConfigCommitter};
pub use errors::{CommandError, CommitError};
pub use reload::{Reloader, SystemctlReloader};
pub use validate::{CommandValidator, PATH_PLACEHOLDER, Validator};

use tracectl::trace_target;
trace_target!("commit", LevelFilter::INFO, &["commit"]);
