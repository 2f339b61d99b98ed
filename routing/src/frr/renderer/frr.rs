// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Config renderer: frr

use crate::frr::renderer::builder::{ConfigBuilder, MARKER, Render};
use config::internal::routing::frr::Frr;

/* impl Render */
impl Render for Frr {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _: &Self::Context) -> Self::Output {
        let mut cfg = ConfigBuilder::new();
        cfg += format!("frr defaults {}", self.profile);
        cfg += format!("hostname {}", self.hostname);
        if let Some(level) = &self.syslog {
            cfg += format!("log syslog {level}");
        }
        cfg += "service integrated-vtysh-config";
        cfg += MARKER;
        cfg
    }
}
