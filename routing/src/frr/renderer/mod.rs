// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! FRR config renderer

pub mod bgp;
pub mod builder;
pub mod frr;
pub mod prefixlist;
pub mod routemap;
pub mod vrf;

use crate::frr::renderer::builder::{ConfigBuilder, MARKER, Render};
use crate::frr::renderer::vrf::render_vrf_bgp;
use config::InternalConfig;

/// First line of every rendered config
pub const CONFIG_HEADER: &str = "! This file was generated by networker. Do not edit.";

impl Render for InternalConfig {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _: &Self::Context) -> Self::Output {
        let mut cfg = ConfigBuilder::new();
        cfg += CONFIG_HEADER;
        cfg += MARKER;

        /* frr profile */
        cfg += self.frr.render(&());

        /* vrfs */
        cfg += self.vrfs.render(&());

        /* BGP instance of the default VRF */
        if let Some(bgp) = &self.bgp {
            cfg += bgp.render(&());
        }

        /* Vrf BGP instances */
        cfg += render_vrf_bgp(&self.vrfs);

        /* prefix lists */
        self.prefix_lists().for_each(|plist| cfg += plist.render(&()));
        cfg += MARKER;

        /* route maps */
        self.route_maps().for_each(|rmap| cfg += rmap.render(&()));

        cfg += "line vty";
        cfg += MARKER;
        cfg
    }
}

/// Render an [`InternalConfig`] as an FRR configuration document. The document only depends on
/// the configuration: rendering the same configuration twice yields the same text.
#[must_use]
pub fn render_config(internal: &InternalConfig) -> String {
    internal.render(&()).to_string()
}
