// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Internal configuration model and builders.
//! The internal configuration is what gets rendered for the routing daemon. It is built
//! from a validated `NetworkModel` and is never modified once built.

pub mod routing;

use tracing::debug;

use crate::internal::routing::bgp::BgpConfig;
use crate::internal::routing::frr::Frr;
use crate::internal::routing::prefixlist::PrefixList;
use crate::internal::routing::routemap::RouteMap;
use crate::internal::routing::vrf::VrfConfig;
use crate::{ConfigError, ConfigResult};

#[derive(Clone, Debug, PartialEq)]
/* Main internal configuration */
pub struct InternalConfig {
    pub frr: Frr,
    pub bgp: Option<BgpConfig>, /* the BGP instance of the default VRF */
    pub vrfs: Vec<VrfConfig>,   /* in the order of the networks they come from */
    pub default_route_vrf: Option<String>,
}

impl InternalConfig {
    #[must_use]
    pub fn new(frr: Frr) -> Self {
        Self {
            frr,
            bgp: None,
            vrfs: vec![],
            default_route_vrf: None,
        }
    }
    pub fn set_bgp(&mut self, bgp: BgpConfig) {
        self.bgp = Some(bgp);
    }
    pub fn set_default_route_vrf(&mut self, vrf: Option<String>) {
        self.default_route_vrf = vrf;
    }
    pub fn add_vrf_config(&mut self, vrf_cfg: VrfConfig) -> ConfigResult {
        debug!(
            "Adding VRF config for vrf: {} vni: {} tableid: {}",
            vrf_cfg.name, vrf_cfg.vni, vrf_cfg.table_id
        );
        if self.vrfs.iter().any(|vrf| {
            vrf.name == vrf_cfg.name || vrf.vni == vrf_cfg.vni || vrf.table_id == vrf_cfg.table_id
        }) {
            return Err(ConfigError::InternalFailure(format!(
                "Duplicate VRF fields when adding vrf {}. This is a bug.",
                vrf_cfg.name
            )));
        }
        self.vrfs.push(vrf_cfg);
        Ok(())
    }
    #[must_use]
    pub fn get_vrf(&self, name: &str) -> Option<&VrfConfig> {
        self.vrfs.iter().find(|vrf| vrf.name == name)
    }
    /// All prefix lists, VRF by VRF
    pub fn prefix_lists(&self) -> impl Iterator<Item = &PrefixList> {
        self.vrfs.iter().flat_map(|vrf| vrf.prefix_lists.iter())
    }
    /// All route maps, VRF by VRF
    pub fn route_maps(&self) -> impl Iterator<Item = &RouteMap> {
        self.vrfs.iter().filter_map(|vrf| vrf.route_map.as_ref())
    }
}
