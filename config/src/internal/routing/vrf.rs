// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Internal configuration model: VRFs

use super::bgp::BgpConfig;
use super::prefixlist::PrefixList;
use super::routemap::RouteMap;

/// Route tables of VRFs are numbered from this value on
pub const VRF_TABLE_OFFSET: u32 = 1000;

/// Everything the routing daemon needs to know about a VRF of the host
#[derive(Clone, Debug, PartialEq)]
pub struct VrfConfig {
    pub name: String,
    pub id: u32,
    pub vni: u32,
    pub table_id: u32,
    pub import_vrfs: Vec<String>,
    pub prefix_lists: Vec<PrefixList>,
    pub route_map: Option<RouteMap>,
    pub bgp: Option<BgpConfig>,
    pub description: Option<String>, /* informational */
}

impl VrfConfig {
    #[must_use]
    pub fn new(name: &str, id: u32, vni: u32, table_id: u32) -> Self {
        Self {
            name: name.to_owned(),
            id,
            vni,
            table_id,
            import_vrfs: vec![],
            prefix_lists: vec![],
            route_map: None,
            bgp: None,
            description: None,
        }
    }
    #[must_use]
    pub fn set_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }
    #[must_use]
    pub fn set_import_vrfs(mut self, vrfs: Vec<String>) -> Self {
        self.import_vrfs = vrfs;
        self
    }
    #[must_use]
    pub fn set_prefix_lists(mut self, plists: Vec<PrefixList>) -> Self {
        self.prefix_lists = plists;
        self
    }
    #[must_use]
    pub fn set_route_map(mut self, rmap: RouteMap) -> Self {
        self.route_map = Some(rmap);
        self
    }
    pub fn set_bgp(&mut self, bgp: BgpConfig) -> &Self {
        self.bgp = Some(bgp);
        self
    }
}
