// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Internal configuration model: BGP

use std::fmt::Display;
use std::net::Ipv4Addr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Protocol {
    #[default]
    Connected,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Redistribute {
    pub protocol: Protocol,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// VRF leaking. VRFs are imported in the order they were added.
pub struct VrfImports {
    pub from_vrf: Vec<String>,
    pub routemap: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AfIpv4Ucast {
    pub redistribute: Vec<Redistribute>,
    pub imports: Option<VrfImports>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AfIpv6Ucast {
    pub redistribute: Vec<Redistribute>,
    pub imports: Option<VrfImports>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AfL2vpnEvpn {
    pub adv_all_vni: bool,
    pub adv_ipv4_unicast: bool,
    pub adv_ipv6_unicast: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BgpNeighType {
    PeerGroup(String),
    Unnumbered(String), /* BGP unnumbered over an interface */
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteAs {
    External,
}

#[derive(Clone, Debug, PartialEq)]
/// A BGP neighbor config
pub struct BgpNeighbor {
    pub ntype: BgpNeighType,
    pub remote_as: Option<RemoteAs>,
    pub peer_group: Option<String>,

    /* Address families */
    pub ipv4_unicast: bool,
    pub l2vpn_evpn: bool,
}

#[derive(Clone, Debug, PartialEq)]
/// BGP global configuration options
pub struct BgpOptions {
    pub network_import_check: bool,
    pub ebgp_requires_policy: bool,
    pub bgp_default_unicast: bool,
    pub multipath_relax: bool,
}
impl Default for BgpOptions {
    fn default() -> Self {
        Self {
            network_import_check: false,
            ebgp_requires_policy: false,
            bgp_default_unicast: false,
            multipath_relax: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// A BGP instance config, within a certain VRF
pub struct BgpConfig {
    pub asn: u32,
    pub vrf: Option<String>,
    pub router_id: Option<Ipv4Addr>,
    pub options: BgpOptions,
    pub neighbors: Vec<BgpNeighbor>,
    pub af_ipv4unicast: Option<AfIpv4Ucast>,
    pub af_ipv6unicast: Option<AfIpv6Ucast>,
    pub af_l2vpnevpn: Option<AfL2vpnEvpn>,
}

/* ===== impls: Builders ===== */
impl Redistribute {
    #[must_use]
    pub fn new(protocol: Protocol) -> Self {
        Self { protocol }
    }
}
impl VrfImports {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn set_routemap(mut self, routemap: &str) -> Self {
        self.routemap = Some(routemap.to_owned());
        self
    }
    pub fn add_vrf(&mut self, vrf: &str) {
        if !self.from_vrf.iter().any(|v| v == vrf) {
            self.from_vrf.push(vrf.to_owned());
        }
    }
}
impl AfIpv4Ucast {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_vrf_imports(&mut self, imports: VrfImports) {
        self.imports = Some(imports);
    }
    pub fn redistribute(&mut self, redistribute: Redistribute) {
        self.redistribute.push(redistribute);
    }
}
impl AfIpv6Ucast {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_vrf_imports(&mut self, imports: VrfImports) {
        self.imports = Some(imports);
    }
    pub fn redistribute(&mut self, redistribute: Redistribute) {
        self.redistribute.push(redistribute);
    }
}
impl AfL2vpnEvpn {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn set_adv_all_vni(mut self, value: bool) -> Self {
        self.adv_all_vni = value;
        self
    }
    #[must_use]
    pub fn set_adv_ipv4_unicast(mut self, value: bool) -> Self {
        self.adv_ipv4_unicast = value;
        self
    }
    #[must_use]
    pub fn set_adv_ipv6_unicast(mut self, value: bool) -> Self {
        self.adv_ipv6_unicast = value;
        self
    }
}
impl BgpNeighbor {
    fn with_type(ntype: BgpNeighType) -> Self {
        Self {
            ntype,
            remote_as: None,
            peer_group: None,
            ipv4_unicast: false,
            l2vpn_evpn: false,
        }
    }
    #[must_use]
    pub fn new_peer_group(group: &str) -> Self {
        Self::with_type(BgpNeighType::PeerGroup(group.to_owned()))
    }
    #[must_use]
    pub fn new_unnumbered(ifname: &str) -> Self {
        Self::with_type(BgpNeighType::Unnumbered(ifname.to_owned()))
    }
    #[must_use]
    pub fn is_peer_group(&self) -> bool {
        matches!(self.ntype, BgpNeighType::PeerGroup(_))
    }
    #[must_use]
    pub fn set_remote_as(mut self, remote_as: RemoteAs) -> Self {
        self.remote_as = Some(remote_as);
        self
    }
    #[must_use]
    pub fn set_peer_group(mut self, peer_group: &str) -> Self {
        self.peer_group = Some(peer_group.to_owned());
        self
    }

    /* AFs: activated explicitly */
    #[must_use]
    pub fn ipv4_unicast_activate(mut self, value: bool) -> Self {
        self.ipv4_unicast = value;
        self
    }
    #[must_use]
    pub fn l2vpn_evpn_activate(mut self, value: bool) -> Self {
        self.l2vpn_evpn = value;
        self
    }
}

impl BgpOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn set_network_import_check(mut self, value: bool) -> Self {
        self.network_import_check = value;
        self
    }
    #[must_use]
    pub fn set_ebgp_requires_policy(mut self, value: bool) -> Self {
        self.ebgp_requires_policy = value;
        self
    }
    #[must_use]
    pub fn set_bgp_default_unicast(mut self, value: bool) -> Self {
        self.bgp_default_unicast = value;
        self
    }
}
impl BgpConfig {
    #[must_use]
    pub fn new(asn: u32) -> Self {
        Self {
            asn,
            ..Default::default()
        }
    }
    #[must_use]
    pub fn set_vrf_name(mut self, vrf_name: &str) -> Self {
        self.vrf = Some(vrf_name.to_owned());
        self
    }
    pub fn set_router_id(&mut self, router_id: Ipv4Addr) -> &Self {
        self.router_id = Some(router_id);
        self
    }
    pub fn set_bgp_options(&mut self, options: BgpOptions) -> &Self {
        self.options = options;
        self
    }
    pub fn add_neighbor(&mut self, neigh: BgpNeighbor) {
        self.neighbors.push(neigh);
    }
    pub fn set_af_l2vpn_evpn(&mut self, af_l2vpnevpn: AfL2vpnEvpn) {
        self.af_l2vpnevpn = Some(af_l2vpnevpn);
    }
    pub fn set_af_ipv4unicast(&mut self, af_ipv4unicast: AfIpv4Ucast) {
        self.af_ipv4unicast = Some(af_ipv4unicast);
    }
    pub fn set_af_ipv6unicast(&mut self, af_ipv6unicast: AfIpv6Ucast) {
        self.af_ipv6unicast = Some(af_ipv6unicast);
    }
}

/* Display */
impl Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Connected => write!(f, "connected"),
        }
    }
}
impl Display for RemoteAs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteAs::External => write!(f, "external"),
        }
    }
}
impl Display for BgpNeighType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BgpNeighType::PeerGroup(name) | BgpNeighType::Unnumbered(name) => write!(f, "{name}"),
        }
    }
}
