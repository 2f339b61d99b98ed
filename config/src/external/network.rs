// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! External configuration model: the network attachments of a host

use ipnet::IpNet;
use mac_address::MacAddress;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The role a network plays for the host
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum NetworkRole {
    /// Transport network carrying the VXLAN-encapsulated traffic
    Underlay,
    PrivatePrimaryUnshared,
    PrivatePrimaryShared,
    PrivateSecondaryShared,
    /// Provides reachability to outside destinations (internet, MPLS, ...)
    External,
}
impl NetworkRole {
    #[must_use]
    pub fn is_private_primary(&self) -> bool {
        matches!(
            self,
            NetworkRole::PrivatePrimaryUnshared | NetworkRole::PrivatePrimaryShared
        )
    }
}
impl Display for NetworkRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{name}")
    }
}

/// A VRF number. Zero is not a valid VRF number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vrf(u32);
impl Vrf {
    #[must_use]
    pub fn new(vrf: u32) -> Option<Self> {
        (vrf != 0).then_some(Self(vrf))
    }
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
    /// Name of the kernel / routing daemon VRF for this number
    #[must_use]
    pub fn name(&self) -> String {
        format!("vrf{}", self.0)
    }
}
impl Display for Vrf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vrf{}", self.0)
    }
}

/// An autonomous system number. Zero is reserved and never valid here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Asn(u32);
impl Asn {
    #[must_use]
    pub fn new(asn: u32) -> Option<Self> {
        (asn != 0).then_some(Self(asn))
    }
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}
impl Display for Asn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tell if a prefix is the all-zeros route of its family (0.0.0.0/0 or ::/0)
#[must_use]
pub fn is_default_route(prefix: &IpNet) -> bool {
    prefix.prefix_len() == 0
}

/// A network the host is attached to
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkAttachment {
    pub id: String,
    pub role: Option<NetworkRole>, /* None if the network is not classified */
    pub vrf: Option<Vrf>,
    pub asn: Option<Asn>,
    pub ips: Vec<IpAddr>,
    pub prefixes: Vec<IpNet>,             /* prefixes routed in this network */
    pub destination_prefixes: Vec<IpNet>, /* prefixes reachable through this network */
    pub nat: bool,
}

impl NetworkAttachment {
    #[must_use]
    pub fn new(id: &str, role: Option<NetworkRole>) -> Self {
        Self {
            id: id.to_owned(),
            role,
            vrf: None,
            asn: None,
            ips: vec![],
            prefixes: vec![],
            destination_prefixes: vec![],
            nat: false,
        }
    }
    #[must_use]
    pub fn set_vrf(mut self, vrf: u32) -> Self {
        self.vrf = Vrf::new(vrf);
        self
    }
    #[must_use]
    pub fn set_asn(mut self, asn: u32) -> Self {
        self.asn = Asn::new(asn);
        self
    }
    #[must_use]
    pub fn set_nat(mut self, nat: bool) -> Self {
        self.nat = nat;
        self
    }
    #[must_use]
    pub fn add_ip(mut self, ip: IpAddr) -> Self {
        self.ips.push(ip);
        self
    }
    #[must_use]
    pub fn add_prefix(mut self, prefix: IpNet) -> Self {
        self.prefixes.push(prefix.trunc());
        self
    }
    #[must_use]
    pub fn add_destination_prefix(mut self, prefix: IpNet) -> Self {
        self.destination_prefixes.push(prefix.trunc());
        self
    }

    #[must_use]
    pub fn is_role(&self, role: NetworkRole) -> bool {
        self.role == Some(role)
    }
    #[must_use]
    pub fn is_private_primary(&self) -> bool {
        self.role.is_some_and(|role| role.is_private_primary())
    }
    /// Name of the VRF of this network, if it has one
    #[must_use]
    pub fn vrf_name(&self) -> Option<String> {
        self.vrf.map(|vrf| vrf.name())
    }
    /// Tell if this network advertises a default route as a destination
    #[must_use]
    pub fn has_default_route(&self) -> bool {
        self.destination_prefixes.iter().any(is_default_route)
    }
    #[must_use]
    pub fn first_ipv4(&self) -> Option<Ipv4Addr> {
        self.ips.iter().find_map(|ip| match ip {
            IpAddr::V4(a) => Some(*a),
            IpAddr::V6(_) => None,
        })
    }
}

/// A network interface of the host
#[derive(Clone, Debug, PartialEq)]
pub struct Nic {
    pub name: String,
    pub mac: MacAddress,
}
impl Nic {
    #[must_use]
    pub fn new(name: &str, mac: MacAddress) -> Self {
        Self {
            name: name.to_owned(),
            mac,
        }
    }
}
