// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Assembly of the VRFs of a host and of their BGP instances

use std::net::Ipv4Addr;

use config::internal::routing::bgp::{
    AfIpv4Ucast, AfIpv6Ucast, AfL2vpnEvpn, BgpConfig, BgpNeighbor, BgpOptions, Protocol,
    Redistribute, RemoteAs, VrfImports,
};
use config::internal::routing::importrule::ImportRule;
use config::internal::routing::vrf::{VRF_TABLE_OFFSET, VrfConfig};
use config::{ConfigError, NetworkAttachment, NetworkModel};
use tracing::debug;

use crate::confbuild::DerivationWarning;
use crate::confbuild::importrule::derive_import_rule;
use crate::confbuild::namegen::VrfConfigNames;
use crate::confbuild::prefixlist::build_prefix_lists;
use crate::confbuild::routemap::build_route_map;

/// Router-id used when the underlay has no IPv4 address
pub const ROUTER_ID_PLACEHOLDER: Ipv4Addr = Ipv4Addr::new(169, 254, 255, 255);

/// Name of the peer group of the fabric neighbors of the default BGP instance
pub const FABRIC_PEER_GROUP: &str = "FABRIC";

/// Identity of the BGP speaker of a host: ASN and router-id, common to all of its instances
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BgpIdentity {
    pub asn: u32,
    pub router_id: Ipv4Addr,
}

impl BgpIdentity {
    /// Get the BGP identity of a host from its underlay network
    pub fn from_model(
        model: &NetworkModel,
        warnings: &mut Vec<DerivationWarning>,
    ) -> Result<Self, ConfigError> {
        let underlay = model.underlay();
        let asn = underlay
            .asn
            .map(|asn| asn.as_u32())
            .ok_or_else(|| ConfigError::MissingAsn(underlay.id.clone()))?;
        let router_id = match underlay.first_ipv4() {
            Some(address) => address,
            None => {
                let warning =
                    DerivationWarning::NoRouterIdAddress(underlay.id.clone(), ROUTER_ID_PLACEHOLDER);
                warnings.push(warning);
                ROUTER_ID_PLACEHOLDER
            }
        };
        Ok(Self { asn, router_id })
    }
}

fn bgp_options() -> BgpOptions {
    BgpOptions::new()
        .set_network_import_check(false)
        .set_ebgp_requires_policy(false)
        .set_bgp_default_unicast(false)
}

/// Build the BGP instance of the default VRF. It peers with the fabric over every NIC of
/// the host and advertises the VNIs of all VRFs.
#[must_use]
pub fn default_bgp_config(model: &NetworkModel, identity: &BgpIdentity) -> BgpConfig {
    let mut bgp = BgpConfig::new(identity.asn);
    bgp.set_router_id(identity.router_id);
    bgp.set_bgp_options(bgp_options());

    bgp.add_neighbor(
        BgpNeighbor::new_peer_group(FABRIC_PEER_GROUP)
            .set_remote_as(RemoteAs::External)
            .ipv4_unicast_activate(true)
            .l2vpn_evpn_activate(true),
    );
    for nic in model.nics() {
        bgp.add_neighbor(BgpNeighbor::new_unnumbered(&nic.name).set_peer_group(FABRIC_PEER_GROUP));
    }

    let mut af_ipv4 = AfIpv4Ucast::new();
    af_ipv4.redistribute(Redistribute::new(Protocol::Connected));
    bgp.set_af_ipv4unicast(af_ipv4);
    bgp.set_af_l2vpn_evpn(AfL2vpnEvpn::new().set_adv_all_vni(true));
    bgp
}

fn vrf_imports(rule: &ImportRule) -> VrfImports {
    let mut imports = VrfImports::new().set_routemap(&rule.target_vrf.import_rmap());
    for vrf in &rule.import_vrfs {
        imports.add_vrf(vrf);
    }
    imports
}

/// Build the BGP instance of a VRF: connected routes get advertised and routes of other VRFs
/// get leaked as the import rule of the VRF says.
#[must_use]
pub fn vrf_bgp_config(rule: &ImportRule, identity: &BgpIdentity) -> BgpConfig {
    let mut bgp = BgpConfig::new(identity.asn).set_vrf_name(&rule.target_vrf);
    bgp.set_router_id(identity.router_id);
    bgp.set_bgp_options(bgp_options());

    let mut af_ipv4 = AfIpv4Ucast::new();
    af_ipv4.redistribute(Redistribute::new(Protocol::Connected));
    af_ipv4.set_vrf_imports(vrf_imports(rule));
    bgp.set_af_ipv4unicast(af_ipv4);

    let mut af_ipv6 = AfIpv6Ucast::new();
    af_ipv6.redistribute(Redistribute::new(Protocol::Connected));
    af_ipv6.set_vrf_imports(vrf_imports(rule));
    bgp.set_af_ipv6unicast(af_ipv6);

    bgp.set_af_l2vpn_evpn(
        AfL2vpnEvpn::new()
            .set_adv_ipv4_unicast(true)
            .set_adv_ipv6_unicast(true),
    );
    bgp
}

fn vrf_config(
    network: &NetworkAttachment,
    index: usize,
    rule: ImportRule,
    identity: &BgpIdentity,
) -> Result<VrfConfig, ConfigError> {
    let vrf = network
        .vrf
        .map(|vrf| vrf.as_u32())
        .ok_or_else(|| ConfigError::MissingVrf(network.id.clone()))?;
    let table_id = u32::try_from(index)
        .ok()
        .and_then(|index| VRF_TABLE_OFFSET.checked_add(index))
        .ok_or_else(|| ConfigError::InternalFailure(format!("No table id for vrf {vrf}")))?;

    let plists = build_prefix_lists(&rule)?;
    let rmap = build_route_map(&rule.target_vrf, &plists)?;
    let mut vrf_cfg = VrfConfig::new(&rule.target_vrf, vrf, vrf, table_id)
        .set_description(&network.id)
        .set_import_vrfs(rule.import_vrfs.clone())
        .set_prefix_lists(plists)
        .set_route_map(rmap);
    vrf_cfg.set_bgp(vrf_bgp_config(&rule, identity));
    debug!(
        "Assembled vrf {} (table {table_id}) importing from {:?}",
        vrf_cfg.name, vrf_cfg.import_vrfs
    );
    Ok(vrf_cfg)
}

/// Build the VRF of every network having an import rule, in the order of the networks
pub fn assemble_vrfs(
    model: &NetworkModel,
    identity: &BgpIdentity,
) -> Result<Vec<VrfConfig>, ConfigError> {
    let mut vrfs = vec![];
    for (index, network) in model.networks().iter().enumerate() {
        if let Some(rule) = derive_import_rule(model, network) {
            vrfs.push(vrf_config(network, index, rule, identity)?);
        }
    }
    Ok(vrfs)
}
