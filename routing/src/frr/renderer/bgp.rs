// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Config renderer: BGP

use crate::frr::renderer::builder::{ConfigBuilder, MARKER, Render};
use config::internal::routing::bgp::{
    AfIpv4Ucast, AfIpv6Ucast, AfL2vpnEvpn, BgpConfig, BgpNeighType, BgpNeighbor, BgpOptions,
    Redistribute, VrfImports,
};

/// First line of a neighbor: its declaration, along with either its peer group or its
/// remote AS. Peer groups get their remote AS on a line of their own.
fn neighbor_declaration(neigh: &BgpNeighbor) -> String {
    let ifname = match &neigh.ntype {
        BgpNeighType::PeerGroup(group) => return format!(" neighbor {group} peer-group"),
        BgpNeighType::Unnumbered(ifname) => ifname,
    };
    let head = format!(" neighbor {ifname} interface");
    match (&neigh.peer_group, neigh.remote_as) {
        (Some(group), _) => format!("{head} peer-group {group}"),
        (None, Some(remote_as)) => format!("{head} remote-as {remote_as}"),
        (None, None) => head,
    }
}

/// Activation of the neighbors of a BGP instance in an address family
fn af_activate(bgp: &BgpConfig, activated: impl Fn(&BgpNeighbor) -> bool) -> ConfigBuilder {
    let mut cfg = ConfigBuilder::new();
    for neigh in bgp.neighbors.iter().filter(|neigh| activated(neigh)) {
        cfg += format!(" neighbor {} activate", neigh.ntype);
    }
    cfg
}

/// Wrap the body of an address family in its stanza
fn af_stanza(afi_safi: &str, body: ConfigBuilder) -> ConfigBuilder {
    let mut cfg = ConfigBuilder::new();
    cfg += MARKER;
    cfg += format!("address-family {afi_safi}");
    cfg += body;
    cfg += "exit-address-family";
    cfg += MARKER;
    cfg
}

/// Body shared by the unicast address families: redistribution then VRF leaking
fn unicast_af_body(
    activate: ConfigBuilder,
    redistribute: &[Redistribute],
    imports: Option<&VrfImports>,
) -> ConfigBuilder {
    let mut body = activate;
    for redist in redistribute {
        body += redist.render(&());
    }
    if let Some(imports) = imports {
        body += imports.render(&());
    }
    body
}

impl Render for Redistribute {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _: &Self::Context) -> Self::Output {
        ConfigBuilder::from_string(format!(" redistribute {}", self.protocol))
    }
}
impl Render for VrfImports {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _: &Self::Context) -> ConfigBuilder {
        let mut cfg = ConfigBuilder::new();
        if let Some(rmap) = &self.routemap {
            cfg += format!(" import vrf route-map {rmap}");
        }
        for vrf in &self.from_vrf {
            cfg += format!(" import vrf {vrf}");
        }
        cfg
    }
}
impl Render for AfIpv4Ucast {
    type Context = BgpConfig;
    type Output = ConfigBuilder;
    fn render(&self, bgp: &BgpConfig) -> ConfigBuilder {
        let activate = af_activate(bgp, |neigh| neigh.ipv4_unicast);
        let body = unicast_af_body(activate, &self.redistribute, self.imports.as_ref());
        af_stanza("ipv4 unicast", body)
    }
}
impl Render for AfIpv6Ucast {
    type Context = BgpConfig;
    type Output = ConfigBuilder;
    fn render(&self, _: &BgpConfig) -> ConfigBuilder {
        /* no neighbor gets activated for ipv6: routes only get leaked across VRFs */
        let body = unicast_af_body(
            ConfigBuilder::new(),
            &self.redistribute,
            self.imports.as_ref(),
        );
        af_stanza("ipv6 unicast", body)
    }
}
impl Render for AfL2vpnEvpn {
    type Context = BgpConfig;
    type Output = ConfigBuilder;
    fn render(&self, bgp: &BgpConfig) -> ConfigBuilder {
        let mut body = af_activate(bgp, |neigh| neigh.l2vpn_evpn);
        let advertised = [
            (self.adv_all_vni, " advertise-all-vni"),
            (self.adv_ipv4_unicast, " advertise ipv4 unicast"),
            (self.adv_ipv6_unicast, " advertise ipv6 unicast"),
        ];
        for (_, line) in advertised.iter().filter(|(enabled, _)| *enabled) {
            body += *line;
        }
        af_stanza("l2vpn evpn", body)
    }
}
impl Render for BgpNeighbor {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _: &Self::Context) -> ConfigBuilder {
        let mut cfg = ConfigBuilder::from_string(neighbor_declaration(self));
        if self.is_peer_group()
            && let Some(remote_as) = self.remote_as
        {
            cfg += format!(" neighbor {} remote-as {remote_as}", self.ntype);
        }
        cfg
    }
}
impl Render for BgpOptions {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _: &Self::Context) -> ConfigBuilder {
        let mut cfg = ConfigBuilder::new();
        let lines = [
            (!self.network_import_check, " no bgp network import-check"),
            (!self.ebgp_requires_policy, " no bgp ebgp-requires-policy"),
            (!self.bgp_default_unicast, " no bgp default ipv4-unicast"),
            (self.multipath_relax, " bgp bestpath as-path multipath-relax"),
        ];
        for (_, line) in lines.iter().filter(|(enabled, _)| *enabled) {
            cfg += *line;
        }
        cfg
    }
}
impl Render for BgpConfig {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _: &Self::Context) -> ConfigBuilder {
        let mut config = match &self.vrf {
            Some(vrf) => ConfigBuilder::from_string(format!("router bgp {} vrf {vrf}", self.asn)),
            None => ConfigBuilder::from_string(format!("router bgp {}", self.asn)),
        };
        if let Some(router_id) = &self.router_id {
            config += format!(" bgp router-id {router_id}");
        }
        config += self.options.render(&());
        for neigh in &self.neighbors {
            config += neigh.render(&());
        }

        /* address families */
        if let Some(af) = &self.af_ipv4unicast {
            config += af.render(self);
        }
        if let Some(af) = &self.af_ipv6unicast {
            config += af.render(self);
        }
        if let Some(af) = &self.af_l2vpnevpn {
            config += af.render(self);
        }

        config += "exit";
        config += MARKER;
        config
    }
}
