// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Config renderer: route maps

use crate::frr::renderer::builder::{ConfigBuilder, MARKER, Render};
use config::internal::routing::routemap::{
    RouteMap, RouteMapEntry, RouteMapMatch, RouteMapSetAction,
};

/* Impl Render */
impl Render for RouteMapSetAction {
    type Context = ();
    type Output = String;
    fn render(&self, _ctx: &Self::Context) -> Self::Output {
        let mut statement = match self {
            RouteMapSetAction::Community(comms, additive) => {
                let mut communities = "community".to_string();
                for c in comms {
                    communities += " ";
                    communities += c.to_string().as_str();
                }
                if *additive {
                    communities += " additive";
                }
                communities
            }
        };
        statement.insert_str(0, " set ");
        statement
    }
}
impl Render for RouteMapMatch {
    type Context = ();
    type Output = String;
    fn render(&self, _ctx: &Self::Context) -> Self::Output {
        let mut statement = match self {
            RouteMapMatch::Ipv4AddressPrefixList(preflistname) => {
                format!("ip address prefix-list {preflistname}")
            }
            RouteMapMatch::Ipv6AddressPrefixList(preflistname) => {
                format!("ipv6 address prefix-list {preflistname}")
            }
        };
        statement.insert_str(0, " match ");
        statement
    }
}
impl Render for RouteMapEntry {
    type Context = (String, u32); /* u32 is sequence number */
    type Output = ConfigBuilder;
    fn render(&self, ctx: &Self::Context) -> Self::Output {
        let mut config = ConfigBuilder::new();
        config += format!("{} {} {}", ctx.0, self.policy, ctx.1);
        self.matches.iter().for_each(|m| config += m.render(&()));
        self.actions.iter().for_each(|a| config += a.render(&()));
        config += "exit";
        config += MARKER;
        config
    }
}
impl Render for RouteMap {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _ctx: &Self::Context) -> Self::Output {
        let mut config = ConfigBuilder::new();
        config += MARKER;
        let render_prefix = format!("route-map {}", self.name);
        self.entries
            .iter()
            .for_each(|(seq, e)| config += e.render(&(render_prefix.clone(), *seq)));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::internal::routing::routemap::{Community, MatchingPolicy};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_route_map_render() {
        let mut rmap = RouteMap::new("vrf104009-import-map");
        let entry = RouteMapEntry::new(MatchingPolicy::Permit)
            .add_match(RouteMapMatch::Ipv4AddressPrefixList(
                "vrf104009-import-prefixes-no-export".to_string(),
            ))
            .add_action(RouteMapSetAction::Community(vec![Community::NoExport], true));
        rmap.add_entry(None, entry).unwrap();
        let entry = RouteMapEntry::new(MatchingPolicy::Permit).add_match(
            RouteMapMatch::Ipv6AddressPrefixList("vrf104009-import-prefixes-ipv6".to_string()),
        );
        rmap.add_entry(None, entry).unwrap();
        rmap.add_entry(None, RouteMapEntry::new(MatchingPolicy::Deny))
            .unwrap();

        let expected = "\
!
route-map vrf104009-import-map permit 10
 match ip address prefix-list vrf104009-import-prefixes-no-export
 set community no-export additive
exit
!
route-map vrf104009-import-map permit 20
 match ipv6 address prefix-list vrf104009-import-prefixes-ipv6
exit
!
route-map vrf104009-import-map deny 30
exit
!
";
        assert_eq!(rmap.render(&()).to_string(), expected);
    }

    #[test]
    fn test_community_render() {
        let additive = RouteMapSetAction::Community(vec![Community::NoExport], true);
        assert_eq!(additive.render(&()), " set community no-export additive");
        let replacing = RouteMapSetAction::Community(vec![Community::NoExport], false);
        assert_eq!(replacing.render(&()), " set community no-export");
    }
}
