// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Import route map of a VRF

use config::ConfigError;
use config::internal::routing::prefixlist::{IpVer, PrefixList};
use config::internal::routing::routemap::{
    Community, MatchingPolicy, RouteMap, RouteMapEntry, RouteMapMatch, RouteMapSetAction,
};
use tracing::debug;

use crate::confbuild::namegen::{VrfConfigNames, is_no_export_plist};

fn plist_match(plist: &PrefixList) -> RouteMapMatch {
    match plist.ipver {
        IpVer::V4 => RouteMapMatch::Ipv4AddressPrefixList(plist.name.clone()),
        IpVer::V6 => RouteMapMatch::Ipv6AddressPrefixList(plist.name.clone()),
    }
}

/// Build the import route map of a VRF from its prefix lists: one entry permitting each
/// prefix list, in reverse order of their names, followed by an entry denying everything
/// else. Routes permitted by a no-export prefix list get the no-export community.
/// If several prefix lists have the same name, only the first one is considered.
pub fn build_route_map(vrf: &str, plists: &[PrefixList]) -> Result<RouteMap, ConfigError> {
    let mut unique: Vec<&PrefixList> = Vec::with_capacity(plists.len());
    for plist in plists {
        if unique.iter().any(|known| known.name == plist.name) {
            debug!("Ignoring duplicate prefix list {}", plist.name);
        } else {
            unique.push(plist);
        }
    }
    unique.sort_by(|a, b| b.name.cmp(&a.name));

    let mut rmap = RouteMap::new(&vrf.import_rmap());
    for plist in unique {
        let mut entry = RouteMapEntry::new(MatchingPolicy::Permit).add_match(plist_match(plist));
        if is_no_export_plist(&plist.name) {
            entry = entry.add_action(RouteMapSetAction::Community(
                vec![Community::NoExport],
                true,
            ));
        }
        rmap.add_entry(None, entry)?;
    }
    rmap.add_entry(None, RouteMapEntry::new(MatchingPolicy::Deny))?;
    Ok(rmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confbuild::fixtures::net;
    use config::internal::routing::prefixlist::{PrefixListAction, PrefixListEntry};
    use pretty_assertions::assert_eq;

    fn plist(name: &str, ipver: IpVer) -> PrefixList {
        let prefix = match ipver {
            IpVer::V4 => net("10.0.16.0/22"),
            IpVer::V6 => net("2001:db8:16::/48"),
        };
        let mut plist = PrefixList::new(name, ipver, None);
        plist
            .add_entry(
                None,
                PrefixListEntry::new(PrefixListAction::Permit, prefix, None),
            )
            .unwrap();
        plist
    }

    #[test]
    fn test_route_map_order() {
        let plists = vec![
            plist("vrf104009-import-prefixes-no-export", IpVer::V4),
            plist("vrf104009-import-prefixes", IpVer::V4),
            plist("vrf104009-import-prefixes-ipv6-no-export", IpVer::V6),
            plist("vrf104009-import-prefixes-ipv6", IpVer::V6),
        ];
        let rmap = build_route_map("vrf104009", &plists).unwrap();
        assert_eq!(rmap.name, "vrf104009-import-map");

        let orders: Vec<u32> = rmap.entries.keys().copied().collect();
        assert_eq!(orders, vec![10, 20, 30, 40, 50]);

        let matches: Vec<RouteMapMatch> = rmap
            .entries
            .values()
            .flat_map(|e| e.matches.iter().cloned())
            .collect();
        assert_eq!(
            matches,
            vec![
                RouteMapMatch::Ipv4AddressPrefixList(
                    "vrf104009-import-prefixes-no-export".to_string()
                ),
                RouteMapMatch::Ipv6AddressPrefixList(
                    "vrf104009-import-prefixes-ipv6-no-export".to_string()
                ),
                RouteMapMatch::Ipv6AddressPrefixList("vrf104009-import-prefixes-ipv6".to_string()),
                RouteMapMatch::Ipv4AddressPrefixList("vrf104009-import-prefixes".to_string()),
            ]
        );

        let no_export = RouteMapSetAction::Community(vec![Community::NoExport], true);
        assert_eq!(rmap.entries[&10].actions, vec![no_export.clone()]);
        assert_eq!(rmap.entries[&20].actions, vec![no_export]);
        assert!(rmap.entries[&30].actions.is_empty());
        assert!(rmap.entries[&40].actions.is_empty());

        let last = &rmap.entries[&50];
        assert_eq!(last.policy, MatchingPolicy::Deny);
        assert!(last.matches.is_empty());
    }

    #[test]
    fn test_route_map_does_not_depend_on_input_order() {
        let mut plists = vec![
            plist("vrf3981-import-prefixes", IpVer::V4),
            plist("vrf3981-import-prefixes-ipv6", IpVer::V6),
        ];
        let first = build_route_map("vrf3981", &plists).unwrap();
        plists.reverse();
        let second = build_route_map("vrf3981", &plists).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_prefix_lists() {
        let plists = vec![
            plist("vrf3981-import-prefixes", IpVer::V4),
            plist("vrf3981-import-prefixes", IpVer::V6),
        ];
        let rmap = build_route_map("vrf3981", &plists).unwrap();
        assert_eq!(rmap.entries.len(), 2);
        assert_eq!(
            rmap.entries[&10].matches,
            vec![RouteMapMatch::Ipv4AddressPrefixList(
                "vrf3981-import-prefixes".to_string()
            )]
        );
    }

    #[test]
    fn test_route_map_without_prefix_lists() {
        let rmap = build_route_map("vrf3981", &[]).unwrap();
        let orders: Vec<u32> = rmap.entries.keys().copied().collect();
        assert_eq!(orders, vec![10]);
        assert_eq!(rmap.entries[&10].policy, MatchingPolicy::Deny);
    }
}
