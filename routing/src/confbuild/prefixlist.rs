// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Prefix lists implementing an import rule

use config::ConfigError;
use config::internal::routing::importrule::{ImportPrefix, ImportRule};
use config::internal::routing::prefixlist::{
    IpVer, PrefixList, PrefixListEntry, PrefixListMatchLen,
};
use ipnet::IpNet;
use tracing::debug;

use crate::confbuild::namegen::VrfConfigNames;

fn ipver_of(prefix: &IpNet) -> IpVer {
    match prefix {
        IpNet::V4(_) => IpVer::V4,
        IpNet::V6(_) => IpVer::V6,
    }
}

/// Build a prefix list entry for an imported prefix. Unless it is a default route, the prefix
/// matches any more specific route too.
fn import_plist_entry(import: &ImportPrefix) -> PrefixListEntry {
    let len_match = (import.prefix.prefix_len() > 0)
        .then(|| PrefixListMatchLen::Le(import.prefix.max_prefix_len()));
    PrefixListEntry::new(import.policy.into(), import.prefix, len_match)
}

/// Build the prefix list for the prefixes of one family in a group, if there are any
fn import_plist(
    vrf: &str,
    ipver: IpVer,
    no_export: bool,
    group: &[ImportPrefix],
) -> Result<Option<PrefixList>, ConfigError> {
    let mut entries = group
        .iter()
        .filter(|import| ipver_of(&import.prefix) == ipver)
        .map(import_plist_entry)
        .peekable();
    if entries.peek().is_none() {
        return Ok(None);
    }
    let mut plist = PrefixList::new(
        &vrf.import_plist(ipver, no_export),
        ipver,
        Some(vrf.import_plist_desc(ipver, no_export)),
    );
    plist.add_entries(entries)?;
    debug!("Built prefix list {} with {} entries", plist.name, plist.entries.len());
    Ok(Some(plist))
}

/// Build the prefix lists implementing an import rule: for IPv4 then IPv6, the list of
/// prefixes not to export, followed by that of the other imported prefixes. Every list is
/// numbered on its own and lists that would be empty are not built.
pub fn build_prefix_lists(rule: &ImportRule) -> Result<Vec<PrefixList>, ConfigError> {
    let vrf = rule.target_vrf.as_str();
    let mut plists = Vec::with_capacity(4);
    for ipver in [IpVer::V4, IpVer::V6] {
        let groups = [
            (true, rule.import_prefixes_no_export.as_slice()),
            (false, rule.import_prefixes.as_slice()),
        ];
        for (no_export, group) in groups {
            if let Some(plist) = import_plist(vrf, ipver, no_export, group)? {
                plists.push(plist);
            }
        }
    }
    Ok(plists)
}
