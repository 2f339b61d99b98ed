// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Internal configuration model: prefix list

use ipnet::IpNet;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::error;

use crate::internal::routing::importrule::AccessPolicy;
use crate::{ConfigError, ConfigResult};

/// Sequence number of the first entry of a prefix list, when auto-numbered
pub const PLIST_SEQ_SEED: u32 = 100;

#[derive(Clone, Copy, Debug, Ord, Eq, PartialOrd, PartialEq)]
pub enum PrefixListAction {
    Deny,
    Permit,
}
impl From<AccessPolicy> for PrefixListAction {
    fn from(policy: AccessPolicy) -> Self {
        match policy {
            AccessPolicy::Permit => PrefixListAction::Permit,
            AccessPolicy::Deny => PrefixListAction::Deny,
        }
    }
}

#[derive(Clone, Copy, Debug, Ord, Eq, PartialOrd, PartialEq)]
pub enum PrefixListMatchLen {
    Le(u8),
}

#[derive(Clone, Debug, Ord, Eq, PartialOrd, PartialEq)]
pub struct PrefixListEntry {
    pub action: PrefixListAction,
    pub prefix: IpNet,
    pub len_match: Option<PrefixListMatchLen>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum IpVer {
    #[default]
    V4,
    V6,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrefixList {
    pub name: String,
    pub ipver: IpVer,
    pub description: Option<String>,
    next_seq: u32,
    pub entries: BTreeMap<u32, PrefixListEntry>,
}

impl PrefixListEntry {
    #[must_use]
    pub fn new(
        action: PrefixListAction,
        prefix: IpNet,
        len_match: Option<PrefixListMatchLen>,
    ) -> Self {
        Self {
            action,
            prefix,
            len_match,
        }
    }
    /// Tell if a `PrefixListEntry` can be added to a `PrefixList` depending on
    /// the prefix it contains (ipv4 of ipv6) and the `PrefixList` `IpVer` value
    #[must_use]
    pub fn is_version_compatible(&self, ipver: IpVer) -> bool {
        match ipver {
            IpVer::V4 => matches!(self.prefix, IpNet::V4(_)),
            IpVer::V6 => matches!(self.prefix, IpNet::V6(_)),
        }
    }
}

impl PrefixList {
    #[must_use]
    pub fn new(name: &str, ipver: IpVer, description: Option<String>) -> Self {
        Self {
            name: name.to_owned(),
            ipver,
            description,
            next_seq: PLIST_SEQ_SEED,
            entries: BTreeMap::new(),
        }
    }
    pub fn add_entry(&mut self, seq: Option<u32>, entry: PrefixListEntry) -> ConfigResult {
        if !entry.is_version_compatible(self.ipver) {
            let msg = format!(
                "attempted to insert entry with incompatible version in prefix list {}",
                self.name
            );
            error!("{msg}");
            return Err(ConfigError::InternalFailure(msg));
        }
        let seq = match seq {
            Some(n) => n,
            None => {
                let value = self.next_seq;
                self.next_seq += 1;
                value
            }
        };
        if self.entries.contains_key(&seq) {
            let msg = format!(
                "Duplicate prefix list seq {} in prefix list {}",
                seq, self.name
            );
            error!("{msg}");
            return Err(ConfigError::InternalFailure(msg));
        }
        self.entries.insert(seq, entry);
        Ok(())
    }
    pub fn add_entries(
        &mut self,
        entries: impl IntoIterator<Item = PrefixListEntry>,
    ) -> ConfigResult {
        for entry in entries {
            self.add_entry(None, entry)?;
        }
        Ok(())
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/* Display: as the routing daemon expects it */
impl Display for PrefixListAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixListAction::Deny => write!(f, "deny"),
            PrefixListAction::Permit => write!(f, "permit"),
        }
    }
}
impl Display for PrefixListMatchLen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixListMatchLen::Le(len) => write!(f, "le {len}"),
        }
    }
}
impl Display for IpVer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpVer::V4 => write!(f, "ip"),
            IpVer::V6 => write!(f, "ipv6"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn entry(prefix: &str) -> PrefixListEntry {
        PrefixListEntry::new(
            PrefixListAction::Permit,
            IpNet::from_str(prefix).unwrap(),
            None,
        )
    }

    #[test]
    fn test_auto_sequence_numbers() {
        let mut plist = PrefixList::new("vrf3981-import-prefixes", IpVer::V4, None);
        plist
            .add_entries([entry("10.0.16.0/22"), entry("10.0.20.0/22")])
            .unwrap();
        let seqs: Vec<u32> = plist.entries.keys().copied().collect();
        assert_eq!(seqs, vec![100, 101]);
    }

    #[test]
    fn test_rejects_wrong_family() {
        let mut plist = PrefixList::new("vrf3981-import-prefixes", IpVer::V4, None);
        assert!(plist.add_entry(None, entry("2001:db8::/32")).is_err());
        let mut plist = PrefixList::new("vrf3981-import-prefixes-ipv6", IpVer::V6, None);
        assert!(plist.add_entry(None, entry("2001:db8::/32")).is_ok());
        assert!(plist.add_entry(None, entry("0.0.0.0/0")).is_err());
    }

    #[test]
    fn test_rejects_duplicate_seq() {
        let mut plist = PrefixList::new("vrf3981-import-prefixes", IpVer::V4, None);
        plist.add_entry(Some(100), entry("10.0.16.0/22")).unwrap();
        assert!(plist.add_entry(None, entry("10.0.20.0/22")).is_err());
        assert_eq!(plist.entries.len(), 1);
    }
}
