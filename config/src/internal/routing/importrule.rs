// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Internal configuration model: import rules.
//! An import rule tells, for a target VRF, which VRFs it leaks routes from and which of their
//! prefixes it accepts. Some prefixes are accepted but must not be re-advertised any further.

use ipnet::IpNet;
use std::fmt::Display;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessPolicy {
    #[default]
    Permit,
    Deny,
}
impl Display for AccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessPolicy::Permit => write!(f, "permit"),
            AccessPolicy::Deny => write!(f, "deny"),
        }
    }
}

/// A prefix to import, with the VRF it is learnt from
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportPrefix {
    pub prefix: IpNet,
    pub source_vrf: String,
    pub policy: AccessPolicy,
}
impl ImportPrefix {
    #[must_use]
    pub fn new(prefix: IpNet, source_vrf: &str, policy: AccessPolicy) -> Self {
        Self {
            prefix,
            source_vrf: source_vrf.to_owned(),
            policy,
        }
    }
    #[must_use]
    pub fn permit(prefix: IpNet, source_vrf: &str) -> Self {
        Self::new(prefix, source_vrf, AccessPolicy::Permit)
    }
    #[must_use]
    pub fn is_ipv4(&self) -> bool {
        matches!(self.prefix, IpNet::V4(_))
    }
    #[must_use]
    pub fn is_ipv6(&self) -> bool {
        matches!(self.prefix, IpNet::V6(_))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportRule {
    pub target_vrf: String,
    pub import_vrfs: Vec<String>,
    pub import_prefixes: Vec<ImportPrefix>,
    pub import_prefixes_no_export: Vec<ImportPrefix>,
}

impl ImportRule {
    #[must_use]
    pub fn new(target_vrf: &str) -> Self {
        Self {
            target_vrf: target_vrf.to_owned(),
            ..Default::default()
        }
    }
    /// Add a VRF to import from. VRFs are only added once, keeping the order of insertion.
    pub fn add_import_vrf(&mut self, vrf: &str) {
        if !self.import_vrfs.iter().any(|v| v == vrf) {
            self.import_vrfs.push(vrf.to_owned());
        }
    }
    /// Permit all of the given prefixes, learnt from `source_vrf`
    pub fn add_prefixes<'a>(
        &mut self,
        prefixes: impl IntoIterator<Item = &'a IpNet>,
        source_vrf: &str,
    ) {
        self.import_prefixes.extend(
            prefixes
                .into_iter()
                .map(|prefix| ImportPrefix::permit(*prefix, source_vrf)),
        );
    }
    /// Like [`ImportRule::add_prefixes`], skipping prefixes that are already imported
    pub fn add_new_prefixes<'a>(
        &mut self,
        prefixes: impl IntoIterator<Item = &'a IpNet>,
        source_vrf: &str,
    ) {
        for prefix in prefixes {
            if !self.import_prefixes.iter().any(|p| p.prefix == *prefix) {
                self.import_prefixes
                    .push(ImportPrefix::permit(*prefix, source_vrf));
            }
        }
    }
    /// Permit the given prefixes, learnt from `source_vrf`, marking them as not exportable
    pub fn add_prefixes_no_export<'a>(
        &mut self,
        prefixes: impl IntoIterator<Item = &'a IpNet>,
        source_vrf: &str,
    ) {
        self.import_prefixes_no_export.extend(
            prefixes
                .into_iter()
                .map(|prefix| ImportPrefix::permit(*prefix, source_vrf)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn net(s: &str) -> IpNet {
        IpNet::from_str(s).unwrap()
    }

    #[test]
    fn test_import_vrfs_are_unique_and_ordered() {
        let mut rule = ImportRule::new("vrf3981");
        rule.add_import_vrf("vrf104009");
        rule.add_import_vrf("vrf3982");
        rule.add_import_vrf("vrf104009");
        assert_eq!(rule.import_vrfs, vec!["vrf104009", "vrf3982"]);
    }

    #[test]
    fn test_add_new_prefixes_skips_known_prefixes() {
        let mut rule = ImportRule::new("vrf3981");
        let known = [net("0.0.0.0/0")];
        rule.add_prefixes(&known, "vrf104009");
        let more = [net("0.0.0.0/0"), net("10.0.20.0/22")];
        rule.add_new_prefixes(&more, "vrf3982");
        assert_eq!(rule.import_prefixes.len(), 2);
        assert_eq!(rule.import_prefixes[0].source_vrf, "vrf104009");
        assert_eq!(rule.import_prefixes[1].prefix, net("10.0.20.0/22"));
        assert_eq!(rule.import_prefixes[1].policy, AccessPolicy::Permit);
    }
}
