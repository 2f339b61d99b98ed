// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Internal configuration model: route maps

use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::error;

use crate::{ConfigError, ConfigResult};

/// Order of the first entry of a route map and the increment between entries
pub const RMAP_SEQ_SEED: u32 = 10;

#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum MatchingPolicy {
    Deny,
    Permit,
}

#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum RouteMapMatch {
    Ipv4AddressPrefixList(String),
    Ipv6AddressPrefixList(String),
}

#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum RouteMapSetAction {
    Community(Vec<Community>, bool), /* bool: additive */
}

#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum Community {
    NoExport,
}

#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct RouteMapEntry {
    pub policy: MatchingPolicy,
    pub matches: Vec<RouteMapMatch>,
    pub actions: Vec<RouteMapSetAction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteMap {
    pub name: String,
    next_seq: u32,
    pub entries: BTreeMap<u32, RouteMapEntry>,
}

impl RouteMapEntry {
    #[must_use]
    pub fn new(policy: MatchingPolicy) -> Self {
        Self {
            policy,
            matches: vec![],
            actions: vec![],
        }
    }
    #[must_use]
    pub fn add_match(mut self, m: RouteMapMatch) -> Self {
        self.matches.push(m);
        self
    }
    #[must_use]
    pub fn add_action(mut self, action: RouteMapSetAction) -> Self {
        self.actions.push(action);
        self
    }
}
impl RouteMap {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            next_seq: RMAP_SEQ_SEED,
            entries: BTreeMap::new(),
        }
    }
    /// Add an entry with the given order or, if none, the next free slot after the last one.
    pub fn add_entry(&mut self, seq: Option<u32>, entry: RouteMapEntry) -> ConfigResult {
        let seq = seq.unwrap_or(self.next_seq);
        if self.entries.contains_key(&seq) {
            let msg = format!(
                "Duplicate route-map seq {} in route map {}",
                seq, self.name
            );
            error!("{msg}");
            return Err(ConfigError::InternalFailure(msg));
        }
        self.entries.insert(seq, entry);
        self.next_seq = self.next_seq.max(seq + RMAP_SEQ_SEED);
        Ok(())
    }
}

/* Display: as the routing daemon expects it */
impl Display for MatchingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchingPolicy::Deny => write!(f, "deny"),
            MatchingPolicy::Permit => write!(f, "permit"),
        }
    }
}
impl Display for Community {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Community::NoExport => write!(f, "no-export"),
        }
    }
}
