// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Utils to build FRR configs

use std::fmt::Display;
use std::ops::AddAssign;

pub const MARKER: &str = "!";

#[derive(Debug, Default)]
/// Object to ease building FRR configs.
pub struct ConfigBuilder {
    lines: Vec<String>,
}

/// Impl Display for [`ConfigBuilder`]. This provides to_string().
impl Display for ConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for s in &self.lines {
            writeln!(f, "{s}")?;
        }
        Ok(())
    }
}

/// Main operations on a [`ConfigBuilder`]
impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::with_capacity(2),
        }
    }
    #[must_use]
    pub fn from_string(string: String) -> Self {
        Self {
            lines: vec![string],
        }
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
    fn append(&mut self, stanza: &str) {
        match self.lines.last() {
            Some(x) if x == MARKER && stanza == MARKER => {}
            _ => self.lines.push(stanza.to_owned()),
        }
    }
    fn merge(&mut self, other: &mut Self) {
        self.lines.append(&mut other.lines);
        self.dedup();
    }
    fn dedup(&mut self) {
        self.lines.dedup_by(|a, b| a == b && a == MARKER);
    }
}

/// Make it very easy to add config lines to a [`ConfigBuilder`]
impl AddAssign<Self> for ConfigBuilder {
    fn add_assign(&mut self, mut rhs: Self) {
        self.merge(&mut rhs);
    }
}
impl AddAssign<String> for ConfigBuilder {
    fn add_assign(&mut self, rhs: String) {
        self.append(&rhs);
    }
}
impl AddAssign<&str> for ConfigBuilder {
    fn add_assign(&mut self, rhs: &str) {
        self.append(rhs);
    }
}

/// Main trait to build FRR configs
pub(crate) trait Render {
    type Context; /* context passed to renderer */
    type Output; /* type of output produced */
    fn render(&self, ctx: &Self::Context) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_not_repeated() {
        let mut cfg = ConfigBuilder::new();
        cfg += "frr defaults datacenter";
        cfg += MARKER;
        cfg += MARKER;
        let mut other = ConfigBuilder::new();
        other += MARKER;
        other += "vrf vrf3981";
        cfg += other;
        assert_eq!(cfg.to_string(), "frr defaults datacenter\n!\nvrf vrf3981\n");
    }
}
