// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Config renderer: prefix list

use crate::frr::renderer::builder::{ConfigBuilder, Render};
use config::internal::routing::prefixlist::{PrefixList, PrefixListEntry};

/* Impl Render */
impl Render for PrefixListEntry {
    type Context = (String, u32); /* u32 is sequence number */
    type Output = String;
    fn render(&self, ctx: &Self::Context) -> String {
        let mut out = format!("{} seq {} {} {}", ctx.0, ctx.1, self.action, self.prefix);
        if let Some(len_match) = &self.len_match {
            out += format!(" {len_match}").as_str();
        }
        out
    }
}
impl Render for PrefixList {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _: &Self::Context) -> ConfigBuilder {
        let mut config = ConfigBuilder::new();
        let pfx = format!("{} prefix-list {}", self.ipver, self.name);
        if let Some(description) = &self.description {
            config += format!("{pfx} description \"{description}\"");
        }
        self.entries
            .iter()
            .for_each(|(seq, e)| config += e.render(&(pfx.clone(), *seq)));
        config
    }
}
