// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Tracing control. A [`TracingControl`] is created once by the binary, which owns it and
//! hands it out to whoever needs to change log levels. Nothing in here is global, except
//! for the subscriber that [`TracingControl::install`] sets up.

use ordermap::OrderMap;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Registry, filter::LevelFilter, prelude::*, reload};

use crate::errors::TraceCtlError;
use crate::{targets::TRACING_TARGETS, trace_target};

trace_target!("tracectl", LevelFilter::INFO, &[]);

#[derive(Debug, Clone)]
pub struct TargetCfg {
    pub(crate) target: &'static str,
    pub(crate) name: &'static str,
    pub(crate) level: LevelFilter,
    pub(crate) tags: Vec<&'static str>,
    pub(crate) custom: bool,
}
impl TargetCfg {
    fn new(
        target: &'static str,
        name: &'static str,
        level: LevelFilter,
        tags: &'static [&'static str],
        custom: bool,
    ) -> Self {
        // a target can always be referred to by its name
        let mut tags = tags.to_vec();
        if !tags.contains(&name) {
            tags.push(name);
        }
        Self {
            target,
            name,
            level,
            tags,
            custom,
        }
    }
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }
    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.level
    }
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.custom
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Tag {
    pub(crate) tag: &'static str,
    pub(crate) targets: HashSet<&'static str>,
}
impl Tag {
    fn new(tag: &'static str, target: &'static str) -> Self {
        let mut targets = HashSet::with_capacity(1);
        targets.insert(target);
        Self { tag, targets }
    }
}

#[derive(Debug)]
pub(crate) struct TargetCfgDb {
    pub(crate) level: LevelFilter,
    pub(crate) targets: OrderMap<&'static str, TargetCfg>,
    pub(crate) tags: OrderMap<&'static str, Tag>,
}

impl TargetCfgDb {
    fn new(level: LevelFilter) -> Self {
        let mut db = Self {
            level,
            targets: OrderMap::new(),
            tags: OrderMap::new(),
        };
        for target in TRACING_TARGETS {
            db.register(
                target.target,
                target.name,
                target.level,
                target.tags,
                target.custom,
            );
        }
        db
    }
    fn register(
        &mut self,
        target: &'static str,
        name: &'static str,
        level: LevelFilter,
        tags: &'static [&'static str],
        custom: bool,
    ) {
        let tconfig = TargetCfg::new(target, name, level, tags, custom);
        let tags = tconfig.tags.clone();

        if let Some(exist) = self.targets.insert(target, tconfig) {
            warn!("Target {} has been multiply defined!", exist.target);
        }
        for tag in &tags {
            if let Some(tag) = self.tags.get_mut(tag) {
                tag.targets.insert(target);
            } else {
                self.tags.insert(tag, Tag::new(tag, target));
            }
        }
    }
    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(self.level.to_string());
        for target in self.targets.values() {
            let directive = format!("{}={}", target.target, target.level);
            match directive.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(e) => error!("Ignoring tracing directive '{directive}': {e}"),
            }
        }
        filter
    }
    /// A string that `setup_from_string` would turn into the current levels. Targets are
    /// listed one by one, by name, with no attempt at grouping them by tag.
    fn as_config_string(&self) -> String {
        let mut out = format!("default={}", self.level);
        for target in self.targets.values() {
            out += format!(",{}={}", target.name, target.level).as_str();
        }
        out
    }
    fn tag_targets_mut(&mut self, tag: &str) -> impl Iterator<Item = &mut TargetCfg> {
        let members = self.tags.get(tag).map(|tag| tag.targets.clone());
        self.targets.values_mut().filter(move |target| {
            members
                .as_ref()
                .is_some_and(|members| members.contains(target.target))
        })
    }
    fn tag_targets(&self, tag: &str) -> impl Iterator<Item = &TargetCfg> {
        let members = self.tags.get(tag);
        self.targets.values().filter(move |target| {
            members.is_some_and(|members| members.targets.contains(target.target))
        })
    }
}

/// Parse a string made of comma-separated tag=level, where level=off,error,warn,info,debug,trace
fn parse_tracing_config(input: &str) -> Result<OrderMap<String, LevelFilter>, TraceCtlError> {
    let mut result = OrderMap::new();
    for item in input.split(',') {
        let item = item.trim();
        let Some((tag, level)) = item.split_once('=') else {
            return Err(TraceCtlError::Syntax(item.to_string()));
        };
        let level = LevelFilter::from_str(level.trim())
            .map_err(|_| TraceCtlError::InvalidLevel(tag.trim().to_string(), level.to_string()))?;
        result.insert(tag.trim().to_string(), level);
    }
    Ok(result)
}

/// The tracing configuration: per-target levels, the filter built from them and the means to
/// update it at runtime.
pub struct TracingControl {
    db: TargetCfgDb,
    reload_filter: reload::Handle<EnvFilter, Registry>,
    filter: Option<reload::Layer<EnvFilter, Registry>>, /* until installed */
}

impl TracingControl {
    /// Build a [`TracingControl`] with all the targets registered at link time
    #[must_use]
    pub fn new(default_level: LevelFilter) -> Self {
        let db = TargetCfgDb::new(default_level);
        let (filter, reload_filter) = reload::Layer::new(db.env_filter());
        Self {
            db,
            reload_filter,
            filter: Some(filter),
        }
    }

    /// Install the global subscriber, filtered by this [`TracingControl`]. This can only be done once.
    pub fn install(&mut self) -> Result<(), TraceCtlError> {
        let filter = self.filter.take().ok_or(TraceCtlError::AlreadyInstalled)?;
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_line_number(true)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_level(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TraceCtlError::Init(e.to_string()))
    }

    fn reload(&self) {
        if let Err(e) = self.reload_filter.reload(self.db.env_filter()) {
            error!("Failed to reload tracing filter: {e}");
        }
    }

    pub fn set_tag_level(&mut self, tag: &str, level: LevelFilter) {
        let mut changed = 0;
        for target in self.db.tag_targets_mut(tag) {
            if target.level != level {
                target.level = level;
                changed += 1;
            }
        }
        if changed > 0 {
            self.reload();
        }
        info!("Changed log level for tag '{tag}' to {level}. Targets changed: {changed}");
    }
    pub fn set_level_all(&mut self, level: LevelFilter) {
        for target in self.db.targets.values_mut() {
            target.level = level;
        }
        self.reload();
    }
    pub fn set_default_level(&mut self, level: LevelFilter) {
        if self.db.level != level {
            self.db.level = level;
            info!("Set default log level to {level}");
            self.reload();
        }
    }
    #[must_use]
    pub fn get_default_level(&self) -> LevelFilter {
        self.db.level
    }

    /// Configure levels from a string like `default=error,all=info,compiler=debug`.
    /// `default` sets the level of any target not registered, `all` sets that of every
    /// registered target and the rest are tags.
    pub fn setup_from_string(&mut self, input: &str) -> Result<(), TraceCtlError> {
        let config = parse_tracing_config(input)?;
        if let Some(level) = config.get("default") {
            self.set_default_level(*level);
        }
        if let Some(level) = config.get("all") {
            self.set_level_all(*level);
        }
        for (tag, level) in config
            .iter()
            .filter(|(tag, _)| *tag != "default" && *tag != "all")
        {
            if !self.db.tags.contains_key(tag.as_str()) {
                return Err(TraceCtlError::UnknownTag(tag.clone()));
            }
            self.set_tag_level(tag, *level);
        }
        Ok(())
    }

    #[must_use]
    pub fn get_target(&self, target: &str) -> Option<&TargetCfg> {
        self.db.targets.get(target)
    }
    pub fn get_targets_by_tag(&self, tag: &str) -> impl Iterator<Item = &TargetCfg> {
        self.db.tag_targets(tag)
    }
    pub fn get_tags(&self) -> impl Iterator<Item = &'static str> {
        self.db.tags.keys().copied()
    }

    /// The current levels, as a configuration string
    #[must_use]
    pub fn as_config_string(&self) -> String {
        self.db.as_config_string()
    }

    /// Render the configuration of all targets, grouped by tag
    #[must_use]
    pub fn targets_by_tag(&self) -> String {
        crate::display::TargetCfgDbByTag(&self.db).to_string()
    }
    /// Render the configuration of all targets
    #[must_use]
    pub fn targets(&self) -> String {
        self.db.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{custom_target, trace_target};

    trace_target!("tracectl-tests", LevelFilter::ERROR, &["testing"]);

    #[test]
    fn test_link_time_registration() {
        custom_target!("custom-1", LevelFilter::ERROR, &[]);
        let tctl = TracingControl::new(LevelFilter::INFO);

        let static_targets: Vec<&str> = TRACING_TARGETS.iter().map(|t| t.target).collect();
        assert!(static_targets.contains(&module_path!()));
        assert!(static_targets.contains(&"custom-1"));
        assert!(static_targets.contains(&"custom-2")); // declared further down

        let target = tctl.get_target(module_path!()).expect("Should be registered");
        assert_eq!(target.level(), LevelFilter::ERROR);
        assert!(!target.is_custom());
        assert!(tctl.get_target("custom-2").is_some_and(|t| t.is_custom()));
        assert!(tctl.get_tags().any(|tag| tag == "testing"));

        custom_target!("custom-2", LevelFilter::OFF, &[]);
    }

    #[test]
    fn test_change_tag_level() {
        const TAG: &str = "common-tag";
        custom_target!("t1", LevelFilter::DEBUG, &[TAG]);
        custom_target!("t2", LevelFilter::ERROR, &[TAG]);
        custom_target!("t3", LevelFilter::WARN, &["other-tag"]);

        let mut tctl = TracingControl::new(LevelFilter::INFO);
        let members: Vec<_> = tctl.get_targets_by_tag(TAG).map(|t| t.target()).collect();
        assert_eq!(members.len(), 2);
        assert!(members.contains(&"t1") && members.contains(&"t2"));

        tctl.set_tag_level(TAG, LevelFilter::OFF);
        assert_eq!(tctl.get_target("t1").map(|t| t.level()), Some(LevelFilter::OFF));
        assert_eq!(tctl.get_target("t2").map(|t| t.level()), Some(LevelFilter::OFF));
        assert_eq!(tctl.get_target("t3").map(|t| t.level()), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_setup_from_string() {
        custom_target!("s1", LevelFilter::INFO, &["string-tag"]);
        custom_target!("s2", LevelFilter::INFO, &[]);

        let mut tctl = TracingControl::new(LevelFilter::INFO);
        tctl.setup_from_string("default=error, all=warn, string-tag=off")
            .unwrap();
        assert_eq!(tctl.get_default_level(), LevelFilter::ERROR);
        assert_eq!(tctl.get_target("s1").map(|t| t.level()), Some(LevelFilter::OFF));
        assert_eq!(tctl.get_target("s2").map(|t| t.level()), Some(LevelFilter::WARN));

        assert!(matches!(
            tctl.setup_from_string("string-tag=bad"),
            Err(TraceCtlError::InvalidLevel(_, _))
        ));
        assert!(matches!(
            tctl.setup_from_string("string-tag=error, foo"),
            Err(TraceCtlError::Syntax(_))
        ));
        assert!(matches!(
            tctl.setup_from_string("no-such-tag=debug"),
            Err(TraceCtlError::UnknownTag(_))
        ));
    }

    #[test]
    fn test_config_string() {
        custom_target!("cfg-1", LevelFilter::DEBUG, &[]);
        let mut tctl = TracingControl::new(LevelFilter::WARN);
        let config = tctl.as_config_string();
        assert!(config.starts_with(&format!("default={}", LevelFilter::WARN)));
        assert!(config.contains(&format!(",cfg-1={}", LevelFilter::DEBUG)));

        /* the string restores the levels it was made from */
        tctl.set_level_all(LevelFilter::OFF);
        tctl.setup_from_string(&config).unwrap();
        assert_eq!(
            tctl.get_target("cfg-1").map(|t| t.level()),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(tctl.as_config_string(), config);
    }

    #[test]
    fn test_display() {
        let tctl = TracingControl::new(LevelFilter::INFO);
        assert!(tctl.targets().contains("(default)"));
        assert!(tctl.targets_by_tag().contains("testing:"));
    }
}
