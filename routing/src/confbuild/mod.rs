// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Compilation of a network model into an internal configuration

pub mod importrule;
pub(crate) mod namegen;
pub mod prefixlist;
pub mod routemap;
pub mod vrf;

use std::net::Ipv4Addr;

use config::internal::routing::frr::{Frr, FrrProfile};
use config::{ConfigError, InternalConfig, NetworkModel};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::confbuild::vrf::{BgpIdentity, assemble_vrfs, default_bgp_config};

/// Findings that do not prevent building a configuration but that an operator may want
/// to know about
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DerivationWarning {
    #[error("No network provides a default route")]
    NoDefaultRouteNetwork,
    #[error("Network '{0}' has no IPv4 address: using router-id {1}")]
    NoRouterIdAddress(String, Ipv4Addr),
}

/// The outcome of compiling a network model
#[derive(Clone, Debug, PartialEq)]
pub struct Compiled {
    pub internal: InternalConfig,
    pub warnings: Vec<DerivationWarning>,
}

/// Top-level function to build the internal configuration of a host from its network model
pub fn build_internal_config(model: &NetworkModel) -> Result<Compiled, ConfigError> {
    debug!("Building internal config for host {}", model.hostname());
    let mut warnings = vec![];

    let identity = BgpIdentity::from_model(model, &mut warnings)?;
    let mut internal = InternalConfig::new(Frr::new(FrrProfile::Datacenter, model.hostname()));
    internal.set_bgp(default_bgp_config(model, &identity));

    for vrf_cfg in assemble_vrfs(model, &identity)? {
        internal.add_vrf_config(vrf_cfg)?;
    }

    let default_route_vrf = model
        .default_route_network()
        .and_then(|network| network.vrf_name());
    match &default_route_vrf {
        Some(vrf) => debug!("Default route is reached through {vrf}"),
        None => warnings.push(DerivationWarning::NoDefaultRouteNetwork),
    }
    internal.set_default_route_vrf(default_route_vrf);

    for warning in &warnings {
        warn!("{warning}");
    }
    info!(
        "Built internal config for host {} with {} vrfs",
        model.hostname(),
        internal.vrfs.len()
    );
    Ok(Compiled { internal, warnings })
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_build_internal_config() {
        let compiled = build_internal_config(&sample_model_with_nics()).unwrap();
        assert!(compiled.warnings.is_empty());

        let internal = &compiled.internal;
        assert_eq!(internal.frr.hostname, "firewall");
        assert_eq!(internal.vrfs.len(), 3);
        assert_eq!(internal.default_route_vrf.as_deref(), Some("vrf104009"));
        assert_eq!(internal.bgp.as_ref().map(|bgp| bgp.neighbors.len()), Some(3));
        assert_eq!(internal.route_maps().count(), 3);
        assert!(logs_contain("Built internal config for host firewall with 3 vrfs"));
    }

    #[test]
    #[traced_test]
    fn test_no_default_route_network() {
        let model = model_with(vec![sample_storage(), sample_mpls()]);
        let compiled = build_internal_config(&model).unwrap();
        assert_eq!(
            compiled.warnings,
            vec![DerivationWarning::NoDefaultRouteNetwork]
        );
        assert_eq!(compiled.internal.default_route_vrf, None);
        /* the rest of the configuration is still built */
        assert_eq!(compiled.internal.vrfs.len(), 3);
        assert!(logs_contain("No network provides a default route"));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let model = sample_model_with_nics();
        let first = build_internal_config(&model).unwrap();
        let second = build_internal_config(&model).unwrap();
        assert_eq!(first, second);
    }
}
