// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Derivation of the import rules of the VRFs of a host.
//! Which routes a VRF leaks from other VRFs depends on the role of the network it belongs to:
//!   - the private primary network reaches the external networks and the shared networks.
//!   - a private secondary shared network is reached by the private primary network. If it
//!     leads to the same destinations as an external network (DMZ), it reaches that one too.
//!   - an external network is reached by the private primary network, whose routes it must
//!     not advertise any further.

use config::internal::routing::importrule::ImportRule;
use config::{NetworkAttachment, NetworkModel, NetworkRole};
use tracing::{debug, warn};

/// Name of the VRF of a network, logging if it has none
fn vrf_name(network: &NetworkAttachment) -> Option<String> {
    let name = network.vrf_name();
    if name.is_none() {
        warn!("Network '{}' has no VRF: no import rule", network.id);
    }
    name
}

fn private_primary_rule(model: &NetworkModel, network: &NetworkAttachment) -> Option<ImportRule> {
    let mut rule = ImportRule::new(&vrf_name(network)?);
    let externals: Vec<_> = model
        .networks_of_role(&[NetworkRole::External])
        .filter_map(|n| n.vrf_name().map(|vrf| (n, vrf)))
        .collect();
    let secondaries: Vec<_> = model
        .networks_of_role(&[NetworkRole::PrivateSecondaryShared])
        .filter_map(|n| n.vrf_name().map(|vrf| (n, vrf)))
        .collect();

    /* reach out to the external networks. Several may lead to the same destinations */
    for (external, vrf) in &externals {
        rule.add_import_vrf(vrf);
        rule.add_new_prefixes(&external.destination_prefixes, vrf);
    }
    for (external, vrf) in &externals {
        rule.add_new_prefixes(&external.prefixes, vrf);
    }

    /* reach out to the shared networks and whatever they lead to */
    for (secondary, vrf) in &secondaries {
        rule.add_import_vrf(vrf);
        rule.add_prefixes(&secondary.prefixes, vrf);
    }
    for (secondary, vrf) in &secondaries {
        rule.add_new_prefixes(&secondary.destination_prefixes, vrf);
    }
    Some(rule)
}

fn secondary_shared_rule(model: &NetworkModel, network: &NetworkAttachment) -> Option<ImportRule> {
    let vrf = vrf_name(network)?;
    let mut rule = ImportRule::new(&vrf);

    /* reached by the private primary network */
    let primary = model.private_primary();
    if let Some(primary_vrf) = primary.vrf_name() {
        rule.add_import_vrf(&primary_vrf);
        rule.add_prefixes(&primary.prefixes, &primary_vrf);
    }
    rule.add_prefixes(&network.prefixes, &vrf);

    /* a network leading to the destinations of an external network is a DMZ: it reaches it */
    for external in model.networks_of_role(&[NetworkRole::External]) {
        let Some(external_vrf) = external.vrf_name() else {
            continue;
        };
        let is_dmz = network
            .destination_prefixes
            .iter()
            .any(|prefix| external.destination_prefixes.contains(prefix));
        if is_dmz {
            debug!("Network '{}' is a DMZ for '{}'", network.id, external.id);
            rule.add_import_vrf(&external_vrf);
            rule.add_new_prefixes(&external.destination_prefixes, &external_vrf);
            rule.add_new_prefixes(&external.prefixes, &external_vrf);
        }
    }
    Some(rule)
}

fn external_rule(model: &NetworkModel, network: &NetworkAttachment) -> Option<ImportRule> {
    let vrf = vrf_name(network)?;
    let mut rule = ImportRule::new(&vrf);
    rule.add_prefixes(&network.prefixes, &vrf);

    /* routes of the private primary network are imported, never advertised further */
    let primary = model.private_primary();
    if let Some(primary_vrf) = primary.vrf_name() {
        rule.add_import_vrf(&primary_vrf);
        rule.add_prefixes_no_export(&primary.prefixes, &primary_vrf);
    }

    /* shared networks that also provide a default route compete with this one */
    if network.has_default_route() {
        let secondaries = model
            .networks_of_role(&[NetworkRole::PrivateSecondaryShared])
            .filter(|n| n.has_default_route());
        for secondary in secondaries {
            if let Some(secondary_vrf) = secondary.vrf_name() {
                rule.add_import_vrf(&secondary_vrf);
                rule.add_prefixes_no_export(&secondary.prefixes, &secondary_vrf);
            }
        }
    }
    Some(rule)
}

/// Derive the import rule of the VRF of a network. Networks without a VRF to import
/// into (the underlay) and networks that are not classified get no rule.
#[must_use]
pub fn derive_import_rule(model: &NetworkModel, network: &NetworkAttachment) -> Option<ImportRule> {
    let rule = match network.role {
        None => {
            debug!("Network '{}' is not classified: no import rule", network.id);
            None
        }
        Some(NetworkRole::Underlay) => None,
        Some(NetworkRole::PrivatePrimaryUnshared | NetworkRole::PrivatePrimaryShared) => {
            private_primary_rule(model, network)
        }
        Some(NetworkRole::PrivateSecondaryShared) => secondary_shared_rule(model, network),
        Some(NetworkRole::External) => external_rule(model, network),
    };
    if let Some(rule) = &rule {
        debug!(
            "Import rule for {}: vrfs {:?}, {} prefixes, {} not exported",
            rule.target_vrf,
            rule.import_vrfs,
            rule.import_prefixes.len(),
            rule.import_prefixes_no_export.len()
        );
    }
    rule
}
