// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! External configuration model: the networks a host is attached to and their roles.
//! A [`NetworkModel`] can only be built if it satisfies all of its invariants, so that
//! everything derived from it can rely on them without checking again.

pub mod network;
pub mod spec;

use std::collections::BTreeSet;
use tracing::debug;

use crate::{ConfigError, ConfigResult};
use network::{NetworkAttachment, NetworkRole, Nic};
pub use spec::{NetworkAttachmentSpec, NetworkModelSpec, NicSpec};

/// The validated set of network attachments of a host
#[derive(Clone, Debug)]
pub struct NetworkModel {
    hostname: String,
    networks: Vec<NetworkAttachment>,
    nics: Vec<Nic>,
    underlay: usize,        /* index of the underlay network */
    private_primary: usize, /* index of the private primary network */
}

/// Tell the position of the only network matching `pred`, failing if there is not exactly one
fn find_unique(
    networks: &[NetworkAttachment],
    what: &'static str,
    pred: impl Fn(&NetworkAttachment) -> bool,
) -> Result<usize, ConfigError> {
    let found: Vec<usize> = networks
        .iter()
        .enumerate()
        .filter(|(_, n)| pred(n))
        .map(|(index, _)| index)
        .collect();
    match found.as_slice() {
        [index] => Ok(*index),
        _ => Err(ConfigError::WrongNetworkCount(what, found.len())),
    }
}

/// ASN and IPs are mandatory for the underlay and the private primary network
fn check_asn_and_ips(network: &NetworkAttachment) -> ConfigResult {
    if network.asn.is_none() {
        return Err(ConfigError::MissingAsn(network.id.clone()));
    }
    if network.ips.is_empty() {
        return Err(ConfigError::MissingIps(network.id.clone()));
    }
    Ok(())
}

fn check_vrf(network: &NetworkAttachment, vrfs: &mut BTreeSet<u32>) -> ConfigResult {
    match (network.role, network.vrf) {
        (None, None) => Ok(()),
        (Some(NetworkRole::Underlay), None) => Ok(()),
        (Some(NetworkRole::Underlay), Some(vrf)) => {
            Err(ConfigError::InvalidVrf(network.id.clone(), vrf.as_u32()))
        }
        (Some(_), None) => Err(ConfigError::MissingVrf(network.id.clone())),
        (_, Some(vrf)) => {
            if vrfs.insert(vrf.as_u32()) {
                Ok(())
            } else {
                Err(ConfigError::DuplicateVrf(vrf.as_u32()))
            }
        }
    }
}

impl NetworkModel {
    /// Build a [`NetworkModel`], validating it
    pub fn new(
        hostname: &str,
        networks: Vec<NetworkAttachment>,
        nics: Vec<Nic>,
    ) -> Result<Self, ConfigError> {
        debug!("Validating network model of '{hostname}' ({} networks)", networks.len());
        let underlay = find_unique(&networks, "underlay", |n| {
            n.is_role(NetworkRole::Underlay)
        })?;
        let private_primary = find_unique(&networks, "private primary", |n| {
            n.is_private_primary()
        })?;
        check_asn_and_ips(&networks[underlay])?;
        check_asn_and_ips(&networks[private_primary])?;

        let mut vrfs = BTreeSet::new();
        for network in &networks {
            check_vrf(network, &mut vrfs)?;
            if network.is_role(NetworkRole::External)
                && network.nat
                && network.destination_prefixes.is_empty()
            {
                return Err(ConfigError::MissingDestinationPrefixes(network.id.clone()));
            }
        }
        Ok(Self {
            hostname: hostname.to_owned(),
            networks,
            nics,
            underlay,
            private_primary,
        })
    }

    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }
    #[must_use]
    pub fn networks(&self) -> &[NetworkAttachment] {
        &self.networks
    }
    #[must_use]
    pub fn nics(&self) -> &[Nic] {
        &self.nics
    }
    #[must_use]
    pub fn underlay(&self) -> &NetworkAttachment {
        &self.networks[self.underlay]
    }
    #[must_use]
    pub fn private_primary(&self) -> &NetworkAttachment {
        &self.networks[self.private_primary]
    }

    /// Iterate over the networks having any of the given roles, in model order
    pub fn networks_of_role<'a>(
        &'a self,
        roles: &'a [NetworkRole],
    ) -> impl Iterator<Item = &'a NetworkAttachment> + 'a {
        self.networks
            .iter()
            .filter(|n| n.role.is_some_and(|role| roles.contains(&role)))
    }

    /// The network through which the host reaches the default route: the first external
    /// network with a default destination prefix or, if none, the first private secondary
    /// shared network with one.
    #[must_use]
    pub fn default_route_network(&self) -> Option<&NetworkAttachment> {
        self.networks_of_role(&[NetworkRole::External])
            .find(|n| n.has_default_route())
            .or_else(|| {
                self.networks_of_role(&[NetworkRole::PrivateSecondaryShared])
                    .find(|n| n.has_default_route())
            })
    }
}

impl TryFrom<&NetworkModelSpec> for NetworkModel {
    type Error = ConfigError;

    fn try_from(spec: &NetworkModelSpec) -> Result<Self, Self::Error> {
        let networks = spec
            .networks
            .iter()
            .map(NetworkAttachment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let nics = spec
            .nics
            .iter()
            .map(Nic::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        NetworkModel::new(&spec.hostname, networks, nics)
    }
}

impl NetworkModel {
    /// Load and validate a [`NetworkModel`] from its YAML description
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        NetworkModel::try_from(&NetworkModelSpec::from_yaml(yaml)?)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use ipnet::IpNet;
    use pretty_assertions::assert_eq;
    use std::net::IpAddr;
    use std::str::FromStr;
    use tracing_test::traced_test;

    fn ip(addr: &str) -> IpAddr {
        IpAddr::from_str(addr).unwrap()
    }
    fn net(prefix: &str) -> IpNet {
        IpNet::from_str(prefix).unwrap()
    }

    pub fn sample_underlay() -> NetworkAttachment {
        NetworkAttachment::new("underlay", Some(NetworkRole::Underlay))
            .set_asn(4_200_003_073)
            .add_ip(ip("10.1.0.1"))
            .add_prefix(net("10.0.12.0/22"))
    }
    pub fn sample_private_primary() -> NetworkAttachment {
        NetworkAttachment::new("tenant", Some(NetworkRole::PrivatePrimaryUnshared))
            .set_vrf(3981)
            .set_asn(4_200_003_073)
            .add_ip(ip("10.0.16.2"))
            .add_prefix(net("10.0.16.0/22"))
    }
    pub fn sample_internet() -> NetworkAttachment {
        NetworkAttachment::new("internet", Some(NetworkRole::External))
            .set_vrf(104_009)
            .set_nat(true)
            .add_ip(ip("185.1.2.3"))
            .add_prefix(net("185.1.2.0/24"))
            .add_prefix(net("185.27.0.0/22"))
            .add_destination_prefix(net("0.0.0.0/0"))
    }
    pub fn sample_storage() -> NetworkAttachment {
        NetworkAttachment::new("storage", Some(NetworkRole::PrivateSecondaryShared))
            .set_vrf(3982)
            .add_ip(ip("10.0.20.2"))
            .add_prefix(net("10.0.20.0/22"))
    }
    pub fn sample_model() -> NetworkModel {
        NetworkModel::new(
            "firewall",
            vec![
                sample_underlay(),
                sample_private_primary(),
                sample_storage(),
                sample_internet(),
            ],
            vec![],
        )
        .expect("Sample model should be valid")
    }

    #[test]
    #[traced_test]
    fn test_accessors() {
        let model = sample_model();
        assert_eq!(model.underlay().id, "underlay");
        assert_eq!(model.private_primary().id, "tenant");
        let externals: Vec<_> = model
            .networks_of_role(&[NetworkRole::External])
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(externals, vec!["internet"]);
        let private: Vec<_> = model
            .networks_of_role(&[
                NetworkRole::PrivatePrimaryUnshared,
                NetworkRole::PrivateSecondaryShared,
            ])
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(private, vec!["tenant", "storage"]);
        assert_eq!(
            model.default_route_network().map(|n| n.id.as_str()),
            Some("internet")
        );
    }

    #[test]
    fn test_default_route_network_falls_back_to_secondary() {
        let dmz = sample_storage().add_destination_prefix(net("0.0.0.0/0"));
        let mpls = NetworkAttachment::new("mpls", Some(NetworkRole::External))
            .set_vrf(104_010)
            .add_destination_prefix(net("100.127.129.0/24"));
        let model = NetworkModel::new(
            "fw",
            vec![sample_underlay(), sample_private_primary(), mpls, dmz],
            vec![],
        )
        .unwrap();
        assert_eq!(
            model.default_route_network().map(|n| n.id.as_str()),
            Some("storage")
        );

        let model = NetworkModel::new(
            "fw",
            vec![sample_underlay(), sample_private_primary()],
            vec![],
        )
        .unwrap();
        assert!(model.default_route_network().is_none());
    }

    #[test]
    fn test_exactly_one_underlay_and_private_primary() {
        let err = NetworkModel::new("fw", vec![sample_private_primary()], vec![]).unwrap_err();
        assert_eq!(err, ConfigError::WrongNetworkCount("underlay", 0));

        let err = NetworkModel::new(
            "fw",
            vec![sample_underlay(), sample_underlay(), sample_private_primary()],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::WrongNetworkCount("underlay", 2));

        let shared = NetworkAttachment::new("shared", Some(NetworkRole::PrivatePrimaryShared))
            .set_vrf(3990)
            .set_asn(4_200_003_073)
            .add_ip(ip("10.0.30.2"));
        let err = NetworkModel::new(
            "fw",
            vec![sample_underlay(), sample_private_primary(), shared],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::WrongNetworkCount("private primary", 2));

        let err = NetworkModel::new("fw", vec![sample_underlay()], vec![]).unwrap_err();
        assert_eq!(err, ConfigError::WrongNetworkCount("private primary", 0));
    }

    #[test]
    fn test_mandatory_fields() {
        let mut underlay = sample_underlay();
        underlay.asn = None;
        let err =
            NetworkModel::new("fw", vec![underlay, sample_private_primary()], vec![]).unwrap_err();
        assert_eq!(err, ConfigError::MissingAsn("underlay".to_string()));

        let mut primary = sample_private_primary();
        primary.ips.clear();
        let err = NetworkModel::new("fw", vec![sample_underlay(), primary], vec![]).unwrap_err();
        assert_eq!(err, ConfigError::MissingIps("tenant".to_string()));

        let mut storage = sample_storage();
        storage.vrf = None;
        let err = NetworkModel::new(
            "fw",
            vec![sample_underlay(), sample_private_primary(), storage],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingVrf("storage".to_string()));

        let storage = sample_storage().set_vrf(3981);
        let err = NetworkModel::new(
            "fw",
            vec![sample_underlay(), sample_private_primary(), storage],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateVrf(3981));

        let mut internet = sample_internet();
        internet.destination_prefixes.clear();
        let err = NetworkModel::new(
            "fw",
            vec![sample_underlay(), sample_private_primary(), internet],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingDestinationPrefixes("internet".to_string())
        );
    }

    #[test]
    fn test_unclassified_networks_are_accepted() {
        let model = NetworkModel::new(
            "fw",
            vec![
                sample_underlay(),
                NetworkAttachment::new("mystery", None),
                sample_private_primary(),
            ],
            vec![],
        )
        .unwrap();
        assert_eq!(model.networks().len(), 3);
        assert_eq!(model.private_primary().id, "tenant");
    }

    const SAMPLE_YAML: &str = r"
hostname: fw-1
nics:
  - name: lan0
    mac: aa:bb:cc:dd:ee:01
  - name: lan1
    mac: aa:bb:cc:dd:ee:02
networks:
  - id: underlay
    role: underlay
    asn: 4200003073
    ips: [10.1.0.1]
    prefixes: [10.0.12.0/22]
  - id: tenant
    role: privateprimaryunshared
    vrf: 3981
    asn: 4200003073
    ips: [10.0.16.2]
    prefixes: [10.0.16.0/22]
  - id: internet
    role: external
    vrf: 104009
    nat: true
    ips: [185.1.2.3]
    prefixes: [185.1.2.0/24]
    destinationPrefixes: [0.0.0.0/0]
";

    #[test]
    #[traced_test]
    fn test_load_from_yaml() {
        let model = NetworkModel::from_yaml(SAMPLE_YAML).expect("Should load");
        assert_eq!(model.hostname(), "fw-1");
        assert_eq!(model.nics().len(), 2);
        assert_eq!(model.nics()[0].name, "lan0");
        assert_eq!(model.networks().len(), 3);
        let internet = &model.networks()[2];
        assert!(internet.nat);
        assert_eq!(internet.vrf_name().as_deref(), Some("vrf104009"));
        assert!(internet.has_default_route());
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        let yaml = SAMPLE_YAML.replace("185.1.2.0/24", "185.1.2.0/33");
        let err = NetworkModel::from_yaml(&yaml).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPrefix("internet".to_string(), "185.1.2.0/33".to_string())
        );

        let yaml = SAMPLE_YAML.replace("[10.0.16.2]", "[10.0.16.256]");
        let err = NetworkModel::from_yaml(&yaml).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAddress("tenant".to_string(), "10.0.16.256".to_string())
        );

        let yaml = SAMPLE_YAML.replace("aa:bb:cc:dd:ee:02", "aa:bb:cc:dd:ee");
        let err = NetworkModel::from_yaml(&yaml).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidMac("lan1".to_string(), "aa:bb:cc:dd:ee".to_string())
        );

        let yaml = SAMPLE_YAML.replace("role: external", "role: dmz");
        let err = NetworkModel::from_yaml(&yaml).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownRole("internet".to_string(), "dmz".to_string())
        );

        let yaml = SAMPLE_YAML.replace("vrf: 3981", "vrf: 0");
        let err = NetworkModel::from_yaml(&yaml).unwrap_err();
        assert_eq!(err, ConfigError::InvalidVrf("tenant".to_string(), 0));

        let yaml = SAMPLE_YAML.replacen("asn: 4200003073", "asn: 0", 1);
        let err = NetworkModel::from_yaml(&yaml).unwrap_err();
        assert_eq!(err, ConfigError::InvalidAsn("underlay".to_string(), 0));

        assert!(matches!(
            NetworkModel::from_yaml("hostname: [").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
