// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Raw description of a host's networks, as found in its YAML description.
//! Nothing in here is validated: [`crate::NetworkModel`] does that.

use ipnet::IpNet;
use mac_address::MacAddress;
use serde::Deserialize;
use std::net::IpAddr;
use std::str::FromStr;

use super::network::{Asn, NetworkAttachment, NetworkRole, Nic, Vrf};
use crate::ConfigError;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAttachmentSpec {
    pub id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub vrf: Option<u32>,
    #[serde(default)]
    pub asn: Option<u32>,
    #[serde(default)]
    pub ips: Vec<String>,
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub destination_prefixes: Vec<String>,
    #[serde(default)]
    pub nat: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NicSpec {
    pub name: String,
    pub mac: String,
}

/// The whole description of a host, as loaded
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NetworkModelSpec {
    pub hostname: String,
    pub networks: Vec<NetworkAttachmentSpec>,
    #[serde(default)]
    pub nics: Vec<NicSpec>,
}

impl NetworkModelSpec {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn parse_prefixes(id: &str, prefixes: &[String]) -> Result<Vec<IpNet>, ConfigError> {
    prefixes
        .iter()
        .map(|p| {
            IpNet::from_str(p.trim())
                .map(|net| net.trunc())
                .map_err(|_| ConfigError::InvalidPrefix(id.to_owned(), p.clone()))
        })
        .collect()
}

fn parse_ips(id: &str, ips: &[String]) -> Result<Vec<IpAddr>, ConfigError> {
    ips.iter()
        .map(|ip| {
            IpAddr::from_str(ip.trim())
                .map_err(|_| ConfigError::InvalidAddress(id.to_owned(), ip.clone()))
        })
        .collect()
}

impl TryFrom<&NetworkAttachmentSpec> for NetworkAttachment {
    type Error = ConfigError;

    fn try_from(spec: &NetworkAttachmentSpec) -> Result<Self, Self::Error> {
        let id = spec.id.as_str();
        let role = spec
            .role
            .as_deref()
            .map(|r| {
                NetworkRole::from_str(r.trim())
                    .map_err(|_| ConfigError::UnknownRole(id.to_owned(), r.to_owned()))
            })
            .transpose()?;

        /* a zero vrf is only tolerated for the underlay, where it means "none" */
        let vrf = match (role, spec.vrf) {
            (_, None) | (Some(NetworkRole::Underlay), Some(0)) => None,
            (Some(NetworkRole::Underlay), Some(n)) | (_, Some(n @ 0)) => {
                return Err(ConfigError::InvalidVrf(id.to_owned(), n));
            }
            (_, Some(n)) => Vrf::new(n),
        };
        let asn = match spec.asn {
            None => None,
            Some(0) => return Err(ConfigError::InvalidAsn(id.to_owned(), 0)),
            Some(n) => Asn::new(n),
        };

        Ok(NetworkAttachment {
            id: id.to_owned(),
            role,
            vrf,
            asn,
            ips: parse_ips(id, &spec.ips)?,
            prefixes: parse_prefixes(id, &spec.prefixes)?,
            destination_prefixes: parse_prefixes(id, &spec.destination_prefixes)?,
            nat: spec.nat,
        })
    }
}

impl TryFrom<&NicSpec> for Nic {
    type Error = ConfigError;

    fn try_from(spec: &NicSpec) -> Result<Self, Self::Error> {
        let mac = MacAddress::from_str(spec.mac.trim())
            .map_err(|_| ConfigError::InvalidMac(spec.name.clone(), spec.mac.clone()))?;
        Ok(Nic::new(&spec.name, mac))
    }
}
