// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Compile the description of a host down to its FRR configuration

use config::NetworkModel;
use config::internal::routing::importrule::ImportPrefix;
use networker_routing::confbuild::importrule::derive_import_rule;
use networker_routing::{DerivationWarning, build_internal_config, render_config};
use pretty_assertions::assert_eq;

const FIREWALL: &str = include_str!("data/firewall.yaml");

fn firewall() -> NetworkModel {
    NetworkModel::from_yaml(FIREWALL).unwrap()
}

fn prefixes(list: &[ImportPrefix]) -> Vec<String> {
    list.iter().map(|p| p.prefix.to_string()).collect()
}

#[test]
fn test_private_primary_reaches_external_and_shared_networks() {
    let model = firewall();
    let rule = derive_import_rule(&model, model.private_primary()).unwrap();
    assert_eq!(rule.import_vrfs, vec!["vrf104009", "vrf3982"]);
    assert_eq!(
        prefixes(&rule.import_prefixes),
        vec![
            "0.0.0.0/0",
            "185.1.2.0/24",
            "185.27.0.0/22",
            "2001:db8:2::/48",
            "10.0.20.0/22",
            "2001:db8:20::/48",
        ]
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let first = render_config(&build_internal_config(&firewall()).unwrap().internal);
    let second = render_config(&build_internal_config(&firewall()).unwrap().internal);
    assert_eq!(first, second);
}

#[test]
fn test_rendered_config() {
    let compiled = build_internal_config(&firewall()).unwrap();
    assert!(compiled.warnings.is_empty());
    let rendered = render_config(&compiled.internal);

    let plists = "\
ip prefix-list vrf104009-import-prefixes-no-export description \"IPv4 prefixes imported into vrf104009, not to be exported\"
ip prefix-list vrf104009-import-prefixes-no-export seq 100 permit 10.0.16.0/22 le 32
ip prefix-list vrf104009-import-prefixes description \"IPv4 prefixes imported into vrf104009\"
ip prefix-list vrf104009-import-prefixes seq 100 permit 185.1.2.0/24 le 32
ip prefix-list vrf104009-import-prefixes seq 101 permit 185.27.0.0/22 le 32
ipv6 prefix-list vrf104009-import-prefixes-ipv6 description \"IPv6 prefixes imported into vrf104009\"
ipv6 prefix-list vrf104009-import-prefixes-ipv6 seq 100 permit 2001:db8:2::/48 le 128
";
    assert!(rendered.contains(plists), "{rendered}");

    let rmap = "\
route-map vrf104009-import-map permit 10
 match ip address prefix-list vrf104009-import-prefixes-no-export
 set community no-export additive
exit
!
route-map vrf104009-import-map permit 20
 match ipv6 address prefix-list vrf104009-import-prefixes-ipv6
exit
!
route-map vrf104009-import-map permit 30
 match ip address prefix-list vrf104009-import-prefixes
exit
!
route-map vrf104009-import-map deny 40
exit
!
";
    assert!(rendered.contains(rmap), "{rendered}");

    let vrf = "!\nvrf vrf3982\n vni 3982\nexit-vrf\n!\n";
    assert!(rendered.contains(vrf), "{rendered}");
    assert!(rendered.contains(" neighbor lan1 interface peer-group FABRIC\n"));
    assert!(rendered.contains("router bgp 4200003073 vrf vrf3981\n bgp router-id 10.1.0.1\n"));

    /* sections come in a fixed order */
    let position = |needle: &str| rendered.find(needle).unwrap();
    assert!(position("frr defaults datacenter") < position("vrf vrf3981\n"));
    assert!(position("vrf vrf104009\n") < position("router bgp 4200003073\n"));
    assert!(position("router bgp 4200003073\n") < position("router bgp 4200003073 vrf"));
    assert!(position("router bgp 4200003073 vrf vrf104009") < position("ip prefix-list"));
    assert!(position("ipv6 prefix-list") < position("\nroute-map "));
}

#[test]
fn test_model_without_default_route() {
    let yaml = FIREWALL.replace("[0.0.0.0/0]", "[100.64.0.0/10]");
    let model = NetworkModel::from_yaml(&yaml).unwrap();
    let compiled = build_internal_config(&model).unwrap();
    assert_eq!(compiled.warnings, vec![DerivationWarning::NoDefaultRouteNetwork]);
    assert_eq!(compiled.internal.vrfs.len(), 3);
}
