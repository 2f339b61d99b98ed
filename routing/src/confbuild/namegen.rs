// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Names of the policy objects generated for a VRF. The routing daemon and other tools
//! refer to these objects by name, so these must not change.

use config::internal::routing::prefixlist::IpVer;

pub(crate) const NO_EXPORT_SUFFIX: &str = "-no-export";

/// Convenience trait to generate names for the distinct config bits of a VRF.
/// It is implemented for the VRF name.
pub(crate) trait VrfConfigNames {
    fn import_plist(&self, ipver: IpVer, no_export: bool) -> String;
    fn import_plist_desc(&self, ipver: IpVer, no_export: bool) -> String;
    fn import_rmap(&self) -> String;
}

impl VrfConfigNames for str {
    fn import_plist(&self, ipver: IpVer, no_export: bool) -> String {
        let mut name = format!("{self}-import-prefixes");
        if ipver == IpVer::V6 {
            name += "-ipv6";
        }
        if no_export {
            name += NO_EXPORT_SUFFIX;
        }
        name
    }
    fn import_plist_desc(&self, ipver: IpVer, no_export: bool) -> String {
        let family = match ipver {
            IpVer::V4 => "IPv4",
            IpVer::V6 => "IPv6",
        };
        if no_export {
            format!("{family} prefixes imported into {self}, not to be exported")
        } else {
            format!("{family} prefixes imported into {self}")
        }
    }
    fn import_rmap(&self) -> String {
        format!("{self}-import-map")
    }
}

/// Tell if a prefix list holds routes that must get the no-export community
pub(crate) fn is_no_export_plist(name: &str) -> bool {
    name.ends_with(NO_EXPORT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let vrf = "vrf3981";
        assert_eq!(vrf.import_plist(IpVer::V4, false), "vrf3981-import-prefixes");
        assert_eq!(
            vrf.import_plist(IpVer::V4, true),
            "vrf3981-import-prefixes-no-export"
        );
        assert_eq!(
            vrf.import_plist(IpVer::V6, false),
            "vrf3981-import-prefixes-ipv6"
        );
        assert_eq!(
            vrf.import_plist(IpVer::V6, true),
            "vrf3981-import-prefixes-ipv6-no-export"
        );
        assert_eq!(vrf.import_rmap(), "vrf3981-import-map");
        assert!(is_no_export_plist(&vrf.import_plist(IpVer::V6, true)));
        assert!(!is_no_export_plist(&vrf.import_plist(IpVer::V6, false)));
    }
}
