// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Config renderer: vrfs

use crate::frr::renderer::builder::{ConfigBuilder, MARKER, Render};
use config::internal::routing::vrf::VrfConfig;

/* impl Render */
impl Render for VrfConfig {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _ctx: &Self::Context) -> Self::Output {
        let mut cfg = ConfigBuilder::new();
        cfg += MARKER;
        cfg += format!("vrf {}", &self.name);

        /* we don't render BGP here even if it is inside VRF in the model */

        cfg += format!(" vni {}", self.vni);
        cfg += "exit-vrf";
        cfg += MARKER;
        cfg
    }
}
impl Render for [VrfConfig] {
    type Context = ();
    type Output = ConfigBuilder;
    fn render(&self, _ctx: &Self::Context) -> Self::Output {
        let mut cfg = ConfigBuilder::new();
        self.iter().for_each(|vrf| cfg += vrf.render(&()));
        cfg
    }
}

/// Render the BGP instances of a set of VRFs
pub(crate) fn render_vrf_bgp(vrfs: &[VrfConfig]) -> ConfigBuilder {
    let mut cfg = ConfigBuilder::new();
    vrfs.iter()
        .filter_map(|vrf| vrf.bgp.as_ref())
        .for_each(|bgp| cfg += bgp.render(&()));
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vrf_render() {
        let vrfs = vec![
            VrfConfig::new("vrf3981", 3981, 3981, 1001),
            VrfConfig::new("vrf104009", 104_009, 104_009, 1003),
        ];
        let expected = "\
!
vrf vrf3981
 vni 3981
exit-vrf
!
vrf vrf104009
 vni 104009
exit-vrf
!
";
        assert_eq!(vrfs.render(&()).to_string(), expected);
        assert!(render_vrf_bgp(&vrfs).is_empty());
    }
}
