// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Internal configuration model: routing

pub mod bgp;
pub mod frr;
pub mod importrule;
pub mod prefixlist;
pub mod routemap;
pub mod vrf;
