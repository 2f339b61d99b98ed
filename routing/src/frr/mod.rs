// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! FRR drivers: the logic to produce configurations for FRR.
//! Configurations are rendered as a whole, to be loaded with frr-reload.py or by restarting
//! the daemons.

pub mod renderer;
