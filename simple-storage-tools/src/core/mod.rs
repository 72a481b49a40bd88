// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod artifact;
pub mod chain;
pub mod contract;
pub mod deployment;
pub mod network;
pub mod rpc;
pub mod verification;
