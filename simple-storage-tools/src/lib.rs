// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying, verifying and exercising the `SimpleStorage` contract.
//!
//! The [`core`] module holds the network-facing pieces: contract artifacts, the [`Chain`]
//! capability and its RPC implementation, explorer verification and the deployment
//! orchestrator. The [`sim`] module provides an in-memory chain and explorer with the same
//! capabilities, for deterministic tests.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod sim;
pub mod utils;

#[cfg(feature = "integration-tests")]
pub mod devnet;

pub use crate::core::{
    artifact::{ArtifactDir, ArtifactSource, CompilationError, ContractArtifact},
    chain::{Chain, ChainError, Receipt},
    contract::{ContractFactory, PendingTransaction, SimpleStorage},
    deployment::{deploy_and_interact, DeploymentConfig, DeploymentError, DeploymentReport},
    network::{Network, VerificationPolicy},
    rpc::RpcChain,
    verification::{
        EtherscanVerifier, Explorer, VerificationError, VerificationOutcome, VerificationRequest,
    },
};
pub use error::{Error, Result};
