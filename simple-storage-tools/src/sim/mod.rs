// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! In-memory stand-ins for a chain and a block explorer.
//!
//! [`SimulatedChain`] implements [`Chain`](crate::Chain) without a node: contract calls are
//! decoded against the `SimpleStorage` ABI and executed on in-memory storage, and every
//! transaction is mined into its own block. [`SimulatedExplorer`] records verification requests
//! and answers like a real explorer would.
//!
//! ```
//! use simple_storage_tools::{sim::{self, SimulatedChain}, ContractFactory};
//! use alloy::primitives::U256;
//!
//! # tokio_test_block_on(async {
//! let chain = SimulatedChain::new();
//! let factory = ContractFactory::new(sim::simple_storage_artifact()?, &chain)?;
//! let contract = factory.deploy().await?;
//!
//! contract.store(U256::from(7)).await?.wait(1).await?;
//! assert_eq!(contract.retrieve().await?, U256::from(7));
//! # Ok::<(), simple_storage_tools::Error>(())
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod chain;
pub mod constants;
pub mod explorer;
pub mod state;

pub use chain::SimulatedChain;
pub use explorer::SimulatedExplorer;

use crate::core::{
    artifact::{CompilationError, ContractArtifact},
    contract::{ABI_SIGNATURES, CONTRACT_NAME},
};

/// A `SimpleStorage` artifact that needs no compiler.
pub fn simple_storage_artifact() -> Result<ContractArtifact, CompilationError> {
    ContractArtifact::from_signatures(
        CONTRACT_NAME,
        ABI_SIGNATURES,
        constants::SIMPLE_STORAGE_INITCODE.to_vec(),
    )
}
