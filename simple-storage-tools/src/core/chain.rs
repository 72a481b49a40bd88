// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The chain capability used by contract handles and the deployment orchestrator.
//!
//! Two implementations exist: [`RpcChain`](crate::RpcChain) talks to a real node over JSON-RPC,
//! and [`SimulatedChain`](crate::sim::SimulatedChain) keeps everything in memory.

use alloy::primitives::{Address, Bytes, TxHash};

use crate::utils::color::DebugColor;

/// Operations a chain must support to deploy and exercise a contract.
///
/// Every state-changing operation returns a transaction hash immediately; callers suspend on
/// [`Chain::wait_for_confirmations`] to learn the outcome.
#[allow(async_fn_in_trait)]
pub trait Chain {
    /// Chain id reported by the node.
    async fn chain_id(&self) -> Result<u64, ChainError>;

    /// Submits a contract creation transaction with the given init code.
    async fn deploy(&self, bytecode: Bytes) -> Result<TxHash, ChainError>;

    /// Executes a read-only call against `to`.
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, ChainError>;

    /// Submits a state-changing transaction to `to`.
    async fn send(&self, to: Address, input: Bytes) -> Result<TxHash, ChainError>;

    /// Suspends until `tx_hash` is included with at least `confirmations` blocks on top
    /// (the including block counts as the first).
    async fn wait_for_confirmations(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> Result<Receipt, ChainError>;
}

impl<C: Chain + ?Sized> Chain for &C {
    async fn chain_id(&self) -> Result<u64, ChainError> {
        (**self).chain_id().await
    }

    async fn deploy(&self, bytecode: Bytes) -> Result<TxHash, ChainError> {
        (**self).deploy(bytecode).await
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, ChainError> {
        (**self).call(to, input).await
    }

    async fn send(&self, to: Address, input: Bytes) -> Result<TxHash, ChainError> {
        (**self).send(to, input).await
    }

    async fn wait_for_confirmations(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> Result<Receipt, ChainError> {
        (**self).wait_for_confirmations(tx_hash, confirmations).await
    }
}

/// Confirmation record of an included transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    /// Number of blocks, including the one holding the transaction, seen when the receipt was
    /// produced.
    pub confirmations: u64,
    /// Address of the created contract, for deployments.
    pub contract_address: Option<Address>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),
    #[error("failed to decode return data: {0}")]
    Decode(#[from] alloy::sol_types::Error),

    #[error("transaction rejected: {0}")]
    Rejected(String),
    #[error("transaction reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("call to {to} reverted")]
    CallReverted { to: Address },
    #[error("unknown transaction {0}")]
    UnknownTransaction(TxHash),
    #[error("transaction {0} did not create a contract")]
    NoContractAddress(TxHash),
    #[error("no code at address {0}")]
    NoCode(Address),
}
