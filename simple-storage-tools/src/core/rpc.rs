// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! [`Chain`] backed by a JSON-RPC node.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::TransactionRequest,
};

use crate::{
    core::chain::{Chain, ChainError, Receipt},
    utils::color::DebugColor,
};

/// A chain reached through an alloy [`Provider`].
///
/// The provider is expected to carry a wallet filler so that transactions are signed and sent
/// from its default signer.
#[derive(Clone, Debug)]
pub struct RpcChain<P> {
    provider: P,
}

impl<P: Provider> RpcChain<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TxHash, ChainError> {
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }
}

impl<P: Provider> Chain for RpcChain<P> {
    async fn chain_id(&self) -> Result<u64, ChainError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn deploy(&self, bytecode: Bytes) -> Result<TxHash, ChainError> {
        let tx = TransactionRequest::default().with_deploy_code(bytecode);
        self.submit(tx).await
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, ChainError> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);
        Ok(self.provider.call(tx).await?)
    }

    async fn send(&self, to: Address, input: Bytes) -> Result<TxHash, ChainError> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);
        self.submit(tx).await
    }

    async fn wait_for_confirmations(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> Result<Receipt, ChainError> {
        debug!(@grey, "waiting for {confirmations} confirmation(s) of {}", tx_hash.debug_lavender());
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(confirmations)
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(ChainError::Reverted { tx_hash });
        }

        let block_number = receipt
            .block_number
            .ok_or(ChainError::UnknownTransaction(tx_hash))?;
        let head = self.provider.get_block_number().await?;
        Ok(Receipt {
            transaction_hash: receipt.transaction_hash,
            block_number,
            confirmations: head.saturating_sub(block_number) + 1,
            contract_address: receipt.contract_address,
        })
    }
}
