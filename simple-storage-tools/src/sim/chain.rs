// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{cell::RefCell, rc::Rc};

use alloy::primitives::{Address, Bytes, TxHash, U256};

use super::state::ChainState;
use crate::core::chain::{Chain, ChainError, Receipt};

/// An in-memory chain for deterministic tests.
///
/// Clones share the same chain. Each transaction is mined into its own block, and waiting for
/// more confirmations than exist mines empty blocks.
///
/// # Examples
/// ```
/// use simple_storage_tools::sim::SimulatedChain;
///
/// let chain = SimulatedChain::new();
/// chain.set_chain_id(11_155_111);
/// chain.reject_next_transaction("nonce too low");
/// assert_eq!(chain.block_number(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulatedChain {
    state: Rc<RefCell<ChainState>>,
}

impl From<ChainState> for SimulatedChain {
    fn from(state: ChainState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }
}

impl SimulatedChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a cloned snapshot of the chain state for inspection.
    pub fn snapshot(&self) -> ChainState {
        self.state.borrow().clone()
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.state.borrow_mut().chain_id = chain_id;
    }

    /// Sets the account transactions are sent from.
    pub fn set_sender(&self, sender: Address) {
        self.state.borrow_mut().sender = sender;
    }

    /// Makes the next deployment or transaction fail at submission.
    pub fn reject_next_transaction(&self, reason: impl Into<String>) {
        self.state.borrow_mut().rejection = Some(reason.into());
    }

    /// Number of the latest block.
    pub fn block_number(&self) -> u64 {
        self.state.borrow().block_number
    }

    pub fn code_at(&self, address: Address) -> Option<Bytes> {
        self.state.borrow().code.get(&address).cloned()
    }

    /// Reads a contract's stored number without going through the ABI.
    pub fn stored_value(&self, address: Address) -> Option<U256> {
        let state = self.state.borrow();
        state
            .code
            .contains_key(&address)
            .then(|| state.storage.get(&address).copied().unwrap_or_default())
    }

    fn take_rejection(&self) -> Result<(), ChainError> {
        match self.state.borrow_mut().rejection.take() {
            Some(reason) => Err(ChainError::Rejected(reason)),
            None => Ok(()),
        }
    }
}

impl Chain for SimulatedChain {
    async fn chain_id(&self) -> Result<u64, ChainError> {
        Ok(self.state.borrow().chain_id)
    }

    async fn deploy(&self, bytecode: Bytes) -> Result<TxHash, ChainError> {
        self.take_rejection()?;
        if bytecode.is_empty() {
            return Err(ChainError::Rejected("empty init code".to_string()));
        }

        let mut state = self.state.borrow_mut();
        let (tx_hash, nonce) = state.next_transaction(&bytecode);
        let address = state.sender.create(nonce);
        state.code.insert(address, bytecode);
        state.mine(tx_hash, Some(address), true);
        Ok(tx_hash)
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, ChainError> {
        let mut state = self.state.borrow_mut();
        if !state.code.contains_key(&to) {
            return Err(ChainError::NoCode(to));
        }
        state
            .execute(to, &input, false)
            .ok_or(ChainError::CallReverted { to })
    }

    async fn send(&self, to: Address, input: Bytes) -> Result<TxHash, ChainError> {
        self.take_rejection()?;

        let mut state = self.state.borrow_mut();
        let (tx_hash, _) = state.next_transaction(&input);
        // Transfers to accounts without code succeed and do nothing.
        let success = !state.code.contains_key(&to) || state.execute(to, &input, true).is_some();
        state.mine(tx_hash, None, success);
        Ok(tx_hash)
    }

    async fn wait_for_confirmations(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> Result<Receipt, ChainError> {
        let mut state = self.state.borrow_mut();
        let record = state
            .transactions
            .get(&tx_hash)
            .cloned()
            .ok_or(ChainError::UnknownTransaction(tx_hash))?;
        if !record.success {
            return Err(ChainError::Reverted { tx_hash });
        }

        let target = record.block_number + confirmations.max(1) - 1;
        if state.block_number < target {
            state.block_number = target;
        }
        Ok(Receipt {
            transaction_hash: tx_hash,
            block_number: record.block_number,
            confirmations: state.block_number - record.block_number + 1,
            contract_address: record.contract_address,
        })
    }
}
