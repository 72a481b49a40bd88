// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! This module defines the internal state of the simulated chain.

use std::collections::HashMap;

use alloy::{
    primitives::{keccak256, Address, Bytes, TxHash, U256},
    sol_types::{SolInterface, SolValue},
};

use super::constants::{DEFAULT_CHAIN_ID, DEFAULT_SENDER};
use crate::core::contract::ISimpleStorage::ISimpleStorageCalls;

/// Inclusion record of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRecord {
    pub block_number: u64,
    pub contract_address: Option<Address>,
    pub success: bool,
}

/// Defines the internal state of the simulated chain.
/// Tracks deployed code, each contract's stored number, nonces and mined transactions.
#[derive(Clone, Debug)]
pub struct ChainState {
    pub chain_id: u64,
    pub sender: Address,
    /// Number of the latest mined block. Genesis is block 0.
    pub block_number: u64,
    pub nonces: HashMap<Address, u64>,
    pub code: HashMap<Address, Bytes>,
    pub storage: HashMap<Address, U256>,
    pub transactions: HashMap<TxHash, TransactionRecord>,
    /// Reason to refuse the next submitted transaction with.
    pub rejection: Option<String>,
}

impl Default for ChainState {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            sender: DEFAULT_SENDER,
            block_number: 0,
            nonces: HashMap::new(),
            code: HashMap::new(),
            storage: HashMap::new(),
            transactions: HashMap::new(),
            rejection: None,
        }
    }
}

impl ChainState {
    /// Consumes the sender's nonce and derives the transaction hash from it.
    pub(crate) fn next_transaction(&mut self, input: &[u8]) -> (TxHash, u64) {
        let nonce = self.nonces.entry(self.sender).or_default();
        let current = *nonce;
        *nonce += 1;

        let mut preimage = Vec::with_capacity(20 + 8 + 8 + input.len());
        preimage.extend_from_slice(self.sender.as_slice());
        preimage.extend_from_slice(&self.chain_id.to_be_bytes());
        preimage.extend_from_slice(&current.to_be_bytes());
        preimage.extend_from_slice(input);
        (keccak256(preimage), current)
    }

    /// Mines a block holding a single transaction.
    pub(crate) fn mine(&mut self, tx_hash: TxHash, contract_address: Option<Address>, success: bool) {
        self.block_number += 1;
        self.transactions.insert(
            tx_hash,
            TransactionRecord {
                block_number: self.block_number,
                contract_address,
                success,
            },
        );
    }

    /// Runs `input` against the contract at `to`. State changes are kept only if `commit` is set.
    ///
    /// Returns `None` when execution reverts.
    pub(crate) fn execute(&mut self, to: Address, input: &[u8], commit: bool) -> Option<Bytes> {
        match ISimpleStorageCalls::abi_decode(input).ok()? {
            ISimpleStorageCalls::retrieve(_) => {
                let value = self.storage.get(&to).copied().unwrap_or_default();
                Some(value.abi_encode().into())
            }
            ISimpleStorageCalls::store(call) => {
                if commit {
                    self.storage.insert(to, call.favoriteNumber);
                }
                Some(Bytes::new())
            }
        }
    }
}
