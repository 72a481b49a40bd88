// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Default values of the simulated chain.

use alloy::primitives::{address, hex, Address};

use crate::core::network::HARDHAT_CHAIN_ID;

/// Same chain id as Hardhat's in-process network.
pub const DEFAULT_CHAIN_ID: u64 = HARDHAT_CHAIN_ID;

/// First account of the standard development mnemonic.
pub const DEFAULT_SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Creation code of a minimal `SimpleStorage`: dispatches `retrieve()` (`0x2e64cec1`) to
/// `SLOAD(0)` and `store(uint256)` (`0x6057361d`) to `SSTORE(0, arg)`, reverting otherwise.
///
/// The first 11 bytes copy the 50 byte runtime that follows into memory and return it.
pub const SIMPLE_STORAGE_INITCODE: &[u8] = &hex!(
    "603280600b6000396000f360003560e01c80632e64cec114601e5780636057361d14602a57600080fd5b60005460005260206000f35b60043560005500"
);
