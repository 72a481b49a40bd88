// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Typed handle over a deployed `SimpleStorage` contract.

use alloy::{
    primitives::{Address, TxHash, U256},
    sol,
    sol_types::{SolCall, SolValue},
};

use crate::{
    core::{
        artifact::{CompilationError, ContractArtifact},
        chain::{Chain, ChainError, Receipt},
    },
    utils::color::DebugColor,
};

/// Name of the contract artifact.
pub const CONTRACT_NAME: &str = "SimpleStorage";

/// Human readable ABI of the contract.
pub const ABI_SIGNATURES: [&str; 2] = [
    "function store(uint256 favoriteNumber)",
    "function retrieve() view returns (uint256)",
];

sol! {
    interface ISimpleStorage {
        function store(uint256 favoriteNumber) external;
        function retrieve() external view returns (uint256);
    }
}

/// Deploys new `SimpleStorage` instances from a compiled artifact.
#[derive(Debug)]
pub struct ContractFactory<'a, C> {
    artifact: ContractArtifact,
    chain: &'a C,
}

impl<'a, C: Chain> ContractFactory<'a, C> {
    /// Fails if the artifact does not expose the functions the handle relies on.
    pub fn new(artifact: ContractArtifact, chain: &'a C) -> Result<Self, CompilationError> {
        for function in ["store", "retrieve"] {
            if artifact.abi.function(function).is_none() {
                return Err(CompilationError::MissingFunction {
                    contract: artifact.name.clone(),
                    function: function.to_string(),
                });
            }
        }
        Ok(Self { artifact, chain })
    }

    pub fn artifact(&self) -> &ContractArtifact {
        &self.artifact
    }

    /// Submits the deployment and waits until it is included in a block.
    pub async fn deploy(&self) -> Result<SimpleStorage<'a, C>, ChainError> {
        let tx_hash = self.chain.deploy(self.artifact.bytecode.clone()).await?;
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());
        let receipt = self.chain.wait_for_confirmations(tx_hash, 1).await?;
        let address = receipt
            .contract_address
            .ok_or(ChainError::NoContractAddress(tx_hash))?;
        Ok(SimpleStorage {
            address,
            deployment_tx: tx_hash,
            chain: self.chain,
        })
    }
}

/// A deployed `SimpleStorage` contract.
#[derive(Debug)]
pub struct SimpleStorage<'a, C> {
    address: Address,
    deployment_tx: TxHash,
    chain: &'a C,
}

impl<'a, C: Chain> SimpleStorage<'a, C> {
    /// Attaches to an already deployed instance.
    pub fn at(address: Address, deployment_tx: TxHash, chain: &'a C) -> Self {
        Self {
            address,
            deployment_tx,
            chain,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The deployment transaction, for waiting on further confirmations.
    pub fn deployment(&self) -> PendingTransaction<'a, C> {
        PendingTransaction {
            tx_hash: self.deployment_tx,
            chain: self.chain,
        }
    }

    /// Reads the stored favorite number.
    pub async fn retrieve(&self) -> Result<U256, ChainError> {
        let input = ISimpleStorage::retrieveCall {}.abi_encode();
        let output = self.chain.call(self.address, input.into()).await?;
        Ok(U256::abi_decode(&output)?)
    }

    /// Submits a transaction storing `value`.
    pub async fn store(&self, value: U256) -> Result<PendingTransaction<'a, C>, ChainError> {
        let input = ISimpleStorage::storeCall {
            favoriteNumber: value,
        }
        .abi_encode();
        let tx_hash = self.chain.send(self.address, input.into()).await?;
        debug!(@grey, "sent store tx: {}", tx_hash.debug_lavender());
        Ok(PendingTransaction {
            tx_hash,
            chain: self.chain,
        })
    }
}

/// A submitted transaction that may not be included yet.
#[derive(Debug)]
pub struct PendingTransaction<'a, C> {
    tx_hash: TxHash,
    chain: &'a C,
}

impl<C: Chain> PendingTransaction<'_, C> {
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Suspends until the transaction has `confirmations` confirmations.
    pub async fn wait(&self, confirmations: u64) -> Result<Receipt, ChainError> {
        self.chain
            .wait_for_confirmations(self.tx_hash, confirmations)
            .await
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::hex;

    use super::*;

    #[test]
    fn selectors_match_the_solidity_contract() {
        assert_eq!(ISimpleStorage::storeCall::SELECTOR, hex!("6057361d"));
        assert_eq!(ISimpleStorage::retrieveCall::SELECTOR, hex!("2e64cec1"));
    }

    #[test]
    fn factory_requires_store_and_retrieve() {
        let chain = crate::sim::SimulatedChain::new();
        let artifact = ContractArtifact::from_signatures(
            CONTRACT_NAME,
            ["function retrieve() view returns (uint256)"],
            vec![0x00],
        )
        .unwrap();
        let err = ContractFactory::new(artifact, &chain).unwrap_err();
        assert!(matches!(
            err,
            CompilationError::MissingFunction { ref function, .. } if function == "store"
        ));
    }
}
