// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::U256;
use eyre::Result;
use simple_storage_tools::{
    sim::{self, SimulatedChain},
    ContractFactory, SimpleStorage,
};

async fn deploy(chain: &SimulatedChain) -> Result<SimpleStorage<'_, SimulatedChain>> {
    let factory = ContractFactory::new(sim::simple_storage_artifact()?, chain)?;
    Ok(factory.deploy().await?)
}

#[tokio::test]
async fn should_start_with_a_favorite_number_of_0() -> Result<()> {
    let chain = SimulatedChain::new();
    let simple_storage = deploy(&chain).await?;

    let current_value = simple_storage.retrieve().await?;
    assert_eq!(current_value.to_string(), "0");
    Ok(())
}

#[tokio::test]
async fn should_update_when_we_call_store() -> Result<()> {
    let chain = SimulatedChain::new();
    let simple_storage = deploy(&chain).await?;

    let receipt = simple_storage.store(U256::from(7)).await?.wait(1).await?;
    assert!(receipt.confirmations >= 1);

    let current_value = simple_storage.retrieve().await?;
    assert_eq!(current_value.to_string(), "7");
    Ok(())
}

#[tokio::test]
async fn fresh_deployments_do_not_share_storage() -> Result<()> {
    let chain = SimulatedChain::new();
    let first = deploy(&chain).await?;
    first.store(U256::from(7)).await?.wait(1).await?;

    let second = deploy(&chain).await?;
    assert_ne!(first.address(), second.address());
    assert_eq!(second.retrieve().await?, U256::ZERO);
    assert_eq!(first.retrieve().await?, U256::from(7));

    let other_chain = SimulatedChain::new();
    let third = deploy(&other_chain).await?;
    assert_eq!(third.retrieve().await?, U256::ZERO);
    Ok(())
}

#[tokio::test]
async fn stores_overwrite_each_other() -> Result<()> {
    let chain = SimulatedChain::new();
    let simple_storage = deploy(&chain).await?;

    for value in [U256::from(1), U256::ZERO, U256::from(42), U256::MAX] {
        simple_storage.store(value).await?.wait(1).await?;
        assert_eq!(simple_storage.retrieve().await?, value);
    }
    Ok(())
}

#[tokio::test]
async fn attaches_to_an_existing_deployment() -> Result<()> {
    let chain = SimulatedChain::new();
    let deployed = deploy(&chain).await?;
    deployed.store(U256::from(7)).await?.wait(1).await?;

    let attached = SimpleStorage::at(deployed.address(), deployed.deployment().tx_hash(), &chain);
    assert_eq!(attached.retrieve().await?, U256::from(7));

    let receipt = attached.deployment().wait(3).await?;
    assert_eq!(receipt.contract_address, Some(deployed.address()));
    assert!(receipt.confirmations >= 3);
    Ok(())
}
