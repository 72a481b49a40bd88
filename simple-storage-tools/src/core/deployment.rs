// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::{Address, TxHash, U256};

use crate::{
    core::{
        artifact::{ArtifactSource, CompilationError},
        chain::{Chain, ChainError},
        contract::{ContractFactory, CONTRACT_NAME},
        network::VerificationPolicy,
        verification::{self, Explorer, VerificationOutcome, VerificationRequest},
    },
    utils::color::DebugColor,
};

#[derive(Clone, Debug)]
pub struct DeploymentConfig {
    pub contract_name: String,
    pub verification: VerificationPolicy,
    /// Blocks to wait on top of the deployment before asking the explorer to verify.
    pub verification_confirmations: u64,
    pub write_confirmations: u64,
    /// Number stored after deployment.
    pub value: U256,
    pub constructor_args: Vec<String>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            contract_name: CONTRACT_NAME.to_string(),
            verification: VerificationPolicy::disabled(),
            verification_confirmations: 6,
            write_confirmations: 1,
            value: U256::from(7),
            constructor_args: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct DeploymentReport {
    pub address: Address,
    pub deployment_tx: TxHash,
    /// `None` when verification was not attempted.
    pub verification: Option<VerificationOutcome>,
    pub initial_value: U256,
    pub updated_value: U256,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("{0}")]
    Compilation(#[from] CompilationError),
    #[error("{0}")]
    Transaction(#[from] ChainError),
}

/// Deploys `SimpleStorage`, verifies it when the policy allows, then reads, writes and reads the
/// stored number again.
///
/// Verification failures are logged and recorded in the report; they never abort the run.
pub async fn deploy_and_interact(
    artifacts: &impl ArtifactSource,
    chain: &impl Chain,
    explorer: &impl Explorer,
    config: &DeploymentConfig,
) -> Result<DeploymentReport, DeploymentError> {
    let artifact = artifacts.artifact(&config.contract_name)?;
    let factory = ContractFactory::new(artifact, chain)?;

    info!(@grey, "Deploying contract...");
    let contract = factory.deploy().await?;
    info!(@grey, "Deployed contract to: {}", contract.address().debug_mint());

    let chain_id = chain.chain_id().await?;
    debug!(@grey, "chain id: {}", chain_id.lavender());
    let verification = if config.verification.should_verify(chain_id) {
        info!(@grey, "Waiting for block confirmations...");
        contract
            .deployment()
            .wait(config.verification_confirmations)
            .await?;
        let outcome = match VerificationRequest::new(
            contract.address(),
            factory.artifact(),
            &config.constructor_args,
        ) {
            Ok(request) => verification::verify(explorer, &request).await,
            Err(err) => {
                warn!(@yellow, "verification skipped: {err}");
                VerificationOutcome::Failed(err)
            }
        };
        Some(outcome)
    } else {
        debug!(@grey, "skipping verification on chain {chain_id}");
        None
    };

    let initial_value = contract.retrieve().await?;
    info!(@grey, "Current value: {}", initial_value.mint());

    let receipt = contract
        .store(config.value)
        .await?
        .wait(config.write_confirmations)
        .await?;
    debug!(@grey, "store included in block {}", receipt.block_number.lavender());

    let updated_value = contract.retrieve().await?;
    info!(@grey, "Updated value: {}", updated_value.mint());

    Ok(DeploymentReport {
        address: contract.address(),
        deployment_tx: contract.deployment().tx_hash(),
        verification,
        initial_value,
        updated_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{contract::SimpleStorage, network::SEPOLIA_CHAIN_ID},
        sim::{self, SimulatedChain, SimulatedExplorer},
    };

    fn sepolia_config() -> DeploymentConfig {
        DeploymentConfig {
            verification: VerificationPolicy::sepolia(Some("KEY".to_string())),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn deploys_and_updates_value() {
        let chain = SimulatedChain::new();
        let artifact = sim::simple_storage_artifact().unwrap();

        let report =
            deploy_and_interact(&artifact, &chain, &SimulatedExplorer::new(), &Default::default())
                .await
                .unwrap();
        assert_eq!(report.initial_value, U256::ZERO);
        assert_eq!(report.updated_value, U256::from(7));
        assert!(report.verification.is_none());
        assert!(chain.code_at(report.address).is_some());
        assert_eq!(chain.stored_value(report.address), Some(U256::from(7)));
    }

    #[tokio::test]
    async fn verifies_on_matching_chain() {
        let chain = SimulatedChain::new();
        chain.set_chain_id(SEPOLIA_CHAIN_ID);
        let explorer = SimulatedExplorer::new();
        let artifact = sim::simple_storage_artifact().unwrap();

        let report = deploy_and_interact(&artifact, &chain, &explorer, &sepolia_config())
            .await
            .unwrap();
        assert!(matches!(
            report.verification,
            Some(VerificationOutcome::Verified)
        ));
        assert!(explorer.is_verified(report.address));

        // Deployment block, 5 more for verification, then the store transaction.
        let receipt = chain
            .wait_for_confirmations(report.deployment_tx, 1)
            .await
            .unwrap();
        assert_eq!(receipt.block_number, 1);
        assert_eq!(chain.block_number(), 7);
    }

    #[tokio::test]
    async fn skips_verification_without_key_or_on_other_chain() {
        let chain = SimulatedChain::new();
        let explorer = SimulatedExplorer::new();
        let artifact = sim::simple_storage_artifact().unwrap();

        // Local chain id does not match Sepolia.
        let report = deploy_and_interact(&artifact, &chain, &explorer, &sepolia_config())
            .await
            .unwrap();
        assert!(report.verification.is_none());

        chain.set_chain_id(SEPOLIA_CHAIN_ID);
        let config = DeploymentConfig {
            verification: VerificationPolicy::sepolia(Some("  ".to_string())),
            ..Default::default()
        };
        let report = deploy_and_interact(&artifact, &chain, &explorer, &config)
            .await
            .unwrap();
        assert!(report.verification.is_none());
        assert!(explorer.requests().is_empty());
    }

    #[tokio::test]
    async fn verification_failures_do_not_abort() {
        let chain = SimulatedChain::new();
        chain.set_chain_id(SEPOLIA_CHAIN_ID);
        let explorer = SimulatedExplorer::new();
        explorer.fail_with("Invalid API Key");
        let artifact = sim::simple_storage_artifact().unwrap();

        let report = deploy_and_interact(&artifact, &chain, &explorer, &sepolia_config())
            .await
            .unwrap();
        assert!(matches!(
            report.verification,
            Some(VerificationOutcome::Failed(_))
        ));
        assert_eq!(report.updated_value, U256::from(7));
    }

    #[tokio::test]
    async fn bad_constructor_args_only_fail_verification() {
        let chain = SimulatedChain::new();
        chain.set_chain_id(SEPOLIA_CHAIN_ID);
        let explorer = SimulatedExplorer::new();
        let artifact = sim::simple_storage_artifact().unwrap();
        let config = DeploymentConfig {
            constructor_args: vec!["1".to_string()],
            ..sepolia_config()
        };

        let report = deploy_and_interact(&artifact, &chain, &explorer, &config)
            .await
            .unwrap();
        assert!(matches!(
            report.verification,
            Some(VerificationOutcome::Failed(_))
        ));
        assert!(explorer.requests().is_empty());
    }

    #[tokio::test]
    async fn redeploying_is_idempotent_for_the_explorer() {
        let explorer = SimulatedExplorer::new();
        let artifact = sim::simple_storage_artifact().unwrap();
        let chain = SimulatedChain::new();
        chain.set_chain_id(SEPOLIA_CHAIN_ID);

        let report = deploy_and_interact(&artifact, &chain, &explorer, &sepolia_config())
            .await
            .unwrap();

        // A second explorer round for the same address is still a success.
        let request = VerificationRequest::new(report.address, &artifact, &[]).unwrap();
        let outcome = verification::verify(&explorer, &request).await;
        assert!(matches!(outcome, VerificationOutcome::AlreadyVerified));
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn rejected_deployment_is_an_error() {
        let chain = SimulatedChain::new();
        chain.reject_next_transaction("insufficient funds for gas");
        let artifact = sim::simple_storage_artifact().unwrap();

        let err =
            deploy_and_interact(&artifact, &chain, &SimulatedExplorer::new(), &Default::default())
                .await
                .unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::Transaction(ChainError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn rejected_write_is_an_error() {
        let chain = SimulatedChain::new();
        let artifact = sim::simple_storage_artifact().unwrap();
        let report =
            deploy_and_interact(&artifact, &chain, &SimulatedExplorer::new(), &Default::default())
                .await
                .unwrap();

        chain.reject_next_transaction("replacement transaction underpriced");
        let contract = SimpleStorage::at(report.address, report.deployment_tx, &chain);
        let err = contract.store(U256::from(1)).await.unwrap_err();
        assert!(matches!(err, ChainError::Rejected(_)));
        assert_eq!(contract.retrieve().await.unwrap(), U256::from(7));
    }

    #[tokio::test]
    async fn missing_artifact_is_a_compilation_error() {
        let chain = SimulatedChain::new();
        let artifact = sim::simple_storage_artifact().unwrap();
        let config = DeploymentConfig {
            contract_name: "Missing".to_string(),
            ..Default::default()
        };

        let err = deploy_and_interact(&artifact, &chain, &SimulatedExplorer::new(), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, DeploymentError::Compilation(_)));
        assert_eq!(chain.block_number(), 0);
    }
}
