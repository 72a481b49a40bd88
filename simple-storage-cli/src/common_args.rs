// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{local::PrivateKeySigner, Signer},
};
use eyre::{eyre, Context};
use simple_storage_tools::{
    core::network::ETHERSCAN_API_URL, utils::solc::explorer_compiler_version, ArtifactDir,
    EtherscanVerifier, Network, VerificationPolicy,
};

use crate::constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_CONTRACTS_DIR, LOCALHOST_PRIVATE_KEY};

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Directory holding Hardhat or Foundry build artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts: PathBuf,
    /// Directory holding Solidity sources, compiled with solc when no artifact exists
    #[arg(long, default_value = DEFAULT_CONTRACTS_DIR)]
    contracts: PathBuf,
}

impl ArtifactArgs {
    pub fn source(&self) -> ArtifactDir {
        ArtifactDir::new(&self.artifacts).with_contracts(&self.contracts)
    }
}

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
}

impl AuthArgs {
    fn build_wallet(&self, network: Network, chain_id: u64) -> eyre::Result<EthereumWallet> {
        let key = match (&self.private_key, network) {
            (Some(key), _) if key.trim().is_empty() => return Err(eyre!("empty private key")),
            (Some(key), _) => key.trim(),
            (None, Network::Localhost) => LOCALHOST_PRIVATE_KEY,
            (None, _) => return Err(eyre!("no private key configured for {network:?}")),
        };
        let signer = key
            .parse::<PrivateKeySigner>()
            .wrap_err("invalid private key")?
            .with_chain_id(Some(chain_id));
        Ok(EthereumWallet::new(signer))
    }
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Network to deploy to
    #[arg(long, env = "NETWORK", value_enum, default_value_t)]
    pub network: Network,
    /// JSON-RPC endpoint, required for networks without a default one
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,
}

impl ProviderArgs {
    pub fn endpoint(&self) -> eyre::Result<String> {
        self.rpc_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.network.default_endpoint().map(str::to_string))
            .ok_or_else(|| eyre!("no RPC endpoint for {:?}, set --rpc-url", self.network))
    }

    pub async fn build_provider(&self) -> eyre::Result<impl Provider> {
        let provider = ProviderBuilder::new().connect(&self.endpoint()?).await?;
        Ok(provider)
    }

    pub async fn build_provider_with_wallet(
        &self,
        auth: &AuthArgs,
    ) -> eyre::Result<impl Provider + WalletProvider> {
        let provider = self.build_provider().await?;
        let chain_id = provider.get_chain_id().await?;
        let wallet = auth.build_wallet(self.network, chain_id)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&self.endpoint()?)
            .await?;
        Ok(provider)
    }
}

#[derive(Debug, clap::Args)]
pub struct VerificationArgs {
    /// Etherscan API key. Verification is skipped without one
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    etherscan_api_key: Option<String>,
    #[arg(long, default_value = ETHERSCAN_API_URL)]
    etherscan_api_url: String,
    /// Solc version to verify with when the artifact does not record one, e.g. 0.8.8+commit.dddeac2f
    #[arg(long, value_parser = parse_compiler_version)]
    compiler_version: Option<String>,
    /// Optimizer runs the contract was compiled with. Omit if the optimizer was disabled
    #[arg(long)]
    optimization_runs: Option<u32>,
}

fn parse_compiler_version(version: &str) -> eyre::Result<String> {
    explorer_compiler_version(version)
        .ok_or_else(|| eyre!("expected a version like 0.8.8+commit.dddeac2f, got {version}"))
}

impl VerificationArgs {
    /// Contracts are only verified on Sepolia.
    pub fn policy(&self) -> VerificationPolicy {
        VerificationPolicy::sepolia(self.etherscan_api_key.clone())
    }

    pub fn explorer(&self, chain_id: u64) -> Option<EtherscanVerifier> {
        let api_key = self
            .etherscan_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())?;
        Some(
            EtherscanVerifier::builder()
                .api_key(api_key)
                .chain_id(chain_id)
                .api_url(self.etherscan_api_url.as_str())
                .compiler_version(self.compiler_version.clone())
                .optimization_runs(self.optimization_runs)
                .build(),
        )
    }
}
