// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use simple_storage_tools::{
    deploy_and_interact, sim::SimulatedChain, ArtifactSource, Chain, DeploymentConfig,
    DeploymentReport, Explorer, RpcChain,
};

use crate::{
    common_args::{ArtifactArgs, AuthArgs, ProviderArgs, VerificationArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct DeployArgs {
    #[command(flatten)]
    pub provider: ProviderArgs,
    #[command(flatten)]
    pub auth: AuthArgs,
    #[command(flatten)]
    pub verification: VerificationArgs,
    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

pub async fn exec(args: DeployArgs) -> CliResult {
    let artifacts = args.artifacts.source();
    let config = DeploymentConfig {
        verification: args.verification.policy(),
        ..Default::default()
    };
    let network = args.provider.network;

    let report = if network.is_simulated() {
        log::debug!("using the in-process simulated network");
        let chain = SimulatedChain::new();
        let explorer = args.verification.explorer(chain.chain_id().await?);
        run(&artifacts, &chain, &explorer, &config).await?
    } else {
        let provider = args
            .provider
            .build_provider_with_wallet(&args.auth)
            .await?;
        let chain = RpcChain::new(provider);
        let chain_id = chain.chain_id().await?;
        if chain_id != network.chain_id() {
            log::warn!(
                "{network:?} is expected to have chain id {} but the node reports {chain_id}",
                network.chain_id()
            );
        }
        let explorer = args.verification.explorer(chain_id);
        run(&artifacts, &chain, &explorer, &config).await?
    };

    log::debug!(
        "deployed {} in {}, stored {}",
        report.address,
        report.deployment_tx,
        report.updated_value
    );
    Ok(())
}

async fn run(
    artifacts: &impl ArtifactSource,
    chain: &impl Chain,
    explorer: &impl Explorer,
    config: &DeploymentConfig,
) -> simple_storage_tools::Result<DeploymentReport> {
    Ok(deploy_and_interact(artifacts, chain, explorer, config).await?)
}
