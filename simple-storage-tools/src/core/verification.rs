// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Source verification on a block explorer.
//!
//! Verification is best effort: [`verify`] never fails, it reports a [`VerificationOutcome`]. An
//! explorer answering that the contract is already verified counts as success, which makes
//! repeated runs against the same address harmless.

use std::time::Duration;

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::JsonAbi,
    primitives::{Address, Bytes},
};
use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::{
    core::{artifact::ContractArtifact, network::ETHERSCAN_API_URL},
    utils::color::DebugColor,
};

/// Explorer capability: publish the source of a deployed contract.
#[allow(async_fn_in_trait)]
pub trait Explorer {
    async fn verify(&self, request: &VerificationRequest) -> Result<(), VerificationError>;
}

impl<E: Explorer + ?Sized> Explorer for &E {
    async fn verify(&self, request: &VerificationRequest) -> Result<(), VerificationError> {
        (**self).verify(request).await
    }
}

/// An absent explorer refuses every request.
impl<E: Explorer> Explorer for Option<E> {
    async fn verify(&self, request: &VerificationRequest) -> Result<(), VerificationError> {
        match self {
            Some(explorer) => explorer.verify(request).await,
            None => Err(VerificationError::NotConfigured),
        }
    }
}

/// Everything an explorer needs to match a deployment against its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationRequest {
    pub address: Address,
    pub contract_name: String,
    pub source_name: Option<String>,
    pub source_code: Option<String>,
    pub compiler_version: Option<String>,
    /// ABI-encoded constructor arguments, without selector.
    pub constructor_arguments: Bytes,
}

impl VerificationRequest {
    /// Builds a request for `artifact` deployed at `address` with the given constructor arguments.
    pub fn new(
        address: Address,
        artifact: &ContractArtifact,
        constructor_args: &[String],
    ) -> Result<Self, VerificationError> {
        Ok(Self {
            address,
            contract_name: artifact.name.clone(),
            source_name: artifact.source_name.clone(),
            source_code: artifact.source.clone(),
            compiler_version: artifact.compiler_version.clone(),
            constructor_arguments: encode_constructor_args(&artifact.abi, constructor_args)?,
        })
    }
}

/// ABI-encodes string constructor arguments against the constructor in `abi`.
pub fn encode_constructor_args(
    abi: &JsonAbi,
    args: &[String],
) -> Result<Bytes, VerificationError> {
    let Some(constructor) = &abi.constructor else {
        if args.is_empty() {
            return Ok(Bytes::new());
        }
        return Err(VerificationError::InvalidConstructorArgs(format!(
            "contract has no constructor but {} argument(s) were given",
            args.len()
        )));
    };
    if args.len() != constructor.inputs.len() {
        return Err(VerificationError::InvalidConstructorArgs(format!(
            "mismatch number of constructor arguments (want {}; got {})",
            constructor.inputs.len(),
            args.len(),
        )));
    }

    let mut values = Vec::<DynSolValue>::with_capacity(args.len());
    for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
        let ty = param.resolve().map_err(|err| {
            VerificationError::InvalidConstructorArgs(format!(
                "could not resolve constructor arg {param}: {err}"
            ))
        })?;
        let value = ty.coerce_str(arg).map_err(|err| {
            VerificationError::InvalidConstructorArgs(format!(
                "could not parse constructor arg {param}: {err}"
            ))
        })?;
        values.push(value);
    }
    let encoded = constructor
        .abi_encode_input_raw(&values)
        .map_err(|err| VerificationError::InvalidConstructorArgs(err.to_string()))?;
    Ok(encoded.into())
}

#[derive(Debug)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
    Failed(VerificationError),
}

impl VerificationOutcome {
    /// Whether the source is now published, by this request or an earlier one.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Verified | Self::AlreadyVerified)
    }
}

/// Submits `request` to `explorer`, absorbing every failure into the outcome.
pub async fn verify(explorer: &impl Explorer, request: &VerificationRequest) -> VerificationOutcome {
    info!(@grey, "Verifying contract...");
    match explorer.verify(request).await {
        Ok(()) => {
            info!(@mint, "Verified contract at {}", request.address);
            VerificationOutcome::Verified
        }
        Err(err) if err.is_already_verified() => {
            info!(@mint, "Already Verified");
            VerificationOutcome::AlreadyVerified
        }
        Err(err) => {
            warn!(@yellow, "verification failed: {err}");
            VerificationOutcome::Failed(err)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Rejected(String),
    #[error("verification {guid} still pending after {polls} checks")]
    Timeout { guid: String, polls: u32 },
    #[error("no explorer configured")]
    NotConfigured,
    #[error("source code of {0} is not available")]
    MissingSource(String),
    #[error("compiler version of {0} is not known")]
    MissingCompilerVersion(String),
    #[error("invalid constructor arguments: {0}")]
    InvalidConstructorArgs(String),
}

impl VerificationError {
    /// The explorer already holds the source for this address.
    pub fn is_already_verified(&self) -> bool {
        self.to_string().to_lowercase().contains("already verified")
    }
}

/// Verifies contracts through the Etherscan API.
#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct EtherscanVerifier {
    api_key: String,
    chain_id: u64,
    #[builder(default = ETHERSCAN_API_URL.to_string())]
    api_url: String,
    /// Used when the artifact does not record the compiler version.
    #[builder(default)]
    compiler_version: Option<String>,
    /// `None` submits the source as compiled without the optimizer.
    #[builder(default)]
    optimization_runs: Option<u32>,
    #[builder(default = Duration::from_secs(5))]
    poll_interval: Duration,
    #[builder(default = 12)]
    max_polls: u32,
    #[builder(default)]
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: String,
}

#[derive(Debug, PartialEq, Eq)]
enum CheckStatus {
    Pending,
    Passed,
    Failed(String),
}

impl EtherscanResponse {
    fn into_result(self) -> Result<String, VerificationError> {
        if self.status == "1" {
            Ok(self.result)
        } else if self.result.is_empty() {
            Err(VerificationError::Rejected(self.message))
        } else {
            Err(VerificationError::Rejected(self.result))
        }
    }

    fn check_status(&self) -> CheckStatus {
        if self.status == "1" {
            CheckStatus::Passed
        } else if self.result.to_lowercase().contains("pending") {
            CheckStatus::Pending
        } else {
            CheckStatus::Failed(self.result.clone())
        }
    }
}

impl EtherscanVerifier {
    fn submit_params(
        &self,
        request: &VerificationRequest,
    ) -> Result<Vec<(&'static str, String)>, VerificationError> {
        let source = request
            .source_code
            .clone()
            .ok_or_else(|| VerificationError::MissingSource(request.contract_name.clone()))?;
        let compiler_version = request
            .compiler_version
            .clone()
            .or_else(|| self.compiler_version.clone())
            .ok_or_else(|| {
                VerificationError::MissingCompilerVersion(request.contract_name.clone())
            })?;

        let mut params = vec![
            ("apikey", self.api_key.clone()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", request.address.to_string()),
            ("sourceCode", source),
            ("codeformat", "solidity-single-file".to_string()),
            ("contractname", request.contract_name.clone()),
            ("compilerversion", compiler_version),
            // Etherscan's spelling.
            (
                "constructorArguements",
                hex::encode(&request.constructor_arguments),
            ),
        ];
        match self.optimization_runs {
            Some(runs) => {
                params.push(("optimizationUsed", "1".to_string()));
                params.push(("runs", runs.to_string()));
            }
            None => params.push(("optimizationUsed", "0".to_string())),
        }
        Ok(params)
    }

    async fn submit(&self, request: &VerificationRequest) -> Result<String, VerificationError> {
        let params = self.submit_params(request)?;
        let response: EtherscanResponse = self
            .client
            .post(&self.api_url)
            .query(&[("chainid", self.chain_id)])
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_result()
    }

    async fn check(&self, guid: &str) -> Result<EtherscanResponse, VerificationError> {
        let chain_id = self.chain_id.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("chainid", chain_id.as_str()),
                ("apikey", self.api_key.as_str()),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

impl Explorer for EtherscanVerifier {
    async fn verify(&self, request: &VerificationRequest) -> Result<(), VerificationError> {
        let guid = self.submit(request).await?;
        debug!(@grey, "verification submitted, guid {}", guid.debug_lavender());

        for _ in 0..self.max_polls {
            tokio::time::sleep(self.poll_interval).await;
            match self.check(&guid).await?.check_status() {
                CheckStatus::Pending => debug!(@grey, "verification pending"),
                CheckStatus::Passed => return Ok(()),
                CheckStatus::Failed(reason) => return Err(VerificationError::Rejected(reason)),
            }
        }
        Err(VerificationError::Timeout {
            guid,
            polls: self.max_polls,
        })
    }
}
