// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network presets and the predicate deciding whether explorer verification runs.

/// Chain id of Hardhat's in-process network and of local Hardhat/anvil nodes.
pub const HARDHAT_CHAIN_ID: u64 = 31_337;
/// Chain id of the Sepolia public testnet.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Default RPC endpoint of a local development node.
pub const LOCALHOST_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Etherscan API endpoint (v2, multichain).
pub const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Network {
    /// In-process simulated chain, recreated on every run.
    #[default]
    Hardhat,
    /// Development node listening on localhost.
    Localhost,
    /// Sepolia public testnet.
    Sepolia,
}

impl Network {
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Hardhat | Self::Localhost => HARDHAT_CHAIN_ID,
            Self::Sepolia => SEPOLIA_CHAIN_ID,
        }
    }

    /// Endpoint used when none is configured.
    pub fn default_endpoint(self) -> Option<&'static str> {
        match self {
            Self::Localhost => Some(LOCALHOST_ENDPOINT),
            Self::Hardhat | Self::Sepolia => None,
        }
    }

    pub fn is_simulated(self) -> bool {
        matches!(self, Self::Hardhat)
    }
}

/// Decides whether a deployment is submitted to a block explorer for verification.
///
/// Verification only makes sense on a persistent public network that an explorer indexes, so it
/// runs only when the chain being targeted reports `chain_id` and an API key is available.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerificationPolicy {
    pub chain_id: u64,
    pub api_key: Option<String>,
}

impl VerificationPolicy {
    pub fn new(chain_id: u64, api_key: Option<String>) -> Self {
        Self { chain_id, api_key }
    }

    /// Verify on Sepolia when `api_key` is set.
    pub fn sepolia(api_key: Option<String>) -> Self {
        Self::new(SEPOLIA_CHAIN_ID, api_key)
    }

    /// Never verify.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// `actual_chain_id` is the id reported by the chain, not the configured one.
    pub fn should_verify(&self, actual_chain_id: u64) -> bool {
        let has_key = self
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        has_key && self.chain_id != 0 && actual_chain_id == self.chain_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_on_target_chain_with_key() {
        let policy = VerificationPolicy::sepolia(Some("KEY".into()));
        assert!(policy.should_verify(SEPOLIA_CHAIN_ID));
        assert!(!policy.should_verify(HARDHAT_CHAIN_ID));
        assert!(!policy.should_verify(1));
    }

    #[test]
    fn missing_or_blank_key_disables_verification() {
        assert!(!VerificationPolicy::sepolia(None).should_verify(SEPOLIA_CHAIN_ID));
        assert!(!VerificationPolicy::sepolia(Some("  ".into())).should_verify(SEPOLIA_CHAIN_ID));
    }

    #[test]
    fn disabled_policy_never_verifies() {
        let policy = VerificationPolicy::disabled();
        assert!(!policy.should_verify(0));
        assert!(!policy.should_verify(SEPOLIA_CHAIN_ID));
    }

    #[test]
    fn presets() {
        assert!(Network::default().is_simulated());
        assert_eq!(Network::Sepolia.chain_id(), SEPOLIA_CHAIN_ID);
        assert_eq!(Network::Localhost.default_endpoint(), Some(LOCALHOST_ENDPOINT));
        assert_eq!(Network::Sepolia.default_endpoint(), None);
    }
}
