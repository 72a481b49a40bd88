// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{cell::RefCell, collections::HashSet, rc::Rc};

use alloy::primitives::Address;

use crate::core::verification::{Explorer, VerificationError, VerificationRequest};

/// Message an explorer answers with when the address already has published source.
pub const ALREADY_VERIFIED: &str = "Contract source code already verified";

#[derive(Debug, Default)]
struct ExplorerState {
    verified: HashSet<Address>,
    requests: Vec<VerificationRequest>,
    failure: Option<String>,
}

/// In-memory explorer. Clones share the same records.
///
/// The first request for an address succeeds and later ones are answered with
/// [`ALREADY_VERIFIED`], the way Etherscan does.
#[derive(Clone, Debug, Default)]
pub struct SimulatedExplorer {
    state: Rc<RefCell<ExplorerState>>,
}

impl SimulatedExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every following request with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.state.borrow_mut().failure = Some(reason.into());
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<VerificationRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn is_verified(&self, address: Address) -> bool {
        self.state.borrow().verified.contains(&address)
    }
}

impl Explorer for SimulatedExplorer {
    async fn verify(&self, request: &VerificationRequest) -> Result<(), VerificationError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        if let Some(reason) = &state.failure {
            return Err(VerificationError::Rejected(reason.clone()));
        }
        if !state.verified.insert(request.address) {
            return Err(VerificationError::Rejected(ALREADY_VERIFIED.to_string()));
        }
        Ok(())
    }
}
