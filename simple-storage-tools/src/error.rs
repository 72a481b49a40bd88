// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::process::Output;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Umbrella error for callers that drive several stages and do not care which one failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Compilation(#[from] crate::core::artifact::CompilationError),
    #[error("{0}")]
    Chain(#[from] crate::core::chain::ChainError),
    #[error("{0}")]
    Verification(#[from] crate::core::verification::VerificationError),
    #[error("{0}")]
    Deployment(#[from] crate::core::deployment::DeploymentError),
}

/// Output of an external process that exited unsuccessfully.
#[derive(Debug, thiserror::Error)]
#[error("{process_name} failed (exit code: {exit_code:?}): {stderr}")]
pub struct CommandFailure {
    pub process_name: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandFailure {
    /// Returns stdout of a successful process, or the failure details.
    pub fn check(process_name: impl Into<String>, output: Output) -> Result<String, Self> {
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(CommandFailure {
                process_name: process_name.into(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                exit_code: output.status.code(),
            })
        }
    }
}
