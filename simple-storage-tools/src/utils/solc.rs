// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Thin wrapper over the `solc` command line compiler.

use std::{collections::HashMap, path::Path, process::Command};

use regex::Regex;
use serde::Deserialize;

use super::{color::Color, sys};
use crate::error::CommandFailure;

const LINK: &str = "https://docs.soliditylang.org/en/latest/installing-solidity.html";

pub fn check_exists() -> Result<(), SolcError> {
    if sys::command_exists("solc") {
        Ok(())
    } else {
        Err(SolcError::CommandDoesNotExist)
    }
}

/// A single contract out of `solc --combined-json abi,bin`.
#[derive(Debug)]
pub struct CompiledContract {
    pub abi: serde_json::Value,
    pub bin: String,
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CombinedJson {
    contracts: HashMap<String, CombinedContract>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CombinedContract {
    abi: serde_json::Value,
    bin: String,
}

/// Compiles `source` and returns the contract called `name`.
pub fn compile(source: &Path, name: &str) -> Result<CompiledContract, SolcError> {
    check_exists()?;
    let output = Command::new("solc")
        .arg("--combined-json")
        .arg("abi,bin")
        .arg(source)
        .output()?;
    let stdout = CommandFailure::check("solc", output)?;
    parse_combined_json(&stdout, name)
}

fn parse_combined_json(json: &str, name: &str) -> Result<CompiledContract, SolcError> {
    let combined: CombinedJson = serde_json::from_str(json)?;
    let suffix = format!(":{name}");
    let contract = combined
        .contracts
        .into_iter()
        .find(|(key, _)| key.ends_with(&suffix) || key == name)
        .map(|(_, contract)| contract)
        .ok_or_else(|| SolcError::ContractNotInOutput(name.to_string()))?;

    // Older compilers emit the ABI as a JSON string.
    let abi = match contract.abi {
        serde_json::Value::String(s) => serde_json::from_str(&s)?,
        abi => abi,
    };
    Ok(CompiledContract {
        abi,
        bin: contract.bin,
        version: combined.version,
    })
}

/// Normalizes a solc version string (`0.8.24+commit.e11b9ed9.Linux.g++`) to the form block
/// explorers expect (`v0.8.24+commit.e11b9ed9`).
pub fn explorer_compiler_version(version: &str) -> Option<String> {
    let re = Regex::new(r"v?(\d+\.\d+\.\d+\+commit\.[0-9a-f]{8})").ok()?;
    re.captures(version)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("v{}", m.as_str()))
}

#[derive(Debug, thiserror::Error)]
pub enum SolcError {
    #[error("solc not found. Please see\n{link}", link = LINK.red())]
    CommandDoesNotExist,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    CommandFailure(#[from] CommandFailure),
    #[error("failed to parse solc output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("contract {0} not found in solc output")]
    ContractNotInOutput(String),
}
