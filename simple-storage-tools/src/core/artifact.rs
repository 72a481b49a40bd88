// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts are produced by an external toolchain. [`ArtifactDir`] reads the JSON files written
//! by Hardhat (`artifacts/`) or Foundry (`out/`), and falls back to compiling the contract source
//! with `solc` when no artifact exists yet.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::utils::{
    color::DebugColor,
    decode0x,
    solc::{self, SolcError},
};

/// Everything needed to deploy and verify one contract.
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: JsonAbi,
    /// Creation bytecode.
    pub bytecode: Bytes,
    /// Path of the source file relative to the project root, e.g. `contracts/SimpleStorage.sol`.
    pub source_name: Option<String>,
    pub source: Option<String>,
    /// Compiler version in block explorer form (`v0.8.24+commit.e11b9ed9`).
    pub compiler_version: Option<String>,
}

impl ContractArtifact {
    pub fn new(name: impl Into<String>, abi: JsonAbi, bytecode: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            abi,
            bytecode: bytecode.into(),
            source_name: None,
            source: None,
            compiler_version: None,
        }
    }

    /// Builds an artifact from human readable ABI signatures.
    pub fn from_signatures<'a>(
        name: impl Into<String>,
        signatures: impl IntoIterator<Item = &'a str>,
        bytecode: impl Into<Bytes>,
    ) -> Result<Self, CompilationError> {
        let abi =
            JsonAbi::parse(signatures).map_err(|err| CompilationError::InvalidAbi(err.to_string()))?;
        Self::new(name, abi, bytecode).checked()
    }

    pub fn with_source(mut self, source_name: impl Into<String>, source: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self.source = Some(source.into());
        self
    }

    pub fn with_compiler_version(mut self, version: impl Into<String>) -> Self {
        self.compiler_version = Some(version.into());
        self
    }

    /// Ensures the artifact carries deployable code.
    fn checked(self) -> Result<Self, CompilationError> {
        if self.bytecode.is_empty() {
            return Err(CompilationError::EmptyBytecode(self.name));
        }
        Ok(self)
    }
}

/// Source of contract factories, keyed by contract name.
pub trait ArtifactSource {
    fn artifact(&self, name: &str) -> Result<ContractArtifact, CompilationError>;
}

impl ArtifactSource for ContractArtifact {
    fn artifact(&self, name: &str) -> Result<ContractArtifact, CompilationError> {
        if self.name == name {
            Ok(self.clone())
        } else {
            Err(CompilationError::NotFound {
                name: name.to_string(),
                root: PathBuf::new(),
            })
        }
    }
}

impl<T: ArtifactSource + ?Sized> ArtifactSource for &T {
    fn artifact(&self, name: &str) -> Result<ContractArtifact, CompilationError> {
        (**self).artifact(name)
    }
}

/// Artifacts on disk, as written by Hardhat or Foundry.
#[derive(Clone, Debug)]
pub struct ArtifactDir {
    root: PathBuf,
    project_root: PathBuf,
    contracts: PathBuf,
}

impl ArtifactDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            project_root: PathBuf::from("."),
            contracts: PathBuf::from("contracts"),
        }
    }

    /// Directory that `sourceName` entries are relative to.
    pub fn with_project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.project_root = project_root.into();
        self
    }

    /// Directory holding `<Name>.sol` sources, used for solc compilation and verification.
    pub fn with_contracts(mut self, contracts: impl Into<PathBuf>) -> Self {
        self.contracts = contracts.into();
        self
    }

    fn find(&self, name: &str) -> Result<Option<PathBuf>, CompilationError> {
        let pattern = self
            .root
            .join("**")
            .join(format!("{name}.json"))
            .to_string_lossy()
            .into_owned();
        let found = glob::glob(&pattern)?.filter_map(Result::ok).next();
        Ok(found)
    }

    fn load(&self, path: &Path, name: &str) -> Result<ContractArtifact, CompilationError> {
        debug!(@grey, "reading artifact {}", path.debug_lavender());
        let json = fs::read_to_string(path).map_err(|source| CompilationError::Read {
            path: path.to_owned(),
            source,
        })?;
        let raw: RawArtifact =
            serde_json::from_str(&json).map_err(|source| CompilationError::Malformed {
                path: path.to_owned(),
                source,
            })?;

        let bytecode = decode0x(raw.bytecode.as_hex()).map_err(|source| {
            CompilationError::InvalidBytecode {
                name: name.to_string(),
                source,
            }
        })?;
        let compiler_version = raw
            .metadata
            .as_ref()
            .and_then(metadata_compiler_version)
            .or_else(|| hardhat_compiler_version(path))
            .and_then(|version| solc::explorer_compiler_version(&version));
        let name = raw.contract_name.unwrap_or_else(|| name.to_string());
        let mut artifact = ContractArtifact::new(name, raw.abi, bytecode).checked()?;
        if let Some((source_name, source)) = self.read_source(&artifact.name, raw.source_name) {
            artifact = artifact.with_source(source_name, source);
        }
        match compiler_version {
            Some(version) => artifact = artifact.with_compiler_version(version),
            None => debug!(@grey, "no compiler version recorded for {}", artifact.name),
        }
        Ok(artifact)
    }

    fn read_source(&self, name: &str, source_name: Option<String>) -> Option<(String, String)> {
        if let Some(source_name) = source_name {
            if let Ok(source) = fs::read_to_string(self.project_root.join(&source_name)) {
                return Some((source_name, source));
            }
        }
        let path = self.contracts.join(format!("{name}.sol"));
        let source = fs::read_to_string(&path).ok()?;
        Some((path.to_string_lossy().into_owned(), source))
    }

    fn compile(&self, path: &Path, name: &str) -> Result<ContractArtifact, CompilationError> {
        info!(@grey, "no artifact for {name}, compiling {} with solc", path.display());
        let compiled = solc::compile(path, name)?;
        let abi: JsonAbi = serde_json::from_value(compiled.abi)
            .map_err(|err| CompilationError::InvalidAbi(err.to_string()))?;
        let bytecode = decode0x(&compiled.bin).map_err(|source| {
            CompilationError::InvalidBytecode {
                name: name.to_string(),
                source,
            }
        })?;
        let source = fs::read_to_string(path).map_err(|source| CompilationError::Read {
            path: path.to_owned(),
            source,
        })?;

        let mut artifact = ContractArtifact::new(name, abi, bytecode)
            .checked()?
            .with_source(path.to_string_lossy(), source);
        if let Some(version) = compiled
            .version
            .as_deref()
            .and_then(solc::explorer_compiler_version)
        {
            artifact = artifact.with_compiler_version(version);
        }
        Ok(artifact)
    }
}

impl ArtifactSource for ArtifactDir {
    fn artifact(&self, name: &str) -> Result<ContractArtifact, CompilationError> {
        if let Some(path) = self.find(name)? {
            return self.load(&path, name);
        }
        let source = self.contracts.join(format!("{name}.sol"));
        if source.exists() {
            return self.compile(&source, name);
        }
        Err(CompilationError::NotFound {
            name: name.to_string(),
            root: self.root.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: Option<String>,
    source_name: Option<String>,
    abi: JsonAbi,
    bytecode: RawBytecode,
    /// Foundry embeds the solc metadata, as an object or as its JSON encoding.
    metadata: Option<serde_json::Value>,
}

/// Reads `compiler.version` from solc metadata.
fn metadata_compiler_version(metadata: &serde_json::Value) -> Option<String> {
    if let Some(encoded) = metadata.as_str() {
        let decoded: serde_json::Value = serde_json::from_str(encoded).ok()?;
        return metadata_compiler_version(&decoded);
    }
    metadata
        .pointer("/compiler/version")?
        .as_str()
        .map(str::to_string)
}

/// Hardhat keeps the compiler version in the build info that `<Name>.dbg.json` points to.
fn hardhat_compiler_version(artifact: &Path) -> Option<String> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DebugFile {
        build_info: PathBuf,
    }
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct BuildInfo {
        solc_long_version: String,
    }

    let dir = artifact.parent()?;
    let dbg_path = artifact.with_extension("dbg.json");
    let dbg: DebugFile = serde_json::from_str(&fs::read_to_string(dbg_path).ok()?).ok()?;
    let build_info: BuildInfo =
        serde_json::from_str(&fs::read_to_string(dir.join(dbg.build_info)).ok()?).ok()?;
    Some(build_info.solc_long_version)
}

/// Hardhat stores bytecode as a hex string, Foundry as `{ "object": "0x..." }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn as_hex(&self) -> &str {
        match self {
            Self::Hex(hex) => hex,
            Self::Object { object } => object,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompilationError {
    #[error("artifact for contract {name} not found under {}", .root.display())]
    NotFound { name: String, root: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed artifact {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid bytecode for contract {name}: {source}")]
    InvalidBytecode {
        name: String,
        source: hex::FromHexError,
    },
    #[error("contract {0} has no creation bytecode (is it abstract or an interface?)")]
    EmptyBytecode(String),
    #[error("invalid abi: {0}")]
    InvalidAbi(String),
    #[error("contract {contract} is missing function {function}")]
    MissingFunction { contract: String, function: String },
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("{0}")]
    Solc(#[from] SolcError),
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABI: &str = r#"[
        {"type":"function","name":"retrieve","inputs":[],"outputs":[{"name":"","type":"uint256","internalType":"uint256"}],"stateMutability":"view"},
        {"type":"function","name":"store","inputs":[{"name":"favoriteNumber","type":"uint256","internalType":"uint256"}],"outputs":[],"stateMutability":"nonpayable"}
    ]"#;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn loads_hardhat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = dir.path().join("artifacts");
        write(
            &artifacts.join("contracts/SimpleStorage.sol/SimpleStorage.json"),
            &format!(
                r#"{{"_format":"hh-sol-artifact-1","contractName":"SimpleStorage","sourceName":"contracts/SimpleStorage.sol","abi":{ABI},"bytecode":"0x6080","deployedBytecode":"0x"}}"#
            ),
        );
        write(
            &artifacts.join("contracts/SimpleStorage.sol/SimpleStorage.dbg.json"),
            r#"{"_format":"hh-sol-dbg-1","buildInfo":"../../build-info/x.json"}"#,
        );
        write(
            &artifacts.join("build-info/x.json"),
            r#"{"_format":"hh-sol-build-info-1","solcVersion":"0.8.8","solcLongVersion":"0.8.8+commit.dddeac2f"}"#,
        );
        write(
            &dir.path().join("contracts/SimpleStorage.sol"),
            "contract SimpleStorage {}",
        );

        let artifact = ArtifactDir::new(&artifacts)
            .with_project_root(dir.path())
            .artifact("SimpleStorage")
            .unwrap();
        assert_eq!(artifact.name, "SimpleStorage");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80]);
        assert!(artifact.abi.function("store").is_some());
        assert_eq!(
            artifact.source_name.as_deref(),
            Some("contracts/SimpleStorage.sol")
        );
        assert_eq!(artifact.source.as_deref(), Some("contract SimpleStorage {}"));
        assert_eq!(
            artifact.compiler_version.as_deref(),
            Some("v0.8.8+commit.dddeac2f")
        );
    }

    #[test]
    fn loads_foundry_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("out/SimpleStorage.sol/SimpleStorage.json"),
            &format!(
                r#"{{"abi":{ABI},"bytecode":{{"object":"0x6001","linkReferences":{{}}}},"metadata":{{"compiler":{{"version":"0.8.24+commit.e11b9ed9"}},"language":"Solidity"}}}}"#
            ),
        );
        write(
            &dir.path().join("out/Encoded.sol/Encoded.json"),
            &format!(
                r#"{{"abi":{ABI},"bytecode":{{"object":"0x6001"}},"metadata":"{{\"compiler\":{{\"version\":\"0.8.20+commit.a1b79de6\"}}}}"}}"#
            ),
        );

        let artifact = ArtifactDir::new(dir.path().join("out"))
            .with_contracts(dir.path().join("contracts"))
            .artifact("SimpleStorage")
            .unwrap();
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x01]);
        assert!(artifact.source.is_none());
        assert_eq!(
            artifact.compiler_version.as_deref(),
            Some("v0.8.24+commit.e11b9ed9")
        );

        let encoded = ArtifactDir::new(dir.path().join("out"))
            .artifact("Encoded")
            .unwrap();
        assert_eq!(
            encoded.compiler_version.as_deref(),
            Some("v0.8.20+commit.a1b79de6")
        );
    }

    #[test]
    fn compiler_version_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("SimpleStorage.json"),
            &format!(r#"{{"abi":{ABI},"bytecode":"0x6080"}}"#),
        );
        let artifact = ArtifactDir::new(dir.path())
            .with_contracts(dir.path())
            .artifact("SimpleStorage")
            .unwrap();
        assert!(artifact.compiler_version.is_none());
    }

    #[test]
    fn missing_artifact_is_a_compilation_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArtifactDir::new(dir.path().join("artifacts"))
            .with_contracts(dir.path().join("contracts"))
            .artifact("SimpleStorage")
            .unwrap_err();
        assert!(matches!(err, CompilationError::NotFound { .. }));
    }

    #[test]
    fn rejects_abstract_and_malformed_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("Abstract.json"),
            &format!(r#"{{"abi":{ABI},"bytecode":"0x"}}"#),
        );
        write(&dir.path().join("Broken.json"), "{ not json");
        write(
            &dir.path().join("BadHex.json"),
            &format!(r#"{{"abi":{ABI},"bytecode":"0xzz"}}"#),
        );

        let artifacts = ArtifactDir::new(dir.path()).with_contracts(dir.path());
        assert!(matches!(
            artifacts.artifact("Abstract"),
            Err(CompilationError::EmptyBytecode(_))
        ));
        assert!(matches!(
            artifacts.artifact("Broken"),
            Err(CompilationError::Malformed { .. })
        ));
        assert!(matches!(
            artifacts.artifact("BadHex"),
            Err(CompilationError::InvalidBytecode { .. })
        ));
    }

    #[test]
    fn in_memory_artifact_is_keyed_by_name() {
        let artifact = ContractArtifact::from_signatures(
            "SimpleStorage",
            ["function retrieve() view returns (uint256)"],
            vec![0x00],
        )
        .unwrap();
        assert!(artifact.artifact("SimpleStorage").is_ok());
        assert!(matches!(
            artifact.artifact("FundMe"),
            Err(CompilationError::NotFound { .. })
        ));
    }
}
