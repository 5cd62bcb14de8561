//! # Artifact Locators — Persisted Proof and Key Files
//!
//! The harness persists two engine-opaque binary files: the proof and
//! the verification key. Their byte layout belongs to the engine; the
//! harness contract is only the path strings and the path length each
//! locator declares to the engine's path-decoding convention.
//!
//! The reference deployment uses fixed relative paths with hard-coded
//! length literals; here they are named constants on a typed
//! configuration, overridable per run.

use std::path::{Path, PathBuf};

/// Default location of the persisted proof artifact.
pub const DEFAULT_PROOF_PATH: &str = "./test_mc_proof";

/// Default location of the persisted verification-key artifact.
pub const DEFAULT_VK_PATH: &str = "./test_mc_vk";

/// Declared path length of [`DEFAULT_PROOF_PATH`]: the character count
/// the engine reads before appending its nul terminator.
pub const DEFAULT_PROOF_PATH_LEN: usize = 15;

/// Declared path length of [`DEFAULT_VK_PATH`].
pub const DEFAULT_VK_PATH_LEN: usize = 12;

/// A storage locator for one engine-opaque artifact.
///
/// Carries the filesystem path together with the path length declared
/// to the engine. The two must agree; engines reject locators whose
/// declared length does not match the path they decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocator {
    path: PathBuf,
    declared_len: usize,
}

impl ArtifactLocator {
    /// Build a locator whose declared length is derived from the path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let declared_len = path.as_os_str().len();
        Self { path, declared_len }
    }

    /// Build a locator with an explicitly declared length.
    ///
    /// Exists for exercising the engine-side consistency check; prefer
    /// [`ArtifactLocator::new`].
    pub fn with_declared_len(path: impl Into<PathBuf>, declared_len: usize) -> Self {
        Self {
            path: path.into(),
            declared_len,
        }
    }

    /// The filesystem path of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path length declared to the engine.
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Whether the declared length matches the path's character count.
    pub fn is_consistent(&self) -> bool {
        self.declared_len == self.path.as_os_str().len()
    }
}

/// Locations of the proof and verification-key artifacts for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    /// Locator of the proof artifact.
    pub proof: ArtifactLocator,
    /// Locator of the verification-key artifact.
    pub vk: ArtifactLocator,
}

impl ArtifactConfig {
    /// Build a configuration from explicit proof and key paths.
    pub fn new(proof_path: impl Into<PathBuf>, vk_path: impl Into<PathBuf>) -> Self {
        Self {
            proof: ArtifactLocator::new(proof_path),
            vk: ArtifactLocator::new(vk_path),
        }
    }
}

impl Default for ArtifactConfig {
    /// The fixed reference locations.
    fn default() -> Self {
        Self::new(DEFAULT_PROOF_PATH, DEFAULT_VK_PATH)
    }
}
