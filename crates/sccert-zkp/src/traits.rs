//! # Proof Engine Trait (Sealed)
//!
//! The abstract interface a proof backend must expose to the harness:
//! field-element (de)serialization, proof creation, artifact loading,
//! and proof verification. The cryptography behind these operations is
//! opaque.
//!
//! ## Sealed Trait
//!
//! [`ProofEngine`] is **sealed**: only implementations defined within
//! `sccert-zkp` can exist. The harness's correctness argument leans on
//! engine handles being released exactly once, and sealing keeps that
//! discipline under one roof.
//!
//! ## Ownership
//!
//! Every engine-allocated object (`FieldElement`, `Proof`,
//! `VerifyingKey`) is returned as an owned value whose `Drop` performs
//! the release. Release-on-every-path — success, early validation
//! failure, or engine rejection — falls out of ordinary ownership.

use thiserror::Error;

use sccert_core::{CertificateInputs, FieldElementBytes};

use crate::artifacts::{ArtifactConfig, ArtifactLocator};

/// Error deserializing a 96-byte encoding into a field element.
#[derive(Error, Debug)]
pub enum FieldDecodeError {
    /// The bytes do not represent a valid scalar in the proof
    /// system's field.
    #[error("invalid field encoding for {field}: {reason}")]
    InvalidFieldEncoding {
        /// Name of the public input being decoded.
        field: &'static str,
        /// Engine diagnostic.
        reason: String,
    },
}

/// Error during proof creation.
#[derive(Error, Debug)]
pub enum ProofCreationError {
    /// The engine rejected the inputs or failed internally.
    #[error("proof creation failed: {0}")]
    CreationFailed(String),
    /// The proof or verification-key artifact could not be written.
    #[error("failed to write proof artifacts: {0}")]
    ArtifactWrite(String),
}

/// Error during proof verification (distinct from a clean rejection,
/// which [`ProofEngine::verify_proof`] reports as `Ok(false)`).
#[derive(Error, Debug)]
pub enum ProofVerificationError {
    /// The proof object is structurally malformed.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The verification key is incompatible with this engine.
    #[error("verification key mismatch: {0}")]
    KeyMismatch(String),
}

/// Error loading a persisted proof or verification-key artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// The locator violates the engine's path-decoding convention.
    #[error("bad artifact locator: {0}")]
    BadLocator(String),
    /// The artifact file could not be read.
    #[error("failed to load artifact {path}: {source}")]
    Io {
        /// Path of the missing or unreadable artifact.
        path: String,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },
    /// The artifact file exists but its contents are not a valid
    /// engine object.
    #[error("malformed artifact {path}: {reason}")]
    Malformed {
        /// Path of the rejected artifact.
        path: String,
        /// Engine diagnostic.
        reason: String,
    },
}

/// Private module that seals the [`ProofEngine`] trait.
mod private {
    /// Sealing marker trait. Not accessible outside `sccert-zkp`.
    pub trait Sealed {}

    impl Sealed for crate::mock::MockProofEngine {}
}

/// The engine-decoded public inputs for one certificate proof.
///
/// Pairs the byte-level certificate record with the engine's decoded
/// handles for the two field-element public inputs. The same value is
/// borrowed by both `create_proof` and `verify_proof`, which keeps the
/// two calls byte-identical by construction; the handles are released
/// when the value drops.
pub struct EngineInputs<'a, E: ProofEngine + ?Sized> {
    /// The validated byte-level public-input record.
    pub certificate: &'a CertificateInputs,
    /// Decoded `constant` public input.
    pub constant: E::FieldElement,
    /// Decoded `proof_data` public input.
    pub proof_data: E::FieldElement,
}

impl<'a, E: ProofEngine + ?Sized> EngineInputs<'a, E> {
    /// Decode the certificate's field elements through the engine.
    ///
    /// Fails with [`FieldDecodeError::InvalidFieldEncoding`] before any
    /// proof call is attempted; a handle decoded for `constant` is
    /// released by drop if `proof_data` then fails.
    pub fn decode(engine: &E, certificate: &'a CertificateInputs) -> Result<Self, FieldDecodeError> {
        let constant = engine.deserialize_field("constant", &certificate.constant)?;
        let proof_data = engine.deserialize_field("proof_data", &certificate.proof_data)?;
        Ok(Self {
            certificate,
            constant,
            proof_data,
        })
    }
}

/// Sealed interface for a zero-knowledge proof backend.
///
/// The four capabilities of the reference engine surface: deserialize/
/// serialize field elements, create a proof (persisting the proof and
/// verification-key artifacts), load persisted artifacts, and verify.
/// All calls are blocking and synchronous; the harness assumes they
/// terminate.
pub trait ProofEngine: private::Sealed + Send + Sync {
    /// Opaque decoded field element. Released on drop.
    type FieldElement;
    /// Opaque proof object. Released on drop.
    type Proof;
    /// Opaque verification-key object. Released on drop.
    type VerifyingKey;

    /// Deserialize a canonical 96-byte encoding into a field element.
    ///
    /// `field` names the public input in diagnostics.
    fn deserialize_field(
        &self,
        field: &'static str,
        bytes: &FieldElementBytes,
    ) -> Result<Self::FieldElement, FieldDecodeError>;

    /// Serialize a field element back to its canonical encoding.
    fn serialize_field(&self, element: &Self::FieldElement) -> FieldElementBytes;

    /// Create a proof over the decoded inputs, writing the proof and
    /// verification-key artifacts to the configured locators.
    fn create_proof(
        &self,
        inputs: &EngineInputs<'_, Self>,
        artifacts: &ArtifactConfig,
    ) -> Result<(), ProofCreationError>;

    /// Load a persisted proof artifact.
    fn load_proof(&self, locator: &ArtifactLocator) -> Result<Self::Proof, ArtifactError>;

    /// Load a persisted verification-key artifact.
    fn load_verifying_key(
        &self,
        locator: &ArtifactLocator,
    ) -> Result<Self::VerifyingKey, ArtifactError>;

    /// Verify a proof against the decoded inputs.
    ///
    /// Returns `Ok(false)` for a well-formed proof that does not match
    /// the inputs; `Err` only for structural failures.
    fn verify_proof(
        &self,
        inputs: &EngineInputs<'_, Self>,
        proof: &Self::Proof,
        key: &Self::VerifyingKey,
    ) -> Result<bool, ProofVerificationError>;
}
