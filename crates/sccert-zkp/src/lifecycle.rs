//! # Proof Lifecycle Controller
//!
//! Drives the create → (persist/reload) → verify protocol against a
//! proof engine and owns the lifetimes of every engine-allocated
//! object along the way.
//!
//! ## State Machine (per invocation)
//!
//! ```text
//! Start ──decode fields──▶ Assembled ──create_proof──▶ Created
//! Created ──(no verify)──▶ Done
//! Created ──load proof, load key──▶ Loaded ──verify_proof──▶ Verified
//! any engine rejection ──▶ Failed
//! ```
//!
//! Terminal states release every opaque object exactly once; the
//! handles are owned values, so early returns on failure paths release
//! through `Drop` like every other path.
//!
//! ## Byte-Identity Contract
//!
//! `create_proof` and `verify_proof` must see byte-identical inputs for
//! verification to be meaningful. The controller enforces this by
//! passing the same decoded [`EngineInputs`] value to both calls and
//! never mutating it in between.

use thiserror::Error;

use sccert_core::CertificateInputs;

use crate::artifacts::ArtifactConfig;
use crate::traits::{
    ArtifactError, EngineInputs, FieldDecodeError, ProofCreationError, ProofEngine,
    ProofVerificationError,
};

/// Terminal success state of one lifecycle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A proof was created and persisted; verification was not requested.
    Created,
    /// A proof was created, reloaded, and verified against the inputs.
    Verified,
}

/// A lifecycle run that ended in the `Failed` state.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// A public field element's bytes were rejected by the engine,
    /// before any proof call was attempted.
    #[error(transparent)]
    InvalidFieldEncoding(#[from] FieldDecodeError),

    /// The engine rejected proof creation.
    #[error(transparent)]
    ProofCreationFailed(#[from] ProofCreationError),

    /// The persisted proof or verification key could not be loaded.
    #[error(transparent)]
    ArtifactLoadFailed(#[from] ArtifactError),

    /// The engine judged the proof invalid for these inputs.
    #[error("proof verification failed: the proof does not match the certificate inputs")]
    ProofVerificationFailed,

    /// Verification could not be carried out at all.
    #[error(transparent)]
    VerificationError(#[from] ProofVerificationError),
}

/// Orchestrates the create/verify protocol for one engine.
///
/// Single-threaded, synchronous, run-to-completion: every engine call
/// blocks until it returns, and no state persists across runs.
pub struct ProofLifecycle<'e, E: ProofEngine> {
    engine: &'e E,
    artifacts: ArtifactConfig,
}

impl<'e, E: ProofEngine> ProofLifecycle<'e, E> {
    /// Build a controller over an engine and artifact configuration.
    pub fn new(engine: &'e E, artifacts: ArtifactConfig) -> Self {
        Self { engine, artifacts }
    }

    /// The artifact configuration this controller reads and writes.
    pub fn artifacts(&self) -> &ArtifactConfig {
        &self.artifacts
    }

    /// Run the full protocol: create a proof over `certificate` and,
    /// if `verify` is set, reload the persisted artifacts and verify
    /// with the identical inputs.
    pub fn run(
        &self,
        certificate: &CertificateInputs,
        verify: bool,
    ) -> Result<Outcome, LifecycleError> {
        let inputs = EngineInputs::decode(self.engine, certificate)?;
        tracing::debug!(quality = certificate.quality, "inputs assembled");

        self.engine.create_proof(&inputs, &self.artifacts)?;
        tracing::info!(
            proof = %self.artifacts.proof.path().display(),
            vk = %self.artifacts.vk.path().display(),
            "proof created"
        );

        if !verify {
            return Ok(Outcome::Created);
        }
        self.verify_with(&inputs)
    }

    /// Verify the persisted artifacts against `certificate` without
    /// creating a new proof.
    ///
    /// The reference repository shipped this as a second near-duplicate
    /// driver; here it is the verify half of the one protocol.
    pub fn verify_only(&self, certificate: &CertificateInputs) -> Result<Outcome, LifecycleError> {
        let inputs = EngineInputs::decode(self.engine, certificate)?;
        self.verify_with(&inputs)
    }

    fn verify_with(&self, inputs: &EngineInputs<'_, E>) -> Result<Outcome, LifecycleError> {
        let proof = self.engine.load_proof(&self.artifacts.proof)?;
        let key = self.engine.load_verifying_key(&self.artifacts.vk)?;
        tracing::debug!("proof and verification key loaded");

        if self.engine.verify_proof(inputs, &proof, &key)? {
            tracing::info!("proof verified");
            Ok(Outcome::Verified)
        } else {
            Err(LifecycleError::ProofVerificationFailed)
        }
    }
}
