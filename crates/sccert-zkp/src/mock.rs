//! # Mock Proof Engine
//!
//! A deterministic, transparent engine standing in for a real SNARK
//! backend. Proof commitments are SHA-256 digests of the canonical
//! public-input bytes — verifiable, reproducible, and **providing no
//! zero-knowledge guarantees**.
//!
//! ## How It Works
//!
//! - `create_proof()` computes `SHA256(domain_tag || public_bytes)` and
//!   persists the commitment (proof artifact) and circuit tag (key
//!   artifact) as JSON files.
//! - `verify_proof()` recomputes the digest and compares, after checking
//!   the proof/key circuit binding.
//! - `deserialize_field()` accepts a 96-byte buffer iff the two most
//!   significant bits of the final byte are clear — the mock's stand-in
//!   for the real field-modulus range check. The all-zero buffer is a
//!   valid (zero) element.
//!
//! ## Handle Ledger
//!
//! Every handle the engine allocates (field element, proof, key)
//! registers with a shared [`HandleLedger`]; the handle's `Drop`
//! registers the matching release. Tests assert the ledger balances on
//! every exit path, making the release-exactly-once contract
//! observable rather than assumed.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use sccert_core::FieldElementBytes;

use crate::artifacts::{ArtifactConfig, ArtifactLocator};
use crate::traits::{
    ArtifactError, EngineInputs, FieldDecodeError, ProofCreationError, ProofEngine,
    ProofVerificationError,
};

/// Domain separation tag mixed into every mock commitment.
const COMMITMENT_DOMAIN_TAG: &[u8] = b"sccert-mock-proof-v1";

/// Identifier of the mock's only circuit; binds proofs to keys.
const CIRCUIT_TAG: &str = "sccert-mc-test-circuit-v1";

/// Mask of the field-encoding bits that must be clear in the most
/// significant byte for the mock's range check to pass.
const FIELD_RANGE_MASK: u8 = 0xc0;

/// The kinds of opaque objects the mock engine allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// A decoded field element.
    Field,
    /// A loaded proof.
    Proof,
    /// A loaded verification key.
    Key,
}

/// Allocation/release counters for one handle kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleCounts {
    /// Handles allocated so far.
    pub allocated: usize,
    /// Handles released so far.
    pub released: usize,
}

/// Shared instrumentation for engine handle lifetimes.
///
/// Counts allocations and releases per handle kind. A balanced ledger
/// (`allocated == released` for every kind) after a run proves that
/// every engine object was released exactly once.
#[derive(Debug, Default)]
pub struct HandleLedger {
    field_allocated: AtomicUsize,
    field_released: AtomicUsize,
    proof_allocated: AtomicUsize,
    proof_released: AtomicUsize,
    key_allocated: AtomicUsize,
    key_released: AtomicUsize,
}

impl HandleLedger {
    fn note_alloc(&self, kind: HandleKind) {
        match kind {
            HandleKind::Field => &self.field_allocated,
            HandleKind::Proof => &self.proof_allocated,
            HandleKind::Key => &self.key_allocated,
        }
        .fetch_add(1, Ordering::SeqCst);
    }

    fn note_release(&self, kind: HandleKind) {
        match kind {
            HandleKind::Field => &self.field_released,
            HandleKind::Proof => &self.proof_released,
            HandleKind::Key => &self.key_released,
        }
        .fetch_add(1, Ordering::SeqCst);
    }

    /// Current counters for one handle kind.
    pub fn counts(&self, kind: HandleKind) -> HandleCounts {
        let (allocated, released) = match kind {
            HandleKind::Field => (&self.field_allocated, &self.field_released),
            HandleKind::Proof => (&self.proof_allocated, &self.proof_released),
            HandleKind::Key => (&self.key_allocated, &self.key_released),
        };
        HandleCounts {
            allocated: allocated.load(Ordering::SeqCst),
            released: released.load(Ordering::SeqCst),
        }
    }

    /// Whether every allocation has been matched by exactly one release.
    pub fn is_balanced(&self) -> bool {
        [HandleKind::Field, HandleKind::Proof, HandleKind::Key]
            .iter()
            .all(|kind| {
                let c = self.counts(*kind);
                c.allocated == c.released
            })
    }
}

/// RAII registration of one engine handle with the ledger.
#[derive(Debug)]
struct HandleGuard {
    ledger: Arc<HandleLedger>,
    kind: HandleKind,
}

impl HandleGuard {
    fn acquire(ledger: &Arc<HandleLedger>, kind: HandleKind) -> Self {
        ledger.note_alloc(kind);
        Self {
            ledger: Arc::clone(ledger),
            kind,
        }
    }
}

impl Drop for HandleGuard {
    fn drop(&mut self) {
        self.ledger.note_release(self.kind);
    }
}

/// A decoded mock field element.
///
/// Holds the canonical encoding it was decoded from; equality compares
/// encodings, mirroring the reference engine's field equality check.
#[derive(Debug)]
pub struct MockFieldElement {
    bytes: FieldElementBytes,
    _guard: HandleGuard,
}

impl MockFieldElement {
    /// The canonical encoding of this element.
    pub fn encoding(&self) -> &FieldElementBytes {
        &self.bytes
    }
}

impl PartialEq for MockFieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for MockFieldElement {}

/// Wire form of the persisted proof artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ProofArtifact {
    /// Hex-encoded SHA-256 commitment over the public-input bytes.
    commitment: String,
    /// Circuit tag binding this proof to its verification key.
    circuit: String,
}

/// Wire form of the persisted verification-key artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct KeyArtifact {
    /// Circuit tag this key verifies.
    circuit: String,
}

/// A loaded mock proof.
#[derive(Debug)]
pub struct MockProof {
    artifact: ProofArtifact,
    _guard: HandleGuard,
}

impl MockProof {
    /// The hex-encoded commitment carried by this proof.
    pub fn commitment(&self) -> &str {
        &self.artifact.commitment
    }
}

/// A loaded mock verification key.
#[derive(Debug)]
pub struct MockVerifyingKey {
    artifact: KeyArtifact,
    _guard: HandleGuard,
}

/// The deterministic mock engine.
///
/// Stateless apart from its handle ledger; safe to share across calls
/// within a run.
#[derive(Debug, Default)]
pub struct MockProofEngine {
    ledger: Arc<HandleLedger>,
}

impl MockProofEngine {
    /// Create an engine with a fresh ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine's handle ledger, for lifetime assertions in tests.
    pub fn ledger(&self) -> &HandleLedger {
        &self.ledger
    }

    fn commitment_hex(inputs: &EngineInputs<'_, Self>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(COMMITMENT_DOMAIN_TAG);
        hasher.update(inputs.certificate.to_public_bytes());
        hex::encode(hasher.finalize())
    }

    fn locator_path(locator: &ArtifactLocator) -> Result<String, ArtifactError> {
        if !locator.is_consistent() {
            return Err(ArtifactError::BadLocator(format!(
                "declared length {} does not match path {:?}",
                locator.declared_len(),
                locator.path()
            )));
        }
        Ok(locator.path().display().to_string())
    }

    fn read_artifact<T: for<'de> Deserialize<'de>>(
        locator: &ArtifactLocator,
    ) -> Result<T, ArtifactError> {
        let path = Self::locator_path(locator)?;
        let bytes = fs::read(locator.path()).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Malformed {
            path,
            reason: e.to_string(),
        })
    }

    fn is_well_formed_commitment(commitment: &str) -> bool {
        commitment.len() == 64 && commitment.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl ProofEngine for MockProofEngine {
    type FieldElement = MockFieldElement;
    type Proof = MockProof;
    type VerifyingKey = MockVerifyingKey;

    /// Decode a canonical encoding, enforcing the mock range check:
    /// the top two bits of the most significant byte must be clear.
    fn deserialize_field(
        &self,
        field: &'static str,
        bytes: &FieldElementBytes,
    ) -> Result<Self::FieldElement, FieldDecodeError> {
        let msb = bytes.as_bytes()[bytes.as_bytes().len() - 1];
        if msb & FIELD_RANGE_MASK != 0 {
            return Err(FieldDecodeError::InvalidFieldEncoding {
                field,
                reason: format!("most significant byte {msb:#04x} exceeds the field modulus"),
            });
        }
        Ok(MockFieldElement {
            bytes: *bytes,
            _guard: HandleGuard::acquire(&self.ledger, HandleKind::Field),
        })
    }

    fn serialize_field(&self, element: &Self::FieldElement) -> FieldElementBytes {
        element.bytes
    }

    fn create_proof(
        &self,
        inputs: &EngineInputs<'_, Self>,
        artifacts: &ArtifactConfig,
    ) -> Result<(), ProofCreationError> {
        // The decoded handles must carry the exact encodings the
        // certificate declares; anything else breaks the byte-identical
        // create/verify contract.
        if inputs.constant.bytes != inputs.certificate.constant {
            return Err(ProofCreationError::CreationFailed(
                "constant handle does not match the certificate encoding".to_string(),
            ));
        }
        if inputs.proof_data.bytes != inputs.certificate.proof_data {
            return Err(ProofCreationError::CreationFailed(
                "proof_data handle does not match the certificate encoding".to_string(),
            ));
        }

        let proof_path = Self::locator_path(&artifacts.proof)
            .map_err(|e| ProofCreationError::ArtifactWrite(e.to_string()))?;
        let vk_path = Self::locator_path(&artifacts.vk)
            .map_err(|e| ProofCreationError::ArtifactWrite(e.to_string()))?;

        let proof = ProofArtifact {
            commitment: Self::commitment_hex(inputs),
            circuit: CIRCUIT_TAG.to_string(),
        };
        let key = KeyArtifact {
            circuit: CIRCUIT_TAG.to_string(),
        };

        let proof_json = serde_json::to_vec(&proof)
            .map_err(|e| ProofCreationError::ArtifactWrite(e.to_string()))?;
        let key_json = serde_json::to_vec(&key)
            .map_err(|e| ProofCreationError::ArtifactWrite(e.to_string()))?;

        fs::write(artifacts.proof.path(), proof_json).map_err(|e| {
            ProofCreationError::ArtifactWrite(format!("{proof_path}: {e}"))
        })?;
        fs::write(artifacts.vk.path(), key_json)
            .map_err(|e| ProofCreationError::ArtifactWrite(format!("{vk_path}: {e}")))?;
        Ok(())
    }

    fn load_proof(&self, locator: &ArtifactLocator) -> Result<Self::Proof, ArtifactError> {
        let artifact: ProofArtifact = Self::read_artifact(locator)?;
        if !Self::is_well_formed_commitment(&artifact.commitment) {
            return Err(ArtifactError::Malformed {
                path: locator.path().display().to_string(),
                reason: "commitment is not 64 hex characters".to_string(),
            });
        }
        Ok(MockProof {
            artifact,
            _guard: HandleGuard::acquire(&self.ledger, HandleKind::Proof),
        })
    }

    fn load_verifying_key(
        &self,
        locator: &ArtifactLocator,
    ) -> Result<Self::VerifyingKey, ArtifactError> {
        let artifact: KeyArtifact = Self::read_artifact(locator)?;
        Ok(MockVerifyingKey {
            artifact,
            _guard: HandleGuard::acquire(&self.ledger, HandleKind::Key),
        })
    }

    fn verify_proof(
        &self,
        inputs: &EngineInputs<'_, Self>,
        proof: &Self::Proof,
        key: &Self::VerifyingKey,
    ) -> Result<bool, ProofVerificationError> {
        if !Self::is_well_formed_commitment(&proof.artifact.commitment) {
            return Err(ProofVerificationError::MalformedProof(
                "commitment is not 64 hex characters".to_string(),
            ));
        }
        if proof.artifact.circuit != key.artifact.circuit {
            return Err(ProofVerificationError::KeyMismatch(format!(
                "proof circuit {:?} vs key circuit {:?}",
                proof.artifact.circuit, key.artifact.circuit
            )));
        }
        Ok(proof.artifact.commitment == Self::commitment_hex(inputs))
    }
}
