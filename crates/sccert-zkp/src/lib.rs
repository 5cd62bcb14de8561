//! # sccert-zkp — Proof Engine Abstraction and Lifecycle
//!
//! Defines the contract any zero-knowledge proof backend must honor to
//! drive an end-of-epoch certificate test, plus the controller that
//! drives it.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): the sealed [`ProofEngine`] trait — field
//!   (de)serialization, proof creation, artifact loading, and proof
//!   verification. Backends are opaque; the harness only sees owned
//!   handle values whose `Drop` performs the engine release.
//!
//! - **Artifacts** (`artifacts.rs`): typed locators for the persisted
//!   proof and verification-key files, carrying the declared path
//!   length the engine's path-decoding convention requires.
//!
//! - **Mock** (`mock.rs`): [`MockProofEngine`] — deterministic SHA-256
//!   commitments standing in for a real SNARK backend, with a handle
//!   ledger that makes the release-exactly-once contract observable.
//!
//! - **Lifecycle** (`lifecycle.rs`): [`ProofLifecycle`] — the
//!   create → (persist/reload) → verify state machine. The identical
//!   decoded input record feeds both engine calls.
//!
//! ## Crate Policy
//!
//! - Depends on `sccert-core` for the byte-level input model.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod artifacts;
pub mod lifecycle;
pub mod mock;
pub mod traits;

// Re-export primary types.
pub use artifacts::{ArtifactConfig, ArtifactLocator};
pub use lifecycle::{LifecycleError, Outcome, ProofLifecycle};
pub use mock::MockProofEngine;
pub use traits::{EngineInputs, ProofEngine};
