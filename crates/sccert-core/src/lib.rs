//! # sccert-core — Certificate Public-Input Model
//!
//! Foundational types for the sidechain certificate proof harness. This
//! crate defines the byte-level public-input contract of an end-of-epoch
//! certificate and the assembler that builds a validated record from raw
//! CLI tokens. Every other crate in the workspace depends on
//! `sccert-core`; it depends on nothing internal — in particular it knows
//! nothing about any proof engine.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for fixed-size byte fields.** `EpochHash`,
//!    `FieldElementBytes`, `PkDest` — all newtypes over fixed-length
//!    arrays with validated hex constructors. No bare `Vec<u8>` whose
//!    length must be re-checked downstream.
//!
//! 2. **"Unset" is a zero value, never an absent value.** An empty
//!    field-element token decodes to the all-zero 96-byte encoding. The
//!    proof engine never sees a null public input.
//!
//! 3. **One blessed byte path.** `CertificateInputs::to_public_bytes()`
//!    is the single canonical encoding of the public inputs. Anything
//!    that hashes or compares certificate inputs flows through it.
//!
//! 4. **Fail-fast assembly.** The assembler validates every size and
//!    shape invariant eagerly and stops at the first violation, before
//!    any engine call can be attempted.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sccert-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod assemble;
pub mod bytes;
pub mod certificate;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use assemble::{assemble, RawCertificateArgs};
pub use bytes::{EpochHash, FieldElementBytes, PkDest};
pub use certificate::{BackwardTransfer, CertificateInputs};
pub use error::InputError;
