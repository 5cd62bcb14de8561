//! # Certificate Public-Input Record
//!
//! The aggregate of public values over which an end-of-epoch certificate
//! proof is created and later verified. Two records are equivalent for
//! verification iff every field compares byte-equal and the
//! backward-transfer sequence matches element-wise in order — exactly
//! the derived `PartialEq` of [`CertificateInputs`].
//!
//! ## Canonical Encoding Invariant
//!
//! [`CertificateInputs::to_public_bytes()`] is the single canonical byte
//! encoding of the record. Every consumer that hashes or compares
//! certificate inputs flows through it; there is no second serialization
//! path that could drift.

use serde::{Deserialize, Serialize};

use crate::bytes::{EpochHash, FieldElementBytes, PkDest};
use crate::error::InputError;

/// A single backward transfer recorded in the certificate.
///
/// The transfer sequence is ordered and order is significant — it is
/// part of what the proof engine hashes and verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackwardTransfer {
    /// Destination identifier on the mainchain.
    pub pk_dest: PkDest,
    /// Transferred amount.
    pub amount: u64,
}

/// The validated public-input record of an end-of-epoch certificate.
///
/// Construction enforces the non-empty transfer-list invariant; every
/// byte-size invariant is carried by the field types. Once built, the
/// record is immutable — the lifecycle controller passes the identical
/// value to both `create_proof` and `verify_proof`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInputs {
    /// Block hash at the current epoch boundary.
    pub end_epoch_mc_b_hash: EpochHash,
    /// Block hash at the previous epoch boundary.
    pub prev_end_epoch_mc_b_hash: EpochHash,
    /// Non-negative certificate ranking value.
    pub quality: u64,
    /// First optional public field element; zeroed when unset.
    pub constant: FieldElementBytes,
    /// Second optional public field element; zeroed when unset.
    pub proof_data: FieldElementBytes,
    /// Ordered, non-empty backward-transfer sequence.
    backward_transfers: Vec<BackwardTransfer>,
}

impl CertificateInputs {
    /// Build a record, enforcing the non-empty transfer-list invariant.
    pub fn new(
        end_epoch_mc_b_hash: EpochHash,
        prev_end_epoch_mc_b_hash: EpochHash,
        quality: u64,
        constant: FieldElementBytes,
        proof_data: FieldElementBytes,
        backward_transfers: Vec<BackwardTransfer>,
    ) -> Result<Self, InputError> {
        if backward_transfers.is_empty() {
            return Err(InputError::EmptyTransferList);
        }
        Ok(Self {
            end_epoch_mc_b_hash,
            prev_end_epoch_mc_b_hash,
            quality,
            constant,
            proof_data,
            backward_transfers,
        })
    }

    /// The ordered backward-transfer sequence (always non-empty).
    pub fn backward_transfers(&self) -> &[BackwardTransfer] {
        &self.backward_transfers
    }

    /// Canonical fixed-order byte encoding of the public inputs.
    ///
    /// Layout: `end_hash(32) || prev_hash(32) || quality(u64 LE) ||
    /// constant(96) || proof_data(96) || transfer_count(u32 LE) ||
    /// (pk_dest(20) || amount(u64 LE))*`. Fixed widths make the
    /// encoding injective; the transfer count pins the sequence length.
    pub fn to_public_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32 + 32 + 8 + 96 + 96 + 4 + 28 * self.backward_transfers.len());
        out.extend_from_slice(self.end_epoch_mc_b_hash.as_bytes());
        out.extend_from_slice(self.prev_end_epoch_mc_b_hash.as_bytes());
        out.extend_from_slice(&self.quality.to_le_bytes());
        out.extend_from_slice(self.constant.as_bytes());
        out.extend_from_slice(self.proof_data.as_bytes());
        out.extend_from_slice(&(self.backward_transfers.len() as u32).to_le_bytes());
        for bt in &self.backward_transfers {
            out.extend_from_slice(bt.pk_dest.as_bytes());
            out.extend_from_slice(&bt.amount.to_le_bytes());
        }
        out
    }
}
