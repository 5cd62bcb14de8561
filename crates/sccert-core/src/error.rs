//! # Input Errors — Validation Failures Before Any Engine Call
//!
//! Typed replacements for the reference harness's assertion aborts. The
//! assembler detects every violation eagerly and reports it through
//! [`InputError`]; callers stop at the first error.

use thiserror::Error;

/// A validation failure in the input assembler.
///
/// Each variant corresponds to one contract violation the reference
/// harness aborted on. Variants carry enough context to name the
/// offending field and the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A token is not valid hexadecimal.
    #[error("malformed hex in {field}: {reason}")]
    MalformedHex {
        /// Name of the field being decoded.
        field: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },

    /// A token decoded to the wrong number of bytes.
    #[error("wrong size for {field}: expected {expected} bytes, got {actual}")]
    WrongSize {
        /// Name of the field being decoded.
        field: &'static str,
        /// Required decoded length.
        expected: usize,
        /// Actual decoded length.
        actual: usize,
    },

    /// The quality token is not a valid unsigned 64-bit integer.
    ///
    /// The reference harness silently treated malformed quality tokens
    /// as zero; here the ambiguity is resolved as a hard error.
    #[error("malformed quality token {token:?}: not an unsigned 64-bit integer")]
    MalformedQuality {
        /// The rejected token.
        token: String,
    },

    /// A backward-transfer amount token is not a valid unsigned
    /// 64-bit integer.
    #[error("malformed amount token {token:?} in transfer {index}: not an unsigned 64-bit integer")]
    MalformedAmount {
        /// Zero-based index of the transfer pair.
        index: usize,
        /// The rejected token.
        token: String,
    },

    /// The trailing token list cannot form `(pk_dest, amount)` pairs.
    #[error("backward-transfer tokens must come in (pk_dest, amount) pairs, got {count} tokens")]
    OddArgumentCount {
        /// Number of trailing tokens supplied.
        count: usize,
    },

    /// No backward-transfer tokens were supplied. The certificate
    /// requires at least one transfer.
    #[error("backward-transfer list is empty; at least one (pk_dest, amount) pair is required")]
    EmptyTransferList,
}
