//! # Fixed-Size Byte Fields
//!
//! Newtypes for the three fixed-width byte fields of the certificate
//! public-input record. Each type owns its length invariant: a value of
//! the type is always exactly the right number of bytes, so downstream
//! code never re-checks sizes.
//!
//! Hex constructors report [`InputError::MalformedHex`] /
//! [`InputError::WrongSize`] with the field name, matching the check
//! ordering of the reference harness (hex validity first, then length).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InputError;

/// Byte length of an epoch boundary block hash.
pub const EPOCH_HASH_LEN: usize = 32;

/// Byte length of the canonical field-element encoding.
pub const FIELD_ELEMENT_LEN: usize = 96;

/// Byte length of a backward-transfer destination identifier.
pub const PK_DEST_LEN: usize = 20;

/// Decode a hex token into a fixed-length array.
///
/// Hex validity is checked before length so that a token that is both
/// malformed and mis-sized reports `MalformedHex`, like the reference.
pub(crate) fn decode_fixed<const N: usize>(
    field: &'static str,
    token: &str,
) -> Result<[u8; N], InputError> {
    let decoded = hex::decode(token).map_err(|e| InputError::MalformedHex {
        field,
        reason: e.to_string(),
    })?;
    let actual = decoded.len();
    decoded
        .try_into()
        .map_err(|_| InputError::WrongSize {
            field,
            expected: N,
            actual,
        })
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

fn deserialize_hex<'de, D: Deserializer<'de>, const N: usize>(
    deserializer: D,
) -> Result<[u8; N], D::Error> {
    let s = String::deserialize(deserializer)?;
    let decoded = hex::decode(&s).map_err(serde::de::Error::custom)?;
    decoded
        .try_into()
        .map_err(|v: Vec<u8>| serde::de::Error::custom(format!("expected {N} bytes, got {}", v.len())))
}

/// A 32-byte epoch boundary block hash.
///
/// Opaque to the harness; the proof engine interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpochHash([u8; EPOCH_HASH_LEN]);

impl EpochHash {
    /// Wrap raw bytes. The length is enforced by the array type.
    pub fn new(bytes: [u8; EPOCH_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode from a hex token.
    pub fn from_hex(field: &'static str, token: &str) -> Result<Self, InputError> {
        decode_fixed(field, token).map(Self)
    }

    /// The raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; EPOCH_HASH_LEN] {
        &self.0
    }
}

impl std::fmt::Display for EpochHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for EpochHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hex(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for EpochHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_hex(deserializer).map(Self)
    }
}

/// The 96-byte canonical encoding of a proof-system scalar.
///
/// This is the wire form of a public input; whether the bytes denote a
/// valid scalar is the proof engine's judgement, made when the bytes
/// are handed to its field deserializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElementBytes([u8; FIELD_ELEMENT_LEN]);

impl FieldElementBytes {
    /// Wrap raw bytes.
    pub fn new(bytes: [u8; FIELD_ELEMENT_LEN]) -> Self {
        Self(bytes)
    }

    /// The all-zero encoding, representing an unset public input.
    pub fn zeroed() -> Self {
        Self([0u8; FIELD_ELEMENT_LEN])
    }

    /// Decode from a hex token.
    pub fn from_hex(field: &'static str, token: &str) -> Result<Self, InputError> {
        decode_fixed(field, token).map(Self)
    }

    /// The raw encoded bytes.
    pub fn as_bytes(&self) -> &[u8; FIELD_ELEMENT_LEN] {
        &self.0
    }

    /// Whether this is the all-zero "unset" encoding.
    pub fn is_zeroed(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl std::fmt::Display for FieldElementBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for FieldElementBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hex(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for FieldElementBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_hex(deserializer).map(Self)
    }
}

/// A 20-byte backward-transfer destination identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PkDest([u8; PK_DEST_LEN]);

impl PkDest {
    /// Wrap raw bytes.
    pub fn new(bytes: [u8; PK_DEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode from a hex token.
    pub fn from_hex(field: &'static str, token: &str) -> Result<Self, InputError> {
        decode_fixed(field, token).map(Self)
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; PK_DEST_LEN] {
        &self.0
    }
}

impl std::fmt::Display for PkDest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for PkDest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hex(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for PkDest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_hex(deserializer).map(Self)
    }
}
