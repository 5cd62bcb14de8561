//! # Input Assembler
//!
//! Converts raw textual tokens into a validated [`CertificateInputs`].
//! Every size and shape invariant is enforced here, eagerly and in the
//! reference ordering (hashes, quality, constant, proof_data, transfer
//! pairs), before any proof-engine call can be attempted. The first
//! violation stops assembly.
//!
//! The reference harness aborted the process on each of these checks;
//! the assembler reports them as [`InputError`] values instead, with the
//! same check ordering.

use crate::bytes::{EpochHash, FieldElementBytes, PkDest};
use crate::certificate::{BackwardTransfer, CertificateInputs};
use crate::error::InputError;

/// Raw CLI-shaped tokens for one certificate, before validation.
///
/// Field tokens may be empty strings — "unset" public field elements —
/// but must be present. The trailing token list holds alternating
/// `(pk_dest_hex, amount_decimal)` pairs.
#[derive(Debug, Clone)]
pub struct RawCertificateArgs {
    /// Hex token for the current epoch boundary hash (32 bytes).
    pub end_epoch_mc_b_hash: String,
    /// Hex token for the previous epoch boundary hash (32 bytes).
    pub prev_end_epoch_mc_b_hash: String,
    /// Decimal token for the certificate quality (u64).
    pub quality: String,
    /// Hex token for the `constant` field element (96 bytes or empty).
    pub constant: String,
    /// Hex token for the `proof_data` field element (96 bytes or empty).
    pub proof_data: String,
    /// Trailing `(pk_dest, amount)` token pairs, in order.
    pub transfer_tokens: Vec<String>,
}

/// Parse a 32-byte epoch hash token.
///
/// `field` names the hash in error reports.
pub fn parse_hash(field: &'static str, token: &str) -> Result<EpochHash, InputError> {
    EpochHash::from_hex(field, token)
}

/// Parse an optional 96-byte field-element token.
///
/// The empty string decodes to the all-zero encoding: the engine always
/// receives a zero-valued field, never an absent one.
pub fn parse_field_bytes(field: &'static str, token: &str) -> Result<FieldElementBytes, InputError> {
    if token.is_empty() {
        return Ok(FieldElementBytes::zeroed());
    }
    FieldElementBytes::from_hex(field, token)
}

/// Parse the certificate quality token as an unsigned 64-bit integer.
///
/// The reference parser silently yielded zero for malformed tokens;
/// that ambiguity is resolved as a hard [`InputError::MalformedQuality`].
pub fn parse_quality(token: &str) -> Result<u64, InputError> {
    token
        .parse::<u64>()
        .map_err(|_| InputError::MalformedQuality {
            token: token.to_string(),
        })
}

/// Parse the trailing token list into an ordered backward-transfer
/// sequence.
///
/// Shape checks come first — the pair constraint, then non-emptiness —
/// so an odd or empty list fails regardless of how many valid pairs it
/// contains. Pairs are then decoded in order, failing on the first bad
/// token.
pub fn parse_backward_transfers(tokens: &[String]) -> Result<Vec<BackwardTransfer>, InputError> {
    if tokens.len() % 2 != 0 {
        return Err(InputError::OddArgumentCount {
            count: tokens.len(),
        });
    }
    if tokens.is_empty() {
        return Err(InputError::EmptyTransferList);
    }

    let mut transfers = Vec::with_capacity(tokens.len() / 2);
    for (index, pair) in tokens.chunks_exact(2).enumerate() {
        let pk_dest = PkDest::from_hex("pk_dest", &pair[0])?;
        let amount = pair[1]
            .parse::<u64>()
            .map_err(|_| InputError::MalformedAmount {
                index,
                token: pair[1].clone(),
            })?;
        transfers.push(BackwardTransfer { pk_dest, amount });
    }
    Ok(transfers)
}

/// Assemble a validated [`CertificateInputs`] from raw tokens.
///
/// Checks run in the reference ordering and stop at the first
/// violation; no partially validated record ever escapes.
pub fn assemble(args: &RawCertificateArgs) -> Result<CertificateInputs, InputError> {
    let end_epoch_mc_b_hash = parse_hash("end_epoch_mc_b_hash", &args.end_epoch_mc_b_hash)?;
    let prev_end_epoch_mc_b_hash =
        parse_hash("prev_end_epoch_mc_b_hash", &args.prev_end_epoch_mc_b_hash)?;
    let quality = parse_quality(&args.quality)?;
    let constant = parse_field_bytes("constant", &args.constant)?;
    let proof_data = parse_field_bytes("proof_data", &args.proof_data)?;
    let backward_transfers = parse_backward_transfers(&args.transfer_tokens)?;

    CertificateInputs::new(
        end_epoch_mc_b_hash,
        prev_end_epoch_mc_b_hash,
        quality,
        constant,
        proof_data,
        backward_transfers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_args() -> RawCertificateArgs {
        RawCertificateArgs {
            end_epoch_mc_b_hash: "00".repeat(32),
            prev_end_epoch_mc_b_hash: "11".repeat(32),
            quality: "5".to_string(),
            constant: String::new(),
            proof_data: String::new(),
            transfer_tokens: vec!["aa".repeat(20), "1000".to_string()],
        }
    }

    #[test]
    fn assembles_scenario_a_inputs() {
        let inputs = assemble(&valid_args()).unwrap();
        assert_eq!(inputs.end_epoch_mc_b_hash.as_bytes(), &[0x00; 32]);
        assert_eq!(inputs.prev_end_epoch_mc_b_hash.as_bytes(), &[0x11; 32]);
        assert_eq!(inputs.quality, 5);
        assert!(inputs.constant.is_zeroed());
        assert!(inputs.proof_data.is_zeroed());
        assert_eq!(inputs.backward_transfers().len(), 1);
        assert_eq!(inputs.backward_transfers()[0].amount, 1000);
    }

    #[test]
    fn empty_field_tokens_decode_to_zero_encoding() {
        let fe = parse_field_bytes("constant", "").unwrap();
        assert!(fe.is_zeroed());
        // Not an absent value: still a full 96-byte buffer.
        assert_eq!(fe.as_bytes().len(), 96);
    }

    #[test]
    fn nonempty_field_token_must_be_96_bytes() {
        let err = parse_field_bytes("proof_data", &"ab".repeat(95)).unwrap_err();
        assert_eq!(
            err,
            InputError::WrongSize {
                field: "proof_data",
                expected: 96,
                actual: 95
            }
        );
    }

    #[test]
    fn malformed_quality_is_a_hard_error() {
        assert_eq!(
            parse_quality("not-a-number").unwrap_err(),
            InputError::MalformedQuality {
                token: "not-a-number".to_string()
            }
        );
        // Negative values have no representation either.
        assert!(matches!(
            parse_quality("-1").unwrap_err(),
            InputError::MalformedQuality { .. }
        ));
    }

    #[test]
    fn empty_transfer_list_fails_before_any_decode() {
        let mut args = valid_args();
        args.transfer_tokens.clear();
        assert_eq!(assemble(&args).unwrap_err(), InputError::EmptyTransferList);
    }

    #[test]
    fn odd_token_count_fails_even_with_valid_pairs_present() {
        let mut args = valid_args();
        args.transfer_tokens.push("bb".repeat(20));
        assert_eq!(
            assemble(&args).unwrap_err(),
            InputError::OddArgumentCount { count: 3 }
        );
    }

    #[test]
    fn nineteen_byte_pk_dest_fails_wrong_size() {
        // Scenario D.
        let mut args = valid_args();
        args.transfer_tokens = vec!["aa".repeat(19), "1".to_string()];
        assert_eq!(
            assemble(&args).unwrap_err(),
            InputError::WrongSize {
                field: "pk_dest",
                expected: 20,
                actual: 19
            }
        );
    }

    #[test]
    fn malformed_amount_names_the_pair() {
        let mut args = valid_args();
        args.transfer_tokens = vec![
            "aa".repeat(20),
            "1".to_string(),
            "bb".repeat(20),
            "ten".to_string(),
        ];
        assert_eq!(
            assemble(&args).unwrap_err(),
            InputError::MalformedAmount {
                index: 1,
                token: "ten".to_string()
            }
        );
    }

    #[test]
    fn first_violation_wins() {
        // A bad hash must be reported even when later tokens are also bad.
        let mut args = valid_args();
        args.end_epoch_mc_b_hash = "xy".repeat(32);
        args.quality = "bogus".to_string();
        assert!(matches!(
            assemble(&args).unwrap_err(),
            InputError::MalformedHex {
                field: "end_epoch_mc_b_hash",
                ..
            }
        ));
    }

    proptest! {
        #[test]
        fn any_64_hex_char_token_decodes_to_32_bytes(bytes in proptest::array::uniform32(any::<u8>())) {
            let token = hex::encode(bytes);
            let hash = parse_hash("end_epoch_mc_b_hash", &token).unwrap();
            prop_assert_eq!(hash.as_bytes(), &bytes);
        }

        #[test]
        fn odd_length_lists_always_fail(pairs in 0usize..4, amount in any::<u64>()) {
            let mut tokens = Vec::new();
            for _ in 0..pairs {
                tokens.push("aa".repeat(20));
                tokens.push(amount.to_string());
            }
            tokens.push("bb".repeat(20));
            let err = parse_backward_transfers(&tokens).unwrap_err();
            prop_assert_eq!(err, InputError::OddArgumentCount { count: pairs * 2 + 1 });
        }

        #[test]
        fn valid_pair_lists_preserve_order(amounts in proptest::collection::vec(any::<u64>(), 1..8)) {
            let mut tokens = Vec::new();
            for (i, amount) in amounts.iter().enumerate() {
                tokens.push(format!("{:02x}", i as u8).repeat(20));
                tokens.push(amount.to_string());
            }
            let transfers = parse_backward_transfers(&tokens).unwrap();
            prop_assert_eq!(transfers.len(), amounts.len());
            for (i, (t, amount)) in transfers.iter().zip(&amounts).enumerate() {
                prop_assert_eq!(t.amount, *amount);
                prop_assert_eq!(t.pk_dest.as_bytes(), &[i as u8; 20]);
            }
        }
    }
}
