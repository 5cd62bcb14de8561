//! # Harness Driver
//!
//! Maps the CLI surface onto the input assembler and the proof
//! lifecycle controller. The binary in `main.rs` stays thin; this
//! module is the testable seam.

use std::path::PathBuf;

use clap::Args;

use sccert_core::{assemble, RawCertificateArgs};
use sccert_zkp::{ArtifactConfig, MockProofEngine, Outcome, ProofLifecycle};

/// Arguments of the certificate proof harness.
///
/// Positional order matches the reference driver; `-v` enables the
/// verify phase after creation. Artifact paths default to the fixed
/// reference locations and may be overridden per run.
#[derive(Args, Debug)]
pub struct HarnessArgs {
    /// Verify the proof after creating it.
    #[arg(short = 'v', long = "verify")]
    pub verify: bool,

    /// Where the engine persists the proof artifact.
    #[arg(long, default_value = sccert_zkp::artifacts::DEFAULT_PROOF_PATH)]
    pub proof_path: PathBuf,

    /// Where the engine persists the verification-key artifact.
    #[arg(long, default_value = sccert_zkp::artifacts::DEFAULT_VK_PATH)]
    pub vk_path: PathBuf,

    /// Current epoch boundary block hash (64 hex chars).
    pub end_epoch_mc_b_hash: String,

    /// Previous epoch boundary block hash (64 hex chars).
    pub prev_end_epoch_mc_b_hash: String,

    /// Certificate quality (unsigned 64-bit integer).
    pub quality: String,

    /// `constant` public field element (192 hex chars, or "" for unset).
    pub constant: String,

    /// `proof_data` public field element (192 hex chars, or "" for unset).
    pub proof_data: String,

    /// Alternating pk_dest (40 hex chars) and amount (decimal) tokens;
    /// at least one pair.
    #[arg(num_args = 0..)]
    pub transfers: Vec<String>,
}

impl HarnessArgs {
    fn to_raw(&self) -> RawCertificateArgs {
        RawCertificateArgs {
            end_epoch_mc_b_hash: self.end_epoch_mc_b_hash.clone(),
            prev_end_epoch_mc_b_hash: self.prev_end_epoch_mc_b_hash.clone(),
            quality: self.quality.clone(),
            constant: self.constant.clone(),
            proof_data: self.proof_data.clone(),
            transfer_tokens: self.transfers.clone(),
        }
    }
}

/// Assemble the inputs and drive the lifecycle to completion.
///
/// Validation stops at the first violation, before any engine call;
/// engine failures surface as typed lifecycle errors.
pub fn run_harness(args: &HarnessArgs) -> anyhow::Result<Outcome> {
    let certificate = assemble(&args.to_raw())?;
    tracing::debug!(
        transfers = certificate.backward_transfers().len(),
        verify = args.verify,
        "certificate inputs assembled"
    );

    let engine = MockProofEngine::new();
    let lifecycle = ProofLifecycle::new(
        &engine,
        ArtifactConfig::new(&args.proof_path, &args.vk_path),
    );
    let outcome = lifecycle.run(&certificate, args.verify)?;

    match outcome {
        Outcome::Created => tracing::info!("proof created; verification not requested"),
        Outcome::Verified => tracing::info!("proof created and verified"),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args_in(dir: &TempDir, verify: bool) -> HarnessArgs {
        HarnessArgs {
            verify,
            proof_path: dir.path().join("test_mc_proof"),
            vk_path: dir.path().join("test_mc_vk"),
            end_epoch_mc_b_hash: "00".repeat(32),
            prev_end_epoch_mc_b_hash: "11".repeat(32),
            quality: "5".to_string(),
            constant: String::new(),
            proof_data: String::new(),
            transfers: vec!["aa".repeat(20), "1000".to_string()],
        }
    }

    #[test]
    fn create_and_verify_end_to_end() {
        let dir = TempDir::new().unwrap();
        let outcome = run_harness(&args_in(&dir, true)).unwrap();
        assert_eq!(outcome, Outcome::Verified);
        assert!(dir.path().join("test_mc_proof").exists());
        assert!(dir.path().join("test_mc_vk").exists());
    }

    #[test]
    fn create_only_without_verify_flag() {
        let dir = TempDir::new().unwrap();
        let outcome = run_harness(&args_in(&dir, false)).unwrap();
        assert_eq!(outcome, Outcome::Created);
    }

    #[test]
    fn validation_failure_writes_no_artifacts() {
        let dir = TempDir::new().unwrap();
        let mut args = args_in(&dir, true);
        args.transfers.clear();
        let err = run_harness(&args).unwrap_err();
        assert!(err.to_string().contains("backward-transfer list is empty"));
        assert!(!dir.path().join("test_mc_proof").exists());
        assert!(!dir.path().join("test_mc_vk").exists());
    }

    #[test]
    fn odd_transfer_tokens_are_reported() {
        let dir = TempDir::new().unwrap();
        let mut args = args_in(&dir, false);
        args.transfers.push("bb".repeat(20));
        let err = run_harness(&args).unwrap_err();
        assert!(err.to_string().contains("pairs"));
    }
}
