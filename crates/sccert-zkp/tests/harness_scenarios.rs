//! End-to-end lifecycle scenarios against the mock engine: the
//! create/verify protocol, failure ordering, and the exactly-once
//! release contract on every exit path.

use tempfile::TempDir;

use sccert_core::{assemble, InputError, RawCertificateArgs};
use sccert_zkp::mock::HandleKind;
use sccert_zkp::{
    ArtifactConfig, ArtifactLocator, LifecycleError, MockProofEngine, Outcome, ProofLifecycle,
};

fn scenario_args(quality: &str) -> RawCertificateArgs {
    RawCertificateArgs {
        end_epoch_mc_b_hash: "00".repeat(32),
        prev_end_epoch_mc_b_hash: "11".repeat(32),
        quality: quality.to_string(),
        constant: String::new(),
        proof_data: String::new(),
        transfer_tokens: vec!["aa".repeat(20), "1000".to_string()],
    }
}

fn temp_artifacts(dir: &TempDir) -> ArtifactConfig {
    ArtifactConfig::new(
        dir.path().join("test_mc_proof"),
        dir.path().join("test_mc_vk"),
    )
}

#[test]
fn scenario_a_create_then_verify_with_identical_inputs_succeeds() {
    let dir = TempDir::new().unwrap();
    let engine = MockProofEngine::new();
    let lifecycle = ProofLifecycle::new(&engine, temp_artifacts(&dir));

    let certificate = assemble(&scenario_args("5")).unwrap();
    let outcome = lifecycle.run(&certificate, true).unwrap();
    assert_eq!(outcome, Outcome::Verified);

    // Both artifacts persisted.
    assert!(lifecycle.artifacts().proof.path().exists());
    assert!(lifecycle.artifacts().vk.path().exists());

    // Two field elements, one proof, one key — each released exactly once.
    let ledger = engine.ledger();
    assert!(ledger.is_balanced());
    assert_eq!(ledger.counts(HandleKind::Field).allocated, 2);
    assert_eq!(ledger.counts(HandleKind::Proof).allocated, 1);
    assert_eq!(ledger.counts(HandleKind::Key).allocated, 1);
}

#[test]
fn create_without_verify_stops_at_created() {
    let dir = TempDir::new().unwrap();
    let engine = MockProofEngine::new();
    let lifecycle = ProofLifecycle::new(&engine, temp_artifacts(&dir));

    let certificate = assemble(&scenario_args("5")).unwrap();
    let outcome = lifecycle.run(&certificate, false).unwrap();
    assert_eq!(outcome, Outcome::Created);

    // No proof or key was ever loaded.
    let ledger = engine.ledger();
    assert!(ledger.is_balanced());
    assert_eq!(ledger.counts(HandleKind::Proof).allocated, 0);
    assert_eq!(ledger.counts(HandleKind::Key).allocated, 0);
}

#[test]
fn scenario_b_altered_quality_at_verification_time_fails() {
    let dir = TempDir::new().unwrap();
    let engine = MockProofEngine::new();
    let lifecycle = ProofLifecycle::new(&engine, temp_artifacts(&dir));

    let certificate = assemble(&scenario_args("5")).unwrap();
    lifecycle.run(&certificate, false).unwrap();

    let altered = assemble(&scenario_args("6")).unwrap();
    let err = lifecycle.verify_only(&altered).unwrap_err();
    assert!(matches!(err, LifecycleError::ProofVerificationFailed));

    // The failure path released everything it loaded.
    assert!(engine.ledger().is_balanced());
}

#[test]
fn scenario_c_empty_transfer_list_fails_before_any_engine_call() {
    let mut args = scenario_args("5");
    args.transfer_tokens.clear();
    let err = assemble(&args).unwrap_err();
    assert_eq!(err, InputError::EmptyTransferList);

    // Nothing was ever decoded, created, or loaded.
    let engine = MockProofEngine::new();
    assert_eq!(engine.ledger().counts(HandleKind::Field).allocated, 0);
}

#[test]
fn invalid_field_encoding_halts_before_proof_creation() {
    let dir = TempDir::new().unwrap();
    let engine = MockProofEngine::new();
    let lifecycle = ProofLifecycle::new(&engine, temp_artifacts(&dir));

    // 96 valid hex bytes that the engine's range check rejects: the
    // assembler accepts them, the engine's field deserializer does not.
    let mut args = scenario_args("5");
    args.proof_data = format!("{}ff", "00".repeat(95));
    let certificate = assemble(&args).unwrap();

    let err = lifecycle.run(&certificate, true).unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidFieldEncoding(_)));

    // No artifact was written.
    assert!(!lifecycle.artifacts().proof.path().exists());
    assert!(!lifecycle.artifacts().vk.path().exists());

    // The constant decoded before the failure was released exactly once.
    let ledger = engine.ledger();
    assert!(ledger.is_balanced());
    assert_eq!(ledger.counts(HandleKind::Field).allocated, 1);
}

#[test]
fn missing_artifacts_fail_the_load_step_and_release_fields() {
    let dir = TempDir::new().unwrap();
    let engine = MockProofEngine::new();
    let lifecycle = ProofLifecycle::new(&engine, temp_artifacts(&dir));

    let certificate = assemble(&scenario_args("5")).unwrap();
    let err = lifecycle.verify_only(&certificate).unwrap_err();
    assert!(matches!(err, LifecycleError::ArtifactLoadFailed(_)));

    let ledger = engine.ledger();
    assert!(ledger.is_balanced());
    assert_eq!(ledger.counts(HandleKind::Field).allocated, 2);
    assert_eq!(ledger.counts(HandleKind::Proof).allocated, 0);
}

#[test]
fn tampered_proof_commitment_fails_verification() {
    let dir = TempDir::new().unwrap();
    let engine = MockProofEngine::new();
    let lifecycle = ProofLifecycle::new(&engine, temp_artifacts(&dir));

    let certificate = assemble(&scenario_args("5")).unwrap();
    lifecycle.run(&certificate, false).unwrap();

    // Replace the commitment with a different, well-formed value.
    let proof_path = lifecycle.artifacts().proof.path();
    let tampered = format!(
        "{{\"commitment\":\"{}\",\"circuit\":\"sccert-mc-test-circuit-v1\"}}",
        "ab".repeat(32)
    );
    std::fs::write(proof_path, tampered).unwrap();

    let err = lifecycle.verify_only(&certificate).unwrap_err();
    assert!(matches!(err, LifecycleError::ProofVerificationFailed));
    assert!(engine.ledger().is_balanced());
}

#[test]
fn inconsistent_declared_path_length_fails_artifact_load() {
    let dir = TempDir::new().unwrap();
    let engine = MockProofEngine::new();
    let certificate = assemble(&scenario_args("5")).unwrap();

    let good = temp_artifacts(&dir);
    ProofLifecycle::new(&engine, good.clone())
        .run(&certificate, false)
        .unwrap();

    // Same paths, wrong declared length on the proof locator.
    let bad = ArtifactConfig {
        proof: ArtifactLocator::with_declared_len(good.proof.path(), 3),
        vk: good.vk.clone(),
    };
    let err = ProofLifecycle::new(&engine, bad)
        .verify_only(&certificate)
        .unwrap_err();
    assert!(matches!(err, LifecycleError::ArtifactLoadFailed(_)));
    assert!(engine.ledger().is_balanced());
}

#[test]
fn verification_is_indifferent_to_which_controller_created_the_proof() {
    // The contract is byte-identity of the inputs, not identity of the
    // controller or engine instance.
    let dir = TempDir::new().unwrap();
    let artifacts = temp_artifacts(&dir);

    let creator = MockProofEngine::new();
    ProofLifecycle::new(&creator, artifacts.clone())
        .run(&assemble(&scenario_args("5")).unwrap(), false)
        .unwrap();

    let verifier = MockProofEngine::new();
    let outcome = ProofLifecycle::new(&verifier, artifacts)
        .verify_only(&assemble(&scenario_args("5")).unwrap())
        .unwrap();
    assert_eq!(outcome, Outcome::Verified);
    assert!(creator.ledger().is_balanced());
    assert!(verifier.ledger().is_balanced());
}
