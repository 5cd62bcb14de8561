//! # sccert-cli — Certificate Proof Test Driver
//!
//! Provides the `sccert` binary: a command-line harness that assembles
//! the public inputs of an end-of-epoch certificate, drives proof
//! creation through the proof engine, and optionally reloads and
//! verifies the persisted artifacts.
//!
//! ## Invocation
//!
//! ```bash
//! sccert [-v] <end_epoch_mc_b_hash> <prev_end_epoch_mc_b_hash> \
//!        <quality> <constant> <proof_data> \
//!        <pk_dest_0> <amount_0> [<pk_dest_1> <amount_1> ...]
//! ```
//!
//! `constant` and `proof_data` may be empty strings ("" must still be
//! supplied); they decode to the zero field element. The reference
//! harness aborted on the first contract violation; this driver reports
//! typed errors with the same first-violation-halts ordering.

pub mod driver;

pub use driver::{run_harness, HarnessArgs};
