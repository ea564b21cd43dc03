//! Golden-vector verification for an 8086-compatible ALU model.
//!
//! The crate recomputes the result and flags register of every 8086
//! arithmetic, logical, shift/rotate, and decimal-adjust operation over
//! its full input domain and checks each point against precomputed
//! golden data captured from the reference implementation under test.
//! Mismatches are surfaced immediately with a human-diffable report;
//! the run is fail-fast across blocks and operations.

pub mod alu;
pub mod flags;
pub mod harness;
pub mod vectors;
pub mod verify;

pub use harness::{run_all, HarnessError, Summary};
