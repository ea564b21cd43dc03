//! Fail-fast verification driver.
//!
//! The operation table below is the fixed file-name-to-operation
//! mapping: per operation it binds the vector file, the display label,
//! the domain shape, the model function, and the initial-flags value
//! of each block the file holds. The driver loads one file at a time,
//! verifies every block, and stops the whole run on the first failing
//! result; vectors are dropped as soon as their operation completes.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::alu;
use crate::flags::{Flags, FLAG_AF, FLAG_CF, FLAG_ON};
use crate::vectors::{self, Shape, VectorError};
use crate::verify::{self, Mismatch, Op16, Op8, Op8x8};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Vector(#[from] VectorError),
    #[error("'{file}': expected {expected} block(s) of test data, found {found}")]
    BlockCount {
        file: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unknown operation '{0}'")]
    UnknownOp(String),
    #[error("{0}")]
    Mismatch(#[from] Box<Mismatch>),
}

#[derive(Clone, Copy)]
enum Kind {
    Pair8(Op8x8),
    Single8(Op8),
    Wide16(Op16),
}

impl Kind {
    fn shape(&self) -> Shape {
        match self {
            Kind::Pair8(_) => Shape::Pair8,
            Kind::Single8(_) => Shape::Single8,
            Kind::Wide16(_) => Shape::Single16,
        }
    }
}

struct OpSpec {
    file: &'static str,
    label: &'static str,
    kind: Kind,
    /// Initial flags of each block in the file, in file order.
    blocks: &'static [Flags],
}

const BLOCK_ON: &[Flags] = &[FLAG_ON];
const BLOCKS_CF: &[Flags] = &[FLAG_ON, FLAG_ON | FLAG_CF];
const BLOCKS_AF: &[Flags] = &[FLAG_ON, FLAG_ON | FLAG_AF];
const BLOCKS_CF_AF: &[Flags] = &[
    FLAG_ON,
    FLAG_ON | FLAG_CF,
    FLAG_ON | FLAG_AF,
    FLAG_ON | FLAG_CF | FLAG_AF,
];

// By-1 shift/rotate families: same model, count pinned to 1.
fn shl8_by1(a: u8, fl: Flags) -> (u8, Flags) {
    alu::shl8(a, 1, fl)
}
fn shr8_by1(a: u8, fl: Flags) -> (u8, Flags) {
    alu::shr8(a, 1, fl)
}
fn sar8_by1(a: u8, fl: Flags) -> (u8, Flags) {
    alu::sar8(a, 1, fl)
}
fn rol8_by1(a: u8, fl: Flags) -> (u8, Flags) {
    alu::rol8(a, 1, fl)
}
fn ror8_by1(a: u8, fl: Flags) -> (u8, Flags) {
    alu::ror8(a, 1, fl)
}
fn rcl8_by1(a: u8, fl: Flags) -> (u8, Flags) {
    alu::rcl8(a, 1, fl)
}
fn rcr8_by1(a: u8, fl: Flags) -> (u8, Flags) {
    alu::rcr8(a, 1, fl)
}

/// Verification order follows the reference runner: arithmetic first,
/// then shifts/rotates (by-1 before by-count), logic, inc/dec/neg, and
/// the decimal/ASCII adjusts last.
const OPS: &[OpSpec] = &[
    OpSpec { file: "add8.bin", label: "+", kind: Kind::Pair8(alu::add8), blocks: BLOCK_ON },
    OpSpec { file: "sub8.bin", label: "-", kind: Kind::Pair8(alu::sub8), blocks: BLOCK_ON },
    OpSpec { file: "adc8.bin", label: "adc", kind: Kind::Pair8(alu::adc8), blocks: BLOCKS_CF },
    OpSpec { file: "sbb8.bin", label: "sbb", kind: Kind::Pair8(alu::sbb8), blocks: BLOCKS_CF },
    OpSpec { file: "shl8_1.bin", label: "shl1", kind: Kind::Single8(shl8_by1), blocks: BLOCK_ON },
    OpSpec { file: "shl8_8.bin", label: "shl", kind: Kind::Pair8(alu::shl8), blocks: BLOCK_ON },
    OpSpec { file: "shr8_1.bin", label: "shr1", kind: Kind::Single8(shr8_by1), blocks: BLOCK_ON },
    OpSpec { file: "shr8_8.bin", label: "shr", kind: Kind::Pair8(alu::shr8), blocks: BLOCK_ON },
    OpSpec { file: "sar8_1.bin", label: "sar1", kind: Kind::Single8(sar8_by1), blocks: BLOCK_ON },
    OpSpec { file: "sar8_8.bin", label: "sar", kind: Kind::Pair8(alu::sar8), blocks: BLOCK_ON },
    OpSpec { file: "rol8_1.bin", label: "rol1", kind: Kind::Single8(rol8_by1), blocks: BLOCK_ON },
    OpSpec { file: "rol8_8.bin", label: "rol", kind: Kind::Pair8(alu::rol8), blocks: BLOCK_ON },
    OpSpec { file: "ror8_1.bin", label: "ror1", kind: Kind::Single8(ror8_by1), blocks: BLOCK_ON },
    OpSpec { file: "ror8_8.bin", label: "ror", kind: Kind::Pair8(alu::ror8), blocks: BLOCK_ON },
    OpSpec { file: "rcl8_1.bin", label: "rcl1", kind: Kind::Single8(rcl8_by1), blocks: BLOCKS_CF },
    OpSpec { file: "rcl8_8.bin", label: "rcl", kind: Kind::Pair8(alu::rcl8), blocks: BLOCKS_CF },
    OpSpec { file: "rcr8_1.bin", label: "rcr1", kind: Kind::Single8(rcr8_by1), blocks: BLOCKS_CF },
    OpSpec { file: "rcr8_8.bin", label: "rcr", kind: Kind::Pair8(alu::rcr8), blocks: BLOCKS_CF },
    OpSpec { file: "or8.bin", label: "or", kind: Kind::Pair8(alu::or8), blocks: BLOCK_ON },
    OpSpec { file: "and8.bin", label: "and", kind: Kind::Pair8(alu::and8), blocks: BLOCK_ON },
    OpSpec { file: "xor8.bin", label: "xor", kind: Kind::Pair8(alu::xor8), blocks: BLOCK_ON },
    OpSpec { file: "inc8.bin", label: "inc", kind: Kind::Single8(alu::inc8), blocks: BLOCKS_CF },
    OpSpec { file: "dec8.bin", label: "dec", kind: Kind::Single8(alu::dec8), blocks: BLOCKS_CF },
    OpSpec { file: "neg8.bin", label: "neg", kind: Kind::Single8(alu::neg8), blocks: BLOCK_ON },
    OpSpec { file: "daa.bin", label: "daa", kind: Kind::Single8(alu::daa), blocks: BLOCKS_CF_AF },
    OpSpec { file: "das.bin", label: "das", kind: Kind::Single8(alu::das), blocks: BLOCKS_CF_AF },
    OpSpec { file: "aaa.bin", label: "aaa", kind: Kind::Wide16(alu::aaa), blocks: BLOCKS_AF },
    OpSpec { file: "aas.bin", label: "aas", kind: Kind::Wide16(alu::aas), blocks: BLOCKS_AF },
];

/// Per-operation result counts for the run summary.
#[derive(Debug, Serialize)]
pub struct OpSummary {
    pub label: &'static str,
    pub file: &'static str,
    pub blocks: usize,
    pub points: u64,
}

/// Counts from a fully successful run.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub operations: usize,
    pub blocks: usize,
    pub points: u64,
    pub per_op: Vec<OpSummary>,
}

/// Labels of all configured operations, in verification order.
pub fn operation_labels() -> Vec<&'static str> {
    OPS.iter().map(|op| op.label).collect()
}

/// Run every configured operation (or just the one named by `filter`)
/// against the vector files in `dir`. Stops at the first failure.
pub fn run_all(dir: &Path, filter: Option<&str>) -> Result<Summary, HarnessError> {
    if let Some(label) = filter {
        if !OPS.iter().any(|op| op.label == label) {
            return Err(HarnessError::UnknownOp(label.to_string()));
        }
    }

    let mut summary = Summary::default();
    for op in OPS {
        if let Some(label) = filter {
            if op.label != label {
                continue;
            }
        }

        let shape = op.kind.shape();
        let entries = vectors::load(&dir.join(op.file), shape)?;

        let block_len = shape.block_len();
        let found = entries.len() / block_len;
        if found != op.blocks.len() {
            return Err(HarnessError::BlockCount {
                file: op.file,
                expected: op.blocks.len(),
                found,
            });
        }

        let mut points = 0u64;
        for (i, &initial_flags) in op.blocks.iter().enumerate() {
            let block = &entries[i * block_len..(i + 1) * block_len];
            match op.kind {
                Kind::Pair8(f) => verify::verify_op8x8(block, op.label, f, initial_flags)?,
                Kind::Single8(f) => verify::verify_op8(block, op.label, f, initial_flags)?,
                Kind::Wide16(f) => verify::verify_op16(block, op.label, f, initial_flags)?,
            }
            points += block_len as u64;
        }

        summary.operations += 1;
        summary.blocks += op.blocks.len();
        summary.points += points;
        summary.per_op.push(OpSummary {
            label: op.label,
            file: op.file,
            blocks: op.blocks.len(),
            points,
        });
    }
    Ok(summary)
}
