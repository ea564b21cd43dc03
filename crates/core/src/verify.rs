//! Per-operation verification against a golden-vector block.
//!
//! Each verifier walks one operation's full input domain in the fixed
//! enumeration order, applies the model, and compares value and flags
//! against the vector entry at the same index. The first mismatch
//! stops the walk and comes back as a `Mismatch` value; the driver
//! decides what to do with it (fail-fast), there is no early process
//! exit buried in here.

use std::fmt;

use crate::flags::{decode_flags, format_bin, Flags};
use crate::vectors::{Shape, VectorEntry};

/// Model function over two 8-bit operands (the second operand doubles
/// as the count for the by-count shift/rotate families).
pub type Op8x8 = fn(u8, u8, Flags) -> (u8, Flags);
/// Model function over one 8-bit operand.
pub type Op8 = fn(u8, Flags) -> (u8, Flags);
/// Model function over one 16-bit operand.
pub type Op16 = fn(u16, Flags) -> (u16, Flags);

/// First failing domain point of an operation, with enough context to
/// reconstruct the reference diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub label: String,
    pub a: u16,
    pub b: Option<u16>,
    /// 16-bit result width (aaa/aas); affects hex formatting only.
    pub wide: bool,
    pub initial_flags: Flags,
    pub got_value: u16,
    pub got_flags: Flags,
    pub expected_value: u16,
    pub expected_flags: Flags,
}

impl Mismatch {
    fn fmt_val(&self, v: u16) -> String {
        if self.wide {
            format!("{:04x}", v)
        } else {
            format!("{:02x}", v)
        }
    }

    /// "01 + 02" or "daa 9a", matching the result/expected lines.
    fn fmt_input(&self) -> String {
        match self.b {
            Some(b) => format!("{} {} {}", self.fmt_val(self.a), self.label, self.fmt_val(b)),
            None => format!("{} {}", self.fmt_val(self.a), self.label),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.got_value != self.expected_value {
            writeln!(
                f,
                "*** RESULT MISMATCH: got {:x} expected {:x}",
                self.got_value, self.expected_value
            )?;
        }
        if self.got_flags != self.expected_flags {
            writeln!(
                f,
                "*** FLAGS MISMATCH: got {} ({:x}) expected {} ({:x}), initial flags {} ({:x})",
                decode_flags(self.got_flags),
                self.got_flags,
                decode_flags(self.expected_flags),
                self.expected_flags,
                decode_flags(self.initial_flags),
                self.initial_flags,
            )?;
        }

        writeln!(
            f,
            ">: {} = {}   flags {:04x} {}",
            self.fmt_input(),
            self.fmt_val(self.got_value),
            self.got_flags,
            decode_flags(self.got_flags)
        )?;
        writeln!(
            f,
            "e: {} = {}   flags {:04x} {}",
            self.fmt_input(),
            self.fmt_val(self.expected_value),
            self.expected_flags,
            decode_flags(self.expected_flags)
        )?;

        // Binary visualization of the operands and the expected result,
        // for eyeballing which bit went wrong.
        writeln!(f, "          {}", format_bin(self.a as u8))?;
        if let Some(b) = self.b {
            writeln!(f, " {:>8} {}", self.label, format_bin(b as u8))?;
        } else {
            writeln!(f, " {:>8}", self.label)?;
        }
        writeln!(f, "====================")?;
        write!(f, "          {}", format_bin(self.expected_value as u8))
    }
}

impl std::error::Error for Mismatch {}

fn check(
    label: &str,
    a: u16,
    b: Option<u16>,
    wide: bool,
    initial_flags: Flags,
    got: (u16, Flags),
    expected: VectorEntry,
) -> Result<(), Box<Mismatch>> {
    let (got_value, got_flags) = got;
    if got_value == expected.value && got_flags == expected.flags {
        return Ok(());
    }
    Err(Box::new(Mismatch {
        label: label.to_string(),
        a,
        b,
        wide,
        initial_flags,
        got_value,
        got_flags,
        expected_value: expected.value,
        expected_flags: expected.flags,
    }))
}

/// Verify one 8x8 block: all (a, b) pairs, a-major then b-minor.
pub fn verify_op8x8(
    entries: &[VectorEntry],
    label: &str,
    op: Op8x8,
    initial_flags: Flags,
) -> Result<(), Box<Mismatch>> {
    debug_assert_eq!(entries.len(), Shape::Pair8.block_len());
    println!(
        "Testing {} (8x8 bit input, initial flags: {})",
        label,
        decode_flags(initial_flags)
    );

    for a in 0..=255u16 {
        for b in 0..=255u16 {
            let (res, fl) = op(a as u8, b as u8, initial_flags);
            let expected = entries[(a as usize) * 256 + b as usize];
            check(label, a, Some(b), false, initial_flags, (res as u16, fl), expected)?;
        }
    }
    Ok(())
}

/// Verify one 8-bit block: all 256 values of the single operand.
pub fn verify_op8(
    entries: &[VectorEntry],
    label: &str,
    op: Op8,
    initial_flags: Flags,
) -> Result<(), Box<Mismatch>> {
    debug_assert_eq!(entries.len(), Shape::Single8.block_len());
    println!(
        "Testing {} (8 bit input, initial flags: {})",
        label,
        decode_flags(initial_flags)
    );

    for a in 0..=255u16 {
        let (res, fl) = op(a as u8, initial_flags);
        let expected = entries[a as usize];
        check(label, a, None, false, initial_flags, (res as u16, fl), expected)?;
    }
    Ok(())
}

/// Verify one 16-bit block: all 65536 values of the single operand.
pub fn verify_op16(
    entries: &[VectorEntry],
    label: &str,
    op: Op16,
    initial_flags: Flags,
) -> Result<(), Box<Mismatch>> {
    debug_assert_eq!(entries.len(), Shape::Single16.block_len());
    println!(
        "Testing {} (16 bit input, initial flags: {})",
        label,
        decode_flags(initial_flags)
    );

    for a in 0..=65535u16 {
        let (res, fl) = op(a, initial_flags);
        let expected = entries[a as usize];
        check(label, a, None, true, initial_flags, (res, fl), expected)?;
    }
    Ok(())
}
