//! 8086 flags register layout, shared predicates, and the text codecs
//! used by mismatch diagnostics.
//!
//! The flags word is 16 bits wide. Only the bits below are defined for
//! the operations verified by this harness; every other bit is carried
//! through an operation untouched. Bit 1 is hardwired to 1 on the 8086
//! and every flags value this harness produces or accepts has it set.

/// Flags register value.
pub type Flags = u16;

pub const FLAG_CF: Flags = 0x0001; // Carry Flag
pub const FLAG_ON: Flags = 0x0002; // Reserved, always 1
pub const FLAG_PF: Flags = 0x0004; // Parity Flag
pub const FLAG_AF: Flags = 0x0010; // Auxiliary Carry Flag
pub const FLAG_ZF: Flags = 0x0040; // Zero Flag
pub const FLAG_SF: Flags = 0x0080; // Sign Flag
pub const FLAG_OF: Flags = 0x0800; // Overflow Flag

/// Set or clear a flag bit.
#[inline]
pub fn set_flag(flags: Flags, flag: Flags, value: bool) -> Flags {
    if value {
        flags | flag
    } else {
        flags & !flag
    }
}

/// Test a flag bit.
#[inline]
pub fn get_flag(flags: Flags, flag: Flags) -> bool {
    (flags & flag) != 0
}

/// Calculate parity (true if even number of 1 bits in the low byte).
#[inline]
pub fn calc_parity(val: u8) -> bool {
    val.count_ones() % 2 == 0
}

/// Render a flags value as a fixed-width, position-coded string.
///
/// Each defined bit occupies column `11 - bit`: the flag letter when
/// set, `'1'` for the always-one reserved bit, `'.'` otherwise.
/// Undefined bit columns are `'.'` unconditionally, so two decoded
/// strings line up column-for-column in a diff.
pub fn decode_flags(flags: Flags) -> String {
    const FLAG_LETTERS: [(Flags, char); 7] = [
        (FLAG_OF, 'O'),
        (FLAG_SF, 'S'),
        (FLAG_ZF, 'Z'),
        (FLAG_AF, 'A'),
        (FLAG_PF, 'P'),
        (FLAG_ON, '1'),
        (FLAG_CF, 'C'),
    ];

    let mut s = ['.'; 12];
    for (flag, ch) in FLAG_LETTERS {
        if flags & flag != 0 {
            let column = 11 - flag.trailing_zeros() as usize;
            s[column] = ch;
        }
    }
    s.iter().collect()
}

/// Render an 8-bit value as two binary nibbles ("0101 0101").
pub fn format_bin(v: u8) -> String {
    format!("{:04b} {:04b}", v >> 4, v & 0x0F)
}
