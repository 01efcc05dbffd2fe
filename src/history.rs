//! History registers.

use crate::branch::Outcome;

/// Return a mask covering the low `bits` bits of a 32-bit value.
///
/// Widths from 0 to 32 are well-defined; a width of zero yields an empty
/// mask, which forces every index into a single table entry.
#[inline]
pub fn mask(bits: u32) -> u32 {
    ((1u64 << bits) - 1) as u32
}

/// A shift register holding the most recent outcomes, newest in bit 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    value: u32,
    len: u32,
}

// NOTE: This prints the newest outcome as the rightmost digit.
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.len == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.value, width = self.len as usize)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: u32) -> Self {
        Self { value: 0, len }
    }

    pub fn len(&self) -> u32 { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn value(&self) -> u32 { self.value }
    pub fn mask(&self) -> u32 { mask(self.len) }

    /// Shift an outcome into the register.
    /// The oldest bit falls off the top.
    pub fn shift_in(&mut self, outcome: Outcome) {
        self.value = ((self.value << 1) | outcome.bit()) & self.mask();
    }

    /// Clear all bits in the register.
    pub fn clear(&mut self) {
        self.value = 0;
    }
}
