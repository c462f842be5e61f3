//! Shift registers for tracking recent branch outcomes.

use crate::Outcome;
use bitvec::prelude::*;

/// A fixed-width shift register of recent branch outcomes.
///
/// Bit 0 always holds the most recent outcome; shifting in a new
/// outcome discards the oldest bit. Only the configured number of bits
/// is ever stored, so a consumer indexing a smaller table still masks
/// [`Self::value`] down to its own index width at lookup time.
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This presents the register with the leftmost character as the
// oldest outcome and the rightmost as the most recent (bit 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len >= 1 && len <= usize::BITS as usize);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }

    /// Shift a new outcome into the register.
    /// Equivalent to `history = (history << 1) | outcome` truncated to
    /// the register's width.
    pub fn shift_in(&mut self, outcome: Outcome) {
        self.data.shift_right(1);
        self.data.set(0, outcome.into());
    }

    /// Read the register as an integer (bit 0 is the newest outcome).
    pub fn value(&self) -> usize {
        self.data.load::<usize>()
    }

    /// Zero the register.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome::{N, T};

    #[test]
    fn shift_order_is_preserved() {
        let mut ghr = HistoryRegister::new(8);
        ghr.shift_in(T);
        ghr.shift_in(N);
        ghr.shift_in(T);
        // Most recent outcome in bit 0.
        assert_eq!(ghr.value() & 0b111, 0b101);
        assert_eq!(format!("{}", ghr), "00000101");
    }

    #[test]
    fn oldest_bit_falls_off() {
        let mut ghr = HistoryRegister::new(2);
        for _ in 0..5 {
            ghr.shift_in(T);
        }
        ghr.shift_in(N);
        assert_eq!(ghr.value(), 0b10);
        ghr.shift_in(N);
        assert_eq!(ghr.value(), 0b00);
    }

    #[test]
    fn clear_zeroes_all_bits() {
        let mut ghr = HistoryRegister::new(4);
        ghr.shift_in(T);
        ghr.shift_in(T);
        ghr.clear();
        assert_eq!(ghr.value(), 0);
        assert_eq!(ghr.len(), 4);
    }
}
