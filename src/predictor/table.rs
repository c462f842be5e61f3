//! A table of saturating counters (a pattern history table).

use crate::predictor::counter::SaturatingCounter;

/// A power-of-two-sized table of [`SaturatingCounter`], with every
/// access masked down to the table's index width.
///
/// All entries start weakly-not-taken. The table itself knows nothing
/// about how indices are formed; each predictor derives its own index
/// from the program counter and/or history bits and relies on the mask
/// here to stay in bounds for any input.
pub struct CounterTable {
    data: Vec<SaturatingCounter>,
    size: usize,
}

impl CounterTable {
    /// Create a table with `2^index_bits` entries.
    pub fn new(index_bits: usize) -> Self {
        assert!(index_bits >= 1 && index_bits < usize::BITS as usize);
        let size = 1 << index_bits;
        Self {
            data: vec![SaturatingCounter::new(); size],
            size,
        }
    }

    /// Returns the number of entries in the table.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns a bitmask corresponding to the number of entries.
    pub fn index_mask(&self) -> usize {
        self.size - 1
    }

    /// Returns a reference to an entry in the table.
    pub fn get(&self, idx: usize) -> &SaturatingCounter {
        &self.data[idx & self.index_mask()]
    }

    /// Returns a mutable reference to an entry in the table.
    pub fn get_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }

    /// Restore every entry to the weakly-not-taken state.
    pub fn reset(&mut self) {
        self.data.fill(SaturatingCounter::new());
    }
}
