//! Implementation of a gshare predictor.
//!
//! A single pattern history table shared by every branch, indexed by
//! the program counter XOR'ed with global history. Folding the PC into
//! the history lets one table capture both per-address bias and recent
//! global correlation without a separate per-PC structure.

use crate::Outcome;
use crate::history::HistoryRegister;
use crate::predictor::DirectionPredictor;
use crate::predictor::table::CounterTable;

/// Configuration for a [`Gshare`] predictor.
#[derive(Clone, Copy, Debug)]
pub struct GshareConfig {
    /// Number of global history bits (also the table index width).
    pub ghist_bits: usize,
}

impl GshareConfig {
    /// The [approximate] number of storage bits.
    pub fn storage_bits(&self) -> usize {
        (1 << self.ghist_bits) * 2 + self.ghist_bits
    }

    /// Use this configuration to create a new [`Gshare`].
    pub fn build(self) -> Gshare {
        Gshare {
            pht: CounterTable::new(self.ghist_bits),
            ghr: HistoryRegister::new(self.ghist_bits),
            cfg: self,
        }
    }
}

/// A gshare predictor.
pub struct Gshare {
    cfg: GshareConfig,
    /// Pattern history table
    pht: CounterTable,
    /// Global history register
    ghr: HistoryRegister,
}

impl Gshare {
    pub fn config(&self) -> &GshareConfig {
        &self.cfg
    }

    /// Form the table index for the branch at `pc` under the current
    /// global history. The table mask truncates the XOR to the index
    /// width.
    fn index(&self, pc: u32) -> usize {
        (pc as usize ^ self.ghr.value()) & self.pht.index_mask()
    }
}

impl DirectionPredictor for Gshare {
    fn name(&self) -> &'static str { "Gshare" }

    fn reset(&mut self) {
        self.pht.reset();
        self.ghr.clear();
    }

    fn predict(&self, pc: u32) -> Outcome {
        self.pht.get(self.index(pc)).predict()
    }

    fn train(&mut self, pc: u32, outcome: Outcome) {
        // Same index the prediction used: history not yet shifted.
        let idx = self.index(pc);
        self.pht.get_mut(idx).update(outcome);
        self.ghr.shift_in(outcome);
    }
}
