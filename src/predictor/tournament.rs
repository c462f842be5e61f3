//! Implementation of a tournament predictor.
//!
//! Two competing sub-predictors (a global pattern history table and a
//! per-address local predictor) with a choice table of saturating
//! counters arbitrating between them per history context. The "custom"
//! variant is the same machine with the global and choice tables
//! indexed gshare-style (PC XOR history) instead of by raw history.

use crate::Outcome;
use crate::history::HistoryRegister;
use crate::predictor::DirectionPredictor;
use crate::predictor::counter::SaturatingCounter;
use crate::predictor::table::CounterTable;

/// How a [`Tournament`] forms the index into its global and choice
/// tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalIndexing {
    /// Raw global history bits.
    History,
    /// Global history XOR'ed with the program counter.
    PcXorHistory,
}

/// Configuration for a [`Tournament`] predictor.
#[derive(Clone, Copy, Debug)]
pub struct TournamentConfig {
    /// Number of global history bits (global/choice table index width).
    pub ghist_bits: usize,
    /// Number of local history bits (local table index width).
    pub lhist_bits: usize,
    /// Number of PC bits selecting a local history entry.
    pub pc_bits: usize,
    /// Indexing strategy for the global and choice tables.
    pub indexing: GlobalIndexing,
}

impl TournamentConfig {
    /// The [approximate] number of storage bits.
    pub fn storage_bits(&self) -> usize {
        let global = (1 << self.ghist_bits) * 2 * 2;
        let local = (1 << self.lhist_bits) * 2;
        let lhist = (1 << self.pc_bits) * self.lhist_bits;
        global + local + lhist + self.ghist_bits
    }

    /// Use this configuration to create a new [`Tournament`].
    pub fn build(self) -> Tournament {
        let lhist = (0..1usize << self.pc_bits)
            .map(|_| HistoryRegister::new(self.lhist_bits))
            .collect();
        Tournament {
            global: CounterTable::new(self.ghist_bits),
            choice: CounterTable::new(self.ghist_bits),
            local: CounterTable::new(self.lhist_bits),
            lhist,
            ghr: HistoryRegister::new(self.ghist_bits),
            cfg: self,
        }
    }
}

/// A tournament predictor.
pub struct Tournament {
    cfg: TournamentConfig,
    /// Global pattern history table
    global: CounterTable,
    /// Choice table (values 0-1 lean global, 2-3 lean local)
    choice: CounterTable,
    /// Local pattern history table
    local: CounterTable,
    /// Per-address local history registers
    lhist: Vec<HistoryRegister>,
    /// Global history register
    ghr: HistoryRegister,
}

impl Tournament {
    pub fn config(&self) -> &TournamentConfig {
        &self.cfg
    }

    /// Index into the global and choice tables under the current
    /// global history.
    fn global_index(&self, pc: u32) -> usize {
        let raw = match self.cfg.indexing {
            GlobalIndexing::History => self.ghr.value(),
            GlobalIndexing::PcXorHistory => pc as usize ^ self.ghr.value(),
        };
        raw & self.global.index_mask()
    }

    /// Index into the per-address local history table.
    fn pc_index(&self, pc: u32) -> usize {
        pc as usize & (self.lhist.len() - 1)
    }

    /// Index into the local pattern history table for the branch at
    /// `pc`, read from its current local history.
    fn local_index(&self, pc: u32) -> usize {
        self.lhist[self.pc_index(pc)].value() & self.local.index_mask()
    }
}

impl DirectionPredictor for Tournament {
    fn name(&self) -> &'static str {
        match self.cfg.indexing {
            GlobalIndexing::History => "Tournament",
            GlobalIndexing::PcXorHistory => "Custom",
        }
    }

    fn reset(&mut self) {
        self.global.reset();
        self.choice.reset();
        self.local.reset();
        for reg in self.lhist.iter_mut() {
            reg.clear();
        }
        self.ghr.clear();
    }

    fn predict(&self, pc: u32) -> Outcome {
        let g_idx = self.global_index(pc);
        // Choice values at or below weakly-not-taken select the global
        // sub-predictor; weakly-taken and above select the local one.
        if self.choice.get(g_idx).value() <= SaturatingCounter::WN {
            self.global.get(g_idx).predict()
        } else {
            self.local.get(self.local_index(pc)).predict()
        }
    }

    fn train(&mut self, pc: u32, outcome: Outcome) {
        // Indices and sub-predictions are captured before any state
        // moves; steps 5 and 7 overwrite what steps 1-2 read.
        let g_idx = self.global_index(pc);
        let p_idx = self.pc_index(pc);
        let l_idx = self.local_index(pc);
        let g_result = self.global.get(g_idx).predict();
        let l_result = self.local.get(l_idx).predict();

        self.global.get_mut(g_idx).update(outcome);
        self.local.get_mut(l_idx).update(outcome);
        self.lhist[p_idx].shift_in(outcome);

        // Only move the choice counter when exactly one side was right.
        if g_result == outcome && l_result != outcome {
            self.choice.get_mut(g_idx).decrement();
        }
        if l_result == outcome && g_result != outcome {
            self.choice.get_mut(g_idx).increment();
        }

        self.ghr.shift_in(outcome);
    }
}
