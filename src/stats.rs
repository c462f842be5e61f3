//! Helpers for collecting statistics while replaying a trace.

use crate::Outcome;
use bitvec::prelude::*;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Container for recording statistics while evaluating a predictor
/// against one trace.
pub struct TraceStats {
    /// Per-branch statistics (indexed by program counter value).
    data: BTreeMap<u32, BranchData>,

    /// Number of correct predictions
    hits: usize,

    /// Number of predicted branches
    brns: usize,
}

impl TraceStats {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            hits: 0,
            brns: 0,
        }
    }

    /// Record one predicted branch and its resolved outcome.
    pub fn update(&mut self, pc: u32, predicted: Outcome, outcome: Outcome) {
        let hit = predicted == outcome;
        self.brns += 1;
        if hit {
            self.hits += 1;
        }
        let data = self.data.entry(pc).or_insert_with(BranchData::new);
        data.occ += 1;
        data.pat.push(outcome.into());
        if hit {
            data.hits += 1;
        }
    }

    /// Return the global hit count.
    pub fn hits(&self) -> usize { self.hits }

    /// Return the global miss count.
    pub fn misses(&self) -> usize { self.brns - self.hits }

    /// Return the total branch count.
    pub fn brns(&self) -> usize { self.brns }

    /// Return the global hit rate.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.brns as f64
    }

    /// Return the global misprediction rate.
    pub fn mispredict_rate(&self) -> f64 {
        self.misses() as f64 / self.brns as f64
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: u32) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// The `n` most-executed branches with the worst hit rates.
    pub fn get_low_rate_branches(&self, n: usize)
        -> Vec<(u32, &BranchData)>
    {
        self.data.iter()
            .filter(|(_, s)| s.occ > 100 && s.hit_rate() <= 0.55)
            .sorted_by(|x, y| x.1.occ.cmp(&y.1.occ))
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

impl Default for TraceStats {
    fn default() -> Self { Self::new() }
}

/// Container for per-branch statistics.
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVec,
}

impl BranchData {
    pub fn new() -> Self {
        Self {
            occ: 0,
            hits: 0,
            pat: BitVec::new(),
        }
    }

    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }

    /// Number of times this branch was taken.
    pub fn times_taken(&self) -> usize {
        self.pat.count_ones()
    }
}

impl Default for BranchData {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome::{N, T};

    #[test]
    fn counts_hits_and_misses() {
        let mut stats = TraceStats::new();
        stats.update(0x40, T, T);
        stats.update(0x40, T, N);
        stats.update(0x44, N, N);
        assert_eq!(stats.brns(), 3);
        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert!((stats.mispredict_rate() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.num_unique_branches(), 2);
    }

    #[test]
    fn tracks_per_branch_patterns() {
        let mut stats = TraceStats::new();
        stats.update(0x40, N, T);
        stats.update(0x40, N, T);
        stats.update(0x40, N, N);
        let data = stats.get(0x40).unwrap();
        assert_eq!(data.occ, 3);
        assert_eq!(data.hits, 1);
        assert_eq!(data.times_taken(), 2);
    }

    #[test]
    fn low_rate_report_prefers_hot_branches() {
        let mut stats = TraceStats::new();
        // Hot, badly-predicted branch.
        for _ in 0..200 {
            stats.update(0x100, N, T);
        }
        // Hot, well-predicted branch.
        for _ in 0..200 {
            stats.update(0x200, T, T);
        }
        // Cold, badly-predicted branch: below the occurrence floor.
        for _ in 0..10 {
            stats.update(0x300, N, T);
        }
        let worst = stats.get_low_rate_branches(4);
        assert_eq!(worst.len(), 1);
        assert_eq!(worst[0].0, 0x100);
    }
}
