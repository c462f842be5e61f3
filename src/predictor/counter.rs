//! Implementation of a two-bit saturating counter.

use crate::Outcome;

/// A two-bit saturating counter used to follow the behavior of a
/// branch.
///
/// The value walks the four states strongly-not-taken (0),
/// weakly-not-taken (1), weakly-taken (2), strongly-taken (3) and
/// saturates at both ends. The same shape doubles as the tournament
/// choice counter, where the four states read as strongly-global,
/// weakly-global, weakly-local, strongly-local instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    /// Strongly not-taken
    pub const SN: u8 = 0;
    /// Weakly not-taken
    pub const WN: u8 = 1;
    /// Weakly taken
    pub const WT: u8 = 2;
    /// Strongly taken
    pub const ST: u8 = 3;

    /// Create a counter in the weakly-not-taken state.
    pub fn new() -> Self {
        Self(Self::WN)
    }

    /// The raw counter value in `[0, 3]`.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Raise the value by one, saturating at strongly-taken.
    pub fn increment(&mut self) {
        if self.0 < Self::ST {
            self.0 += 1;
        }
    }

    /// Lower the value by one, saturating at strongly-not-taken.
    pub fn decrement(&mut self) {
        if self.0 > Self::SN {
            self.0 -= 1;
        }
    }

    /// Taken iff the counter is in one of the taken states.
    pub fn predict(&self) -> Outcome {
        (self.0 >= Self::WT).into()
    }

    /// Move the counter one step toward the resolved outcome.
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.increment(),
            Outcome::N => self.decrement(),
        }
    }
}

impl Default for SaturatingCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    #[test]
    fn saturates_at_both_ends() {
        let mut ctr = SaturatingCounter::new();
        for _ in 0..1000 {
            ctr.increment();
        }
        assert_eq!(ctr.value(), SaturatingCounter::ST);
        for _ in 0..1000 {
            ctr.decrement();
        }
        assert_eq!(ctr.value(), SaturatingCounter::SN);
    }

    #[test]
    fn taken_threshold_is_weakly_taken() {
        let mut ctr = SaturatingCounter::new();
        assert_eq!(ctr.value(), SaturatingCounter::WN);
        assert_eq!(ctr.predict(), Outcome::N);
        ctr.increment();
        assert_eq!(ctr.predict(), Outcome::T);
        ctr.decrement();
        ctr.decrement();
        assert_eq!(ctr.predict(), Outcome::N);
    }

    #[test]
    fn update_moves_toward_outcome() {
        let mut ctr = SaturatingCounter::new();
        ctr.update(Outcome::T);
        ctr.update(Outcome::T);
        assert_eq!(ctr.value(), SaturatingCounter::ST);
        ctr.update(Outcome::N);
        assert_eq!(ctr.value(), SaturatingCounter::WT);
    }
}
