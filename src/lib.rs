//! Simulation of the branch *direction* predictors used by a CPU
//! front-end: per-branch saturating-counter tables indexed by program
//! counter and/or branch-history bits, with a tournament meta-predictor
//! arbitrating between global and local sub-predictors.
//!
//! The crate replays a recorded trace of `(pc, outcome)` pairs through
//! one configured predictor at a time. There is no pipeline timing
//! model here; a "prediction" is just the answer the front-end would
//! have guessed before the branch resolved.

pub mod history;
pub mod predictor;
pub mod stats;
pub mod trace;

pub use history::*;
pub use predictor::*;

/// A branch outcome.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N,
    /// Taken
    T,
}

impl Outcome {
    pub fn is_taken(&self) -> bool {
        matches!(self, Self::T)
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N,
        }
    }
}

impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool {
        match x {
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}
