//! Stateless baseline predictors.

use crate::Outcome;
use crate::predictor::SimplePredictor;

/// A predictor with no state at all, used as a floor when comparing
/// the table-based predictors against a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    /// Always predict 'taken'.
    AlwaysTaken,
    /// Always predict 'not-taken'.
    AlwaysNotTaken,
    /// Flip a coin.
    Random,
}

impl Baseline {
    /// Every baseline, in report order.
    pub const ALL: [Self; 3] =
        [Self::AlwaysTaken, Self::AlwaysNotTaken, Self::Random];
}

impl SimplePredictor for Baseline {
    fn name(&self) -> &'static str {
        match self {
            Self::AlwaysTaken => "AlwaysTaken",
            Self::AlwaysNotTaken => "AlwaysNotTaken",
            Self::Random => "Random",
        }
    }

    fn predict(&self) -> Outcome {
        match self {
            Self::AlwaysTaken => Outcome::T,
            Self::AlwaysNotTaken => Outcome::N,
            Self::Random => rand::random::<bool>().into(),
        }
    }
}
