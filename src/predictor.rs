//! Implementations of different branch predictors.

pub mod bpu;
pub mod counter;
pub mod gshare;
pub mod simple;
pub mod table;
pub mod tournament;

pub use bpu::*;
pub use counter::*;
pub use gshare::*;
pub use simple::*;
pub use table::*;
pub use tournament::*;

use crate::Outcome;

/// Interface to a "trivial" predictor that guesses an outcome without
/// accepting feedback from the rest of the machine.
pub trait SimplePredictor {
    fn name(&self) -> &'static str;
    fn predict(&self) -> Outcome;
}

/// Interface to a predictor indexed by the program counter of a
/// conditional branch.
///
/// Callers are expected to drive this in strict trace order: one
/// `predict` for a branch, then one `train` with the resolved outcome,
/// before moving to the next branch. Nothing here enforces the
/// pairing; `predict` is a pure read and `train` is the only mutation.
pub trait DirectionPredictor {
    fn name(&self) -> &'static str;

    /// Restore the freshly-initialized state of the predictor.
    fn reset(&mut self);

    /// Return the predicted outcome for the branch at `pc`.
    fn predict(&self, pc: u32) -> Outcome;

    /// Update the internal state with the resolved outcome of the
    /// branch at `pc`.
    fn train(&mut self, pc: u32, outcome: Outcome);
}
