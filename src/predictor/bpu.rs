//! Top-level branch prediction unit: mode selection and dispatch.
//!
//! Exactly one predictor variant's state exists at a time; the enum
//! owns it, and dropping the unit releases every table the active mode
//! allocated.

use crate::Outcome;
use crate::predictor::DirectionPredictor;
use crate::predictor::SimplePredictor;
use crate::predictor::gshare::{Gshare, GshareConfig};
use crate::predictor::simple::Baseline;
use crate::predictor::tournament::{
    GlobalIndexing, Tournament, TournamentConfig,
};
use std::str::FromStr;
use thiserror::Error;

/// Widest supported history/index field. Past this the tables stop
/// modeling anything a front-end would build (a 24-bit index is
/// already a 16M-entry table).
pub const MAX_INDEX_BITS: usize = 24;

/// Which predictor the unit models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Always predict taken.
    Static,
    /// Single table indexed by PC XOR global history.
    Gshare,
    /// Global vs. local sub-predictors with a choice table.
    Tournament,
    /// Tournament with gshare-style global/choice indexing.
    Custom,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Gshare => "gshare",
            Self::Tournament => "tournament",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "gshare" => Ok(Self::Gshare),
            "tournament" => Ok(Self::Tournament),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Rejected predictor configurations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown predictor mode '{0}'")]
    UnknownMode(String),

    #[error("{0} must be at least 1 bit wide")]
    ZeroWidth(&'static str),

    #[error("{field} is limited to {MAX_INDEX_BITS} bits (got {got})")]
    ExcessiveWidth { field: &'static str, got: usize },
}

/// Configuration for a [`BranchPredictor`].
///
/// Only the fields the selected mode actually indexes with are
/// validated; static mode ignores all three widths.
#[derive(Clone, Copy, Debug)]
pub struct BranchPredictorConfig {
    pub mode: Mode,
    /// Number of global history bits.
    pub ghist_bits: usize,
    /// Number of local history bits.
    pub lhist_bits: usize,
    /// Number of PC bits indexing the local history table.
    pub pc_bits: usize,
}

impl BranchPredictorConfig {
    /// Use this configuration to create a new [`BranchPredictor`],
    /// allocating exactly the tables the mode needs.
    pub fn build(self) -> Result<BranchPredictor, ConfigError> {
        let res = match self.mode {
            Mode::Static => BranchPredictor::Static(Baseline::AlwaysTaken),
            Mode::Gshare => {
                check_width("ghistory bits", self.ghist_bits)?;
                BranchPredictor::Gshare(
                    GshareConfig { ghist_bits: self.ghist_bits }.build(),
                )
            }
            Mode::Tournament | Mode::Custom => {
                check_width("ghistory bits", self.ghist_bits)?;
                check_width("lhistory bits", self.lhist_bits)?;
                check_width("pc index bits", self.pc_bits)?;
                let indexing = match self.mode {
                    Mode::Custom => GlobalIndexing::PcXorHistory,
                    _ => GlobalIndexing::History,
                };
                let t = TournamentConfig {
                    ghist_bits: self.ghist_bits,
                    lhist_bits: self.lhist_bits,
                    pc_bits: self.pc_bits,
                    indexing,
                }
                .build();
                match self.mode {
                    Mode::Custom => BranchPredictor::Custom(t),
                    _ => BranchPredictor::Tournament(t),
                }
            }
        };
        log::debug!(
            "built {} predictor (g={}, l={}, p={})",
            self.mode, self.ghist_bits, self.lhist_bits, self.pc_bits
        );
        Ok(res)
    }
}

fn check_width(field: &'static str, bits: usize) -> Result<(), ConfigError> {
    if bits == 0 {
        return Err(ConfigError::ZeroWidth(field));
    }
    if bits > MAX_INDEX_BITS {
        return Err(ConfigError::ExcessiveWidth { field, got: bits });
    }
    Ok(())
}

/// A configured branch prediction unit.
///
/// Any `(pc, outcome)` pair is valid input to a built unit; indices
/// are masked to each table's width, so `predict` and `train` cannot
/// fail.
pub enum BranchPredictor {
    Static(Baseline),
    Gshare(Gshare),
    Tournament(Tournament),
    Custom(Tournament),
}

impl BranchPredictor {
    /// The mode this unit was built with.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Static(_) => Mode::Static,
            Self::Gshare(_) => Mode::Gshare,
            Self::Tournament(_) => Mode::Tournament,
            Self::Custom(_) => Mode::Custom,
        }
    }
}

impl DirectionPredictor for BranchPredictor {
    fn name(&self) -> &'static str {
        match self {
            Self::Static(_) => "Static",
            Self::Gshare(g) => g.name(),
            Self::Tournament(t) | Self::Custom(t) => t.name(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Static(_) => {}
            Self::Gshare(g) => g.reset(),
            Self::Tournament(t) | Self::Custom(t) => t.reset(),
        }
    }

    fn predict(&self, pc: u32) -> Outcome {
        match self {
            Self::Static(p) => p.predict(),
            Self::Gshare(g) => g.predict(pc),
            Self::Tournament(t) | Self::Custom(t) => t.predict(pc),
        }
    }

    fn train(&mut self, pc: u32, outcome: Outcome) {
        match self {
            // Nothing to learn.
            Self::Static(_) => {}
            Self::Gshare(g) => g.train(pc, outcome),
            Self::Tournament(t) | Self::Custom(t) => t.train(pc, outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome::{N, T};

    fn cfg(mode: Mode) -> BranchPredictorConfig {
        BranchPredictorConfig {
            mode,
            ghist_bits: 4,
            lhist_bits: 4,
            pc_bits: 4,
        }
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("gshare".parse::<Mode>(), Ok(Mode::Gshare));
        assert_eq!("TOURNAMENT".parse::<Mode>(), Ok(Mode::Tournament));
        assert_eq!(
            "nonsense".parse::<Mode>(),
            Err(ConfigError::UnknownMode("nonsense".to_string()))
        );
    }

    #[test]
    fn zero_width_is_rejected() {
        let mut c = cfg(Mode::Gshare);
        c.ghist_bits = 0;
        assert_eq!(
            c.build().err(),
            Some(ConfigError::ZeroWidth("ghistory bits"))
        );

        let mut c = cfg(Mode::Tournament);
        c.lhist_bits = 0;
        assert_eq!(
            c.build().err(),
            Some(ConfigError::ZeroWidth("lhistory bits"))
        );
    }

    #[test]
    fn excessive_width_is_rejected() {
        let mut c = cfg(Mode::Custom);
        c.pc_bits = 40;
        assert_eq!(
            c.build().err(),
            Some(ConfigError::ExcessiveWidth {
                field: "pc index bits",
                got: 40
            })
        );
    }

    #[test]
    fn static_mode_ignores_width_fields() {
        let c = BranchPredictorConfig {
            mode: Mode::Static,
            ghist_bits: 0,
            lhist_bits: 0,
            pc_bits: 0,
        };
        let mut bpu = c.build().unwrap();
        assert_eq!(bpu.predict(0x1234), T);
        assert_eq!(bpu.predict(0), T);
        // Training is a no-op; the prediction never changes.
        bpu.train(0x1234, N);
        bpu.train(0x1234, N);
        assert_eq!(bpu.predict(0x1234), T);
    }

    #[test]
    fn dispatch_reaches_the_configured_variant() {
        let mut bpu = cfg(Mode::Gshare).build().unwrap();
        assert_eq!(bpu.mode(), Mode::Gshare);
        assert_eq!(bpu.name(), "Gshare");
        // Cold gshare disagrees with static taken.
        assert_eq!(bpu.predict(0), N);
        bpu.train(0, T);
        bpu.train(1, T);

        let bpu = cfg(Mode::Custom).build().unwrap();
        assert_eq!(bpu.name(), "Custom");
        let bpu = cfg(Mode::Tournament).build().unwrap();
        assert_eq!(bpu.name(), "Tournament");
    }

    #[test]
    fn build_and_drop_is_safe() {
        // Owned storage: dropping the unit is the whole teardown.
        for mode in [Mode::Static, Mode::Gshare, Mode::Tournament,
                     Mode::Custom]
        {
            let bpu = cfg(mode).build().unwrap();
            drop(bpu);
        }
    }

    #[test]
    fn reset_restores_cold_predictions() {
        let mut bpu = cfg(Mode::Tournament).build().unwrap();
        for _ in 0..8 {
            bpu.train(0x40, T);
        }
        bpu.reset();
        assert_eq!(bpu.predict(0x40), N);
    }
}
