//! Implementations of different branch predictors.

pub mod table;
pub mod simple;
pub mod gshare;
pub mod tournament;
pub mod counter;

pub use table::*;
pub use simple::*;
pub use gshare::*;
pub use tournament::*;
pub use counter::*;

use crate::Outcome;
use crate::config::Scheme;

/// Interface to a predictor with some internal state which is only subject to
/// change by the correct branch outcome.
pub trait StatefulPredictor {
    fn name(&self) -> &'static str;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);

    /// Return the current predicted outcome.
    fn predict(&self) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, outcome: Outcome);
}

/// Interface to a predictor that makes a prediction for a branch at some
/// program counter value.
///
/// Callers are expected to call [BranchPredictor::update] exactly once for
/// each branch, after [BranchPredictor::predict] and with the same program
/// counter value.
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Return all state to the initial (neutral) configuration.
    fn reset(&mut self);

    /// Return the predicted outcome for a branch at `pc`.
    /// This never changes the state of the predictor.
    fn predict(&self, pc: u32) -> Outcome;

    /// Train the predictor with the resolved outcome of a branch at `pc`.
    fn update(&mut self, pc: u32, outcome: Outcome);
}

/// A branch predictor selected at configuration time.
///
/// Each variant owns exactly the tables its scheme needs. Build one with
/// [crate::config::PredictorConfig::build].
#[derive(Clone, Debug)]
pub enum Predictor {
    /// Always predict 'taken'.
    Static(TakenPredictor),

    /// Global history XOR'ed with the program counter.
    Gshare(GsharePredictor),

    /// Local and global predictors arbitrated by global history.
    Tournament(TournamentPredictor),

    /// A tournament predictor whose global and choice tables are indexed
    /// by the program counter XOR'ed with global history.
    Custom(TournamentPredictor),
}

impl Predictor {
    /// Return the scheme implemented by this predictor.
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::Static(_) => Scheme::Static,
            Self::Gshare(_) => Scheme::Gshare,
            Self::Tournament(_) => Scheme::Tournament,
            Self::Custom(_) => Scheme::Custom,
        }
    }

    /// Put every table and history register back into its initial state.
    pub fn initialize(&mut self) {
        self.reset();
    }

    fn inner(&self) -> &dyn BranchPredictor {
        match self {
            Self::Static(p) => p,
            Self::Gshare(p) => p,
            Self::Tournament(p) | Self::Custom(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn BranchPredictor {
        match self {
            Self::Static(p) => p,
            Self::Gshare(p) => p,
            Self::Tournament(p) | Self::Custom(p) => p,
        }
    }
}

impl BranchPredictor for Predictor {
    fn name(&self) -> &'static str { self.inner().name() }
    fn reset(&mut self) { self.inner_mut().reset() }
    fn predict(&self, pc: u32) -> Outcome { self.inner().predict(pc) }
    fn update(&mut self, pc: u32, outcome: Outcome) {
        self.inner_mut().update(pc, outcome)
    }
}
