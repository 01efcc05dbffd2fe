//! Implementation of a 2-bit saturating counter.

use crate::branch::Outcome;
use crate::predictor::StatefulPredictor;

/// A 2-bit saturating counter used to follow the behavior of a branch.
///
/// The four states are, in order: strongly not-taken, weakly not-taken,
/// weakly taken, and strongly taken. The counter predicts 'taken' in
/// either of the two upper states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaturatingCounter(u8);
impl SaturatingCounter {
    /// Strongly not-taken
    pub const SN: Self = Self(0);
    /// Weakly not-taken
    pub const WN: Self = Self(1);
    /// Weakly taken
    pub const WT: Self = Self(2);
    /// Strongly taken
    pub const ST: Self = Self(3);

    /// Create a counter in some state. Values above [`Self::ST`] saturate.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::SN.0, Self::ST.0))
    }

    pub fn value(&self) -> u8 { self.0 }

    pub fn inc(&mut self) { self.0 = (self.0 + 1).min(Self::ST.0); }
    pub fn dec(&mut self) { self.0 = self.0.saturating_sub(1); }

    /// Returns 'true' if the counter is in one of the taken states.
    pub fn is_taken(&self) -> bool { *self >= Self::WT }
}

impl Default for SaturatingCounter {
    fn default() -> Self { Self::WN }
}

impl StatefulPredictor for SaturatingCounter {
    fn name(&self) -> &'static str { "SaturatingCounter" }
    fn predict(&self) -> Outcome { Outcome::from(self.is_taken()) }
    fn reset(&mut self) { *self = Self::default(); }
    fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.inc(),
            Outcome::N => self.dec(),
        }
    }
}
