
use crate::branch::Outcome;
use crate::predictor::BranchPredictor;

/// A simple predictor with no state: always predict 'taken'.
///
/// There is nothing to train, so [BranchPredictor::update] is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct TakenPredictor;
impl BranchPredictor for TakenPredictor {
    fn name(&self) -> &'static str { "Static" }
    fn reset(&mut self) {}
    fn predict(&self, _pc: u32) -> Outcome { Outcome::T }
    fn update(&mut self, _pc: u32, _outcome: Outcome) {}
}
