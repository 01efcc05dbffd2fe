//! The "gshare" predictor.

use crate::branch::Outcome;
use crate::history::*;
use crate::predictor::*;

/// A single table of counters indexed by the program counter XOR'ed with
/// global history.
///
/// See "Combining Branch Predictors" (McFarling, 1993).
///
#[derive(Clone, Debug)]
pub struct GsharePredictor {
    /// Global history register
    ghr: HistoryRegister,

    /// Table of counters (`2^ghistory_bits` entries)
    pht: PatternHistoryTable,
}
impl GsharePredictor {
    pub fn new(ghistory_bits: u32) -> Self {
        Self {
            ghr: HistoryRegister::new(ghistory_bits),
            pht: PatternHistoryTable::new(ghistory_bits, SaturatingCounter::WN),
        }
    }

    /// Return the table index used for a branch at `pc`.
    pub fn index(&self, pc: u32) -> usize {
        self.pht.get_index(pc ^ self.ghr.value())
    }

    pub fn ghr(&self) -> &HistoryRegister { &self.ghr }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }
}

impl BranchPredictor for GsharePredictor {
    fn name(&self) -> &'static str { "Gshare" }

    fn reset(&mut self) {
        self.ghr.clear();
        self.pht.reset();
    }

    fn predict(&self, pc: u32) -> Outcome {
        self.pht.get_entry(self.index(pc)).predict()
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.pht.get_entry_mut(idx).update(outcome);
        self.ghr.shift_in(outcome);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(p: &GsharePredictor) -> Vec<u8> {
        p.pht().counters().iter().map(|c| c.value()).collect()
    }

    #[test]
    fn repeated_taken_at_pc4() {
        let mut p = GsharePredictor::new(2);
        assert_eq!(values(&p), vec![1, 1, 1, 1]);

        // History goes 0 -> 1 -> 3 -> 3, so the index does too.
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(p.index(4));
            p.update(4, Outcome::T);
        }
        assert_eq!(seen, vec![0, 1, 3]);
        assert_eq!(p.ghr().value(), 0b11);
        assert_eq!(values(&p), vec![2, 2, 1, 2]);

        p.update(4, Outcome::T);
        assert_eq!(values(&p), vec![2, 2, 1, 3]);
        assert_eq!(p.predict(4), Outcome::T);
    }

    #[test]
    fn predict_does_not_mutate() {
        let mut p = GsharePredictor::new(4);
        p.update(0x40, Outcome::T);
        let before = values(&p);
        let ghr = p.ghr().value();
        let first = p.predict(0x44);
        assert_eq!(p.predict(0x44), first);
        assert_eq!(values(&p), before);
        assert_eq!(p.ghr().value(), ghr);
    }

    #[test]
    fn reset_neutralizes_state() {
        let mut p = GsharePredictor::new(3);
        for pc in 0..16 { p.update(pc, Outcome::T); }
        p.reset();
        assert_eq!(p.ghr().value(), 0);
        assert!(values(&p).iter().all(|v| *v == 1));
    }

    #[test]
    fn zero_bits_single_counter() {
        let mut p = GsharePredictor::new(0);
        p.update(0x1234, Outcome::T);
        p.update(0x5678, Outcome::T);
        assert_eq!(values(&p), vec![3]);
        assert_eq!(p.ghr().value(), 0);
    }
}
