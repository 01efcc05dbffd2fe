//! Generating synthetic branch traces.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::branch::*;

/// A pre-determined pattern of outcomes associated with a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BranchPattern {
    /// A branch whose outcome is always 'taken'.
    AlwaysTaken,

    /// A branch whose outcome is always 'not-taken'.
    NeverTaken,

    /// A branch whose outcome is only periodically "taken".
    /// Otherwise, the branch is "not-taken" by default.
    TakenPeriodic(usize),

    /// A branch whose outcome is only periodically "not-taken".
    /// Otherwise, the branch is "taken" by default.
    NotTakenPeriodic(usize),

    /// A branch with an arbitrary repeating pattern of outcomes.
    Pattern(&'static [Outcome]),

    /// A branch which is taken with some probability.
    Random(f64),
}
impl BranchPattern {
    /// Given the number of times this branch has been seen, generate an
    /// outcome.
    pub fn outcome(&self, ctr: usize, rng: &mut impl Rng) -> Outcome {
        match self {
            Self::AlwaysTaken => Outcome::T,
            Self::NeverTaken => Outcome::N,
            Self::TakenPeriodic(p) => {
                if ctr % p == (p - 1) { Outcome::T } else { Outcome::N }
            },
            Self::NotTakenPeriodic(p) => {
                if ctr % p == (p - 1) { Outcome::N } else { Outcome::T }
            },
            Self::Pattern(pat) => pat[ctr % pat.len()],
            Self::Random(p) => Outcome::from(rng.gen_bool(p.clamp(0.0, 1.0))),
        }
    }
}

/// Emits [BranchRecord]s by visiting a list of branches in order, over and
/// over again.
#[derive(Debug)]
pub struct SyntheticTrace {
    /// Program counter and outcome pattern for each branch
    branches: Vec<(u32, BranchPattern)>,

    /// Number of times each branch has been visited
    ctr: Vec<usize>,

    /// Index of the next branch to visit
    cur: usize,

    rng: StdRng,
}
impl SyntheticTrace {
    /// Create a trace. Random patterns draw from a generator seeded with
    /// `seed`, so the same seed always produces the same trace.
    pub fn new(seed: u64) -> Self {
        Self {
            branches: Vec::new(),
            ctr: Vec::new(),
            cur: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Add a branch at `pc` with some pattern of outcomes.
    pub fn branch(mut self, pc: u32, pat: BranchPattern) -> Self {
        if let BranchPattern::TakenPeriodic(p) | BranchPattern::NotTakenPeriodic(p) = pat {
            assert!(p > 0, "periodic patterns need a nonzero period");
        }
        if let BranchPattern::Pattern(p) = pat {
            assert!(!p.is_empty(), "empty outcome pattern");
        }
        self.branches.push((pc, pat));
        self.ctr.push(0);
        self
    }

    /// Generate the next `n` records.
    pub fn generate(&mut self, n: usize) -> Vec<BranchRecord> {
        self.by_ref().take(n).collect()
    }
}

impl Iterator for SyntheticTrace {
    type Item = BranchRecord;

    fn next(&mut self) -> Option<BranchRecord> {
        if self.branches.is_empty() {
            return None;
        }
        let (pc, pat) = self.branches[self.cur];
        let outcome = pat.outcome(self.ctr[self.cur], &mut self.rng);
        self.ctr[self.cur] += 1;
        self.cur = (self.cur + 1) % self.branches.len();
        Some(BranchRecord::new(pc, outcome))
    }
}
