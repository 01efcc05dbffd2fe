//! Driving a predictor with a stream of branch records.

use log::{ debug, trace };

use crate::branch::*;
use crate::predictor::*;
use crate::stats::*;

/// Runs a [BranchPredictor] over a trace and keeps score.
///
/// Each record is handled strictly in order: predict, score, then train.
/// Global history carries a dependency from every branch to the next, so
/// records are never reordered or batched.
pub struct Simulator<P> {
    predictor: P,
    stats: BranchStats,

    /// Collect per-branch statistics in addition to global counts.
    per_branch: bool,
}

impl<P: BranchPredictor> Simulator<P> {
    pub fn new(predictor: P) -> Self {
        debug!("simulating {} predictor", predictor.name());
        Self { predictor, stats: BranchStats::new(), per_branch: false }
    }

    /// Also collect statistics for each unique branch.
    pub fn with_per_branch_stats(mut self) -> Self {
        self.per_branch = true;
        self
    }

    pub fn predictor(&self) -> &P { &self.predictor }
    pub fn stats(&self) -> &BranchStats { &self.stats }

    /// Consume the simulator, returning the predictor and statistics.
    pub fn finish(self) -> (P, BranchStats) {
        (self.predictor, self.stats)
    }

    /// Predict, score, and train on a single branch.
    /// Returns the prediction that was made.
    pub fn step(&mut self, record: &BranchRecord) -> Outcome {
        let prediction = self.predictor.predict(record.pc);
        trace!("{:08x} pred={:?} outcome={:?}",
            record.pc, prediction, record.outcome);

        self.stats.update_global(record, prediction);
        if self.per_branch {
            self.stats.update_per_branch(record, prediction);
        }

        self.predictor.update(record.pc, record.outcome);
        prediction
    }

    /// Run over every record.
    pub fn run<'a>(&mut self, records: impl IntoIterator<Item = &'a BranchRecord>) {
        for record in records {
            self.step(record);
        }
    }

    /// Run over a stream of records that may fail to be produced, stopping
    /// at the first error.
    pub fn try_run<E>(&mut self,
        records: impl IntoIterator<Item = Result<BranchRecord, E>>
    ) -> Result<(), E>
    {
        for record in records {
            self.step(&record?);
        }
        Ok(())
    }
}
