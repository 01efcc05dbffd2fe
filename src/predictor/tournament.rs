//! Tournament predictors: a local and a global predictor arbitrated by a
//! table of choice counters.
//!
//! See "The Alpha 21264 Microprocessor" (Kessler, 1999).

use crate::branch::Outcome;
use crate::history::*;
use crate::predictor::*;

/// The strategy used to form an index into the global and choice tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalIndexing {
    /// Index with global history alone.
    History,

    /// Index with the program counter XOR'ed with global history.
    PcXorHistory,
}

/// Indices computed for a single branch before any table is updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TournamentIndices {
    /// Index into the local history table
    lht: usize,
    /// Index into the local PHT (from the local history pattern)
    local: usize,
    /// Index into both the global and choice PHTs
    global: usize,
}

#[derive(Clone, Debug)]
pub struct TournamentPredictor {
    indexing: GlobalIndexing,

    /// Global history register
    ghr: HistoryRegister,

    /// Per-branch local history (`2^pc_index_bits` entries)
    lht: LocalHistoryTable,

    /// Counters indexed by local history (`2^lhistory_bits` entries)
    local_pht: PatternHistoryTable,

    /// Counters indexed by global history (`2^ghistory_bits` entries)
    global_pht: PatternHistoryTable,

    /// Choice counters; a taken reading selects the global prediction.
    choice_pht: PatternHistoryTable,
}
impl TournamentPredictor {
    pub fn new(indexing: GlobalIndexing,
        ghistory_bits: u32, lhistory_bits: u32, pc_index_bits: u32
    ) -> Self
    {
        Self {
            indexing,
            ghr: HistoryRegister::new(ghistory_bits),
            lht: LocalHistoryTable::new(pc_index_bits, lhistory_bits),
            local_pht: PatternHistoryTable::new(lhistory_bits,
                SaturatingCounter::WN),
            global_pht: PatternHistoryTable::new(ghistory_bits,
                SaturatingCounter::WN),
            choice_pht: PatternHistoryTable::new(ghistory_bits,
                SaturatingCounter::WT),
        }
    }

    pub fn indexing(&self) -> GlobalIndexing { self.indexing }
    pub fn ghr(&self) -> &HistoryRegister { &self.ghr }
    pub fn lht(&self) -> &LocalHistoryTable { &self.lht }
    pub fn local_pht(&self) -> &PatternHistoryTable { &self.local_pht }
    pub fn global_pht(&self) -> &PatternHistoryTable { &self.global_pht }
    pub fn choice_pht(&self) -> &PatternHistoryTable { &self.choice_pht }

    /// Return the index into the global and choice tables for a branch at
    /// `pc`, given the current state of global history.
    pub fn global_index(&self, pc: u32) -> usize {
        let input = match self.indexing {
            GlobalIndexing::History => self.ghr.value(),
            GlobalIndexing::PcXorHistory => pc ^ self.ghr.value(),
        };
        self.global_pht.get_index(input)
    }

    fn indices(&self, pc: u32) -> TournamentIndices {
        let lht = self.lht.get_index(pc);
        let pattern = self.lht.get_entry(lht).value();
        TournamentIndices {
            lht,
            local: self.local_pht.get_index(pattern),
            global: self.global_index(pc),
        }
    }

    /// Return the (local, global) component predictions for a branch.
    pub fn component_predictions(&self, pc: u32) -> (Outcome, Outcome) {
        let idx = self.indices(pc);
        (
            self.local_pht.get_entry(idx.local).predict(),
            self.global_pht.get_entry(idx.global).predict(),
        )
    }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str {
        match self.indexing {
            GlobalIndexing::History => "Tournament",
            GlobalIndexing::PcXorHistory => "Custom",
        }
    }

    fn reset(&mut self) {
        self.ghr.clear();
        self.lht.reset();
        self.local_pht.reset();
        self.global_pht.reset();
        self.choice_pht.reset();
    }

    fn predict(&self, pc: u32) -> Outcome {
        let idx = self.indices(pc);
        let use_global = self.choice_pht.get_entry(idx.global).is_taken();
        if use_global {
            self.global_pht.get_entry(idx.global).predict()
        } else {
            self.local_pht.get_entry(idx.local).predict()
        }
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        // All indices are formed from the state before this update.
        let idx = self.indices(pc);

        self.local_pht.get_entry_mut(idx.local).update(outcome);
        self.global_pht.get_entry_mut(idx.global).update(outcome);

        // NOTE: The choice counter is trained with the component predictions
        // read *after* the component counters were updated.
        let local = self.local_pht.get_entry(idx.local).predict();
        let global = self.global_pht.get_entry(idx.global).predict();
        if local != global {
            let choice = self.choice_pht.get_entry_mut(idx.global);
            if global == outcome {
                choice.inc();
            } else {
                choice.dec();
            }
        }

        self.lht.get_entry_mut(idx.lht).shift_in(outcome);
        self.ghr.shift_in(outcome);
    }
}
