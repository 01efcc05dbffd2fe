//! Types for implementing a table of predictors.

use crate::history::*;
use crate::predictor::counter::*;

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of input to the table used to form an index.
    type Input;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Given some input, return the corresponding index into the table.
    fn get_index(&self, input: Self::Input) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        debug_assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// A table of [SaturatingCounter] with `2^bits` entries.
#[derive(Clone, Debug)]
pub struct PatternHistoryTable {
    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Initial state of every counter
    init: SaturatingCounter,
}
impl PatternHistoryTable {
    pub fn new(bits: u32, init: SaturatingCounter) -> Self {
        Self {
            data: vec![init; 1 << bits],
            init,
        }
    }

    /// Return every counter to its initial state.
    pub fn reset(&mut self) {
        self.data.fill(self.init);
    }

    pub fn counters(&self) -> &[SaturatingCounter] { &self.data }
}

impl PredictorTable for PatternHistoryTable {
    type Input = u32;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.data.len() }

    fn get_index(&self, input: u32) -> usize {
        input as usize & self.index_mask()
    }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        &self.data[idx & self.index_mask()]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}

/// A table of per-branch [HistoryRegister] indexed by low program counter
/// bits.
#[derive(Clone, Debug)]
pub struct LocalHistoryTable {
    data: Vec<HistoryRegister>,
}
impl LocalHistoryTable {
    /// Create a table with `2^pc_bits` registers, each `history_bits` wide.
    pub fn new(pc_bits: u32, history_bits: u32) -> Self {
        Self { data: vec![HistoryRegister::new(history_bits); 1 << pc_bits] }
    }

    /// Clear every register.
    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(HistoryRegister::clear);
    }
}

impl PredictorTable for LocalHistoryTable {
    type Input = u32;
    type Entry = HistoryRegister;

    fn size(&self) -> usize { self.data.len() }

    fn get_index(&self, pc: u32) -> usize {
        pc as usize & self.index_mask()
    }

    fn get_entry(&self, idx: usize) -> &HistoryRegister {
        &self.data[idx & self.index_mask()]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut HistoryRegister {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::branch::Outcome;

    #[test]
    fn zero_bits_is_one_entry() {
        let pht = PatternHistoryTable::new(0, SaturatingCounter::WN);
        assert_eq!(pht.size(), 1);
        assert_eq!(pht.get_index(0xdead_beef), 0);
    }

    #[test]
    fn index_aliases_high_bits() {
        let pht = PatternHistoryTable::new(4, SaturatingCounter::WN);
        assert_eq!(pht.get_index(0x13), 0x3);
        assert_eq!(pht.get_index(0xf3), 0x3);
    }

    #[test]
    fn reset_restores_init() {
        let mut pht = PatternHistoryTable::new(2, SaturatingCounter::WT);
        pht.get_entry_mut(1).inc();
        pht.reset();
        assert!(pht.counters().iter().all(|c| *c == SaturatingCounter::WT));
    }

    #[test]
    fn local_history_registers_are_masked() {
        let mut lht = LocalHistoryTable::new(3, 2);
        let idx = lht.get_index(0x0f);
        for _ in 0..4 { lht.get_entry_mut(idx).shift_in(Outcome::T); }
        assert_eq!(lht.get_entry(7).value(), 0b11);
        lht.reset();
        assert_eq!(lht.get_entry(7).value(), 0);
    }
}
