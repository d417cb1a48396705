use crate::datum::Datum;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::warn;

/// All generations read from one ms stream, keyed by generation label.
///
/// Built once by [`MsParser`](crate::MsParser) and read-only afterwards.
/// Iteration is in ascending label order.
#[derive(Debug, Clone, Default)]
pub struct SimulationDataset {
    data: BTreeMap<u64, Datum>,
}

impl SimulationDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sealed record. A repeated label replaces the earlier record.
    pub(crate) fn seal(&mut self, datum: Datum) {
        match self.data.entry(datum.generation()) {
            Entry::Occupied(mut slot) => {
                warn!(
                    generation = datum.generation(),
                    "generation label seen more than once; keeping the later block"
                );
                slot.insert(datum);
            }
            Entry::Vacant(slot) => {
                slot.insert(datum);
            }
        }
    }

    pub fn get(&self, generation: u64) -> Option<&Datum> {
        self.data.get(&generation)
    }

    /// Generation labels in ascending order.
    pub fn generations(&self) -> Vec<u64> {
        self.data.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Datum> {
        self.data.values()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl FromIterator<Datum> for SimulationDataset {
    fn from_iter<I: IntoIterator<Item = Datum>>(iter: I) -> Self {
        let mut dataset = Self::new();
        for datum in iter {
            dataset.seal(datum);
        }
        dataset
    }
}
