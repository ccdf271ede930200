use std::collections::VecDeque;

use tracing::debug;

use super::{HistoryError, HistorySink};
use crate::models::HistoryEntry;

/// Default number of entries kept by [`InMemoryHistory`].
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded history kept for the lifetime of a session.
///
/// Once full, recording a new entry drops the oldest one.
#[derive(Debug, Clone)]
pub struct InMemoryHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl InMemoryHistory {
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HistorySink for InMemoryHistory {
    fn record(
        &mut self,
        entry: HistoryEntry,
    ) -> Result<(), HistoryError> {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        debug!(description = %entry.description, result = %entry.result, "recorded history entry");
        self.entries.push_back(entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.entries.iter().cloned().collect())
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        Ok(())
    }
}
