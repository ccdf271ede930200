use thiserror::Error;

use crate::models::HistoryEntry;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history storage error: {0}")]
    Storage(String),
}

/// Destination for finished calculations.
pub trait HistorySink {
    fn record(
        &mut self,
        entry: HistoryEntry,
    ) -> Result<(), HistoryError>;

    /// Entries in the order they were recorded, oldest first.
    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    fn clear(&mut self) -> Result<(), HistoryError>;
}
