//! Calculation history.
//!
//! Persisting history is the job of an external service; the core only
//! defines the [`HistorySink`] seam and an in-memory implementation.

mod memory;
mod sink;

pub use memory::InMemoryHistory;
pub use sink::{HistoryError, HistorySink};
