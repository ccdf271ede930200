use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::CompletedCalculation;

/// A finished calculation as handed to the history service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The result as it was displayed, e.g. `"1,234.5"` or `"Error"`.
    pub result: String,
    /// Human-readable expression, e.g. `"5 + 3"`.
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        result: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            result: result.into(),
            description: description.into(),
            recorded_at: Utc::now(),
        }
    }
}

impl From<CompletedCalculation> for HistoryEntry {
    fn from(completed: CompletedCalculation) -> Self {
        Self::new(completed.result, completed.description)
    }
}
