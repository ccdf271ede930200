use serde::{Deserialize, Serialize};

use crate::engine::Operation;

/// Left operand and operator waiting for their right-hand side.
///
/// Stored as a pair so an operand can never exist without its operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub operand: f64,
    pub operation: Operation,
}

/// Mutable state behind one calculator display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Text being edited or the last result, never grouped.
    pub(crate) display_buffer: String,

    pub(crate) pending: Option<PendingOperation>,

    /// When true the next digit starts a new number instead of extending the buffer.
    pub(crate) is_fresh_entry: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display_buffer: "0".to_string(),
            pending: None,
            is_fresh_entry: true,
        }
    }
}

impl CalculatorState {
    pub fn display_buffer(&self) -> &str {
        &self.display_buffer
    }

    pub fn stored_operand(&self) -> Option<f64> {
        self.pending.map(|p| p.operand)
    }

    pub fn pending_operation(&self) -> Option<Operation> {
        self.pending.map(|p| p.operation)
    }

    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    pub fn is_fresh_entry(&self) -> bool {
        self.is_fresh_entry
    }
}
