//! Error types for Sheetflow core.

use thiserror::Error;

use sheetflow_engine::engine::{AttributeKind, EngineError, SheetId};

/// Errors that can occur in sheet operations.
///
/// Validation and structural failures reject the operation before any state
/// changes. `Transport` is recoverable: the caller may retry and core state
/// remains at last-known-good.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("attribute '{name}' is a {kind:?} column and cannot be written")]
    ReadOnlyColumn { name: String, kind: AttributeKind },

    #[error("today's row already exists at index {index}")]
    TodayExists { index: usize },

    #[error("time index {index} out of range (row length {len})")]
    RowOutOfRange { index: usize, len: usize },

    #[error("expected {expected} values for insert, got {got}")]
    ValueCountMismatch { expected: usize, got: usize },

    #[error("unknown attribute index {0}")]
    UnknownAttribute(usize),

    #[error("unknown sheet: {0}")]
    UnknownSheet(SheetId),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("transport error: {0}")]
    Transport(String),
}

impl SheetError {
    /// Whether the caller may retry the failed operation as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SheetError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
