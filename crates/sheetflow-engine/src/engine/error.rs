//! Error types for the derivation engine.

use thiserror::Error;

/// Errors raised by formula validation and dependency ordering.
///
/// Absent optional attribute fields are never errors; classification handles
/// absence. Lenient evaluation paths (`compute_derived`) skip bad references
/// instead of raising `InvalidReference` - that variant belongs to the strict
/// validation mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("formula reference {index} out of range for sheet with {attribute_count} attributes")]
    InvalidReference {
        index: usize,
        attribute_count: usize,
    },

    #[error("circular dependency: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
}

pub type Result<T> = std::result::Result<T, EngineError>;
