//! sheetflow-engine - pure computation core for attribute sheets.
//!
//! No I/O lives here: the engine operates on in-memory sheet metadata and
//! time-series values, and every operation is synchronous and deterministic.

pub mod engine;

pub use engine::{Attribute, AttributeKind, CellValue, SheetId, SheetMeta, TimeSeries};
pub use engine::{EngineError, Result};
