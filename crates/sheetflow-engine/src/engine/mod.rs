//! Derivation engine API.
//!
//! This module provides the computation core for attribute sheets:
//!
//! - [`CellValue`] - Heterogeneous cell values with numeric coercion
//! - [`Attribute`], [`AttributeKind`], [`SheetMeta`] - Sheet column metadata
//! - [`TimeSeries`] - Copy-on-write columnar store, one row per attribute
//! - [`todays_index`], [`has_today`] - Today detection over a date row
//! - [`compute_derived`], [`recompute_at`] - Derived-column evaluation
//! - [`detect_cycle`], [`evaluation_order`] - Formula dependency ordering
//! - [`sheet_graph`], [`attribute_graph`] - Dependency graph construction

mod attribute;
mod cycle;
mod dates;
mod derive;
mod error;
mod graph;
mod series;
mod topo;
mod value;

pub use attribute::{Attribute, AttributeKind, Formula, LinkedFrom, Recurrence, SheetId, SheetMeta};
pub use cycle::detect_cycle;
pub use dates::{DISPLAY_FORMAT, ISO_FORMAT, has_today, todays_index};
pub use derive::{compute_derived, recompute_at, validate_formula};
pub use error::{EngineError, Result};
pub use graph::{EdgeKind, Graph, GraphEdge, GraphNode, attribute_graph, sheet_graph};
pub use series::TimeSeries;
pub use topo::evaluation_order;
pub use value::CellValue;
