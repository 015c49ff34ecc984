//! sheetflow-core - sheet documents, the mutation pipeline and the
//! repository boundary, UI-agnostic.

pub mod error;
pub mod layout;
pub mod repository;
pub mod session;
pub mod sheet;

pub use error::{Result, SheetError};
pub use session::Session;
pub use sheet::Sheet;

pub use sheetflow_engine::engine::{Attribute, AttributeKind, CellValue, SheetId, SheetMeta};
