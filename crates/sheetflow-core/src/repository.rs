//! Repository boundary: fetching sheet metadata and data, persisting inserts.
//!
//! The dashboard backend historically served the same record shape under two
//! spellings, hyphenated (`linked-from`) and camel-cased (`linkedFrom`),
//! and different UI modules grew divergent parsers for them. The wire types
//! here accept both spellings and produce the one canonical in-memory model,
//! so the naming variance stops at this boundary.

use serde::Deserialize;

use sheetflow_engine::engine::{
    Attribute, CellValue, Formula, LinkedFrom, Recurrence, SheetId, SheetMeta, TimeSeries,
};

use crate::error::Result;
use crate::sheet::Sheet;

/// One persisted data row, positionally aligned with the sheet's attribute
/// sequence.
#[derive(Clone, Debug, Deserialize)]
pub struct RowRecord {
    pub id: String,
    pub date: String,
    pub values: Vec<CellValue>,
}

/// External metadata/record store. All methods may fail with
/// [`crate::SheetError::Transport`], which is recoverable: the caller may
/// retry, and core state stays at last-known-good.
pub trait Repository {
    /// Sheets visible to `role`, attributes only (no time-series data).
    fn fetch_metadata(&self, role: &str) -> Result<Vec<SheetMeta>>;

    /// Data rows for one sheet, earliest first.
    fn fetch_sheet_data(&self, sheet: &SheetId) -> Result<Vec<RowRecord>>;

    /// Persist an inserted row.
    fn insert_todays_row(&self, sheet: &SheetId, values: &[CellValue]) -> Result<()>;
}

/// Load one sheet: metadata plus data rows pivoted into the columnar store.
pub fn load_sheet(repository: &dyn Repository, meta: SheetMeta) -> Result<Sheet> {
    let records = repository.fetch_sheet_data(&meta.id)?;
    Ok(sheet_from_records(meta, &records))
}

/// Pivot row-oriented records into the per-attribute time series. The date
/// column is taken from each record's `date` field; remaining values map
/// positionally onto the non-date attributes.
pub fn sheet_from_records(meta: SheetMeta, records: &[RowRecord]) -> Sheet {
    let sheet = Sheet::new(meta);
    let date_index = sheet.date_attribute_index;

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); sheet.meta.attribute_count()];
    for record in records {
        let mut values = record.values.iter();
        for (index, row) in rows.iter_mut().enumerate() {
            if index == date_index {
                row.push(CellValue::Text(record.date.clone()));
            } else {
                row.push(values.next().cloned().unwrap_or(CellValue::Empty));
            }
        }
    }

    Sheet::with_series(sheet.meta, TimeSeries::from_rows(rows))
}

/// Wire shape of a sheet, kebab-case canonical with camelCase tolerated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireSheet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub attributes: Vec<WireAttribute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireAttribute {
    pub name: String,
    #[serde(default)]
    pub formula: Option<WireFormula>,
    #[serde(default, alias = "linkedFrom")]
    pub linked_from: Option<WireLink>,
    #[serde(default, alias = "recurrentCheck")]
    pub recurrent_check: Option<WireRecurrence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireFormula {
    #[serde(default, alias = "additionIndices")]
    pub addition_indices: Vec<usize>,
    #[serde(default, alias = "subtractionIndices")]
    pub subtraction_indices: Vec<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireLink {
    #[serde(alias = "sheetId")]
    pub sheet_id: String,
    #[serde(alias = "attributeIndex")]
    pub attribute_index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WireRecurrence {
    #[serde(default, alias = "isRecurrent")]
    pub is_recurrent: bool,
    #[serde(default, alias = "recurrentReferenceIndex")]
    pub recurrent_reference_index: Option<usize>,
    #[serde(default, alias = "recurrenceFedStatus")]
    pub recurrence_fed_status: bool,
}

impl From<WireSheet> for SheetMeta {
    fn from(wire: WireSheet) -> SheetMeta {
        SheetMeta {
            id: SheetId(wire.id),
            name: wire.name,
            department: wire.department,
            attributes: wire.attributes.into_iter().map(Attribute::from).collect(),
        }
    }
}

impl From<WireAttribute> for Attribute {
    fn from(wire: WireAttribute) -> Attribute {
        Attribute {
            name: wire.name,
            formula: wire.formula.map(|f| Formula {
                addition: f.addition_indices,
                subtraction: f.subtraction_indices,
            }),
            linked_from: wire.linked_from.map(|l| LinkedFrom {
                sheet_id: SheetId(l.sheet_id),
                attribute_index: l.attribute_index,
            }),
            recurrence: wire.recurrent_check.map(|r| Recurrence {
                is_recurrent: r.is_recurrent,
                reference_index: r.recurrent_reference_index,
                fed_status: r.recurrence_fed_status,
            }),
        }
    }
}
