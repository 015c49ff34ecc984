//! Sheet document state.

use chrono::NaiveDate;

use sheetflow_engine::engine::{self, Attribute, CellValue, SheetMeta, TimeSeries};

/// A sheet with its metadata and in-memory time series.
///
/// The date column is resolved once at construction instead of assuming
/// row 0: the first attribute whose name contains "date"
/// (case-insensitive), falling back to index 0 when none matches.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub meta: SheetMeta,
    pub series: TimeSeries,
    pub date_attribute_index: usize,
}

impl Sheet {
    /// Create a sheet with empty value rows, one per attribute.
    pub fn new(meta: SheetMeta) -> Sheet {
        let series = TimeSeries::with_attribute_count(meta.attribute_count());
        Sheet::with_series(meta, series)
    }

    /// Create a sheet over already-loaded rows (positionally aligned with
    /// the attribute sequence).
    pub fn with_series(meta: SheetMeta, series: TimeSeries) -> Sheet {
        let date_attribute_index = resolve_date_attribute(&meta.attributes);
        Sheet {
            meta,
            series,
            date_attribute_index,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.meta.attributes
    }

    /// The date row, empty when the sheet holds no data yet.
    pub fn date_row(&self) -> &[CellValue] {
        self.series.row(self.date_attribute_index).unwrap_or(&[])
    }

    /// Time index holding `today`, if present.
    pub fn todays_index(&self, today: NaiveDate) -> Option<usize> {
        engine::todays_index(self.date_row(), today)
    }

    pub fn has_today(&self, today: NaiveDate) -> bool {
        self.todays_index(today).is_some()
    }

    /// Attribute indices whose row length differs from the date row.
    /// Non-empty only transiently, during an in-progress insert.
    pub fn ragged_rows(&self) -> Vec<usize> {
        let expected = self.series.row_len(self.date_attribute_index);
        (0..self.meta.attribute_count())
            .filter(|&index| self.series.row_len(index) != expected)
            .collect()
    }
}

fn resolve_date_attribute(attributes: &[Attribute]) -> usize {
    attributes
        .iter()
        .position(|attr| attr.name.to_lowercase().contains("date"))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetflow_engine::engine::SheetMeta;

    #[test]
    fn test_date_attribute_resolved_by_name() {
        let mut meta = SheetMeta::new("s", "Stock");
        meta.attributes = vec![
            Attribute::independent("purchase"),
            Attribute::independent("Entry Date"),
        ];
        assert_eq!(Sheet::new(meta).date_attribute_index, 1);
    }

    #[test]
    fn test_date_attribute_falls_back_to_first() {
        let mut meta = SheetMeta::new("s", "Stock");
        meta.attributes = vec![
            Attribute::independent("purchase"),
            Attribute::independent("outward"),
        ];
        assert_eq!(Sheet::new(meta).date_attribute_index, 0);
    }

    #[test]
    fn test_ragged_rows_reports_short_columns() {
        let mut meta = SheetMeta::new("s", "Stock");
        meta.attributes = vec![
            Attribute::independent("date"),
            Attribute::independent("purchase"),
        ];
        let series = TimeSeries::from_rows(vec![
            vec![CellValue::Text("1 Jun 2025".to_string())],
            vec![],
        ]);
        let sheet = Sheet::with_series(meta, series);
        assert_eq!(sheet.ragged_rows(), vec![1]);
    }
}
