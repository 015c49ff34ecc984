//! Copy-on-write columnar time-series store.
//!
//! One value row per attribute, aligned by a shared integer time index
//! (0 = earliest). Mutating operations return a new store and never touch
//! the input; rows are shared via `Arc`, so a write clones only the row it
//! changes and observers of the old store keep a consistent snapshot.
//! Callers rely on referential identity changing only on actual structural
//! change, which drives UI change detection.

use std::sync::Arc;

use super::value::CellValue;

/// Per-sheet time-series store: `rows[attribute_index][time_index]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    rows: Vec<Arc<Vec<CellValue>>>,
}

impl TimeSeries {
    pub fn new() -> TimeSeries {
        TimeSeries { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> TimeSeries {
        TimeSeries {
            rows: rows.into_iter().map(Arc::new).collect(),
        }
    }

    /// Empty store with one zero-length row per attribute.
    pub fn with_attribute_count(count: usize) -> TimeSeries {
        TimeSeries {
            rows: (0..count).map(|_| Arc::new(Vec::new())).collect(),
        }
    }

    pub fn attribute_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of one attribute's value sequence. Unknown attributes are 0,
    /// so ragged-row checks can run over any index range.
    pub fn row_len(&self, attribute_index: usize) -> usize {
        self.rows.get(attribute_index).map_or(0, |row| row.len())
    }

    /// Full value row for an attribute.
    pub fn row(&self, attribute_index: usize) -> Option<&[CellValue]> {
        self.rows.get(attribute_index).map(|row| row.as_slice())
    }

    /// Cell lookup. Out of bounds on either axis is `None`, never a panic.
    pub fn get(&self, attribute_index: usize, time_index: usize) -> Option<&CellValue> {
        self.rows.get(attribute_index)?.get(time_index)
    }

    /// Write a cell, returning a new store. The target row is padded with
    /// `Empty` when `time_index` is beyond its current length. Writing a
    /// value identical to the current one returns a clone sharing every row.
    /// An out-of-range attribute index leaves the store unchanged.
    pub fn set(&self, attribute_index: usize, time_index: usize, value: CellValue) -> TimeSeries {
        let Some(row) = self.rows.get(attribute_index) else {
            return self.clone();
        };
        if row.get(time_index) == Some(&value) {
            return self.clone();
        }

        let mut new_row = row.as_ref().clone();
        if new_row.len() <= time_index {
            new_row.resize(time_index + 1, CellValue::Empty);
        }
        new_row[time_index] = value;

        let mut rows = self.rows.clone();
        rows[attribute_index] = Arc::new(new_row);
        TimeSeries { rows }
    }

    /// Add a row for a newly appended attribute, `len` cells of `fill`.
    pub fn append_row(&self, fill: CellValue, len: usize) -> TimeSeries {
        let mut rows = self.rows.clone();
        rows.push(Arc::new(vec![fill; len]));
        TimeSeries { rows }
    }

    /// True when row identity is shared with `other` at `attribute_index`.
    /// Used by change detection: an untouched row keeps its allocation.
    pub fn shares_row(&self, other: &TimeSeries, attribute_index: usize) -> bool {
        match (self.rows.get(attribute_index), other.rows.get(attribute_index)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_round_trips() {
        let store = TimeSeries::with_attribute_count(2);
        let store = store.set(1, 3, CellValue::Number(9.0));
        assert_eq!(store.get(1, 3), Some(&CellValue::Number(9.0)));
        // Padding cells are Empty.
        assert_eq!(store.get(1, 0), Some(&CellValue::Empty));
        assert_eq!(store.row_len(1), 4);
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let store = TimeSeries::from_rows(vec![vec![CellValue::Number(1.0)]]);
        assert_eq!(store.get(0, 5), None);
        assert_eq!(store.get(7, 0), None);
    }

    #[test]
    fn test_set_never_mutates_input() {
        let original = TimeSeries::from_rows(vec![vec![CellValue::Number(1.0)]]);
        let updated = original.set(0, 0, CellValue::Number(2.0));
        assert_eq!(original.get(0, 0), Some(&CellValue::Number(1.0)));
        assert_eq!(updated.get(0, 0), Some(&CellValue::Number(2.0)));
        assert!(!updated.shares_row(&original, 0));
    }

    #[test]
    fn test_untouched_rows_keep_identity() {
        let store = TimeSeries::with_attribute_count(3);
        let updated = store.set(1, 0, CellValue::Number(5.0));
        assert!(updated.shares_row(&store, 0));
        assert!(!updated.shares_row(&store, 1));
        assert!(updated.shares_row(&store, 2));
    }

    #[test]
    fn test_identical_write_shares_all_rows() {
        let store = TimeSeries::from_rows(vec![vec![CellValue::Number(4.0)]]);
        let same = store.set(0, 0, CellValue::Number(4.0));
        assert!(same.shares_row(&store, 0));
    }

    #[test]
    fn test_append_row_equalizes_lengths() {
        let store = TimeSeries::from_rows(vec![vec![CellValue::Number(1.0); 4]]);
        let store = store.append_row(CellValue::Number(0.0), 4);
        assert_eq!(store.attribute_count(), 2);
        assert_eq!(store.row_len(0), store.row_len(1));
    }
}
