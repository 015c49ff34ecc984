//! Today detection over a sheet's date row.
//!
//! A date cell may hold the locale display form ("1 Jun 2025"), the ISO form
//! ("2025-06-01"), or free text containing either. Matching tries the exact
//! forms first; substring containment is kept only as a legacy fallback for
//! composite date cells and is logged when it fires, since it can
//! false-positive on overlapping date spellings.

use chrono::NaiveDate;

use super::value::CellValue;

/// Locale display format for date cells ("1 Jun 2025").
pub const DISPLAY_FORMAT: &str = "%-d %b %Y";
/// ISO date format ("2025-06-01").
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Find the time index holding `today` in a date row. `None` when absent.
pub fn todays_index(date_row: &[CellValue], today: NaiveDate) -> Option<usize> {
    let display = today.format(DISPLAY_FORMAT).to_string();
    let iso = today.format(ISO_FORMAT).to_string();

    for (index, cell) in date_row.iter().enumerate() {
        let text = cell.to_string();
        if text == display || text == iso {
            return Some(index);
        }
    }

    // Legacy tolerance for composite/free-text date cells.
    for (index, cell) in date_row.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        let text = cell.to_string();
        if text.contains(&display) || text.contains(&iso) {
            log::warn!(
                "date match for {} at index {} used substring fallback on {:?}",
                iso,
                index,
                text
            );
            return Some(index);
        }
    }

    None
}

/// Whether `today` is already present in the date row.
pub fn has_today(date_row: &[CellValue], today: NaiveDate) -> bool {
    todays_index(date_row, today).is_some()
}
