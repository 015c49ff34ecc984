//! Cell values and numeric coercion.
//!
//! Sheet data arrives as a mix of dates, numbers, numeric strings and blanks.
//! [`CellValue`] is the one canonical in-memory shape; every consumer that
//! needs arithmetic goes through [`CellValue::as_number`], which never fails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell in a sheet's time series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Parse raw input into the appropriate value type.
    /// - Empty or whitespace-only -> Empty
    /// - Valid number -> Number
    /// - Otherwise -> Text
    pub fn from_input(input: &str) -> CellValue {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            return CellValue::Number(n);
        }
        CellValue::Text(trimmed.to_string())
    }

    /// Coerce to a number for formula arithmetic.
    /// Numeric strings parse; anything non-numeric (including Empty) is 0.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Empty => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        }
    }

    /// Coerce a numeric-string cell into a Number, leaving others untouched.
    pub fn coerced(self) -> CellValue {
        match self {
            CellValue::Text(ref s) => match s.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => self,
            },
            other => other,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}
