//! Mutation pipeline: insert-today, update-cell and append-attribute.
//!
//! Every operation validates first and mutates last. Failures leave the
//! sheet exactly as it was: the copy-on-write store makes the
//! validate-then-commit shape free, so no caller ever observes a partially
//! applied row.

use chrono::NaiveDate;

use sheetflow_engine::engine::{
    Attribute, AttributeKind, CellValue, compute_derived, evaluation_order, recompute_at,
    validate_formula,
};

use super::Sheet;
use crate::error::{Result, SheetError};

impl Sheet {
    /// Insert today's row. One caller-supplied value per non-derived
    /// attribute, in declaration order, the date cell included; derived
    /// cells are computed at the new index in dependency order.
    pub fn insert_today(&mut self, values: &[CellValue], today: NaiveDate) -> Result<()> {
        if let Some(index) = self.todays_index(today) {
            return Err(SheetError::TodayExists { index });
        }

        let attributes = self.meta.attributes.clone();
        let expected = attributes.iter().filter(|a| !a.is_derived()).count();
        if values.len() != expected {
            return Err(SheetError::ValueCountMismatch {
                expected,
                got: values.len(),
            });
        }

        // Structural check up front: a cycle must reject the whole insert.
        let order = evaluation_order(&attributes)?;

        let time_index = self.series.row_len(self.date_attribute_index);
        let mut updated = self.series.clone();
        let mut supplied = values.iter();
        for (index, attr) in attributes.iter().enumerate() {
            if attr.is_derived() {
                continue;
            }
            // The arity check above guarantees one value per writable column.
            let Some(value) = supplied.next() else {
                break;
            };
            let value = if index == self.date_attribute_index {
                value.clone()
            } else {
                value.clone().coerced()
            };
            updated = updated.set(index, time_index, value);
        }

        for index in order {
            if let Some(formula) = &attributes[index].formula {
                let value = compute_derived(formula, &updated, time_index);
                updated = updated.set(index, time_index, CellValue::Number(value));
            }
        }

        self.series = updated;
        debug_assert!(self.ragged_rows().is_empty());
        Ok(())
    }

    /// Overwrite an existing cell of an independent attribute, then
    /// recompute every derived attribute at that time index. Derived,
    /// linked and recurrent columns are read-only.
    pub fn update_cell(
        &mut self,
        attribute_index: usize,
        time_index: usize,
        value: CellValue,
    ) -> Result<()> {
        let attr = self
            .meta
            .attributes
            .get(attribute_index)
            .ok_or(SheetError::UnknownAttribute(attribute_index))?;

        let kind = attr.kind();
        if kind != AttributeKind::Independent {
            return Err(SheetError::ReadOnlyColumn {
                name: attr.name.clone(),
                kind,
            });
        }

        let len = self.series.row_len(attribute_index);
        if time_index >= len {
            return Err(SheetError::RowOutOfRange {
                index: time_index,
                len,
            });
        }

        let value = if attribute_index == self.date_attribute_index {
            value
        } else {
            value.coerced()
        };
        let written = self.series.set(attribute_index, time_index, value);
        // Full recompute at the index rather than chasing direct dependents:
        // correct under unknown dependency depth, and cheap.
        let recomputed = recompute_at(&written, &self.meta.attributes, time_index)?;

        self.series = recomputed;
        Ok(())
    }

    /// Append a new attribute (admin "create node" action) together with a
    /// same-length placeholder row: 0-filled for derived columns, empty
    /// otherwise. Formula references must resolve within the existing
    /// attribute sequence.
    pub fn append_attribute(&mut self, attribute: Attribute) -> Result<()> {
        if let Some(formula) = &attribute.formula {
            validate_formula(formula, self.meta.attribute_count())?;
        }

        let len = self.series.row_len(self.date_attribute_index);
        let fill = if attribute.is_derived() {
            CellValue::Number(0.0)
        } else {
            CellValue::Empty
        };
        self.series = self.series.append_row(fill, len);
        self.meta.attributes.push(attribute);
        Ok(())
    }
}
