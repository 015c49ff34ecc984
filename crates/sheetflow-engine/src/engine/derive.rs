//! Derived-column computation.
//!
//! A derived column's value at a time index is the sum of its addition
//! references minus its subtraction references, each coerced to a number.
//! Evaluation is lenient by design: missing cells and out-of-range indices
//! contribute 0 rather than erroring, because dashboards must render over
//! partially loaded or malformed data. [`validate_formula`] is the strict
//! mode for callers that want malformed references rejected up front.

use super::attribute::{Attribute, Formula};
use super::error::{EngineError, Result};
use super::series::TimeSeries;
use super::topo::evaluation_order;
use super::value::CellValue;

/// Evaluate a formula at `time_index`. Pure and idempotent: the result
/// depends only on the arguments.
pub fn compute_derived(formula: &Formula, series: &TimeSeries, time_index: usize) -> f64 {
    let mut result = 0.0;
    for &index in &formula.addition {
        result += series
            .get(index, time_index)
            .map_or(0.0, CellValue::as_number);
    }
    for &index in &formula.subtraction {
        result -= series
            .get(index, time_index)
            .map_or(0.0, CellValue::as_number);
    }
    result
}

/// Strict-mode check: every referenced index must fall inside the owning
/// sheet's attribute sequence.
pub fn validate_formula(formula: &Formula, attribute_count: usize) -> Result<()> {
    for index in formula.references() {
        if index >= attribute_count {
            return Err(EngineError::InvalidReference {
                index,
                attribute_count,
            });
        }
    }
    Ok(())
}

/// Recompute every derived attribute at `time_index`, in topological order,
/// returning the updated store. Rejects the whole recompute on a dependency
/// cycle, leaving the input untouched.
pub fn recompute_at(
    series: &TimeSeries,
    attributes: &[Attribute],
    time_index: usize,
) -> Result<TimeSeries> {
    let order = evaluation_order(attributes)?;

    let mut updated = series.clone();
    for index in order {
        // evaluation_order only yields derived attributes.
        if let Some(formula) = &attributes[index].formula {
            let value = compute_derived(formula, &updated, time_index);
            updated = updated.set(index, time_index, CellValue::Number(value));
        }
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TimeSeries {
        TimeSeries::from_rows(vec![
            vec![CellValue::Text("1 Jun 2025".to_string())],
            vec![CellValue::Number(100.0)],
            vec![CellValue::Text("60".to_string())],
            vec![CellValue::Number(30.0)],
            vec![CellValue::Empty],
        ])
    }

    #[test]
    fn test_compute_derived_adds_and_subtracts_with_coercion() {
        let formula = Formula::new(vec![1, 2], vec![3]);
        // 100 + "60" - 30, the numeric string coercing transparently.
        assert_eq!(compute_derived(&formula, &store(), 0), 130.0);
    }

    #[test]
    fn test_compute_derived_is_idempotent() {
        let formula = Formula::new(vec![1], vec![3]);
        let series = store();
        let first = compute_derived(&formula, &series, 0);
        let second = compute_derived(&formula, &series, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_reference_contributes_zero() {
        let formula = Formula::new(vec![1, 99], vec![]);
        assert_eq!(compute_derived(&formula, &store(), 0), 100.0);
    }

    #[test]
    fn test_missing_time_index_contributes_zero() {
        let formula = Formula::new(vec![1], vec![]);
        assert_eq!(compute_derived(&formula, &store(), 7), 0.0);
    }

    #[test]
    fn test_validate_formula_rejects_out_of_range() {
        let formula = Formula::new(vec![1, 99], vec![]);
        assert_eq!(
            validate_formula(&formula, 5),
            Err(EngineError::InvalidReference {
                index: 99,
                attribute_count: 5
            })
        );
        assert!(validate_formula(&Formula::new(vec![1, 4], vec![0]), 5).is_ok());
    }

    #[test]
    fn test_recompute_at_chains_derived_inputs() {
        // "net" reads "gross", declared after it; topological order makes
        // the chain see fresh values.
        let attrs = vec![
            Attribute::independent("in"),
            Attribute::derived("net", Formula::new(vec![2], vec![])),
            Attribute::derived("gross", Formula::new(vec![0], vec![])),
        ];
        let series = TimeSeries::from_rows(vec![
            vec![CellValue::Number(10.0)],
            vec![CellValue::Empty],
            vec![CellValue::Empty],
        ]);
        let updated = recompute_at(&series, &attrs, 0).unwrap();
        assert_eq!(updated.get(2, 0), Some(&CellValue::Number(10.0)));
        assert_eq!(updated.get(1, 0), Some(&CellValue::Number(10.0)));
    }

    #[test]
    fn test_recompute_at_rejects_cycles_before_computing() {
        let attrs = vec![
            Attribute::derived("a", Formula::new(vec![1], vec![])),
            Attribute::derived("b", Formula::new(vec![0], vec![])),
        ];
        let series = TimeSeries::with_attribute_count(2);
        let result = recompute_at(&series, &attrs, 0);
        assert!(matches!(result, Err(EngineError::Cycle { .. })));
        // Input untouched.
        assert_eq!(series.row_len(0), 0);
        assert_eq!(series.row_len(1), 0);
    }
}
