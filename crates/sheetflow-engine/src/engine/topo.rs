//! Topological evaluation order for derived attributes.
//!
//! Declaration-order evaluation is only correct when authors declare
//! dependencies before dependents; this module computes a true dependency
//! order instead, and rejects cycles before any value is computed.

use super::attribute::Attribute;
use super::cycle::detect_cycle;
use super::error::{EngineError, Result};

/// Indices of the derived attributes, ordered so every formula's inputs are
/// evaluated before the formula itself. Ties keep declaration order, so the
/// result is deterministic for identical input.
pub fn evaluation_order(attributes: &[Attribute]) -> Result<Vec<usize>> {
    // Structural check first: a cycle rejects the whole recompute.
    for (index, attr) in attributes.iter().enumerate() {
        if attr.formula.is_none() {
            continue;
        }
        if let Some(cycle) = detect_cycle(index, attributes) {
            let path = cycle
                .iter()
                .map(|&i| match attributes.get(i) {
                    Some(attr) => attr.name.clone(),
                    None => format!("#{}", i),
                })
                .collect();
            return Err(EngineError::Cycle { path });
        }
    }

    let mut visited = vec![false; attributes.len()];
    let mut order = Vec::new();
    for index in 0..attributes.len() {
        visit(index, attributes, &mut visited, &mut order);
    }
    Ok(order)
}

fn visit(current: usize, attributes: &[Attribute], visited: &mut [bool], order: &mut Vec<usize>) {
    if visited[current] {
        return;
    }
    visited[current] = true;

    if let Some(formula) = &attributes[current].formula {
        for dep in formula.references() {
            if dep < attributes.len() {
                visit(dep, attributes, visited, order);
            }
        }
        order.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::attribute::Formula;

    #[test]
    fn test_dependencies_precede_dependents() {
        // "total" is declared before the column it depends on.
        let attrs = vec![
            Attribute::independent("base"),
            Attribute::derived("total", Formula::new(vec![2], vec![])),
            Attribute::derived("subtotal", Formula::new(vec![0], vec![])),
        ];
        assert_eq!(evaluation_order(&attrs).unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_declaration_order_kept_for_independent_formulas() {
        let attrs = vec![
            Attribute::independent("a"),
            Attribute::derived("x", Formula::new(vec![0], vec![])),
            Attribute::derived("y", Formula::new(vec![0], vec![])),
        ];
        assert_eq!(evaluation_order(&attrs).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_cycle_is_rejected_with_named_path() {
        let attrs = vec![
            Attribute::derived("a", Formula::new(vec![1], vec![])),
            Attribute::derived("b", Formula::new(vec![], vec![0])),
        ];
        match evaluation_order(&attrs) {
            Err(EngineError::Cycle { path }) => {
                assert_eq!(path, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_references_do_not_order() {
        let attrs = vec![Attribute::derived("x", Formula::new(vec![99], vec![]))];
        assert_eq!(evaluation_order(&attrs).unwrap(), vec![0]);
    }
}
