//! Circular dependency detection for derived attributes.
//!
//! A derived attribute must not reference itself through any chain of
//! formulas (A derived from B derived from A). This module uses depth-first
//! search over formula references to find such cycles before any value is
//! computed. Recurrence references are prior-period carries, not same-index
//! inputs, so they take no part in the search.

use std::collections::HashSet;

use super::attribute::Attribute;

/// Detect a dependency cycle reachable from the attribute at `start`.
/// Returns Some(cycle_path) of attribute indices if a cycle is found.
pub fn detect_cycle(start: usize, attributes: &[Attribute]) -> Option<Vec<usize>> {
    let mut visiting = HashSet::new();
    let mut path = Vec::new();

    if detect_cycle_dfs(start, attributes, &mut visiting, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn detect_cycle_dfs(
    current: usize,
    attributes: &[Attribute],
    visiting: &mut HashSet<usize>,
    path: &mut Vec<usize>,
) -> bool {
    if visiting.contains(&current) {
        path.push(current);
        return true;
    }

    let Some(formula) = attributes.get(current).and_then(|a| a.formula.as_ref()) else {
        return false;
    };

    visiting.insert(current);
    path.push(current);

    for dep in formula.references() {
        // Out-of-range references contribute nothing; skip them here too.
        if dep >= attributes.len() {
            continue;
        }
        if detect_cycle_dfs(dep, attributes, visiting, path) {
            return true;
        }
    }

    path.pop();
    visiting.remove(&current);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::attribute::Formula;

    #[test]
    fn test_self_reference_is_a_cycle() {
        let attrs = vec![Attribute::derived("a", Formula::new(vec![0], vec![]))];
        assert!(detect_cycle(0, &attrs).is_some());
    }

    #[test]
    fn test_transitive_cycle_detected() {
        let attrs = vec![
            Attribute::derived("a", Formula::new(vec![1], vec![])),
            Attribute::derived("b", Formula::new(vec![2], vec![])),
            Attribute::derived("c", Formula::new(vec![], vec![0])),
        ];
        let path = detect_cycle(0, &attrs).unwrap();
        assert_eq!(path, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_diamond_without_cycle_is_clean() {
        let attrs = vec![
            Attribute::independent("base"),
            Attribute::derived("left", Formula::new(vec![0], vec![])),
            Attribute::derived("right", Formula::new(vec![0], vec![])),
            Attribute::derived("top", Formula::new(vec![1, 2], vec![])),
        ];
        assert!(detect_cycle(3, &attrs).is_none());
    }
}
