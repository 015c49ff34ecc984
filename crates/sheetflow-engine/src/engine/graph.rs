//! Dependency graph construction for visualization.
//!
//! Two graphs are built from the same primitives: a cross-sheet view with one
//! node per sheet and an edge per resolvable `linked_from`, and a within-sheet
//! view with one node per attribute and edges for formula and recurrence
//! references. Output is deterministic for identical input - nodes and edges
//! follow declaration order - because the downstream layout engine is
//! sensitive to input order.

use serde::Serialize;

use super::attribute::{AttributeKind, SheetMeta};

/// Role of an edge in the dependency graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Addition,
    Subtraction,
    Recurrent,
    Linked,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

/// A directed edge `source -> target`, labeled with the attribute names at
/// both ends so the visualization can annotate the connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub source_name: String,
    pub target_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Cross-sheet view: one node per sheet, one edge per attribute whose
/// `linked_from` resolves to an existing sheet and attribute index.
/// Direction is linked sheet -> owning sheet. Unresolvable references are
/// dropped, not errored.
pub fn sheet_graph(sheets: &[SheetMeta]) -> Graph {
    let nodes = sheets
        .iter()
        .map(|sheet| GraphNode {
            id: sheet.id.to_string(),
            label: sheet.name.clone(),
        })
        .collect();

    let mut edges = Vec::new();
    for sheet in sheets {
        for attr in &sheet.attributes {
            let Some(link) = &attr.linked_from else {
                continue;
            };
            let Some(source_sheet) = sheets.iter().find(|s| s.id == link.sheet_id) else {
                continue;
            };
            let Some(source_attr) = source_sheet.attributes.get(link.attribute_index) else {
                continue;
            };
            edges.push(GraphEdge {
                source: source_sheet.id.to_string(),
                target: sheet.id.to_string(),
                kind: EdgeKind::Linked,
                source_name: source_attr.name.clone(),
                target_name: attr.name.clone(),
            });
        }
    }

    Graph { nodes, edges }
}

/// Within-sheet view: one node per attribute, edges for every formula
/// reference (tagged addition/subtraction) and every recurrence reference,
/// all directed source attribute -> dependent attribute.
pub fn attribute_graph(sheet: &SheetMeta) -> Graph {
    let nodes = sheet
        .attributes
        .iter()
        .enumerate()
        .map(|(index, attr)| GraphNode {
            id: index.to_string(),
            label: attr.name.clone(),
        })
        .collect();

    let mut edges = Vec::new();
    for (index, attr) in sheet.attributes.iter().enumerate() {
        // Classification precedence decides which references become edges:
        // a column carrying both a formula and a recurrence is derived.
        match attr.kind() {
            AttributeKind::Derived => {
                if let Some(formula) = &attr.formula {
                    for &source in &formula.addition {
                        push_attribute_edge(&mut edges, sheet, source, index, EdgeKind::Addition);
                    }
                    for &source in &formula.subtraction {
                        push_attribute_edge(
                            &mut edges,
                            sheet,
                            source,
                            index,
                            EdgeKind::Subtraction,
                        );
                    }
                }
            }
            AttributeKind::Recurrent => {
                if let Some(source) = attr.recurrence.as_ref().and_then(|r| r.reference_index) {
                    push_attribute_edge(&mut edges, sheet, source, index, EdgeKind::Recurrent);
                }
            }
            AttributeKind::Linked | AttributeKind::Independent => {}
        }
    }

    Graph { nodes, edges }
}

fn push_attribute_edge(
    edges: &mut Vec<GraphEdge>,
    sheet: &SheetMeta,
    source: usize,
    target: usize,
    kind: EdgeKind,
) {
    // Unresolvable indices are dropped, matching the cross-sheet rule.
    let Some(source_attr) = sheet.attributes.get(source) else {
        return;
    };
    edges.push(GraphEdge {
        source: source.to_string(),
        target: target.to_string(),
        kind,
        source_name: source_attr.name.clone(),
        target_name: sheet.attributes[target].name.clone(),
    });
}
