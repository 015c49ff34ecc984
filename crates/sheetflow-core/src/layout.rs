//! Graph-layout capability contract.
//!
//! Layout is an external capability: it consumes sized nodes and directed
//! edges and returns positions. The core assembles its input from a built
//! dependency graph and never interprets the geometry coming back.

use serde::{Deserialize, Serialize};

use sheetflow_engine::engine::Graph;

pub const DEFAULT_NODE_WIDTH: f64 = 172.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 36.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// External layout engine. Input order matters to implementations, so
/// callers must pass nodes and edges exactly as assembled.
pub trait GraphLayout {
    fn layout(&self, nodes: &[LayoutNode], edges: &[LayoutEdge]) -> Vec<NodePosition>;
}

/// Assemble layout input from a dependency graph, with default node sizing.
pub fn layout_input(graph: &Graph) -> (Vec<LayoutNode>, Vec<LayoutEdge>) {
    let nodes = graph
        .nodes
        .iter()
        .map(|node| LayoutNode {
            id: node.id.clone(),
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        })
        .collect();
    let edges = graph
        .edges
        .iter()
        .map(|edge| LayoutEdge {
            source: edge.source.clone(),
            target: edge.target.clone(),
        })
        .collect();
    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetflow_engine::engine::{Attribute, Formula, SheetMeta, attribute_graph};

    #[test]
    fn test_layout_input_preserves_graph_order() {
        let mut sheet = SheetMeta::new("s", "Stock");
        sheet.attributes = vec![
            Attribute::independent("in"),
            Attribute::independent("out"),
            Attribute::derived("net", Formula::new(vec![0], vec![1])),
        ];
        let graph = attribute_graph(&sheet);
        let (nodes, edges) = layout_input(&graph);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2].id, "2");
        assert_eq!(
            edges,
            vec![
                LayoutEdge {
                    source: "0".to_string(),
                    target: "2".to_string()
                },
                LayoutEdge {
                    source: "1".to_string(),
                    target: "2".to_string()
                },
            ]
        );
    }
}
