use serde::{Deserialize, Serialize};

/// Box shape by default; the bracket pair used in the compiled output
/// depends on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Box,
    Diamond,
    Rounded,
}

impl NodeShape {
    /// Opening/closing bracket pair for this shape.
    pub fn brackets(self) -> (char, char) {
        match self {
            NodeShape::Box => ('[', ']'),
            NodeShape::Diamond => ('{', '}'),
            NodeShape::Rounded => ('(', ')'),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub shape: NodeShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Node/edge lists in declaration order. Order is significant: the compiler
/// emits nodes before edges, each in input order, so identical graphs always
/// compile to identical text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredGraph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}
