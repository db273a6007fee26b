use crate::graph::{NodeShape, StructuredGraph};
use crate::sanitize::sanitize_label;

const HEADER: &str = "graph TD";
const MARGIN: &str = "    ";

/// Render a structured graph as Mermaid flow-graph source.
///
/// Deterministic: nodes are declared first, then edges, each in input order,
/// so the same graph always produces byte-identical text. Labels pass through
/// [`sanitize_label`], which is what keeps the output structurally valid; the
/// compiler never depends on [`crate::clean`] to fix it up afterwards.
pub fn compile(graph: &StructuredGraph) -> String {
    let mut lines = Vec::with_capacity(graph.nodes.len() + graph.edges.len() + 2);
    lines.push(HEADER.to_string());

    for node in &graph.nodes {
        let (open, close) = node.shape.brackets();
        let label = sanitize_label(&node.label);
        lines.push(format!("{MARGIN}{}{open}{label}{close}", node.id));
    }

    lines.push(String::new());

    for edge in &graph.edges {
        let line = match edge.label.as_deref().filter(|l| !l.trim().is_empty()) {
            Some(label) => {
                let label = sanitize_label(label);
                format!("{MARGIN}{} --{label}--> {}", edge.from, edge.to)
            }
            None => format!("{MARGIN}{} --> {}", edge.from, edge.to),
        };
        lines.push(line);
    }

    lines.join("\n").trim_end().to_string()
}

/// [`compile`] for callers that may not have a graph at all: `None` yields a
/// degenerate one-node diagram so there is always something to render.
pub fn compile_or_placeholder(graph: Option<&StructuredGraph>) -> String {
    match graph {
        Some(graph) => compile(graph),
        None => format!("{HEADER}\n{MARGIN}missing{}", placeholder_node()),
    }
}

fn placeholder_node() -> String {
    let (open, close) = NodeShape::Box.brackets();
    format!("{open}Diagram unavailable{close}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, GraphNode};
    use crate::validate::validate;
    use pretty_assertions::assert_eq;

    fn node(id: &str, label: &str, shape: NodeShape) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: label.to_string(),
            shape,
        }
    }

    fn edge(from: &str, to: &str, label: Option<&str>) -> GraphEdge {
        GraphEdge {
            from: from.to_string(),
            to: to.to_string(),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn compile_single_node() {
        let graph = StructuredGraph {
            nodes: vec![node("a", "Start", NodeShape::Box)],
            edges: vec![],
        };
        let out = compile(&graph);
        assert!(out.starts_with(HEADER));
        assert!(out.contains("    a[Start]"));
        assert!(validate(&out).is_valid, "output: {out}");
    }

    #[test]
    fn compile_shapes_pick_bracket_pairs() {
        let graph = StructuredGraph {
            nodes: vec![
                node("a", "Start", NodeShape::Box),
                node("q", "Ready?", NodeShape::Diamond),
                node("e", "Done", NodeShape::Rounded),
            ],
            edges: vec![],
        };
        let out = compile(&graph);
        assert!(out.contains("    a[Start]"));
        assert!(out.contains("    q{Ready?}"));
        assert!(out.contains("    e(Done)"));
    }

    #[test]
    fn compile_layout_is_exact() {
        let graph = StructuredGraph {
            nodes: vec![
                node("a", "Start", NodeShape::Box),
                node("b", "End", NodeShape::Box),
            ],
            edges: vec![edge("a", "b", None)],
        };
        assert_eq!(compile(&graph), "graph TD\n    a[Start]\n    b[End]\n\n    a --> b");
    }

    #[test]
    fn compile_labeled_edge() {
        let graph = StructuredGraph {
            nodes: vec![
                node("q", "Ready?", NodeShape::Diamond),
                node("b", "Go", NodeShape::Box),
            ],
            edges: vec![edge("q", "b", Some("yes"))],
        };
        let out = compile(&graph);
        assert!(out.contains("    q --yes--> b"), "output: {out}");
    }

    #[test]
    fn compile_blank_edge_label_treated_as_absent() {
        let graph = StructuredGraph {
            nodes: vec![node("a", "A", NodeShape::Box), node("b", "B", NodeShape::Box)],
            edges: vec![edge("a", "b", Some("   "))],
        };
        let out = compile(&graph);
        assert!(out.contains("    a --> b"), "output: {out}");
    }

    #[test]
    fn compile_sanitizes_labels() {
        let graph = StructuredGraph {
            nodes: vec![node("a", "bad [label] \"here\"", NodeShape::Box)],
            edges: vec![],
        };
        let out = compile(&graph);
        assert!(out.contains("    a[bad label here]"), "output: {out}");
        assert!(validate(&out).is_valid);
    }

    #[test]
    fn compile_empty_graph_is_header_only() {
        assert_eq!(compile(&StructuredGraph::default()), HEADER);
    }

    #[test]
    fn compile_is_deterministic() {
        let graph = StructuredGraph {
            nodes: vec![
                node("a", "Start", NodeShape::Box),
                node("q", "Ready?", NodeShape::Diamond),
            ],
            edges: vec![edge("a", "q", Some("next"))],
        };
        assert_eq!(compile(&graph), compile(&graph));
    }

    #[test]
    fn compile_preserves_input_order() {
        let graph = StructuredGraph {
            nodes: vec![
                node("z", "Last letter", NodeShape::Box),
                node("a", "First letter", NodeShape::Box),
            ],
            edges: vec![edge("z", "a", None), edge("a", "z", None)],
        };
        let out = compile(&graph);
        let z = out.find("z[Last letter]").unwrap();
        let a = out.find("a[First letter]").unwrap();
        assert!(z < a, "nodes keep input order");
        let za = out.find("z --> a").unwrap();
        let az = out.find("a --> z").unwrap();
        assert!(za < az, "edges keep input order");
    }

    #[test]
    fn compile_or_placeholder_none() {
        let out = compile_or_placeholder(None);
        assert_eq!(out, "graph TD\n    missing[Diagram unavailable]");
        assert!(validate(&out).is_valid, "placeholder should pass validation");
    }

    #[test]
    fn compile_or_placeholder_some() {
        let graph = StructuredGraph {
            nodes: vec![node("a", "Start", NodeShape::Box)],
            edges: vec![],
        };
        assert_eq!(compile_or_placeholder(Some(&graph)), compile(&graph));
    }
}
