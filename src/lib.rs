pub mod clean;
pub mod compile;
pub mod graph;
pub mod sanitize;
pub mod validate;

pub use clean::clean;
pub use compile::{compile, compile_or_placeholder};
pub use graph::{GraphEdge, GraphNode, NodeShape, StructuredGraph};
pub use sanitize::sanitize_label;
pub use validate::{Verdict, Violation, validate};

/// Repair raw diagram text, then judge the repaired result. The cleaned text
/// is returned alongside the verdict so callers can render it either way; the
/// verdict is advisory, not a gate.
pub fn clean_then_validate(raw: &str) -> (String, Verdict) {
    let cleaned = clean(raw);
    let verdict = validate(&cleaned);
    (cleaned, verdict)
}
