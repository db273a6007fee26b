use std::fmt;

use serde::Serialize;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Diagram-type keywords the header check accepts, compared case-insensitively
/// against the start of the text.
const DIAGRAM_TYPES: [&str; 11] = [
    "graph",
    "flowchart",
    "sequencediagram",
    "classdiagram",
    "erdiagram",
    "journey",
    "gantt",
    "pie",
    "gitgraph",
    "mindmap",
    "timeline",
];

/// Text at or below this many characters is reported as too short.
const MIN_LENGTH: usize = 15;

const STRUCTURAL_TOKENS: [&str; 8] = [
    "-->",
    "->",
    "---",
    "::",
    "subgraph",
    "participant",
    "activate",
    "note",
];

/// Markup that indicates un-cleaned model output (matched case-insensitively).
const PROHIBITED_MARKUP: [&str; 3] = ["<br", "<div", "<span"];

/// Arrow fragments split by stray whitespace.
const BROKEN_ARROWS: [&str; 2] = ["-- >", "- >"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Violation {
    EmptyInput,
    UnrecognizedDiagramType,
    UnbalancedBrackets,
    /// Carries the duplicated identifiers, sorted and deduplicated.
    DuplicateNodeId(Vec<String>),
    ProhibitedMarkup,
    BrokenArrowSyntax,
    NoStructuralSyntax,
    TooShort,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyInput => write!(f, "input is empty"),
            Violation::UnrecognizedDiagramType => {
                write!(f, "text does not start with a known diagram type")
            }
            Violation::UnbalancedBrackets => write!(f, "bracket counts do not match"),
            Violation::DuplicateNodeId(ids) => {
                write!(f, "node ids defined more than once: {}", ids.join(", "))
            }
            Violation::ProhibitedMarkup => write!(f, "contains raw markup tags"),
            Violation::BrokenArrowSyntax => write!(f, "contains an arrow split by whitespace"),
            Violation::NoStructuralSyntax => write!(f, "no node or edge syntax found"),
            Violation::TooShort => write!(f, "text is too short to be a diagram"),
        }
    }
}

/// Outcome of [`validate`]. Violations accumulate in check order; `is_valid`
/// holds exactly when the list is empty. Advisory by design: callers are
/// expected to render the text regardless and surface violations as warnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl Verdict {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Verdict {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    pub fn has(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }

    /// Duplicated node identifiers, if any were found.
    pub fn duplicate_ids(&self) -> &[String] {
        self.violations
            .iter()
            .find_map(|v| match v {
                Violation::DuplicateNodeId(ids) => Some(ids.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

/// Run the structural checks against flow-diagram text.
///
/// Blank input short-circuits to a single `EmptyInput` violation; otherwise
/// every check runs and its violations accumulate. The checks are surface
/// heuristics on purpose: bracket counting is not nesting-aware and node
/// definitions are only recognized at line starts. A formal parser would
/// accept and reject different edge cases, so one must not be substituted
/// here.
pub fn validate(text: &str) -> Verdict {
    if text.trim().is_empty() {
        return Verdict::from_violations(vec![Violation::EmptyInput]);
    }

    let body = strip_fence(text);
    let lower = body.to_lowercase();
    let mut violations = Vec::new();

    if !DIAGRAM_TYPES.iter().any(|t| lower.starts_with(t)) {
        violations.push(Violation::UnrecognizedDiagramType);
    }
    if body.chars().count() <= MIN_LENGTH {
        violations.push(Violation::TooShort);
    }
    if !brackets_balanced(body) {
        violations.push(Violation::UnbalancedBrackets);
    }
    if PROHIBITED_MARKUP.iter().any(|t| lower.contains(t)) {
        violations.push(Violation::ProhibitedMarkup);
    }
    if BROKEN_ARROWS.iter().any(|t| body.contains(t)) {
        violations.push(Violation::BrokenArrowSyntax);
    }
    let duplicates = duplicate_node_ids(body);
    if !duplicates.is_empty() {
        tracing::debug!(ids = ?duplicates, "duplicate node definitions");
        violations.push(Violation::DuplicateNodeId(duplicates));
    }
    if !has_structural_syntax(body) {
        violations.push(Violation::NoStructuralSyntax);
    }

    Verdict::from_violations(violations)
}

/// Drop a surrounding ```` ```mermaid ```` fence, if present. Only the fence
/// lines themselves are removed; no other markdown handling.
fn strip_fence(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = rest.split_once('\n').map_or("", |(_, tail)| tail);
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

fn brackets_balanced(text: &str) -> bool {
    let mut square = 0i64;
    let mut round = 0i64;
    let mut curly = 0i64;
    for c in text.chars() {
        match c {
            '[' => square += 1,
            ']' => square -= 1,
            '(' => round += 1,
            ')' => round -= 1,
            '{' => curly += 1,
            '}' => curly -= 1,
            _ => {}
        }
    }
    square == 0 && round == 0 && curly == 0
}

fn has_structural_syntax(text: &str) -> bool {
    STRUCTURAL_TOKENS.iter().any(|t| text.contains(t)) || text.contains(['[', '(', '{'])
}

/// `identifier` immediately followed by an opening bracket, the shape of a
/// node definition.
fn node_definition_id<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    let id = take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)?;
    one_of(['[', '(', '{']).parse_next(input)?;
    Ok(id)
}

/// Identifiers defined (line-start, ignoring indentation) more than once.
fn duplicate_node_ids(text: &str) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    let mut duplicates: Vec<String> = Vec::new();
    for line in text.lines() {
        let mut rest = line.trim_start();
        let Ok(id) = node_definition_id(&mut rest) else {
            continue;
        };
        if seen.contains(&id) {
            if !duplicates.iter().any(|d| d == id) {
                duplicates.push(id.to_string());
            }
        } else {
            seen.push(id);
        }
    }
    duplicates.sort();
    duplicates
}
