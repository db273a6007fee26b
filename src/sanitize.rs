/// Placeholder used when sanitizing leaves nothing behind. A node definition
/// with an empty label (`a[]`) is a syntax error downstream, so labels are
/// never rendered empty.
pub const EMPTY_LABEL_FALLBACK: &str = "Step";

const STRIPPED: [char; 8] = ['[', ']', '(', ')', '{', '}', '"', '|'];

/// Make a text fragment safe to embed as a Mermaid node or edge label.
///
/// Strips the characters that are structurally significant in the DSL,
/// collapses whitespace runs to a single space, and trims. The steps run in
/// that order: whitespace collapsing sees the text with brackets already
/// removed, and the emptiness fallback sees the trimmed result.
pub fn sanitize_label(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !STRIPPED.contains(c)).collect();

    let mut collapsed = String::with_capacity(stripped.len());
    let mut in_whitespace = false;
    for ch in stripped.chars() {
        if ch.is_whitespace() {
            in_whitespace = true;
        } else {
            if in_whitespace && !collapsed.is_empty() {
                collapsed.push(' ');
            }
            in_whitespace = false;
            collapsed.push(ch);
        }
    }

    if collapsed.is_empty() {
        EMPTY_LABEL_FALLBACK.to_string()
    } else {
        collapsed
    }
}
