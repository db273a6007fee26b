use std::sync::OnceLock;

use regex::Regex;

fn line_break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"))
}

fn split_double_arrow_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"--\s+>").expect("valid regex"))
}

fn split_single_arrow_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-\s+->").expect("valid regex"))
}

fn labeled_arrow_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"--\s+(\S[^\n>]*?)\s+--\s*>").expect("valid regex"))
}

/// Best-effort repair of raw flow-diagram text that did not come out of the
/// compiler (typically model output). The rewrites run in a fixed order, each
/// over the result of the previous one:
///
/// 1. literal `<br>`-family tags become real newlines,
/// 2. arrows split by stray whitespace close up (`-- >` to `-->`, `- ->` to
///    `->`),
/// 3. labeled arrows normalize to the canonical `-- text -->` spacing.
///
/// Text matching none of the patterns passes through unchanged. The result is
/// not guaranteed valid; run it through [`crate::validate`] for a verdict.
pub fn clean(raw: &str) -> String {
    let out = line_break_regex().replace_all(raw, "\n");
    let out = split_double_arrow_regex().replace_all(&out, "-->");
    let out = split_single_arrow_regex().replace_all(&out, "->");
    let out = labeled_arrow_regex().replace_all(&out, "-- $1 -->");

    if out != raw {
        tracing::debug!(bytes_in = raw.len(), bytes_out = out.len(), "repaired diagram text");
    }
    out.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_passes_through_clean_text() {
        let input = "graph TD\n    a[Start] --> b[End]";
        assert_eq!(clean(input), input);
    }

    #[test]
    fn clean_replaces_br_tags() {
        assert_eq!(clean("graph TD<br/>    a --> b"), "graph TD\n    a --> b");
        assert_eq!(clean("a<br>b"), "a\nb");
        assert_eq!(clean("a<br />b"), "a\nb");
        assert_eq!(clean("a<BR/>b"), "a\nb");
    }

    #[test]
    fn clean_closes_split_double_arrow() {
        assert_eq!(clean("a -- > b"), "a --> b");
        assert_eq!(clean("a --   > b"), "a --> b");
    }

    #[test]
    fn clean_closes_split_single_arrow() {
        assert_eq!(clean("a - -> b"), "a -> b");
    }

    #[test]
    fn clean_repairs_labeled_arrow_with_stray_space() {
        assert_eq!(clean("a -- label -- > b"), "a -- label --> b");
    }

    #[test]
    fn clean_normalizes_labeled_arrow_spacing() {
        assert_eq!(clean("a --  label   --> b"), "a -- label --> b");
    }

    #[test]
    fn clean_keeps_compact_labeled_arrow() {
        // the compiler's own form carries no inner spaces and is left alone
        assert_eq!(clean("a --yes--> b"), "a --yes--> b");
    }

    #[test]
    fn clean_handles_multiple_defects_in_one_text() {
        let input = "graph TD<br/>    a -- > b<br/>    b -- go -- > c";
        assert_eq!(clean(input), "graph TD\n    a --> b\n    b -- go --> c");
    }

    #[test]
    fn clean_empty_input() {
        assert_eq!(clean(""), "");
    }
}
