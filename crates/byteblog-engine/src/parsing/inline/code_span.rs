use std::sync::OnceLock;

use regex::Regex;

/// Backtick-delimited inline code.
pub struct CodeSpan;

/// Part of a paragraph after splitting out code spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part<'a> {
    Text(&'a str),
    Code(&'a str),
}

impl CodeSpan {
    pub const TICK: char = '`';

    fn pattern() -> &'static Regex {
        static CODE_SPAN_REGEX: OnceLock<Regex> = OnceLock::new();
        CODE_SPAN_REGEX.get_or_init(|| Regex::new(r"`([^`]+)`").expect("Invalid code span regex"))
    }

    /// Splits `text` into alternating text and code parts. Empty text parts
    /// are omitted; an unclosed or empty span stays in the text.
    pub fn split(text: &str) -> Vec<Part<'_>> {
        let mut parts = Vec::new();
        let mut last = 0;

        for caps in Self::pattern().captures_iter(text) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                parts.push(Part::Text(&text[last..whole.start()]));
            }
            parts.push(Part::Code(inner.as_str()));
            last = whole.end();
        }
        if last < text.len() {
            parts.push(Part::Text(&text[last..]));
        }

        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_code_out_of_text() {
        assert_eq!(
            CodeSpan::split("use `cargo test` often"),
            vec![
                Part::Text("use "),
                Part::Code("cargo test"),
                Part::Text(" often")
            ]
        );
    }

    #[test]
    fn adjacent_spans() {
        assert_eq!(
            CodeSpan::split("`a``b`"),
            vec![Part::Code("a"), Part::Code("b")]
        );
    }

    #[test]
    fn unclosed_span_is_text() {
        assert_eq!(
            CodeSpan::split("`unclosed code"),
            vec![Part::Text("`unclosed code")]
        );
    }

    #[test]
    fn empty_span_is_text() {
        assert_eq!(CodeSpan::split("a `` b"), vec![Part::Text("a `` b")]);
    }
}
