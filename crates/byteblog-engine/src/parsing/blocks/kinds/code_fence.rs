use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::sentinel;

pub struct CodeFence;

impl CodeFence {
    pub const MARKER: &'static str = "```";

    /// Opening marker, optional lowercase language tag, newline, body (lazy),
    /// closing marker. An unclosed fence never matches.
    pub(crate) fn pattern() -> &'static Regex {
        static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
        FENCE_REGEX
            .get_or_init(|| Regex::new(r"```([a-z]*)\n((?s:.*?))```").expect("Invalid fence regex"))
    }

    pub(crate) fn placeholder_pattern() -> &'static Regex {
        static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
        PLACEHOLDER_REGEX.get_or_init(|| {
            Regex::new(r"\x{E000}CODE_BLOCK_(\d+)\x{E000}").expect("Invalid placeholder regex")
        })
    }

    /// Positional placeholder for the `index`-th extracted fence.
    pub(crate) fn placeholder(index: usize) -> String {
        format!("{0}CODE_BLOCK_{index}{0}", sentinel::FENCE)
    }

    /// Drops the single line break that precedes the closing marker.
    pub(crate) fn trim_body(body: &str) -> &str {
        body.strip_suffix('\n').unwrap_or(body)
    }
}
