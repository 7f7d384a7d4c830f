use std::sync::OnceLock;

use regex::Regex;

/// Unordered list bullets (`*` or `-`).
pub struct ListMarker;

impl ListMarker {
    pub const BULLETS: [char; 2] = ['*', '-'];

    fn line_pattern() -> &'static Regex {
        static LIST_LINE_REGEX: OnceLock<Regex> = OnceLock::new();
        LIST_LINE_REGEX
            .get_or_init(|| Regex::new(r"(?m)^[*-][ \t]+.+$").expect("Invalid list line regex"))
    }

    fn prefix_pattern() -> &'static Regex {
        static LIST_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
        LIST_PREFIX_REGEX
            .get_or_init(|| Regex::new(r"^[*-][ \t]+").expect("Invalid list prefix regex"))
    }

    /// True if any line of the segment starts with a bullet.
    pub fn is_list(segment: &str) -> bool {
        Self::line_pattern().is_match(segment)
    }

    /// Strips a leading bullet (and indentation) from one line.
    pub fn strip(line: &str) -> &str {
        let line = line.trim_start();
        match Self::prefix_pattern().find(line) {
            Some(m) => &line[m.end()..],
            None => line,
        }
    }

    /// One item per non-blank line, bullets stripped.
    pub fn items(raw: &str) -> Vec<&str> {
        raw.lines()
            .map(|line| Self::strip(line).trim_end())
            .filter(|item| !item.is_empty())
            .collect()
    }
}
