use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::blocks::HeadingLevel;

pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    /// One to six `#`, whitespace (a line break counts), then a single line of text.
    fn pattern() -> &'static Regex {
        static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
        HEADING_REGEX
            .get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("Invalid heading regex"))
    }

    /// Returns the level and trimmed text when the whole segment is a heading.
    pub fn parse(segment: &str) -> Option<(HeadingLevel, &str)> {
        let caps = Self::pattern().captures(segment)?;
        let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
        let level = HeadingLevel::new(level)?;
        let text = caps.get(2)?.as_str().trim();
        if text.is_empty() {
            return None;
        }
        Some((level, text))
    }
}
