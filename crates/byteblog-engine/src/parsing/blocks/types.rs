use std::fmt;

use serde::Serialize;

use super::kinds::ListMarker;

/// Heading depth, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Returns `None` when `level` is outside `1..=6`.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One structural unit of body content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A `#`..`######` line.
    Heading { level: HeadingLevel, text: String },
    /// Default block. Inline formatting is applied at render time.
    Paragraph { text: String },
    /// A fenced code region. `language` is the fence tag or the parser default.
    CodeBlock { code: String, language: String },
    /// An unordered list. Items are extracted from `raw` at render time.
    List { raw: String },
}

impl ContentBlock {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn code(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self::CodeBlock {
            code: code.into(),
            language: language.into(),
        }
    }

    pub fn list(raw: impl Into<String>) -> Self {
        Self::List { raw: raw.into() }
    }

    /// Short name of the variant, as used in snapshots and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Heading { .. } => "Heading",
            Self::Paragraph { .. } => "Paragraph",
            Self::CodeBlock { .. } => "CodeBlock",
            Self::List { .. } => "List",
        }
    }

    /// List items with bullet prefixes stripped. Empty for non-list blocks.
    pub fn list_items(&self) -> Vec<&str> {
        match self {
            Self::List { raw } => ListMarker::items(raw),
            _ => vec![],
        }
    }

    /// The block's text without any markup.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Heading { text, .. } | Self::Paragraph { text } => text.clone(),
            Self::CodeBlock { code, .. } => code.clone(),
            Self::List { .. } => self.list_items().join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_level_bounds() {
        assert!(HeadingLevel::new(0).is_none());
        assert_eq!(HeadingLevel::new(1).map(HeadingLevel::get), Some(1));
        assert_eq!(HeadingLevel::new(6).map(HeadingLevel::get), Some(6));
        assert!(HeadingLevel::new(7).is_none());
    }

    #[test]
    fn list_items_only_for_lists() {
        assert_eq!(ContentBlock::list("* a\n- b").list_items(), vec!["a", "b"]);
        assert!(ContentBlock::paragraph("* a").list_items().is_empty());
    }

    #[test]
    fn plain_text_of_list_joins_items() {
        assert_eq!(ContentBlock::list("* one\n* two").plain_text(), "one\ntwo");
    }

    #[test]
    fn serializes_with_type_tag() {
        let level = HeadingLevel::new(2).unwrap();
        let json = serde_json::to_value(ContentBlock::heading(level, "Intro")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "heading", "level": 2, "text": "Intro" })
        );

        let json = serde_json::to_value(ContentBlock::code("x", "rust")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "code_block", "code": "x", "language": "rust" })
        );
    }
}
