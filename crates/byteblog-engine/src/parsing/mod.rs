//! # Content Parsing
//!
//! Turns freeform post/portfolio body text into an ordered list of
//! [`ContentBlock`]s, and paragraph text into inline events.
//!
//! ## Phases
//!
//! 1. **Fence extraction** (`blocks::fences`): fenced code regions are lifted out
//!    and replaced by positional placeholders, so blank lines inside a fence never
//!    split it.
//! 2. **Segmentation** (`blocks::classify`): the remaining text is split on runs of
//!    two or more newlines.
//! 3. **Classification** (`blocks::classify`): each segment becomes a code block,
//!    heading, list or paragraph, in that priority order.
//!
//! Inline formatting (`inline`) is a separate pass applied by renderers to
//! paragraph text only.
//!
//! The parse is total: every input maps to a (possibly empty) block sequence.

pub mod blocks;
pub mod inline;
pub mod snapshot;

mod sentinel;

use blocks::{ContentBlock, FencedRegions, SegmentClassifier, split_segments};

/// Language attached to fences that carry no language tag.
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Language used for fenced code without a language tag.
    pub default_language: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_CODE_LANGUAGE.to_string(),
        }
    }
}

/// Block parser for body text. Stateless apart from its options, so one value
/// can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ContentParser {
    options: ParseOptions,
}

impl ContentParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn with_default_language(language: impl Into<String>) -> Self {
        Self::new(ParseOptions {
            default_language: language.into(),
        })
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses `content` into blocks in source order.
    pub fn parse(&self, content: &str) -> Vec<ContentBlock> {
        if content.trim().is_empty() {
            return vec![];
        }

        let normalized = content.replace("\r\n", "\n");
        let regions = FencedRegions::extract(&normalized, &self.options.default_language);

        let classifier = SegmentClassifier;
        let mut blocks = Vec::new();
        for segment in split_segments(regions.text()) {
            classifier.classify_into(segment, &regions, &mut blocks);
        }

        log::trace!(
            "parsed {} blocks ({} fenced) from {} bytes",
            blocks.len(),
            regions.len(),
            content.len()
        );
        blocks
    }
}

/// Parses `content` with the default options.
pub fn parse_content(content: &str) -> Vec<ContentBlock> {
    ContentParser::default().parse(content)
}
