use std::sync::OnceLock;

use regex::Regex;

use super::{
    fences::{FencedRegions, Piece},
    kinds::{Heading, ListMarker},
    types::ContentBlock,
};

fn segment_break() -> &'static Regex {
    static SEGMENT_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();
    SEGMENT_BREAK_REGEX.get_or_init(|| Regex::new(r"\n{2,}").expect("Invalid segment regex"))
}

/// Splits text on runs of two or more newlines, yielding trimmed, non-empty
/// segments in order.
pub fn split_segments(text: &str) -> impl Iterator<Item = &str> {
    segment_break()
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Classifies segments into blocks.
///
/// Priority: fence placeholder, heading, list, paragraph. Anything that is not
/// recognised ends up as a paragraph, so classification cannot fail.
pub struct SegmentClassifier;

impl SegmentClassifier {
    /// Classifies one segment, appending the resulting blocks to `out`.
    ///
    /// A segment that is exactly one placeholder yields one code block. When
    /// a fence sits inside a larger segment, the text on either side is
    /// classified on its own and the code block is emitted between them.
    pub fn classify_into(
        &self,
        segment: &str,
        regions: &FencedRegions,
        out: &mut Vec<ContentBlock>,
    ) {
        if regions.is_empty() {
            out.push(self.classify_text(segment));
            return;
        }

        for piece in regions.pieces(segment) {
            match piece {
                Piece::Fence(fence) => {
                    out.push(ContentBlock::code(&fence.code, &fence.language));
                }
                Piece::Text(text) => out.push(self.classify_text(text)),
            }
        }
    }

    /// Classifies a placeholder-free segment.
    pub fn classify_text(&self, segment: &str) -> ContentBlock {
        if let Some((level, text)) = Heading::parse(segment) {
            return ContentBlock::heading(level, text);
        }
        if ListMarker::is_list(segment) {
            return ContentBlock::list(segment);
        }
        ContentBlock::paragraph(segment)
    }
}
