//! # Snapshot Testing Support
//!
//! - **`outline`**: renders parsed blocks as a stable, line-per-block text form
//!   for `insta` string snapshots
//! - **`invariants`**: checks every parse must satisfy (no empty blocks, no
//!   placeholder leaks, headings in range)

pub mod invariants;

pub use invariants::check as invariants;

use super::blocks::ContentBlock;

/// One line per block: kind, key attribute, and debug-quoted text.
pub fn outline(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            ContentBlock::Heading { level, text } => format!("Heading({level}) {text:?}"),
            ContentBlock::Paragraph { text } => format!("Paragraph {text:?}"),
            ContentBlock::CodeBlock { code, language } => format!("CodeBlock({language}) {code:?}"),
            ContentBlock::List { .. } => format!("List {:?}", block.list_items()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
