use crate::parsing::{blocks::ContentBlock, sentinel};

/// Panics if `blocks` violates a parser invariant.
pub fn check(blocks: &[ContentBlock]) {
    for (i, b) in blocks.iter().enumerate() {
        match b {
            ContentBlock::Heading { level, text } => {
                assert!(
                    (1..=6).contains(&level.get()),
                    "heading level out of range at block {i}: {level}"
                );
                assert!(!text.is_empty(), "empty heading at block {i}");
            }
            ContentBlock::Paragraph { text } | ContentBlock::List { raw: text } => {
                assert!(!text.trim().is_empty(), "blank {} at block {i}", b.kind_name());
                assert_eq!(text.trim(), text, "untrimmed {} at block {i}", b.kind_name());
            }
            ContentBlock::CodeBlock { language, .. } => {
                assert!(!language.is_empty(), "code block without language at {i}");
            }
        }

        // Code bodies are verbatim and may legitimately hold reserved points.
        if !matches!(b, ContentBlock::CodeBlock { .. }) {
            let text = b.plain_text();
            assert!(
                !text.contains(sentinel::FENCE),
                "placeholder leaked into block {i}: {text:?}"
            );
        }
    }
}
