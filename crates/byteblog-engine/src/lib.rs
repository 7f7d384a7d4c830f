pub mod models;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use models::*;
pub use parsing::{
    ContentParser, DEFAULT_CODE_LANGUAGE, ParseOptions,
    blocks::{ContentBlock, HeadingLevel},
    inline::{InlineEvent, Style, format_inline},
    parse_content,
};
pub use render::{
    EscapeUntrusted, HighlightedSpan, HtmlRenderer, MarkupPolicy, Render, TrustedMarkup, highlight,
};
