//! # Rendering
//!
//! Renderers turn parsed blocks into output markup. What happens to source
//! text on its way into that markup is decided by a [`MarkupPolicy`], kept
//! separate so the escaping rules can change without touching block
//! classification.

pub mod highlight;
pub mod html;

use std::borrow::Cow;

use crate::parsing::blocks::ContentBlock;

pub use highlight::HighlightedSpan;
pub use html::HtmlRenderer;

/// Maps parsed blocks to an output representation.
pub trait Render {
    type Output;

    fn render(&self, blocks: &[ContentBlock]) -> Self::Output;
}

/// Decides how paragraph source text is written into generated markup.
///
/// Only paragraph text goes through the policy. Headings, list items, code
/// blocks and code spans are always escaped (highlighted code is escaped by
/// the highlighter).
pub trait MarkupPolicy {
    fn text<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Escapes all source text; only markup generated by the formatter survives.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeUntrusted;

impl MarkupPolicy for EscapeUntrusted {
    fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        html_escape::encode_text(text)
    }
}

/// Passes source text through untouched. Only for content whose provenance is
/// itself trusted: markup in the text is emitted as markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustedMarkup;

impl MarkupPolicy for TrustedMarkup {
    fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}
