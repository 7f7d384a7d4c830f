use crate::parsing::sentinel::{self, EM_CLOSE, EM_OPEN, STRONG_CLOSE, STRONG_OPEN};

use super::{
    code_span::{CodeSpan, Part},
    emphasis,
    glyphs::Shielded,
    types::{InlineEvent, Style},
};

/// Formats paragraph text into inline events.
///
/// Code spans are emitted verbatim; everything else goes through glyph
/// shielding and the emphasis passes.
pub fn format_inline(text: &str) -> Vec<InlineEvent> {
    let text = sentinel::strip(text);
    let mut out = vec![];

    for part in CodeSpan::split(&text) {
        match part {
            Part::Code(code) => out.push(InlineEvent::Code(code.to_string())),
            Part::Text(text) => {
                let shielded = Shielded::new(text);
                let marked = emphasis::mark(&shielded.text);
                tokenize(&shielded.restore(&marked), &mut out);
            }
        }
    }

    out
}

/// Turns marker-bearing text into events.
fn tokenize(marked: &str, out: &mut Vec<InlineEvent>) {
    let mut text = String::new();

    // Helper to flush accumulated text as a Text event
    fn flush_text(out: &mut Vec<InlineEvent>, text: &mut String) {
        if !text.is_empty() {
            out.push(InlineEvent::Text(std::mem::take(text)));
        }
    }

    for ch in marked.chars() {
        let event = match ch {
            STRONG_OPEN => InlineEvent::Start(Style::Bold),
            STRONG_CLOSE => InlineEvent::End(Style::Bold),
            EM_OPEN => InlineEvent::Start(Style::Italic),
            EM_CLOSE => InlineEvent::End(Style::Italic),
            _ => {
                text.push(ch);
                continue;
            }
        };
        flush_text(out, &mut text);
        out.push(event);
    }

    flush_text(out, &mut text);
}
