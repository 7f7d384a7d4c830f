use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::sentinel::{GLYPH_CLOSE, GLYPH_OPEN};

/// Decorative glyphs kept out of the emphasis passes.
pub const PROTECTED_GLYPHS: [&str; 8] = [
    "\u{1F680}",         // rocket
    "\u{1F331}",         // seedling
    "\u{1F525}",         // fire
    "\u{2728}",          // sparkles
    "\u{1F4E6}",         // package
    "\u{1F6E0}\u{FE0F}", // hammer and wrench
    "\u{1F50D}",         // magnifying glass
    "\u{26A1}",          // high voltage
];

fn glyph_pattern() -> &'static Regex {
    static GLYPH_REGEX: OnceLock<Regex> = OnceLock::new();
    GLYPH_REGEX.get_or_init(|| {
        let alternatives: Vec<String> = PROTECTED_GLYPHS.iter().map(|g| regex::escape(g)).collect();
        Regex::new(&alternatives.join("|")).expect("Invalid glyph regex")
    })
}

fn placeholder_pattern() -> &'static Regex {
    static GLYPH_PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    GLYPH_PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\x{E001}(\d+)\x{E002}").expect("Invalid glyph placeholder regex")
    })
}

/// Text with protected glyphs swapped for positional placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shielded {
    pub text: String,
    glyphs: Vec<String>,
}

impl Shielded {
    /// Replaces each protected glyph occurrence, in order, with a placeholder
    /// numbered by its position.
    pub fn new(text: &str) -> Self {
        let mut glyphs = Vec::new();
        let shielded = glyph_pattern()
            .replace_all(text, |caps: &regex::Captures<'_>| {
                glyphs.push(caps[0].to_string());
                format!("{GLYPH_OPEN}{}{GLYPH_CLOSE}", glyphs.len() - 1)
            })
            .into_owned();

        Self {
            text: shielded,
            glyphs,
        }
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Puts the glyphs back into `formatted`, which is `self.text` after
    /// any number of placeholder-preserving rewrites.
    pub fn restore(&self, formatted: &str) -> String {
        if self.glyphs.is_empty() {
            return formatted.to_string();
        }
        placeholder_pattern()
            .replace_all(formatted, |caps: &regex::Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.glyphs.get(index))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}
