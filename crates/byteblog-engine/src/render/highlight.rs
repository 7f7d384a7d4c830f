//! Syntax highlighting for code blocks, backed by syntect's bundled syntaxes.
//!
//! Lookups go by fence language tag, matched against syntax file extensions
//! first and syntax names second (`rs`, `js`, `JavaScript` all work). A tag
//! with no matching syntax yields `None` and callers fall back to plain text.

use std::sync::OnceLock;

use syntect::{
    easy::HighlightLines,
    highlighting::{FontStyle, ThemeSet},
    html::{ClassStyle, ClassedHTMLGenerator},
    parsing::{SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

/// Theme used for terminal colours.
pub const TERMINAL_THEME: &str = "base16-ocean.dark";

fn syntaxes() -> &'static SyntaxSet {
    static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn themes() -> &'static ThemeSet {
    static THEMES: OnceLock<ThemeSet> = OnceLock::new();
    THEMES.get_or_init(ThemeSet::load_defaults)
}

fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    let language = language.trim();
    if language.is_empty() {
        return None;
    }
    syntaxes().find_syntax_by_token(language)
}

/// Whether `language` names a syntax the highlighter knows.
pub fn is_supported(language: &str) -> bool {
    find_syntax(language).is_some()
}

/// Highlighted HTML for `code`: nested `<span class="…">` elements with the
/// text escaped. Meant to sit inside a `<pre><code>` pair.
pub fn highlight_html(code: &str, language: &str) -> Option<String> {
    let syntax = find_syntax(language)?;
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntaxes(), ClassStyle::Spaced);

    for line in LinesWithEndings::from(code) {
        if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
            log::debug!("Highlighting {language} failed, using plain text: {e}");
            return None;
        }
    }
    Some(generator.finalize())
}

/// A run of code text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedSpan {
    pub text: String,
    /// Foreground as RGB.
    pub color: (u8, u8, u8),
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

/// Highlighted spans for `code`, one entry per source line, line breaks removed.
pub fn highlight_lines(code: &str, language: &str) -> Option<Vec<Vec<HighlightedSpan>>> {
    let syntax = find_syntax(language)?;
    let theme = themes().themes.get(TERMINAL_THEME)?;
    let mut highlighter = HighlightLines::new(syntax, theme);

    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        let regions = match highlighter.highlight_line(line, syntaxes()) {
            Ok(regions) => regions,
            Err(e) => {
                log::debug!("Highlighting {language} failed, using plain text: {e}");
                return None;
            }
        };

        let spans = regions
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.trim_end_matches(['\r', '\n']);
                if text.is_empty() {
                    return None;
                }
                let fg = style.foreground;
                Some(HighlightedSpan {
                    text: text.to_string(),
                    color: (fg.r, fg.g, fg.b),
                    bold: style.font_style.contains(FontStyle::BOLD),
                    italic: style.font_style.contains(FontStyle::ITALIC),
                    underline: style.font_style.contains(FontStyle::UNDERLINE),
                })
            })
            .collect();
        lines.push(spans);
    }
    Some(lines)
}
