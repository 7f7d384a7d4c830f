//! Private-use code points the parser uses as in-band placeholders.
//!
//! Text outside code fences never carries these: [`strip`] removes them before
//! any later pass runs, so a placeholder found there is always one the parser
//! inserted itself. Fence bodies are left verbatim.

use std::borrow::Cow;

/// Delimits a fenced code placeholder.
pub(crate) const FENCE: char = '\u{E000}';
/// Delimits a protected glyph placeholder.
pub(crate) const GLYPH_OPEN: char = '\u{E001}';
pub(crate) const GLYPH_CLOSE: char = '\u{E002}';
/// Emphasis markers left behind by the substitution passes.
pub(crate) const STRONG_OPEN: char = '\u{E003}';
pub(crate) const STRONG_CLOSE: char = '\u{E004}';
pub(crate) const EM_OPEN: char = '\u{E005}';
pub(crate) const EM_CLOSE: char = '\u{E006}';

const RESERVED_START: char = '\u{E000}';
const RESERVED_END: char = '\u{E00F}';

fn is_reserved(ch: char) -> bool {
    (RESERVED_START..=RESERVED_END).contains(&ch)
}

/// Removes reserved code points from `text`, borrowing when there are none.
pub(crate) fn strip(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_reserved) {
        Cow::Owned(text.chars().filter(|&ch| !is_reserved(ch)).collect())
    } else {
        Cow::Borrowed(text)
    }
}
