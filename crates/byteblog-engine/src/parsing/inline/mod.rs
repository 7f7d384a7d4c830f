//! # Inline Formatting
//!
//! Paragraph text is turned into a flat stream of [`InlineEvent`]s that
//! renderers map onto their own markup.
//!
//! ## Passes
//!
//! 1. **Code spans** (`code_span`): single-backtick spans are split out first and
//!    emitted verbatim. They are raw zones: no emphasis is applied inside them.
//! 2. **Glyph shielding** (`glyphs`): a fixed set of pictographic glyphs is swapped
//!    for positional placeholders so the emphasis passes never see them.
//! 3. **Emphasis** (`emphasis`): `***x***`, then `**x**`, then `*x*`, each pass
//!    over the output of the previous one.
//! 4. Glyphs are restored and the marked-up text is tokenized into events.
//!
//! ## Raw Zone Precedence
//!
//! `` `**not bold**` `` yields a single `Code` event with the asterisks intact.

pub mod code_span;
pub mod emphasis;
pub mod glyphs;
pub mod parser;
pub mod types;

pub use parser::format_inline;
pub use types::{InlineEvent, Style};
