/// Emphasis style carried by `Start`/`End` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Bold,
    Italic,
}

/// One event of formatted inline content.
///
/// `Start` and `End` events are always balanced and properly nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineEvent {
    /// Ordinary source text.
    Text(String),
    /// Verbatim content of a backtick span.
    Code(String),
    Start(Style),
    End(Style),
}
