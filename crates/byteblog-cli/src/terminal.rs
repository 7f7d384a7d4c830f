//! Renders parsed blocks as styled terminal lines.

use byteblog_engine::{
    ContentBlock, HighlightedSpan, InlineEvent, Render, Style as Emphasis, format_inline, highlight,
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Styled spans for paragraph text. Code spans are shown verbatim.
    pub fn inline_spans(&self, text: &str) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let mut bold = 0usize;
        let mut italic = 0usize;

        for event in format_inline(text) {
            match event {
                InlineEvent::Text(t) => {
                    let mut style = Style::default();
                    if bold > 0 {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    if italic > 0 {
                        style = style.add_modifier(Modifier::ITALIC);
                    }
                    spans.push(Span::styled(t, style));
                }
                InlineEvent::Code(c) => {
                    spans.push(Span::styled(c, Style::default().fg(Color::Yellow)));
                }
                InlineEvent::Start(Emphasis::Bold) => bold += 1,
                InlineEvent::Start(Emphasis::Italic) => italic += 1,
                InlineEvent::End(Emphasis::Bold) => bold = bold.saturating_sub(1),
                InlineEvent::End(Emphasis::Italic) => italic = italic.saturating_sub(1),
            }
        }
        spans
    }
}

impl Render for TerminalRenderer {
    type Output = Vec<Line<'static>>;

    fn render(&self, blocks: &[ContentBlock]) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for block in blocks {
            match block {
                ContentBlock::Heading { level, text } => {
                    let prefix = "#".repeat(level.get() as usize);
                    lines.push(Line::styled(
                        format!("{prefix} {text}"),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ));
                }
                ContentBlock::Paragraph { text } => {
                    lines.push(Line::from(self.inline_spans(text)));
                }
                ContentBlock::CodeBlock { code, language } => {
                    let fence = Style::default().fg(Color::DarkGray);
                    lines.push(Line::styled(format!("```{language}"), fence));
                    lines.extend(code_lines(code, language));
                    lines.push(Line::styled("```", fence));
                }
                ContentBlock::List { .. } => {
                    lines.extend(
                        block
                            .list_items()
                            .into_iter()
                            .map(|item| Line::from(format!("• {item}"))),
                    );
                }
            }
            lines.push(Line::default());
        }

        lines
    }
}

/// Highlighted code lines, or plain green text when the language is unknown.
fn code_lines(code: &str, language: &str) -> Vec<Line<'static>> {
    match highlight::highlight_lines(code, language) {
        Some(highlighted) => highlighted
            .into_iter()
            .map(|spans| Line::from(spans.into_iter().map(code_span).collect::<Vec<_>>()))
            .collect(),
        None => code
            .lines()
            .map(|l| Line::styled(l.to_string(), Style::default().fg(Color::Green)))
            .collect(),
    }
}

fn code_span(span: HighlightedSpan) -> Span<'static> {
    let (r, g, b) = span.color;
    let mut style = Style::default().fg(Color::Rgb(r, g, b));
    if span.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if span.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if span.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(span.text, style)
}

/// Plain text of a rendered line, for non-interactive output.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
