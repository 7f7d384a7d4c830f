use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::parsing::{
    blocks::ContentBlock,
    inline::{InlineEvent, Style, format_inline},
};

use super::{EscapeUntrusted, MarkupPolicy, Render, TrustedMarkup, highlight};

/// Renders blocks as HTML fragments, one block per line.
///
/// Code blocks are syntax-highlighted into classed `<span>`s when the fence
/// language is known, and emitted as escaped plain text otherwise.
#[derive(Debug, Clone)]
pub struct HtmlRenderer<P = EscapeUntrusted> {
    policy: P,
    highlight: bool,
}

impl<P: MarkupPolicy + Default> Default for HtmlRenderer<P> {
    fn default() -> Self {
        Self::with_policy(P::default())
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HtmlRenderer<TrustedMarkup> {
    pub fn trusted() -> Self {
        Self::with_policy(TrustedMarkup)
    }
}

impl<P: MarkupPolicy> HtmlRenderer<P> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            policy,
            highlight: true,
        }
    }

    /// Emit code blocks as plain escaped text.
    pub fn plain_code(mut self) -> Self {
        self.highlight = false;
        self
    }

    pub fn render_block(&self, block: &ContentBlock) -> String {
        match block {
            ContentBlock::Heading { level, text } => {
                format!("<h{level}>{}</h{level}>", encode_text(text))
            }
            ContentBlock::CodeBlock { code, language } => {
                let body = self
                    .highlight
                    .then(|| highlight::highlight_html(code, language))
                    .flatten()
                    .unwrap_or_else(|| encode_text(code).into_owned());
                format!(
                    "<pre><code class=\"language-{}\">{body}</code></pre>",
                    encode_double_quoted_attribute(language),
                )
            }
            ContentBlock::List { .. } => {
                let mut html = String::from("<ul>");
                for item in block.list_items() {
                    html.push_str("<li>");
                    html.push_str(&encode_text(item));
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
                html
            }
            ContentBlock::Paragraph { text } => format!("<p>{}</p>", self.render_inline(text)),
        }
    }

    /// Inline-formats paragraph text.
    pub fn render_inline(&self, text: &str) -> String {
        let mut html = String::with_capacity(text.len());
        for event in format_inline(text) {
            match event {
                InlineEvent::Text(t) => html.push_str(&self.policy.text(&t)),
                InlineEvent::Code(c) => {
                    html.push_str("<code>");
                    html.push_str(&encode_text(&c));
                    html.push_str("</code>");
                }
                InlineEvent::Start(style) => html.push_str(open_tag(style)),
                InlineEvent::End(style) => html.push_str(close_tag(style)),
            }
        }
        html
    }
}

impl<P: MarkupPolicy> Render for HtmlRenderer<P> {
    type Output = String;

    fn render(&self, blocks: &[ContentBlock]) -> String {
        blocks
            .iter()
            .map(|b| self.render_block(b))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn open_tag(style: Style) -> &'static str {
    match style {
        Style::Bold => "<strong>",
        Style::Italic => "<em>",
    }
}

fn close_tag(style: Style) -> &'static str {
    match style {
        Style::Bold => "</strong>",
        Style::Italic => "</em>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::HeadingLevel;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_uses_stored_level() {
        let block = ContentBlock::heading(HeadingLevel::new(3).unwrap(), "Setup");
        assert_eq!(HtmlRenderer::new().render_block(&block), "<h3>Setup</h3>");
    }

    #[test]
    fn plain_code_block_is_tagged_and_escaped() {
        let block = ContentBlock::code("if a < b { x() }", "rust");
        assert_eq!(
            HtmlRenderer::new().plain_code().render_block(&block),
            "<pre><code class=\"language-rust\">if a &lt; b { x() }</code></pre>"
        );
    }

    #[test]
    fn known_language_is_highlighted() {
        let block = ContentBlock::code("if a < b { x() }", "rust");
        let html = HtmlRenderer::new().render_block(&block);

        assert!(html.starts_with("<pre><code class=\"language-rust\"><span class=\""), "{html}");
        assert!(html.ends_with("</code></pre>"), "{html}");
        assert!(html.contains("&lt;"), "{html}");
        assert!(!html.contains("a < b"), "{html}");
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text() {
        let block = ContentBlock::code("<x>", "nosuchlang");
        assert_eq!(
            HtmlRenderer::new().render_block(&block),
            "<pre><code class=\"language-nosuchlang\">&lt;x&gt;</code></pre>"
        );
    }

    #[test]
    fn list_items_are_stripped_and_escaped() {
        let block = ContentBlock::list("* one\n- <two>");
        assert_eq!(
            HtmlRenderer::new().render_block(&block),
            "<ul><li>one</li><li>&lt;two&gt;</li></ul>"
        );
    }

    #[test]
    fn paragraph_inline_formatting() {
        let block = ContentBlock::paragraph("**bold** and *italic* and `co*d*e`");
        assert_eq!(
            HtmlRenderer::new().render_block(&block),
            "<p><strong>bold</strong> and <em>italic</em> and <code>co*d*e</code></p>"
        );
    }

    #[test]
    fn untrusted_markup_is_escaped() {
        let html = HtmlRenderer::new().render_inline("<script>alert(1)</script> **hi**");
        assert_eq!(
            html,
            "&lt;script&gt;alert(1)&lt;/script&gt; <strong>hi</strong>"
        );
    }

    #[test]
    fn trusted_markup_passes_through() {
        let html = HtmlRenderer::trusted().render_inline("<u>under</u> *it*");
        assert_eq!(html, "<u>under</u> <em>it</em>");
    }

    #[test]
    fn code_spans_are_escaped_even_when_trusted() {
        let html = HtmlRenderer::trusted().render_inline("`<b>`");
        assert_eq!(html, "<code>&lt;b&gt;</code>");
    }
}
