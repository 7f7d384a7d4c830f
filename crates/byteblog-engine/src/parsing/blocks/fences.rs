use super::kinds::CodeFence;
use crate::parsing::sentinel;

/// A fenced code region lifted out of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCode {
    pub language: String,
    pub code: String,
}

/// Source text with every fenced region replaced by a positional placeholder.
#[derive(Debug, Clone)]
pub struct FencedRegions {
    text: String,
    fences: Vec<FencedCode>,
}

/// A piece of a segment: either ordinary text or a resolved fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    Fence(&'a FencedCode),
}

impl FencedRegions {
    /// Extracts fences in source order. Fences without a language tag get
    /// `default_language`.
    ///
    /// Reserved code points are stripped from the text between fences only;
    /// fence bodies are kept verbatim.
    pub fn extract(content: &str, default_language: &str) -> Self {
        let mut fences = Vec::new();
        let mut text = String::with_capacity(content.len());
        let mut last = 0;

        for caps in CodeFence::pattern().captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            text.push_str(&sentinel::strip(&content[last..whole.start()]));

            let language = match &caps[1] {
                "" => default_language.to_string(),
                tag => tag.to_string(),
            };
            fences.push(FencedCode {
                language,
                code: CodeFence::trim_body(&caps[2]).to_string(),
            });
            text.push_str(&CodeFence::placeholder(fences.len() - 1));
            last = whole.end();
        }
        text.push_str(&sentinel::strip(&content[last..]));

        Self { text, fences }
    }

    /// The text with placeholders in place of fences.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fences(&self) -> &[FencedCode] {
        &self.fences
    }

    pub fn len(&self) -> usize {
        self.fences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fences.is_empty()
    }

    pub fn resolve(&self, index: usize) -> Option<&FencedCode> {
        self.fences.get(index)
    }

    /// Splits `segment` around placeholders. Text pieces are trimmed and
    /// blank ones are dropped, so a segment that is exactly one placeholder
    /// yields exactly one `Piece::Fence`.
    pub fn pieces<'a>(&'a self, segment: &'a str) -> Vec<Piece<'a>> {
        let mut out = Vec::new();
        let mut last = 0;

        fn push_text<'a>(out: &mut Vec<Piece<'a>>, text: &'a str) {
            let text = text.trim();
            if !text.is_empty() {
                out.push(Piece::Text(text));
            }
        }

        for caps in CodeFence::placeholder_pattern().captures_iter(segment) {
            let Some(whole) = caps.get(0) else { continue };
            let fence = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.resolve(index));

            // Only this parser writes placeholders, so resolution cannot miss;
            // an unresolvable token is kept as text rather than dropped.
            let Some(fence) = fence else { continue };

            push_text(&mut out, &segment[last..whole.start()]);
            out.push(Piece::Fence(fence));
            last = whole.end();
        }
        push_text(&mut out, &segment[last..]);

        out
    }
}
