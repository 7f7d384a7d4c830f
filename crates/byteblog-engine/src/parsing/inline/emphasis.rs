use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::parsing::sentinel::{EM_CLOSE, EM_OPEN, STRONG_CLOSE, STRONG_OPEN};

struct Pass {
    pattern: Regex,
    open: String,
    close: String,
}

/// Bold+italic, then bold, then italic. Later passes run over the output of
/// earlier ones, so `***x***` is consumed before `**` or `*` can claim it.
fn passes() -> &'static [Pass] {
    static PASSES: OnceLock<Vec<Pass>> = OnceLock::new();
    PASSES.get_or_init(|| {
        fn pass(pattern: &str, open: &[char], close: &[char]) -> Pass {
            Pass {
                pattern: Regex::new(pattern).expect("Invalid emphasis regex"),
                open: open.iter().collect(),
                close: close.iter().collect(),
            }
        }
        vec![
            pass(
                r"\*\*\*([^*]+)\*\*\*",
                &[STRONG_OPEN, EM_OPEN],
                &[EM_CLOSE, STRONG_CLOSE],
            ),
            pass(r"\*\*([^*]+)\*\*", &[STRONG_OPEN], &[STRONG_CLOSE]),
            pass(r"\*([^*]+)\*", &[EM_OPEN], &[EM_CLOSE]),
        ]
    })
}

/// Replaces asterisk emphasis with sentinel markers. Unmatched asterisks are
/// left as they are.
pub fn mark(text: &str) -> String {
    let mut out = text.to_string();
    for pass in passes() {
        if !out.contains('*') {
            break;
        }
        out = pass
            .pattern
            .replace_all(&out, |caps: &Captures<'_>| {
                format!("{}{}{}", pass.open, &caps[1], pass.close)
            })
            .into_owned();
    }
    out
}
