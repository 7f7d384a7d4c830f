use byteblog_engine::parsing::{parse_content, snapshot};

fn parse_fixture(name: &str) -> Vec<byteblog_engine::ContentBlock> {
    let text = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let blocks = parse_content(&text);
    snapshot::invariants(&blocks);
    blocks
}

#[test]
fn fixture_getting_started() {
    let blocks = parse_fixture("getting_started");
    insta::assert_snapshot!(snapshot::outline(&blocks), @r#"
    Heading(1) "Getting Started with Rust 🚀"
    Paragraph "Rust gives you **memory safety** without a *garbage collector*. Install it with `rustup`."
    Heading(2) "Prerequisites"
    List ["A terminal", "An editor you like", "Some patience"]
    Paragraph "Create a project:"
    CodeBlock(bash) "cargo new hello"
    CodeBlock(rust) "fn main() {\n    println!(\"Hello, world!\");\n\n    // blank line above stays inside the fence\n}"
    Heading(3) "Next steps"
    Paragraph "Read ***the book*** and keep `**stars**` literal."
    "#);
}

#[test]
fn fixture_unclosed_fence() {
    let blocks = parse_fixture("unclosed_fence");
    insta::assert_snapshot!(snapshot::outline(&blocks), @r#"
    Paragraph "Intro paragraph."
    Paragraph "```python\nprint(\"never closed\")"
    Heading(1) "Still parsed as a heading"
    "#);
}

#[test]
fn parse_is_reentrant_across_threads() {
    let text = "# Shared\n\n* a\n* b\n\n```\ncode\n```";
    let expected = parse_content(text);

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || parse_content(text)))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
