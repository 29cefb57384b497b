//! Pass 5: paragraphs.
//!
//! In: text whose heading and table lines are already block markup. Out:
//! blank-line separated blocks wrapped in `<p>`, with heading and table lines
//! lifted out as standalone blocks. Empty paragraphs are dropped.

pub fn wrap_paragraphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);

    for block in text.split("\n\n") {
        let mut pending: Vec<&str> = Vec::new();
        for line in block.split('\n') {
            if is_block_line(line) {
                flush(&mut out, &mut pending);
                out.push_str(line);
            } else {
                pending.push(line);
            }
        }
        flush(&mut out, &mut pending);
    }

    out
}

/// Heading or table markup produced by the earlier passes. Raw text cannot
/// start with `<` after escaping, so this cannot be forged.
fn is_block_line(line: &str) -> bool {
    ["<h1>", "<h2>", "<h3>", "<h4>", "<table>"]
        .iter()
        .any(|tag| line.starts_with(tag))
}

fn flush(out: &mut String, pending: &mut Vec<&str>) {
    let joined = pending.join("\n");
    let content = joined.trim();
    if !content.is_empty() {
        out.push_str("<p>");
        out.push_str(content);
        out.push_str("</p>");
    }
    pending.clear();
}
