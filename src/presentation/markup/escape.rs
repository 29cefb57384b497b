//! Pass 1: escaping.
//!
//! In: raw text. Out: text with no raw `<`, `>`, `"`, `'`, and no `&` that
//! does not start an entity reference. Existing entity references are kept,
//! so running the pass twice equals running it once.

const MAX_ENTITY_LEN: usize = 32;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    for (i, c) in raw.char_indices() {
        match c {
            '&' if starts_entity(&raw[i + 1..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `rest` (the text after an `&`) is `name;`, `#123;` or `#x1F;`.
fn starts_entity(rest: &str) -> bool {
    let window = match rest.char_indices().nth(MAX_ENTITY_LEN + 1) {
        Some((cut, _)) => &rest[..cut],
        None => rest,
    };
    let Some(end) = window.find(';') else {
        return false;
    };
    if end == 0 || end > MAX_ENTITY_LEN {
        return false;
    }
    let body = &rest[..end];

    if let Some(numeric) = body.strip_prefix('#') {
        if let Some(hex) = numeric.strip_prefix(['x', 'X']) {
            return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
        }
        return !numeric.is_empty() && numeric.chars().all(|c| c.is_ascii_digit());
    }

    let mut chars = body.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_the_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom's & Jerry</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom&#039;s &amp; Jerry&lt;/a&gt;"
        );
    }

    #[test]
    fn existing_entities_survive() {
        assert_eq!(escape_html("&amp; &lt; &#039; &#x27;"), "&amp; &lt; &#039; &#x27;");
    }

    #[test]
    fn bare_ampersands_are_escaped() {
        assert_eq!(escape_html("R&D"), "R&amp;D");
        assert_eq!(escape_html("a & b;"), "a &amp; b;");
        assert_eq!(escape_html("&#;"), "&amp;#;");
        assert_eq!(escape_html("&"), "&amp;");
    }

    #[test]
    fn entity_lookahead_is_bounded() {
        let far = format!("&{};", "a".repeat(MAX_ENTITY_LEN + 1));
        assert_eq!(escape_html(&far), format!("&amp;{};", "a".repeat(MAX_ENTITY_LEN + 1)));
        let near = format!("&{};", "a".repeat(MAX_ENTITY_LEN));
        assert_eq!(escape_html(&near), near);

        let many = "& ".repeat(20_000) + ";";
        assert_eq!(escape_html(&many).matches("&amp;").count(), 20_000);
    }

    #[test]
    fn twice_equals_once() {
        let once = escape_html(r#"P/E < 30 & "cheap" isn't > 5"#);
        assert_eq!(escape_html(&once), once);
    }
}
