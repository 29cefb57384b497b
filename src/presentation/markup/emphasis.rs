//! Pass 3: bold and italic.
//!
//! In: escaped text with headings converted. Out: `**x**` / `__x__` as
//! `<strong>`, then `*x*` / `_x_` as `<em>`. Spans never cross a newline and
//! pair with the nearest following delimiter.
//!
//! Bold runs first so its delimiters are gone before italics are matched.
//! Adjacent markers (`***x***`, `snake_case_name`) are not disambiguated:
//! they resolve to some emphasis, possibly mis-nested.

pub fn convert_emphasis(text: &str) -> String {
    let text = wrap_spans(text, "**", "strong");
    let text = wrap_spans(&text, "__", "strong");
    let text = wrap_spans(&text, "*", "em");
    wrap_spans(&text, "_", "em")
}

/// Wrap every `delim…delim` span on a single line in `<tag>`.
fn wrap_spans(text: &str, delim: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(delim) {
        let inner = &rest[start + delim.len()..];
        let line = &inner[..inner.find('\n').unwrap_or(inner.len())];

        match line.find(delim) {
            Some(close) => {
                out.push_str(&rest[..start]);
                out.push_str(&format!("<{tag}>{}</{tag}>", &inner[..close]));
                rest = &inner[close + delim.len()..];
            }
            None => {
                // Unpaired here: keep one delimiter byte and retry after it.
                out.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_both_delimiters() {
        assert_eq!(convert_emphasis("**Great** quarter"), "<strong>Great</strong> quarter");
        assert_eq!(convert_emphasis("__Great__ quarter"), "<strong>Great</strong> quarter");
    }

    #[test]
    fn italic_both_delimiters() {
        assert_eq!(convert_emphasis("an *up* year"), "an <em>up</em> year");
        assert_eq!(convert_emphasis("an _up_ year"), "an <em>up</em> year");
    }

    #[test]
    fn non_greedy_pairing() {
        assert_eq!(
            convert_emphasis("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn spans_do_not_cross_lines() {
        assert_eq!(wrap_spans("**open\nclose**", "**", "strong"), "**open\nclose**");
        assert_eq!(convert_emphasis("_open\nclose_"), "_open\nclose_");
    }

    #[test]
    fn italic_inside_bold() {
        assert_eq!(
            convert_emphasis("**very *good* news**"),
            "<strong>very <em>good</em> news</strong>"
        );
    }

    #[test]
    fn unpaired_markers_stay_literal() {
        assert_eq!(convert_emphasis("5 * 3 = 15"), "5 * 3 = 15");
        assert_eq!(convert_emphasis("file_name"), "file_name");
    }

    #[test]
    fn adjacent_markers_resolve_to_some_emphasis() {
        let out = convert_emphasis("***both***");
        assert!(out.contains("<strong>"));
        assert!(out.contains("<em>"));
    }
}
