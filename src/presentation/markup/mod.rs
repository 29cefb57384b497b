//! Lightweight markup → HTML conversion for report narratives.
//!
//! Passes run in a fixed order and each one only sees the output of the
//! previous one:
//!
//! 1. [`escape_html`] neutralises every markup-significant character.
//! 2. [`convert_headings`] turns `#`..`####` lines into `<h1>`..`<h4>`.
//! 3. [`convert_emphasis`] handles `**`/`__` and `*`/`_` spans on one line.
//! 4. [`convert_tables`] turns pipe tables into `<table>` markup.
//! 5. [`wrap_paragraphs`] wraps the remaining blocks in `<p>`.
//!
//! Escaping first means nothing from the raw text can survive as a tag.

pub mod emphasis;
pub mod escape;
pub mod headings;
pub mod paragraphs;
pub mod tables;

pub use emphasis::convert_emphasis;
pub use escape::escape_html;
pub use headings::convert_headings;
pub use paragraphs::wrap_paragraphs;
pub use tables::convert_tables;

/// Convert a raw narrative into safe HTML. Total: any input yields a string.
pub fn convert(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");
    let text = escape_html(&text);
    let text = convert_headings(&text);
    let text = convert_emphasis(&text);
    let text = convert_tables(&text);
    wrap_paragraphs(&text)
}
