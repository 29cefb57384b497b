//! Pass 2: headings.
//!
//! In: escaped text. Out: each line of the form `#{1,4} content` replaced by
//! `<hN>content</hN>`; every other line untouched. Line count is preserved.

pub fn convert_headings(text: &str) -> String {
    text.split('\n').map(convert_line).collect::<Vec<_>>().join("\n")
}

fn convert_line(line: &str) -> String {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=4).contains(&level) {
        return line.to_string();
    }
    match line[level..].strip_prefix(' ') {
        Some(content) => format!("<h{level}>{content}</h{level}>"),
        None => line.to_string(),
    }
}
