//! Pass 4: pipe tables.
//!
//! In: escaped text with headings and emphasis converted. Out: every
//! `| h | h |` line directly followed by a divider with the same column count
//! becomes one single-line `<table>`; the `| … |` lines that follow become
//! body rows until the first non-row line. Dividers inside the body are
//! skipped. Pipe lines without a header stay literal.

pub fn convert_tables(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let header = parse_row(lines[i]);
        let divider = lines.get(i + 1).and_then(|line| parse_row(line));

        match (header, divider) {
            (Some(header), Some(divider))
                if is_divider(&divider) && !is_divider(&header) && divider.len() == header.len() =>
            {
                let mut html = String::from("<table><thead>");
                push_row(&mut html, &header, "th");
                html.push_str("</thead><tbody>");
                i += 2;

                while let Some(row) = lines.get(i).and_then(|line| parse_row(line)) {
                    if !is_divider(&row) {
                        push_row(&mut html, &row, "td");
                    }
                    i += 1;
                }

                html.push_str("</tbody></table>");
                out.push(html);
            }
            _ => {
                out.push(lines[i].to_string());
                i += 1;
            }
        }
    }

    out.join("\n")
}

/// Cells of a `| a | b |` line, trimmed. `None` if the line is not a row.
fn parse_row(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.len() < 2 || !line.starts_with('|') || !line.ends_with('|') {
        return None;
    }
    Some(line[1..line.len() - 1].split('|').map(str::trim).collect())
}

/// Every cell is `---` (longer dash runs and alignment colons accepted).
fn is_divider(cells: &[&str]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let dashes = cell.strip_prefix(':').unwrap_or(cell);
            let dashes = dashes.strip_suffix(':').unwrap_or(dashes);
            dashes.len() >= 3 && dashes.bytes().all(|b| b == b'-')
        })
}

fn push_row(html: &mut String, cells: &[&str], tag: &str) {
    html.push_str("<tr>");
    for cell in cells {
        html.push_str(&format!("<{tag}>{cell}</{tag}>"));
    }
    html.push_str("</tr>");
}
