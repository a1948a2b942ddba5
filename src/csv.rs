//! Minimal CSV document writer for bulk-import submissions.
//!
//! The import endpoint takes a CSV body with a header row; this is the only
//! CSV the crate ever produces, so the writer stays deliberately small:
//! comma-separated, `\n` line endings, RFC 4180 quoting.

/// Render a CSV document from a header row and data rows.
pub(crate) fn document(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    push_row(&mut out, headers);
    for row in rows {
        push_row(&mut out, row);
    }
    out
}

fn push_row(out: &mut String, cells: &[String]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_cell(out, cell);
    }
    out.push('\n');
}

/// Quote a cell only when it contains a comma, quote, or newline.
fn push_cell(out: &mut String, cell: &str) {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        out.push('"');
        for ch in cell.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
    } else {
        out.push_str(cell);
    }
}
