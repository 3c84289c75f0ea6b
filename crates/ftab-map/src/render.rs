//! Whole-row rendering for header row scoring.
//!
//! A row renders as a bracketed list of quoted cells, e.g.
//! `["first_name", "last_name", null]`. Every cell is delimited by its own
//! quotes, so a quoted term can only match a whole cell.

use ftab_model::CellValue;

/// Renders a row to its comparison string.
///
/// Non-empty cells are quoted with [`quote_cell`]; empty cells render as
/// `null`. The result depends only on the cell values and their order.
pub fn render_row(cells: &[CellValue]) -> String {
    let mut out = String::from("[");
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        if cell.is_empty() {
            out.push_str("null");
        } else {
            out.push_str(&quote_cell(&cell.as_text()));
        }
    }
    out.push(']');
    out
}

/// Double-quotes `text`, escaping `\` and `"`.
pub fn quote_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        if matches!(ch, '\\' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
