//! Fixed-width table rendering for terminal output.
//!
//! Column widths are measured in display width, so CJK repository
//! descriptions stay aligned.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A table column: header text and display width. The last column is
/// never padded.
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

/// Render a header line followed by one line per row.
/// Cells beyond the number of columns are ignored.
pub fn render(columns: &[Column], rows: &[Vec<String>]) -> String {
    let mut output = String::new();
    let header: Vec<String> = columns.iter().map(|c| c.title.to_string()).collect();
    push_line(&mut output, columns, &header);
    for row in rows {
        push_line(&mut output, columns, row);
    }
    output
}

fn push_line(output: &mut String, columns: &[Column], cells: &[String]) {
    let last = columns.len().saturating_sub(1);
    let line: Vec<String> = columns
        .iter()
        .zip(cells)
        .enumerate()
        .map(|(i, (column, cell))| {
            if i == last {
                truncate_with_ellipsis(cell, column.width)
            } else {
                pad_or_truncate(cell, column.width)
            }
        })
        .collect();
    output.push_str(line.join("  ").trim_end());
    output.push('\n');
}

/// Truncates a string to fit within the specified display width.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn truncate_with_ellipsis(s: &str, width: usize) -> String {
    if s.width() <= width {
        s.to_string()
    } else {
        pad_or_truncate(s, width).trim_end().to_string()
    }
}

/// Pads or truncates a string to exactly the specified display width,
/// ending truncated text with "..." when there is room for it.
pub fn pad_or_truncate(s: &str, width: usize) -> String {
    let display_width = s.width();

    if display_width <= width {
        // Pad with spaces to reach target width
        let padding = width - display_width;
        format!("{}{}", s, " ".repeat(padding))
    } else if width < 3 {
        // Too short for ellipsis, just truncate
        truncate_to_width(s, width)
    } else {
        // Truncate and add ellipsis
        let truncated = truncate_to_width(s, width - 3);
        let truncated_width = truncated.width();
        // Use saturating_sub to avoid underflow when CJK chars cause width mismatch
        let padding = width.saturating_sub(truncated_width).saturating_sub(3);
        format!("{}...{}", truncated, " ".repeat(padding))
    }
}
