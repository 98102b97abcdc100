//! Row tokenizer for pipe-delimited markdown tables.
//!
//! Splitting rules:
//! - cells are separated by `|`
//! - the text before the first `|` and after the last `|` are row boundary
//!   artifacts, never cells (a row without its closing `|` loses its last segment)
//! - a `|` inside a backtick code span, or escaped as `\|`, is cell content
//! - every cell is trimmed

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Separator cell: dashes with optional alignment colons (`---`, `:--`, `:-:`)
    static ref SEPARATOR_CELL: Regex = Regex::new(r"^:?-+:?$").unwrap();
}

pub const DELIMITER: char = '|';

/// True when the line belongs to a table (first non-blank char is the delimiter).
pub fn is_table_row(line: &str) -> bool {
    line.trim_start().starts_with(DELIMITER)
}

/// Split a table row into trimmed cells.
pub fn split_row(line: &str) -> Vec<String> {
    match scan(line, true) {
        Some(segments) => cells_from(segments),
        // unbalanced backticks: they are literal text, not a code span
        None => cells_from(scan(line, false).unwrap_or_default()),
    }
}

/// True for the `| --- | :-: |` rule row under a header.
pub fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| SEPARATOR_CELL.is_match(c))
}

/// Returns raw segments between delimiters, or `None` when a code span is left open.
fn scan(line: &str, honor_code_spans: bool) -> Option<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_code = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&DELIMITER) => {
                current.push(DELIMITER);
                chars.next();
            }
            '`' if honor_code_spans => {
                in_code = !in_code;
                current.push(c);
            }
            DELIMITER if !in_code => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if in_code {
        return None;
    }
    segments.push(current);
    Some(segments)
}

fn cells_from(segments: Vec<String>) -> Vec<String> {
    if segments.len() < 2 {
        return Vec::new();
    }
    let last = segments.len() - 1;
    segments[1..last]
        .iter()
        .map(|s| s.trim().to_string())
        .collect()
}
