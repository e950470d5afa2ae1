//! Row tokenizing and separator detection for pipe-delimited lines

use crate::constants::SEPARATOR_CHAR;

/// Split one line into trimmed fields
///
/// The empty field produced by an opening delimiter and the one produced by a
/// closing delimiter are dropped. Empty fields between delimiters are kept, so
/// `| A | | C |` yields `["A", "", "C"]`.
pub fn tokenize_row(line: &str, delimiter: char) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields: Vec<&str> = line.split(delimiter).collect();

    if line.starts_with(delimiter) {
        fields.remove(0);
    }
    // A lone delimiter has already lost its only artifact
    if line.ends_with(delimiter) && !fields.is_empty() {
        fields.pop();
    }

    fields.into_iter().map(|field| field.trim().to_string()).collect()
}

/// Check if a line is a header/body rule such as `|---|---|`
pub fn is_separator_line(line: &str, delimiter: char) -> bool {
    let mut saw_dash = false;
    for c in line.chars() {
        if c == delimiter || c.is_whitespace() {
            continue;
        }
        if c != SEPARATOR_CHAR {
            return false;
        }
        saw_dash = true;
    }
    saw_dash
}

/// Check if a field is a placeholder made only of dashes (`---`)
pub fn is_placeholder(field: &str) -> bool {
    let field = field.trim();
    !field.is_empty() && field.chars().all(|c| c == SEPARATOR_CHAR)
}
