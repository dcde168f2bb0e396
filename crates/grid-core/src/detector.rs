//! Grid table block detection inside larger documents
//!
//! Finds the line ranges occupied by grid tables so the parser can be handed
//! clean rectangular blocks. A table starts at a `+---...---+` row separator
//! and extends over consecutive lines starting with `|` or `+`; candidate
//! ranges that fail the edge and width checks are simply not tables, never
//! errors.

use serde::{Deserialize, Serialize};

/// Inclusive line range of one detected grid table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpan {
    /// First line of the table (its top border)
    pub start: usize,
    /// Last line of the table (its bottom border)
    pub end: usize,
}

impl TableSpan {
    /// Number of lines covered by the span
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Check for a `+-...-+` row separator line (trailing whitespace allowed)
fn is_row_separator(line: &str) -> bool {
    let trimmed = line.trim_end();
    let chars: Vec<char> = trimmed.chars().collect();
    chars.len() >= 5
        && chars[0] == '+'
        && chars[1] == '-'
        && chars[chars.len() - 2] == '-'
        && chars[chars.len() - 1] == '+'
        && chars[2..chars.len() - 2].iter().all(|&c| c == '-' || c == '+')
}

/// Check that a line could belong to a table: non-blank and opening with a border character
fn has_left_edge(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('|') || trimmed.starts_with('+')
}

/// Find every grid table in a document's lines
pub fn find_tables(lines: &[&str]) -> Vec<TableSpan> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        match table_at(lines, i) {
            Some(span) => {
                i = span.end + 1;
                spans.push(span);
            }
            None => i += 1,
        }
    }
    spans
}

/// Convenience wrapper over [`find_tables`] for a whole document string
pub fn find_tables_in_text(text: &str) -> Vec<TableSpan> {
    let lines: Vec<&str> = text.lines().collect();
    find_tables(&lines)
}

/// Copy a detected span's lines into an owned block for the parser
pub fn extract_block(lines: &[&str], span: TableSpan) -> Vec<String> {
    lines[span.start..=span.end]
        .iter()
        .map(|l| l.to_string())
        .collect()
}

/// Try to recognize a table whose top border sits at `start`
fn table_at(lines: &[&str], start: usize) -> Option<TableSpan> {
    if !is_row_separator(lines[start]) {
        return None;
    }
    let width = lines[start].trim_end().chars().count();

    let mut current = start;
    while current < lines.len() && has_left_edge(lines[current]) {
        current += 1;
    }
    let mut end = current - 1;
    if end == start {
        // A lone separator line is not a table.
        return None;
    }
    if !is_row_separator(lines[end]) {
        // Bottomless table: back up to the last row separator in the range.
        end = (start + 1..end).rev().find(|&i| is_row_separator(lines[i]))?;
    }

    // Every line must close with a border character and share one width.
    for line in &lines[start..=end] {
        let trimmed = line.trim_end();
        if !trimmed.ends_with(['|', '+']) || trimmed.chars().count() != width {
            return None;
        }
    }
    Some(TableSpan { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_separator_patterns() {
        assert!(is_row_separator("+---+"));
        assert!(is_row_separator("+---+----+  "));
        assert!(is_row_separator("+-+-+-+-+"));
        assert!(!is_row_separator("+===+"));
        assert!(!is_row_separator("+--+")); // too short
        assert!(!is_row_separator("---+---"));
        assert!(!is_row_separator("| a |"));
    }

    #[test]
    fn test_row_separator_allows_tab_terminated_lines() {
        assert!(is_row_separator("+---+---+\t"));
        assert!(is_row_separator("+---+ \t "));
    }

    #[test]
    fn test_detects_table_with_tab_after_border() {
        let doc = "+---+---+\t\n| A | B |\n+---+---+";
        let spans = find_tables_in_text(doc);
        assert_eq!(spans, vec![TableSpan { start: 0, end: 2 }]);
    }

    #[test]
    fn test_finds_table_between_prose() {
        let doc = "\
Some paragraph.

+---+---+
| A | B |
+---+---+

More prose.";
        let spans = find_tables_in_text(doc);
        assert_eq!(spans, vec![TableSpan { start: 2, end: 4 }]);
        assert_eq!(spans[0].line_count(), 3);
    }

    #[test]
    fn test_finds_multiple_tables() {
        let doc = "\
+---+
| a |
+---+
text
+---+---+
| b | c |
+---+---+";
        let spans = find_tables_in_text(doc);
        assert_eq!(
            spans,
            vec![TableSpan { start: 0, end: 2 }, TableSpan { start: 4, end: 6 }]
        );
    }

    #[test]
    fn test_bottomless_table_backtracks_to_last_separator() {
        let doc = "\
+---+
| a |
+---+
| stray continuation";
        let lines: Vec<&str> = doc.lines().collect();
        // The stray line starts with '|' so the candidate range runs past the
        // real bottom; detection must back up to the last separator.
        assert_eq!(find_tables(&lines), vec![TableSpan { start: 0, end: 2 }]);
    }

    #[test]
    fn test_lone_separator_is_not_a_table() {
        let doc = "text\n+---+\nmore text";
        assert!(find_tables_in_text(doc).is_empty());
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let doc = "\
+---+
| a     |
+---+";
        assert!(find_tables_in_text(doc).is_empty());
    }

    #[test]
    fn test_unclosed_right_edge_rejected() {
        let doc = "\
+---+
| a
+---+";
        assert!(find_tables_in_text(doc).is_empty());
    }

    #[test]
    fn test_trailing_whitespace_accepted() {
        let doc = "+---+  \n| a |\n+---+ ";
        assert_eq!(find_tables_in_text(doc), vec![TableSpan { start: 0, end: 2 }]);
    }

    #[test]
    fn test_extract_block_copies_span() {
        let lines = vec!["x", "+---+", "| a |", "+---+", "y"];
        let block = extract_block(&lines, TableSpan { start: 1, end: 3 });
        assert_eq!(block, vec!["+---+", "| a |", "+---+"]);
    }
}
