//! Core types for representing a parsed grid table

use serde::{Deserialize, Serialize};

/// One logical table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Extra table rows spanned vertically (rowspan - 1)
    pub more_rows: usize,
    /// Extra table columns spanned horizontally (colspan - 1)
    pub more_cols: usize,
    /// Table-relative line index of the first content line
    pub content_offset: usize,
    /// Dedented cell content, one entry per line
    pub lines: Vec<String>,
}

impl Cell {
    /// Create a cell with no spans
    pub fn new(content_offset: usize, lines: Vec<String>) -> Self {
        Self {
            more_rows: 0,
            more_cols: 0,
            content_offset,
            lines,
        }
    }

    /// Number of table rows this cell occupies
    pub fn rowspan(&self) -> usize {
        self.more_rows + 1
    }

    /// Number of table columns this cell occupies
    pub fn colspan(&self) -> usize {
        self.more_cols + 1
    }
}

/// A table row. `None` entries mark positions consumed by another cell's span.
pub type Row = Vec<Option<Cell>>;

/// A parsed grid table
///
/// Every row (head or body) has exactly `column_widths.len()` entries.
/// Constructed once per parse and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStructure {
    /// Interior character width of each column
    pub column_widths: Vec<usize>,
    /// Rows above the `+=...=+` separator, empty when there is none
    pub head_rows: Vec<Row>,
    /// All remaining rows
    pub body_rows: Vec<Row>,
}

impl TableStructure {
    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Get the total number of rows (head and body)
    pub fn row_count(&self) -> usize {
        self.head_rows.len() + self.body_rows.len()
    }

    /// Get a row by index, counting head rows first
    pub fn row(&self, index: usize) -> Option<&Row> {
        if index < self.head_rows.len() {
            self.head_rows.get(index)
        } else {
            self.body_rows.get(index - self.head_rows.len())
        }
    }

    /// Get a cell by table row/column index, counting head rows first.
    /// Returns `None` for spanned or out-of-range positions.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.row(row).and_then(|r| r.get(col)).and_then(|c| c.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableStructure {
        TableStructure {
            column_widths: vec![3, 5],
            head_rows: vec![vec![
                Some(Cell::new(1, vec!["A".to_string()])),
                Some(Cell::new(1, vec!["B".to_string()])),
            ]],
            body_rows: vec![vec![
                Some(Cell {
                    more_rows: 0,
                    more_cols: 1,
                    content_offset: 3,
                    lines: vec!["wide".to_string()],
                }),
                None,
            ]],
        }
    }

    #[test]
    fn test_counts() {
        let table = sample();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_row_indexing_spans_head_and_body() {
        let table = sample();
        assert_eq!(table.row(0), Some(&table.head_rows[0]));
        assert_eq!(table.row(1), Some(&table.body_rows[0]));
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_cell_lookup_skips_spanned_positions() {
        let table = sample();
        assert_eq!(table.cell(0, 1).unwrap().lines, vec!["B"]);
        assert!(table.cell(1, 1).is_none());
        assert!(table.cell(5, 0).is_none());
    }

    #[test]
    fn test_cell_span_accessors() {
        let table = sample();
        let wide = table.cell(1, 0).unwrap();
        assert_eq!(wide.rowspan(), 1);
        assert_eq!(wide.colspan(), 2);
    }
}
