//! Grid table parser
//!
//! Parses a plaintext-graphic table (list of lines, one rectangular block)
//! into a [`TableStructure`]. Intersections use `+`, row separators `-`,
//! column separators `|`, and the single optional head/body separator `=`:
//!
//! ```text
//! +------------+----------+
//! | Header 1   | Header 2 |
//! +============+==========+
//! | cell       | cell     |
//! +------------+----------+
//! ```
//!
//! The algorithm traces rectangular cells corner by corner: starting from a
//! queue holding the table's upper-left corner, it walks each candidate
//! rectangle clockwise (right, down, left, up), and on success enqueues the
//! traced cell's upper-right and lower-left corners as candidates for further
//! cells. Processing corners in top-to-bottom, left-to-right order while
//! tracking how far down each text column has been seen makes the coverage
//! checks sound; an arbitrary order would not.

use crate::error::{Error, Result};
use crate::geometry::{cell_block, extend_boundary_map, find_head_body_sep, split_line, BoundaryMap};
use crate::table::{Cell, Row, TableStructure};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, BTreeMap};

/// Parse a grid table block into a table structure.
///
/// `block` holds the table's lines with no surrounding text; trailing
/// whitespace is tolerated, but after right-trimming every line must have the
/// same code-point width. Any markup problem aborts the whole parse with an
/// error; there is no partial result.
pub fn parse(block: &[String]) -> Result<TableStructure> {
    let mut parser = GridTableParser::new(block)?;
    parser.trace_cells()?;
    parser.into_structure()
}

/// Parse a grid table from a newline-separated string (useful for testing)
pub fn parse_str(text: &str) -> Result<TableStructure> {
    let block: Vec<String> = text.lines().map(str::to_string).collect();
    parse(&block)
}

/// A traced cell rectangle in grid coordinates, all bounds inclusive
struct RawCell {
    top: usize,
    left: usize,
    bottom: usize,
    right: usize,
    lines: Vec<String>,
}

/// Result of successfully tracing one cell from its upper-left corner
struct TracedCell {
    bottom: usize,
    right: usize,
    row_seps: BoundaryMap,
    col_seps: BoundaryMap,
}

/// One parse session. All mutable scanning state lives here, so independent
/// inputs can be parsed concurrently with no shared state.
struct GridTableParser {
    grid: Vec<Vec<char>>,
    bottom: usize,
    right: usize,
    head_body_sep: Option<usize>,
    /// Per-column cursor: the last grid line fully accounted for in that column
    done: Vec<isize>,
    cells: Vec<RawCell>,
    row_seps: BoundaryMap,
    col_seps: BoundaryMap,
}

impl GridTableParser {
    fn new(block: &[String]) -> Result<Self> {
        if block.is_empty() {
            return Err(Error::EmptyBlock);
        }

        let mut lines: Vec<String> = block.iter().map(|l| l.trim_end().to_string()).collect();
        let head_body_sep = find_head_body_sep(&mut lines)?;

        let grid: Vec<Vec<char>> = lines.iter().map(|l| split_line(l)).collect();
        let width = grid[0].len();
        for (i, row) in grid.iter().enumerate() {
            if row.len() != width {
                return Err(Error::RaggedBlock {
                    line: i + 1,
                    expected: width,
                    found: row.len(),
                });
            }
        }
        if width == 0 {
            return Err(Error::EmptyBlock);
        }

        let bottom = grid.len() - 1;
        let right = width - 1;
        // A grid this small cannot even hold one cell.
        if bottom == 0 || right == 0 {
            return Err(Error::ParseIncomplete);
        }

        Ok(Self {
            grid,
            bottom,
            right,
            head_body_sep,
            done: vec![-1; width],
            cells: Vec::new(),
            row_seps: BoundaryMap::from([(0, vec![0])]),
            col_seps: BoundaryMap::from([(0, vec![0])]),
        })
    }

    /// Discover every cell in the grid.
    ///
    /// Candidate upper-left corners are kept in a min-heap ordered by
    /// `(line, column)`; each traced cell contributes its upper-right and
    /// lower-left corners as new candidates.
    fn trace_cells(&mut self) -> Result<()> {
        let mut corners = BinaryHeap::new();
        corners.push(Reverse((0usize, 0usize)));

        while let Some(Reverse((top, left))) = corners.pop() {
            if top == self.bottom || left == self.right || top as isize <= self.done[left] {
                continue;
            }
            let Some(traced) = self.scan_cell(top, left)? else {
                // Spurious corner, such as the stem of a T-junction.
                continue;
            };
            extend_boundary_map(&mut self.row_seps, traced.row_seps);
            extend_boundary_map(&mut self.col_seps, traced.col_seps);
            self.mark_done(top, left, traced.bottom, traced.right)?;
            let lines = cell_block(&self.grid, top + 1, left + 1, traced.bottom, traced.right, true);
            self.cells.push(RawCell {
                top,
                left,
                bottom: traced.bottom,
                right: traced.right,
                lines,
            });
            corners.push(Reverse((top, traced.right)));
            corners.push(Reverse((traced.bottom, left)));
        }

        if !self.parse_complete() {
            return Err(Error::ParseIncomplete);
        }
        Ok(())
    }

    /// Record how much of each text column the cell accounts for
    fn mark_done(&mut self, top: usize, left: usize, bottom: usize, right: usize) -> Result<()> {
        let before = top as isize - 1;
        let after = bottom as isize - 1;
        for col in left..right {
            if self.done[col] != before {
                return Err(Error::ColumnCoverage {
                    col,
                    expected: before,
                    actual: self.done[col],
                });
            }
            self.done[col] = after;
        }
        Ok(())
    }

    /// Each text column must have been seen all the way to the bottom border
    fn parse_complete(&self) -> bool {
        let last = self.bottom as isize - 1;
        self.done[..self.right].iter().all(|&d| d == last)
    }

    /// Trace one cell whose upper-left corner is at `(top, left)`.
    ///
    /// The corner must sit on a `+` marker; corners from the queue always do,
    /// so anything else is an internal invariant violation.
    fn scan_cell(&self, top: usize, left: usize) -> Result<Option<TracedCell>> {
        if self.grid[top][left] != '+' {
            return Err(Error::UnexpectedCorner { line: top, col: left });
        }
        Ok(self.scan_right(top, left))
    }

    /// Look for the cell's top-right corner, noting all column boundaries.
    ///
    /// Every `+` along the top edge is a potential turn; if scanning down
    /// from one fails, the walk keeps going right and retries at the next.
    fn scan_right(&self, top: usize, left: usize) -> Option<TracedCell> {
        let mut col_seps = BoundaryMap::new();
        let line = &self.grid[top];
        for i in left + 1..=self.right {
            match line[i] {
                '+' => {
                    col_seps.insert(i, vec![top]);
                    if let Some((bottom, row_seps, down_col_seps)) = self.scan_down(top, left, i) {
                        extend_boundary_map(&mut col_seps, down_col_seps);
                        return Some(TracedCell {
                            bottom,
                            right: i,
                            row_seps,
                            col_seps,
                        });
                    }
                }
                '-' => {}
                _ => return None,
            }
        }
        None
    }

    /// Look for the cell's bottom-right corner, noting all row boundaries
    fn scan_down(
        &self,
        top: usize,
        left: usize,
        right: usize,
    ) -> Option<(usize, BoundaryMap, BoundaryMap)> {
        let mut row_seps = BoundaryMap::new();
        for i in top + 1..=self.bottom {
            match self.grid[i][right] {
                '+' => {
                    row_seps.insert(i, vec![right]);
                    if let Some((up_row_seps, col_seps)) = self.scan_left(top, left, i, right) {
                        extend_boundary_map(&mut row_seps, up_row_seps);
                        return Some((i, row_seps, col_seps));
                    }
                }
                '|' => {}
                _ => return None,
            }
        }
        None
    }

    /// Walk the bottom edge back to the starting column, which must hold a
    /// corner marker lining up with the starting point
    fn scan_left(
        &self,
        top: usize,
        left: usize,
        bottom: usize,
        right: usize,
    ) -> Option<(BoundaryMap, BoundaryMap)> {
        let mut col_seps = BoundaryMap::new();
        let line = &self.grid[bottom];
        for i in (left + 1..right).rev() {
            match line[i] {
                '+' => {
                    col_seps.insert(i, vec![bottom]);
                }
                '-' => {}
                _ => return None,
            }
        }
        if line[left] != '+' {
            return None;
        }
        let row_seps = self.scan_up(top, left, bottom)?;
        Some((row_seps, col_seps))
    }

    /// Walk the left edge back up to the starting corner, closing the cycle
    fn scan_up(&self, top: usize, left: usize, bottom: usize) -> Option<BoundaryMap> {
        let mut row_seps = BoundaryMap::new();
        for i in (top + 1..bottom).rev() {
            match self.grid[i][left] {
                '+' => {
                    row_seps.insert(i, vec![left]);
                }
                '|' => {}
                _ => return None,
            }
        }
        Some(row_seps)
    }

    /// Convert the collected cell rectangles into the final table structure
    fn into_structure(self) -> Result<TableStructure> {
        let row_bounds: Vec<usize> = self.row_seps.keys().copied().collect();
        let row_index: BTreeMap<usize, usize> =
            row_bounds.iter().enumerate().map(|(i, &b)| (b, i)).collect();
        let col_bounds: Vec<usize> = self.col_seps.keys().copied().collect();
        let col_index: BTreeMap<usize, usize> =
            col_bounds.iter().enumerate().map(|(i, &b)| (b, i)).collect();

        // One border character sits between consecutive column boundaries.
        let column_widths: Vec<usize> = col_bounds.windows(2).map(|w| w[1] - w[0] - 1).collect();

        let num_rows = row_bounds.len() - 1;
        let num_cols = col_bounds.len() - 1;
        let mut rows: Vec<Row> = vec![vec![None; num_cols]; num_rows];

        // Cell slots not yet claimed by any cell's span; must reach zero.
        let mut remaining = (num_rows * num_cols) as isize;
        for cell in self.cells {
            let row_num = row_index[&cell.top];
            let col_num = col_index[&cell.left];
            if rows[row_num][col_num].is_some() {
                return Err(Error::CellAlreadyUsed {
                    row: row_num + 1,
                    col: col_num + 1,
                });
            }
            let more_rows = row_index[&cell.bottom] - row_num - 1;
            let more_cols = col_index[&cell.right] - col_num - 1;
            remaining -= ((more_rows + 1) * (more_cols + 1)) as isize;
            rows[row_num][col_num] = Some(Cell {
                more_rows,
                more_cols,
                content_offset: cell.top + 1,
                lines: cell.lines,
            });
        }
        if remaining != 0 {
            return Err(Error::UnusedCells);
        }

        let (head_rows, body_rows) = match self.head_body_sep {
            Some(sep) => {
                let num_head = *row_index.get(&sep).ok_or(Error::ParseIncomplete)?;
                let mut head = rows;
                let body = head.split_off(num_head);
                (head, body)
            }
            None => (Vec::new(), rows),
        };

        Ok(TableStructure {
            column_widths,
            head_rows,
            body_rows,
        })
    }
}
