//! Low-level grid helpers shared by the cell tracer
//!
//! The parser works on a rectangular grid of Unicode code points. The helpers
//! here decode lines into grid rows, locate the optional `+=...=+` head/body
//! separator, slice cell content out of the grid and keep the boundary
//! bookkeeping maps up to date.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Boundary coordinate -> perpendicular coordinates observed at it.
///
/// Only the keys matter for the final structure; the values are kept as
/// existence witnesses of where each boundary was seen.
pub type BoundaryMap = BTreeMap<usize, Vec<usize>>;

/// Decode a text line into Unicode code points, one grid column each
pub fn split_line(line: &str) -> Vec<char> {
    line.chars().collect()
}

/// Check for a full-width `+=...=+` head/body separator (trailing whitespace allowed)
fn is_head_body_sep(line: &str) -> bool {
    let trimmed = line.trim_end();
    let chars: Vec<char> = trimmed.chars().collect();
    chars.len() >= 5
        && chars[0] == '+'
        && chars[1] == '='
        && chars[chars.len() - 2] == '='
        && chars[chars.len() - 1] == '+'
        && chars[2..chars.len() - 2].iter().all(|&c| c == '=' || c == '+')
}

/// Look for the head/body row separator line and return its index.
///
/// At most one such line is allowed, and it cannot be the first or last line
/// of the block (a separator cannot be the table's own border). On success
/// the line is rewritten in place with `=` replaced by `-`, so the tracer
/// sees it as an ordinary row separator.
pub fn find_head_body_sep(block: &mut [String]) -> Result<Option<usize>> {
    let mut head_body_sep = None;
    for i in 0..block.len() {
        if is_head_body_sep(&block[i]) {
            if let Some(first) = head_body_sep {
                return Err(Error::MultipleHeadBodySeps {
                    first: first + 1,
                    second: i + 1,
                });
            }
            head_body_sep = Some(i);
            block[i] = block[i].replace('=', "-");
        }
    }
    if head_body_sep == Some(0) || head_body_sep == Some(block.len().saturating_sub(1)) {
        return Err(Error::HeadBodySepOnEdge);
    }
    Ok(head_body_sep)
}

/// Extract the text inside a cell rectangle.
///
/// Slices columns `[left, right)` of rows `[top, bottom)`, right-trims each
/// line, and when `strip_indent` is set removes the common leading-whitespace
/// width shared by all non-empty lines (only when it is strictly between 0
/// and the slice width).
pub fn cell_block(
    grid: &[Vec<char>],
    top: usize,
    left: usize,
    bottom: usize,
    right: usize,
    strip_indent: bool,
) -> Vec<String> {
    let width = right - left;
    let mut indent = width;
    let mut data = Vec::with_capacity(bottom - top);
    for row in &grid[top..bottom] {
        let line: String = row[left..right].iter().collect();
        let line = line.trim_end().to_string();
        if !line.is_empty() {
            let leading = line.chars().take_while(|c| c.is_whitespace()).count();
            indent = indent.min(leading);
        }
        data.push(line);
    }
    if strip_indent && 0 < indent && indent < width {
        for line in &mut data {
            *line = line.chars().skip(indent).collect();
        }
    }
    data
}

/// Union each of `additions`' coordinate lists into `master`
pub fn extend_boundary_map(master: &mut BoundaryMap, additions: BoundaryMap) {
    for (key, mut values) in additions {
        master.entry(key).or_default().append(&mut values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_multibyte() {
        let chars = split_line("|é漢|");
        assert_eq!(chars.len(), 4);
        assert_eq!(chars[1], 'é');
        assert_eq!(chars[2], '漢');
    }

    #[test]
    fn test_split_line_keeps_spaces() {
        assert_eq!(split_line("| a |").len(), 5);
    }

    #[test]
    fn test_head_body_sep_found_and_rewritten() {
        let mut block = vec![
            "+---+".to_string(),
            "| a |".to_string(),
            "+===+".to_string(),
            "| b |".to_string(),
            "+---+".to_string(),
        ];
        let sep = find_head_body_sep(&mut block).unwrap();
        assert_eq!(sep, Some(2));
        assert_eq!(block[2], "+---+");
    }

    #[test]
    fn test_head_body_sep_none() {
        let mut block = vec!["+---+".to_string(), "| a |".to_string(), "+---+".to_string()];
        assert_eq!(find_head_body_sep(&mut block).unwrap(), None);
    }

    #[test]
    fn test_head_body_sep_trailing_spaces() {
        let mut block = vec![
            "+---+".to_string(),
            "| a |".to_string(),
            "+===+  ".to_string(),
            "| b |".to_string(),
            "+---+".to_string(),
        ];
        assert_eq!(find_head_body_sep(&mut block).unwrap(), Some(2));
    }

    #[test]
    fn test_head_body_sep_trailing_tab() {
        let mut block = vec![
            "+---+".to_string(),
            "| a |".to_string(),
            "+===+\t".to_string(),
            "| b |".to_string(),
            "+---+".to_string(),
        ];
        assert_eq!(find_head_body_sep(&mut block).unwrap(), Some(2));
    }

    #[test]
    fn test_head_body_sep_multiple() {
        let mut block = vec![
            "+---+".to_string(),
            "| a |".to_string(),
            "+===+".to_string(),
            "| b |".to_string(),
            "+===+".to_string(),
            "| c |".to_string(),
            "+---+".to_string(),
        ];
        match find_head_body_sep(&mut block) {
            Err(Error::MultipleHeadBodySeps { first, second }) => {
                assert_eq!((first, second), (3, 5));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_head_body_sep_on_first_line() {
        let mut block = vec!["+===+".to_string(), "| a |".to_string(), "+---+".to_string()];
        assert!(matches!(
            find_head_body_sep(&mut block),
            Err(Error::HeadBodySepOnEdge)
        ));
    }

    #[test]
    fn test_head_body_sep_with_column_boundaries() {
        let mut block = vec![
            "+--+--+".to_string(),
            "|a |b |".to_string(),
            "+==+==+".to_string(),
            "|c |d |".to_string(),
            "+--+--+".to_string(),
        ];
        assert_eq!(find_head_body_sep(&mut block).unwrap(), Some(2));
        assert_eq!(block[2], "+--+--+");
    }

    fn grid(lines: &[&str]) -> Vec<Vec<char>> {
        lines.iter().map(|l| split_line(l)).collect()
    }

    #[test]
    fn test_cell_block_slices_and_trims() {
        let g = grid(&["+-----+", "| ab  |", "|  cd |", "+-----+"]);
        let block = cell_block(&g, 1, 1, 3, 6, true);
        assert_eq!(block, vec!["ab".to_string(), " cd".to_string()]);
    }

    #[test]
    fn test_cell_block_no_strip_keeps_indent() {
        let g = grid(&["+-----+", "| ab  |", "|  cd |", "+-----+"]);
        let block = cell_block(&g, 1, 1, 3, 6, false);
        assert_eq!(block, vec![" ab".to_string(), "  cd".to_string()]);
    }

    #[test]
    fn test_cell_block_empty_lines_do_not_affect_indent() {
        let g = grid(&["+-----+", "|     |", "|  x  |", "+-----+"]);
        let block = cell_block(&g, 1, 1, 3, 6, true);
        assert_eq!(block, vec!["".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_extend_boundary_map() {
        let mut master: BoundaryMap = BoundaryMap::from([(0, vec![0])]);
        let additions = BoundaryMap::from([(0, vec![4]), (2, vec![4])]);
        extend_boundary_map(&mut master, additions);
        assert_eq!(master[&0], vec![0, 4]);
        assert_eq!(master[&2], vec![4]);
        assert_eq!(master.len(), 2);
    }
}
