//! Error types for grid-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in grid-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input block contains no lines
    #[error("grid table block is empty")]
    EmptyBlock,

    /// A line's width does not match the rest of the block
    #[error("malformed table: line {line} is {found} columns wide, expected {expected}")]
    RaggedBlock {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// More than one `+=...=+` head/body separator line
    #[error("multiple head/body row separators (table lines {first} and {second}), only one allowed")]
    MultipleHeadBodySeps { first: usize, second: usize },

    /// The head/body separator coincides with the table border
    #[error("the head/body row separator may not be the first or last line of the table")]
    HeadBodySepOnEdge,

    /// Two traced cells disagree about how far down a column has been covered
    #[error("malformed table: expected column {col} to be done through line {expected}, actual is {actual}")]
    ColumnCoverage {
        col: usize,
        expected: isize,
        actual: isize,
    },

    /// A corner popped from the queue does not sit on a '+' marker
    #[error("internal error: expected '+' at position [{line}, {col}]")]
    UnexpectedCorner { line: usize, col: usize },

    /// Some column was never covered down to the bottom boundary
    #[error("malformed table, parse incomplete")]
    ParseIncomplete,

    /// Two cells resolved to the same logical table position
    #[error("malformed table: cell (row {row}, column {col}) already used")]
    CellAlreadyUsed { row: usize, col: usize },

    /// Cell slots left over after every traced cell was placed
    #[error("malformed table: unused cells remaining")]
    UnusedCells,

    /// No grid table with the requested index in the document
    #[error("no grid table with index {0} found in the document")]
    TableNotFound(usize),

    /// Unknown export format
    #[error("unsupported export format '{0}' (expected 'json' or 'html')")]
    UnsupportedFormat(String),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error means the block is not a well-formed grid table,
    /// as opposed to an IO or internal failure. Document pipelines use this
    /// to fall back to rendering the block as literal text.
    pub fn is_malformed_table(&self) -> bool {
        matches!(
            self,
            Error::EmptyBlock
                | Error::RaggedBlock { .. }
                | Error::MultipleHeadBodySeps { .. }
                | Error::HeadBodySepOnEdge
                | Error::ColumnCoverage { .. }
                | Error::ParseIncomplete
                | Error::CellAlreadyUsed { .. }
                | Error::UnusedCells
        )
    }
}
