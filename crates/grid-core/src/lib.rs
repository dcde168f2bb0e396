//! grid-core: Core library for working with plain-text grid tables
//!
//! Grid tables use `+` for corners, `-` and `|` for borders, and `=` for the
//! optional head/body separator. This library provides functionality to:
//! - Detect grid table blocks inside larger documents
//! - Parse a block into a structured table model, including arbitrary
//!   row and column spans
//! - Scan directory trees for documents containing grid tables
//! - Render a parsed table to HTML with an injected cell-content renderer

pub mod detector;
pub mod error;
pub mod geometry;
pub mod html;
pub mod parser;
pub mod scanner;
pub mod table;

pub use detector::{extract_block, find_tables, find_tables_in_text, TableSpan};
pub use error::{Error, Result};
pub use html::{render_html, ContentRenderer, PlainText};
pub use parser::{parse, parse_str};
pub use scanner::{scan_paths, FileReport, ScanReport};
pub use table::{Cell, Row, TableStructure};
