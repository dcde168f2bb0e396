//! Directory scanner for discovering documents containing grid tables

use crate::detector::{find_tables, TableSpan};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Document extensions considered when scanning
const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "rst", "txt"];

/// One document containing at least one grid table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Full path to the document
    pub path: PathBuf,
    /// Line ranges of the detected tables
    pub spans: Vec<TableSpan>,
}

impl FileReport {
    /// Number of grid tables detected in the document
    pub fn table_count(&self) -> usize {
        self.spans.len()
    }
}

/// Result of scanning directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Root directories that were scanned
    pub roots: Vec<PathBuf>,
    /// Documents with grid tables, sorted by path
    pub files: Vec<FileReport>,
    /// Total number of tables found
    pub total_tables: usize,
}

impl ScanReport {
    /// Find a file report by path
    pub fn find_file<P: AsRef<Path>>(&self, path: P) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == path.as_ref())
    }
}

/// Scan one or more directories for documents containing grid tables
pub fn scan_paths<P: AsRef<Path>>(roots: &[P]) -> Result<ScanReport> {
    // BTreeMap keeps the report deterministic regardless of walk order.
    let mut file_map: BTreeMap<PathBuf, Vec<TableSpan>> = BTreeMap::new();

    for root in roots {
        let root = root.as_ref();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_document(path) {
                continue;
            }

            let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            let lines: Vec<&str> = content.lines().collect();
            let spans = find_tables(&lines);
            if !spans.is_empty() {
                file_map.insert(path.to_path_buf(), spans);
            }
        }
    }

    let files: Vec<FileReport> = file_map
        .into_iter()
        .map(|(path, spans)| FileReport { path, spans })
        .collect();
    let total_tables = files.iter().map(|f| f.spans.len()).sum();

    Ok(ScanReport {
        roots: roots.iter().map(|r| r.as_ref().to_path_buf()).collect(),
        files,
        total_tables,
    })
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_document() {
        assert!(is_document(Path::new("notes.md")));
        assert!(is_document(Path::new("guide.RST")));
        assert!(is_document(Path::new("a/b/readme.txt")));
        assert!(!is_document(Path::new("main.rs")));
        assert!(!is_document(Path::new("Makefile")));
    }

    #[test]
    fn test_scan_reports_tables() {
        let dir = std::env::temp_dir().join("grid_core_scan_test");
        let sub = dir.join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(
            dir.join("doc.md"),
            "intro\n+---+\n| a |\n+---+\n",
        )
        .unwrap();
        fs::write(
            sub.join("two.txt"),
            "+---+\n| a |\n+---+\n\n+---+\n| b |\n+---+\n",
        )
        .unwrap();
        fs::write(dir.join("plain.md"), "no tables here\n").unwrap();
        fs::write(dir.join("code.rs"), "+---+\n| a |\n+---+\n").unwrap();

        let report = scan_paths(&[&dir]).unwrap();
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.total_tables, 3);

        let doc = report.find_file(dir.join("doc.md")).unwrap();
        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.spans[0], TableSpan { start: 1, end: 3 });

        let two = report.find_file(sub.join("two.txt")).unwrap();
        assert_eq!(two.table_count(), 2);

        fs::remove_dir_all(&dir).unwrap();
    }
}
