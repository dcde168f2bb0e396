//! Grid Table CLI
//!
//! Command-line tool for finding, parsing and exporting plain-text grid tables.

use clap::{Parser, Subcommand};
use grid_core::{extract_block, find_tables, parse, render_html, PlainText, TableStructure};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grid-cli")]
#[command(about = "Plain-text grid table toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan directories for documents containing grid tables
    Scan {
        /// Root directories to scan
        #[arg(short, long, required = true)]
        root: Vec<PathBuf>,
    },

    /// List the grid tables detected in a document
    Detect {
        /// Path to the document
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Parse one table from a document and print a summary
    Show {
        /// Path to the document
        #[arg(short, long)]
        file: PathBuf,

        /// Which table in the document (0-based)
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },

    /// Parse one table and export it to a file
    Export {
        /// Path to the document
        #[arg(short, long)]
        file: PathBuf,

        /// Which table in the document (0-based)
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// Output format (json or html)
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if e.is_malformed_table() {
            eprintln!("Hint: the block looks like a grid table but its borders do not line up; check for broken or misaligned '+', '-' and '|' characters.");
        }
        std::process::exit(1);
    }
}

fn run() -> grid_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { root } => cmd_scan(&root),
        Commands::Detect { file } => cmd_detect(&file),
        Commands::Show { file, index } => cmd_show(&file, index),
        Commands::Export {
            file,
            index,
            format,
            output,
        } => cmd_export(&file, index, &format, &output),
    }
}

fn cmd_scan(roots: &[PathBuf]) -> grid_core::Result<()> {
    let report = grid_core::scan_paths(roots)?;

    println!("Scanned {} root(s):", report.roots.len());
    for root in &report.roots {
        println!("  {}", root.display());
    }
    println!();

    for file in &report.files {
        println!("  {} ({} table(s))", file.path.display(), file.table_count());
    }
    println!();
    println!(
        "Found {} table(s) in {} file(s)",
        report.total_tables,
        report.files.len()
    );

    Ok(())
}

fn cmd_detect(file: &Path) -> grid_core::Result<()> {
    let content = read_document(file)?;
    let lines: Vec<&str> = content.lines().collect();
    let spans = find_tables(&lines);

    println!("{}: {} grid table(s)", file.display(), spans.len());
    for (i, span) in spans.iter().enumerate() {
        println!(
            "  [{}] lines {}-{} ({} lines)",
            i,
            span.start + 1,
            span.end + 1,
            span.line_count()
        );
    }

    Ok(())
}

fn cmd_show(file: &Path, index: usize) -> grid_core::Result<()> {
    let table = load_table(file, index)?;

    println!(
        "{} column(s), widths: {:?}",
        table.column_count(),
        table.column_widths
    );
    println!(
        "{} head row(s), {} body row(s)",
        table.head_rows.len(),
        table.body_rows.len()
    );
    println!();

    for (row_idx, row) in table.head_rows.iter().chain(&table.body_rows).enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let Some(cell) = cell else { continue };
            let mut span = String::new();
            if cell.more_rows > 0 {
                span.push_str(&format!(" [rowspan {}]", cell.rowspan()));
            }
            if cell.more_cols > 0 {
                span.push_str(&format!(" [colspan {}]", cell.colspan()));
            }
            println!(
                "  ({}, {}){}: {}",
                row_idx,
                col_idx,
                span,
                cell.lines.join(" / ")
            );
        }
    }

    Ok(())
}

fn cmd_export(file: &Path, index: usize, format: &str, output: &Path) -> grid_core::Result<()> {
    let table = load_table(file, index)?;

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&table)?,
        "html" => render_html(&table, &PlainText),
        other => return Err(grid_core::Error::UnsupportedFormat(other.to_string())),
    };

    let mut out = fs::File::create(output)?;
    out.write_all(rendered.as_bytes())?;
    println!(
        "Exported table {} of {} to {}",
        index,
        file.display(),
        output.display()
    );

    Ok(())
}

fn read_document(file: &Path) -> grid_core::Result<String> {
    fs::read_to_string(file).map_err(|e| grid_core::Error::FileRead {
        path: file.to_path_buf(),
        source: e,
    })
}

fn load_table(file: &Path, index: usize) -> grid_core::Result<TableStructure> {
    let content = read_document(file)?;
    let lines: Vec<&str> = content.lines().collect();
    let spans = find_tables(&lines);
    let span = spans
        .get(index)
        .copied()
        .ok_or(grid_core::Error::TableNotFound(index))?;
    let block = extract_block(&lines, span);
    parse(&block)
}
