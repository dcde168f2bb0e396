//! HTML rendering for parsed grid tables
//!
//! The renderer walks the table structure and emits `<table>` markup with
//! `rowspan`/`colspan` attributes. How cell content is turned into markup is
//! not this crate's business; callers inject a [`ContentRenderer`] (the cell
//! text might be markdown, reStructuredText or anything else).

use crate::table::{Cell, Row, TableStructure};
use std::fmt::Write;

/// Renders the text lines inside one cell
pub trait ContentRenderer {
    fn render_block(&self, lines: &[String]) -> String;
}

/// Escapes cell lines and joins them verbatim
pub struct PlainText;

impl ContentRenderer for PlainText {
    fn render_block(&self, lines: &[String]) -> String {
        let escaped: Vec<String> = lines.iter().map(|l| escape_html(l)).collect();
        escaped.join("\n")
    }
}

/// Escape the HTML special characters in a text line
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a parsed table to an HTML `<table>` element.
///
/// Head rows become `<th>` cells inside `<thead>`, body rows `<td>` cells
/// inside `<tbody>`; positions consumed by another cell's span are skipped.
pub fn render_html(table: &TableStructure, renderer: &dyn ContentRenderer) -> String {
    let mut content = String::new();
    if !table.head_rows.is_empty() {
        content.push_str("\t<thead>\n");
        render_rows(&mut content, &table.head_rows, "th", renderer);
        content.push_str("\t</thead>\n");
    }
    if !table.body_rows.is_empty() {
        content.push_str("\t<tbody>\n");
        render_rows(&mut content, &table.body_rows, "td", renderer);
        content.push_str("\t</tbody>\n");
    }
    format!("<table>\n{}</table>\n", content)
}

fn render_rows(out: &mut String, rows: &[Row], cell_tag: &str, renderer: &dyn ContentRenderer) {
    for row in rows {
        out.push_str("\t\t<tr>\n");
        for cell in row.iter().flatten() {
            let _ = writeln!(
                out,
                "\t\t\t<{tag}{attrs}>{content}</{tag}>",
                tag = cell_tag,
                attrs = span_attributes(cell),
                content = cell_content(cell, renderer),
            );
        }
        out.push_str("\t\t</tr>\n");
    }
}

fn span_attributes(cell: &Cell) -> String {
    let mut attrs = String::new();
    if cell.more_rows > 0 {
        let _ = write!(attrs, " rowspan=\"{}\"", cell.rowspan());
    }
    if cell.more_cols > 0 {
        let _ = write!(attrs, " colspan=\"{}\"", cell.colspan());
    }
    attrs
}

fn cell_content(cell: &Cell, renderer: &dyn ContentRenderer) -> String {
    let rendered = renderer.render_block(&cell.lines);
    if cell.lines.len() <= 1 {
        rendered
    } else {
        // Multi-line content goes on its own indented lines.
        format!("\n\t\t\t\t{}\n\t\t\t", rendered)
    }
}
