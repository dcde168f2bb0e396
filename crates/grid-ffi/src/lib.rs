//! C FFI bindings for grid-core
//!
//! This crate provides a C-compatible API over the grid table parser for use
//! from C/C++ applications. Tables are parsed from newline-separated UTF-8
//! text and handed out as opaque handles.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Opaque handle to a parsed table
pub struct FfiTable {
    inner: grid_core::TableStructure,
}

/// Parse a grid table from a newline-separated UTF-8 block
///
/// # Safety
/// - `block` must be a valid C string
/// - Returns null on parse failure
#[no_mangle]
pub unsafe extern "C" fn gt_parse(block: *const c_char) -> *mut FfiTable {
    if block.is_null() {
        return ptr::null_mut();
    }

    let text = match CStr::from_ptr(block).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };

    match grid_core::parse_str(text) {
        Ok(table) => Box::into_raw(Box::new(FfiTable { inner: table })),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a table handle
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse` or null
#[no_mangle]
pub unsafe extern "C" fn gt_free_table(table: *mut FfiTable) {
    if !table.is_null() {
        drop(Box::from_raw(table));
    }
}

/// Get the number of columns in a table
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse`
#[no_mangle]
pub unsafe extern "C" fn gt_table_column_count(table: *const FfiTable) -> usize {
    if table.is_null() {
        return 0;
    }
    let table = &(*table).inner;
    table.column_count()
}

/// Get the interior character width of a column, or 0 if out of bounds
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse`
#[no_mangle]
pub unsafe extern "C" fn gt_table_column_width(table: *const FfiTable, index: usize) -> usize {
    if table.is_null() {
        return 0;
    }
    let table = &(*table).inner;
    table.column_widths.get(index).copied().unwrap_or(0)
}

/// Get the number of head rows
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse`
#[no_mangle]
pub unsafe extern "C" fn gt_table_head_row_count(table: *const FfiTable) -> usize {
    if table.is_null() {
        return 0;
    }
    let table = &(*table).inner;
    table.head_rows.len()
}

/// Get the number of body rows
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse`
#[no_mangle]
pub unsafe extern "C" fn gt_table_body_row_count(table: *const FfiTable) -> usize {
    if table.is_null() {
        return 0;
    }
    let table = &(*table).inner;
    table.body_rows.len()
}

/// Get a cell's content with lines joined by '\n'. Rows are addressed head
/// rows first, then body rows. Returns null for spanned or out-of-range
/// positions.
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse`
/// - Caller must free the returned string with `gt_free_string`
#[no_mangle]
pub unsafe extern "C" fn gt_table_cell_text(
    table: *const FfiTable,
    row: usize,
    col: usize,
) -> *mut c_char {
    if table.is_null() {
        return ptr::null_mut();
    }

    let table = &(*table).inner;
    table
        .cell(row, col)
        .and_then(|c| CString::new(c.lines.join("\n")).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Get the number of rows a cell spans, or 0 for spanned/out-of-range positions
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse`
#[no_mangle]
pub unsafe extern "C" fn gt_table_cell_rowspan(
    table: *const FfiTable,
    row: usize,
    col: usize,
) -> usize {
    if table.is_null() {
        return 0;
    }
    let table = &(*table).inner;
    table.cell(row, col).map_or(0, |c| c.rowspan())
}

/// Get the number of columns a cell spans, or 0 for spanned/out-of-range positions
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse`
#[no_mangle]
pub unsafe extern "C" fn gt_table_cell_colspan(
    table: *const FfiTable,
    row: usize,
    col: usize,
) -> usize {
    if table.is_null() {
        return 0;
    }
    let table = &(*table).inner;
    table.cell(row, col).map_or(0, |c| c.colspan())
}

/// Serialize a table to a JSON string
///
/// # Safety
/// - `table` must be a valid pointer returned by `gt_parse`
/// - Caller must free the returned string with `gt_free_string`
#[no_mangle]
pub unsafe extern "C" fn gt_table_to_json(table: *const FfiTable) -> *mut c_char {
    if table.is_null() {
        return ptr::null_mut();
    }

    let table = &(*table).inner;
    serde_json::to_string(table)
        .ok()
        .and_then(|json| CString::new(json).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a gt_* function or null
#[no_mangle]
pub unsafe extern "C" fn gt_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
