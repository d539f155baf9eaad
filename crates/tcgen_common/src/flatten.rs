//! Prior-spreadsheet flattening for update-mode prompts.
//!
//! The previously generated workbook is reduced to pipe-delimited text
//! so it can be embedded in the prompt next to the new planning text.

use std::io::Cursor;

use calamine::{Reader, Xlsx};

use crate::error::TcgenError;

/// Flatten the first worksheet of an xlsx file to one pipe-delimited
/// line per row.
pub fn flatten_prior_table(bytes: &[u8]) -> Result<String, TcgenError> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| TcgenError::PriorTable(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TcgenError::PriorTable("workbook has no sheets".to_string()))?
        .map_err(|e| TcgenError::PriorTable(e.to_string()))?;

    let mut out = String::new();
    for row in range.rows() {
        out.push('|');
        for cell in row {
            out.push(' ');
            out.push_str(&cell.to_string());
            out.push_str(" |");
        }
        out.push('\n');
    }
    Ok(out)
}
