//! Error types for tcgen.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TcgenError {
    #[error("prior spreadsheet could not be read: {0}")]
    PriorTable(String),

    #[error("spreadsheet rendering failed: {0}")]
    Render(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
