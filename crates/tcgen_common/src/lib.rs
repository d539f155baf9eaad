//! Shared types and pipeline stages for the tcgen components.
//!
//! The pipeline is a straight line: raw model text goes through the
//! table extractor, then the row normalizer, then (optionally) diff
//! classification, and finally the merge renderer which emits the
//! spreadsheet bytes. Each stage lives in its own module and is pure
//! apart from the renderer's workbook construction.

pub mod diff;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod normalize;
pub mod prompt;
pub mod render;
pub mod schema;

pub use diff::DiffTag;
pub use error::TcgenError;
pub use extract::extract_table;
pub use flatten::flatten_prior_table;
pub use normalize::normalize_rows;
pub use prompt::build_prompt;
pub use render::{artifact_filename, render_workbook, XLSX_MIME};
pub use schema::{GenerationMode, TestCase, COLUMN_COUNT, SENTINEL};
