//! PDF text extraction for uploaded planning documents.

use tracing::warn;

/// Extract text from each uploaded PDF, concatenated in upload order.
///
/// A file that cannot be parsed logs a warning and contributes nothing;
/// the run continues with the remaining documents.
pub fn extract_plan_text(files: &[(String, Vec<u8>)]) -> String {
    let mut all_text = String::new();
    for (name, bytes) in files {
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => {
                all_text.push_str(&text);
                all_text.push('\n');
            }
            Err(e) => warn!("Failed to read planning document {}: {}", name, e),
        }
    }
    all_text
}
