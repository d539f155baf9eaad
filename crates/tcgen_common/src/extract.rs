//! Table extractor for raw model responses.
//!
//! The model is asked for a pipe-delimited 13-column table but the
//! response routinely interleaves prose, markdown separator rows and
//! repeated header lines. This stage keeps only plausible data rows
//! and guarantees every surviving row has exactly 13 cells. A response
//! with no parseable table yields an empty vector, which callers treat
//! as "no data", never as a failure.

use crate::schema::{TestCase, COLUMN_COUNT};

/// Rows with fewer cells than this are discarded as prose that happens
/// to contain a pipe character.
const MIN_CELLS: usize = 10;

/// First-cell token identifying a (possibly repeated) header row.
const HEADER_TOKEN: &str = "TC ID";

/// Parse a raw response into table rows.
pub fn extract_table(raw: &str) -> Vec<TestCase> {
    let mut rows = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if !line.contains('|') {
            continue;
        }
        // Markdown separator rows are built entirely from | - : and spaces.
        if line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ')) {
            continue;
        }

        let mut cells: Vec<String> = line.split('|').map(|c| c.trim().to_string()).collect();
        // Leading and trailing delimiters leave empty artifact cells.
        if cells.first().map(|c| c.is_empty()).unwrap_or(false) {
            cells.remove(0);
        }
        if cells.last().map(|c| c.is_empty()).unwrap_or(false) {
            cells.pop();
        }

        if cells.len() < MIN_CELLS || cells[0].contains(HEADER_TOKEN) {
            continue;
        }

        cells.truncate(COLUMN_COUNT);
        rows.push(TestCase::from_cells(cells));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE_MINIMAL: &str = "\
| TC ID | Prog | Scr | Req | L1 | L2 | L3 | Pre | Proc | Exp | Res | Tester | Note |
|---|---|---|---|---|---|---|---|---|---|---|---|---|
| | Login | - | - | ID Area | ID Input | UI Check | Empty input | Check area | Guide text shown | | | |";

    #[test]
    fn golden_minimal_table() {
        let rows = extract_table(RESPONSE_MINIMAL);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.cells().len(), COLUMN_COUNT);
        assert_eq!(row.program, "Login");
        assert_eq!(row.label1, "ID Area");
        assert_eq!(row.label3, "UI Check");
        assert_eq!(row.note, "");
    }

    #[test]
    fn golden_short_row_is_padded() {
        // 10 cells survive the minimum and are padded to 13.
        let raw = "| a | b | c | d | e | f | g | h | i | j |";
        let rows = extract_table(raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expected, "j");
        assert_eq!(rows[0].result, "");
        assert_eq!(rows[0].tester, "");
        assert_eq!(rows[0].note, "");
    }

    #[test]
    fn golden_overlong_row_is_truncated() {
        let raw = "| a | b | c | d | e | f | g | h | i | j | k | l | m | n | o |";
        let rows = extract_table(raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].note, "m");
    }

    #[test]
    fn golden_no_table_yields_empty() {
        let raw = "The planning document does not describe any UI elements.\nNothing to do here.";
        assert!(extract_table(raw).is_empty());
    }

    #[test]
    fn golden_sparse_pipe_prose_is_discarded() {
        let raw = "Either A | B works, see below | maybe.";
        assert!(extract_table(raw).is_empty());
    }

    #[test]
    fn golden_repeated_header_is_discarded() {
        let raw = "\
| TC ID | P | S | R | L1 | L2 | L3 | Pre | Proc | Exp | Res | T | N |
| x1 | P | S | R | L1 | L2 | L3 | Pre | Proc | Exp | Res | T | N |
| TC ID | P | S | R | L1 | L2 | L3 | Pre | Proc | Exp | Res | T | N |
| x2 | P | S | R | L1 | L2 | L3 | Pre | Proc | Exp | Res | T | N |";
        let rows = extract_table(raw);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tc_id, "x1");
        assert_eq!(rows[1].tc_id, "x2");
    }

    #[test]
    fn idempotent_on_canonical_table() {
        let canonical = "\
| t1 | Login | S-1 | R-1 | Area | Input | UI | pre | proc | exp | Not Tested | qa | note |
| t2 | Login | S-1 | R-1 | Area | Input | Fn | pre | proc | exp | Not Tested | qa | note |";
        let first = extract_table(canonical);
        let rendered: String = first
            .iter()
            .map(|r| format!("| {} |", r.cells().join(" | ")))
            .collect::<Vec<_>>()
            .join("\n");
        let second = extract_table(&rendered);
        assert_eq!(first, second);
    }
}
