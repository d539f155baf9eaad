//! Hierarchical merge renderer: canonical rows to styled xlsx bytes.
//!
//! Merge spans are computed up front in a single pass per label column,
//! so the ranges handed to the workbook are disjoint by construction
//! and no write can collide with an existing merge.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::diff::DiffTag;
use crate::error::TcgenError;
use crate::schema::{ColumnAlign, TestCase, COLUMNS, SENTINEL};

/// MIME type of the produced artifact.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Sheet the table is written to.
pub const SHEET_NAME: &str = "Test Case";

const HEADER_FILL: u32 = 0x00F2_F2F2;
const FONT_NAME: &str = "Pretendard";
const FONT_SIZE: f64 = 9.0;

/// Number of nested label columns participating in merging.
const LABEL_DEPTH: usize = 3;

/// Index of the Label 1 column within the schema.
const FIRST_LABEL_COLUMN: usize = 4;

/// A maximal run of data rows collapsed into one visual cell.
///
/// `depth` is the label column (0 = Label 1); `start`/`end` are
/// inclusive data-row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSpan {
    pub depth: usize,
    pub start: usize,
    pub end: usize,
}

/// Compute the vertical merge spans for the three label columns.
///
/// A span breaks when its own column's value changes between adjacent
/// rows, when any label column to its left changes (merges encode
/// hierarchical containment, so an upstream break severs everything to
/// its right), or at the final row. Spans shorter than two rows are
/// dropped. Label 1 spans always merge, sentinel included; Label 2 and
/// Label 3 spans merge only for a non-empty, non-sentinel value, since
/// merging placeholders would fake a grouping that is not there.
pub fn compute_merge_spans(rows: &[TestCase]) -> Vec<MergeSpan> {
    let mut spans = Vec::new();
    let n = rows.len();
    if n == 0 {
        return spans;
    }

    for depth in 0..LABEL_DEPTH {
        let mut start = 0usize;
        for row in 1..=n {
            let boundary = row == n
                || rows[row].label(depth) != rows[row - 1].label(depth)
                || (0..depth).any(|u| rows[row].label(u) != rows[row - 1].label(u));
            if !boundary {
                continue;
            }

            let end = row - 1;
            if end > start {
                let value = rows[start].label(depth).trim();
                if depth == 0 || (!value.is_empty() && value != SENTINEL) {
                    spans.push(MergeSpan { depth, start, end });
                }
            }
            start = row;
        }
    }

    spans
}

fn base_format() -> Format {
    Format::new()
        .set_font_name(FONT_NAME)
        .set_font_size(FONT_SIZE)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
}

fn data_format(align: ColumnAlign, fill: Option<u32>) -> Format {
    let mut format = base_format().set_align(match align {
        ColumnAlign::Center => FormatAlign::Center,
        ColumnAlign::Left => FormatAlign::Left,
    });
    if let Some(rgb) = fill {
        format = format.set_background_color(Color::RGB(rgb));
    }
    format
}

/// Render the canonical table into a single-sheet workbook and return
/// the file bytes. The caller decides what to do with them; nothing is
/// written to disk here.
pub fn render_workbook(rows: &[TestCase]) -> Result<Vec<u8>, TcgenError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, spec) in COLUMNS.iter().enumerate() {
        worksheet.set_column_width(col as u16, spec.width)?;
    }

    let header_format = base_format()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(Color::RGB(HEADER_FILL));
    for (col, spec) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, spec.header, &header_format)?;
    }

    // Disjoint by construction: one span list per label column, no
    // overlaps possible, so every cell is either a span anchor, span
    // interior (written by merge_range) or a plain cell.
    let spans = compute_merge_spans(rows);
    let mut anchors: HashMap<(usize, usize), usize> = HashMap::new();
    let mut interior: HashSet<(usize, usize)> = HashSet::new();
    for span in &spans {
        let column = FIRST_LABEL_COLUMN + span.depth;
        anchors.insert((column, span.start), span.end);
        for row in span.start + 1..=span.end {
            interior.insert((column, row));
        }
    }

    for (idx, case) in rows.iter().enumerate() {
        let fill = DiffTag::from_note(&case.note).fill();
        let xl_row = (idx + 1) as u32;

        for (col, value) in case.cells().into_iter().enumerate() {
            let format = data_format(COLUMNS[col].align, fill);
            if let Some(&end) = anchors.get(&(col, idx)) {
                worksheet.merge_range(
                    xl_row,
                    col as u16,
                    (end + 1) as u32,
                    col as u16,
                    value,
                    &format,
                )?;
            } else if !interior.contains(&(col, idx)) {
                worksheet.write_string_with_format(xl_row, col as u16, value, &format)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Artifact filename carrying the generation timestamp.
pub fn artifact_filename(now: DateTime<Local>) -> String {
    format!("TC_{}.xlsx", now.format("%Y%m%d_%H%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DEFAULT_RESULT;

    fn labeled(label1: &str, label2: &str, label3: &str) -> TestCase {
        let mut case = TestCase::default();
        case.program = "Login".to_string();
        case.label1 = label1.to_string();
        case.label2 = label2.to_string();
        case.label3 = label3.to_string();
        case.result = DEFAULT_RESULT.to_string();
        case
    }

    fn spans_at(spans: &[MergeSpan], depth: usize) -> Vec<(usize, usize)> {
        spans
            .iter()
            .filter(|s| s.depth == depth)
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn golden_simple_hierarchy_merges() {
        let rows = vec![
            labeled("Area", "Input", "UI"),
            labeled("Area", "Input", "UI"),
            labeled("Area", "Button", "UI"),
        ];
        let spans = compute_merge_spans(&rows);
        assert_eq!(spans_at(&spans, 0), vec![(0, 2)]);
        assert_eq!(spans_at(&spans, 1), vec![(0, 1)]);
        // Label 3 rows 0-1 share "UI" under the same Label 2 group.
        assert_eq!(spans_at(&spans, 2), vec![(0, 1)]);
    }

    #[test]
    fn golden_upstream_change_breaks_contiguity() {
        // Label 1 constant, Label 2 is x, y, x: rows 1 and 3 cannot
        // merge even though both are "x", row 2 interrupts the run.
        let rows = vec![
            labeled("A", "x", "p"),
            labeled("A", "y", "p"),
            labeled("A", "x", "p"),
        ];
        let spans = compute_merge_spans(&rows);
        assert_eq!(spans_at(&spans, 0), vec![(0, 2)]);
        assert_eq!(spans_at(&spans, 1), Vec::<(usize, usize)>::new());
        // Label 3 shares "p" throughout but Label 2 breaks every pair.
        assert_eq!(spans_at(&spans, 2), Vec::<(usize, usize)>::new());
    }

    #[test]
    fn golden_label1_sentinel_still_merges() {
        let rows = vec![labeled("-", "a", "b"), labeled("-", "a", "c")];
        let spans = compute_merge_spans(&rows);
        assert_eq!(spans_at(&spans, 0), vec![(0, 1)]);
    }

    #[test]
    fn golden_sentinel_never_merges_downstream() {
        let rows = vec![
            labeled("Area", "Input", "-"),
            labeled("Area", "Input", "-"),
            labeled("Area", "Input", "-"),
        ];
        let spans = compute_merge_spans(&rows);
        assert_eq!(spans_at(&spans, 2), Vec::<(usize, usize)>::new());
        // The non-sentinel parents still merge.
        assert_eq!(spans_at(&spans, 0), vec![(0, 2)]);
        assert_eq!(spans_at(&spans, 1), vec![(0, 2)]);
    }

    #[test]
    fn golden_empty_value_never_merges_downstream() {
        let rows = vec![labeled("Area", "", "x"), labeled("Area", "", "x")];
        let spans = compute_merge_spans(&rows);
        assert_eq!(spans_at(&spans, 1), Vec::<(usize, usize)>::new());
    }

    #[test]
    fn golden_trailing_span_reaches_last_row() {
        let rows = vec![
            labeled("A", "x", "p"),
            labeled("B", "x", "p"),
            labeled("B", "x", "p"),
        ];
        let spans = compute_merge_spans(&rows);
        assert_eq!(spans_at(&spans, 0), vec![(1, 2)]);
        assert_eq!(spans_at(&spans, 1), vec![(1, 2)]);
    }

    #[test]
    fn spans_are_disjoint_per_column() {
        let rows = vec![
            labeled("A", "x", "u"),
            labeled("A", "x", "u"),
            labeled("A", "y", "u"),
            labeled("B", "y", "u"),
            labeled("B", "y", "u"),
        ];
        let spans = compute_merge_spans(&rows);
        for depth in 0..LABEL_DEPTH {
            let mut covered = HashSet::new();
            for (start, end) in spans_at(&spans, depth) {
                for row in start..=end {
                    assert!(covered.insert(row), "overlap at depth {}", depth);
                }
            }
        }
    }

    #[test]
    fn no_spans_for_empty_table() {
        assert!(compute_merge_spans(&[]).is_empty());
    }

    #[test]
    fn render_produces_xlsx_bytes() {
        let rows = vec![
            labeled("Area", "Input", "UI"),
            labeled("Area", "Input", "Fn"),
        ];
        let bytes = render_workbook(&rows).unwrap();
        // xlsx files are zip containers.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn render_handles_merged_and_tagged_rows() {
        let mut first = labeled("Area", "Input", "UI");
        first.note = "[신규] added field".to_string();
        let second = labeled("Area", "Input", "UI");
        let bytes = render_workbook(&[first, second]).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn artifact_filename_embeds_timestamp() {
        let now = Local::now();
        let name = artifact_filename(now);
        assert!(name.starts_with("TC_"));
        assert!(name.ends_with(".xlsx"));
        assert_eq!(name.len(), "TC_YYYYMMDD_HHMM.xlsx".len());
    }
}
