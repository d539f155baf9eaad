//! The fixed 13-column test-case schema.
//!
//! Every row is a named-field record; header text, column width and
//! alignment are carried per column in [`COLUMNS`] so that no styling
//! rule has to be keyed by a raw index.

use serde::{Deserialize, Serialize};

/// Number of columns in the canonical table.
pub const COLUMN_COUNT: usize = 13;

/// Placeholder meaning "not applicable" in the label hierarchy.
pub const SENTINEL: &str = "-";

/// Execution-status default assigned in new-generation mode.
pub const DEFAULT_RESULT: &str = "Not Tested";

/// One test case, in spreadsheet column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub tc_id: String,
    pub program: String,
    pub screen_id: String,
    pub requirement_id: String,
    pub label1: String,
    pub label2: String,
    pub label3: String,
    pub precondition: String,
    pub procedure: String,
    pub expected: String,
    pub result: String,
    pub tester: String,
    pub note: String,
}

impl TestCase {
    /// Build a row from cells in column order. Shorter input is padded
    /// with empty strings, longer input is truncated.
    pub fn from_cells(mut cells: Vec<String>) -> Self {
        cells.resize(COLUMN_COUNT, String::new());
        let mut it = cells.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            tc_id: next(),
            program: next(),
            screen_id: next(),
            requirement_id: next(),
            label1: next(),
            label2: next(),
            label3: next(),
            precondition: next(),
            procedure: next(),
            expected: next(),
            result: next(),
            tester: next(),
            note: next(),
        }
    }

    /// Cells in column order.
    pub fn cells(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.tc_id,
            &self.program,
            &self.screen_id,
            &self.requirement_id,
            &self.label1,
            &self.label2,
            &self.label3,
            &self.precondition,
            &self.procedure,
            &self.expected,
            &self.result,
            &self.tester,
            &self.note,
        ]
    }

    /// Mutable cells in column order.
    pub fn cells_mut(&mut self) -> [&mut String; COLUMN_COUNT] {
        [
            &mut self.tc_id,
            &mut self.program,
            &mut self.screen_id,
            &mut self.requirement_id,
            &mut self.label1,
            &mut self.label2,
            &mut self.label3,
            &mut self.precondition,
            &mut self.procedure,
            &mut self.expected,
            &mut self.result,
            &mut self.tester,
            &mut self.note,
        ]
    }

    /// Label-hierarchy column by depth (0 = Label 1, 2 = Label 3).
    pub fn label(&self, depth: usize) -> &str {
        match depth {
            0 => &self.label1,
            1 => &self.label2,
            _ => &self.label3,
        }
    }
}

/// How the pipeline treats the bookkeeping columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Fresh generation: TC ID, result and tester are reset so a human
    /// assigns them later.
    New,
    /// Diff against a prior table: bookkeeping columns are preserved
    /// as returned by the model.
    Update,
}

/// Horizontal alignment class for a column. Both classes wrap text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Center,
    Left,
}

/// Per-column presentation metadata.
pub struct ColumnSpec {
    pub header: &'static str,
    pub width: f64,
    pub align: ColumnAlign,
}

/// The schema, in column order. Free-text columns (procedure, expected
/// result, note) are left-aligned; everything else is centered.
pub const COLUMNS: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec { header: "TC ID", width: 10.0, align: ColumnAlign::Center },
    ColumnSpec { header: "프로그램명(화면명)", width: 15.0, align: ColumnAlign::Center },
    ColumnSpec { header: "화면 ID", width: 15.0, align: ColumnAlign::Center },
    ColumnSpec { header: "요구사항 ID", width: 10.0, align: ColumnAlign::Center },
    ColumnSpec { header: "Label 1", width: 15.0, align: ColumnAlign::Center },
    ColumnSpec { header: "Label 2", width: 18.0, align: ColumnAlign::Center },
    ColumnSpec { header: "Label 3", width: 15.0, align: ColumnAlign::Center },
    ColumnSpec { header: "사전 조건 / 참고", width: 18.0, align: ColumnAlign::Center },
    ColumnSpec { header: "수행 절차", width: 35.0, align: ColumnAlign::Left },
    ColumnSpec { header: "기대 결과", width: 35.0, align: ColumnAlign::Left },
    ColumnSpec { header: "결과", width: 10.0, align: ColumnAlign::Center },
    ColumnSpec { header: "수행자", width: 10.0, align: ColumnAlign::Center },
    ColumnSpec { header: "비고", width: 30.0, align: ColumnAlign::Left },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cells_pads_short_input() {
        let case = TestCase::from_cells(vec!["id".to_string(), "prog".to_string()]);
        assert_eq!(case.tc_id, "id");
        assert_eq!(case.program, "prog");
        assert_eq!(case.note, "");
    }

    #[test]
    fn from_cells_truncates_long_input() {
        let cells: Vec<String> = (0..20).map(|i| format!("c{}", i)).collect();
        let case = TestCase::from_cells(cells);
        assert_eq!(case.note, "c12");
        assert_eq!(case.cells().len(), COLUMN_COUNT);
    }

    #[test]
    fn cells_round_trip() {
        let cells: Vec<String> = (0..COLUMN_COUNT).map(|i| format!("v{}", i)).collect();
        let case = TestCase::from_cells(cells.clone());
        let back: Vec<String> = case.cells().iter().map(|c| c.to_string()).collect();
        assert_eq!(back, cells);
    }

    #[test]
    fn label_depth_lookup() {
        let mut case = TestCase::default();
        case.label1 = "a".to_string();
        case.label2 = "b".to_string();
        case.label3 = "c".to_string();
        assert_eq!(case.label(0), "a");
        assert_eq!(case.label(1), "b");
        assert_eq!(case.label(2), "c");
    }
}
