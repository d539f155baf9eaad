//! Diff classification for update mode.
//!
//! The model is instructed to tag changed rows by writing a marker
//! substring into the note column. This module owns the marker
//! vocabulary and turns it into an enumerated tag; the tag only drives
//! presentation (row fill colour), the note text itself is untouched.
//! Absent markers simply mean an unchanged row, including the case
//! where the model ignored the tagging instructions entirely.

use serde::{Deserialize, Serialize};

/// Marker for a row the model changed against the prior table.
pub const MARKER_MODIFIED: &str = "[수정]";
/// Marker for a row with no counterpart in the prior table.
pub const MARKER_NEW: &str = "[신규]";
/// Marker for a prior row no longer backed by the planning document.
pub const MARKER_REMOVAL: &str = "[삭제 대상]";

/// Classification of a row relative to the prior table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffTag {
    Unchanged,
    New,
    Modified,
    RemovalCandidate,
}

impl DiffTag {
    /// Classify a note cell. When several markers appear, the first
    /// match in the order modified, new, removal-candidate wins.
    pub fn from_note(note: &str) -> Self {
        if note.contains(MARKER_MODIFIED) {
            DiffTag::Modified
        } else if note.contains(MARKER_NEW) {
            DiffTag::New
        } else if note.contains(MARKER_REMOVAL) {
            DiffTag::RemovalCandidate
        } else {
            DiffTag::Unchanged
        }
    }

    /// Background colour (RGB) for data rows carrying this tag.
    pub fn fill(self) -> Option<u32> {
        match self {
            DiffTag::Unchanged => None,
            DiffTag::New => Some(0x00DD_EBF7),
            DiffTag::Modified => Some(0x00FF_F2CC),
            DiffTag::RemovalCandidate => Some(0x00D9_D9D9),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_marker_classification() {
        assert_eq!(DiffTag::from_note("[신규] added field"), DiffTag::New);
        assert_eq!(DiffTag::from_note("limit changed [수정]"), DiffTag::Modified);
        assert_eq!(
            DiffTag::from_note("[삭제 대상] screen removed"),
            DiffTag::RemovalCandidate
        );
        assert_eq!(DiffTag::from_note("plain remark"), DiffTag::Unchanged);
        assert_eq!(DiffTag::from_note(""), DiffTag::Unchanged);
    }

    #[test]
    fn golden_modified_wins_over_other_markers() {
        assert_eq!(
            DiffTag::from_note("[신규] then [수정] later"),
            DiffTag::Modified
        );
    }

    #[test]
    fn unchanged_rows_have_no_fill() {
        assert_eq!(DiffTag::Unchanged.fill(), None);
        assert!(DiffTag::New.fill().is_some());
        assert!(DiffTag::Modified.fill().is_some());
        assert!(DiffTag::RemovalCandidate.fill().is_some());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&DiffTag::RemovalCandidate).unwrap();
        assert_eq!(json, "\"removal_candidate\"");
    }
}
