use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::columns::{is_column_label, label_to_index, ColumnRange, ColumnSet};

/// Sheet picked when the workbook has one by this name.
pub const DEFAULT_SHEET_NAME: &str = "OE_ExSum_Tags_Transitions";

// ---------------------------------------------------------------------------
// SheetLayout – where each field lives in the source sheet
// ---------------------------------------------------------------------------

/// Column layout of the project sheet.
///
/// The default reproduces the layout of the tracking workbook exactly. A JSON
/// override may set any subset of fields; the rest keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub include_column: String,
    pub start_year_column: String,
    pub project_name_column: String,
    pub funding_column: String,
    pub tag_columns: ColumnSet,
    pub project_leads: ColumnRange,
    pub transition_tags: ColumnSet,
    pub status: ColumnRange,
    pub transition_partners: ColumnSet,
    pub success_column: String,
    pub none_yet_column: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            include_column: "A".into(),
            start_year_column: "B".into(),
            project_name_column: "C".into(),
            funding_column: "D".into(),
            tag_columns: ColumnSet::List(
                ["I", "K", "N", "O", "P", "R", "AE", "AI"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
            project_leads: ColumnRange::new("AN", "BB"),
            transition_tags: ColumnRange::new("BD", "BJ").into(),
            status: ColumnRange::new("BK", "BO"),
            transition_partners: ColumnRange::new("BP", "CC").into(),
            success_column: "BK".into(),
            none_yet_column: "BM".into(),
        }
    }
}

impl SheetLayout {
    /// Load a layout override from a JSON file.
    ///
    /// Every column label must be upper-case letters (`A`..`ZZZ`) and every
    /// range must run left to right.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading layout file {}", path.display()))?;
        let layout: Self = serde_json::from_str(&text).context("parsing layout JSON")?;
        layout
            .validate()
            .with_context(|| format!("invalid layout in {}", path.display()))?;
        Ok(layout)
    }

    /// Reject labels that would not address a sheet cell.
    pub fn validate(&self) -> Result<()> {
        let single = [
            ("include_column", &self.include_column),
            ("start_year_column", &self.start_year_column),
            ("project_name_column", &self.project_name_column),
            ("funding_column", &self.funding_column),
            ("success_column", &self.success_column),
            ("none_yet_column", &self.none_yet_column),
        ];
        for (field, label) in single {
            check_label(field, label)?;
        }

        let ranges = [
            ("project_leads", &self.project_leads),
            ("status", &self.status),
        ];
        for (field, range) in ranges {
            check_range(field, range)?;
        }

        let sets = [
            ("tag_columns", &self.tag_columns),
            ("transition_tags", &self.transition_tags),
            ("transition_partners", &self.transition_partners),
        ];
        for (field, set) in sets {
            match set {
                ColumnSet::Range(range) => check_range(field, range)?,
                ColumnSet::List(labels) => {
                    for label in labels {
                        check_label(field, label)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_label(field: &str, label: &str) -> Result<()> {
    if !is_column_label(label) {
        bail!("{field}: {label:?} is not a column label (expected A..ZZZ)");
    }
    Ok(())
}

fn check_range(field: &str, range: &ColumnRange) -> Result<()> {
    check_label(field, &range.start)?;
    check_label(field, &range.end)?;
    if label_to_index(&range.start) > label_to_index(&range.end) {
        bail!("{field}: range {}..{} runs backwards", range.start, range.end);
    }
    Ok(())
}
