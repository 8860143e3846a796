use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RANGE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z]+)(\d+):([A-Z]+)(\d+)").expect("range reference pattern is valid")
});

static COLUMN_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{1,3}$").expect("column label pattern is valid"));

// ---------------------------------------------------------------------------
// Column addressing: "A" ↔ 1, "Z" ↔ 26, "AA" ↔ 27, ...
// ---------------------------------------------------------------------------

/// Decode a column label into its 1-based index (bijective base-26).
///
/// Labels are expected in upper case; check untrusted input with
/// [`is_column_label`] first.
pub fn label_to_index(label: &str) -> u32 {
    label.bytes().fold(0u32, |idx, b| {
        idx.saturating_mul(26)
            .saturating_add(u32::from(b).saturating_sub(u32::from(b'A') - 1))
    })
}

/// Whether `label` is an upper-case column label of one to three letters (`A`..`ZZZ`).
pub fn is_column_label(label: &str) -> bool {
    COLUMN_LABEL.is_match(label)
}

/// Encode a 1-based column index as its label. Index 0 yields an empty label.
pub fn index_to_label(mut index: u32) -> String {
    let mut label = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        label.push(b'A' + rem as u8);
        index = (index - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// An inclusive span of columns, e.g. `AN..BB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: String,
    pub end: String,
}

impl ColumnRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Expand to the ordered list of labels from `start` to `end` inclusive.
    pub fn columns(&self) -> Vec<String> {
        (label_to_index(&self.start)..=label_to_index(&self.end))
            .map(index_to_label)
            .collect()
    }
}

/// A set of columns given either as an explicit list or as a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSet {
    List(Vec<String>),
    Range(ColumnRange),
}

impl ColumnSet {
    pub fn columns(&self) -> Vec<String> {
        match self {
            ColumnSet::List(cols) => cols.clone(),
            ColumnSet::Range(range) => range.columns(),
        }
    }
}

impl From<ColumnRange> for ColumnSet {
    fn from(range: ColumnRange) -> Self {
        ColumnSet::Range(range)
    }
}

// ---------------------------------------------------------------------------
// Used-range reference: "<col><row>:<col><row>"
// ---------------------------------------------------------------------------

/// The row span declared by a sheet's used-range reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub start_row: u32,
    pub end_row: u32,
}

impl RowSpan {
    /// Data rows: row 1 is always the header.
    pub fn data_rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start_row.max(2)..=self.end_row
    }
}

/// Parse a reference such as `"A1:CC40"`. Returns `None` when it is malformed.
pub fn parse_range_ref(reference: &str) -> Option<RowSpan> {
    let caps = RANGE_REF.captures(reference)?;
    let start_row = caps.get(2)?.as_str().parse().ok()?;
    let end_row = caps.get(4)?.as_str().parse().ok()?;
    Some(RowSpan { start_row, end_row })
}
