use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CellValue – the raw `.v` of a single sheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as handed over by the spreadsheet reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    #[default]
    Empty,
}

static EMPTY: CellValue = CellValue::Empty;

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Loose numeric coercion, following JavaScript's `Number(value)`.
    ///
    /// * `Empty` → NaN
    /// * blank text → 0
    /// * `Bool` → 1 / 0
    /// * other text → the parsed number, NaN when it does not parse
    pub fn to_number(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Bool(b) => f64::from(u8::from(*b)),
            CellValue::Text(s) => text_to_number(s),
            CellValue::Empty => f64::NAN,
        }
    }

    /// The value as display text, `None` for an empty cell.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

/// Numeric text: decimal or exponent form, `0x` / `0o` / `0b` integers
/// (unsigned), or `Infinity` with an optional sign.
fn text_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_digits(&trimmed[2..], radix);
    }

    let unsigned = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // `str::parse` also takes "inf" and "nan"; those stay NaN.
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Sheet / Workbook – the reader's output contract
// ---------------------------------------------------------------------------

/// One worksheet: a sparse grid addressed by `"<ColumnLabel><RowNumber>"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Declared used range, e.g. `"A1:CC40"` (the `!ref` entry).
    pub range_ref: Option<String>,
    /// Cells keyed by A1-style address.
    pub cells: HashMap<String, CellValue>,
}

impl Sheet {
    pub fn new(range_ref: Option<String>) -> Self {
        Self {
            range_ref,
            cells: HashMap::new(),
        }
    }

    /// Cell at `column` + `row`; missing cells read as [`CellValue::Empty`].
    pub fn cell(&self, column: &str, row: u32) -> &CellValue {
        self.cells
            .get(&format!("{column}{row}"))
            .unwrap_or(&EMPTY)
    }

    pub fn set_cell(&mut self, column: &str, row: u32, value: CellValue) {
        self.cells.insert(format!("{column}{row}"), value);
    }

    /// Display name of a column: row-1 text, falling back to the label itself.
    pub fn header(&self, column: &str) -> String {
        self.cell(column, 1)
            .as_text()
            .unwrap_or_else(|| column.to_string())
    }
}

/// A parsed workbook: ordered sheet names plus the sheets by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheet_names: Vec<String>,
    pub sheets: HashMap<String, Sheet>,
}

impl Workbook {
    /// Append a sheet, keeping `sheet_names` in insertion order.
    pub fn push_sheet(&mut self, name: impl Into<String>, sheet: Sheet) {
        let name = name.into();
        if !self.sheets.contains_key(&name) {
            self.sheet_names.push(name.clone());
        }
        self.sheets.insert(name, sheet);
    }

    /// The sheet named `preferred` if present, else the first sheet.
    pub fn select_sheet(&self, preferred: &str) -> Option<(&str, &Sheet)> {
        let name = self
            .sheet_names
            .iter()
            .find(|n| n.as_str() == preferred)
            .or_else(|| self.sheet_names.first())?;
        self.sheets.get(name).map(|sheet| (name.as_str(), sheet))
    }
}

// ---------------------------------------------------------------------------
// Project – one decoded row of the source sheet
// ---------------------------------------------------------------------------

/// A tag / partner label with its fractional attribution within a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub key: String,
    pub weight: f64,
}

/// A single funded research project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub include: bool,
    pub start_year: Option<i32>,
    pub project_name: Option<String>,
    pub project_title: Option<String>,
    pub funding_millions: Option<f64>,
    pub tags: Vec<WeightedItem>,
    pub project_leads: Vec<String>,
    pub transition_tags: Vec<WeightedItem>,
    pub status: Option<String>,
    pub transition_partners: Vec<WeightedItem>,
    pub transition_none_yet: f64,
    pub transition_success: f64,
}

impl Project {
    /// Whether the record carries any transition success (the `BK` metric).
    pub fn has_success(&self) -> bool {
        self.transition_success > 0.0
    }

    /// Whether the record carries any "none yet" transitions (the `BM` metric).
    pub fn has_none_yet(&self) -> bool {
        self.transition_none_yet > 0.0
    }
}
