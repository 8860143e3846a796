use once_cell::sync::Lazy;
use regex::Regex;

use super::columns::parse_range_ref;
use super::layout::SheetLayout;
use super::model::{CellValue, Project, Sheet, WeightedItem, Workbook};

/// Titles look like `"13ZZ-01: Some project title (SPT) [2013-2018]"`.
static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\s*([^(]+)\s*\(").expect("title pattern is valid"));

/// Leading numeric prefix, as a lenient float parser accepts it.
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|\d+\.?\d*(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

const INCLUDE_MARKERS: [&str; 5] = ["1", "x", "y", "yes", "true"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Decode the project sheet of `workbook` with the standard layout.
pub fn extract(workbook: &Workbook) -> Vec<Project> {
    extract_with_layout(workbook, &SheetLayout::default())
}

/// Decode the project sheet of `workbook` using `layout`.
///
/// A missing or malformed used-range reference yields no projects.
pub fn extract_with_layout(workbook: &Workbook, layout: &SheetLayout) -> Vec<Project> {
    let Some((name, sheet)) = workbook.select_sheet(&layout.sheet_name) else {
        log::warn!("workbook has no sheets");
        return Vec::new();
    };
    log::debug!("extracting projects from sheet '{name}'");

    let Some(span) = sheet.range_ref.as_deref().and_then(parse_range_ref) else {
        log::warn!(
            "sheet '{name}' has no usable range reference ({:?})",
            sheet.range_ref
        );
        return Vec::new();
    };

    let decoder = RowDecoder::new(sheet, layout);
    let mut projects = Vec::new();
    for row in span.data_rows() {
        let project = decoder.decode(row);
        // A project name overrides a false include flag.
        if !project.include && project.project_name.is_none() {
            log::debug!("skipping row {row}: not included and unnamed");
            continue;
        }
        projects.push(project);
    }
    projects
}

// ---------------------------------------------------------------------------
// Row decoding
// ---------------------------------------------------------------------------

/// Column lists expanded once per sheet, plus the sheet they are read from.
struct RowDecoder<'a> {
    sheet: &'a Sheet,
    layout: &'a SheetLayout,
    tag_columns: Vec<String>,
    lead_columns: Vec<String>,
    transition_tag_columns: Vec<String>,
    status_columns: Vec<String>,
    partner_columns: Vec<String>,
}

impl<'a> RowDecoder<'a> {
    fn new(sheet: &'a Sheet, layout: &'a SheetLayout) -> Self {
        Self {
            sheet,
            layout,
            tag_columns: layout.tag_columns.columns(),
            lead_columns: layout.project_leads.columns(),
            transition_tag_columns: layout.transition_tags.columns(),
            status_columns: layout.status.columns(),
            partner_columns: layout.transition_partners.columns(),
        }
    }

    fn decode(&self, row: u32) -> Project {
        let sheet = self.sheet;
        let layout = self.layout;

        let project_name = sheet
            .cell(&layout.project_name_column, row)
            .as_text()
            .filter(|name| !name.is_empty());
        let title = project_name.as_deref().map(project_title);

        Project {
            include: is_included(sheet.cell(&layout.include_column, row)),
            start_year: start_year(sheet.cell(&layout.start_year_column, row)),
            project_name,
            project_title: title,
            funding_millions: finite(sheet.cell(&layout.funding_column, row).to_number()),
            tags: collect_weighted(sheet, row, &self.tag_columns),
            project_leads: self.flagged(row, &self.lead_columns).collect(),
            transition_tags: collect_weighted(sheet, row, &self.transition_tag_columns),
            status: self.flagged(row, &self.status_columns).next(),
            transition_partners: collect_weighted(sheet, row, &self.partner_columns),
            transition_none_yet: or_zero(sheet.cell(&layout.none_yet_column, row).to_number()),
            transition_success: or_zero(sheet.cell(&layout.success_column, row).to_number()),
        }
    }

    /// Header names of the one-hot columns set to 1 in `row`, in column order.
    fn flagged<'c>(
        &'c self,
        row: u32,
        columns: &'c [String],
    ) -> impl Iterator<Item = String> + 'c {
        columns
            .iter()
            .filter(move |col| self.sheet.cell(col, row).to_number() == 1.0)
            .map(move |col| self.sheet.header(col))
    }
}

/// Spread one unit of weight evenly across the positive columns of `row`.
///
/// Emits one item per positive column, keyed by its header name; a row with
/// no positive column yields nothing.
pub fn collect_weighted(sheet: &Sheet, row: u32, columns: &[String]) -> Vec<WeightedItem> {
    let values: Vec<f64> = columns
        .iter()
        .map(|col| or_zero(weight_source(sheet.cell(col, row))))
        .collect();

    let present = values.iter().filter(|v| **v > 0.0).count();
    if present == 0 {
        return Vec::new();
    }
    let weight = 1.0 / present as f64;

    columns
        .iter()
        .zip(&values)
        .filter(|(_, value)| **value > 0.0)
        .map(|(col, _)| WeightedItem {
            key: sheet.header(col),
            weight,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Field coercions
// ---------------------------------------------------------------------------

fn is_included(raw: &CellValue) -> bool {
    let marker = raw.as_text().unwrap_or_default().trim().to_lowercase();
    INCLUDE_MARKERS.contains(&marker.as_str()) || raw.to_number() == 1.0
}

/// A year is kept only when it is a finite, non-zero whole number.
fn start_year(raw: &CellValue) -> Option<i32> {
    let value = raw.to_number();
    if !value.is_finite() || value == 0.0 || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

/// The text between the first `": "` and the following `"("`, trimmed.
pub fn project_title(name: &str) -> String {
    TITLE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Text cells are parsed leniently (leading numeric prefix); others coerce.
fn weight_source(raw: &CellValue) -> f64 {
    match raw {
        CellValue::Text(s) => parse_float_prefix(s),
        other => other.to_number(),
    }
}

/// Parse the leading float of `s`, ignoring trailing garbage. NaN if none.
pub fn parse_float_prefix(s: &str) -> f64 {
    let trimmed = s.trim_start();
    let Some(m) = FLOAT_PREFIX.find(trimmed) else {
        return f64::NAN;
    };
    let text = m.as_str();
    match text.trim_start_matches(['+', '-']) {
        "Infinity" if text.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => text.parse().unwrap_or(f64::NAN),
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_prefix_ignores_trailing_text() {
        assert_eq!(parse_float_prefix("3abc"), 3.0);
        assert_eq!(parse_float_prefix("  .5"), 0.5);
        assert_eq!(parse_float_prefix("-2e1x"), -20.0);
        assert!(parse_float_prefix("abc").is_nan());
        assert!(parse_float_prefix("").is_nan());
    }

    #[test]
    fn title_is_text_between_colon_and_parenthesis() {
        assert_eq!(
            project_title("13ZZ-01: Some project title (SPT) [2013-2018]"),
            "Some project title"
        );
        assert_eq!(project_title("No delimiters here"), "No delimiters here");
    }

    #[test]
    fn start_year_rejects_zero_and_fractions() {
        assert_eq!(start_year(&CellValue::Number(2016.0)), Some(2016));
        assert_eq!(start_year(&CellValue::Text("2017".into())), Some(2017));
        assert_eq!(start_year(&CellValue::Number(0.0)), None);
        assert_eq!(start_year(&CellValue::Number(2016.5)), None);
        assert_eq!(start_year(&CellValue::Empty), None);
        assert_eq!(start_year(&CellValue::Text("soon".into())), None);
    }

    #[test]
    fn include_accepts_markers_and_numeric_one() {
        assert!(is_included(&CellValue::Text(" Yes ".into())));
        assert!(is_included(&CellValue::Text("X".into())));
        assert!(is_included(&CellValue::Number(1.0)));
        assert!(is_included(&CellValue::Text("1.0".into())));
        assert!(is_included(&CellValue::Bool(true)));
        assert!(!is_included(&CellValue::Number(0.0)));
        assert!(!is_included(&CellValue::Text("no".into())));
        assert!(!is_included(&CellValue::Empty));
    }
}
