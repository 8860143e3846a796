#![allow(dead_code)]

use portfolio_lens::data::layout::DEFAULT_SHEET_NAME;
use portfolio_lens::{CellValue, Project, Sheet, WeightedItem, Workbook};

/// Headers for the eight single-choice tag columns, in layout order.
pub const TAG_HEADERS: [(&str, &str); 8] = [
    ("I", "Command and Energy Management"),
    ("K", "Controls & Power Mgmt"),
    ("N", "Distribution"),
    ("O", "Energy Conversion"),
    ("P", "Energy Source"),
    ("R", "Energy Storage"),
    ("AE", "Power Generation"),
    ("AI", "Power Tools & Analytics"),
];

/// Status headers for BK..BO.
pub const STATUS_HEADERS: [(&str, &str); 5] = [
    ("BK", "Success"),
    ("BL", "Success past 5years"),
    ("BM", "None Yet"),
    ("BN", "Cancelled"),
    ("BO", "Ongoing"),
];

/// A sheet with the standard header row and a declared range up to `last_row`.
pub fn sheet_with_headers(last_row: u32) -> Sheet {
    let mut sheet = Sheet::new(Some(format!("A1:CC{last_row}")));
    sheet.set_cell("A", 1, text("Include"));
    sheet.set_cell("B", 1, text("Start Year"));
    sheet.set_cell("C", 1, text("Project"));
    sheet.set_cell("D", 1, text("Funding"));
    for (col, name) in TAG_HEADERS.iter().chain(STATUS_HEADERS.iter()) {
        sheet.set_cell(col, 1, text(name));
    }
    sheet.set_cell("AN", 1, text("Alice"));
    sheet.set_cell("AO", 1, text("Bob"));
    sheet.set_cell("AP", 1, text("Carol"));
    sheet
}

pub fn workbook_of(sheet: Sheet) -> Workbook {
    let mut wb = Workbook::default();
    wb.push_sheet(DEFAULT_SHEET_NAME, sheet);
    wb
}

pub fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

pub fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// A project built directly, bypassing the extractor.
pub fn project(year: Option<i32>, funding: Option<f64>, leads: &[&str]) -> Project {
    Project {
        include: true,
        start_year: year,
        project_name: Some(format!("P-{year:?}: Project {year:?} (X)")),
        project_title: Some(format!("Project {year:?}")),
        funding_millions: funding,
        project_leads: leads.iter().map(|l| l.to_string()).collect(),
        ..Project::default()
    }
}

pub fn tagged(mut p: Project, tags: &[&str]) -> Project {
    let weight = if tags.is_empty() {
        0.0
    } else {
        1.0 / tags.len() as f64
    };
    p.tags = tags
        .iter()
        .map(|t| WeightedItem {
            key: t.to_string(),
            weight,
        })
        .collect();
    p
}
