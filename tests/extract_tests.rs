mod common;

use common::*;
use portfolio_lens::data::extract::collect_weighted;
use portfolio_lens::data::layout::DEFAULT_SHEET_NAME;
use portfolio_lens::views::{self, CountBy};
use portfolio_lens::{
    extract, extract_with_layout, Filter, Sheet, SheetLayout, WeightedItem, Workbook,
};

fn tag_columns() -> Vec<String> {
    TAG_HEADERS.iter().map(|(c, _)| c.to_string()).collect()
}

#[test]
fn weights_split_evenly_over_positive_columns() {
    let mut sheet = sheet_with_headers(2);
    sheet.set_cell("I", 2, num(1.0));
    sheet.set_cell("O", 2, num(3.0));
    sheet.set_cell("AI", 2, text("2"));
    sheet.set_cell("K", 2, num(0.0));
    sheet.set_cell("N", 2, num(-1.0));

    let items = collect_weighted(&sheet, 2, &tag_columns());
    assert_eq!(items.len(), 3);
    for item in &items {
        assert!(approx(item.weight, 1.0 / 3.0));
    }
    assert!(approx(items.iter().map(|i| i.weight).sum::<f64>(), 1.0));

    let keys: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "Command and Energy Management",
            "Energy Conversion",
            "Power Tools & Analytics"
        ]
    );
}

#[test]
fn all_zero_row_emits_nothing() {
    let mut sheet = sheet_with_headers(2);
    for (col, _) in TAG_HEADERS {
        sheet.set_cell(col, 2, num(0.0));
    }
    sheet.set_cell("R", 2, text("n/a"));
    assert!(collect_weighted(&sheet, 2, &tag_columns()).is_empty());
}

#[test]
fn header_falls_back_to_column_label() {
    let mut sheet = Sheet::new(Some("A1:CC2".into()));
    sheet.set_cell("I", 2, num(1.0));
    let items = collect_weighted(&sheet, 2, &tag_columns());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].key, "I");
    assert!(approx(items[0].weight, 1.0));
}

#[test]
fn unnamed_excluded_rows_are_dropped_named_rows_kept() {
    let mut sheet = sheet_with_headers(4);
    // row 2: not included, no name -> dropped
    sheet.set_cell("A", 2, text("no"));
    sheet.set_cell("B", 2, num(2015.0));
    // row 3: not included but named -> kept
    sheet.set_cell("C", 3, text("13AB-01: Named project (NP)"));
    // row 4: included, no name -> kept
    sheet.set_cell("A", 4, text(" Yes "));

    let projects = extract(&workbook_of(sheet));
    assert_eq!(projects.len(), 2);
    assert!(!projects[0].include);
    assert_eq!(projects[0].project_title.as_deref(), Some("Named project"));
    assert!(projects[1].include);
    assert_eq!(projects[1].project_name, None);
    assert_eq!(projects[1].project_title, None);
}

#[test]
fn only_first_marked_status_is_recorded() {
    let mut sheet = sheet_with_headers(2);
    sheet.set_cell("A", 2, num(1.0));
    sheet.set_cell("BL", 2, num(1.0));
    sheet.set_cell("BN", 2, num(1.0));

    let projects = extract(&workbook_of(sheet));
    assert_eq!(projects[0].status.as_deref(), Some("Success past 5years"));
}

#[test]
fn transition_tags_and_partners_cover_their_exact_ranges() {
    let mut sheet = sheet_with_headers(2);
    sheet.set_cell("BC", 1, text("Before tags"));
    sheet.set_cell("BD", 1, text("TT1"));
    sheet.set_cell("BJ", 1, text("TT7"));
    sheet.set_cell("BP", 1, text("P1"));
    sheet.set_cell("CC", 1, text("P14"));
    sheet.set_cell("CD", 1, text("After partners"));

    sheet.set_cell("A", 2, num(1.0));
    for col in ["BC", "BD", "BJ", "BK", "BP", "CC", "CD"] {
        sheet.set_cell(col, 2, num(1.0));
    }

    fn keys(items: &[WeightedItem]) -> Vec<&str> {
        items.iter().map(|i| i.key.as_str()).collect()
    }

    let p = &extract(&workbook_of(sheet))[0];
    assert_eq!(keys(&p.transition_tags), vec!["TT1", "TT7"]);
    assert_eq!(keys(&p.transition_partners), vec!["P1", "P14"]);
    assert!(p
        .transition_tags
        .iter()
        .chain(&p.transition_partners)
        .all(|i| approx(i.weight, 0.5)));
}

#[test]
fn leads_are_columns_equal_to_one() {
    let mut sheet = sheet_with_headers(2);
    sheet.set_cell("A", 2, num(1.0));
    sheet.set_cell("AN", 2, num(1.0));
    sheet.set_cell("AO", 2, num(2.0));
    sheet.set_cell("AP", 2, text("1"));

    let projects = extract(&workbook_of(sheet));
    assert_eq!(projects[0].project_leads, vec!["Alice", "Carol"]);
}

#[test]
fn numeric_fields_coerce_without_failing() {
    let mut sheet = sheet_with_headers(2);
    sheet.set_cell("A", 2, text("x"));
    sheet.set_cell("B", 2, text("soon"));
    sheet.set_cell("D", 2, text("lots"));
    sheet.set_cell("BK", 2, text("?"));
    sheet.set_cell("BM", 2, num(3.0));

    let p = &extract(&workbook_of(sheet))[0];
    assert_eq!(p.start_year, None);
    assert_eq!(p.funding_millions, None);
    assert_eq!(p.transition_success, 0.0);
    assert_eq!(p.transition_none_yet, 3.0);
    assert!(p.tags.is_empty());
}

#[test]
fn hex_year_text_decodes_and_infinite_funding_is_absent() {
    let mut sheet = sheet_with_headers(2);
    sheet.set_cell("A", 2, num(1.0));
    sheet.set_cell("B", 2, text("0x7E0"));
    sheet.set_cell("D", 2, text("Infinity"));

    let p = &extract(&workbook_of(sheet))[0];
    assert_eq!(p.start_year, Some(2016));
    assert_eq!(p.funding_millions, None);
}

#[test]
fn missing_or_malformed_range_yields_no_projects() {
    let mut sheet = sheet_with_headers(3);
    sheet.set_cell("A", 2, num(1.0));
    sheet.range_ref = None;
    assert!(extract(&workbook_of(sheet.clone())).is_empty());

    sheet.range_ref = Some("A1".into());
    assert!(extract(&workbook_of(sheet)).is_empty());

    assert!(extract(&Workbook::default()).is_empty());
}

#[test]
fn data_rows_start_after_header_and_declared_start() {
    let mut sheet = sheet_with_headers(5);
    for row in 2..=5 {
        sheet.set_cell("A", row, num(1.0));
        sheet.set_cell("B", row, num(2010.0 + f64::from(row)));
    }
    sheet.range_ref = Some("A4:CC5".into());

    let years: Vec<_> = extract(&workbook_of(sheet))
        .iter()
        .map(|p| p.start_year)
        .collect();
    assert_eq!(years, vec![Some(2014), Some(2015)]);
}

#[test]
fn preferred_sheet_wins_over_first_sheet() {
    let mut other = sheet_with_headers(2);
    other.set_cell("C", 2, text("Decoy"));
    let mut main = sheet_with_headers(2);
    main.set_cell("C", 2, text("Real"));

    let mut wb = Workbook::default();
    wb.push_sheet("Summary", other.clone());
    wb.push_sheet(DEFAULT_SHEET_NAME, main);
    assert_eq!(extract(&wb)[0].project_name.as_deref(), Some("Real"));

    let mut wb = Workbook::default();
    wb.push_sheet("Summary", other);
    assert_eq!(extract(&wb)[0].project_name.as_deref(), Some("Decoy"));
}

#[test]
fn layout_override_moves_columns() {
    let mut sheet = Sheet::new(Some("A1:Z2".into()));
    sheet.set_cell("Z", 1, text("Year"));
    sheet.set_cell("A", 2, num(1.0));
    sheet.set_cell("Z", 2, num(2019.0));

    let layout = SheetLayout {
        start_year_column: "Z".into(),
        ..SheetLayout::default()
    };
    let projects = extract_with_layout(&workbook_of(sheet), &layout);
    assert_eq!(projects[0].start_year, Some(2019));
}

#[test]
fn single_row_flows_through_every_view() {
    let mut sheet = sheet_with_headers(2);
    sheet.set_cell("A", 2, num(1.0));
    sheet.set_cell("B", 2, num(2016.0));
    sheet.set_cell("C", 2, text("16ZZ-01: Grid buffer (GB) [2016-2019]"));
    sheet.set_cell("D", 2, num(5.0));
    sheet.set_cell("I", 2, num(1.0));
    sheet.set_cell("N", 2, num(1.0));
    sheet.set_cell("AN", 2, num(1.0));
    sheet.set_cell("BK", 2, num(2.0));
    sheet.set_cell("BM", 2, num(0.0));

    let projects = extract(&workbook_of(sheet));
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_leads, vec!["Alice"]);
    assert_eq!(projects[0].status, None);

    let filter = Filter::default();

    let tags = views::tag_aggregates(&projects, &filter);
    assert_eq!(tags.len(), 2);
    for t in &tags {
        assert!(approx(t.total_projects, 0.5));
        assert!(approx(t.total_funding, 2.5));
        assert_eq!(t.success_count, 0.0);
        assert_eq!(t.status, None);
    }

    let leads = views::lead_aggregates(&projects, &filter);
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].project_lead, "Alice");
    assert_eq!(leads[0].sum_none_yet, 0.0);
    assert_eq!(leads[0].sum_success, 2.0);
    assert_eq!(leads[0].success_rate, 1.0);
    assert_eq!(leads[0].total_funding, 5.0);

    let summary = views::yearly_summary(&projects, &filter);
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].year, 2016);
    assert_eq!(summary[0].unique_projects, 1);
    assert!(approx(summary[0].command_energy_mgmt, 0.5));
    assert!(approx(summary[0].distribution, 0.5));
    assert_eq!(summary[0].energy_storage, 0.0);

    let counts = views::yearly_counts(&projects, &filter, CountBy::Status);
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].category, "Unknown");
    assert_eq!(counts[0].count, 1.0);
}
