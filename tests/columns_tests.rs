use portfolio_lens::data::columns::{
    index_to_label, is_column_label, label_to_index, parse_range_ref, ColumnRange, ColumnSet,
    RowSpan,
};

#[test]
fn label_round_trip_covers_two_letter_columns() {
    for i in 1..=702 {
        assert_eq!(label_to_index(&index_to_label(i)), i, "index {i}");
    }
}

#[test]
fn known_labels_decode() {
    assert_eq!(label_to_index("A"), 1);
    assert_eq!(label_to_index("Z"), 26);
    assert_eq!(label_to_index("AA"), 27);
    assert_eq!(label_to_index("AE"), 31);
    assert_eq!(label_to_index("ZZ"), 702);
    assert_eq!(label_to_index("CC"), 81);
    assert_eq!(index_to_label(703), "AAA");
    assert_eq!(index_to_label(0), "");
}

#[test]
fn range_expands_inclusively_in_order() {
    let leads = ColumnRange::new("AN", "BB").columns();
    assert_eq!(leads.len(), 15);
    assert_eq!(leads.first().map(String::as_str), Some("AN"));
    assert_eq!(leads.last().map(String::as_str), Some("BB"));
    assert!(leads.contains(&"AZ".to_string()));
    assert!(leads.contains(&"BA".to_string()));

    let status = ColumnRange::new("BK", "BO").columns();
    assert_eq!(status, vec!["BK", "BL", "BM", "BN", "BO"]);
}

#[test]
fn explicit_column_list_is_kept_verbatim() {
    let set = ColumnSet::List(vec!["I".into(), "AE".into(), "K".into()]);
    assert_eq!(set.columns(), vec!["I", "AE", "K"]);
}

#[test]
fn range_reference_parsing() {
    assert_eq!(
        parse_range_ref("A1:CC40"),
        Some(RowSpan {
            start_row: 1,
            end_row: 40
        })
    );
    assert_eq!(parse_range_ref("B5:D9").map(|s| s.data_rows()), Some(5..=9));
    assert_eq!(parse_range_ref("A1:CC40").map(|s| s.data_rows()), Some(2..=40));
    assert_eq!(parse_range_ref("A1"), None);
    assert_eq!(parse_range_ref(""), None);
    assert_eq!(parse_range_ref("garbage"), None);
}

#[test]
fn column_labels_are_upper_case_letters_only() {
    for ok in ["A", "BK", "CC", "ZZZ"] {
        assert!(is_column_label(ok), "{ok}");
    }
    for bad in ["", "a", "an", "A1", "1", "ZZZZ", " B"] {
        assert!(!is_column_label(bad), "{bad:?}");
    }
}
