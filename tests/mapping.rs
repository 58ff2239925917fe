//! End-to-end tests: JSON rows in, verdicts, summary and suggestions out.

use titlecheck::{
    Error, MatchFilter, MatchOptions, Summary, check_rows, rows_from_json, suggest_correction,
};

const ROWS: &str = r#"[
    {"id": 1, "title": "Сок яблочный 1 литр", "matched_csv_title": "1л сок яблочный"},
    {"id": 2, "title": "Хлеб белый", "matched_csv_title": "Хлеб черный"},
    {"id": 3, "title": "Кефир 2.5%", "matched_csv_title": "Кефир 2,5 %", "price": 89.9},
    {"id": 4, "title": "Сахар 1 кг.", "matched_csv_title": null},
    {"id": 5, "matched_csv_title": "Кофе"}
]"#;

const REFERENCE: &[&str] = &[
    "Хлеб черный",
    "Хлеб белый нарезной",
    "Сахар-песок 1кг",
    "Молоко 1л 3.2%",
];

#[test]
fn classify_rows_from_json() {
    let rows = rows_from_json(ROWS).unwrap();
    let checks = check_rows(&rows, &MatchOptions::default());

    let flags: Vec<bool> = checks.iter().map(|c| c.is_match).collect();
    assert_eq!(flags, vec![true, false, true, false, false]);

    assert_eq!(checks[3].matched, "");
    assert_eq!(checks[4].expected, "");
    assert_eq!(checks[0].normalized_expected, "1л сок яблочный");
}

#[test]
fn summary_and_filter() {
    let rows = rows_from_json(ROWS).unwrap();
    let checks = check_rows(&rows, &MatchOptions::default());

    let summary = Summary::from_checks(&checks);
    assert_eq!(summary.total, 5);
    assert_eq!(summary.matched, 2);
    assert_eq!(summary.mismatched, 3);
    assert_eq!(summary.match_percent(), 40.0);

    let failing: Vec<&str> = MatchFilter::Mismatched
        .apply(&checks)
        .iter()
        .map(|c| c.expected.as_str())
        .collect();
    assert_eq!(failing, vec!["Хлеб белый", "Сахар 1 кг.", ""]);
}

#[test]
fn suggestions_for_mismatches() {
    let rows = rows_from_json(ROWS).unwrap();
    let opts = MatchOptions::default();
    let checks = check_rows(&rows, &opts);

    let fixes: Vec<Option<String>> = checks
        .iter()
        .map(|c| suggest_correction(c, REFERENCE, &opts).map(|m| m.title))
        .collect();

    assert_eq!(
        fixes,
        vec![
            None,
            Some("Хлеб белый нарезной".to_owned()),
            None,
            Some("Сахар-песок 1кг".to_owned()),
            None,
        ]
    );
}

#[test]
fn options_loaded_from_json() {
    let opts: MatchOptions =
        serde_json::from_str(r#"{"expected_key": "matched_csv_title", "matched_key": "title"}"#)
            .unwrap();
    let rows = rows_from_json(ROWS).unwrap();
    let checks = check_rows(&rows, &opts);

    // Swapping the keys swaps the columns but not the verdicts.
    assert_eq!(checks[1].expected, "Хлеб черный");
    assert!(checks[0].is_match);
    assert!(!checks[1].is_match);
}

#[test]
fn malformed_payloads() {
    assert!(matches!(rows_from_json("not json"), Err(Error::Json(_))));
    assert!(matches!(
        rows_from_json("42"),
        Err(Error::NotAnArray { found: "number" })
    ));
    assert!(matches!(
        rows_from_json(r#"[{"title": "a"}, "b"]"#),
        Err(Error::RowNotObject { index: 1 })
    ));
}
