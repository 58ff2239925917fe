//! Verification of existing title mappings.
//!
//! Each row pairs an expected title with the title that was matched from
//! another catalog. [`check_row`] classifies the pair with the strict
//! comparison, [`Summary`] and [`MatchFilter`] aggregate and select the
//! results, and [`suggest_correction`] proposes a reference title for rows
//! that failed.

use tracing::{debug, trace};

use crate::normalize::normalized_text;
use crate::options::MatchOptions;
use crate::row::FieldSource;
use crate::score::{BestMatch, are_similar_with, find_best_match_with};

/// Verdict for a single mapping row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingCheck {
    /// Raw expected title.
    pub expected: String,
    /// Raw matched title.
    pub matched: String,
    /// Whether both titles normalize to the same tokens.
    pub is_match: bool,
    /// Sorted, space-joined tokens of `expected`.
    pub normalized_expected: String,
    /// Sorted, space-joined tokens of `matched`.
    pub normalized_matched: String,
}

/// Classify one row.
///
/// The titles are read from `options.expected_key` and `options.matched_key`;
/// absent fields compare as empty titles.
///
/// # Examples
///
/// ```
/// use titlecheck::{MatchOptions, check_row};
///
/// let row = serde_json::json!({
///     "title": "Сок яблочный 1 литр",
///     "matched_csv_title": "СОК 1Л ЯБЛОЧНЫЙ",
/// });
/// let check = check_row(&row, &MatchOptions::default());
/// assert!(check.is_match);
/// assert_eq!(check.normalized_expected, "1л сок яблочный");
/// ```
pub fn check_row<R: FieldSource + ?Sized>(row: &R, options: &MatchOptions) -> MappingCheck {
    let expected = row.extract_field(&options.expected_key).into_owned();
    let matched = row.extract_field(&options.matched_key).into_owned();

    MappingCheck {
        is_match: are_similar_with(&expected, &matched, options.unit_rules),
        normalized_expected: normalized_text(&expected, options.unit_rules),
        normalized_matched: normalized_text(&matched, options.unit_rules),
        expected,
        matched,
    }
}

/// Classify every row, preserving row order.
pub fn check_rows<R: FieldSource>(rows: &[R], options: &MatchOptions) -> Vec<MappingCheck> {
    let checks: Vec<MappingCheck> = rows.iter().map(|row| check_row(row, options)).collect();

    let matched = checks.iter().filter(|c| c.is_match).count();
    debug!(
        total = checks.len(),
        matched,
        mismatched = checks.len() - matched,
        "checked mappings"
    );

    checks
}

/// Counts over a set of mapping checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of rows checked.
    pub total: usize,
    /// Rows whose titles matched.
    pub matched: usize,
    /// Rows whose titles did not match.
    pub mismatched: usize,
}

impl Summary {
    /// Tally `checks`.
    pub fn from_checks(checks: &[MappingCheck]) -> Self {
        let matched = checks.iter().filter(|c| c.is_match).count();
        Self {
            total: checks.len(),
            matched,
            mismatched: checks.len() - matched,
        }
    }

    /// Share of matched rows as a percentage in `[0.0, 100.0]`; 0 when there
    /// are no rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use titlecheck::Summary;
    ///
    /// let summary = Summary { total: 4, matched: 3, mismatched: 1 };
    /// assert_eq!(summary.match_percent(), 75.0);
    /// assert_eq!(Summary::default().match_percent(), 0.0);
    /// ```
    pub fn match_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matched as f64 * 100.0 / self.total as f64
    }
}

/// Which mapping checks to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchFilter {
    /// Every check.
    #[default]
    All,
    /// Only checks whose titles matched.
    Matched,
    /// Only checks whose titles did not match.
    Mismatched,
}

impl MatchFilter {
    /// Returns `true` when `check` passes this filter.
    pub fn accepts(&self, check: &MappingCheck) -> bool {
        match self {
            MatchFilter::All => true,
            MatchFilter::Matched => check.is_match,
            MatchFilter::Mismatched => !check.is_match,
        }
    }

    /// Keep the checks that pass this filter, preserving order.
    pub fn apply<'a>(&self, checks: &'a [MappingCheck]) -> Vec<&'a MappingCheck> {
        checks.iter().filter(|c| self.accepts(c)).collect()
    }
}

/// Propose a reference title for a mismatched mapping.
///
/// Searches `candidates` for the best weighted match to the expected title.
/// Returns `None` when the mapping already matches, no candidate scores
/// above zero, or the best score is below `options.fix_threshold`.
///
/// # Examples
///
/// ```
/// use titlecheck::{MatchOptions, check_row, suggest_correction};
///
/// let row = serde_json::json!({
///     "title": "Хлеб белый",
///     "matched_csv_title": "Хлеб черный",
/// });
/// let opts = MatchOptions::default();
/// let check = check_row(&row, &opts);
///
/// let fix = suggest_correction(&check, ["Хлеб черный", "Хлеб белый нарезной"], &opts).unwrap();
/// assert_eq!(fix.title, "Хлеб белый нарезной");
/// ```
pub fn suggest_correction<I, S>(
    check: &MappingCheck,
    candidates: I,
    options: &MatchOptions,
) -> Option<BestMatch>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if check.is_match {
        return None;
    }

    let best = find_best_match_with(&check.expected, candidates, options.unit_rules);
    trace!(
        expected = %check.expected,
        candidate = %best.title,
        score = best.score,
        "best reference candidate"
    );

    if best.is_found() && best.score >= options.fix_threshold {
        Some(best)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::normalize::UnitRules;

    fn pair(expected: &str, matched: &str) -> HashMap<String, String> {
        HashMap::from([
            ("title".to_owned(), expected.to_owned()),
            ("matched_csv_title".to_owned(), matched.to_owned()),
        ])
    }

    // --- check_row ---

    #[test]
    fn matching_pair() {
        let check = check_row(&pair("Сок яблочный 1л", "1л яблочный сок"), &MatchOptions::default());
        assert!(check.is_match);
        assert_eq!(check.expected, "Сок яблочный 1л");
        assert_eq!(check.matched, "1л яблочный сок");
        assert_eq!(check.normalized_expected, check.normalized_matched);
    }

    #[test]
    fn mismatching_pair() {
        let check = check_row(&pair("Сок яблочный 1л", "Сок яблочный 2л"), &MatchOptions::default());
        assert!(!check.is_match);
        assert_eq!(check.normalized_matched, "2л сок яблочный");
    }

    #[test]
    fn missing_fields_are_empty_titles() {
        let row: HashMap<String, String> = HashMap::new();
        let check = check_row(&row, &MatchOptions::default());
        assert!(check.is_match);
        assert_eq!(check.expected, "");
        assert_eq!(check.normalized_expected, "");
    }

    #[test]
    fn custom_keys() {
        let row = HashMap::from([
            ("name".to_owned(), "Чай".to_owned()),
            ("csv".to_owned(), "чай".to_owned()),
        ]);
        let opts = MatchOptions {
            expected_key: "name".to_owned(),
            matched_key: "csv".to_owned(),
            ..Default::default()
        };
        assert!(check_row(&row, &opts).is_match);
    }

    #[test]
    fn rule_set_from_options() {
        let row = pair("Чай 100 гр.", "чай 100г");
        assert!(check_row(&row, &MatchOptions::default()).is_match);

        let minimal = MatchOptions {
            unit_rules: UnitRules::Minimal,
            ..Default::default()
        };
        assert!(!check_row(&row, &minimal).is_match);
    }

    // --- check_rows / Summary / MatchFilter ---

    fn sample_checks() -> Vec<MappingCheck> {
        let rows = vec![
            pair("Молоко 1 л", "молоко 1л"),
            pair("Хлеб белый", "Хлеб черный"),
            pair("Кефир 2.5%", "кефир 2,5 %"),
        ];
        check_rows(&rows, &MatchOptions::default())
    }

    #[test]
    fn check_rows_preserves_order() {
        let checks = sample_checks();
        let flags: Vec<bool> = checks.iter().map(|c| c.is_match).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(checks[1].expected, "Хлеб белый");
    }

    #[test]
    fn summary_counts() {
        let summary = Summary::from_checks(&sample_checks());
        assert_eq!(
            summary,
            Summary {
                total: 3,
                matched: 2,
                mismatched: 1
            }
        );
        assert!((summary.match_percent() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn summary_of_nothing() {
        let summary = Summary::from_checks(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.match_percent(), 0.0);
    }

    #[test]
    fn filters() {
        let checks = sample_checks();
        assert_eq!(MatchFilter::All.apply(&checks).len(), 3);
        assert_eq!(MatchFilter::Matched.apply(&checks).len(), 2);

        let mismatched = MatchFilter::Mismatched.apply(&checks);
        assert_eq!(mismatched.len(), 1);
        assert_eq!(mismatched[0].matched, "Хлеб черный");
    }

    // --- suggest_correction ---

    #[test]
    fn no_suggestion_for_matching_row() {
        let check = check_row(&pair("Хлеб", "хлеб"), &MatchOptions::default());
        assert_eq!(suggest_correction(&check, ["Хлеб"], &MatchOptions::default()), None);
    }

    #[test]
    fn suggestion_respects_threshold() {
        let check = check_row(&pair("Хлеб белый", "Молоко"), &MatchOptions::default());
        let candidates = ["Хлеб черный"];

        // "Хлеб черный" scores 1/3.
        assert_eq!(suggest_correction(&check, candidates, &MatchOptions::default()), None);

        let lenient = MatchOptions {
            fix_threshold: 0.3,
            ..Default::default()
        };
        let fix = suggest_correction(&check, candidates, &lenient).unwrap();
        assert_eq!(fix.title, "Хлеб черный");
    }

    #[test]
    fn zero_threshold_still_needs_overlap() {
        let check = check_row(&pair("Хлеб", "Молоко"), &MatchOptions::default());
        let opts = MatchOptions {
            fix_threshold: 0.0,
            ..Default::default()
        };
        assert_eq!(suggest_correction(&check, ["Кефир"], &opts), None);
        assert_eq!(suggest_correction(&check, Vec::<&str>::new(), &opts), None);
    }
}
