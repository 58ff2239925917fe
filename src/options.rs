//! Configuration options for mapping checks.
//!
//! [`MatchOptions`] controls the normalizer's unit rule set, the score a
//! reference title needs before it is offered as a correction, and which row
//! fields hold the two titles being compared.

use serde::{Deserialize, Serialize};

use crate::normalize::UnitRules;

/// Field holding the expected title in the default row layout.
pub const DEFAULT_EXPECTED_KEY: &str = "title";

/// Field holding the matched catalog title in the default row layout.
pub const DEFAULT_MATCHED_KEY: &str = "matched_csv_title";

/// Score a suggestion must reach by default.
pub const DEFAULT_FIX_THRESHOLD: f64 = 0.5;

/// Options that control mapping verification.
///
/// # Defaults
///
/// - `unit_rules`: [`UnitRules::Full`]
/// - `fix_threshold`: `0.5`
/// - `expected_key`: `"title"`
/// - `matched_key`: `"matched_csv_title"`
///
/// Missing fields fall back to these defaults when deserializing.
///
/// # Examples
///
/// ```
/// use titlecheck::{MatchOptions, UnitRules};
///
/// let opts = MatchOptions::default();
/// assert_eq!(opts.unit_rules, UnitRules::Full);
///
/// let opts = MatchOptions { fix_threshold: 0.8, ..Default::default() };
/// assert_eq!(opts.expected_key, "title");
///
/// let opts: MatchOptions = serde_json::from_str(r#"{"unit_rules": "minimal"}"#).unwrap();
/// assert_eq!(opts.unit_rules, UnitRules::Minimal);
/// assert_eq!(opts.fix_threshold, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Unit rewrites applied by the normalizer.
    pub unit_rules: UnitRules,
    /// Minimum weighted score, in `[0.0, 1.0]`, for a reference title to be
    /// suggested as a correction.
    pub fix_threshold: f64,
    /// Row field holding the expected title.
    pub expected_key: String,
    /// Row field holding the title matched from the other catalog.
    pub matched_key: String,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            unit_rules: UnitRules::Full,
            fix_threshold: DEFAULT_FIX_THRESHOLD,
            expected_key: DEFAULT_EXPECTED_KEY.to_owned(),
            matched_key: DEFAULT_MATCHED_KEY.to_owned(),
        }
    }
}
