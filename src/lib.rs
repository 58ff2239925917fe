#![warn(missing_docs)]

//! Product title normalization and matching.
//!
//! `titlecheck` verifies mappings between an expected product title and a
//! title matched from another catalog. Titles are canonicalized into tokens
//! (unit words shortened, quantities joined, punctuation dropped), then
//! compared either strictly or with a weighted token-overlap score that
//! also drives best-candidate search over a reference list.

/// Title canonicalization into comparable tokens.
pub mod normalize;

/// Strict comparison, weighted scoring and best-match search.
pub mod score;

/// Configuration options for mapping checks.
pub mod options;

/// Field access on loosely-typed mapping rows.
pub mod row;

/// Verification of existing title mappings.
pub mod check;

/// Errors raised while ingesting row data.
pub mod error;

// Re-export primary public API types and functions at the crate root.
pub use check::{MappingCheck, MatchFilter, Summary, check_row, check_rows, suggest_correction};
pub use error::{Error, Result};
pub use normalize::{
    TokenOrder, UnitRules, normalize, normalize_sorted, normalize_title, normalize_with,
    normalized_text,
};
pub use options::MatchOptions;
pub use row::{FieldSource, Row, rows_from_json};
pub use score::{
    BestMatch, PreparedTitle, are_similar, are_similar_with, find_best_match,
    find_best_match_with, similarity_score, similarity_score_with, token_weight,
};
