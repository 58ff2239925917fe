//! Strict comparison and weighted token-overlap scoring of titles.
//!
//! Two ways of comparing titles are offered:
//!
//! - [`are_similar`] is a yes/no verdict: both titles must normalize to the
//!   same multiset of tokens.
//! - [`similarity_score`] is a weighted Jaccard index in `[0.0, 1.0]` over
//!   the token multisets, where tokens carrying a digit or `%` weigh 2 and all
//!   other tokens weigh 1.
//!
//! [`find_best_match`] uses the score to pick the closest reference title
//! from a candidate list.

use std::collections::HashMap;

use crate::normalize::{TokenOrder, UnitRules, normalize_with};

/// Weight of one occurrence of `token` in the overlap score.
///
/// Quantity-bearing tokens (any numeric character or `%`) weigh 2, plain
/// words weigh 1.
///
/// # Examples
///
/// ```
/// use titlecheck::token_weight;
///
/// assert_eq!(token_weight("молоко"), 1);
/// assert_eq!(token_weight("1л"), 2);
/// assert_eq!(token_weight("20%"), 2);
/// ```
pub fn token_weight(token: &str) -> u32 {
    if token.chars().any(|c| c.is_numeric() || c == '%') {
        2
    } else {
        1
    }
}

/// A title normalized once into a token -> accumulated weight bag.
///
/// Scoring many candidates against the same title only needs the title
/// prepared a single time; [`find_best_match_with`] relies on this.
///
/// # Examples
///
/// ```
/// use titlecheck::{PreparedTitle, UnitRules};
///
/// let a = PreparedTitle::new("Сок яблочный 1л", UnitRules::Full);
/// let b = PreparedTitle::new("Сок грушевый 1л", UnitRules::Full);
/// // shared: "сок" (1) + "1л" (2); union adds "яблочный" (1) and "грушевый" (1)
/// assert_eq!(a.score(&b), 3.0 / 5.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedTitle {
    weights: HashMap<String, u32>,
}

impl PreparedTitle {
    /// Normalize `title` with `rules` and accumulate its token weights.
    pub fn new(title: &str, rules: UnitRules) -> Self {
        Self::from_tokens(normalize_with(title, rules, TokenOrder::Original))
    }

    /// Build a bag from already-normalized tokens.
    ///
    /// Repeated tokens accumulate their weight once per occurrence.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut weights: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            let weight = token_weight(&token);
            *weights.entry(token).or_insert(0) += weight;
        }
        Self { weights }
    }

    /// Returns `true` when the title produced no tokens.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Accumulated weight of `token`, or 0 when absent.
    pub fn weight(&self, token: &str) -> u32 {
        self.weights.get(token).copied().unwrap_or(0)
    }

    /// Weighted Jaccard index between `self` and `other`.
    ///
    /// Sums `min(weight)` over all distinct tokens of both sides
    /// (intersection mass) and `max(weight)` over the same tokens (union
    /// mass). Returns 0 when either side is empty.
    pub fn score(&self, other: &PreparedTitle) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }

        let mut intersection: u32 = 0;
        let mut union: u32 = 0;

        for (token, &weight) in &self.weights {
            let theirs = other.weight(token);
            intersection += weight.min(theirs);
            union += weight.max(theirs);
        }
        // Tokens only `other` has contribute their full weight to the union.
        for (token, &weight) in &other.weights {
            if !self.weights.contains_key(token) {
                union += weight;
            }
        }

        if union == 0 {
            0.0
        } else {
            f64::from(intersection) / f64::from(union)
        }
    }
}

/// The outcome of a best-match search.
///
/// `title` is empty and `score` is 0 when nothing scored above zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestMatch {
    /// The winning candidate, verbatim as supplied.
    pub title: String,
    /// Its weighted overlap score in `[0.0, 1.0]`.
    pub score: f64,
}

impl BestMatch {
    /// Returns `true` when a candidate was found (score above zero).
    pub fn is_found(&self) -> bool {
        self.score > 0.0
    }
}

/// Strict comparison of two titles with an explicit unit rule set.
///
/// Both titles are normalized into sorted tokens; the verdict is `true`
/// only when the sequences have the same length and equal tokens at every
/// position.
pub fn are_similar_with(a: &str, b: &str, rules: UnitRules) -> bool {
    let na = normalize_with(a, rules, TokenOrder::Sorted);
    let nb = normalize_with(b, rules, TokenOrder::Sorted);

    if na.len() != nb.len() {
        return false;
    }
    na.iter().zip(&nb).all(|(x, y)| x == y)
}

/// Strict comparison of two titles using the full unit rule set.
///
/// Token order does not matter, every token must be present on both sides
/// the same number of times.
///
/// # Examples
///
/// ```
/// use titlecheck::are_similar;
///
/// assert!(are_similar("Сок яблочный 1л", "1л яблочный сок"));
/// assert!(!are_similar("Сок яблочный 1л", "Сок яблочный 2л"));
/// ```
pub fn are_similar(a: &str, b: &str) -> bool {
    are_similar_with(a, b, UnitRules::Full)
}

/// Weighted overlap score of two titles with an explicit unit rule set.
pub fn similarity_score_with(a: &str, b: &str, rules: UnitRules) -> f64 {
    PreparedTitle::new(a, rules).score(&PreparedTitle::new(b, rules))
}

/// Weighted overlap score of two titles using the full unit rule set.
///
/// Returns a value in `[0.0, 1.0]`: 1 for titles with identical token
/// multisets, 0 when nothing is shared or either title has no tokens.
///
/// # Examples
///
/// ```
/// use titlecheck::similarity_score;
///
/// let score = similarity_score("Кофе растворимый 200г", "Кофе растворимый 190г");
/// assert!((score - 1.0 / 3.0).abs() < 1e-12);
///
/// assert_eq!(similarity_score("Чай", "Чай"), 1.0);
/// assert_eq!(similarity_score("", "Чай"), 0.0);
/// ```
pub fn similarity_score(a: &str, b: &str) -> f64 {
    similarity_score_with(a, b, UnitRules::Full)
}

/// Find the candidate scoring highest against `title`, with an explicit unit
/// rule set.
///
/// The title is normalized once. A candidate replaces the current best only
/// when its score is strictly greater, so among equal scores the earliest
/// candidate wins. Candidates that all score 0 (or an empty list) yield
/// [`BestMatch::default`].
pub fn find_best_match_with<I, S>(title: &str, candidates: I, rules: UnitRules) -> BestMatch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let query = PreparedTitle::new(title, rules);
    let mut best = BestMatch::default();

    if query.is_empty() {
        return best;
    }

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = query.score(&PreparedTitle::new(candidate, rules));
        if score > best.score {
            best = BestMatch {
                title: candidate.to_owned(),
                score,
            };
        }
    }

    best
}

/// Find the candidate scoring highest against `title`, using the full unit
/// rule set.
///
/// # Examples
///
/// ```
/// use titlecheck::find_best_match;
///
/// let best = find_best_match(
///     "Хлеб белый",
///     ["Хлеб черный", "Хлеб белый нарезной", "Молоко"],
/// );
/// assert_eq!(best.title, "Хлеб белый нарезной");
///
/// let none = find_best_match("Хлеб белый", Vec::<String>::new());
/// assert_eq!(none.title, "");
/// assert_eq!(none.score, 0.0);
/// ```
pub fn find_best_match<I, S>(title: &str, candidates: I) -> BestMatch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    find_best_match_with(title, candidates, UnitRules::Full)
}
