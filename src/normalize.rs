//! Title canonicalization into comparable tokens.
//!
//! A raw product title such as `"Молоко 1 Литр 3.2 %"` carries the same
//! information as `"молоко 1л 3,2%"`. [`normalize_with`] runs a fixed pipeline
//! of rewrite steps over the whole string so that both spellings produce the
//! same token sequence:
//!
//! 1. NFC composition, lowercasing and trimming
//! 2. `ё` -> `е`
//! 3. unit words and dotted abbreviations -> short unit forms
//! 4. `<digit> <unit>` -> `<digit><unit>`
//! 5. whitespace before `%` removed
//! 6. every run of non letter/digit/`%` characters -> one space
//! 7. split on whitespace, optionally sort
//!
//! Every token of the output consists only of Unicode letters, Unicode digits
//! and `%`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Which unit-of-measure rewrites the normalizer applies.
///
/// The minimal set only knows litres; the full set also knows millilitres,
/// grams and kilograms. [`UnitRules::Full`] is the default.
///
/// # Examples
///
/// ```
/// use titlecheck::{TokenOrder, UnitRules, normalize_with};
///
/// let full = normalize_with("Сыр 200 грамм", UnitRules::Full, TokenOrder::Original);
/// assert_eq!(full, vec!["сыр", "200г"]);
///
/// let minimal = normalize_with("Сыр 200 грамм", UnitRules::Minimal, TokenOrder::Original);
/// assert_eq!(minimal, vec!["сыр", "200", "грамм"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitRules {
    /// Litres only (`литр`, `л.` -> `л`).
    Minimal,
    /// Litres, millilitres, grams and kilograms.
    #[default]
    Full,
}

/// Ordering of the produced tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TokenOrder {
    /// Tokens in the order they appear in the title (scoring and display).
    #[default]
    Original,
    /// Tokens sorted lexicographically (strict comparison).
    Sorted,
}

/// A unit rewrite: `pattern` is replaced by `replacement`.
///
/// Patterns capture the preceding non-letter character (or start of input)
/// in group 1 so a unit word is only rewritten when it starts a word, never
/// in the middle of one (`тигр.` keeps its `гр.`).
struct UnitRule {
    pattern: Regex,
    replacement: &'static str,
}

impl UnitRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("unit rule regex is valid"),
            replacement,
        }
    }
}

/// Millilitres and kilograms come before litres and grams so the longer
/// words are consumed first.
static FULL_UNIT_RULES: LazyLock<Vec<UnitRule>> = LazyLock::new(|| {
    vec![
        UnitRule::new(r"(^|[^\p{L}])(?:миллилитр(?:ов|а|ы)?\b|мл\.)", "${1}мл"),
        UnitRule::new(r"(^|[^\p{L}])(?:килограмм(?:ов|а|ы)?\b|кг\.)", "${1}кг"),
        UnitRule::new(r"(^|[^\p{L}])(?:грамм(?:ов|а|ы)?\b|гр\.)", "${1}г"),
        UnitRule::new(r"(^|[^\p{L}])(?:литр(?:ов|а|ы)?\b|л\.)", "${1}л"),
    ]
});

static MINIMAL_UNIT_RULES: LazyLock<Vec<UnitRule>> = LazyLock::new(|| {
    vec![UnitRule::new(
        r"(^|[^\p{L}])(?:литр(?:ов|а|ы)?\b|л\.)",
        "${1}л",
    )]
});

/// Digit, optional whitespace, then a unit that ends at a word boundary.
static FULL_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*(мл|кг|л|г)\b").expect("quantity regex is valid"));

static MINIMAL_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*(л)\b").expect("quantity regex is valid"));

/// Whitespace before `%` only; text after the sign stays a separate token.
static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+%").expect("percent regex is valid"));

static NON_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}%]+").expect("separator regex is valid"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("separator regex is valid"));

impl UnitRules {
    fn rules(self) -> &'static [UnitRule] {
        match self {
            UnitRules::Minimal => &MINIMAL_UNIT_RULES,
            UnitRules::Full => &FULL_UNIT_RULES,
        }
    }

    fn quantity(self) -> &'static Regex {
        match self {
            UnitRules::Minimal => &MINIMAL_QUANTITY,
            UnitRules::Full => &FULL_QUANTITY,
        }
    }
}

/// Run `re.replace_all` over an owned string, keeping the original
/// allocation when nothing matched.
fn replace_owned(s: String, re: &Regex, replacement: &str) -> String {
    let replaced = match re.replace_all(&s, replacement) {
        Cow::Owned(out) => Some(out),
        Cow::Borrowed(_) => None,
    };
    replaced.unwrap_or(s)
}

/// Lowercase and trim `title`, composing it to NFC first so a decomposed
/// `е` + U+0308 is seen as `ё` by the later steps.
fn lower_trimmed(title: &str) -> String {
    let composed: Cow<'_, str> = if title.is_ascii() {
        Cow::Borrowed(title)
    } else {
        Cow::Owned(title.nfc().collect())
    };
    composed.to_lowercase().trim().to_owned()
}

/// Rewrite `s` up to (and including) the separator step, leaving a string
/// whose whitespace-separated fragments are the final tokens.
fn canonicalize(title: &str, rules: UnitRules) -> String {
    let mut t = lower_trimmed(title);

    if memchr::memmem::find(t.as_bytes(), "ё".as_bytes()).is_some() {
        t = t.replace('ё', "е");
    }

    for rule in rules.rules() {
        t = replace_owned(t, &rule.pattern, rule.replacement);
    }

    t = replace_owned(t, rules.quantity(), "${1}${2}");

    if memchr::memchr(b'%', t.as_bytes()).is_some() {
        t = replace_owned(t, &PERCENT, "%");
    }

    replace_owned(t, &NON_TOKEN, " ")
}

/// Normalize a title with an explicit unit rule set and token order.
///
/// Empty, whitespace-only and punctuation-only titles yield an empty vector.
/// The function is pure: identical inputs always give identical outputs.
///
/// # Arguments
///
/// * `title` - The raw title
/// * `rules` - Which unit rewrites to apply
/// * `order` - Whether to keep title order or sort the tokens
///
/// # Examples
///
/// ```
/// use titlecheck::{TokenOrder, UnitRules, normalize_with};
///
/// let tokens = normalize_with("Молоко 1 Л 3.2%", UnitRules::Full, TokenOrder::Sorted);
/// assert_eq!(tokens, vec!["1л", "2%", "3", "молоко"]);
/// ```
pub fn normalize_with(title: &str, rules: UnitRules, order: TokenOrder) -> Vec<String> {
    if title.is_empty() {
        return Vec::new();
    }

    let canonical = canonicalize(title, rules);
    let mut tokens: Vec<String> = canonical.split_whitespace().map(str::to_owned).collect();

    if order == TokenOrder::Sorted {
        tokens.sort_unstable();
    }
    tokens
}

/// Normalize a title into tokens in their original order, using the full
/// unit rule set.
///
/// This is the form used for weighted scoring and for display.
///
/// # Examples
///
/// ```
/// use titlecheck::normalize;
///
/// assert_eq!(normalize("Сок Яблочный, 1 литр"), vec!["сок", "яблочный", "1л"]);
/// assert!(normalize("").is_empty());
/// assert!(normalize("?!...").is_empty());
/// ```
pub fn normalize(title: &str) -> Vec<String> {
    normalize_with(title, UnitRules::Full, TokenOrder::Original)
}

/// Normalize a title into lexicographically sorted tokens, using the full
/// unit rule set.
///
/// Two titles with the same tokens in a different order produce the same
/// output, which is what strict comparison relies on.
///
/// # Examples
///
/// ```
/// use titlecheck::normalize_sorted;
///
/// assert_eq!(
///     normalize_sorted("Сок яблочный 1л"),
///     normalize_sorted("1 л яблочный сок"),
/// );
/// ```
pub fn normalize_sorted(title: &str) -> Vec<String> {
    normalize_with(title, UnitRules::Full, TokenOrder::Sorted)
}

/// Space-joined sorted tokens of `title`, for showing next to the raw title.
///
/// # Examples
///
/// ```
/// use titlecheck::{UnitRules, normalized_text};
///
/// assert_eq!(normalized_text("Кефир 2.5 %, 900 мл.", UnitRules::Full), "2 5% 900мл кефир");
/// ```
pub fn normalized_text(title: &str, rules: UnitRules) -> String {
    normalize_with(title, rules, TokenOrder::Sorted).join(" ")
}

/// Plain display normalization without unit or percent rules.
///
/// Lowercases, replaces every run of non letter/digit characters (including
/// `%`) with one space, collapses whitespace and trims.
///
/// # Examples
///
/// ```
/// use titlecheck::normalize_title;
///
/// assert_eq!(normalize_title("  Кофе -- Арабика (250 г) "), "кофе арабика 250 г");
/// ```
pub fn normalize_title(value: &str) -> String {
    let lowered = value.to_lowercase();
    let replaced = NON_WORD.replace_all(lowered.trim(), " ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
