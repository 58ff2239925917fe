//! Field access on loosely-typed mapping rows.
//!
//! Rows come from outside as "a bag of fields": the two titles live next to
//! arbitrary extra data, and there is no fixed schema. [`FieldSource`] is the
//! capability the checker needs from such a row: look a field up by name and
//! get a string back, with missing values coerced to `""`.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Error, Result};

/// A row as parsed from JSON: field name -> untyped value, in input order.
pub type Row = Map<String, Value>;

/// Capability for reading a named field of a row as a string.
///
/// Implementations must never fail: an absent or null field reads as `""`.
///
/// # Built-in Implementations
///
/// - [`Row`] (`serde_json::Map<String, Value>`)
/// - [`Value`] -- objects delegate to the map, anything else has no fields
/// - [`HashMap<String, String>`] and [`BTreeMap<String, String>`]
/// - `&T` for any `T: FieldSource`
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use titlecheck::FieldSource;
///
/// let mut row = HashMap::new();
/// row.insert("title".to_owned(), "Хлеб".to_owned());
/// assert_eq!(row.extract_field("title"), "Хлеб");
/// assert_eq!(row.extract_field("missing"), "");
/// ```
pub trait FieldSource {
    /// Returns the value of `key` as a string, or `""` when absent.
    fn extract_field(&self, key: &str) -> Cow<'_, str>;
}

/// String form of a JSON value: null is empty, strings are verbatim and
/// everything else is its JSON text.
fn value_to_field(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

impl FieldSource for Map<String, Value> {
    fn extract_field(&self, key: &str) -> Cow<'_, str> {
        self.get(key).map_or(Cow::Borrowed(""), value_to_field)
    }
}

impl FieldSource for Value {
    fn extract_field(&self, key: &str) -> Cow<'_, str> {
        match self {
            Value::Object(map) => map.extract_field(key),
            _ => Cow::Borrowed(""),
        }
    }
}

impl<S: BuildHasher> FieldSource for HashMap<String, String, S> {
    fn extract_field(&self, key: &str) -> Cow<'_, str> {
        self.get(key).map_or(Cow::Borrowed(""), |v| Cow::Borrowed(v.as_str()))
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn extract_field(&self, key: &str) -> Cow<'_, str> {
        self.get(key).map_or(Cow::Borrowed(""), |v| Cow::Borrowed(v.as_str()))
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn extract_field(&self, key: &str) -> Cow<'_, str> {
        (**self).extract_field(key)
    }
}

/// Read `key` from `row` as an owned string.
///
/// Free-function form of [`FieldSource::extract_field`].
///
/// # Examples
///
/// ```
/// use titlecheck::row::extract_field;
///
/// let row = serde_json::json!({ "title": "Кефир", "sku": 1042, "note": null });
/// assert_eq!(extract_field(&row, "title"), "Кефир");
/// assert_eq!(extract_field(&row, "sku"), "1042");
/// assert_eq!(extract_field(&row, "note"), "");
/// ```
pub fn extract_field<R: FieldSource + ?Sized>(row: &R, key: &str) -> String {
    row.extract_field(key).into_owned()
}

/// Field names of the first row, in input order.
///
/// Returns an empty vector when there are no rows.
pub fn detect_keys(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a JSON array of objects into rows.
///
/// # Errors
///
/// - [`Error::Json`] when `text` is not valid JSON
/// - [`Error::NotAnArray`] when the top-level value is not an array
/// - [`Error::RowNotObject`] when an element is not an object
///
/// # Examples
///
/// ```
/// use titlecheck::row::{detect_keys, rows_from_json};
///
/// let rows = rows_from_json(r#"[{"title": "Чай", "matched_csv_title": "Чай черный"}]"#).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(detect_keys(&rows), vec!["title", "matched_csv_title"]);
///
/// assert!(rows_from_json(r#"{"title": "Чай"}"#).is_err());
/// ```
pub fn rows_from_json(text: &str) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(text)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            let found = json_kind(&other);
            warn!(found, "rejected row payload: not an array");
            return Err(Error::NotAnArray { found });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => {
                warn!(index, "rejected row payload: element is not an object");
                Err(Error::RowNotObject { index })
            }
        })
        .collect()
}
