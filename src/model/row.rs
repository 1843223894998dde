//! Row, value and column types
//!
//! Rows carry a dynamic field set. The `id` key is reserved and lives outside
//! the field map so it can never be edited or shadowed by a data column.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Field key reserved for row identity
pub const ID_KEY: &str = "id";

/// A scalar cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// True for null and empty text
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Natural ordering used by the sort stage
    ///
    /// A total order over three classes: numbers (including text that parses
    /// as a finite number, so an edited `"100"` sorts after `35`), then
    /// booleans, then all other text. Null sorts as empty text.
    pub fn cmp_natural(&self, other: &Value) -> Ordering {
        match (self.sort_key(), other.sort_key()) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(&b),
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(&b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn sort_key(&self) -> SortKey<'_> {
        match self {
            Value::Number(n) => SortKey::Number(*n),
            Value::Bool(b) => SortKey::Bool(*b),
            Value::Null => SortKey::Text(""),
            Value::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => SortKey::Number(n),
                _ => SortKey::Text(s.as_str()),
            },
        }
    }
}

/// Comparison class of a value
enum SortKey<'a> {
    Number(f64),
    Bool(bool),
    Text(&'a str),
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Bool(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                // Integral numbers print without a trailing ".0"
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// One record: a unique id plus a dynamic set of fields
///
/// Serializes flat, e.g. `{"id": "1", "name": "Alice", "age": 28}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Row {
    /// Create a row with no fields
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value.into());
        self
    }

    /// Get a field value. The reserved `id` key resolves to the row id.
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == ID_KEY {
            return Some(Value::Text(self.id.clone()));
        }
        self.fields.get(key).cloned()
    }

    /// Display string for a field; missing fields render as empty
    pub fn display(&self, key: &str) -> String {
        if key == ID_KEY {
            return self.id.clone();
        }
        self.fields
            .get(key)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    /// Set a field value. Returns false (and does nothing) for the `id` key.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        if key == ID_KEY {
            return false;
        }
        self.fields.insert(key.to_string(), value);
        true
    }

    /// Whether the row has a value for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        key == ID_KEY || self.fields.contains_key(key)
    }

    /// String representations of every field, id included
    pub fn searchable_values(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.id.clone()).chain(self.fields.values().map(|v| v.to_string()))
    }
}

/// A column descriptor: key, optional display label, visibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub visible: bool,
}

impl Column {
    pub fn new(key: impl Into<String>, label: Option<String>) -> Self {
        Self {
            key: key.into(),
            label: label.filter(|l| !l.is_empty()),
            visible: true,
        }
    }

    /// Header text: label if present, otherwise key
    pub fn header(&self) -> &str {
        match &self.label {
            Some(label) if !label.is_empty() => label,
            _ => &self.key,
        }
    }
}

/// Normalize a user-supplied column key
///
/// Trims, collapses internal whitespace runs into a single underscore and
/// lowercases: `"  Full   Name "` becomes `"full_name"`.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Full Name"), "full_name");
        assert_eq!(normalize_key("  Full   Name  "), "full_name");
        assert_eq!(normalize_key("Dept\tCode"), "dept_code");
        assert_eq!(normalize_key("   "), "");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(28.0).to_string(), "28");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::text("x").to_string(), "x");
    }

    #[test]
    fn test_value_natural_ordering() {
        assert_eq!(
            Value::Number(9.0).cmp_natural(&Value::Number(10.0)),
            Ordering::Less
        );
        assert_eq!(
            Value::text("b").cmp_natural(&Value::text("a")),
            Ordering::Greater
        );
        // Null sorts like empty text
        assert_eq!(Value::Null.cmp_natural(&Value::text("")), Ordering::Equal);
        assert_eq!(Value::Null.cmp_natural(&Value::text("a")), Ordering::Less);
    }

    #[test]
    fn test_numeric_text_compares_as_number() {
        assert_eq!(
            Value::text("100").cmp_natural(&Value::Number(35.0)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Number(9.0).cmp_natural(&Value::text(" 10 ")),
            Ordering::Less
        );
        assert_eq!(
            Value::text("5").cmp_natural(&Value::Number(5.0)),
            Ordering::Equal
        );
        // Numbers come before booleans, booleans before other text
        assert_eq!(
            Value::Number(1e9).cmp_natural(&Value::Bool(false)),
            Ordering::Less
        );
        assert_eq!(
            Value::Bool(true).cmp_natural(&Value::text("abc")),
            Ordering::Less
        );
        assert_eq!(
            Value::text("NaN").cmp_natural(&Value::Number(0.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_natural_ordering_is_transitive_across_kinds() {
        let values = [
            Value::Number(9.0),
            Value::text("10"),
            Value::text("5"),
            Value::Number(10.0),
            Value::Null,
            Value::text("abc"),
            Value::Bool(true),
            Value::text("inf"),
            Value::Number(-0.5),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.cmp_natural(b), b.cmp_natural(a).reverse());
                for c in &values {
                    if a.cmp_natural(b) != Ordering::Greater
                        && b.cmp_natural(c) != Ordering::Greater
                    {
                        assert_ne!(
                            a.cmp_natural(c),
                            Ordering::Greater,
                            "{a:?} <= {b:?} <= {c:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_row_id_is_reserved() {
        let mut row = Row::new("7").with("name", "Gauri M");
        assert!(!row.set(ID_KEY, Value::text("8")));
        assert_eq!(row.id, "7");
        assert_eq!(row.display(ID_KEY), "7");
        assert!(!row.fields.contains_key(ID_KEY));
    }

    #[test]
    fn test_row_serializes_flat() {
        let row = Row::new("1").with("name", "Alice").with("age", 28i64);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1", "name": "Alice", "age": 28.0})
        );

        let back: Row = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_column_header_falls_back_to_key() {
        assert_eq!(Column::new("dept", None).header(), "dept");
        assert_eq!(Column::new("dept", Some(String::new())).header(), "dept");
        assert_eq!(
            Column::new("dept", Some("Department".into())).header(),
            "Department"
        );
    }
}
