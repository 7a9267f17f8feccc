use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single field or cell value.
///
/// JSON-facing: `Null` maps to `null`, the rest to the matching scalar,
/// so records round-trip through the API without a wrapper object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The string a text field would hold for this value.
    pub fn to_field_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(v) => v.to_string(),
            Self::Number(v) => v.to_string(),
            Self::Text(v) => v.clone(),
            Self::List(v) => v.join(", "),
        }
    }

    /// Truthiness as a checkbox understands it.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(v) => *v,
            Self::Number(v) => *v != 0,
            Self::Text(v) => {
                matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_field_text())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v)
    }
}

/// Raw-value comparator used by column sorting. Numbers and booleans
/// compare natively, everything else falls back to case-insensitive
/// text. Absent values sort before present ones.
pub fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => sort_text(a).cmp(&sort_text(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn sort_text(value: &Value) -> String {
    match value {
        Value::Text(text) => text.to_lowercase(),
        Value::Number(number) => format!("{number:020}"),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Null => String::new(),
        Value::List(items) => items.join(",").to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, compare_values};
    use std::cmp::Ordering;

    #[test]
    fn json_round_trip() {
        let json = r#"{"title":"Hello","published":true,"views":12,"note":null}"#;
        let parsed: indexmap::IndexMap<String, Value> =
            serde_json::from_str(json).expect("map should parse");
        assert_eq!(parsed["title"], Value::Text("Hello".to_string()));
        assert_eq!(parsed["published"], Value::Bool(true));
        assert_eq!(parsed["views"], Value::Number(12));
        assert_eq!(parsed["note"], Value::Null);
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            compare_values(Some(&Value::Number(9)), Some(&Value::Number(10))),
            Ordering::Less
        );
    }

    #[test]
    fn text_comparison_ignores_case() {
        assert_eq!(
            compare_values(
                Some(&Value::Text("Apple".to_string())),
                Some(&Value::Text("apple".to_string()))
            ),
            Ordering::Equal
        );
    }

    #[test]
    fn absent_sorts_first() {
        assert_eq!(
            compare_values(None, Some(&Value::Number(1))),
            Ordering::Less
        );
    }

    #[test]
    fn checkbox_truthiness() {
        assert!(Value::Text("Yes".to_string()).is_truthy());
        assert!(Value::Number(1).is_truthy());
        assert!(!Value::Text("".to_string()).is_truthy());
        assert!(!Value::Null.is_truthy());
    }
}
