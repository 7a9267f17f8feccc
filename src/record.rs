use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote collection on creation.
pub type RecordId = u64;

/// One resource item. `id` is `None` until the remote collection
/// assigns one and never changes afterwards. Field order follows the
/// order the fields were first seen in.
///
/// The table controller owns the live collection; the form only ever
/// holds a transient copy while editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: RecordId) -> Self {
        Self {
            id: Some(id),
            fields: IndexMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The value shown under `column`, treating `id` as a column of its
    /// own so it can be displayed and sorted like any other.
    pub fn value_of(&self, column: &str) -> Option<Value> {
        if column == "id" {
            return self.id.map(|id| Value::Number(id as i64));
        }
        self.fields.get(column).cloned()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use crate::value::Value;

    #[test]
    fn deserializes_with_flattened_fields() {
        let record: Record =
            serde_json::from_str(r#"{"id":7,"title":"Seven","published":false}"#)
                .expect("record should parse");
        assert_eq!(record.id, Some(7));
        assert_eq!(record.field("title"), Some(&Value::Text("Seven".to_string())));
        assert_eq!(record.field("published"), Some(&Value::Bool(false)));
    }

    #[test]
    fn serializes_without_absent_id() {
        let record = Record::new().set_field("title", "Draft");
        let json = serde_json::to_string(&record).expect("record should serialize");
        assert_eq!(json, r#"{"title":"Draft"}"#);
    }

    #[test]
    fn id_is_a_sortable_column() {
        let record = Record::with_id(42);
        assert_eq!(record.value_of("id"), Some(Value::Number(42)));
        assert_eq!(record.value_of("missing"), None);
    }
}
