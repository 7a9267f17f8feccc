use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What kind of control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Textarea,
    Hidden,
    Checkbox,
    Select,
}

/// Wrapper grouping a field with its label and error text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Surround {
    #[serde(default)]
    pub class: String,
}

impl Surround {
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }
}

/// Declarative description of one form field. The set of fields is
/// fixed once the form is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Element identifier; defaults to the field name.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Choices for a select field, value → display label.
    #[serde(default)]
    pub options: IndexMap<String, String>,
    #[serde(default)]
    pub surround: Option<Surround>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            id: None,
            label: None,
            required: false,
            value: None,
            placeholder: None,
            options: IndexMap::new(),
            surround: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Textarea)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox)
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Select)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.insert(value.into(), label.into());
        self
    }

    pub fn with_surround(mut self, surround: Surround) -> Self {
        self.surround = Some(surround);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldSchema};

    #[test]
    fn deserializes_from_yaml() {
        let yaml = r#"
- name: title
  kind: text
  label: Title
  required: true
  placeholder: Enter a title
- name: published
  kind: checkbox
- name: category
  kind: select
  options:
    tech: Tech
    life: Life
"#;
        let fields: Vec<FieldSchema> =
            serde_yaml::from_str(yaml).expect("schema should parse");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].kind, FieldKind::Text);
        assert!(fields[0].required);
        assert_eq!(fields[1].kind, FieldKind::Checkbox);
        assert_eq!(fields[2].options["tech"], "Tech");
    }

    #[test]
    fn kind_defaults_to_text() {
        let field: FieldSchema =
            serde_yaml::from_str("name: title").expect("schema should parse");
        assert_eq!(field.kind, FieldKind::Text);
    }
}
