pub mod modal;
pub mod schema;

use crate::record::{Record, RecordId};
use crate::form::schema::{FieldKind, FieldSchema, Surround};
use crate::value::Value;
use indexmap::IndexMap;

/// Reserved name for the hidden record identifier every form carries.
const ID_FIELD: &str = "id";

/// One built form field: its schema plus the live value.
#[derive(Debug, Clone)]
pub struct Field {
    schema: FieldSchema,
    id: String,
    value: Value,
}

impl Field {
    fn build(schema: FieldSchema) -> Self {
        let id = schema.name.clone();
        let id = schema.id.clone().unwrap_or(id);
        let value = match schema.kind {
            FieldKind::Checkbox => Value::Bool(
                schema.value.as_ref().map(Value::is_truthy).unwrap_or(false),
            ),
            _ => Value::Text(
                schema
                    .value
                    .as_ref()
                    .map(Value::to_field_text)
                    .unwrap_or_default(),
            ),
        };
        Self { schema, id, value }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn kind(&self) -> FieldKind {
        self.schema.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.schema.label.as_deref()
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Writes a value into the field, coercing to what the control
    /// holds: checkboxes keep a boolean, everything else text.
    pub fn set_value(&mut self, value: Value) {
        self.value = match self.schema.kind {
            FieldKind::Checkbox => Value::Bool(value.is_truthy()),
            _ => Value::Text(value.to_field_text()),
        };
    }

    /// The string the validation engine sees. An unchecked checkbox
    /// reads as empty, a checked one as `true`.
    pub fn raw_value(&self) -> String {
        match (&self.schema.kind, &self.value) {
            (FieldKind::Checkbox, Value::Bool(true)) => "true".to_string(),
            (FieldKind::Checkbox, _) => String::new(),
            (_, value) => value.to_field_text(),
        }
    }

    pub fn is_checked(&self) -> bool {
        self.value.is_truthy()
    }

    /// Field-level surround, if the schema declared one.
    pub fn surround(&self) -> Option<&Surround> {
        self.schema.surround.as_ref()
    }

    fn clear(&mut self) {
        self.value = match self.schema.kind {
            FieldKind::Checkbox => Value::Bool(false),
            _ => Value::Text(String::new()),
        };
    }
}

/// Ordered collection of built fields plus the hidden record
/// identifier. An empty identifier means create mode.
#[derive(Debug, Default)]
pub struct FieldSet {
    fields: IndexMap<String, Field>,
    global_surround: Option<Surround>,
    hidden_id: String,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surround applied to every field that does not declare its own.
    pub fn with_surround(mut self, surround: Surround) -> Self {
        self.global_surround = Some(surround);
        self
    }

    /// Builds one field per schema entry, in order. Field ids default
    /// to the field name. A duplicate name, or the reserved `id` name,
    /// is reported and skipped; the set is fixed after construction.
    pub fn add_fields(&mut self, schemas: Vec<FieldSchema>) {
        for schema in schemas {
            self.add_field(schema);
        }
    }

    fn add_field(&mut self, schema: FieldSchema) {
        if schema.name == ID_FIELD {
            log::warn!("`{ID_FIELD}` is the hidden identifier, not a declarable field");
            return;
        }
        if self.fields.contains_key(&schema.name) {
            log::warn!("duplicate field `{}` skipped", schema.name);
            return;
        }
        let field = Field::build(schema);
        self.fields.insert(field.name().to_string(), field);
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Effective surround for one field: its own, else the global one.
    pub fn surround_for(&self, name: &str) -> Option<&Surround> {
        self.fields
            .get(name)
            .and_then(Field::surround)
            .or(self.global_surround.as_ref())
    }

    pub fn set_value(&mut self, name: &str, value: Value) {
        match self.fields.get_mut(name) {
            Some(field) => field.set_value(value),
            None => log::warn!("no field named `{name}`"),
        }
    }

    /// Current values as a flat record. Checkbox state is normalized to
    /// a boolean and the hidden identifier becomes the record id.
    pub fn serialize(&self) -> Record {
        let mut record = Record::new();
        record.id = self.record_id();
        for field in self.fields.values() {
            let value = match field.kind() {
                FieldKind::Checkbox => Value::Bool(field.is_checked()),
                _ => field.value().clone(),
            };
            record.fields.insert(field.name().to_string(), value);
        }
        record
    }

    /// Writes `record` into matching fields by name; checkbox fields
    /// take booleans, everything else scalar text. The hidden
    /// identifier tracks `record.id`, empty when absent, which puts
    /// the form in create mode.
    pub fn populate(&mut self, record: &Record) {
        for (name, value) in &record.fields {
            if let Some(field) = self.fields.get_mut(name) {
                field.set_value(value.clone());
            }
        }
        self.hidden_id = record
            .id
            .map(|id| id.to_string())
            .unwrap_or_default();
    }

    /// Clears every field and the hidden identifier, returning the form
    /// to create mode.
    pub fn reset(&mut self) {
        for field in self.fields.values_mut() {
            field.clear();
        }
        self.hidden_id.clear();
    }

    pub fn hidden_id(&self) -> &str {
        &self.hidden_id
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.hidden_id.parse().ok()
    }

    pub fn is_create_mode(&self) -> bool {
        self.hidden_id.is_empty()
    }
}
