use crate::form::FieldSet;
use crate::notification::Notification;
use crate::record::Record;
use crate::validate::{FieldError, FormValidator};
use crate::value::Value;
use indexmap::IndexMap;
use std::time::Instant;

/// Modal presentation wrapped around a field set: show/hide state plus
/// submit-intent translation. A decorator over `FieldSet` rather than a
/// subclass, so the field set stays usable outside a modal.
pub struct ModalForm {
    title: String,
    fields: FieldSet,
    validator: FormValidator,
    visible: bool,
}

impl ModalForm {
    pub fn new(title: impl Into<String>, fields: FieldSet, validator: FormValidator) -> Self {
        Self {
            title: title.into(),
            fields,
            validator,
            visible: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the modal and resets the form back to create mode.
    /// Pending revalidation timers are cancelled so none fires against
    /// the cleared fields.
    pub fn hide(&mut self) {
        self.visible = false;
        self.fields.reset();
        self.validator.cancel_pending();
    }

    /// Populates the form from a record copy and presents it: edit
    /// mode when the record carries an identifier, create mode when it
    /// does not.
    pub fn present(&mut self, record: &Record) {
        self.fields.populate(record);
        self.show();
    }

    /// Writes a field value, as the hosting surface reports edits.
    /// Watched fields revalidate after the debounce delay.
    pub fn set_value(&mut self, field: &str, value: Value, now: Instant) {
        self.fields.set_value(field, value);
        self.validator.note_change(field, now);
    }

    /// Drains due revalidation timers. Returns the fields whose error
    /// state was refreshed.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        self.validator.tick(&self.fields, now)
    }

    /// Validates and, when clean, emits the submit intent. The modal
    /// stays open on validation errors so they can be shown inline.
    pub fn submit(&mut self) -> Option<Notification> {
        if !self.validator.validate(&self.fields) {
            log::debug!("submit blocked: {} field error(s)", self.validator.errors().len());
            return None;
        }
        Some(Notification::FormSubmitted {
            data: self.fields.serialize(),
        })
    }

    pub fn errors(&self) -> &IndexMap<String, FieldError> {
        self.validator.errors()
    }

    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.validator.error(field)
    }

    pub fn is_create_mode(&self) -> bool {
        self.fields.is_create_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::ModalForm;
    use crate::form::FieldSet;
    use crate::form::schema::FieldSchema;
    use crate::notification::Notification;
    use crate::record::Record;
    use crate::validate::FormValidator;
    use crate::value::Value;
    use indexmap::IndexMap;
    use std::time::Instant;

    fn modal() -> ModalForm {
        let mut fields = FieldSet::new();
        fields.add_fields(vec![
            FieldSchema::text("title").with_label("Title"),
            FieldSchema::checkbox("published"),
        ]);
        let rules: IndexMap<String, String> =
            [("title".to_string(), "required|min:5".to_string())]
                .into_iter()
                .collect();
        ModalForm::new("Edit article", fields, FormValidator::new(&rules, "en"))
    }

    #[test]
    fn submit_is_blocked_until_the_form_validates() {
        let mut form = modal();
        form.show();

        assert!(form.submit().is_none());
        assert!(form.error("title").is_some());
        assert!(form.is_visible());

        form.set_value("title", Value::from("Valid Title"), Instant::now());
        let notification = form.submit().expect("valid form submits");
        match notification {
            Notification::FormSubmitted { data } => {
                assert_eq!(data.id, None);
                assert_eq!(data.field("title"), Some(&Value::Text("Valid Title".to_string())));
                assert_eq!(data.field("published"), Some(&Value::Bool(false)));
            }
            other => panic!("unexpected notification {}", other.tag()),
        }
    }

    #[test]
    fn present_with_identified_record_enters_edit_mode() {
        let mut form = modal();
        form.present(&Record::with_id(4).set_field("title", "Fourth"));

        assert!(form.is_visible());
        assert!(!form.is_create_mode());

        let notification = form.submit().expect("populated form submits");
        match notification {
            Notification::FormSubmitted { data } => assert_eq!(data.id, Some(4)),
            other => panic!("unexpected notification {}", other.tag()),
        }
    }

    #[test]
    fn hide_resets_to_create_mode() {
        let mut form = modal();
        form.present(&Record::with_id(4).set_field("title", "Fourth"));
        form.hide();

        assert!(!form.is_visible());
        assert!(form.is_create_mode());
        assert_eq!(
            form.fields().field("title").expect("field exists").raw_value(),
            ""
        );
    }
}
