pub mod debounce;
pub mod locales;
pub mod rules;

use crate::form::{Field, FieldSet};
use crate::form::schema::FieldKind;
use crate::validate::debounce::DebounceQueue;
use crate::validate::locales::Locale;
use crate::validate::rules::{Rule, parse_chain};
use indexmap::IndexMap;
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// A field's single active validation error. An entry exists for a
/// field exactly when the field currently violates one of its rules.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub rule: &'static str,
    pub message: String,
}

/// Evaluates declared rule chains against a field set.
///
/// One-shot passes run every chain and gate submission. With
/// `observe_on_input`, a failing pass puts every ruled field under
/// watch: each change re-arms that field's debounce timer, and the due
/// timer revalidates just that field. A clean one-shot pass tears the
/// watchers down again; edits are then unwatched until the next
/// failing pass.
pub struct FormValidator {
    rule_sets: IndexMap<String, Vec<Rule>>,
    locale: Locale,
    errors: IndexMap<String, FieldError>,
    observe_on_input: bool,
    debounce_delay: Duration,
    watched: Vec<String>,
    timers: DebounceQueue,
}

impl FormValidator {
    /// Parses the compact rule table (`field → "required|min:5"`).
    /// Malformed or unknown rules are logged and skipped, so a typo in
    /// one chain never takes the whole form down.
    pub fn new(rules: &IndexMap<String, String>, locale: &str) -> Self {
        let mut rule_sets = IndexMap::new();
        for (field, spec) in rules {
            let (chain, issues) = parse_chain(spec);
            for issue in &issues {
                log::warn!("rules for `{field}`: {issue}");
            }
            rule_sets.insert(field.clone(), chain);
        }

        Self {
            rule_sets,
            locale: Locale::parse(locale),
            errors: IndexMap::new(),
            observe_on_input: false,
            debounce_delay: DEFAULT_DEBOUNCE,
            watched: Vec::new(),
            timers: DebounceQueue::new(),
        }
    }

    pub fn with_observe_on_input(mut self, enabled: bool) -> Self {
        self.observe_on_input = enabled;
        self
    }

    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// One-shot pass over every field with declared rules. Returns
    /// `true` when the form may submit.
    pub fn validate(&mut self, fields: &FieldSet) -> bool {
        let mut errors = IndexMap::new();
        for (name, chain) in &self.rule_sets {
            let Some(field) = fields.field(name) else {
                log::warn!("no field named `{name}` to validate");
                continue;
            };
            if let Some(error) = first_violation(chain, field, self.locale) {
                errors.insert(name.clone(), error);
            }
        }
        self.errors = errors;

        if self.observe_on_input {
            if self.errors.is_empty() {
                self.teardown_watchers();
            } else {
                self.watched = self.rule_sets.keys().cloned().collect();
            }
        }

        self.errors.is_empty()
    }

    /// Records a change on `field`. Watched fields revalidate once the
    /// debounce delay elapses without another change.
    pub fn note_change(&mut self, field: &str, now: Instant) {
        if !self.is_watching(field) {
            return;
        }
        self.timers.schedule(field, self.debounce_delay, now);
    }

    /// Drains due timers and revalidates exactly those fields. Returns
    /// the names whose error state was refreshed.
    pub fn tick(&mut self, fields: &FieldSet, now: Instant) -> Vec<String> {
        let due = self.timers.drain_due(now);
        for name in &due {
            self.revalidate_field(name, fields);
        }
        due
    }

    /// How long the host may sleep before the next revalidation is due.
    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.timers.poll_timeout(now, default_timeout)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &IndexMap<String, FieldError> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn is_watching(&self, field: &str) -> bool {
        self.watched.iter().any(|watched| watched == field)
    }

    pub fn has_pending(&self) -> bool {
        self.timers.has_pending()
    }

    /// Cancels every pending revalidation; called on form teardown so
    /// no stale timer fires against a reset field.
    pub fn cancel_pending(&mut self) {
        self.timers.cancel_all();
    }

    fn revalidate_field(&mut self, name: &str, fields: &FieldSet) {
        let Some(chain) = self.rule_sets.get(name) else {
            return;
        };
        let Some(field) = fields.field(name) else {
            log::warn!("no field named `{name}` to validate");
            return;
        };
        match first_violation(chain, field, self.locale) {
            Some(error) => {
                self.errors.insert(name.to_string(), error);
            }
            None => {
                self.errors.shift_remove(name);
            }
        }
    }

    fn teardown_watchers(&mut self) {
        self.watched.clear();
        self.timers.cancel_all();
    }
}

/// First failing rule in declared order wins the visible message.
fn first_violation(chain: &[Rule], field: &Field, locale: Locale) -> Option<FieldError> {
    let raw = field.raw_value();
    let is_select = field.kind() == FieldKind::Select;

    for rule in chain {
        if let Some(key) = rule.check(&raw, is_select) {
            let params = rule.message_params(field.name());
            let params: Vec<(&str, &str)> = params
                .iter()
                .map(|(name, value)| (*name, value.as_str()))
                .collect();
            return Some(FieldError {
                rule: rule.tag(),
                message: locale.message(key, &params),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::FormValidator;
    use crate::form::FieldSet;
    use crate::form::schema::FieldSchema;
    use crate::value::Value;
    use indexmap::IndexMap;
    use std::time::{Duration, Instant};

    fn rules(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(field, spec)| (field.to_string(), spec.to_string()))
            .collect()
    }

    fn title_form(value: &str) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.add_fields(vec![FieldSchema::text("title")]);
        fields.set_value("title", Value::from(value));
        fields
    }

    #[test]
    fn empty_value_surfaces_the_required_message() {
        let mut validator = FormValidator::new(&rules(&[("title", "required|min:5")]), "en");
        assert!(!validator.validate(&title_form("")));

        let error = validator.error("title").expect("title has an error");
        assert_eq!(error.rule, "required");
        assert_eq!(
            error.message,
            "This field cannot be empty, please enter a message"
        );
    }

    #[test]
    fn short_value_surfaces_the_min_message() {
        let mut validator = FormValidator::new(&rules(&[("title", "required|min:5")]), "en");
        assert!(!validator.validate(&title_form("ab")));

        let error = validator.error("title").expect("title has an error");
        assert_eq!(error.rule, "min");
        assert_eq!(error.message, "This field must contain at least 5 characters");
    }

    #[test]
    fn french_locale_resolves_french_templates() {
        let mut validator =
            FormValidator::new(&rules(&[("title", "required|min:5|max:50")]), "fr");
        assert!(!validator.validate(&title_form("")));

        assert_eq!(
            validator.error("title").expect("title has an error").message,
            "Ce champ ne peut pas être vide"
        );
    }

    #[test]
    fn valid_form_clears_previous_errors() {
        let mut validator = FormValidator::new(&rules(&[("title", "required|min:5")]), "en");
        assert!(!validator.validate(&title_form("")));
        assert!(validator.validate(&title_form("Valid Title")));
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn select_required_uses_the_select_message() {
        let mut fields = FieldSet::new();
        fields.add_fields(vec![
            FieldSchema::select("category").with_option("tech", "Tech"),
        ]);
        let mut validator = FormValidator::new(&rules(&[("category", "required")]), "en");
        assert!(!validator.validate(&fields));

        assert_eq!(
            validator.error("category").expect("category has an error").message,
            "Please select a valid category"
        );
    }

    #[test]
    fn rules_for_a_missing_field_are_skipped() {
        let mut validator = FormValidator::new(&rules(&[("missing", "required")]), "en");
        // The referenced field does not exist; the pass reports clean.
        assert!(validator.validate(&title_form("anything")));
    }

    #[test]
    fn debounced_revalidation_fires_once_per_burst() {
        let delay = Duration::from_millis(400);
        let mut validator = FormValidator::new(&rules(&[("title", "required|min:5")]), "en")
            .with_observe_on_input(true)
            .with_debounce_delay(delay);

        let mut fields = title_form("");
        assert!(!validator.validate(&fields));
        assert!(validator.is_watching("title"));

        let t0 = Instant::now();
        fields.set_value("title", Value::from("Va"));
        validator.note_change("title", t0);
        fields.set_value("title", Value::from("Valid Title"));
        validator.note_change("title", t0 + Duration::from_millis(100));

        // First timer was superseded by the second edit.
        assert!(validator.tick(&fields, t0 + delay).is_empty());

        let refreshed = validator.tick(&fields, t0 + Duration::from_millis(100) + delay);
        assert_eq!(refreshed, ["title"]);
        assert!(validator.is_valid());
    }

    #[test]
    fn clean_pass_tears_watchers_down() {
        let mut validator = FormValidator::new(&rules(&[("title", "required")]), "en")
            .with_observe_on_input(true);

        let mut fields = title_form("");
        assert!(!validator.validate(&fields));
        assert!(validator.is_watching("title"));

        fields.set_value("title", Value::from("ok"));
        assert!(validator.validate(&fields));
        assert!(!validator.is_watching("title"));

        // Further edits are unwatched until the next failing pass.
        validator.note_change("title", Instant::now());
        assert!(!validator.has_pending());
    }

    #[test]
    fn single_field_refresh_leaves_other_errors_alone() {
        let delay = Duration::from_millis(400);
        let mut validator = FormValidator::new(
            &rules(&[("title", "required"), ("body", "required")]),
            "en",
        )
        .with_observe_on_input(true)
        .with_debounce_delay(delay);

        let mut fields = FieldSet::new();
        fields.add_fields(vec![FieldSchema::text("title"), FieldSchema::textarea("body")]);
        assert!(!validator.validate(&fields));
        assert_eq!(validator.errors().len(), 2);

        let t0 = Instant::now();
        fields.set_value("title", Value::from("filled"));
        validator.note_change("title", t0);
        validator.tick(&fields, t0 + delay);

        assert!(validator.error("title").is_none());
        assert!(validator.error("body").is_some());
    }
}
