use crate::error::ConfigError;
use crate::form::schema::FieldSchema;
use crate::table::ColumnSpec;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_rows_per_page() -> usize {
    5
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_debounce_ms() -> u64 {
    400
}

/// Application configuration, deserialized from a YAML document.
/// Defaults: five rows per page, English messages, 400 ms debounce.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Enables continuous (debounced) validation after a failing
    /// submit.
    #[serde(default)]
    pub observe_on_input: bool,
    #[serde(default)]
    pub modal_title: Option<String>,
    /// Explicit table columns; empty means infer from the data.
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    /// Declarative form fields, in display order.
    #[serde(default)]
    pub form: Vec<FieldSchema>,
    /// Field name → compact rule chain, e.g. `title: required|min:5`.
    #[serde(default)]
    pub validation: IndexMap<String, String>,
}

impl AppConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
