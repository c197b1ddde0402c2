//! Engine configuration.

use serde::Deserialize;

use crate::error::SessionResult;

/// Placeholder style expected by the database driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `?` placeholders, passed through unchanged.
    #[default]
    Question,
    /// `$1, $2, ...` placeholders.
    Dollar,
}

/// Configuration for an engine and the sessions it creates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log every executed statement at info level.
    pub show_sql: bool,
    /// Placeholder style for executed SQL.
    pub placeholder: Placeholder,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_sql(mut self, enabled: bool) -> Self {
        self.show_sql = enabled;
        self
    }

    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(source: &str) -> SessionResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}
