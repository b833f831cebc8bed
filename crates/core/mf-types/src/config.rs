//! Host-level configuration for the enrichment stage.

use mf_error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options the host passes to the stage on initialize and reconfigure.
///
/// `config` holds the metadata document as text. It is kept verbatim and
/// only parsed by the compiler, so a malformed document surfaces as a
/// compile-time parse error rather than a host-config error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterConfig {
    /// Whether the stage enriches readings or passes them through
    pub enable: bool,

    /// Metadata document, `None` when the option is absent
    pub config: Option<String>,
}

impl FilterConfig {
    /// Creates a disabled config with no metadata document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enable flag.
    pub fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// Sets the metadata document from text.
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Parses host options from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ConfigError::Parse(format!("{e}: '{text}'")))?;
        Self::from_value(&value)
    }

    /// Builds host options from a JSON value.
    ///
    /// `enable` accepts a boolean or the strings `"true"`/`"false"`.
    /// `config` accepts an inline object or a string holding JSON text.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(options) = value else {
            return Err(ConfigError::InvalidOption {
                option: "<root>".to_string(),
                reason: "host configuration must be a JSON object".to_string(),
            }
            .into());
        };

        let enable = match options.get("enable") {
            None | Some(Value::Null) => false,
            Some(v) => parse_enable(v)?,
        };

        let config = match options.get("config") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self { enable, config })
    }
}

fn parse_enable(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(invalid_enable(format!("'{other}' is not a boolean"))),
        },
        other => Err(invalid_enable(format!("expected a boolean, got {other}"))),
    }
}

fn invalid_enable(reason: String) -> mf_error::MfError {
    ConfigError::InvalidOption {
        option: "enable".to_string(),
        reason,
    }
    .into()
}

impl<'de> Deserialize<'de> for FilterConfig {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
