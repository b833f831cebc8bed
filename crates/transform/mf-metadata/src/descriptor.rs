//! Static description of the metadata filter for hosts.

use mf_error::{ConfigError, Result};
use mf_types::{json_kind, FilterConfig};
use serde::Serialize;
use serde_json::{Map, Value};

/// Name of the filter.
pub const FILTER_NAME: &str = "metadata";

/// Version of the host interface this filter implements.
pub const INTERFACE_VERSION: &str = "1.0.0";

/// Default configuration category declared to the host.
const DEFAULT_CONFIG: &str = r#"{
    "plugin": {
        "description": "Metadata filter plugin",
        "type": "string",
        "default": "metadata",
        "readonly": "true"
    },
    "enable": {
        "description": "A switch that can be used to enable or disable execution of the metadata filter.",
        "type": "boolean",
        "displayName": "Enabled",
        "default": "false"
    },
    "config": {
        "description": "Metadata to add to readings.",
        "type": "JSON",
        "default": "{}",
        "order": "1",
        "displayName": "Metadata to add"
    }
}"#;

/// Kind of plugin a descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginType {
    /// Pipeline filter stage
    Filter,
}

/// Process-wide, read-only description of the filter.
#[derive(Debug, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub flags: u32,
    pub plugin_type: PluginType,
    pub interface_version: &'static str,
    /// Default configuration category as JSON text
    pub config: &'static str,
}

static PLUGIN_INFO: PluginInfo = PluginInfo {
    name: FILTER_NAME,
    version: env!("CARGO_PKG_VERSION"),
    flags: 0,
    plugin_type: PluginType::Filter,
    interface_version: INTERFACE_VERSION,
    config: DEFAULT_CONFIG,
};

/// Returns the filter descriptor.
pub fn describe() -> &'static PluginInfo {
    &PLUGIN_INFO
}

impl PluginInfo {
    /// Parses the default configuration category.
    pub fn default_config(&self) -> Result<Map<String, Value>> {
        match serde_json::from_str(self.config) {
            Ok(Value::Object(items)) => Ok(items),
            Ok(other) => Err(ConfigError::NotAnObject(json_kind(&other).to_string()).into()),
            Err(e) => Err(ConfigError::Parse(e.to_string()).into()),
        }
    }

    /// Builds host options from the declared item defaults.
    pub fn default_filter_config(&self) -> Result<FilterConfig> {
        let items = self.default_config()?;

        let mut options = Map::new();
        for (name, item) in &items {
            if let Some(default) = item.get("default") {
                options.insert(name.clone(), default.clone());
            }
        }

        FilterConfig::from_value(&Value::Object(options))
    }
}
