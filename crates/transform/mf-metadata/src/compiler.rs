//! Compiles a metadata document into the fields appended to every reading.
//!
//! The document is a JSON object. Walking its members in document order:
//! strings, integers and doubles each become one field; nested objects are
//! flattened into the same list without prefixing their names; anything else
//! is skipped with a diagnostic. The conventional `"value"` member holding
//! an object is just one such nested object.

use crate::template::Template;
use mf_error::{ConfigError, Result};
use mf_types::{json_kind, Datapoint, DatapointValue, FilterConfig, Reading};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

/// One compiled metadata field.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataField {
    datapoint: Datapoint,
    template: Option<Template>,
}

impl MetadataField {
    /// Creates a field. String values holding placeholders are prepared as
    /// templates.
    pub fn new(datapoint: Datapoint) -> Self {
        let template = datapoint
            .value
            .as_str()
            .map(Template::new)
            .filter(|template| !template.is_static());
        Self {
            datapoint,
            template,
        }
    }

    /// Returns the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.datapoint.name
    }

    /// Returns the configured value, before any substitution.
    #[inline]
    pub fn value(&self) -> &DatapointValue {
        &self.datapoint.value
    }

    /// Returns the configured datapoint.
    #[inline]
    pub fn datapoint(&self) -> &Datapoint {
        &self.datapoint
    }

    /// Produces the datapoint to append to `reading`.
    ///
    /// String values have their placeholders resolved against the reading;
    /// numeric values are copied as-is.
    pub fn render(&self, reading: &Reading) -> Datapoint {
        match &self.template {
            Some(template) => Datapoint::new(self.name(), template.render(reading)),
            None => self.datapoint.clone(),
        }
    }
}

/// Ordered list of compiled metadata fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldList {
    fields: Vec<MetadataField>,
}

impl FieldList {
    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> std::slice::Iter<'_, MetadataField> {
        self.fields.iter()
    }

    /// Iterates over the configured datapoints in order.
    pub fn datapoints(&self) -> impl Iterator<Item = &Datapoint> {
        self.fields.iter().map(MetadataField::datapoint)
    }

    /// Returns the field names in order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(MetadataField::name).collect()
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a MetadataField;
    type IntoIter = std::slice::Iter<'a, MetadataField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Compiles a parsed metadata document.
///
/// # Errors
///
/// Returns [`ConfigError::NotAnObject`] if the document root is not an
/// object. Unsupported members are not errors; they are logged and skipped.
pub fn compile(document: &Value) -> Result<FieldList> {
    let Value::Object(members) = document else {
        return Err(ConfigError::NotAnObject(json_kind(document).to_string()).into());
    };

    let mut fields = Vec::new();
    flatten(members, &mut fields);

    debug!(fields = fields.len(), "Compiled metadata fields");
    Ok(FieldList { fields })
}

/// Parses and compiles metadata document text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed JSON and
/// [`ConfigError::NotAnObject`] for a non-object root. No partial list is
/// ever produced.
pub fn compile_str(text: &str) -> Result<FieldList> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    compile(&document)
}

/// Compiles the metadata document carried by host options.
///
/// Never fails: an absent document and an invalid one both yield an empty
/// list, distinguished only by the diagnostic logged.
pub fn compile_config(config: &FilterConfig) -> FieldList {
    let Some(text) = config.config.as_deref() else {
        info!("No config provided for metadata filter, readings pass through unchanged");
        return FieldList::default();
    };

    match compile_str(text) {
        Ok(fields) => {
            info!(config = %text, fields = fields.len(), "Metadata filter config loaded");
            fields
        }
        Err(e) => {
            error!(config = %text, error = %e, "Unable to parse metadata filter config");
            FieldList::default()
        }
    }
}

fn flatten(members: &Map<String, Value>, fields: &mut Vec<MetadataField>) {
    for (name, value) in members {
        if let Value::Object(nested) = value {
            flatten(nested, fields);
            continue;
        }

        match DatapointValue::from_json(value) {
            Some(v) => fields.push(MetadataField::new(Datapoint::new(name.clone(), v))),
            None => {
                let skipped = ConfigError::UnsupportedFieldType {
                    name: name.clone(),
                    kind: json_kind(value).to_string(),
                };
                error!(field = %name, "{skipped}");
            }
        }
    }
}
