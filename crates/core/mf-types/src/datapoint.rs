//! Datapoint types: a name plus a typed scalar value.

use serde_json::Value;
use std::fmt;

/// A typed scalar carried by a datapoint.
#[derive(Debug, Clone, PartialEq)]
pub enum DatapointValue {
    /// UTF-8 string
    String(String),

    /// Signed 64-bit integer
    Integer(i64),

    /// Double precision float
    Float(f64),
}

impl DatapointValue {
    /// Converts a JSON value into a datapoint value.
    ///
    /// Numbers written with a fraction or exponent become [`Self::Float`],
    /// integral numbers that fit in an `i64` become [`Self::Integer`].
    /// Everything else (arrays, objects, booleans, null, integers beyond the
    /// signed 64-bit range) returns `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Number(n) if n.is_f64() => n.as_f64().map(Self::Float),
            Value::Number(n) => n.as_i64().map(Self::Integer),
            _ => None,
        }
    }

    /// Converts this value back into JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float payload, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// String form of a value. Strings are written raw, without quotes; a
/// whole-number float keeps one decimal place so it reads as a float.
impl fmt::Display for DatapointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for DatapointValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DatapointValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for DatapointValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for DatapointValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Describes the kind of a JSON value for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_u64() && n.as_i64().is_none() => "integer out of range",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A named, typed value attached to a reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Datapoint {
    /// Datapoint name
    pub name: String,

    /// Datapoint value
    pub value: DatapointValue,
}

impl Datapoint {
    /// Creates a new datapoint.
    pub fn new(name: impl Into<String>, value: impl Into<DatapointValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the datapoint name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the datapoint value.
    #[inline]
    pub fn value(&self) -> &DatapointValue {
        &self.value
    }
}
