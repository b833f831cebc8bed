//! Reading types: one measurement event and the batch that carries it.

use crate::datapoint::{json_kind, Datapoint, DatapointValue};
use chrono::{DateTime, Utc};
use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One timestamped measurement event for an asset.
///
/// Datapoints keep insertion order. Names are not required to be unique;
/// appending a datapoint whose name already exists keeps both.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    asset_name: String,
    user_ts: DateTime<Utc>,
    datapoints: Vec<Datapoint>,
}

impl Reading {
    /// Creates a reading timestamped now.
    pub fn new(asset_name: impl Into<String>, datapoints: Vec<Datapoint>) -> Self {
        Self {
            asset_name: asset_name.into(),
            user_ts: Utc::now(),
            datapoints,
        }
    }

    /// Creates a reading with a single datapoint.
    pub fn with_datapoint(asset_name: impl Into<String>, datapoint: Datapoint) -> Self {
        Self::new(asset_name, vec![datapoint])
    }

    /// Sets the user timestamp.
    pub fn with_timestamp(mut self, user_ts: DateTime<Utc>) -> Self {
        self.user_ts = user_ts;
        self
    }

    /// Returns the asset name.
    #[inline]
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Returns the user timestamp.
    #[inline]
    pub fn user_ts(&self) -> DateTime<Utc> {
        self.user_ts
    }

    /// Returns all datapoints in insertion order.
    #[inline]
    pub fn datapoints(&self) -> &[Datapoint] {
        &self.datapoints
    }

    /// Returns the number of datapoints.
    #[inline]
    pub fn datapoint_count(&self) -> usize {
        self.datapoints.len()
    }

    /// Returns the first datapoint with the given name.
    pub fn datapoint(&self, name: &str) -> Option<&Datapoint> {
        self.datapoints.iter().find(|dp| dp.name == name)
    }

    /// Appends a datapoint after the existing ones.
    pub fn add_datapoint(&mut self, datapoint: Datapoint) {
        self.datapoints.push(datapoint);
    }
}

/// Writes datapoints as a JSON object, duplicate names included.
struct DatapointMap<'a>(&'a [Datapoint]);

impl Serialize for DatapointMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for dp in self.0 {
            map.serialize_entry(&dp.name, &dp.value.to_json())?;
        }
        map.end()
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Reading", 3)?;
        state.serialize_field("asset_code", &self.asset_name)?;
        state.serialize_field("user_ts", &self.user_ts)?;
        state.serialize_field("readings", &DatapointMap(&self.datapoints))?;
        state.end()
    }
}

/// Reads a JSON object as an ordered list of entries, duplicate keys included.
#[derive(Default)]
struct DatapointEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for DatapointEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = DatapointEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of datapoint values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(DatapointEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
struct RawReading {
    asset_code: String,
    #[serde(default)]
    user_ts: Option<DateTime<Utc>>,
    #[serde(default)]
    readings: DatapointEntries,
}

impl<'de> Deserialize<'de> for Reading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawReading::deserialize(deserializer)?;

        let datapoints = raw
            .readings
            .0
            .into_iter()
            .map(|(name, value)| {
                match DatapointValue::from_json(&value) {
                    Some(v) => Ok(Datapoint::new(name, v)),
                    None => Err(D::Error::custom(mf_error::ReadingError::UnsupportedValue {
                        name,
                        kind: json_kind(&value).to_string(),
                    })),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            asset_name: raw.asset_code,
            user_ts: raw.user_ts.unwrap_or_else(Utc::now),
            datapoints,
        })
    }
}

/// An ordered batch of readings passed between pipeline stages.
///
/// The set is moved by value from stage to stage, so the batch a stage
/// receives is the very batch it forwards. Stages may edit readings through
/// [`ReadingSet::readings_mut`] but cannot add or drop readings in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingSet {
    readings: Vec<Reading>,
}

impl ReadingSet {
    /// Creates a set from readings.
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    /// Returns the number of readings.
    #[inline]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Returns true if the set holds no readings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Returns all readings.
    #[inline]
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Returns mutable access to the readings.
    #[inline]
    pub fn readings_mut(&mut self) -> &mut [Reading] {
        &mut self.readings
    }

    /// Returns the total number of datapoints across all readings.
    pub fn datapoint_count(&self) -> usize {
        self.readings.iter().map(Reading::datapoint_count).sum()
    }

    /// Consumes the set and returns its readings.
    pub fn into_readings(self) -> Vec<Reading> {
        self.readings
    }
}

impl From<Vec<Reading>> for ReadingSet {
    fn from(readings: Vec<Reading>) -> Self {
        Self::new(readings)
    }
}

impl IntoIterator for ReadingSet {
    type Item = Reading;
    type IntoIter = std::vec::IntoIter<Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.into_iter()
    }
}
