//! Custom data fields and the wire/flat codec.
//!
//! The API represents custom contact attributes as an array of key/value
//! pairs:
//!
//! ```json
//! "dataFields": [
//!   { "key": "FIRSTNAME", "value": "Lewis" },
//!   { "key": "SIGNUPDATE", "value": "2013-03-01T15:30:45Z" }
//! ]
//! ```
//!
//! Locally they are consumed as a flat name-to-value mapping keyed by the
//! account's field catalogue. Date-typed fields are coerced from their wire
//! strings into timestamps on decode and back into canonical UTC ISO-8601
//! text on encode.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A custom field definition from the account's catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFieldDefinition {
    /// Field name, e.g. `FIRSTNAME`
    pub name: String,

    /// Whether values of this field are dates
    pub is_date: bool,
}

impl DataFieldDefinition {
    /// A plain text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_date: false,
        }
    }

    /// A date-typed field.
    pub fn date(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_date: true,
        }
    }
}

/// One wire `{key, value}` pair from a `dataFields` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataFieldEntry {
    /// Field name
    pub key: String,

    /// Raw field value; the API may send null for unset fields
    #[serde(default)]
    pub value: Option<String>,
}

impl DataFieldEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// A decoded data-field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataFieldValue {
    /// No value set for this field
    Empty,

    /// A plain text value, passed through as given
    Text(String),

    /// A coerced date value
    Date(DateTime<Utc>),
}

impl DataFieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, DataFieldValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataFieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            DataFieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Canonical wire text for this value.
    ///
    /// Dates round-trip through their UTC ISO-8601 form; text passes through.
    pub fn to_wire_string(&self) -> String {
        match self {
            DataFieldValue::Empty => String::new(),
            DataFieldValue::Text(s) => s.clone(),
            DataFieldValue::Date(d) => to_xml_schema(d),
        }
    }
}

impl From<&str> for DataFieldValue {
    fn from(s: &str) -> Self {
        DataFieldValue::Text(s.to_string())
    }
}

impl From<String> for DataFieldValue {
    fn from(s: String) -> Self {
        DataFieldValue::Text(s)
    }
}

impl From<DateTime<Utc>> for DataFieldValue {
    fn from(d: DateTime<Utc>) -> Self {
        DataFieldValue::Date(d)
    }
}

/// Flat data-field mapping, ordered by the catalogue that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFieldMap {
    entries: Vec<(String, DataFieldValue)>,
}

impl DataFieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, preserving insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: DataFieldValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&DataFieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Replace the value of an existing key. Returns false when the key is
    /// not present; callers decide whether that is an error.
    pub fn set(&mut self, key: &str, value: DataFieldValue) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => {
                *v = value;
                true
            }
            None => false,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataFieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, DataFieldValue)> for DataFieldMap {
    fn from_iter<I: IntoIterator<Item = (String, DataFieldValue)>>(iter: I) -> Self {
        let mut map = DataFieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Convert a wire `dataFields` array into a flat mapping.
///
/// The catalogue drives the output: every catalogue field appears (absent
/// wire entries become [`DataFieldValue::Empty`]) and nothing outside the
/// catalogue is kept. Some endpoints omit data fields entirely; an empty
/// wire list therefore yields an empty mapping rather than an error.
pub fn decode(entries: &[DataFieldEntry], catalogue: &[DataFieldDefinition]) -> DataFieldMap {
    if entries.is_empty() {
        return DataFieldMap::new();
    }

    catalogue
        .iter()
        .map(|definition| {
            let raw = entries
                .iter()
                .find(|entry| entry.key == definition.name)
                .and_then(|entry| entry.value.as_deref());

            let value = match raw {
                Some(text) if !text.is_empty() && definition.is_date => {
                    match parse_timestamp(text) {
                        Some(date) => DataFieldValue::Date(date),
                        // Unparseable date values pass through untouched
                        None => DataFieldValue::Text(text.to_string()),
                    }
                }
                Some(text) if !text.is_empty() => DataFieldValue::Text(text.to_string()),
                _ => DataFieldValue::Empty,
            };

            (definition.name.clone(), value)
        })
        .collect()
}

/// Convert a flat mapping back into the wire `dataFields` array, in mapping
/// order, with every value stringified.
pub fn encode(map: &DataFieldMap) -> Vec<DataFieldEntry> {
    map.iter()
        .map(|(key, value)| DataFieldEntry::new(key, value.to_wire_string()))
        .collect()
}

/// Format a timestamp in the UTC ISO-8601 form the API expects,
/// e.g. `2013-03-01T15:30:45Z`.
pub(crate) fn to_xml_schema(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a wire timestamp. The API usually sends RFC 3339, but some
/// endpoints drop the offset.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
