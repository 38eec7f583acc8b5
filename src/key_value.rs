//! # Key-Value Arguments
//!
//! Parses the `key1=value1,key2=value2` strings used for headers, query
//! parameters, form data and JSON payloads.

use std::io::Write;
use thiserror::Error;

/// Format hint shown when an argument can't be parsed
pub const EXPECTED_FORMAT: &str = "key1=value1,key2=value2";

/// Error returned when an item has no `=` separator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid format for key-value pairs: {raw}")]
pub struct KeyValueError {
    raw: String,
}

impl KeyValueError {
    /// The full argument that failed to parse
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Insertion-ordered string mapping.
///
/// Setting an existing key replaces its value in place, so the first
/// occurrence decides the position and the last one decides the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    entries: Vec<(String, String)>,
}

impl KeyValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert into a JSON object whose values are all strings
    pub fn to_json_object(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = KeyValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

/// Parse a comma-separated list of `key=value` items.
///
/// Absent or empty input yields an empty mapping. Each item is split on its
/// first `=`; a single item without one fails the whole argument. Keys and
/// values are kept exactly as given, whitespace included.
pub fn parse(raw: Option<&str>) -> Result<KeyValues, KeyValueError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(KeyValues::new()),
    };

    let mut values = KeyValues::new();
    for item in raw.split(',') {
        let (key, value) = item.split_once('=').ok_or_else(|| KeyValueError {
            raw: raw.to_string(),
        })?;
        values.insert(key, value);
    }
    Ok(values)
}

/// Lenient form of [`parse`]: malformed input is reported to `out` and
/// replaced by an empty mapping so the request can still go ahead.
pub fn parse_or_empty<W: Write>(raw: Option<&str>, out: &mut W) -> std::io::Result<KeyValues> {
    match parse(raw) {
        Ok(values) => Ok(values),
        Err(e) => {
            tracing::warn!("ignoring malformed key-value argument: {e}");
            writeln!(out, "Error: {e}")?;
            writeln!(out, "Expected format: {EXPECTED_FORMAT}")?;
            Ok(KeyValues::new())
        }
    }
}
