//! Field-keyed validation messages.

use serde::Deserialize;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Validation messages keyed by field name, in the order they were found.
///
/// Only the first message for a field is kept. Serializes as a JSON object.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("date", "Date is required.");
/// errors.add("shift", "Shift is required.");
/// errors.add("date", "ignored");
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.get("date"), Some("Date is required."));
/// assert_eq!(errors.first_message(), Some("Date is required."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(String, String)>,
}

impl ValidationErrors {
    /// Creates an empty set of errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field unless the field already has one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if !self.contains(&field) {
            self.entries.push((field, message.into()));
        }
    }

    /// Returns the message for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    /// Returns true if the field has a message.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(f, _)| f == field)
    }

    /// Returns true when there are no errors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The first message recorded, used for a single notification.
    pub fn first_message(&self) -> Option<&str> {
        self.entries.first().map(|(_, m)| m.as_str())
    }

    /// All messages joined into one line.
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|(f, m)| format!("{}: {}", f, m))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValidationErrors {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Backends may send a list of messages per field; keep the first.
        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut errors = ValidationErrors::new();
        for (field, value) in raw {
            let message = match value {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .find_map(|v| v.as_str().map(str::to_string)),
                _ => None,
            };
            if let Some(message) = message {
                errors.add(field, message);
            }
        }
        Ok(errors)
    }
}
