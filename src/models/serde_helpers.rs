//! Serde helpers for backend payloads.
//!
//! The attendance backend sends clock times as `HH:MM` or `HH:MM:SS`,
//! identifiers as numbers or strings, and money as numbers, numeric strings
//! or nothing at all. These helpers normalise those shapes.

use std::str::FromStr;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses a wall-clock time in `HH:MM:SS` or `HH:MM` form.
///
/// # Example
///
/// ```
/// use attendance_engine::models::parse_clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_clock_time("19:00"), NaiveTime::from_hms_opt(19, 0, 0));
/// assert_eq!(parse_clock_time("00:30:15"), NaiveTime::from_hms_opt(0, 30, 15));
/// assert_eq!(parse_clock_time("late"), None);
/// ```
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// Reads a finite number that may arrive as a JSON number or a numeric string.
pub fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Reads a decimal that may arrive as a JSON number or a numeric string.
pub fn decimal_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Strict `HH:MM[:SS]` time, serialized as `HH:MM:SS`.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::parse_clock_time;

    /// Serializes a time as `HH:MM:SS`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    /// Deserializes a time from `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_clock_time(&raw).ok_or_else(|| {
            D::Error::custom(format!(
                "invalid time '{}', expected HH:MM or HH:MM:SS",
                raw
            ))
        })
    }
}

/// Optional time where anything unparsable reads as absent.
pub mod lenient_clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::parse_clock_time;

    /// Serializes a present time as `HH:MM:SS`, an absent one as `null`.
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&t.format("%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes a time, mapping malformed values to `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(s)) => parse_clock_time(&s),
            _ => None,
        })
    }
}

/// Money amount where absent or non-numeric values read as zero.
pub mod lenient_decimal {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::decimal_value;

    /// Serializes the amount with the default decimal representation.
    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(amount, serializer)
    }

    /// Deserializes an amount, coercing anything unreadable to zero.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(decimal_value).unwrap_or(Decimal::ZERO))
    }
}

/// Identifier that may arrive as a JSON number or string.
pub mod id_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use serde_json::Value;

    /// Serializes the identifier as a string.
    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(id)
    }

    /// Deserializes an identifier from a number or a string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(D::Error::custom(format!(
                "expected string or number identifier, got {}",
                other
            ))),
        }
    }
}

/// Optional identifier; blank strings and `null` read as absent.
pub fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
