//! Custom serde helpers for backend wire formats.
//!
//! The REST API sends timestamps as Unix seconds (sometimes fractional) and
//! prices as either JSON numbers or decimal strings.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

impl NumberOrString {
    fn into_string(self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s,
        }
    }
}

fn seconds_to_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let secs = f64::from_str(raw).ok()?;
    let millis = (secs * 1000.0).round() as i64;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Convert a `DateTime<Utc>` into whole Unix seconds, as the API expects in
/// request bodies and query parameters.
pub fn to_timestamp_secs(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp()
}

/// Deserializes Unix seconds (integer, float or numeric string) into `DateTime<Utc>`.
pub mod timestamp_secs {
    use super::{seconds_to_datetime, NumberOrString};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = NumberOrString::deserialize(deserializer)?.into_string();
        seconds_to_datetime(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", raw)))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.timestamp())
    }
}

/// Optional variant of [`timestamp_secs`]; `null` or a missing field map to `None`.
pub mod timestamp_secs_opt {
    use super::{seconds_to_datetime, NumberOrString};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => {
                let raw = raw.into_string();
                seconds_to_datetime(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom(format!("Invalid timestamp: {}", raw))
                })
            }
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.timestamp()),
            None => serializer.serialize_none(),
        }
    }
}

/// Deserializes an optional decimal sent as a JSON number or string.
pub mod decimal_opt {
    use super::NumberOrString;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => {
                let raw = raw.into_string();
                Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .map(Some)
                    .map_err(|e| serde::de::Error::custom(format!("Invalid decimal {}: {}", raw, e)))
            }
        }
    }

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }
}

/// Deserializes a required decimal sent as a JSON number or string.
pub mod decimal {
    use super::NumberOrString;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = NumberOrString::deserialize(deserializer)?.into_string();
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map_err(|e| serde::de::Error::custom(format!("Invalid decimal {}: {}", raw, e)))
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // `Decimal` has an inherent `serialize` returning its raw bytes.
        Serialize::serialize(value, serializer)
    }
}
