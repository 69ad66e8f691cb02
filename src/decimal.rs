//! Serde helpers for the API's decimal fields
//!
//! The backend serializes decimal columns as JSON strings (`"100.00"`).
//! These helpers accept either a string or a plain number and decode to
//! `f64`, failing the whole response decode on anything else.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Number(f64),
    Text(String),
}

impl Decimal {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Decimal::Number(value) => Ok(value),
            Decimal::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid decimal value: {:?}", text))),
        }
    }
}

/// Deserialize a required decimal field
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Decimal::deserialize(deserializer)?.into_f64()
}

/// Deserialize an optional decimal field (absent or `null` becomes `None`)
pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Decimal>::deserialize(deserializer)? {
        Some(value) => value.into_f64().map(Some),
        None => Ok(None),
    }
}
