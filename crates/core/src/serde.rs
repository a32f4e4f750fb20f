//! Serde helper functions for provider payloads.
//!
//! Kakao returns user ids as JSON numbers while the rest of the system keys
//! users by string. These helpers accept either form.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Signed(i64),
    Unsigned(u64),
}

/// Deserialize an id given as a JSON string or integer into a `String`.
pub fn deserialize_id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) if !s.trim().is_empty() => Ok(s),
        StringOrNumber::String(_) => Err(serde::de::Error::custom("id must not be empty")),
        StringOrNumber::Signed(n) => Ok(n.to_string()),
        StringOrNumber::Unsigned(n) => Ok(n.to_string()),
    }
}

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
