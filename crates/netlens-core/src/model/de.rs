//! Lenient deserializers for the fields the capture service may omit,
//! null out, or encode in more than one shape.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Treat `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Content type header value; blank strings count as absent
pub(crate) fn content_type<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// Byte counts arrive as integers or as fractional `encodedDataLength` values
pub(crate) fn byte_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if !value.is_finite() || value <= 0.0 {
        return Ok(0);
    }
    Ok(value.round() as u64)
}

/// Milliseconds; negative or non-finite values clamp to zero
pub(crate) fn millis<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Ok(0.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CookieJar {
    Map(BTreeMap<String, String>),
    List(Vec<CookieItem>),
}

#[derive(Deserialize)]
struct CookieItem {
    name: String,
    #[serde(default)]
    value: String,
}

/// Cookies as a name/value mapping, or as a list of cookie objects
pub(crate) fn cookies<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let jar = Option::<CookieJar>::deserialize(deserializer)?;
    Ok(match jar {
        None => BTreeMap::new(),
        Some(CookieJar::Map(map)) => map,
        Some(CookieJar::List(items)) => items
            .into_iter()
            .map(|cookie| (cookie.name, cookie.value))
            .collect(),
    })
}
