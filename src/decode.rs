//! JSON decoding for getFeeds responses.
//!
//! Decoding is two steps: parse the bytes into an untyped tree, then map the
//! tree onto [`Response`]. Unknown keys always land in the residual bags; in
//! strict mode the bags are then checked and the alphabetically first key of
//! the first non-empty bag is reported as a [`Error::SchemaViolation`].
//! Residual bags are sorted maps, so this is not document order.
//!
//! Object-typed fields go through one fallback: an empty array decodes as
//! absent for `results`, `l` and `latest`, and any non-object value decodes
//! as absent for a feed's `u`.

use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Residual, Response};
use crate::policy::UnknownFieldPolicy;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseDecoder {
    policy: UnknownFieldPolicy,
}

impl ResponseDecoder {
    pub fn new(policy: UnknownFieldPolicy) -> Self {
        Self { policy }
    }

    /// Decoder using the process-wide override as it is right now.
    pub fn from_global() -> Self {
        Self::new(UnknownFieldPolicy::global())
    }

    pub fn policy(&self) -> UnknownFieldPolicy {
        self.policy
    }

    /// Decodes a complete response body.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedResponse`] if `bytes` is not JSON or does not fit
    ///   the model.
    /// - [`Error::SchemaViolation`] in strict mode when an unknown field is found.
    pub fn decode(&self, bytes: &[u8]) -> Result<Response> {
        let tree: Value = serde_json::from_slice(bytes)?;
        self.decode_value(tree)
    }

    pub fn decode_value(&self, tree: Value) -> Result<Response> {
        let response: Response = serde_json::from_value(tree)?;

        if self.policy.is_strict() {
            if let Some(path) = first_unknown_field(&response) {
                return Err(Error::SchemaViolation { path });
            }
        }

        debug!(
            status = response.status.as_deref().unwrap_or(""),
            feeds = response
                .results
                .as_ref()
                .and_then(|r| r.feeds.as_ref())
                .map(Vec::len),
            "Decoded getFeeds response"
        );
        Ok(response)
    }
}

/// Dotted path of the first residual entry, using wire names.
fn first_unknown_field(response: &Response) -> Option<String> {
    if let Some(path) = first_key("", &response.extra) {
        return Some(path);
    }

    let results = response.results.as_ref()?;
    if let Some(path) = first_key("results", &results.extra) {
        return Some(path);
    }

    for (i, feed) in results.feeds.iter().flatten().enumerate() {
        let prefix = format!("results.feeds[{i}]");
        let nested = [
            first_key(&prefix, &feed.extra),
            feed.location
                .as_ref()
                .and_then(|l| first_key(&format!("{prefix}.l"), &l.extra)),
            feed.urls
                .as_ref()
                .and_then(|u| first_key(&format!("{prefix}.u"), &u.extra)),
            feed.latest
                .as_ref()
                .and_then(|l| first_key(&format!("{prefix}.latest"), &l.extra)),
        ];
        if let Some(path) = nested.into_iter().flatten().next() {
            return Some(path);
        }
    }
    None
}

fn first_key(prefix: &str, residual: &Residual) -> Option<String> {
    let key = residual.keys().next()?;
    if prefix.is_empty() {
        Some(key.clone())
    } else {
        Some(format!("{prefix}.{key}"))
    }
}

/// Decodes an object-typed field, treating any non-object value as absent.
///
/// Used for a feed's `u`, which upstream has served as an array.
pub(crate) fn object_or_absent<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    lenient_object(deserializer, true)
}

/// Decodes an object-typed field, treating `[]` as absent. Other shapes are
/// still errors.
pub(crate) fn empty_array_as_absent<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    lenient_object(deserializer, false)
}

/// Each fallback is logged so new occurrences get noticed. An object that
/// does not fit `T` is always an error.
fn lenient_object<'de, D, T>(
    deserializer: D,
    any_shape: bool,
) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let tolerated = match &value {
        Value::Object(_) => false,
        Value::Array(items) if items.is_empty() => true,
        _ => any_shape,
    };
    if tolerated {
        warn!(
            target_type = std::any::type_name::<T>(),
            shape = shape_name(&value),
            value = %value,
            "Expected an object, treating field as absent"
        );
        return Ok(None);
    }

    T::deserialize(value).map(Some).map_err(D::Error::custom)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
