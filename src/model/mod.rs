//! Typed records decoded from a getFeeds response.
//!
//! Field names follow the API's terse wire names via `#[serde(rename)]`.
//! Every record carries a residual bag (`extra`) holding any keys the model
//! does not know, so they survive a decode/encode round trip. Absent and
//! `null` both decode to `None`.

mod feed;
mod location;
mod response;
mod results;

pub use feed::{Feed, FeedKind, Latest, Urls};
pub use location::Location;
pub use response::{Response, Status};
pub use results::Results;

/// Fields present in the source JSON but not part of the typed model.
pub type Residual = serde_json::Map<String, serde_json::Value>;

/// Converts epoch seconds into a UTC timestamp, if representable.
pub(crate) fn epoch_to_utc(seconds: i64) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(seconds, 0)
}
