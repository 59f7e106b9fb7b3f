use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Location, Residual, epoch_to_utc};
use crate::decode::{empty_array_as_absent, object_or_absent};

/// A feed listed in the directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    /// Provider slug plus internal id, e.g. `"karlsruher-verkehrsverbundes/896"`.
    /// Treated as opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "ty", default, skip_serializing_if = "Option::is_none")]
    pub feed_type: Option<String>,

    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        rename = "l",
        default,
        deserialize_with = "empty_array_as_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Location>,

    /// Usually an object. Any other shape decodes as `None`.
    #[serde(
        rename = "u",
        default,
        deserialize_with = "object_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub urls: Option<Urls>,

    /// `[]` decodes as `None`.
    #[serde(
        default,
        deserialize_with = "empty_array_as_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest: Option<Latest>,

    #[serde(flatten)]
    pub extra: Residual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    Gtfs,
    GtfsRealtime,
    Other(String),
}

impl Feed {
    pub fn kind(&self) -> Option<FeedKind> {
        self.feed_type.as_deref().map(|ty| match ty {
            "gtfs" => FeedKind::Gtfs,
            "gtfsrealtime" => FeedKind::GtfsRealtime,
            other => FeedKind::Other(other.to_string()),
        })
    }

    pub fn download_url(&self) -> Option<&str> {
        self.urls.as_ref()?.download_url.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Urls {
    /// Human-readable page about the feed.
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,

    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    #[serde(flatten)]
    pub extra: Residual,
}

/// Latest known version of a feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Latest {
    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    #[serde(flatten)]
    pub extra: Residual,
}

impl Latest {
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(epoch_to_utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_kind() {
        let mut feed = Feed {
            feed_type: Some("gtfs".to_string()),
            ..Default::default()
        };
        assert_eq!(feed.kind(), Some(FeedKind::Gtfs));

        feed.feed_type = Some("gtfsrealtime".to_string());
        assert_eq!(feed.kind(), Some(FeedKind::GtfsRealtime));

        feed.feed_type = Some("netex".to_string());
        assert_eq!(feed.kind(), Some(FeedKind::Other("netex".to_string())));

        feed.feed_type = None;
        assert_eq!(feed.kind(), None);
    }

    #[test]
    fn test_urls_object() {
        let feed: Feed = serde_json::from_str(
            r#"{"id":"a/1","u":{"i":"https://example.com/info","d":"http://example.com/gtfs.zip"}}"#,
        )
        .unwrap();
        let urls = feed.urls.as_ref().unwrap();
        assert_eq!(urls.info_url.as_deref(), Some("https://example.com/info"));
        assert_eq!(feed.download_url(), Some("http://example.com/gtfs.zip"));
    }

    #[test]
    fn test_urls_array_decodes_as_absent() {
        let empty: Feed = serde_json::from_str(r#"{"id":"a/1","u":[]}"#).unwrap();
        let filled: Feed = serde_json::from_str(r#"{"id":"a/1","u":["http://x"]}"#).unwrap();
        assert!(empty.urls.is_none());
        assert!(filled.urls.is_none());
        assert!(empty.extra.is_empty());
    }

    #[test]
    fn test_urls_scalar_and_null_decode_as_absent() {
        let scalar: Feed = serde_json::from_str(r#"{"u":"http://x"}"#).unwrap();
        let null: Feed = serde_json::from_str(r#"{"u":null}"#).unwrap();
        assert!(scalar.urls.is_none());
        assert!(null.urls.is_none());
    }

    #[test]
    fn test_empty_array_location_and_latest_are_absent() {
        let feed: Feed =
            serde_json::from_str(r#"{"id":"a/1","l":[],"latest":[],"u":{"d":"http://x"}}"#)
                .unwrap();
        assert!(feed.location.is_none());
        assert!(feed.latest.is_none());
        assert_eq!(feed.download_url(), Some("http://x"));
    }

    #[test]
    fn test_scalar_location_still_fails() {
        let result: Result<Feed, _> = serde_json::from_str(r#"{"l":"Karlsruhe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_urls_object_with_wrong_inner_type_still_fails() {
        let result: Result<Feed, _> = serde_json::from_str(r#"{"u":{"i":42}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_latest_timestamp_utc() {
        let latest = Latest {
            timestamp: Some(1506430166),
            ..Default::default()
        };
        assert_eq!(
            latest.timestamp_utc().unwrap().to_rfc3339(),
            "2017-09-26T12:49:26+00:00"
        );
    }
}
