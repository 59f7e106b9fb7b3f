use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Residual, Results, epoch_to_utc};
use crate::decode::empty_array_as_absent;

/// Top-level getFeeds envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// `OK`, `EMPTYKEY`, `MISSINGINPUT`, `INVALIDINPUT`, or anything newer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Seconds since the epoch.
    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// Error detail, only sent when the status is not `OK`.
    #[serde(rename = "msg", default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,

    /// `[]` decodes as `None`.
    #[serde(
        default,
        deserialize_with = "empty_array_as_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub results: Option<Results>,

    #[serde(flatten)]
    pub extra: Residual,
}

/// Known status values. The set is open: unrecognized strings land in
/// [`Status::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    EmptyKey,
    MissingInput,
    InvalidInput,
    Other(String),
}

impl Status {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "OK" => Status::Ok,
            "EMPTYKEY" => Status::EmptyKey,
            "MISSINGINPUT" => Status::MissingInput,
            "INVALIDINPUT" => Status::InvalidInput,
            other => Status::Other(other.to_string()),
        }
    }
}

impl Response {
    pub fn status_kind(&self) -> Option<Status> {
        self.status.as_deref().map(Status::parse)
    }

    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("OK")
    }

    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(epoch_to_utc)
    }
}
