use serde::{Deserialize, Serialize};

use super::{Feed, Residual};

/// One page of getFeeds results.
///
/// The counters are absent when the status is not `OK`; `input` is only sent
/// for `MISSINGINPUT`/`INVALIDINPUT` and names the offending parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Total matches; may exceed the number of feeds on this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    #[serde(rename = "numPages", default, skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<i64>,

    /// `Some(vec![])` for an empty page, `None` when the key is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeds: Option<Vec<Feed>>,

    #[serde(flatten)]
    pub extra: Residual,
}

impl Results {
    /// `true` when `page` is known to be the final one.
    pub fn is_last_page(&self) -> bool {
        matches!((self.page, self.num_pages), (Some(page), Some(pages)) if page >= pages)
    }
}
