//! Query-string rendering for the getFeeds endpoint.
//!
//! Parameters are appended in a fixed order (`location`, `descendants`,
//! `page`, `limit`, `type`) no matter which order they were set in, and only
//! when set. Values are written verbatim: nothing is percent-encoded, so the
//! rendered string matches what legacy callers produced byte for byte.

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Sparse set of optional getFeeds parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedsQuery {
    pub location: Option<String>,
    pub descendants: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub feed_type: Option<String>,
}

impl FeedsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to feeds assigned to this location ID.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// `"0"` keeps only feeds assigned directly to `location`; the API
    /// defaults to `"1"` (include sub-locations).
    pub fn descendants(mut self, descendants: impl Into<String>) -> Self {
        self.descendants = Some(descendants.into());
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Known values are `gtfs` and `gtfsrealtime`; others are passed through.
    pub fn feed_type(mut self, feed_type: impl Into<String>) -> Self {
        self.feed_type = Some(feed_type.into());
        self
    }

    /// Set parameters as `(name, value)` pairs, in rendering order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(location) = &self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(descendants) = &self.descendants {
            pairs.push(("descendants", descendants.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(feed_type) = &self.feed_type {
            pairs.push(("type", feed_type.clone()));
        }
        pairs
    }

    /// Renders `endpoint?key=<api_key>[&name=value...]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if `endpoint` is not an absolute
    /// http(s) URL.
    pub fn render(&self, endpoint: &str, api_key: &str) -> Result<String> {
        validate_endpoint(endpoint)?;

        let mut rendered = format!("{endpoint}?key={api_key}");
        for (name, value) in self.pairs() {
            rendered.push('&');
            rendered.push_str(name);
            rendered.push('=');
            rendered.push_str(&value);
        }

        debug!(url = %rendered, "Rendered getFeeds query");
        Ok(rendered)
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| Error::invalid_endpoint(endpoint, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_endpoint(
            endpoint,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(Error::invalid_endpoint(endpoint, "missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::invalid_endpoint(
            endpoint,
            "endpoint must not carry a query or fragment",
        ));
    }
    Ok(())
}
