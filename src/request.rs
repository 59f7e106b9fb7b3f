//! A getFeeds request: rendered URL plus one fetch-and-decode.

use reqwest::Url;
use tracing::{debug, info};

use crate::decode::ResponseDecoder;
use crate::error::{Error, Result};
use crate::fetch::{self, HttpClient};
use crate::model::Response;
use crate::policy::UnknownFieldPolicy;
use crate::query::FeedsQuery;

pub const DEFAULT_ENDPOINT: &str = "http://api.transitfeeds.com/v1/getFeeds";

/// A validated request against the getFeeds endpoint.
///
/// Each [`call`](FeedsRequest::call) performs exactly one round trip; there is
/// no retry and no caching.
#[derive(Debug, Clone)]
pub struct FeedsRequest {
    rendered: String,
    url: Url,
    policy: Option<UnknownFieldPolicy>,
}

impl FeedsRequest {
    pub fn builder(api_key: impl Into<String>) -> FeedsRequestBuilder {
        FeedsRequestBuilder::new(api_key)
    }

    /// The URL exactly as rendered from the builder's parameters.
    pub fn url(&self) -> &str {
        &self.rendered
    }

    /// Policy this request decodes with; falls back to the process-wide
    /// override, read when called.
    pub fn policy(&self) -> UnknownFieldPolicy {
        self.policy.unwrap_or_else(UnknownFieldPolicy::global)
    }

    /// Fetches the URL with `client` and decodes the body.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] on network failure or non-2xx status, then
    /// [`Error::MalformedResponse`] or [`Error::SchemaViolation`] from decoding.
    #[tracing::instrument(skip(self, client), fields(url = %self.rendered))]
    pub async fn call<C: HttpClient + ?Sized>(&self, client: &C) -> Result<Response> {
        let bytes = fetch::fetch_bytes(client, &self.url).await?;
        self.decode(&bytes)
    }

    /// Same as [`call`](FeedsRequest::call) using reqwest's blocking client.
    /// Must not be used from inside an async runtime.
    #[tracing::instrument(skip(self), fields(url = %self.rendered))]
    pub fn call_blocking(&self) -> Result<Response> {
        let bytes = fetch::blocking::fetch_bytes(&self.url)?;
        self.decode(&bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Response> {
        let decoder = ResponseDecoder::new(self.policy());
        let response = decoder.decode(bytes)?;
        info!(
            status = response.status.as_deref().unwrap_or(""),
            policy = ?decoder.policy(),
            "getFeeds call complete"
        );
        Ok(response)
    }
}

/// Collects the API key, endpoint and optional parameters for a [`FeedsRequest`].
#[derive(Debug, Clone)]
pub struct FeedsRequestBuilder {
    endpoint: String,
    api_key: String,
    query: FeedsQuery,
    policy: Option<UnknownFieldPolicy>,
}

impl FeedsRequestBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            query: FeedsQuery::default(),
            policy: None,
        }
    }

    /// Overrides [`DEFAULT_ENDPOINT`].
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Only feeds belonging to this location ID (and, depending on
    /// `descendants`, its sub-locations). IDs come from the getLocations API.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.query = self.query.location(location);
        self
    }

    /// `"0"` requires feeds to be assigned directly to `location`. The API
    /// treats a missing value as `"1"`.
    pub fn descendants(mut self, descendants: impl Into<String>) -> Self {
        self.query = self.query.descendants(descendants);
        self
    }

    /// Page number; with a limit of 10, page 2 returns results 11-20.
    pub fn page(mut self, page: i64) -> Self {
        self.query = self.query.page(page);
        self
    }

    /// Maximum number of feeds per page.
    pub fn limit(mut self, limit: i64) -> Self {
        self.query = self.query.limit(limit);
        self
    }

    /// `gtfs` or `gtfsrealtime`; all types are returned when unset.
    pub fn feed_type(mut self, feed_type: impl Into<String>) -> Self {
        self.query = self.query.feed_type(feed_type);
        self
    }

    /// Pins the unknown-field policy for this request instead of reading the
    /// process-wide override at call time.
    pub fn unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// # Errors
    ///
    /// [`Error::InvalidEndpoint`] if the endpoint is not an absolute http(s)
    /// URL or the rendered string does not parse.
    pub fn build(self) -> Result<FeedsRequest> {
        let rendered = self.query.render(&self.endpoint, &self.api_key)?;
        let url = Url::parse(&rendered).map_err(|e| Error::invalid_endpoint(&self.endpoint, e))?;

        debug!(url = %rendered, "Built getFeeds request");
        Ok(FeedsRequest {
            rendered,
            url,
            policy: self.policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "dummyApiKey";

    #[test]
    fn test_default_endpoint() {
        let request = FeedsRequest::builder(API_KEY).build().unwrap();
        assert_eq!(
            request.url(),
            "http://api.transitfeeds.com/v1/getFeeds?key=dummyApiKey"
        );
    }

    #[test]
    fn test_request_parameters() {
        let request = FeedsRequest::builder(API_KEY)
            .api_endpoint("https://example.com/get-feeds.json")
            .feed_type("gtfs")
            .descendants("1")
            .limit(10)
            .location("1")
            .page(1)
            .build()
            .unwrap();

        assert_eq!(
            request.url(),
            "https://example.com/get-feeds.json?key=dummyApiKey&location=1&descendants=1&page=1&limit=10&type=gtfs"
        );
    }

    #[test]
    fn test_invalid_endpoint_fails_at_build() {
        let err = FeedsRequest::builder(API_KEY)
            .api_endpoint("api.transitfeeds.com/v1/getFeeds")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_pinned_policy() {
        let request = FeedsRequest::builder(API_KEY)
            .unknown_fields(UnknownFieldPolicy::Strict)
            .build()
            .unwrap();
        assert_eq!(request.policy(), UnknownFieldPolicy::Strict);
    }

    // The mock server lives on its own runtime; the blocking client must run
    // outside of it.
    #[test]
    fn test_call_blocking_decodes_response() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mock_server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/v1/getFeeds"))
                .and(query_param("key", API_KEY))
                .and(query_param("page", "2"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "status": "OK",
                    "ts": 1506443652,
                    "results": {
                        "total": 11,
                        "limit": 10,
                        "page": 2,
                        "numPages": 2,
                        "feeds": [
                            {"id": "trimet/43", "ty": "gtfs", "u": {"d": "http://t/gtfs.zip"}}
                        ]
                    }
                })))
                .expect(1)
                .mount(&server)
                .await;
            server
        });

        let request = FeedsRequest::builder(API_KEY)
            .api_endpoint(format!("{}/v1/getFeeds", mock_server.uri()))
            .page(2)
            .unknown_fields(UnknownFieldPolicy::Strict)
            .build()
            .unwrap();

        let response = request.call_blocking().unwrap();
        assert!(response.is_ok());
        assert_eq!(response.timestamp, Some(1506443652));

        let results = response.results.unwrap();
        assert!(results.is_last_page());
        let feeds = results.feeds.unwrap();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].id.as_deref(), Some("trimet/43"));
        assert_eq!(feeds[0].download_url(), Some("http://t/gtfs.zip"));

        rt.block_on(mock_server.verify());
    }

    #[tokio::test]
    async fn test_call_sends_query_and_decodes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/getFeeds"))
            .and(query_param("key", API_KEY))
            .and(query_param("type", "gtfsrealtime"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "ts": 1506454429,
                "results": {"total": 0, "limit": 10, "page": 1, "numPages": 0, "feeds": []}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = FeedsRequest::builder(API_KEY)
            .api_endpoint(format!("{}/v1/getFeeds", mock_server.uri()))
            .feed_type("gtfsrealtime")
            .unknown_fields(UnknownFieldPolicy::Strict)
            .build()
            .unwrap();

        let response = request.call(&BasicClient::new()).await.unwrap();
        assert!(response.is_ok());
        assert_eq!(response.timestamp, Some(1506454429));
        assert_eq!(response.results.unwrap().feeds, Some(vec![]));
    }

    #[tokio::test]
    async fn test_call_propagates_malformed_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let request = FeedsRequest::builder(API_KEY)
            .api_endpoint(mock_server.uri())
            .unknown_fields(UnknownFieldPolicy::Tolerant)
            .build()
            .unwrap();

        let err = request.call(&BasicClient::new()).await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_call_strict_rejects_unknown_field() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "OK", "debug": true})),
            )
            .mount(&mock_server)
            .await;

        let request = FeedsRequest::builder(API_KEY)
            .api_endpoint(mock_server.uri())
            .unknown_fields(UnknownFieldPolicy::Strict)
            .build()
            .unwrap();

        let err = request.call(&BasicClient::new()).await.unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { ref path } if path == "debug"));
    }
}
