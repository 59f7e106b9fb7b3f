//! Client for the TransitFeeds getFeeds API.
//!
//! [`FeedsRequest`] renders the query URL, fetches it once and decodes the
//! body into the records in [`model`]. Decoding tolerates schema drift:
//! unknown keys are kept in each record's `extra` bag, and a feed's `u` field
//! decodes as absent when it is not an object.
//!
//! ```no_run
//! # async fn run() -> transitfeeds::Result<()> {
//! use transitfeeds::{BasicClient, FeedsRequest};
//!
//! let response = FeedsRequest::builder("my-api-key")
//!     .feed_type("gtfs")
//!     .limit(10)
//!     .build()?
//!     .call(&BasicClient::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod decode;
pub mod error;
pub mod fetch;
pub mod model;
pub mod policy;
pub mod query;
pub mod request;

pub use decode::ResponseDecoder;
pub use error::{Error, Result};
pub use fetch::{BasicClient, HttpClient};
pub use model::{Feed, FeedKind, Latest, Location, Residual, Response, Results, Status, Urls};
pub use policy::{UnknownFieldPolicy, fail_on_unknown_fields, set_fail_on_unknown_fields};
pub use query::FeedsQuery;
pub use request::{DEFAULT_ENDPOINT, FeedsRequest, FeedsRequestBuilder};
