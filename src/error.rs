//! Error types for the transitfeeds client.
//!
//! Every public operation returns [`Result<T>`]. Nothing is retried or
//! swallowed; the tolerated decode mismatches (a non-object `u`, or `[]` in
//! place of `results`, `l` or `latest`) never reach this type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The base endpoint could not be turned into a request URL.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Network, DNS, connection or non-2xx failure, as reported by reqwest.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not JSON, or did not fit the response model.
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// An unrecognized field was found while decoding in strict mode.
    #[error("Unrecognized field '{path}' in response")]
    SchemaViolation { path: String },
}

impl Error {
    pub(crate) fn invalid_endpoint(endpoint: &str, reason: impl ToString) -> Self {
        Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for network, DNS, connection or non-2xx failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
