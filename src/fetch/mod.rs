//! HTTP transport: one GET, body bytes back.
//!
//! Failures (DNS, connection, non-2xx status, broken body) surface as
//! [`crate::Error::Transport`] with the reqwest error attached. Nothing is
//! retried here.

mod basic;
pub mod blocking;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::Url;
use tracing::debug;

use crate::error::Result;

pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &Url) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.clone());

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?;
    debug!(url = %url, bytes = bytes.len(), "Fetched response body");
    Ok(bytes.to_vec())
}
