//! Blocking counterpart of [`super::fetch_bytes`].
//!
//! Must not be called from inside an async runtime.

use reqwest::Url;
use tracing::debug;

use crate::error::Result;

pub fn fetch_bytes(url: &Url) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url.clone())?.error_for_status()?;
    let bytes = resp.bytes()?;
    debug!(url = %url, bytes = bytes.len(), "Fetched response body");
    Ok(bytes.to_vec())
}
