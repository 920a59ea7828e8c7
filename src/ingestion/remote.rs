//! Remote CSV fetch.
//!
//! The dataset is downloaded once per session with a single blocking GET. Failures surface
//! immediately; there is no retry.

use std::time::Duration;

use crate::error::{LoadError, LoadResult};
use crate::types::{DataSet, Schema};

use super::csv::ingest_csv_from_bytes;

/// Download `url` and return the response body.
///
/// Non-2xx responses fail with [`LoadError::HttpStatus`]; transport failures with
/// [`LoadError::Http`].
pub fn fetch_bytes(url: &str, timeout: Option<Duration>) -> LoadResult<Vec<u8>> {
    let mut builder = reqwest::blocking::Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    let client = builder.build()?;

    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }
    Ok(resp.bytes()?.to_vec())
}

/// Fetch a CSV document over HTTP(S) and parse it with `schema`.
pub fn fetch_csv_from_url(
    url: &str,
    schema: &Schema,
    timeout: Option<Duration>,
) -> LoadResult<DataSet> {
    let body = fetch_bytes(url, timeout)?;
    log::debug!("fetched {} bytes from {url}", body.len());
    ingest_csv_from_bytes(&body, schema)
}
