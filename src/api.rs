//! Remote fetcher for the public random-beer endpoint. The trait seam exists
//! so the coordinator can be exercised in tests with a canned source instead
//! of a live network.

use thiserror::Error;
use tracing::debug;

use crate::models::BeerRecord;

/// Fixed endpoint returning one randomly generated beer per request. No auth,
/// no headers, no query parameters.
pub const BEER_API_URL: &str = "https://random-data-api.com/api/beer/random_beer";

/// Failures that can occur while fetching a beer. Transport problems and
/// decode problems are kept apart so the log tells us which side broke.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connection, TLS, non-2xx status).
    #[error("request to the beer API failed")]
    Request(#[from] reqwest::Error),
    /// The response body was not the JSON object we expect.
    #[error("could not decode the beer API response")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce a fresh beer record. Implemented by the real
/// HTTP client below and by stub sources in coordinator tests.
pub trait BeerSource {
    /// Perform one fetch. Every invocation is a fresh round trip: no retry,
    /// no caching of prior results.
    fn fetch(&self) -> Result<BeerRecord, FetchError>;
}

/// Blocking HTTP client wrapper around [`BEER_API_URL`].
#[derive(Debug)]
pub struct RandomBeerApi {
    client: reqwest::blocking::Client,
}

impl RandomBeerApi {
    /// Build the client once so keep-alive connections get reused across
    /// repeated fetches within a session.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for RandomBeerApi {
    fn default() -> Self {
        Self::new()
    }
}

impl BeerSource for RandomBeerApi {
    /// GET the endpoint and decode the body. The body is read as text first
    /// so a malformed payload surfaces as [`FetchError::Decode`] rather than
    /// being folded into the transport error.
    fn fetch(&self) -> Result<BeerRecord, FetchError> {
        let body = self
            .client
            .get(BEER_API_URL)
            .send()?
            .error_for_status()?
            .text()?;

        let record: BeerRecord = serde_json::from_str(&body)?;
        debug!(name = %record.name, "fetched beer record");
        Ok(record)
    }
}
