//! Raw image retrieval from the remote cutout service
//!
//! Pure I/O with no transform logic. The fetcher trait is the seam that
//! lets the pipeline be exercised against a stub in tests while the real
//! implementation performs blocking HTTP requests.

use log::{debug, info};

use crate::cutout::errors::{CutoutError, CutoutResult};

/// Strategy for retrieving raw cutout bytes for a URL
///
/// Implementations report failures to the caller without retrying; the
/// review flow re-triggers a fetch when the user navigates back or
/// changes settings.
pub trait CutoutFetcher {
    /// Fetch the raw image payload at a URL
    ///
    /// # Arguments
    /// * `url` - Fully built cutout request URL
    ///
    /// # Returns
    /// The raw response bytes, or an error carrying the failing URL and
    /// the underlying cause
    fn fetch(&self, url: &str) -> CutoutResult<Vec<u8>>;
}

/// Blocking HTTP fetcher backed by reqwest
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with a default client
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CutoutFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> CutoutResult<Vec<u8>> {
        info!("Fetching cutout: {}", url);

        let response = self.client.get(url)
            .send()
            .map_err(|e| CutoutError::FetchFailed(url.to_string(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CutoutError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let bytes = response.bytes()
            .map_err(|e| CutoutError::FetchFailed(url.to_string(), e.to_string()))?;

        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
