//! Source reader
//!
//! Fetches the raw bytes of a CRD source from the network or the local
//! filesystem. This is the only place network and file errors surface.

use reqwest::{redirect, Client};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Prefix that marks a source identifier as a network source
const URL_PREFIX: &str = "http";

/// Returns true if the identifier should be fetched over HTTP
pub fn is_url(source: &str) -> bool {
    source.starts_with(URL_PREFIX)
}

/// Reads complete source contents from files or URLs
#[derive(Debug, Clone)]
pub struct SourceReader {
    client: Client,
}

impl SourceReader {
    /// Create a reader whose HTTP client always follows redirects
    ///
    /// No timeout is configured; a hung fetch blocks until the transport
    /// gives up.
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::custom(|attempt| attempt.follow()))
            .build()?;
        Ok(Self { client })
    }

    /// Read the full contents of a source
    pub async fn read(&self, source: &str) -> Result<Vec<u8>> {
        if is_url(source) {
            self.fetch(source).await
        } else {
            tokio::fs::read(source)
                .await
                .map_err(|e| Error::read(source, e))
        }
    }

    /// Fetch a URL body
    ///
    /// Non-2xx responses are not failures: the body is returned as-is and
    /// a warning is logged.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await.map_err(|e| Error::Fetch {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Source returned non-success status");
        }

        let body = response.bytes().await.map_err(|e| Error::Fetch {
            url: url.to_string(),
            source: e,
        })?;
        debug!(url, bytes = body.len(), "Fetched source");

        Ok(body.to_vec())
    }
}
