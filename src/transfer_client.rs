//! Transfer history REST client
//!
//! `GET {base}/api/transfers/{address}?page=&limit=[&type=in|out]`
//!
//! One request per call. No retry and no overall timeout; a stalled request
//! is superseded by the next fetch instead.

use reqwest::Client;
use std::time::Duration;

use crate::models::{TransferPage, TransferQuery};

/// Message shown to the user for any non-2xx response.
pub const BAD_STATUS_MESSAGE: &str = "Network response was not ok";

#[derive(Debug, Clone)]
pub struct TransferClient {
    base_url: String,
    client: Client,
}

impl TransferClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        log::info!("📡 Transfer history client initialized: {}", base_url);

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the transfer listing for `address`, without query string.
    pub fn transfers_url(&self, address: &str) -> String {
        format!("{}/api/transfers/{}", self.base_url, address)
    }

    /// Fetch one page of transfers.
    pub async fn fetch(&self, query: &TransferQuery) -> Result<TransferPage, ClientError> {
        let url = self.transfers_url(&query.address);
        log::debug!("→ GET {} {:?}", url, query.params());

        let response = self
            .client
            .get(&url)
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Transfer request for {} failed: HTTP {}", query.address, status);
            return Err(ClientError::Http(status.as_u16()));
        }

        let body = response.bytes().await?;
        let page: TransferPage = serde_json::from_slice(&body).map_err(|e| {
            log::warn!("Undecodable transfer page for {}: {}", query.address, e);
            ClientError::InvalidResponse(e.to_string())
        })?;

        log::info!(
            "✅ Retrieved {} transfers (page {}/{})",
            page.transfers.len(),
            page.pagination.page,
            page.pagination.pages
        );
        Ok(page)
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error {0}")]
    Http(u16),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Text shown inline in the transfer view.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) => BAD_STATUS_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}
