//! Ethereum JSON-RPC client
//!
//! Minimal JSON-RPC 2.0 over HTTP, shared by the balance reader and the
//! wallet connectors. Only read-only methods are ever issued.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
pub struct RpcClient {
    endpoint: String,
    client: Client,
}

/// JSON-RPC 2.0 request
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl RpcClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RpcError> {
        let endpoint = endpoint.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        log::info!("📡 JSON-RPC client initialized: {}", endpoint);

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a JSON-RPC 2.0 request and return the `result` member.
    pub async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        log::debug!("→ RPC {}: {}", method, request.params);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RpcError::Http(response.status().as_u16()));
        }

        let rpc_response: JsonRpcResponse = response.json().await.map_err(|e| {
            RpcError::InvalidResponse(format!("Failed to parse JSON-RPC response: {}", e))
        })?;

        if let Some(error) = rpc_response.error {
            return Err(RpcError::Rpc(error.code, error.message));
        }

        rpc_response
            .result
            .ok_or_else(|| RpcError::InvalidResponse("No result in JSON-RPC response".into()))
    }

    /// `eth_chainId`, decoded from its hex quantity.
    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let result = self.call("eth_chainId", serde_json::json!([])).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| RpcError::InvalidResponse("eth_chainId is not a string".into()))?;
        parse_quantity(hex)
    }

    /// `eth_accounts`: accounts the node is able to act for.
    pub async fn accounts(&self) -> Result<Vec<String>, RpcError> {
        let result = self.call("eth_accounts", serde_json::json!([])).await?;
        let accounts: Vec<String> = serde_json::from_value(result)
            .map_err(|e| RpcError::InvalidResponse(format!("eth_accounts: {}", e)))?;
        Ok(accounts)
    }
}

/// Parse a hex quantity such as `0x1` or `0x0a`.
pub fn parse_quantity(hex: &str) -> Result<u64, RpcError> {
    let digits = hex.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16)
        .map_err(|_| RpcError::InvalidResponse(format!("Invalid hex quantity: {}", hex)))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP error {0}")]
    Http(u16),

    #[error("RPC error {0}: {1}")]
    Rpc(i64, String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
