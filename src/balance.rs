//! ERC-20 balance reader.
//!
//! Reads `balanceOf(address)` from a fixed token contract through a
//! read-only `eth_call`.

use crate::models::TokenBalance;
use crate::rpc::{RpcClient, RpcError};

/// First four bytes of `keccak256("balanceOf(address)")`.
const BALANCE_OF_SELECTOR: &str = "70a08231";

#[derive(Debug, Clone)]
pub struct BalanceReader {
    rpc: RpcClient,
    contract: String,
    decimals: u8,
    symbol: String,
}

impl BalanceReader {
    pub fn new(rpc: RpcClient, contract: String, decimals: u8, symbol: String) -> Self {
        Self {
            rpc,
            contract,
            decimals,
            symbol,
        }
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Read the token balance of `address` at the latest block.
    pub async fn read(&self, address: &str) -> Result<TokenBalance, RpcError> {
        let data = balance_of_calldata(address)?;
        let result = self
            .rpc
            .call(
                "eth_call",
                serde_json::json!([{ "to": self.contract, "data": data }, "latest"]),
            )
            .await?;

        let word = result
            .as_str()
            .ok_or_else(|| RpcError::InvalidResponse("eth_call result is not a string".into()))?;
        let raw = decode_uint(word)?;

        log::debug!("Balance of {}: {} base units", address, raw);
        Ok(TokenBalance {
            raw,
            decimals: self.decimals,
            symbol: self.symbol.clone(),
        })
    }
}

/// ABI-encode `balanceOf(address)`: selector followed by the address
/// left-padded to a 32-byte word.
pub fn balance_of_calldata(address: &str) -> Result<String, RpcError> {
    let digits = address.trim_start_matches("0x");
    let bytes = hex::decode(digits)
        .map_err(|_| RpcError::InvalidResponse(format!("Invalid address: {}", address)))?;
    if bytes.len() != 20 {
        return Err(RpcError::InvalidResponse(format!(
            "Invalid address length: {}",
            address
        )));
    }

    let mut word = [0u8; 32];
    word[12..].copy_from_slice(&bytes);
    Ok(format!("0x{}{}", BALANCE_OF_SELECTOR, hex::encode(word)))
}

/// Decode a `uint256` return word. Values that do not fit in `u128` are
/// rejected rather than truncated.
pub fn decode_uint(word: &str) -> Result<u128, RpcError> {
    let digits = word.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(0);
    }
    let bytes = hex::decode(digits)
        .map_err(|_| RpcError::InvalidResponse(format!("Invalid return data: {}", word)))?;

    let significant: Vec<u8> = bytes.into_iter().skip_while(|b| *b == 0).collect();
    if significant.len() > 16 {
        return Err(RpcError::InvalidResponse(
            "Balance exceeds 128 bits".to_string(),
        ));
    }

    let mut buf = [0u8; 16];
    buf[16 - significant.len()..].copy_from_slice(&significant);
    Ok(u128::from_be_bytes(buf))
}
