//! Wallet connection.
//!
//! A desktop viewer has no browser extension to talk to, so the available
//! connectors are:
//! - node accounts: the first account the configured JSON-RPC node manages
//!   (a local dev node or a signer exposing `eth_accounts`)
//! - watch-only: any address the user types in
//!
//! Both ask the node for its chain id. The connector owns no keys and never
//! signs anything.

use crate::rpc::{RpcClient, RpcError};

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(digits) => digits.len() == 40 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    NodeAccounts,
    WatchOnly,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 2] = [ConnectorKind::NodeAccounts, ConnectorKind::WatchOnly];

    pub fn name(self) -> &'static str {
        match self {
            ConnectorKind::NodeAccounts => "Node accounts",
            ConnectorKind::WatchOnly => "Watch-only address",
        }
    }

    /// Whether the user has to supply the address.
    pub fn needs_address(self) -> bool {
        matches!(self, ConnectorKind::WatchOnly)
    }
}

/// A connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub connector: ConnectorKind,
    pub address: String,
    pub chain_id: u64,
}

#[derive(Debug)]
pub struct WalletConnector {
    rpc: RpcClient,
    account: Option<Account>,
}

impl WalletConnector {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc, account: None }
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn address(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.address.as_str())
    }

    /// Connect through `connector`. A previous connection is replaced only on
    /// success.
    pub async fn connect(
        &mut self,
        connector: ConnectorKind,
        address_input: Option<&str>,
    ) -> Result<Account, WalletError> {
        let address = match connector {
            ConnectorKind::NodeAccounts => {
                let accounts = self.rpc.accounts().await?;
                accounts.into_iter().next().ok_or(WalletError::NoAccounts)?
            }
            ConnectorKind::WatchOnly => {
                let input = address_input
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or(WalletError::MissingAddress)?;
                if !is_valid_address(input) {
                    return Err(WalletError::InvalidAddress(input.to_string()));
                }
                input.to_string()
            }
        };

        let chain_id = self.rpc.chain_id().await?;
        let account = Account {
            connector,
            address,
            chain_id,
        };

        log::info!(
            "🔗 Connected {} via {} (chain {})",
            account.address,
            connector.name(),
            chain_id
        );
        self.account = Some(account.clone());
        Ok(account)
    }

    /// Drop the current connection, returning it if there was one.
    pub fn disconnect(&mut self) -> Option<Account> {
        let previous = self.account.take();
        if let Some(ref account) = previous {
            log::info!("Disconnected {}", account.address);
        }
        previous
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("The node reported no accounts")]
    NoAccounts,

    #[error("Enter an address to watch")]
    MissingAddress,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Rpc(#[from] RpcError),
}
