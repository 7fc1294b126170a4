//! Event types for communication between UI and service task.
//!
//! These two enums are the *only* interface between the synchronous egui render
//! loop and the asynchronous service task. No shared state, no Arc, no Mutex.

use crate::models::{TokenBalance, TransferPage, TransferQuery};
use crate::wallet::{Account, ConnectorKind};

// ============================================================================
// UI → Service
// ============================================================================

/// Commands sent from the UI thread to the background service task.
#[derive(Debug)]
pub enum UiEvent {
    /// Connect through the given connector. `address` is only used by
    /// connectors that need one.
    Connect {
        connector: ConnectorKind,
        address: Option<String>,
    },

    /// Drop the current connection.
    Disconnect,

    /// Request one page of transfer history. `generation` identifies the
    /// request; any earlier in-flight fetch is aborted.
    FetchTransfers {
        generation: u64,
        query: TransferQuery,
    },

    /// Read the balance now instead of waiting for the next poll.
    RefreshBalance,

    /// Clean shutdown.
    Shutdown,
}

// ============================================================================
// Service → UI
// ============================================================================

/// Events sent from the service task back to the UI thread.
#[derive(Debug)]
pub enum ServiceEvent {
    /// Connection established.
    Connected(Account),

    /// The connector reported an error; the text is shown verbatim.
    ConnectFailed(String),

    /// Connection dropped.
    Disconnected,

    /// Updated token balance.
    BalanceUpdated(TokenBalance),

    /// A balance read failed. The last known balance stays on screen.
    BalanceFailed(String),

    /// A fetch completed successfully.
    TransfersLoaded { generation: u64, page: TransferPage },

    /// A fetch failed.
    TransfersFailed { generation: u64, message: String },
}
