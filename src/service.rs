//! Background service task — single `select!` loop.
//!
//! The service owns all async I/O. It receives [`UiEvent`]s from the UI thread,
//! talks to the JSON-RPC node and the transfer history API, and sends
//! [`ServiceEvent`]s back.
//!
//! Transfer fetches and balance reads run in their own tasks so a slow
//! backend or a stalled node never stalls the loop. Issuing a new fetch
//! aborts the previous one; a poll tick is skipped while a balance read is
//! still outstanding, and disconnecting aborts both.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::balance::BalanceReader;
use crate::config::Config;
use crate::events::{ServiceEvent, UiEvent};
use crate::models::TransferQuery;
use crate::rpc::{RpcClient, RpcError};
use crate::transfer_client::{ClientError, TransferClient};
use crate::wallet::{ConnectorKind, WalletConnector};

/// Run the service loop until the cancellation token fires or the UI asks
/// for shutdown.
pub async fn run(
    token: CancellationToken,
    mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    svc_tx: mpsc::UnboundedSender<ServiceEvent>,
    config: Config,
) {
    let mut state = match ServiceState::new(&config, svc_tx) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to start service: {}", e);
            return;
        }
    };

    // Balance poll; the first tick fires immediately and is skipped because
    // nothing is connected at startup.
    let period = config.balance_poll_interval().max(Duration::from_millis(100));
    let mut balance_poll = tokio::time::interval(period);
    balance_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    balance_poll.tick().await;

    log::info!("🚀 Service loop started");

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                log::info!("🛑 Service loop shutting down");
                break;
            }

            _ = balance_poll.tick() => {
                state.poll_balance();
            }

            Some(event) = ui_rx.recv() => {
                match event {
                    UiEvent::Shutdown => break,

                    UiEvent::Connect { connector, address } => {
                        if state.connect(connector, address.as_deref()).await {
                            state.spawn_balance_read();
                            balance_poll.reset();
                        }
                    }

                    UiEvent::Disconnect => state.disconnect(),

                    UiEvent::FetchTransfers { generation, query } => {
                        state.spawn_fetch(generation, query);
                    }

                    UiEvent::RefreshBalance => state.spawn_balance_read(),
                }
            }
        }
    }

    state.abort_fetch();
    state.abort_balance_read();
}

struct ServiceState {
    svc_tx: mpsc::UnboundedSender<ServiceEvent>,
    wallet: WalletConnector,
    balances: BalanceReader,
    transfers: TransferClient,
    fetch_task: Option<JoinHandle<()>>,
    balance_task: Option<JoinHandle<()>>,
}

impl ServiceState {
    fn new(
        config: &Config,
        svc_tx: mpsc::UnboundedSender<ServiceEvent>,
    ) -> Result<Self, ServiceError> {
        let rpc = RpcClient::new(config.rpc_url.clone())?;
        let balances = BalanceReader::new(
            rpc.clone(),
            config.token_contract.clone(),
            config.token_decimals,
            config.token_symbol.clone(),
        );
        let transfers = TransferClient::new(config.api_base_url.clone())?;

        log::info!(
            "Service endpoints: api={}, rpc={}, token={}",
            transfers.base_url(),
            rpc.endpoint(),
            balances.contract()
        );

        Ok(Self {
            svc_tx,
            wallet: WalletConnector::new(rpc),
            balances,
            transfers,
            fetch_task: None,
            balance_task: None,
        })
    }

    fn send(&self, event: ServiceEvent) {
        // The receiver only goes away when the window closes.
        let _ = self.svc_tx.send(event);
    }

    /// Returns `true` when a connection was established.
    async fn connect(&mut self, connector: ConnectorKind, address: Option<&str>) -> bool {
        match self.wallet.connect(connector, address).await {
            Ok(account) => {
                self.send(ServiceEvent::Connected(account));
                true
            }
            Err(e) => {
                log::warn!("Connect via {} failed: {}", connector.name(), e);
                self.send(ServiceEvent::ConnectFailed(e.to_string()));
                false
            }
        }
    }

    fn disconnect(&mut self) {
        self.abort_fetch();
        self.abort_balance_read();
        if let Some(account) = self.wallet.account() {
            log::info!(
                "🔌 Disconnecting {} ({})",
                account.address,
                account.connector.name()
            );
        }
        self.wallet.disconnect();
        self.send(ServiceEvent::Disconnected);
    }

    /// Periodic read; skipped while the previous one is still outstanding.
    fn poll_balance(&mut self) {
        if self
            .balance_task
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
        {
            log::debug!("Balance read still in flight, skipping poll");
            return;
        }
        self.spawn_balance_read();
    }

    /// Read the balance of the connected account in the background,
    /// replacing any outstanding read. No-op while disconnected.
    fn spawn_balance_read(&mut self) {
        let Some(address) = self.wallet.address().map(str::to_string) else {
            return;
        };
        self.abort_balance_read();

        let reader = self.balances.clone();
        let tx = self.svc_tx.clone();
        self.balance_task = Some(tokio::spawn(async move {
            let event = match reader.read(&address).await {
                Ok(balance) => ServiceEvent::BalanceUpdated(balance),
                Err(e) => {
                    log::warn!("Balance read for {} failed: {}", address, e);
                    ServiceEvent::BalanceFailed(e.to_string())
                }
            };
            let _ = tx.send(event);
        }));
    }

    fn abort_balance_read(&mut self) {
        if let Some(handle) = self.balance_task.take() {
            handle.abort();
        }
    }

    fn spawn_fetch(&mut self, generation: u64, query: TransferQuery) {
        self.abort_fetch();

        let client = self.transfers.clone();
        let tx = self.svc_tx.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            let event = match client.fetch(&query).await {
                Ok(page) => ServiceEvent::TransfersLoaded { generation, page },
                Err(e) => {
                    log::warn!("Transfer fetch #{} failed: {}", generation, e);
                    ServiceEvent::TransfersFailed {
                        generation,
                        message: e.user_message(),
                    }
                }
            };
            let _ = tx.send(event);
        }));
    }

    fn abort_fetch(&mut self) {
        if let Some(handle) = self.fetch_task.take() {
            if !handle.is_finished() {
                log::debug!("Aborting superseded transfer fetch");
            }
            handle.abort();
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ServiceError {
    #[error("RPC client: {0}")]
    Rpc(#[from] RpcError),

    #[error("Transfer client: {0}")]
    Transfer(#[from] ClientError),
}
