//! Application state — plain data, no async, no Arc.
//!
//! `AppState` holds everything the transfer view needs to render. User
//! actions mutate it directly and return the [`UiEvent`] to forward to the
//! service task. Results come back as [`ServiceEvent`]s applied via
//! [`AppState::apply`].
//!
//! Every fetch is tagged with a generation number. Only the response to the
//! most recently issued fetch is accepted; anything older is dropped.

use crate::events::{ServiceEvent, UiEvent};
use crate::models::{Direction, Pagination, TokenBalance, TransferQuery, TransferRecord};
use crate::wallet::{Account, ConnectorKind};

/// Shown when a fetch is attempted without a connected account.
pub const NOT_CONNECTED_MESSAGE: &str = "Connect a wallet first";

/// All application state needed for rendering.
#[derive(Debug)]
pub struct AppState {
    // -- Connection --
    pub account: Option<Account>,
    /// Connector currently being tried, if any.
    pub connecting: Option<ConnectorKind>,
    pub connect_error: Option<String>,
    pub watch_address_input: String,

    // -- Balance --
    pub balance: Option<TokenBalance>,
    pub balance_error: Option<String>,

    // -- Transfers --
    pub transfers: Vec<TransferRecord>,
    pub pagination: Pagination,
    pub filter: Direction,
    pub selected: Option<TransferRecord>,

    // -- Fetch lifecycle --
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
    page_limit: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::models::DEFAULT_LIMIT)
    }
}

impl AppState {
    pub fn new(page_limit: u32) -> Self {
        Self {
            account: None,
            connecting: None,
            connect_error: None,
            watch_address_input: String::new(),
            balance: None,
            balance_error: None,
            transfers: Vec::new(),
            pagination: Pagination::with_limit(page_limit),
            filter: Direction::All,
            selected: None,
            loading: false,
            error: None,
            generation: 0,
            page_limit,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.address.as_str())
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Generation of the most recently issued fetch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ------------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------------

    /// Start connecting through `connector`.
    pub fn connect(&mut self, connector: ConnectorKind) -> UiEvent {
        self.connecting = Some(connector);
        self.connect_error = None;
        let address = connector
            .needs_address()
            .then(|| self.watch_address_input.trim().to_string());
        UiEvent::Connect { connector, address }
    }

    pub fn disconnect(&mut self) -> UiEvent {
        UiEvent::Disconnect
    }

    /// Change the direction filter. The displayed list is left alone until
    /// the next explicit fetch, which starts from the first page.
    pub fn set_filter(&mut self, filter: Direction) {
        if self.filter != filter {
            self.filter = filter;
            self.pagination.page = 1;
        }
    }

    /// Move the page cursor by `delta`, clamped to `1..=pages`.
    pub fn set_page(&mut self, delta: i32) {
        let last = self.pagination.pages.max(1) as i64;
        let target = (self.pagination.page as i64 + delta as i64).clamp(1, last);
        self.pagination.page = target as u32;
    }

    pub fn can_go_previous(&self) -> bool {
        self.pagination.has_previous()
    }

    pub fn can_go_next(&self) -> bool {
        self.pagination.has_next()
    }

    /// Open (`Some`) or close (`None`) the detail overlay.
    pub fn select_transfer(&mut self, record: Option<TransferRecord>) {
        self.selected = record;
    }

    /// Build the next fetch request. Returns `None` and sets an inline error
    /// when no account is connected; nothing is sent in that case.
    pub fn begin_fetch(&mut self) -> Option<UiEvent> {
        let Some(address) = self.address().map(str::to_string) else {
            self.error = Some(NOT_CONNECTED_MESSAGE.to_string());
            return None;
        };

        self.generation += 1;
        self.loading = true;
        self.error = None;

        let query = TransferQuery {
            address,
            page: self.pagination.page.max(1),
            limit: self.page_limit,
            direction: self.filter,
        };
        Some(UiEvent::FetchTransfers {
            generation: self.generation,
            query,
        })
    }

    // ------------------------------------------------------------------------
    // Service results
    // ------------------------------------------------------------------------

    /// Apply a service event to update state. Pure state-machine transition.
    pub fn apply(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::Connected(account) => {
                if self.address() != Some(account.address.as_str()) {
                    self.clear_account_data();
                }
                self.account = Some(account);
                self.connecting = None;
                self.connect_error = None;
            }

            ServiceEvent::ConnectFailed(message) => {
                self.connecting = None;
                self.connect_error = Some(message);
            }

            ServiceEvent::Disconnected => {
                self.account = None;
                self.connecting = None;
                self.clear_account_data();
            }

            // A read can complete just after the account went away.
            ServiceEvent::BalanceUpdated(_) | ServiceEvent::BalanceFailed(_)
                if self.account.is_none() =>
            {
                log::debug!("Dropping balance result received while disconnected");
            }

            ServiceEvent::BalanceUpdated(balance) => {
                self.balance = Some(balance);
                self.balance_error = None;
            }

            ServiceEvent::BalanceFailed(message) => {
                self.balance_error = Some(message);
            }

            ServiceEvent::TransfersLoaded { generation, page } => {
                if generation != self.generation {
                    log::debug!(
                        "Dropping stale transfer page (generation {} < {})",
                        generation,
                        self.generation
                    );
                    return;
                }
                self.transfers = page.transfers;
                self.pagination = page.pagination;
                self.loading = false;
            }

            ServiceEvent::TransfersFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    log::debug!("Dropping stale transfer error: {}", message);
                    return;
                }
                self.error = Some(message);
                self.loading = false;
            }
        }
    }

    /// Forget everything fetched for the previous account. In-flight fetches
    /// are invalidated by bumping the generation.
    fn clear_account_data(&mut self) {
        self.balance = None;
        self.balance_error = None;
        self.transfers.clear();
        self.pagination = Pagination::with_limit(self.page_limit);
        self.selected = None;
        self.error = None;
        self.loading = false;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransferPage;
    use crate::transfer_client::BAD_STATUS_MESSAGE;

    const ADDR: &str = "0x1234567890abcdef1234567890abcdef12345678";

    fn account(address: &str) -> Account {
        Account {
            connector: ConnectorKind::WatchOnly,
            address: address.to_string(),
            chain_id: 1,
        }
    }

    fn record(from: &str, to: &str, value: &str, timestamp: i64) -> TransferRecord {
        TransferRecord {
            from: from.to_string(),
            to: to.to_string(),
            value: value.to_string(),
            timestamp,
        }
    }

    fn connected() -> AppState {
        let mut state = AppState::default();
        state.apply(ServiceEvent::Connected(account(ADDR)));
        state
    }

    fn fetch_generation(state: &mut AppState) -> u64 {
        match state.begin_fetch() {
            Some(UiEvent::FetchTransfers { generation, .. }) => generation,
            other => panic!("expected fetch event, got {:?}", other),
        }
    }

    fn loaded(state: &mut AppState, records: Vec<TransferRecord>, pagination: Pagination) {
        let generation = fetch_generation(state);
        state.apply(ServiceEvent::TransfersLoaded {
            generation,
            page: TransferPage {
                transfers: records,
                pagination,
            },
        });
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert!(!state.is_connected());
        assert!(state.transfers.is_empty());
        assert_eq!(state.pagination, Pagination::default());
        assert_eq!(state.filter, Direction::All);
        assert!(!state.loading);
    }

    #[test]
    fn test_fetch_without_address_sends_nothing() {
        let mut state = AppState::default();
        assert!(state.begin_fetch().is_none());
        assert_eq!(state.error.as_deref(), Some(NOT_CONNECTED_MESSAGE));
        assert!(!state.loading);
    }

    #[test]
    fn test_begin_fetch_builds_query() {
        let mut state = connected();
        state.set_filter(Direction::Incoming);
        match state.begin_fetch() {
            Some(UiEvent::FetchTransfers { generation, query }) => {
                assert_eq!(generation, state.generation());
                assert_eq!(query.address, ADDR);
                assert_eq!(query.page, 1);
                assert_eq!(query.limit, 10);
                assert_eq!(query.direction, Direction::Incoming);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(state.loading);
    }

    #[test]
    fn test_single_row_scenario() {
        let mut state = connected();
        loaded(
            &mut state,
            vec![record("0xA", "0xB", "100", 1000)],
            Pagination {
                page: 1,
                limit: 10,
                total: 1,
                pages: 1,
            },
        );
        assert_eq!(state.transfers, vec![record("0xA", "0xB", "100", 1000)]);
        assert!(!state.can_go_previous());
        assert!(!state.can_go_next());
        assert!(!state.loading);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = connected();
        let pagination = Pagination {
            page: 2,
            limit: 10,
            total: 25,
            pages: 3,
        };
        loaded(&mut state, vec![record("0xA", "0xB", "1", 5)], pagination);

        let generation = fetch_generation(&mut state);
        assert!(state.loading);
        state.apply(ServiceEvent::TransfersFailed {
            generation,
            message: BAD_STATUS_MESSAGE.to_string(),
        });

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(BAD_STATUS_MESSAGE));
        assert_eq!(state.transfers, vec![record("0xA", "0xB", "1", 5)]);
        assert_eq!(state.pagination, pagination);
    }

    #[test]
    fn test_success_clears_error_and_replaces_list() {
        let mut state = connected();
        let generation = fetch_generation(&mut state);
        state.apply(ServiceEvent::TransfersFailed {
            generation,
            message: "boom".to_string(),
        });

        let generation = fetch_generation(&mut state);
        assert!(state.error.is_none());
        state.apply(ServiceEvent::TransfersLoaded {
            generation,
            page: TransferPage::default(),
        });
        assert!(state.transfers.is_empty());
        assert_eq!(state.pagination, Pagination::default());
    }

    #[test]
    fn test_filter_change_does_not_touch_list() {
        let mut state = connected();
        let rows = vec![record("0xA", "0xB", "100", 1000)];
        loaded(
            &mut state,
            rows.clone(),
            Pagination {
                page: 2,
                limit: 10,
                total: 20,
                pages: 2,
            },
        );

        state.set_filter(Direction::Outgoing);
        assert_eq!(state.transfers, rows);
        assert_eq!(state.pagination.page, 1);
        assert!(!state.loading);
    }

    #[test]
    fn test_page_navigation_clamped() {
        let mut state = connected();
        loaded(
            &mut state,
            Vec::new(),
            Pagination {
                page: 1,
                limit: 10,
                total: 25,
                pages: 3,
            },
        );

        state.set_page(-1);
        assert_eq!(state.pagination.page, 1);
        assert!(!state.can_go_previous());
        assert!(state.can_go_next());

        state.set_page(1);
        state.set_page(1);
        assert_eq!(state.pagination.page, 3);
        assert!(state.can_go_previous());
        assert!(!state.can_go_next());

        state.set_page(1);
        assert_eq!(state.pagination.page, 3);
    }

    #[test]
    fn test_page_change_does_not_fetch_but_next_fetch_uses_it() {
        let mut state = connected();
        loaded(
            &mut state,
            Vec::new(),
            Pagination {
                page: 1,
                limit: 10,
                total: 25,
                pages: 3,
            },
        );
        let before = state.generation();
        state.set_page(1);
        assert_eq!(state.generation(), before);
        assert!(!state.loading);

        match state.begin_fetch() {
            Some(UiEvent::FetchTransfers { query, .. }) => assert_eq!(query.page, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = connected();
        let first = fetch_generation(&mut state);
        let second = fetch_generation(&mut state);

        state.apply(ServiceEvent::TransfersLoaded {
            generation: second,
            page: TransferPage {
                transfers: vec![record("0xNEW", "0xB", "2", 2)],
                pagination: Pagination::default(),
            },
        });
        state.apply(ServiceEvent::TransfersLoaded {
            generation: first,
            page: TransferPage {
                transfers: vec![record("0xOLD", "0xB", "1", 1)],
                pagination: Pagination::default(),
            },
        });

        assert_eq!(state.transfers[0].from, "0xNEW");
        assert!(!state.loading);
    }

    #[test]
    fn test_loading_stays_until_latest_resolves() {
        let mut state = connected();
        let first = fetch_generation(&mut state);
        let _second = fetch_generation(&mut state);

        state.apply(ServiceEvent::TransfersFailed {
            generation: first,
            message: "aborted".to_string(),
        });
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_detail_overlay() {
        let mut state = connected();
        let row = record("0xA", "0xB", "100", 1000);
        state.select_transfer(Some(row.clone()));
        assert_eq!(state.selected.as_ref(), Some(&row));
        state.select_transfer(None);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_disconnect_clears_stale_data() {
        let mut state = connected();
        loaded(
            &mut state,
            vec![record("0xA", "0xB", "100", 1000)],
            Pagination::default(),
        );
        state.select_transfer(Some(record("0xA", "0xB", "100", 1000)));
        state.apply(ServiceEvent::BalanceUpdated(TokenBalance {
            raw: 5,
            decimals: 0,
            symbol: "T".to_string(),
        }));

        state.apply(ServiceEvent::Disconnected);
        assert!(!state.is_connected());
        assert!(state.transfers.is_empty());
        assert!(state.selected.is_none());
        assert!(state.balance.is_none());
    }

    #[test]
    fn test_disconnect_invalidates_in_flight_fetch() {
        let mut state = connected();
        let generation = fetch_generation(&mut state);
        state.apply(ServiceEvent::Disconnected);
        state.apply(ServiceEvent::TransfersLoaded {
            generation,
            page: TransferPage {
                transfers: vec![record("0xA", "0xB", "1", 1)],
                pagination: Pagination::default(),
            },
        });
        assert!(state.transfers.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_connect_failure_surfaces_message() {
        let mut state = AppState::default();
        state.watch_address_input = "  0xabc ".to_string();
        match state.connect(ConnectorKind::WatchOnly) {
            UiEvent::Connect { connector, address } => {
                assert_eq!(connector, ConnectorKind::WatchOnly);
                assert_eq!(address.as_deref(), Some("0xabc"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(state.connecting, Some(ConnectorKind::WatchOnly));

        state.apply(ServiceEvent::ConnectFailed("Invalid address: 0xabc".to_string()));
        assert!(state.connecting.is_none());
        assert_eq!(state.connect_error.as_deref(), Some("Invalid address: 0xabc"));
        assert!(!state.is_connected());
    }

    #[test]
    fn test_reconnect_same_account_keeps_list() {
        let mut state = connected();
        loaded(
            &mut state,
            vec![record("0xA", "0xB", "100", 1000)],
            Pagination::default(),
        );
        state.apply(ServiceEvent::Connected(account(ADDR)));
        assert_eq!(state.transfers.len(), 1);

        state.apply(ServiceEvent::Connected(account(
            "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd",
        )));
        assert!(state.transfers.is_empty());
    }

    #[test]
    fn test_balance_failure_keeps_last_balance() {
        let mut state = connected();
        let balance = TokenBalance {
            raw: 1,
            decimals: 0,
            symbol: "T".to_string(),
        };
        state.apply(ServiceEvent::BalanceUpdated(balance.clone()));
        state.apply(ServiceEvent::BalanceFailed("HTTP error 502".to_string()));
        assert_eq!(state.balance, Some(balance));
        assert_eq!(state.balance_error.as_deref(), Some("HTTP error 502"));
    }

    #[test]
    fn test_balance_after_disconnect_is_ignored() {
        let mut state = connected();
        state.apply(ServiceEvent::Disconnected);
        state.apply(ServiceEvent::BalanceUpdated(TokenBalance {
            raw: 5,
            decimals: 0,
            symbol: "T".to_string(),
        }));
        state.apply(ServiceEvent::BalanceFailed("timed out".to_string()));
        assert!(state.balance.is_none());
        assert!(state.balance_error.is_none());
    }
}
