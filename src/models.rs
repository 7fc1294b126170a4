//! Data shapes shared by the transfer client, the service task and the view.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// A single token movement as served by the history backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub from: String,
    pub to: String,
    /// Pre-scaled decimal amount, displayed as-is.
    pub value: String,
    /// Epoch seconds.
    pub timestamp: i64,
}

impl TransferRecord {
    /// Render the timestamp as a local-independent UTC date string.
    pub fn formatted_time(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

/// Format epoch seconds as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_timestamp(secs: i64) -> String {
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("invalid time ({})", secs),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page", deserialize_with = "page_or_default")]
    pub page: u32,
    #[serde(default = "default_limit", deserialize_with = "limit_or_default")]
    pub limit: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default = "default_pages", deserialize_with = "pages_or_default")]
    pub pages: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_pages() -> u32 {
    1
}

// `#[serde(default)]` only covers an absent key; the backend also sends
// explicit `null`s, which must land on the same defaults.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn page_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_page))
}

fn limit_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_limit))
}

fn pages_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_pages))
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            total: 0,
            pages: 1,
        }
    }
}

impl Pagination {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// Response body of `GET /api/transfers/{address}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub transfers: Vec<TransferRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

/// Which side of a transfer the connected account must be on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    All,
    Incoming,
    Outgoing,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::All, Direction::Incoming, Direction::Outgoing];

    /// Value of the `type` query parameter; `None` means the parameter is omitted.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Direction::All => None,
            Direction::Incoming => Some("in"),
            Direction::Outgoing => Some("out"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::All => "All",
            Direction::Incoming => "Incoming",
            Direction::Outgoing => "Outgoing",
        }
    }
}

/// Everything the history client needs to issue one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    pub address: String,
    pub page: u32,
    pub limit: u32,
    pub direction: Direction,
}

impl TransferQuery {
    /// Query-string pairs in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(kind) = self.direction.query_value() {
            params.push(("type", kind.to_string()));
        }
        params
    }
}

/// Token balance in base units together with how to display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub raw: u128,
    pub decimals: u8,
    pub symbol: String,
}

impl TokenBalance {
    /// Scale `raw` by `decimals` without going through floating point.
    pub fn formatted(&self) -> String {
        let digits = self.raw.to_string();
        let decimals = self.decimals as usize;

        let (whole, frac) = if decimals == 0 {
            (digits, String::new())
        } else if digits.len() > decimals {
            let split = digits.len() - decimals;
            (digits[..split].to_string(), digits[split..].to_string())
        } else {
            ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
        };

        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            format!("{} {}", whole, self.symbol)
        } else {
            format!("{}.{} {}", whole, frac, self.symbol)
        }
    }
}

/// Shorten `0x1234...abcd` style identifiers for table cells.
pub fn short_address(address: &str) -> String {
    if address.is_ascii() && address.len() > 12 {
        format!("{}..{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}
