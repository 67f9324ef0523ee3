// src/providers/mod.rs
use async_trait::async_trait;
use thiserror::Error;

pub mod binance;
pub mod bybit;
pub mod coingecko;
pub(crate) mod http;
pub mod okx;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rate limited")]
    RateLimited,
    #[error("unexpected payload: {0}")]
    Payload(&'static str),
    #[error("no data for {0}")]
    NoData(String),
}

impl ProviderError {
    /// 429s and transport errors are worth retrying; bad payloads are not.
    pub(crate) fn retryable(&self) -> bool {
        matches!(self, ProviderError::RateLimited | ProviderError::Http(_))
    }
}

/// One venue's view of a USDT-margined perpetual at fetch time.
#[derive(Debug, Clone)]
pub struct PerpSnapshot {
    pub venue: &'static str,
    pub symbol: String,
    pub mark_price: f64,
    /// Signed rate per funding interval (8h).
    pub funding_period_rate: f64,
    pub open_interest_usd: Option<f64>,
    pub ts_ms: i64,
}

/// A spot-universe asset as reported by the market-cap ranking.
#[derive(Debug, Clone)]
pub struct SpotAsset {
    /// Provider-side id used for history lookups, e.g. "bitcoin".
    pub id: String,
    /// Upper-case base symbol, e.g. "BTC".
    pub base: String,
    pub spot_price: Option<f64>,
}

#[async_trait]
pub trait PerpProvider: Send + Sync {
    fn venue(&self) -> &'static str;
    /// Venue-specific symbol guess for a base asset, e.g. BTC -> BTCUSDT.
    fn perp_symbol(&self, base: &str) -> String;
    /// Latest mark price and funding rate for the contract.
    async fn snapshot(&self, symbol: &str) -> Result<PerpSnapshot, ProviderError>;
}

#[async_trait]
pub trait SpotProvider: Send + Sync {
    /// Top `n` assets by market cap with their spot prices.
    async fn top_assets(&self, n: usize) -> Result<Vec<SpotAsset>, ProviderError>;
    /// Daily closes for the asset, oldest first.
    async fn daily_closes(&self, id: &str, days: u32) -> Result<Vec<f64>, ProviderError>;
}

pub(crate) fn parse_f64(s: &str, what: &'static str) -> Result<f64, ProviderError> {
    s.parse::<f64>().map_err(|_| ProviderError::Payload(what))
}
