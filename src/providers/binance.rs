// src/providers/binance.rs
use async_trait::async_trait;
use serde::Deserialize;

use super::http::get_json;
use super::{parse_f64, PerpProvider, PerpSnapshot, ProviderError};

pub const BINANCE_FAPI: &str = "https://fapi.binance.com";

/// Binance USDT-margined futures (fapi).
pub struct BinancePerp {
    pub http: reqwest::Client,
    pub base_url: String,
}

impl BinancePerp {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http, base_url: BINANCE_FAPI.to_string() }
    }

    /// Latest open interest in USD from the 5m history endpoint. Best
    /// effort; the endpoint is missing for some symbols.
    async fn open_interest_usd(&self, symbol: &str) -> Result<f64, ProviderError> {
        let url = format!("{}/futures/data/openInterestHist", self.base_url);
        let rows: Vec<OpenInterestRow> = get_json(
            &self.http,
            &url,
            &[
                ("symbol", symbol.to_string()),
                ("period", "5m".to_string()),
                ("limit", "1".to_string()),
            ],
        )
        .await?;
        let row = rows.last().ok_or_else(|| ProviderError::NoData(symbol.to_string()))?;
        parse_f64(&row.sum_open_interest_value, "sumOpenInterestValue")
    }
}

// fapi returns numeric fields as strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PremiumIndex {
    mark_price: String,
    last_funding_rate: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenInterestRow {
    sum_open_interest_value: String,
}

#[async_trait]
impl PerpProvider for BinancePerp {
    fn venue(&self) -> &'static str {
        "binance"
    }

    fn perp_symbol(&self, base: &str) -> String {
        format!("{}USDT", base.to_uppercase())
    }

    async fn snapshot(&self, symbol: &str) -> Result<PerpSnapshot, ProviderError> {
        let url = format!("{}/fapi/v1/premiumIndex", self.base_url);
        let px: PremiumIndex =
            get_json(&self.http, &url, &[("symbol", symbol.to_string())]).await?;
        let mark_price = parse_f64(&px.mark_price, "markPrice")?;
        let funding_period_rate = parse_f64(&px.last_funding_rate, "lastFundingRate")?;
        let open_interest_usd = match self.open_interest_usd(symbol).await {
            Ok(oi) => Some(oi),
            Err(err) => {
                tracing::debug!("binance OI unavailable for {symbol}: {err}");
                None
            }
        };
        Ok(PerpSnapshot {
            venue: self.venue(),
            symbol: symbol.to_string(),
            mark_price,
            funding_period_rate,
            open_interest_usd,
            ts_ms: chrono::Utc::now().timestamp_millis(),
        })
    }
}
