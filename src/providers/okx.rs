// src/providers/okx.rs
use async_trait::async_trait;
use serde::Deserialize;

use super::http::get_json;
use super::{parse_f64, PerpProvider, PerpSnapshot, ProviderError};

pub const OKX_BASE: &str = "https://www.okx.com";

/// OKX USDT swaps. No mark-price field on the public ticker, so last trade
/// (falling back to best ask) stands in for the mark.
pub struct OkxPerp {
    pub http: reqwest::Client,
    pub base_url: String,
}

impl OkxPerp {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http, base_url: OKX_BASE.to_string() }
    }

    async fn ticker_price(&self, inst_id: &str) -> Result<f64, ProviderError> {
        let url = format!("{}/api/v5/market/ticker", self.base_url);
        let resp: OkxResp<Ticker> =
            get_json(&self.http, &url, &[("instId", inst_id.to_string())]).await?;
        let t = resp
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoData(inst_id.to_string()))?;
        let px = t.last.or(t.ask_px).ok_or(ProviderError::Payload("ticker price"))?;
        parse_f64(&px, "last/askPx")
    }

    async fn funding_rate(&self, inst_id: &str) -> Result<f64, ProviderError> {
        let url = format!("{}/api/v5/public/funding-rate", self.base_url);
        let resp: OkxResp<Funding> =
            get_json(&self.http, &url, &[("instId", inst_id.to_string())]).await?;
        let f = resp
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoData(inst_id.to_string()))?;
        parse_f64(&f.funding_rate, "fundingRate")
    }
}

// OKX envelope: {"code": "0", "data": [...]}
#[derive(Debug, Deserialize)]
struct OkxResp<T> {
    #[serde(default)]
    data: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker {
    last: Option<String>,
    ask_px: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Funding {
    funding_rate: String,
}

#[async_trait]
impl PerpProvider for OkxPerp {
    fn venue(&self) -> &'static str {
        "okx"
    }

    fn perp_symbol(&self, base: &str) -> String {
        format!("{}-USDT-SWAP", base.to_uppercase())
    }

    async fn snapshot(&self, symbol: &str) -> Result<PerpSnapshot, ProviderError> {
        let mark_price = self.ticker_price(symbol).await?;
        let funding_period_rate = self.funding_rate(symbol).await?;
        Ok(PerpSnapshot {
            venue: self.venue(),
            symbol: symbol.to_string(),
            mark_price,
            funding_period_rate,
            open_interest_usd: None,
            ts_ms: chrono::Utc::now().timestamp_millis(),
        })
    }
}
