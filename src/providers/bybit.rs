// src/providers/bybit.rs
use async_trait::async_trait;
use serde::Deserialize;

use super::http::get_json;
use super::{parse_f64, PerpProvider, PerpSnapshot, ProviderError};

pub const BYBIT_BASE: &str = "https://api.bybit.com";

/// Bybit v5 linear perpetuals.
pub struct BybitPerp {
    pub http: reqwest::Client,
    pub base_url: String,
}

impl BybitPerp {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http, base_url: BYBIT_BASE.to_string() }
    }

    async fn mark_and_oi(&self, symbol: &str) -> Result<(f64, Option<f64>), ProviderError> {
        let url = format!("{}/v5/market/tickers", self.base_url);
        let resp: V5Resp<Ticker> = get_json(
            &self.http,
            &url,
            &[("category", "linear".to_string()), ("symbol", symbol.to_string())],
        )
        .await?;
        let t = resp
            .result
            .list
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoData(symbol.to_string()))?;
        let mark = parse_f64(&t.mark_price, "markPrice")?;
        let oi = t
            .open_interest_value
            .as_deref()
            .and_then(|s| s.parse::<f64>().ok());
        Ok((mark, oi))
    }

    async fn last_funding(&self, symbol: &str) -> Result<f64, ProviderError> {
        let url = format!("{}/v5/market/funding/history", self.base_url);
        let resp: V5Resp<FundingRow> = get_json(
            &self.http,
            &url,
            &[
                ("category", "linear".to_string()),
                ("symbol", symbol.to_string()),
                ("limit", "1".to_string()),
            ],
        )
        .await?;
        let row = resp
            .result
            .list
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoData(symbol.to_string()))?;
        parse_f64(&row.funding_rate, "fundingRate")
    }
}

// v5 envelope: {"result": {"list": [...]}}
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de> + Default"))]
struct V5Resp<T> {
    result: V5Result<T>,
}

#[derive(Debug, Deserialize)]
struct V5Result<T> {
    #[serde(default)]
    list: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker {
    mark_price: String,
    open_interest_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FundingRow {
    funding_rate: String,
}

#[async_trait]
impl PerpProvider for BybitPerp {
    fn venue(&self) -> &'static str {
        "bybit"
    }

    fn perp_symbol(&self, base: &str) -> String {
        format!("{}USDT", base.to_uppercase())
    }

    async fn snapshot(&self, symbol: &str) -> Result<PerpSnapshot, ProviderError> {
        let (mark_price, open_interest_usd) = self.mark_and_oi(symbol).await?;
        let funding_period_rate = self.last_funding(symbol).await?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn parses_v5_ticker_and_funding_history() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v5/market/tickers").query_param("symbol", "SOLUSDT");
            then.status(200).json_body(serde_json::json!({
                "retCode": 0,
                "result": {"category": "linear", "list": [
                    {"symbol": "SOLUSDT", "markPrice": "148.35", "openInterestValue": "740000000"}
                ]}
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v5/market/funding/history");
            then.status(200).json_body(serde_json::json!({
                "retCode": 0,
                "result": {"list": [
                    {"symbol": "SOLUSDT", "fundingRate": "0.00025", "fundingRateTimestamp": "1700000000000"}
                ]}
            }));
        });

        let p = BybitPerp { http: reqwest::Client::new(), base_url: server.base_url() };
        let snap = p.snapshot("SOLUSDT").await.unwrap();
        assert_eq!(snap.venue, "bybit");
        assert_eq!(snap.mark_price, 148.35);
        assert_eq!(snap.funding_period_rate, 0.00025);
        assert_eq!(snap.open_interest_usd, Some(740_000_000.0));
    }

    #[tokio::test]
    async fn empty_list_is_no_data() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v5/market/tickers");
            then.status(200).json_body(serde_json::json!({"result": {"list": []}}));
        });
        let p = BybitPerp { http: reqwest::Client::new(), base_url: server.base_url() };
        assert!(matches!(p.snapshot("NOPEUSDT").await, Err(ProviderError::NoData(_))));
    }
}
