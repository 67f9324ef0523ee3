// src/providers/coingecko.rs
use async_trait::async_trait;
use serde::Deserialize;

use super::http::get_json;
use super::{ProviderError, SpotAsset, SpotProvider};

pub const COINGECKO_BASE: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko supplies the spot universe (top-N by market cap) and the daily
/// close history the vol estimator runs on.
pub struct CoinGecko {
    pub http: reqwest::Client,
    pub base_url: String,
}

impl CoinGecko {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http, base_url: COINGECKO_BASE.to_string() }
    }
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    symbol: String,
    current_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketChart {
    // [[ts_ms, price], ...]
    prices: Vec<(f64, f64)>,
}

#[async_trait]
impl SpotProvider for CoinGecko {
    async fn top_assets(&self, n: usize) -> Result<Vec<SpotAsset>, ProviderError> {
        let url = format!("{}/coins/markets", self.base_url);
        let rows: Vec<MarketRow> = get_json(
            &self.http,
            &url,
            &[
                ("vs_currency", "usd".to_string()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", n.to_string()),
                ("page", "1".to_string()),
                ("sparkline", "false".to_string()),
            ],
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| SpotAsset {
                id: r.id,
                base: r.symbol.to_uppercase(),
                spot_price: r.current_price,
            })
            .collect())
    }

    async fn daily_closes(&self, id: &str, days: u32) -> Result<Vec<f64>, ProviderError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, id);
        let chart: MarketChart = get_json(
            &self.http,
            &url,
            &[
                ("vs_currency", "usd".to_string()),
                ("days", days.to_string()),
                ("interval", "daily".to_string()),
            ],
        )
        .await?;
        Ok(chart.prices.into_iter().map(|(_, px)| px).collect())
    }
}
