// src/scanner.rs
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::annualize::{annualize_funding_rate, FUNDING_PERIODS_PER_YEAR};
use crate::config::ScanConfig;
use crate::portfolio::vol::realized_vols;
use crate::portfolio::weights::RiskParity;
use crate::providers::{PerpProvider, PerpSnapshot, SpotAsset, SpotProvider};
use crate::sizing::size_legs;
use crate::strategy::{select_strategies, Thresholds};
use crate::types::{InstrumentMetrics, TradeIdea};

/// One-shot scan: spot universe -> perp snapshots -> annualized metrics ->
/// trade ideas -> risk-parity sized legs.
pub struct Scanner {
    pub cfg: ScanConfig,
    pub spot: Arc<dyn SpotProvider>,
    /// Perp venues in priority order; the first clean answer wins.
    pub perps: Vec<Arc<dyn PerpProvider>>,
}

impl Scanner {
    pub fn new(cfg: ScanConfig, spot: Arc<dyn SpotProvider>, perps: Vec<Arc<dyn PerpProvider>>) -> Self {
        Self { cfg, spot, perps }
    }

    pub async fn run(&self) -> anyhow::Result<Vec<TradeIdea>> {
        let assets = self.spot.top_assets(self.cfg.n_coins).await?;
        tracing::info!("spot universe: {} assets", assets.len());
        let metrics = self.build_metrics(&assets).await;
        let with_perp = metrics.iter().filter(|m| m.venue.is_some()).count();
        tracing::info!("perp coverage: {with_perp}/{} instruments", metrics.len());
        let vols = self.estimate_vols(&assets).await;
        Ok(self.recommend(&metrics, &vols))
    }

    /// The pure tail of the pipeline: classify, weight, size. No I/O, so
    /// callers can feed it fabricated metrics directly.
    pub fn recommend(
        &self,
        metrics: &[InstrumentMetrics],
        vols: &BTreeMap<String, f64>,
    ) -> Vec<TradeIdea> {
        let thr = Thresholds {
            funding_pos: self.cfg.funding_pos_thr,
            funding_neg: self.cfg.funding_neg_thr,
            basis: self.cfg.basis_thr,
        };
        let mut ideas = select_strategies(metrics, &thr);
        let weights = RiskParity::new(self.cfg.max_weight).weights(vols);
        size_legs(&mut ideas, &weights, self.cfg.capital);
        tracing::info!("{} trade ideas across {} weighted assets", ideas.len(), weights.len());
        #[cfg(feature = "metrics")]
        for idea in &ideas {
            crate::metrics::IDEAS_TOTAL
                .with_label_values(&[idea.strategy.as_str()])
                .inc();
        }
        ideas
    }

    async fn build_metrics(&self, assets: &[SpotAsset]) -> Vec<InstrumentMetrics> {
        let futs = assets.iter().map(|a| async move {
            let perp = self.fetch_perp(&a.base).await;
            to_metrics(a, perp)
        });
        join_all(futs).await
    }

    /// Try each venue's symbol guess in priority order.
    async fn fetch_perp(&self, base: &str) -> Option<PerpSnapshot> {
        for prov in &self.perps {
            let symbol = prov.perp_symbol(base);
            match prov.snapshot(&symbol).await {
                Ok(snap) if snap.mark_price.is_finite() && snap.mark_price > 0.0 => {
                    return Some(snap)
                }
                Ok(_) => {
                    tracing::debug!("{} returned degenerate mark for {symbol}", prov.venue());
                }
                Err(err) => {
                    tracing::debug!("{} {symbol}: {err}", prov.venue());
                    #[cfg(feature = "metrics")]
                    crate::metrics::PROVIDER_ERRORS
                        .with_label_values(&[prov.venue()])
                        .inc();
                }
            }
        }
        None
    }

    async fn estimate_vols(&self, assets: &[SpotAsset]) -> BTreeMap<String, f64> {
        let lookback = self.cfg.vol_lookback;
        let futs = assets
            .iter()
            .filter(|a| a.spot_price.is_some())
            .map(|a| async move {
                match self.spot.daily_closes(&a.id, lookback as u32 + 1).await {
                    Ok(closes) => Some((a.base.clone(), closes)),
                    Err(err) => {
                        tracing::debug!("history {}: {err}", a.id);
                        None
                    }
                }
            });
        let closes: BTreeMap<String, Vec<f64>> =
            join_all(futs).await.into_iter().flatten().collect();
        realized_vols(&closes, lookback)
    }
}

fn to_metrics(asset: &SpotAsset, perp: Option<PerpSnapshot>) -> InstrumentMetrics {
    let mut m = InstrumentMetrics {
        base: asset.base.clone(),
        spot_price: asset.spot_price,
        funding_period_rate: None,
        funding_annualized: None,
        mark_price: None,
        basis_annualized: None,
        open_interest_usd: None,
        venue: None,
        venue_symbol: None,
    };
    if let Some(snap) = perp {
        m.mark_price = Some(snap.mark_price);
        m.open_interest_usd = snap.open_interest_usd;
        m.venue = Some(snap.venue.to_string());
        m.venue_symbol = Some(snap.symbol.clone());
        match annualize_funding_rate(snap.funding_period_rate, FUNDING_PERIODS_PER_YEAR) {
            Ok(ann) => {
                m.funding_period_rate = Some(snap.funding_period_rate);
                m.funding_annualized = Some(ann);
            }
            // one bad rate never aborts the scan
            Err(err) => tracing::warn!("{}: dropping funding signal: {err}", asset.base),
        }
        // no dated-contract feed is wired, so the basis stays absent
    }
    m
}
