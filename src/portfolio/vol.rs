// src/portfolio/vol.rs
use std::collections::BTreeMap;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annualized realized volatility from daily closes: population standard
/// deviation of log returns over the last `lookback` points, scaled by
/// sqrt(252). Series shorter than max(lookback, 5) are skipped.
pub fn realized_vols(
    closes: &BTreeMap<String, Vec<f64>>,
    lookback: usize,
) -> BTreeMap<String, f64> {
    let mut vols = BTreeMap::new();
    for (base, series) in closes {
        if series.len() < lookback.max(5) {
            continue;
        }
        let tail = &series[series.len() - lookback..];
        let rets: Vec<f64> = tail
            .windows(2)
            .filter(|w| w[0] > 0.0 && w[1] > 0.0)
            .map(|w| (w[1] / w[0]).ln())
            .collect();
        if rets.len() > 1 {
            vols.insert(base.clone(), std_dev(&rets) * TRADING_DAYS_PER_YEAR.sqrt());
        }
    }
    vols
}

fn std_dev(xs: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}
