// src/config.rs
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("capital must be a finite value >= 0, got {0}")]
    BadCapital(f64),
    #[error("max_weight must be in (0, 1], got {0}")]
    BadMaxWeight(f64),
    #[error("threshold must be finite, got {0}")]
    BadThreshold(f64),
    #[error("funding_neg_thr ({neg}) must be below funding_pos_thr ({pos})")]
    ThresholdOrder { neg: f64, pos: f64 },
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "d_capital")]         pub capital: f64,
    #[serde(default = "d_n_coins")]         pub n_coins: usize,
    #[serde(default = "d_funding_pos")]     pub funding_pos_thr: f64,
    #[serde(default = "d_funding_neg")]     pub funding_neg_thr: f64,
    #[serde(default = "d_basis")]           pub basis_thr: f64,
    #[serde(default = "d_max_weight")]      pub max_weight: f64,
    #[serde(default = "d_vol_lookback")]    pub vol_lookback: usize,
    #[serde(default = "d_http_timeout_ms")] pub http_timeout_ms: u64,
    #[serde(default = "d_out_dir")]         pub out_dir: String,
}
fn d_capital() -> f64 { 10_000.0 }
fn d_n_coins() -> usize { 50 }
fn d_funding_pos() -> f64 { 0.20 }
fn d_funding_neg() -> f64 { -0.20 }
fn d_basis() -> f64 { 0.10 }
fn d_max_weight() -> f64 { 0.35 }
fn d_vol_lookback() -> usize { 30 }
fn d_http_timeout_ms() -> u64 { 15_000 }
fn d_out_dir() -> String { "runs".into() }

#[inline]
pub fn ms(d: u64) -> Duration { Duration::from_millis(d) }

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            capital: d_capital(),
            n_coins: d_n_coins(),
            funding_pos_thr: d_funding_pos(),
            funding_neg_thr: d_funding_neg(),
            basis_thr: d_basis(),
            max_weight: d_max_weight(),
            vol_lookback: d_vol_lookback(),
            http_timeout_ms: d_http_timeout_ms(),
            out_dir: d_out_dir(),
        }
    }
}

impl ScanConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Boundary check, run once before the pipeline. Anything that passes
    /// here degrades per instrument instead of failing the run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.capital.is_finite() || self.capital < 0.0 {
            return Err(ConfigError::BadCapital(self.capital));
        }
        if !self.max_weight.is_finite() || self.max_weight <= 0.0 || self.max_weight > 1.0 {
            return Err(ConfigError::BadMaxWeight(self.max_weight));
        }
        for thr in [self.funding_pos_thr, self.funding_neg_thr, self.basis_thr] {
            if !thr.is_finite() {
                return Err(ConfigError::BadThreshold(thr));
            }
        }
        if self.funding_neg_thr >= self.funding_pos_thr {
            return Err(ConfigError::ThresholdOrder {
                neg: self.funding_neg_thr,
                pos: self.funding_pos_thr,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ScanConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_max_weight() {
        let mut cfg = ScanConfig::default();
        cfg.max_weight = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::BadMaxWeight(_))));
        cfg.max_weight = 1.2;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_capital() {
        let mut cfg = ScanConfig::default();
        cfg.capital = -1.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::BadCapital(_))));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut cfg = ScanConfig::default();
        cfg.funding_neg_thr = 0.30;
        assert!(matches!(cfg.validate(), Err(ConfigError::ThresholdOrder { .. })));
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let cfg: ScanConfig = toml::from_str("capital = 25000.0\nmax_weight = 0.5\n").unwrap();
        assert_eq!(cfg.capital, 25_000.0);
        assert_eq!(cfg.max_weight, 0.5);
        assert_eq!(cfg.n_coins, 50);
        assert_eq!(cfg.out_dir, "runs");
    }
}
