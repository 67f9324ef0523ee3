// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Capital weights keyed by base asset. BTreeMap keeps iteration (and
/// therefore report and log order) deterministic for a given input set.
pub type WeightMap = BTreeMap<String, f64>;

/// Per-base-asset snapshot assembled from the spot and perp feeds.
/// `None` always means "no signal", never "zero signal".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentMetrics {
    pub base: String,                     // e.g. "BTC"
    pub spot_price: Option<f64>,          // USD; None = spot data incomplete
    pub funding_period_rate: Option<f64>, // signed, per funding interval (8h)
    pub funding_annualized: Option<f64>,  // present iff funding_period_rate is
    pub mark_price: Option<f64>,
    pub basis_annualized: Option<f64>,    // dated-futures basis, best effort
    pub open_interest_usd: Option<f64>,
    pub venue: Option<String>,            // exchange that supplied perp data
    pub venue_symbol: Option<String>,     // venue-specific contract symbol
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    CashAndCarry,
    ReverseCashAndCarry,
    QuarterlyBasis,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::CashAndCarry => "cash_and_carry",
            StrategyKind::ReverseCashAndCarry => "reverse_cash_and_carry",
            StrategyKind::QuarterlyBasis => "quarterly_basis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Spot,
    Perp,
    Quarterly,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Spot => "spot",
            AssetClass::Perp => "perp",
            AssetClass::Quarterly => "quarterly",
        }
    }
}

/// One side of a delta-neutral pair. `size_usd` stays `None` until sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub venue: Option<String>,
    pub side: Side,
    pub asset: AssetClass,
    pub symbol: String,
    pub size_usd: Option<f64>,
}

impl Leg {
    pub fn open(venue: Option<String>, side: Side, asset: AssetClass, symbol: String) -> Self {
        Self { venue, side, asset, symbol, size_usd: None }
    }
}

/// A candidate position: exactly two legs, one buy and one sell, equal USD
/// notional after sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeIdea {
    pub base: String,
    pub strategy: StrategyKind,
    pub rationale: String,
    pub legs: Vec<Leg>,
    /// Magnitude of the triggering signal, always non-negative.
    pub expected_yield_annualized: f64,
}

/// Flattened per-leg row for tabular output and CSV persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub base: String,
    pub strategy: StrategyKind,
    pub venue: Option<String>,
    pub asset: AssetClass,
    pub side: Side,
    pub symbol: String,
    pub size_usd: f64,
    pub expected_yield_annualized: f64,
}
