// src/strategy.rs
use crate::types::{AssetClass, InstrumentMetrics, Leg, Side, StrategyKind, TradeIdea};

/// Classification thresholds, all annualized fractions.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub funding_pos: f64,
    pub funding_neg: f64,
    pub basis: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { funding_pos: 0.20, funding_neg: -0.20, basis: 0.10 }
    }
}

type Rule = fn(&InstrumentMetrics, &Thresholds) -> Option<TradeIdea>;

/// Independent predicate -> constructor rules. Each is evaluated against
/// every instrument; an instrument may match zero, one, or several.
const RULES: &[Rule] = &[cash_and_carry, reverse_cash_and_carry, quarterly_basis];

/// Classify every instrument with a priceable spot leg. Instruments without
/// a spot price are incomplete data and are skipped, not errors. Output
/// order follows input order, rule order within an instrument.
pub fn select_strategies(metrics: &[InstrumentMetrics], thr: &Thresholds) -> Vec<TradeIdea> {
    let mut ideas = Vec::new();
    for m in metrics {
        if m.spot_price.is_none() {
            continue;
        }
        for rule in RULES {
            if let Some(idea) = rule(m, thr) {
                ideas.push(idea);
            }
        }
    }
    ideas
}

fn spot_symbol(base: &str) -> String {
    format!("{base}/USDT")
}

/// Dated-contract symbol convention: quote suffix swapped USDT -> USDQ.
fn quarterly_symbol(venue_symbol: &str) -> String {
    venue_symbol.replace("USDT", "USDQ")
}

/// Long spot + short perp when funding is rich: collect funding, delta ~ 0.
fn cash_and_carry(m: &InstrumentMetrics, thr: &Thresholds) -> Option<TradeIdea> {
    let funding = m.funding_annualized?;
    let venue_symbol = m.venue_symbol.as_deref()?;
    if funding < thr.funding_pos {
        return None;
    }
    Some(TradeIdea {
        base: m.base.clone(),
        strategy: StrategyKind::CashAndCarry,
        rationale: format!(
            "annualized funding ~ {:.1}% >= {:.0}%; collect funding, delta ~ 0",
            funding * 100.0,
            thr.funding_pos * 100.0
        ),
        legs: vec![
            Leg::open(m.venue.clone(), Side::Buy, AssetClass::Spot, spot_symbol(&m.base)),
            Leg::open(m.venue.clone(), Side::Sell, AssetClass::Perp, venue_symbol.to_string()),
        ],
        expected_yield_annualized: funding,
    })
}

/// Short spot + long perp when funding is deeply negative.
fn reverse_cash_and_carry(m: &InstrumentMetrics, thr: &Thresholds) -> Option<TradeIdea> {
    let funding = m.funding_annualized?;
    let venue_symbol = m.venue_symbol.as_deref()?;
    if funding > thr.funding_neg {
        return None;
    }
    Some(TradeIdea {
        base: m.base.clone(),
        strategy: StrategyKind::ReverseCashAndCarry,
        rationale: format!(
            "annualized funding ~ {:.1}% <= {:.0}%; earn the reverse funding",
            funding * 100.0,
            thr.funding_neg * 100.0
        ),
        legs: vec![
            Leg::open(m.venue.clone(), Side::Sell, AssetClass::Spot, spot_symbol(&m.base)),
            Leg::open(m.venue.clone(), Side::Buy, AssetClass::Perp, venue_symbol.to_string()),
        ],
        expected_yield_annualized: funding.abs(),
    })
}

/// Long spot + short dated future when the annualized basis is wide enough.
fn quarterly_basis(m: &InstrumentMetrics, thr: &Thresholds) -> Option<TradeIdea> {
    let basis = m.basis_annualized?;
    let venue_symbol = m.venue_symbol.as_deref()?;
    if basis < thr.basis {
        return None;
    }
    Some(TradeIdea {
        base: m.base.clone(),
        strategy: StrategyKind::QuarterlyBasis,
        rationale: format!(
            "annualized quarterly basis ~ {:.1}% >= {:.0}%",
            basis * 100.0,
            thr.basis * 100.0
        ),
        legs: vec![
            Leg::open(m.venue.clone(), Side::Buy, AssetClass::Spot, spot_symbol(&m.base)),
            Leg::open(
                m.venue.clone(),
                Side::Sell,
                AssetClass::Quarterly,
                quarterly_symbol(venue_symbol),
            ),
        ],
        expected_yield_annualized: basis,
    })
}
