// src/sizing.rs
use crate::types::{TradeIdea, WeightMap};

/// Fill in `size_usd` for every leg: allocation = capital * weight(base),
/// rounded to cents. Both legs receive the identical amount, keeping the
/// pair delta-neutral. A base absent from the weight map is sized to zero,
/// never dropped. Idempotent for fixed weights and capital.
pub fn size_legs(ideas: &mut [TradeIdea], weights: &WeightMap, capital: f64) {
    for idea in ideas.iter_mut() {
        let w = weights.get(&idea.base).copied().unwrap_or(0.0);
        let alloc = capital * w;
        // a raw NaN/inf must never reach the output
        let usd = if alloc.is_finite() { round_cents(alloc) } else { 0.0 };
        for leg in &mut idea.legs {
            leg.size_usd = Some(usd);
        }
    }
}

fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
