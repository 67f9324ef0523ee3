// src/portfolio/weights.rs
use crate::types::WeightMap;
use std::collections::BTreeMap;

/// Inverse-volatility risk parity with a per-asset cap.
pub struct RiskParity {
    pub max_weight: f64,
}

impl RiskParity {
    pub fn new(max_weight: f64) -> Self {
        Self { max_weight }
    }

    /// Lower-vol assets get proportionally more capital. Assets with absent
    /// or non-positive vol never receive weight; an empty set after
    /// filtering yields an empty map, which is a valid terminal state.
    ///
    /// Weights over the cap are clamped to `max_weight` and the clamped
    /// excess is redistributed proportionally over the still-under-cap
    /// weights so the grand total stays at 1.0. Single-pass: if the
    /// redistribution pushes a previously-under-cap weight over the line it
    /// is not re-clamped. A known approximation, kept as the default.
    pub fn weights(&self, vols: &BTreeMap<String, f64>) -> WeightMap {
        let mut inv: BTreeMap<String, f64> = BTreeMap::new();
        for (base, v) in vols {
            if v.is_finite() && *v > 0.0 {
                inv.insert(base.clone(), 1.0 / v);
            }
        }
        if inv.is_empty() {
            return WeightMap::new();
        }

        let total: f64 = inv.values().sum();
        let mut w: WeightMap = inv.into_iter().map(|(k, v)| (k, v / total)).collect();

        let excess: f64 = w.values().map(|v| (v - self.max_weight).max(0.0)).sum();
        if excess > 0.0 {
            let under: Vec<String> = w
                .iter()
                .filter(|(_, v)| **v < self.max_weight)
                .map(|(k, _)| k.clone())
                .collect();
            let under_total: f64 = under.iter().map(|k| w[k]).sum();
            for v in w.values_mut() {
                if *v > self.max_weight {
                    *v = self.max_weight;
                }
            }
            if under_total > 0.0 {
                let scale = (under_total + excess) / under_total;
                for k in &under {
                    if let Some(v) = w.get_mut(k) {
                        *v *= scale;
                    }
                }
            }
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vols(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn equal_vols_split_evenly() {
        let w = RiskParity::new(0.5).weights(&vols(&[("A", 0.5), ("B", 0.5), ("C", 0.5)]));
        let sum: f64 = w.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        for v in w.values() {
            assert!((v - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn cap_clamps_and_redistributes() {
        let w = RiskParity::new(0.35).weights(&vols(&[("A", 0.1), ("B", 1.0), ("C", 1.0)]));
        assert_eq!(w["A"], 0.35);
        let sum: f64 = w.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        // B and C share the excess equally
        assert!((w["B"] - w["C"]).abs() < 1e-12);
        assert!(w["B"] > 1.0 / 12.0);
    }

    #[test]
    fn under_cap_weights_pass_through_unchanged() {
        let w = RiskParity::new(0.9).weights(&vols(&[("A", 0.2), ("B", 0.8)]));
        // raw inverse-vol weights: 5/(5+1.25) and 1.25/(5+1.25)
        assert!((w["A"] - 0.8).abs() < 1e-9);
        assert!((w["B"] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn non_positive_or_missing_vols_are_dropped() {
        let w = RiskParity::new(0.35).weights(&vols(&[("A", 0.5), ("B", 0.0), ("C", -1.0)]));
        assert!(!w.contains_key("B"));
        assert!(!w.contains_key("C"));
        assert!((w["A"] - 0.35).abs() < 1e-12); // lone asset hits the cap
    }

    #[test]
    fn degenerate_input_gives_empty_map() {
        assert!(RiskParity::new(0.35).weights(&BTreeMap::new()).is_empty());
        assert!(RiskParity::new(0.35)
            .weights(&vols(&[("A", 0.0), ("B", -0.2)]))
            .is_empty());
    }
}
