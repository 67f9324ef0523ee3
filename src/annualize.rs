// src/annualize.rs
use thiserror::Error;

/// Perp funding settles every 8h, so three events per day.
pub const FUNDING_PERIODS_PER_YEAR: u32 = 3 * 365;

#[derive(Debug, Error, PartialEq)]
pub enum RateError {
    #[error("invalid periodic rate {0}: must be a finite value > -1")]
    InvalidRate(f64),
}

/// Compound a periodic funding rate into an annualized figure:
/// (1 + r)^periods - 1. Funding compounds, it is not simple interest.
pub fn annualize_funding_rate(periodic_rate: f64, periods_per_year: u32) -> Result<f64, RateError> {
    if !periodic_rate.is_finite() || periodic_rate <= -1.0 {
        return Err(RateError::InvalidRate(periodic_rate));
    }
    Ok((1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0)
}

/// Simple (non-compounded) annualization of a dated-futures basis:
/// (futures/spot - 1) * 365/days. A single fixed-date convergence does not
/// compound. `None` for non-positive inputs: missing data, not a fault.
pub fn annualize_basis(spot: f64, futures: f64, days_to_expiry: f64) -> Option<f64> {
    if spot <= 0.0 || futures <= 0.0 || days_to_expiry <= 0.0 {
        return None;
    }
    Some((futures / spot - 1.0) * (365.0 / days_to_expiry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funding_zero_rate_is_zero_yield() {
        assert_eq!(annualize_funding_rate(0.0, FUNDING_PERIODS_PER_YEAR), Ok(0.0));
    }

    #[test]
    fn funding_matches_closed_form() {
        let y = annualize_funding_rate(0.01, 1095).unwrap();
        let expected = 1.01_f64.powi(1095) - 1.0;
        assert!((y - expected).abs() < 1e-9);
    }

    #[test]
    fn funding_is_monotonic_in_rate() {
        let lo = annualize_funding_rate(-0.0001, FUNDING_PERIODS_PER_YEAR).unwrap();
        let mid = annualize_funding_rate(0.0, FUNDING_PERIODS_PER_YEAR).unwrap();
        let hi = annualize_funding_rate(0.0001, FUNDING_PERIODS_PER_YEAR).unwrap();
        assert!(lo < mid && mid < hi);
    }

    #[test]
    fn funding_rejects_rate_at_or_below_minus_one() {
        assert_eq!(
            annualize_funding_rate(-1.0, 1095),
            Err(RateError::InvalidRate(-1.0))
        );
        assert!(annualize_funding_rate(-1.5, 1095).is_err());
        assert!(annualize_funding_rate(f64::NAN, 1095).is_err());
    }

    #[test]
    fn funding_near_minus_one_stays_above_minus_one() {
        let y = annualize_funding_rate(-0.999, 1095).unwrap();
        assert!(y > -1.0 && y < 0.0);
    }

    #[test]
    fn basis_not_computable_on_degenerate_inputs() {
        assert_eq!(annualize_basis(0.0, 110.0, 91.0), None);
        assert_eq!(annualize_basis(100.0, 0.0, 91.0), None);
        assert_eq!(annualize_basis(100.0, 110.0, 0.0), None);
    }

    #[test]
    fn basis_simple_annualization() {
        let b = annualize_basis(100.0, 110.0, 91.0).unwrap();
        assert!((b - 0.10 * (365.0 / 91.0)).abs() < 1e-12);
        assert!((b - 0.4011).abs() < 1e-3);
    }
}
