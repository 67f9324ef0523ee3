// src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, IntCounterVec};

pub static IDEAS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "carryscan_ideas_total", "Trade ideas emitted", &["strategy"] // cash_and_carry|reverse_cash_and_carry|quarterly_basis
    ).unwrap()
});

pub static PROVIDER_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "carryscan_provider_errors_total", "Venue fetches that failed", &["venue"] // binance|bybit|okx|coingecko
    ).unwrap()
});
