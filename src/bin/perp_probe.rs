use carryscan::providers::{binance::BinancePerp, bybit::BybitPerp, okx::OkxPerp, PerpProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base = std::env::args().nth(1).unwrap_or_else(|| "BTC".to_string());
    let http = reqwest::Client::builder()
        .user_agent(concat!("carryscan/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let providers: Vec<Box<dyn PerpProvider>> = vec![
        Box::new(BinancePerp::new(http.clone())),
        Box::new(BybitPerp::new(http.clone())),
        Box::new(OkxPerp::new(http)),
    ];

    for p in &providers {
        let sym = p.perp_symbol(&base);
        match p.snapshot(&sym).await {
            Ok(q) => println!(
                "{:8} {} -> mark={} funding_8h={} oi_usd={:?} ts_ms={}",
                p.venue(), q.symbol, q.mark_price, q.funding_period_rate, q.open_interest_usd, q.ts_ms
            ),
            Err(e) => println!("{:8} {} -> error: {e}", p.venue(), sym),
        }
    }
    Ok(())
}
