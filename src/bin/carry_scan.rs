use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use carryscan::config::{ms, ScanConfig};
use carryscan::providers::{
    binance::BinancePerp, bybit::BybitPerp, coingecko::CoinGecko, okx::OkxPerp, PerpProvider,
};
use carryscan::report;
use carryscan::scanner::Scanner;

const USER_AGENT: &str = concat!("carryscan/", env!("CARGO_PKG_VERSION"));

/// Scan spot + perp markets for delta-neutral carry trades and print a
/// risk-parity sized recommendation table.
#[derive(Debug, Parser)]
#[command(name = "carry_scan", version, about)]
struct Args {
    /// TOML config file; CLI flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Total USD to allocate across ideas
    #[arg(long)]
    capital: Option<f64>,
    /// Size of the spot universe (top-N by market cap)
    #[arg(long)]
    n_coins: Option<usize>,
    /// Annualized funding threshold for cash-and-carry
    #[arg(long)]
    funding_pos_thr: Option<f64>,
    /// Annualized funding threshold (negative) for reverse carry
    #[arg(long)]
    funding_neg_thr: Option<f64>,
    /// Annualized basis threshold for quarterly ideas
    #[arg(long)]
    basis_thr: Option<f64>,
    /// Per-asset weight cap in (0, 1]
    #[arg(long)]
    max_weight: Option<f64>,
    /// Days of history for realized vol
    #[arg(long)]
    vol_lookback: Option<usize>,
    /// Directory for the recommendations CSV
    #[arg(long)]
    out_dir: Option<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ScanConfig> {
        let mut cfg = match &self.config {
            Some(path) => ScanConfig::from_path(path)?,
            None => ScanConfig::default(),
        };
        if let Some(v) = self.capital {
            cfg.capital = v;
        }
        if let Some(v) = self.n_coins {
            cfg.n_coins = v;
        }
        if let Some(v) = self.funding_pos_thr {
            cfg.funding_pos_thr = v;
        }
        if let Some(v) = self.funding_neg_thr {
            cfg.funding_neg_thr = v;
        }
        if let Some(v) = self.basis_thr {
            cfg.basis_thr = v;
        }
        if let Some(v) = self.max_weight {
            cfg.max_weight = v;
        }
        if let Some(v) = self.vol_lookback {
            cfg.vol_lookback = v;
        }
        if let Some(v) = self.out_dir {
            cfg.out_dir = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cfg = Args::parse().into_config()?;

    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(ms(cfg.http_timeout_ms))
        .build()?;

    let perps: Vec<Arc<dyn PerpProvider>> = vec![
        Arc::new(BinancePerp::new(http.clone())),
        Arc::new(BybitPerp::new(http.clone())),
        Arc::new(OkxPerp::new(http.clone())),
    ];
    let scanner = Scanner::new(cfg.clone(), Arc::new(CoinGecko::new(http)), perps);

    let ideas = scanner.run().await?;
    let rows = report::flatten(&ideas);
    if rows.is_empty() {
        println!(
            "No strategies matched the current thresholds. \
             Try lowering --funding-pos-thr/--basis-thr or raising --n-coins."
        );
        return Ok(());
    }

    println!("{}", report::render_table(&rows));
    let path = report::save_csv(&rows, Path::new(&cfg.out_dir))?;
    println!("Saved to: {}", path.display());
    Ok(())
}
