// src/report.rs
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::types::{ReportRow, TradeIdea};

pub const CSV_NAME: &str = "latest_recommendations.csv";

/// Flatten sized ideas into one row per leg, sorted by
/// (strategy, base, asset class) so output is deterministic.
pub fn flatten(ideas: &[TradeIdea]) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = Vec::with_capacity(ideas.len() * 2);
    for idea in ideas {
        for leg in &idea.legs {
            rows.push(ReportRow {
                base: idea.base.clone(),
                strategy: idea.strategy,
                venue: leg.venue.clone(),
                asset: leg.asset,
                side: leg.side,
                symbol: leg.symbol.clone(),
                size_usd: leg.size_usd.unwrap_or(0.0),
                expected_yield_annualized: idea.expected_yield_annualized,
            });
        }
    }
    rows.sort_by(|a, b| {
        (a.strategy.as_str(), &a.base, a.asset.as_str())
            .cmp(&(b.strategy.as_str(), &b.base, b.asset.as_str()))
    });
    rows
}

const HEADERS: [&str; 8] =
    ["base", "strategy", "venue", "asset", "side", "symbol", "size_usd", "exp_yield"];

fn cells(row: &ReportRow) -> [String; 8] {
    [
        row.base.clone(),
        row.strategy.as_str().to_string(),
        row.venue.clone().unwrap_or_else(|| "-".to_string()),
        row.asset.as_str().to_string(),
        row.side.as_str().to_string(),
        row.symbol.clone(),
        format!("{:.2}", row.size_usd),
        format!("{:.1}%", row.expected_yield_annualized * 100.0),
    ]
}

/// Column-aligned text table for stdout.
pub fn render_table(rows: &[ReportRow]) -> String {
    let body: Vec<[String; 8]> = rows.iter().map(cells).collect();
    let mut widths: [usize; 8] = HEADERS.map(str::len);
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    let mut out = String::new();
    for (i, h) in HEADERS.iter().enumerate() {
        let _ = write!(out, "{:width$}  ", h, width = widths[i]);
    }
    out.push('\n');
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            let _ = write!(out, "{:width$}  ", cell, width = widths[i]);
        }
        out.push('\n');
    }
    out
}

/// Persist the rows as CSV under `out_dir`, overwriting the previous run.
pub fn save_csv(rows: &[ReportRow], out_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(CSV_NAME);
    let mut out = String::new();
    out.push_str("base,strategy,venue,asset,side,symbol,size_usd,expected_yield_annualized\n");
    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{:.2},{:.6}",
            row.base,
            row.strategy.as_str(),
            row.venue.as_deref().unwrap_or(""),
            row.asset.as_str(),
            row.side.as_str(),
            row.symbol,
            row.size_usd,
            row.expected_yield_annualized,
        );
    }
    std::fs::write(&path, out)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetClass, Leg, Side, StrategyKind};

    fn idea(base: &str, strategy: StrategyKind, yield_ann: f64) -> TradeIdea {
        let mut legs = vec![
            Leg::open(
                Some("binance".to_string()),
                Side::Buy,
                AssetClass::Spot,
                format!("{base}/USDT"),
            ),
            Leg::open(
                Some("binance".to_string()),
                Side::Sell,
                AssetClass::Perp,
                format!("{base}USDT"),
            ),
        ];
        for leg in &mut legs {
            leg.size_usd = Some(1000.0);
        }
        TradeIdea {
            base: base.to_string(),
            strategy,
            rationale: String::new(),
            legs,
            expected_yield_annualized: yield_ann,
        }
    }

    #[test]
    fn rows_sort_by_strategy_then_base_then_asset() {
        let ideas = vec![
            idea("ETH", StrategyKind::QuarterlyBasis, 0.15),
            idea("ETH", StrategyKind::CashAndCarry, 0.22),
            idea("BTC", StrategyKind::CashAndCarry, 0.25),
        ];
        let rows = flatten(&ideas);
        assert_eq!(rows.len(), 6);
        let keys: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r.strategy.as_str(), r.base.as_str(), r.asset.as_str()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], ("cash_and_carry", "BTC", "perp"));
    }

    #[test]
    fn unsized_legs_render_as_zero() {
        let mut one = idea("BTC", StrategyKind::CashAndCarry, 0.25);
        for leg in &mut one.legs {
            leg.size_usd = None;
        }
        let rows = flatten(&[one]);
        assert!(rows.iter().all(|r| r.size_usd == 0.0));
    }

    #[test]
    fn table_has_header_and_one_line_per_row() {
        let rows = flatten(&[idea("BTC", StrategyKind::CashAndCarry, 0.25)]);
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("strategy"));
        assert!(lines[1].contains("BTC"));
    }

    #[test]
    fn csv_round_trips_through_the_filesystem() {
        let rows = flatten(&[idea("BTC", StrategyKind::CashAndCarry, 0.25)]);
        let dir = std::env::temp_dir().join("carryscan-report-test");
        let path = save_csv(&rows, &dir).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "base,strategy,venue,asset,side,symbol,size_usd,expected_yield_annualized"
        );
        assert!(lines[1].starts_with("BTC,cash_and_carry,binance,perp,sell,BTCUSDT,1000.00,"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
