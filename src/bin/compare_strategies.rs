//! Compare avalanche and snowball across a range of extra payments
//!
//! Usage: cargo run --bin compare_strategies -- [debts.csv] [--json]
//! Extra payments come from EXTRA_PAYMENTS (comma separated, default 0,50,100,250,500).

use anyhow::{Context, Result};
use debt_planner::{
    debt::{load_debts, loader::DEFAULT_DEBTS_PATH},
    ScenarioRunner, Strategy,
};
use std::env;
use std::time::Instant;

const DEFAULT_EXTRA_PAYMENTS: [f64; 5] = [0.0, 50.0, 100.0, 250.0, 500.0];

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let json_output = env::args().any(|arg| arg == "--json");
    let path = env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .unwrap_or_else(|| DEFAULT_DEBTS_PATH.to_string());

    let extra_payments: Vec<f64> = match env::var("EXTRA_PAYMENTS") {
        Ok(list) => list
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .context("EXTRA_PAYMENTS must be a comma separated list of numbers")?,
        Err(_) => DEFAULT_EXTRA_PAYMENTS.to_vec(),
    };

    let debts = load_debts(&path).with_context(|| format!("Failed to load debts from {}", path))?;
    let runner = ScenarioRunner::new(debts)?;

    let grid = ScenarioRunner::grid(&[Strategy::Avalanche, Strategy::Snowball], &extra_payments);
    let outcomes = runner.run_batch(&grid)?;
    log::info!("Evaluated {} scenarios in {:?}", outcomes.len(), start.elapsed());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    let output_path = "strategy_comparison.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create {}", output_path))?;
    for outcome in &outcomes {
        writer.serialize(outcome)?;
    }
    writer.flush()?;

    println!("{:<10} {:>8} {:>7} {:>12} {:>9} {:>12}", "Strategy", "Extra", "Months", "Interest", "Rollover", "Interest");
    println!("{}", "-".repeat(63));
    for outcome in &outcomes {
        println!(
            "{:<10} {:>8.2} {:>7} {:>12.2} {:>9} {:>12.2}",
            outcome.strategy,
            outcome.extra_payment,
            outcome.months,
            outcome.total_interest,
            outcome.rollover_months,
            outcome.rollover_interest,
        );
    }

    println!("\nOutput written to {}", output_path);
    Ok(())
}
