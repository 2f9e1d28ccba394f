//! Debt Planner CLI
//!
//! Loads a debt file, builds a payoff plan and prints it.
//! Defaults come from PAYOFF_STRATEGY, EXTRA_PAYMENT and PAYOFF_START_DATE;
//! command-line flags override them.

use anyhow::{Context, Result};
use clap::Parser;
use debt_planner::{
    debt::{load_debts, load_debts_from_json, loader::DEFAULT_DEBTS_PATH},
    payoff::{parse_start_date, project_schedule, simulate_rollover, PayoffConfig, PayoffEngine},
    Strategy,
};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "debt_planner", version, about = "Plan a debt payoff with the avalanche or snowball strategy")]
struct Args {
    /// Debt file (.csv, or .json array of debt records)
    #[arg(short, long, default_value = DEFAULT_DEBTS_PATH)]
    debts: PathBuf,

    /// Payoff strategy: avalanche or snowball (anything else keeps file order)
    #[arg(short, long)]
    strategy: Option<String>,

    /// Extra monthly payment applied to the top-priority debt
    #[arg(short, long)]
    extra: Option<f64>,

    /// Month of the first payment (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// Write the month-by-month schedule to this CSV file
    #[arg(long)]
    schedule: Option<PathBuf>,
}

#[derive(Serialize)]
struct PlanResponse<'a> {
    plan: &'a debt_planner::StrategyResult,
    schedule: debt_planner::payoff::ScheduleSummary,
    rollover: debt_planner::payoff::RolloverOutcome,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = PayoffConfig::from_env().context("Invalid payoff settings in environment")?;
    if let Some(strategy) = &args.strategy {
        config.strategy = Strategy::parse(strategy);
    }
    if let Some(extra) = args.extra {
        config.extra_payment = extra;
    }
    if let Some(date) = &args.start_date {
        config.start_date = Some(parse_start_date(date)?);
    }

    let debts = if args.debts.extension().is_some_and(|ext| ext == "json") {
        let file = File::open(&args.debts)
            .with_context(|| format!("Unable to open {}", args.debts.display()))?;
        load_debts_from_json(file)
    } else {
        load_debts(&args.debts)
    }
    .with_context(|| format!("Failed to load debts from {}", args.debts.display()))?;
    log::info!("Loaded {} debts from {}", debts.len(), args.debts.display());

    let engine = PayoffEngine::new(config.clone());
    let plan = engine.plan(&debts)?;
    let schedule = project_schedule(&debts, &config);
    let rollover = simulate_rollover(&debts, config.strategy, config.extra_payment);

    if let Some(path) = &args.schedule {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        for row in &schedule.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::info!("Wrote {} schedule rows to {}", schedule.rows.len(), path.display());
    }

    if args.json {
        let response = PlanResponse {
            plan: &plan,
            schedule: schedule.summary(),
            rollover,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Debt Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("===================\n");
    println!("Strategy: {}", plan.strategy);
    println!("Extra payment: ${:.2}/month\n", plan.extra_payment);

    println!("{:>3} {:<20} {:>12} {:>8} {:>10} {:>7}", "#", "Debt", "Balance", "APR", "Payment", "Months");
    println!("{}", "-".repeat(65));
    for (idx, (debt, allocation)) in plan.ordered_debts.iter().zip(&plan.allocations).enumerate() {
        println!(
            "{:>3} {:<20} {:>12.2} {:>7.2}% {:>10.2} {:>7}",
            idx + 1,
            debt.name,
            debt.balance,
            debt.interest_rate,
            allocation.monthly_payment,
            allocation.months,
        );
    }

    let summary = schedule.summary();
    println!("\nSummary:");
    println!("  Total monthly payment: ${:.2}", plan.total_monthly_payment());
    println!("  Months to payoff: {}", plan.estimated_months_to_payoff);
    if let Some(date) = plan.payoff_date {
        println!("  Debt-free by: {}", date.format("%B %Y"));
    }
    println!("  Total interest: ${:.2}", summary.total_interest);
    println!(
        "  With rollover: {} months, ${:.2} interest",
        rollover.months, rollover.total_interest
    );

    Ok(())
}
