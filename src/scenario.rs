//! Scenario runner for comparing strategies and extra payments
//!
//! Holds one debt set and evaluates many (strategy, extra payment)
//! combinations against it. Scenarios are independent, so batches run on
//! the rayon thread pool.

use crate::debt::Debt;
use crate::error::PlannerError;
use crate::payoff::{project_schedule, simulate_rollover, PayoffConfig, PayoffEngine, StrategyResult};
use crate::strategy::Strategy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Headline numbers for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub strategy: Strategy,
    pub extra_payment: f64,
    /// Independent-schedule estimate
    pub months: u32,
    /// Interest paid over the independent schedules
    pub total_interest: f64,
    /// Joint simulation with freed payments rolled forward
    pub rollover_months: u32,
    pub rollover_interest: f64,
}

/// Pre-validated debt set for batch scenario runs
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(load_default_debts()?)?;
/// let grid = ScenarioRunner::grid(&[Strategy::Avalanche, Strategy::Snowball], &[0.0, 100.0]);
/// for outcome in runner.run_batch(&grid) {
///     println!("{} +{}: {} months", outcome.strategy, outcome.extra_payment, outcome.months);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    debts: Vec<Debt>,
}

impl ScenarioRunner {
    /// Validate the debts once up front
    pub fn new(debts: Vec<Debt>) -> Result<Self, PlannerError> {
        for debt in &debts {
            debt.validate()?;
        }
        Ok(Self { debts })
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    /// Full plan for a single configuration
    pub fn plan(&self, config: PayoffConfig) -> Result<StrategyResult, PlannerError> {
        PayoffEngine::new(config).plan(&self.debts)
    }

    /// Evaluate one scenario
    pub fn run(&self, config: &PayoffConfig) -> Result<ScenarioOutcome, PlannerError> {
        let result = PayoffEngine::new(config.clone()).plan(&self.debts)?;
        let schedule = project_schedule(&self.debts, config);
        let rollover = simulate_rollover(&self.debts, config.strategy, config.extra_payment);

        Ok(ScenarioOutcome {
            strategy: config.strategy,
            extra_payment: config.extra_payment,
            months: result.estimated_months_to_payoff,
            total_interest: schedule.summary().total_interest,
            rollover_months: rollover.months,
            rollover_interest: rollover.total_interest,
        })
    }

    /// Evaluate many scenarios in parallel, results in input order
    pub fn run_batch(&self, configs: &[PayoffConfig]) -> Result<Vec<ScenarioOutcome>, PlannerError> {
        configs.par_iter().map(|config| self.run(config)).collect()
    }

    /// Every (strategy, extra payment) combination, strategies outermost
    pub fn grid(strategies: &[Strategy], extra_payments: &[f64]) -> Vec<PayoffConfig> {
        strategies
            .iter()
            .flat_map(|&strategy| {
                extra_payments.iter().map(move |&extra_payment| PayoffConfig {
                    strategy,
                    extra_payment,
                    start_date: None,
                })
            })
            .collect()
    }
}
