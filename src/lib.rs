//! Debt Planner - Debt payoff amortization and strategy-ordering engine
//!
//! This library provides:
//! - Avalanche (highest rate first) and snowball (lowest balance first) ordering
//! - Per-debt payment allocation with an extra payment on the top-priority debt
//! - Closed-form months-to-payoff estimates, capped at 600 months
//! - Month-by-month payoff schedules and a joint rollover simulation
//! - Batch strategy comparison

pub mod debt;
pub mod error;
pub mod payoff;
pub mod scenario;
pub mod strategy;

// Re-export commonly used types
pub use debt::{Debt, DebtInput};
pub use error::PlannerError;
pub use payoff::{
    estimate_months_to_payoff, PayoffConfig, PayoffEngine, StrategyResult, MAX_PAYOFF_MONTHS,
};
pub use scenario::ScenarioRunner;
pub use strategy::{order_debts, Strategy};
