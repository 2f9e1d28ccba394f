//! Debt payoff planning: amortization math, engine and timelines

mod amortization;
mod engine;
mod schedule;

pub use amortization::{months_to_payoff, MAX_PAYOFF_MONTHS};
pub use engine::{
    allocate_payments, estimate_months_to_payoff, parse_start_date, payoff_date, PaymentAllocation,
    PayoffConfig, PayoffEngine, StrategyResult,
};
pub use schedule::{
    project_schedule, simulate_rollover, DebtPayoff, PayoffSchedule, RolloverOutcome, ScheduleRow,
    ScheduleSummary,
};
