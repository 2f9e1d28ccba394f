//! Month-by-month payoff timelines

use super::amortization::MAX_PAYOFF_MONTHS;
use super::engine::{allocate_payments, PayoffConfig};
use crate::debt::Debt;
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};

/// Balances below this are treated as paid off
const BALANCE_TOLERANCE: f64 = 1e-6;

/// One month of one debt's amortization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-indexed payment month
    pub month: u32,
    pub debt: String,
    pub opening_balance: f64,
    pub interest: f64,
    pub payment: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Full timeline for a plan, rows grouped by debt in priority order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffSchedule {
    pub strategy: Strategy,
    pub extra_payment: f64,
    pub rows: Vec<ScheduleRow>,
}

/// Totals over a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub final_balance: f64,
}

impl PayoffSchedule {
    /// Rows belonging to one debt
    pub fn rows_for<'a>(&'a self, debt: &'a str) -> impl Iterator<Item = &'a ScheduleRow> + 'a {
        self.rows.iter().filter(move |r| r.debt == debt)
    }

    /// Number of payment months recorded for one debt
    pub fn months_for(&self, debt: &str) -> u32 {
        self.rows_for(debt).map(|r| r.month).max().unwrap_or(0)
    }

    pub fn summary(&self) -> ScheduleSummary {
        let total_months = self.rows.iter().map(|r| r.month).max().unwrap_or(0);
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let total_paid: f64 = self.rows.iter().map(|r| r.payment).sum();

        // Last row of each debt carries its remaining balance
        let mut final_balance = 0.0;
        let mut previous: Option<&ScheduleRow> = None;
        for row in &self.rows {
            if let Some(prev) = previous {
                if prev.debt != row.debt {
                    final_balance += prev.closing_balance;
                }
            }
            previous = Some(row);
        }
        if let Some(last) = previous {
            final_balance += last.closing_balance;
        }

        ScheduleSummary {
            total_months,
            total_interest,
            total_paid,
            final_balance,
        }
    }
}

/// Project each debt's balance month by month under the plan's allocation.
///
/// Uses the same independent-schedule model as
/// [`estimate_months_to_payoff`](super::estimate_months_to_payoff): every debt
/// runs on its own payment until zero or the 600 month cap.
pub fn project_schedule(debts: &[Debt], config: &PayoffConfig) -> PayoffSchedule {
    let ordered = config.strategy.order(debts);
    let allocations = allocate_payments(&ordered, config.extra_payment);
    let mut rows = Vec::new();

    for (debt, allocation) in ordered.iter().zip(&allocations) {
        let rate = debt.monthly_rate();
        let mut balance = debt.balance;

        for month in 1..=MAX_PAYOFF_MONTHS {
            if balance <= BALANCE_TOLERANCE {
                break;
            }

            let interest = balance * rate;
            let payment = allocation.monthly_payment.max(0.0).min(balance + interest);
            let mut closing = balance + interest - payment;
            if closing <= BALANCE_TOLERANCE {
                closing = 0.0;
            }

            rows.push(ScheduleRow {
                month,
                debt: debt.name.clone(),
                opening_balance: balance,
                interest,
                payment,
                principal: payment - interest,
                closing_balance: closing,
            });
            balance = closing;
        }
    }

    PayoffSchedule {
        strategy: config.strategy,
        extra_payment: config.extra_payment,
        rows,
    }
}

/// When one debt cleared under the rollover simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub name: String,
    /// Month of the final payment; `None` if still open at the cap
    pub month: Option<u32>,
}

/// Outcome of the joint rollover simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloverOutcome {
    /// Months until every debt is cleared, capped at 600
    pub months: u32,
    pub total_interest: f64,
    /// Per-debt payoff month, in priority order
    pub payoffs: Vec<DebtPayoff>,
}

/// Joint snowball/avalanche simulation with payment rollover.
///
/// Enhancement over the independent-schedule estimate: the monthly budget
/// (sum of effective payments plus the extra) stays constant, every open
/// debt receives its own payment, and whatever is left (extra, overpayment
/// on a nearly closed debt, payments of debts already cleared) goes to the
/// open debts in priority order. Never slower than the independent model.
pub fn simulate_rollover(debts: &[Debt], strategy: impl Into<Strategy>, extra_payment: f64) -> RolloverOutcome {
    let ordered = strategy.into().order(debts);
    let mut balances: Vec<f64> = ordered.iter().map(|d| d.balance.max(0.0)).collect();
    let mut payoffs: Vec<DebtPayoff> = ordered
        .iter()
        .zip(&balances)
        .map(|(d, &b)| DebtPayoff {
            name: d.name.clone(),
            month: if b <= BALANCE_TOLERANCE { Some(0) } else { None },
        })
        .collect();

    let budget: f64 = ordered.iter().map(|d| d.effective_payment()).sum::<f64>() + extra_payment.max(0.0);
    let mut total_interest = 0.0;
    let mut month = 0;

    while month < MAX_PAYOFF_MONTHS && payoffs.iter().any(|p| p.month.is_none()) {
        month += 1;
        let mut pool = budget;

        // Accrue interest and make each open debt's own payment
        for (idx, debt) in ordered.iter().enumerate() {
            if payoffs[idx].month.is_some() {
                continue;
            }
            let interest = balances[idx] * debt.monthly_rate();
            total_interest += interest;
            balances[idx] += interest;

            let payment = debt.effective_payment().min(balances[idx]).min(pool);
            balances[idx] -= payment;
            pool -= payment;
        }

        // Remaining budget goes to open debts in priority order
        for idx in 0..ordered.len() {
            if pool <= 0.0 {
                break;
            }
            if payoffs[idx].month.is_some() {
                continue;
            }
            let payment = pool.min(balances[idx]);
            balances[idx] -= payment;
            pool -= payment;
        }

        for (idx, payoff) in payoffs.iter_mut().enumerate() {
            if payoff.month.is_none() && balances[idx] <= BALANCE_TOLERANCE {
                balances[idx] = 0.0;
                payoff.month = Some(month);
            }
        }
    }

    let months = if payoffs.iter().all(|p| p.month.is_some()) {
        payoffs.iter().filter_map(|p| p.month).max().unwrap_or(0)
    } else {
        MAX_PAYOFF_MONTHS
    };

    RolloverOutcome {
        months,
        total_interest,
        payoffs,
    }
}
