//! Payoff engine: strategy ordering, payment allocation and payoff estimate

use super::amortization::months_to_payoff;
use crate::debt::{check_field, Debt};
use crate::error::PlannerError;
use crate::strategy::Strategy;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for a payoff plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffConfig {
    /// Priority order for the extra payment
    pub strategy: Strategy,

    /// Flat monthly amount added to the top-priority debt only
    pub extra_payment: f64,

    /// First payment month, used to turn the month count into a date
    pub start_date: Option<NaiveDate>,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Avalanche,
            extra_payment: 0.0,
            start_date: None,
        }
    }
}

impl PayoffConfig {
    /// Build a config from environment variables:
    /// `PAYOFF_STRATEGY`, `EXTRA_PAYMENT`, `PAYOFF_START_DATE` (YYYY-MM-DD).
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, PlannerError> {
        let mut config = Self::default();

        if let Ok(strategy) = env::var("PAYOFF_STRATEGY") {
            config.strategy = Strategy::parse(&strategy);
        }

        if let Ok(extra) = env::var("EXTRA_PAYMENT") {
            config.extra_payment = extra.trim().parse().map_err(|_| PlannerError::InvalidInput {
                subject: "EXTRA_PAYMENT".to_string(),
                field: "extra_payment",
                value: f64::NAN,
            })?;
        }

        if let Ok(date) = env::var("PAYOFF_START_DATE") {
            config.start_date = Some(parse_start_date(&date)?);
        }

        Ok(config)
    }

    /// Reject a negative or non-finite extra payment
    pub fn validate(&self) -> Result<(), PlannerError> {
        check_field("plan", "extra_payment", self.extra_payment)
    }
}

/// Parse a YYYY-MM-DD start date
pub fn parse_start_date(value: &str) -> Result<NaiveDate, PlannerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| PlannerError::InvalidDate(format!("{}: {}", value, e)))
}

/// Monthly payment assigned to one debt, and how long it lasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    pub name: String,
    pub monthly_payment: f64,
    pub months: u32,
}

/// Result of planning one debt set under one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub extra_payment: f64,

    /// Input debts in payoff priority order
    pub ordered_debts: Vec<Debt>,

    /// Per-debt payment, in the same order as `ordered_debts`
    pub allocations: Vec<PaymentAllocation>,

    /// Months until every debt reaches zero, in [0, 600]
    pub estimated_months_to_payoff: u32,

    /// Month of the final payment, when a start date was configured
    pub payoff_date: Option<NaiveDate>,
}

impl StrategyResult {
    /// Sum of all monthly payments in the plan
    pub fn total_monthly_payment(&self) -> f64 {
        self.allocations.iter().map(|a| a.monthly_payment).sum()
    }
}

/// Monthly payment for each debt of an already ordered list.
///
/// Every debt pays its effective payment; the first also gets `extra_payment`.
pub fn allocate_payments(ordered: &[Debt], extra_payment: f64) -> Vec<PaymentAllocation> {
    ordered
        .iter()
        .enumerate()
        .map(|(idx, debt)| {
            let monthly_payment = if idx == 0 {
                debt.effective_payment() + extra_payment
            } else {
                debt.effective_payment()
            };
            let months = months_to_payoff(debt.balance, debt.monthly_rate(), monthly_payment);
            log::debug!(
                "{}: balance={:.2} rate={:.4}% payment={:.2} -> {} months",
                debt.name,
                debt.balance,
                debt.interest_rate,
                monthly_payment,
                months
            );
            PaymentAllocation {
                name: debt.name.clone(),
                monthly_payment,
                months,
            }
        })
        .collect()
}

/// Estimated months until every debt is paid off.
///
/// Each debt amortizes on its own schedule; payments freed by an earlier
/// payoff are not rolled into the next debt (see
/// [`simulate_rollover`](super::simulate_rollover) for that model). The
/// result is the longest per-debt schedule, capped at 600. No debts -> 0.
pub fn estimate_months_to_payoff(
    debts: &[Debt],
    strategy: impl Into<Strategy>,
    extra_payment: f64,
) -> u32 {
    let ordered = strategy.into().order(debts);
    allocate_payments(&ordered, extra_payment)
        .iter()
        .map(|a| a.months)
        .max()
        .unwrap_or(0)
}

/// Payoff engine bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct PayoffEngine {
    config: PayoffConfig,
}

impl PayoffEngine {
    pub fn new(config: PayoffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PayoffConfig {
        &self.config
    }

    /// Validate inputs, then order, allocate and estimate.
    pub fn plan(&self, debts: &[Debt]) -> Result<StrategyResult, PlannerError> {
        self.config.validate()?;
        for debt in debts {
            debt.validate()?;
        }

        let ordered_debts = self.config.strategy.order(debts);
        let allocations = allocate_payments(&ordered_debts, self.config.extra_payment);
        let estimated_months_to_payoff = allocations.iter().map(|a| a.months).max().unwrap_or(0);

        for allocation in allocations.iter().filter(|a| a.months >= super::MAX_PAYOFF_MONTHS) {
            log::warn!(
                "{} does not pay off within {} months at {:.2}/month",
                allocation.name,
                super::MAX_PAYOFF_MONTHS,
                allocation.monthly_payment
            );
        }

        let payoff_date = match self.config.start_date {
            Some(start) => Some(payoff_date(start, estimated_months_to_payoff)?),
            None => None,
        };

        Ok(StrategyResult {
            strategy: self.config.strategy,
            extra_payment: self.config.extra_payment,
            ordered_debts,
            allocations,
            estimated_months_to_payoff,
            payoff_date,
        })
    }
}

/// Date of the final payment for a plan starting at `start`.
///
/// The first payment is made in the start month, so a 1-month plan ends there.
pub fn payoff_date(start: NaiveDate, months: u32) -> Result<NaiveDate, PlannerError> {
    start
        .checked_add_months(Months::new(months.saturating_sub(1)))
        .ok_or_else(|| PlannerError::InvalidDate(format!("{} + {} months", start, months)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::MAX_PAYOFF_MONTHS;

    fn cc_and_loan() -> Vec<Debt> {
        vec![
            Debt::new("CC", 2500.0, 18.99, 75.0, Some(75.0)).unwrap(),
            Debt::new("Loan", 15000.0, 4.5, 200.0, Some(200.0)).unwrap(),
        ]
    }

    #[test]
    fn test_zero_interest_single_debt() {
        let debts = vec![Debt::new("Phone", 1200.0, 0.0, 100.0, Some(100.0)).unwrap()];
        assert_eq!(estimate_months_to_payoff(&debts, "avalanche", 0.0), 12);
    }

    #[test]
    fn test_tiny_rate_single_debt() {
        let debts = vec![Debt::new("Tiny", 1200.0, 1e-15, 100.0, Some(100.0)).unwrap()];
        assert_eq!(estimate_months_to_payoff(&debts, "avalanche", 0.0), 12);
    }

    #[test]
    fn test_hand_built_negative_balance_caps_at_600() {
        let debts = vec![Debt {
            name: "Overpaid".into(),
            balance: -500.0,
            interest_rate: 12.0,
            minimum_payment: 50.0,
            current_payment: 50.0,
        }];
        assert_eq!(estimate_months_to_payoff(&debts, "snowball", 0.0), MAX_PAYOFF_MONTHS);
    }

    #[test]
    fn test_payment_below_interest_caps_at_600() {
        let debts = vec![Debt::new("Card", 10_000.0, 24.0, 1.0, Some(1.0)).unwrap()];
        assert_eq!(estimate_months_to_payoff(&debts, "avalanche", 0.0), 600);
    }

    #[test]
    fn test_empty_debts() {
        assert_eq!(estimate_months_to_payoff(&[], "avalanche", 0.0), 0);
        let result = PayoffEngine::default().plan(&[]).unwrap();
        assert!(result.ordered_debts.is_empty());
        assert_eq!(result.estimated_months_to_payoff, 0);
    }

    #[test]
    fn test_extra_goes_to_top_priority_only() {
        let allocations = allocate_payments(&Strategy::Avalanche.order(&cc_and_loan()), 100.0);
        assert_eq!(allocations[0].name, "CC");
        assert_eq!(allocations[0].monthly_payment, 175.0);
        assert_eq!(allocations[1].monthly_payment, 200.0);
    }

    #[test]
    fn test_extra_payment_never_increases_top_debt_months() {
        let debts = cc_and_loan();
        for strategy in [Strategy::Avalanche, Strategy::Snowball] {
            let ordered = strategy.order(&debts);
            let without = allocate_payments(&ordered, 0.0);
            let with = allocate_payments(&ordered, 100.0);
            assert!(with[0].months <= without[0].months);
            assert!(with[0].months < without[0].months);
            assert_eq!(with[1].months, without[1].months);
        }
    }

    #[test]
    fn test_overall_estimate_is_longest_debt() {
        let debts = cc_and_loan();
        let allocations = allocate_payments(&Strategy::Avalanche.order(&debts), 0.0);
        let longest = allocations.iter().map(|a| a.months).max().unwrap();
        assert_eq!(estimate_months_to_payoff(&debts, "avalanche", 0.0), longest);
        // The 15000 loan at 200/month is the long pole
        assert_eq!(longest, allocations[1].months);
        assert!(longest > 0 && longest < MAX_PAYOFF_MONTHS);
    }

    #[test]
    fn test_hand_built_shortfall_uses_minimum() {
        let debts = vec![Debt {
            name: "Store card".into(),
            balance: 1200.0,
            interest_rate: 0.0,
            minimum_payment: 100.0,
            current_payment: 20.0,
        }];
        assert_eq!(estimate_months_to_payoff(&debts, "snowball", 0.0), 12);
    }

    #[test]
    fn test_plan_rejects_invalid_input() {
        let bad = vec![Debt {
            name: "Broken".into(),
            balance: -50.0,
            interest_rate: 5.0,
            minimum_payment: 10.0,
            current_payment: 10.0,
        }];
        let err = PayoffEngine::default().plan(&bad).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "balance", .. }));

        let engine = PayoffEngine::new(PayoffConfig {
            extra_payment: -10.0,
            ..PayoffConfig::default()
        });
        assert!(engine.plan(&cc_and_loan()).is_err());
    }

    #[test]
    fn test_plan_end_to_end() {
        let engine = PayoffEngine::new(PayoffConfig {
            strategy: Strategy::Snowball,
            extra_payment: 50.0,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        });
        let result = engine.plan(&cc_and_loan()).unwrap();

        assert_eq!(result.ordered_debts[0].name, "CC");
        assert_eq!(result.allocations.len(), 2);
        assert_eq!(result.total_monthly_payment(), 325.0);
        assert_eq!(
            result.estimated_months_to_payoff,
            estimate_months_to_payoff(&cc_and_loan(), Strategy::Snowball, 50.0)
        );

        let expected = payoff_date(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            result.estimated_months_to_payoff,
        )
        .unwrap();
        assert_eq!(result.payoff_date, Some(expected));
    }

    #[test]
    fn test_payoff_date_month_arithmetic() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(payoff_date(start, 1).unwrap(), start);
        assert_eq!(payoff_date(start, 12).unwrap(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        // Clamped to the end of a shorter month
        assert_eq!(payoff_date(start, 2).unwrap(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(payoff_date(start, 0).unwrap(), start);
    }

    #[test]
    fn test_parse_start_date() {
        assert_eq!(
            parse_start_date("2027-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2027, 3, 15).unwrap()
        );
        assert!(matches!(parse_start_date("03/15/2027"), Err(PlannerError::InvalidDate(_))));
    }
}
