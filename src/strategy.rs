//! Payoff strategies and debt ordering

use crate::debt::Debt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order in which debts are prioritized for extra payments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    /// Highest interest rate first
    #[default]
    Avalanche,
    /// Lowest balance first
    Snowball,
    /// Unrecognized identifier: debts keep the order they were given in
    InputOrder,
}

impl Strategy {
    /// Parse a strategy identifier.
    ///
    /// Unknown identifiers are not an error; they fall back to
    /// [`Strategy::InputOrder`], which leaves the debts unsorted.
    pub fn parse(identifier: &str) -> Self {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Strategy::Avalanche,
            "snowball" => Strategy::Snowball,
            other => {
                log::warn!("Unknown payoff strategy '{}', keeping input order", other);
                Strategy::InputOrder
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
            Strategy::InputOrder => "input-order",
        }
    }

    /// Return a reordered copy of `debts` for this strategy.
    ///
    /// Both sorts are stable: debts with equal keys keep their relative order.
    pub fn order(&self, debts: &[Debt]) -> Vec<Debt> {
        let mut ordered = debts.to_vec();
        match self {
            Strategy::Avalanche => {
                ordered.sort_by(|a, b| b.interest_rate.total_cmp(&a.interest_rate));
            }
            Strategy::Snowball => {
                ordered.sort_by(|a, b| a.balance.total_cmp(&b.balance));
            }
            Strategy::InputOrder => {}
        }
        ordered
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<&str> for Strategy {
    fn from(identifier: &str) -> Self {
        Strategy::parse(identifier)
    }
}

impl From<String> for Strategy {
    fn from(identifier: String) -> Self {
        Strategy::parse(&identifier)
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.as_str().to_string()
    }
}

/// Reorder debts per the given strategy identifier.
///
/// Empty input yields an empty vector. The input slice is never modified.
pub fn order_debts(debts: &[Debt], strategy: impl Into<Strategy>) -> Vec<Debt> {
    strategy.into().order(debts)
}
