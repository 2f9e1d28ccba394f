//! Debt records and boundary normalization

use crate::error::PlannerError;
use serde::{Deserialize, Serialize};

/// A single debt as seen by the payoff engine
///
/// Fields are read-only inputs to the engine. `current_payment` has already
/// been normalized (see [`DebtInput::normalize`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Display label (e.g. "Visa", "Car loan")
    pub name: String,

    /// Amount currently owed
    pub balance: f64,

    /// Annual percentage rate in percent (18.99 = 18.99%/year)
    pub interest_rate: f64,

    /// Contractual minimum monthly payment
    pub minimum_payment: f64,

    /// Amount actually being paid each month
    pub current_payment: f64,
}

impl Debt {
    /// Create a validated debt.
    ///
    /// `current_payment` of `None`, or below the minimum, becomes `minimum_payment`.
    pub fn new(
        name: impl Into<String>,
        balance: f64,
        interest_rate: f64,
        minimum_payment: f64,
        current_payment: Option<f64>,
    ) -> Result<Self, PlannerError> {
        DebtInput {
            name: name.into(),
            balance,
            interest_rate,
            minimum_payment,
            current_payment,
        }
        .normalize()
    }

    /// Monthly interest rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0
    }

    /// Payment used in amortization math.
    ///
    /// Never less than the minimum, even for a hand-built `Debt` that skipped
    /// normalization.
    pub fn effective_payment(&self) -> f64 {
        self.current_payment.max(self.minimum_payment)
    }

    /// Interest accrued on the current balance over one month
    pub fn monthly_interest(&self) -> f64 {
        self.balance * self.monthly_rate()
    }

    /// Check every numeric field is finite and non-negative
    pub fn validate(&self) -> Result<(), PlannerError> {
        check_field(&self.name, "balance", self.balance)?;
        check_field(&self.name, "interest_rate", self.interest_rate)?;
        check_field(&self.name, "minimum_payment", self.minimum_payment)?;
        check_field(&self.name, "current_payment", self.current_payment)?;
        Ok(())
    }
}

/// Debt record as it arrives from a file or request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtInput {
    pub name: String,
    pub balance: f64,
    pub interest_rate: f64,
    pub minimum_payment: f64,
    #[serde(default)]
    pub current_payment: Option<f64>,
}

impl DebtInput {
    /// Validate and convert into an engine [`Debt`].
    ///
    /// This is the only place `current_payment` defaulting happens.
    pub fn normalize(self) -> Result<Debt, PlannerError> {
        check_field(&self.name, "balance", self.balance)?;
        check_field(&self.name, "interest_rate", self.interest_rate)?;
        check_field(&self.name, "minimum_payment", self.minimum_payment)?;
        if let Some(payment) = self.current_payment {
            check_field(&self.name, "current_payment", payment)?;
        }

        let current_payment = match self.current_payment {
            Some(payment) if payment >= self.minimum_payment => payment,
            _ => self.minimum_payment,
        };

        // `+ 0.0` folds -0.0 into 0.0 so ordering by total_cmp treats them alike
        Ok(Debt {
            name: self.name,
            balance: self.balance + 0.0,
            interest_rate: self.interest_rate + 0.0,
            minimum_payment: self.minimum_payment + 0.0,
            current_payment: current_payment + 0.0,
        })
    }
}

impl TryFrom<DebtInput> for Debt {
    type Error = PlannerError;

    fn try_from(input: DebtInput) -> Result<Self, Self::Error> {
        input.normalize()
    }
}

pub(crate) fn check_field(subject: &str, field: &'static str, value: f64) -> Result<(), PlannerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PlannerError::InvalidInput {
            subject: subject.to_string(),
            field,
            value,
        })
    }
}
