//! Error type shared by the loaders and the planning boundary

use thiserror::Error;

/// Errors raised at the boundary of the planner.
///
/// The estimation functions themselves never fail; invalid numbers are
/// rejected here, before they reach the amortization math.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// A numeric input was negative, NaN or infinite.
    /// `subject` names the debt, or the plan setting, the value belongs to.
    #[error("invalid input for '{subject}': {field} = {value} (must be a finite, non-negative number)")]
    InvalidInput {
        subject: String,
        field: &'static str,
        value: f64,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Start date that is not YYYY-MM-DD, or a payoff date out of range
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
