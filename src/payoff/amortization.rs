//! Closed-form amortization period for a single debt

/// Upper bound on any payoff estimate (50 years)
pub const MAX_PAYOFF_MONTHS: u32 = 600;

/// Slack applied before rounding up, so 12.000000000001 counts as 12 months
const MONTHS_TOLERANCE: f64 = 1e-9;

/// Months needed to pay `balance` down to zero with a level monthly `payment`.
///
/// Uses the amortization-period formula solved for the number of periods:
///
/// ```text
/// n = -ln(1 - B*r / P) / ln(1 + r)
/// ```
///
/// with `r` the monthly rate, falling back to `B / P` when `r == 0`. The result
/// is rounded up and capped at [`MAX_PAYOFF_MONTHS`]. A payment that does not
/// cover the accruing interest, a non-positive payment, a negative balance,
/// or any non-finite input returns the cap instead of failing.
pub fn months_to_payoff(balance: f64, monthly_rate: f64, payment: f64) -> u32 {
    if !(balance.is_finite() && monthly_rate.is_finite() && payment.is_finite()) {
        return MAX_PAYOFF_MONTHS;
    }

    // Nothing owed
    if balance == 0.0 {
        return 0;
    }

    if balance < 0.0 || payment <= 0.0 || monthly_rate < 0.0 {
        return MAX_PAYOFF_MONTHS;
    }

    let periods = if monthly_rate == 0.0 {
        balance / payment
    } else {
        let interest = balance * monthly_rate;
        if payment <= interest {
            // Balance never shrinks
            return MAX_PAYOFF_MONTHS;
        }
        -(-interest / payment).ln_1p() / monthly_rate.ln_1p()
    };

    cap_months(periods)
}

/// Round a fractional period count up and clamp it to [0, MAX_PAYOFF_MONTHS]
fn cap_months(periods: f64) -> u32 {
    if !periods.is_finite() {
        return MAX_PAYOFF_MONTHS;
    }
    let months = (periods - MONTHS_TOLERANCE).ceil().max(0.0);
    if months >= MAX_PAYOFF_MONTHS as f64 {
        MAX_PAYOFF_MONTHS
    } else {
        months as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interest_simple_division() {
        assert_eq!(months_to_payoff(1200.0, 0.0, 100.0), 12);
        assert_eq!(months_to_payoff(1250.0, 0.0, 100.0), 13);
    }

    #[test]
    fn test_payment_below_interest_is_capped() {
        // 10000 at 24% APR accrues 200/month
        let rate = 24.0 / 100.0 / 12.0;
        assert_eq!(months_to_payoff(10_000.0, rate, 1.0), MAX_PAYOFF_MONTHS);
        assert_eq!(months_to_payoff(10_000.0, rate, 200.0), MAX_PAYOFF_MONTHS);
    }

    #[test]
    fn test_standard_loan_term() {
        // 10000 at 6% APR with the 60-month annuity payment of 193.33
        let rate = 0.06 / 12.0;
        assert_eq!(months_to_payoff(10_000.0, rate, 193.33), 60);
    }

    #[test]
    fn test_degenerate_inputs_hit_cap() {
        assert_eq!(months_to_payoff(500.0, 0.0, 0.0), MAX_PAYOFF_MONTHS);
        assert_eq!(months_to_payoff(500.0, 0.01, -5.0), MAX_PAYOFF_MONTHS);
        assert_eq!(months_to_payoff(f64::NAN, 0.01, 50.0), MAX_PAYOFF_MONTHS);
        assert_eq!(months_to_payoff(500.0, 0.0, 1e-9), MAX_PAYOFF_MONTHS);
    }

    #[test]
    fn test_zero_balance_needs_no_months() {
        assert_eq!(months_to_payoff(0.0, 0.015, 75.0), 0);
        assert_eq!(months_to_payoff(0.0, 0.0, 0.0), 0);
    }

    #[test]
    fn test_negative_balance_hits_cap() {
        assert_eq!(months_to_payoff(-500.0, 0.01, 50.0), MAX_PAYOFF_MONTHS);
        assert_eq!(months_to_payoff(-500.0, 0.0, 50.0), MAX_PAYOFF_MONTHS);
        assert_eq!(months_to_payoff(-0.0, 0.01, 50.0), 0);
    }

    #[test]
    fn test_tiny_rate_matches_zero_rate() {
        // 1e-15% APR: interest / payment is far below f64 epsilon
        let rate = 1e-15 / 100.0 / 12.0;
        assert_eq!(months_to_payoff(1200.0, rate, 100.0), 12);
        assert_eq!(months_to_payoff(1200.0, 1e-12, 100.0), 12);
        assert_eq!(months_to_payoff(1250.0, rate, 100.0), months_to_payoff(1250.0, 0.0, 100.0));
    }

    #[test]
    fn test_long_but_convergent_payoff_capped() {
        // Payment barely above interest: converges, but after more than 50 years
        let rate = 0.12 / 12.0;
        assert_eq!(months_to_payoff(10_000.0, rate, 100.1), MAX_PAYOFF_MONTHS);
    }
}
