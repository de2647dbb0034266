//! Money helpers over `BigDecimal`

use bigdecimal::{BigDecimal, RoundingMode};

/// Round an amount half-up to `scale` decimal places
pub fn round_money(amount: &BigDecimal, scale: i64) -> BigDecimal {
    amount.with_scale_round(scale, RoundingMode::HalfUp)
}

/// `amount * percent / 100`, rounded half-up to `scale` decimal places
pub fn percent_of(amount: &BigDecimal, percent: &BigDecimal, scale: i64) -> BigDecimal {
    round_money(&((amount * percent) / BigDecimal::from(100)), scale)
}

pub fn zero() -> BigDecimal {
    BigDecimal::from(0)
}
