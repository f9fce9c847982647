//! Expected tax figures, computed locally for comparison with the engine.

use motor_core::Amount;
use rust_decimal::{Decimal, RoundingStrategy};

/// `base * rate_percent / 100`, rounded half away from zero to cents.
pub fn expected_tax(base: Amount, rate_percent: Decimal) -> Amount {
    let tax = base.value() * rate_percent / Decimal::ONE_HUNDRED;
    Amount::new(tax.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
