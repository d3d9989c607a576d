use rust_decimal::{Decimal, RoundingStrategy};

/// `part / whole * 100`, half-up to one decimal place.
///
/// `None` when `whole` is zero or the result does not fit in a `Decimal`.
pub(crate) fn percentage(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| round_half_up(pct, 1))
}

pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
