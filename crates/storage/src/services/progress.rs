use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, halves away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Percent of the distance from `initial_weight` to `weight_goal` already
/// covered at `current_weight`, clamped to `[0, 100]` and rounded to two
/// decimal places.
///
/// Returns `None` when no goal is set (`weight_goal <= 0`) or when the goal
/// is not strictly below the starting weight, since there is no distance to
/// cover in that case. Goal edits reject such input, so the second case only
/// shows up with hand-edited rows.
pub fn compute_progress(
    initial_weight: Decimal,
    weight_goal: Decimal,
    current_weight: Decimal,
) -> Option<Decimal> {
    if weight_goal <= Decimal::ZERO {
        return None;
    }

    let span = initial_weight - weight_goal;
    if span <= Decimal::ZERO {
        return None;
    }

    let lost = initial_weight - current_weight;
    let percent = round_cents(lost * Decimal::ONE_HUNDRED / span);

    Some(percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
}
