use core_types::{FormulaError, GdpComponents, Outcome};
use rust_decimal::{Decimal, RoundingStrategy};

/// Divides, reporting a zero denominator as a value instead of panicking.
fn divide(numerator: Decimal, denominator: Decimal) -> Outcome {
    if denominator.is_zero() {
        return Err(FormulaError::DivisionByZero);
    }
    numerator.checked_div(denominator).ok_or(FormulaError::Overflow)
}

/// Change in total cost per unit change in quantity, rounded to 2 decimal places.
///
/// Rounding is half-to-even. Fails with `DivisionByZero` when both quantities are equal.
pub fn marginal_cost(
    previous_total_cost: Decimal,
    current_total_cost: Decimal,
    previous_quantity: Decimal,
    current_quantity: Decimal,
) -> Outcome {
    let delta_cost = current_total_cost
        .checked_sub(previous_total_cost)
        .ok_or(FormulaError::Overflow)?;
    let delta_quantity = current_quantity
        .checked_sub(previous_quantity)
        .ok_or(FormulaError::Overflow)?;

    divide(delta_cost, delta_quantity)
        .map(|mc| mc.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
}

/// Total cost divided by the quantity produced.
pub fn average_cost(total_cost: Decimal, quantity: Decimal) -> Outcome {
    divide(total_cost, quantity)
}

/// Price per unit times quantity sold. Saturates at the bounds of `Decimal`.
pub fn total_revenue(price: Decimal, quantity: Decimal) -> Decimal {
    price.saturating_mul(quantity)
}

/// The quantity at which revenue covers fixed and variable costs.
///
/// Fails with `DivisionByZero` when the unit price equals the unit variable cost.
pub fn break_even_quantity(
    fixed_costs: Decimal,
    price_per_unit: Decimal,
    variable_cost_per_unit: Decimal,
) -> Outcome {
    let contribution_margin = price_per_unit
        .checked_sub(variable_cost_per_unit)
        .ok_or(FormulaError::Overflow)?;
    divide(fixed_costs, contribution_margin)
}

/// GDP by the expenditure method: `C + G + I + NX`. Saturates at the bounds of `Decimal`.
pub fn gdp(components: &GdpComponents) -> Decimal {
    components
        .consumption
        .saturating_add(components.government)
        .saturating_add(components.investment)
        .saturating_add(components.net_exports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn marginal_cost_is_rounded_slope() {
        assert_eq!(marginal_cost(dec!(100), dec!(150), dec!(10), dec!(20)), Ok(dec!(5)));
        // 10 / 3 = 3.333.. -> 3.33
        assert_eq!(marginal_cost(dec!(0), dec!(10), dec!(0), dec!(3)), Ok(dec!(3.33)));
        // Falling cost gives a negative slope.
        assert_eq!(marginal_cost(dec!(200), dec!(100), dec!(5), dec!(10)), Ok(dec!(-20)));
    }

    #[test]
    fn marginal_cost_rounds_half_to_even() {
        // 0.125 and 0.135 sit exactly on the midpoint.
        assert_eq!(marginal_cost(dec!(0), dec!(0.125), dec!(0), dec!(1)), Ok(dec!(0.12)));
        assert_eq!(marginal_cost(dec!(0), dec!(0.135), dec!(0), dec!(1)), Ok(dec!(0.14)));
    }

    #[test]
    fn marginal_cost_with_unchanged_quantity_is_division_by_zero() {
        assert_eq!(
            marginal_cost(dec!(100), dec!(150), dec!(10), dec!(10)),
            Err(FormulaError::DivisionByZero)
        );
    }

    #[test]
    fn average_cost_cases() {
        assert_eq!(average_cost(dec!(100), dec!(20)), Ok(dec!(5)));
        assert_eq!(average_cost(dec!(100), dec!(0)), Err(FormulaError::DivisionByZero));
    }

    #[test]
    fn total_revenue_multiplies() {
        assert_eq!(total_revenue(dec!(10), dec!(5)), dec!(50));
        assert_eq!(total_revenue(dec!(2.5), dec!(-4)), dec!(-10));
        assert_eq!(total_revenue(Decimal::MAX, dec!(2)), Decimal::MAX);
    }

    #[test]
    fn break_even_cases() {
        assert_eq!(break_even_quantity(dec!(1000), dec!(50), dec!(30)), Ok(dec!(50)));
        assert_eq!(
            break_even_quantity(dec!(1000), dec!(30), dec!(30)),
            Err(FormulaError::DivisionByZero)
        );
    }

    #[test]
    fn division_leaving_the_decimal_range_is_overflow() {
        assert_eq!(average_cost(Decimal::MAX, dec!(0.1)), Err(FormulaError::Overflow));
    }

    #[test]
    fn gdp_sums_components() {
        let components = GdpComponents::new(dec!(100), dec!(50), dec!(30), dec!(-10));
        assert_eq!(gdp(&components), dec!(170));
    }
}
