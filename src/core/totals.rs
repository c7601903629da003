use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Standard half-up currency rounding to two decimal places.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
    round_currency(quantity * unit_price)
}

/// Applies markup, discount and tax in that fixed order. Markup and
/// discount are each computed against the original subtotal; tax is
/// computed on the post-markup-post-discount taxable base.
pub fn calculate_total(
    subtotal: Decimal,
    markup_percent: Decimal,
    discount_percent: Decimal,
    tax_percent: Decimal,
) -> Decimal {
    let hundred = dec!(100);
    let markup = subtotal * markup_percent / hundred;
    let discount = subtotal * discount_percent / hundred;
    let taxable = subtotal + markup - discount;
    round_currency(taxable * (Decimal::ONE + tax_percent / hundred))
}

/// Clearance samples required for a measured area: one per 500 sqft,
/// never fewer than three.
pub fn sample_count(area_sqft: Decimal) -> u32 {
    let blocks = (area_sqft / dec!(500)).ceil();
    blocks.to_u32().unwrap_or(0).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_total_reference_value() {
        let total = calculate_total(dec!(1000), dec!(20), dec!(10), dec!(5));
        // 1000 + 200 markup - 100 discount = 1100 taxable, * 1.05 = 1155
        assert_eq!(total, dec!(1155.00));
    }

    #[test]
    fn test_calculate_total_identity() {
        assert_eq!(calculate_total(dec!(1000), dec!(0), dec!(0), dec!(0)), dec!(1000.00));
    }

    #[test]
    fn test_markup_and_discount_apply_to_original_subtotal() {
        // Discount on the marked-up value would give 1000 * 1.2 * 0.8 = 960;
        // against the original subtotal it is 1000 + 200 - 200 = 1000.
        let total = calculate_total(dec!(1000), dec!(20), dec!(20), dec!(0));
        assert_eq!(total, dec!(1000.00));
    }

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec!(123.456)), dec!(123.46));
        assert_eq!(round_currency(dec!(123.454)), dec!(123.45));
        assert_eq!(round_currency(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn test_line_total_rounds() {
        assert_eq!(line_total(dec!(3.333), dec!(9.99)), dec!(33.30));
    }

    #[test]
    fn test_sample_count_minimum_is_three() {
        assert_eq!(sample_count(dec!(100)), 3);
        assert_eq!(sample_count(dec!(0)), 3);
        assert_eq!(sample_count(dec!(1500)), 3);
    }

    #[test]
    fn test_sample_count_scales_per_500_sqft() {
        assert_eq!(sample_count(dec!(2000)), 4);
        assert_eq!(sample_count(dec!(2001)), 5);
        assert_eq!(sample_count(dec!(3000)), 6);
    }

    #[test]
    fn test_calculate_total_zero_subtotal() {
        assert_eq!(calculate_total(dec!(0), dec!(20), dec!(10), dec!(5)), dec!(0.00));
    }
}
