//! Amount allocation using the Largest Remainder Method.
//!
//! Every function here guarantees that the parts sum EXACTLY to the original
//! amount (no minor unit lost or gained). All work happens on integer minor
//! units:
//! 1. Compute each exact share as `units * weight / total_weight`
//! 2. Floor each share
//! 3. Count the leftover units (total - sum of floors)
//! 4. Hand them out one at a time to the largest remainders, earliest index first

use rust_decimal::Decimal;

use minted_shared::{MoneyError, MoneyResult};

use super::Money;
use crate::decimal;

impl Money {
    /// Distributes the amount proportionally to integer `weights`.
    ///
    /// Fails with `Allocation` if `weights` is empty or all zero.
    ///
    /// # Example
    ///
    /// ```
    /// use minted_core::Money;
    ///
    /// let pot = Money::new("100.00", "USD").unwrap();
    /// let parts = pot.allocate(&[1, 1, 1]).unwrap();
    /// let amounts: Vec<String> = parts.iter().map(|m| m.amount().to_string()).collect();
    /// assert_eq!(amounts, ["33.34", "33.33", "33.33"]);
    /// ```
    pub fn allocate(&self, weights: &[u64]) -> MoneyResult<Vec<Self>> {
        let weights: Vec<u128> = weights.iter().map(|w| u128::from(*w)).collect();
        self.allocate_units(&weights)
    }

    /// Distributes the amount proportionally to decimal `ratios`, such as
    /// percentages.
    ///
    /// Ratios need not sum to 100 or 1; only their proportions matter. Fails
    /// with `Allocation` if `ratios` is empty, all zero, or any is negative.
    pub fn allocate_by_ratios(&self, ratios: &[Decimal]) -> MoneyResult<Vec<Self>> {
        if let Some(negative) = ratios.iter().find(|r| r.is_sign_negative() && !r.is_zero()) {
            return Err(MoneyError::Allocation(format!(
                "ratios must not be negative, got {negative}"
            )));
        }

        // Bring every ratio to a common scale so the mantissas are exact
        // integer weights with the same proportions. Done on u128 because a
        // Decimal cannot hold 10^28 at 28 fractional digits.
        let ratios: Vec<Decimal> = ratios.iter().map(Decimal::normalize).collect();
        let scale = ratios.iter().map(Decimal::scale).max().unwrap_or(0);
        let weights = ratios
            .iter()
            .map(|ratio| {
                10u128
                    .checked_pow(scale - ratio.scale())
                    .and_then(|factor| ratio.mantissa().unsigned_abs().checked_mul(factor))
                    .ok_or(MoneyError::Overflow)
            })
            .collect::<MoneyResult<Vec<_>>>()?;

        self.allocate_units(&weights)
    }

    /// Splits the amount into `parts` shares that differ by at most one minor
    /// unit; the first `total % parts` shares carry the extra unit.
    ///
    /// Fails with `Allocation` if `parts` is zero.
    pub fn split_evenly(&self, parts: usize) -> MoneyResult<Vec<Self>> {
        if parts == 0 {
            return Err(MoneyError::Allocation(
                "cannot split into zero parts".to_string(),
            ));
        }
        tracing::trace!(
            currency = self.currency().code(),
            amount = %self.amount(),
            parts,
            "splitting evenly"
        );
        decimal::split_units(self.minor_units(), parts)
            .into_iter()
            .map(|units| self.with_units(units))
            .collect()
    }

    fn allocate_units(&self, weights: &[u128]) -> MoneyResult<Vec<Self>> {
        if weights.is_empty() {
            return Err(MoneyError::Allocation(
                "at least one weight is required".to_string(),
            ));
        }
        let total_weight = weights
            .iter()
            .try_fold(0u128, |acc, w| acc.checked_add(*w))
            .ok_or(MoneyError::Overflow)?;
        if total_weight == 0 {
            return Err(MoneyError::Allocation(
                "weights must not all be zero".to_string(),
            ));
        }

        tracing::trace!(
            currency = self.currency().code(),
            amount = %self.amount(),
            parts = weights.len(),
            "allocating by weight"
        );

        let total = self.minor_units();
        let shares = largest_remainder(total.unsigned_abs(), weights, total_weight)?;
        let sign: i128 = if total < 0 { -1 } else { 1 };

        shares
            .into_iter()
            .map(|share| {
                let share = i128::try_from(share).map_err(|_| MoneyError::Overflow)?;
                self.with_units(sign * share)
            })
            .collect()
    }

    fn with_units(&self, units: i128) -> MoneyResult<Self> {
        let amount = decimal::from_minor_units(units, self.currency.minor_unit_digits())?;
        Ok(Self {
            amount,
            currency: self.currency,
        })
    }
}

/// Splits `total` units proportionally to `weights` (which sum to
/// `total_weight > 0`). The result sums exactly to `total`.
fn largest_remainder(total: u128, weights: &[u128], total_weight: u128) -> MoneyResult<Vec<u128>> {
    let mut shares = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());

    for (index, weight) in weights.iter().enumerate() {
        let exact = total.checked_mul(*weight).ok_or(MoneyError::Overflow)?;
        shares.push(exact / total_weight);
        remainders.push((index, exact % total_weight));
    }

    let allocated: u128 = shares.iter().sum();
    let leftover = usize::try_from(total - allocated).map_err(|_| MoneyError::Overflow)?;

    if leftover > 0 {
        // Largest remainder first; the stable sort keeps index order on ties.
        remainders.sort_by(|a, b| b.1.cmp(&a.1));
        for (index, _) in remainders.iter().take(leftover) {
            shares[*index] += 1;
        }
    }

    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn usd(amount: &str) -> Money {
        Money::new(amount, "USD").unwrap()
    }

    fn amounts(parts: &[Money]) -> Vec<Decimal> {
        parts.iter().map(Money::amount).collect()
    }

    fn total(parts: &[Money]) -> Decimal {
        parts.iter().map(Money::amount).sum()
    }

    // =========================================================================
    // allocate tests
    // =========================================================================

    #[test]
    fn test_allocate_1000_by_3_7_5_1_4() {
        let parts = usd("1000.00").allocate(&[3, 7, 5, 1, 4]).unwrap();
        assert_eq!(
            amounts(&parts),
            vec![dec!(150.00), dec!(350.00), dec!(250.00), dec!(50.00), dec!(200.00)]
        );
        assert_eq!(total(&parts), dec!(1000.00));
    }

    #[test]
    fn test_allocate_leftover_goes_to_largest_remainder() {
        // 0.05 * 3/10 = 0.015, 0.05 * 7/10 = 0.035 -> floors 0.01 + 0.03, one cent left;
        // remainders tie at 0.005, so the earlier index wins
        let parts = usd("0.05").allocate(&[3, 7]).unwrap();
        assert_eq!(amounts(&parts), vec![dec!(0.02), dec!(0.03)]);

        // 1.00 * 1/6 = 0.1666.., 1.00 * 5/6 = 0.8333..; the first has the larger remainder
        let parts = usd("1.00").allocate(&[1, 5]).unwrap();
        assert_eq!(amounts(&parts), vec![dec!(0.17), dec!(0.83)]);
    }

    #[test]
    fn test_allocate_ties_break_by_index() {
        let parts = usd("0.02").allocate(&[1, 1, 1]).unwrap();
        assert_eq!(amounts(&parts), vec![dec!(0.01), dec!(0.01), dec!(0.00)]);
    }

    #[test]
    fn test_allocate_zero_weight_gets_nothing() {
        let parts = usd("10.00").allocate(&[0, 1, 0, 1]).unwrap();
        assert_eq!(
            amounts(&parts),
            vec![dec!(0.00), dec!(5.00), dec!(0.00), dec!(5.00)]
        );
    }

    #[test]
    fn test_allocate_negative_amount() {
        let parts = usd("-100.00").allocate(&[1, 1, 1]).unwrap();
        assert_eq!(amounts(&parts), vec![dec!(-33.34), dec!(-33.33), dec!(-33.33)]);
        assert_eq!(total(&parts), dec!(-100.00));
    }

    #[test]
    fn test_allocate_zero_digit_currency() {
        let yen = Money::new("100", "JPY").unwrap();
        let parts = yen.allocate(&[1, 2]).unwrap();
        assert_eq!(amounts(&parts), vec![dec!(33), dec!(67)]);
    }

    #[rstest]
    #[case(&[])]
    #[case(&[0])]
    #[case(&[0, 0, 0])]
    fn test_allocate_invalid_weights(#[case] weights: &[u64]) {
        assert!(matches!(
            usd("10.00").allocate(weights),
            Err(MoneyError::Allocation(_))
        ));
    }

    #[test]
    fn test_allocate_keeps_currency() {
        let parts = Money::new("9.99", "EUR").unwrap().allocate(&[2, 3]).unwrap();
        assert!(parts.iter().all(|p| p.currency().code() == "EUR"));
        assert!(parts.iter().all(|p| p.amount().scale() == 2));
    }

    // =========================================================================
    // allocate_by_ratios tests
    // =========================================================================

    #[test]
    fn test_allocate_by_percentages() {
        let parts = usd("100.00")
            .allocate_by_ratios(&[dec!(50), dec!(30), dec!(20)])
            .unwrap();
        assert_eq!(amounts(&parts), vec![dec!(50.00), dec!(30.00), dec!(20.00)]);
    }

    #[test]
    fn test_allocate_by_mixed_scale_ratios() {
        let parts = usd("100.00")
            .allocate_by_ratios(&[dec!(33.33), dec!(33.33), dec!(33.34)])
            .unwrap();
        assert_eq!(amounts(&parts), vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert_eq!(total(&parts), dec!(100.00));
    }

    #[test]
    fn test_allocate_by_fractional_ratios() {
        let parts = usd("10.00")
            .allocate_by_ratios(&[dec!(0.5), dec!(0.25), dec!(0.25)])
            .unwrap();
        assert_eq!(amounts(&parts), vec![dec!(5.00), dec!(2.50), dec!(2.50)]);
    }

    #[test]
    fn test_allocate_by_ratios_mixed_magnitudes() {
        // 10^28 : 10^27 + 0.5 is about 10 : 1; aligning both at one fractional
        // digit needs a mantissa past the Decimal range
        let large = Decimal::from_i128_with_scale(10i128.pow(28), 0);
        let small = Decimal::from_i128_with_scale(10i128.pow(28) + 5, 1);
        let parts = usd("100.00").allocate_by_ratios(&[large, small]).unwrap();
        assert_eq!(amounts(&parts), vec![dec!(90.91), dec!(9.09)]);
    }

    #[test]
    fn test_allocate_by_ratios_ignores_trailing_zeros() {
        let parts = usd("10.00")
            .allocate_by_ratios(&[dec!(1.0000000000000000000000000000), dec!(1)])
            .unwrap();
        assert_eq!(amounts(&parts), vec![dec!(5.00), dec!(5.00)]);
    }

    #[test]
    fn test_allocate_by_ratios_rejects_negative() {
        let err = usd("10.00")
            .allocate_by_ratios(&[dec!(60), dec!(-10), dec!(50)])
            .unwrap_err();
        assert!(matches!(err, MoneyError::Allocation(_)));
    }

    #[test]
    fn test_allocate_by_ratios_rejects_empty_and_zero() {
        assert!(matches!(
            usd("10.00").allocate_by_ratios(&[]),
            Err(MoneyError::Allocation(_))
        ));
        assert!(matches!(
            usd("10.00").allocate_by_ratios(&[dec!(0), dec!(0.00)]),
            Err(MoneyError::Allocation(_))
        ));
    }

    // =========================================================================
    // split_evenly tests
    // =========================================================================

    #[test]
    fn test_split_evenly_thirds() {
        let parts = usd("100.00").split_evenly(3).unwrap();
        assert_eq!(amounts(&parts), vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    }

    #[test]
    fn test_split_evenly_single() {
        let parts = usd("12.34").split_evenly(1).unwrap();
        assert_eq!(amounts(&parts), vec![dec!(12.34)]);
    }

    #[test]
    fn test_split_evenly_more_parts_than_units() {
        let parts = usd("0.02").split_evenly(5).unwrap();
        assert_eq!(
            amounts(&parts),
            vec![dec!(0.01), dec!(0.01), dec!(0.00), dec!(0.00), dec!(0.00)]
        );
    }

    #[test]
    fn test_split_evenly_zero_parts() {
        assert!(matches!(
            usd("1.00").split_evenly(0),
            Err(MoneyError::Allocation(_))
        ));
    }

    #[test]
    fn test_split_evenly_sum_invariant() {
        let test_cases = [
            ("100", 3),
            ("100", 7),
            ("1000", 3),
            ("1", 3),
            ("0.01", 3),
            ("999.99", 7),
            ("-47.11", 6),
        ];

        for (amount, parts) in test_cases {
            let money = usd(amount);
            let result = money.split_evenly(parts).unwrap();
            assert_eq!(result.len(), parts);
            assert_eq!(
                total(&result),
                money.amount(),
                "Sum invariant failed for total={amount}, parts={parts}"
            );
        }
    }

    #[test]
    fn test_split_near_max_amount_conserves() {
        let edge = usd("792281625142643375935439503.35");
        assert_eq!(edge.minor_units(), 79_228_162_514_264_337_593_543_950_335);

        let halves = edge.split_evenly(2).unwrap();
        assert_eq!(
            amounts(&halves),
            vec![dec!(396140812571321687967719751.68), dec!(396140812571321687967719751.67)]
        );
        assert_eq!(Money::sum("USD", &halves).unwrap(), edge);

        let parts = edge.allocate(&[1, 1, 1]).unwrap();
        assert_eq!(Money::sum("USD", &parts).unwrap(), edge);
    }

    #[test]
    fn test_split_matches_equal_weight_allocation() {
        let money = usd("1234.57");
        assert_eq!(
            money.split_evenly(4).unwrap(),
            money.allocate(&[1, 1, 1, 1]).unwrap()
        );
    }
}
