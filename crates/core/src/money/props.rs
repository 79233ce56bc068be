//! Property-based tests for money operations.
//!
//! - Exactness: every value carries exactly its currency's minor-unit digits
//! - Closure: add/subtract never change currency, zero is the identity
//! - Conservation: allocation and splitting never lose or gain a minor unit
//! - Round-trip: record form rebuilds the same value

use proptest::prelude::*;
use rust_decimal::Decimal;

use minted_shared::RoundingMode;

use super::Money;

/// Currencies with 0, 2, and 3 minor-unit digits.
fn any_code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["USD", "EUR", "JPY", "KWD", "GBP", "CLP"])
}

fn any_mode() -> impl Strategy<Value = RoundingMode> {
    prop::sample::select(RoundingMode::ALL.to_vec())
}

/// Decimal text with up to 6 fractional digits, -10,000,000 to 10,000,000.
fn any_amount_text() -> impl Strategy<Value = String> {
    (-10_000_000_000_000i64..10_000_000_000_000i64)
        .prop_map(|micros| Decimal::new(micros, 6).to_string())
}

/// Money already at minor-unit precision.
fn any_money() -> impl Strategy<Value = Money> {
    (any_code(), -100_000_000_000i64..100_000_000_000i64)
        .prop_map(|(code, units)| Money::from_minor_units(i128::from(units), code).unwrap())
}

fn spread(parts: &[Money]) -> i128 {
    let units: Vec<i128> = parts.iter().map(Money::minor_units).collect();
    units.iter().max().unwrap_or(&0) - units.iter().min().unwrap_or(&0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* decimal text, currency, and mode, the amount has exactly the
    /// currency's digits and equals the exact value rounded with that mode.
    #[test]
    fn prop_construction_is_exact(text in any_amount_text(), code in any_code(), mode in any_mode()) {
        let money = Money::with_rounding(&text, code, mode).unwrap();
        let digits = money.currency().minor_unit_digits();
        prop_assert_eq!(money.amount().scale(), digits);

        let exact: Decimal = text.parse().unwrap();
        prop_assert_eq!(money.amount(), mode.round(exact, digits).unwrap());
    }

    /// Zero is the additive identity and add/subtract keep the currency.
    #[test]
    fn prop_add_identity_and_closure(a in any_money(), units in -1_000_000i64..1_000_000i64) {
        let code = a.currency().code();
        prop_assert_eq!(Money::zero(code).unwrap().add(&a).unwrap(), a);

        let b = Money::from_minor_units(i128::from(units), code).unwrap();
        let sum = a.add(&b).unwrap();
        let back = sum.subtract(&b).unwrap();
        prop_assert_eq!(sum.currency().code(), code);
        prop_assert_eq!(back, a);
    }

    /// Allocation parts always sum to the original amount.
    #[test]
    fn prop_allocate_conserves(
        money in any_money(),
        weights in prop::collection::vec(0u64..1000, 1..12),
    ) {
        prop_assume!(weights.iter().any(|w| *w > 0));
        let parts = money.allocate(&weights).unwrap();
        prop_assert_eq!(parts.len(), weights.len());
        prop_assert_eq!(Money::sum(money.currency().code(), &parts).unwrap(), money);
    }

    /// Each allocated part is within one minor unit of its ideal share.
    #[test]
    fn prop_allocate_is_proportional(
        money in any_money(),
        weights in prop::collection::vec(1u64..1000, 1..12),
    ) {
        let parts = money.allocate(&weights).unwrap();
        let total_weight: i128 = weights.iter().map(|w| i128::from(*w)).sum();
        for (part, weight) in parts.iter().zip(&weights) {
            // |part * W - units * w| < W  <=>  |part - ideal| < 1 unit
            let scaled_part = part.minor_units() * total_weight;
            let scaled_ideal = money.minor_units() * i128::from(*weight);
            prop_assert!((scaled_part - scaled_ideal).abs() < total_weight);
        }
    }

    /// Equal weights give parts that differ by at most one minor unit.
    #[test]
    fn prop_allocate_equal_weights_spread(money in any_money(), count in 1usize..50) {
        let parts = money.allocate(&vec![7; count]).unwrap();
        prop_assert!(spread(&parts) <= 1);
    }

    /// Splitting conserves the amount, parts differ by at most one unit, and
    /// the larger parts come first.
    #[test]
    fn prop_split_evenly(money in any_money(), count in 1usize..100) {
        let parts = money.split_evenly(count).unwrap();
        prop_assert_eq!(parts.len(), count);
        prop_assert_eq!(Money::sum(money.currency().code(), &parts).unwrap(), money);
        prop_assert!(spread(&parts) <= 1);

        let magnitudes: Vec<i128> = parts.iter().map(|p| p.minor_units().abs()).collect();
        prop_assert!(magnitudes.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Percentage allocation conserves the amount.
    #[test]
    fn prop_allocate_by_ratios_conserves(
        money in any_money(),
        ratios in prop::collection::vec(0i64..10_000, 1..8),
    ) {
        prop_assume!(ratios.iter().any(|r| *r > 0));
        let ratios: Vec<Decimal> = ratios.into_iter().map(|r| Decimal::new(r, 2)).collect();
        let parts = money.allocate_by_ratios(&ratios).unwrap();
        prop_assert_eq!(Money::sum(money.currency().code(), &parts).unwrap(), money);
    }

    /// Record form round-trips exactly.
    #[test]
    fn prop_record_round_trip(money in any_money()) {
        prop_assert_eq!(Money::from_dict(&money.to_dict()).unwrap(), money);
    }

    /// `with_tax` is the exact product rounded once.
    #[test]
    fn prop_with_tax_single_rounding(money in any_money(), basis_points in 0i64..5_000) {
        let rate = Decimal::new(basis_points, 2);
        let exact = money.amount() * (Decimal::ONE + rate / Decimal::ONE_HUNDRED);
        let expected = Money::in_currency(exact, money.currency(), RoundingMode::HalfUp).unwrap();
        prop_assert_eq!(money.with_tax(rate).unwrap(), expected);
    }

    /// Conversion lands on the target currency's digits.
    #[test]
    fn prop_convert_has_target_digits(
        money in any_money(),
        target in any_code(),
        rate in 1i64..100_000_000i64,
    ) {
        let converted = money.convert_to(target, Decimal::new(rate, 4)).unwrap();
        prop_assert_eq!(converted.currency().code(), target);
        prop_assert_eq!(converted.amount().scale(), converted.currency().minor_unit_digits());
    }
}
