//! Money type with exact decimal precision and a registered currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! The amount is a `rust_decimal::Decimal` that always carries exactly the
//! currency's minor-unit digits; every operation returns a new value.

pub mod allocation;
pub mod conversion;
pub mod exchange;

#[cfg(test)]
mod props;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use minted_shared::rounding::{self, RoundingMode};
use minted_shared::{Currency, MoneyError, MoneyResult, currency};

use crate::decimal;

/// A monetary amount in a registered currency.
///
/// Equality compares amount and currency code. There is no
/// `PartialOrd`: ordering across currencies is an error, so use
/// [`Money::try_cmp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: &'static Currency,
}

impl Money {
    /// Parses `amount` in currency `code`, rounding half-up to the currency's
    /// minor unit.
    ///
    /// # Example
    ///
    /// ```
    /// use minted_core::Money;
    ///
    /// let price = Money::new("19.999", "USD").unwrap();
    /// assert_eq!(price.amount().to_string(), "20.00");
    /// ```
    pub fn new(amount: &str, code: &str) -> MoneyResult<Self> {
        Self::with_rounding(amount, code, RoundingMode::default())
    }

    /// Parses `amount` in currency `code`, rounding with `mode`.
    pub fn with_rounding(amount: &str, code: &str, mode: RoundingMode) -> MoneyResult<Self> {
        let currency = currency::lookup(code)?;
        let value = decimal::parse_amount(amount)?;
        Self::in_currency(value, currency, mode)
    }

    /// Parses `amount` without rounding.
    ///
    /// Fails with `Precision` if the text has more significant fractional
    /// digits than the currency allows.
    pub fn exact(amount: &str, code: &str) -> MoneyResult<Self> {
        let currency = currency::lookup(code)?;
        let value = decimal::parse_amount(amount)?;
        Self::exact_in(value, currency)
    }

    /// Creates money from an exact decimal, rounding with `mode`.
    pub fn from_decimal(amount: Decimal, code: &str, mode: RoundingMode) -> MoneyResult<Self> {
        let currency = currency::lookup(code)?;
        Self::in_currency(amount, currency, mode)
    }

    /// Creates money from an integer count of minor units (e.g. cents).
    pub fn from_minor_units(units: i128, code: &str) -> MoneyResult<Self> {
        let currency = currency::lookup(code)?;
        let amount = decimal::from_minor_units(units, currency.minor_unit_digits())?;
        Ok(Self { amount, currency })
    }

    /// Creates money from a binary float.
    ///
    /// LOSSY: the float is first converted to its shortest decimal form, then
    /// rounded with `mode`. Use [`Money::new`] with decimal text whenever the
    /// exact amount is known.
    pub fn from_f64_lossy(amount: f64, code: &str, mode: RoundingMode) -> MoneyResult<Self> {
        let currency = currency::lookup(code)?;
        let value = decimal::from_f64_lossy(amount)?;
        Self::in_currency(value, currency, mode)
    }

    /// Creates a zero amount in the specified currency.
    pub fn zero(code: &str) -> MoneyResult<Self> {
        Self::in_currency(Decimal::ZERO, currency::lookup(code)?, RoundingMode::default())
    }

    /// Rounds `value` into an already-resolved currency.
    ///
    /// Fails with `Overflow` if `value` has too many integer digits to carry
    /// the currency's minor-unit digits.
    pub fn in_currency(
        value: Decimal,
        currency: &'static Currency,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        Ok(Self {
            amount: rounding::round(value, currency.minor_unit_digits(), mode)?,
            currency,
        })
    }

    pub(crate) fn exact_in(value: Decimal, currency: &'static Currency) -> MoneyResult<Self> {
        let digits = currency.minor_unit_digits();
        if rounding::requires_rounding(value, digits) {
            return Err(MoneyError::Precision {
                value: value.normalize().to_string(),
                digits,
            });
        }
        Self::in_currency(value, currency, RoundingMode::Down)
    }

    /// The amount, with exactly `currency().minor_unit_digits()` fractional digits.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency record shared by every amount in this currency.
    #[must_use]
    pub const fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The amount as an integer count of minor units.
    #[must_use]
    pub fn minor_units(&self) -> i128 {
        self.amount.mantissa()
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if the amount is greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// The absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            currency: self.currency,
        }
    }

    /// The same magnitude with the opposite sign.
    #[must_use]
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            return *self;
        }
        Self {
            amount: -self.amount,
            currency: self.currency,
        }
    }

    /// Same currency, an amount already at its minor-unit digits.
    fn with_amount(&self, amount: Decimal) -> MoneyResult<Self> {
        Self::in_currency(amount, self.currency, RoundingMode::Down)
    }

    fn ensure_same_currency(&self, other: &Self) -> MoneyResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::mismatch(self.currency.code(), other.currency.code()))
        }
    }

    /// Exact sum. Both operands must share a currency.
    pub fn add(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let sum = decimal::add(self.amount, other.amount)?;
        Self::in_currency(sum, self.currency, RoundingMode::default())
    }

    /// Exact difference. Both operands must share a currency.
    pub fn subtract(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let difference = decimal::subtract(self.amount, other.amount)?;
        Self::in_currency(difference, self.currency, RoundingMode::default())
    }

    /// Multiplies by a dimensionless factor, rounding half-up once.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use minted_core::Money;
    ///
    /// let price = Money::new("25.99", "USD").unwrap();
    /// assert_eq!(price.multiply(2).unwrap().amount(), dec!(51.98));
    /// assert_eq!(price.multiply(dec!(0.1)).unwrap().amount(), dec!(2.60));
    /// ```
    pub fn multiply(&self, factor: impl Into<Decimal>) -> MoneyResult<Self> {
        self.multiply_with(factor, RoundingMode::default())
    }

    /// Multiplies by a dimensionless factor, rounding once with `mode`.
    ///
    /// The rounding decision sees every digit of the exact product.
    pub fn multiply_with(&self, factor: impl Into<Decimal>, mode: RoundingMode) -> MoneyResult<Self> {
        self.with_amount(decimal::multiply_rounded(
            self.amount,
            factor.into(),
            self.currency.minor_unit_digits(),
            mode,
        )?)
    }

    /// Multiplies without rounding.
    ///
    /// Fails with `Precision` if the product needs more digits than the
    /// currency allows.
    pub fn multiply_exact(&self, factor: impl Into<Decimal>) -> MoneyResult<Self> {
        let product = decimal::multiply(self.amount, factor.into())?;
        Self::exact_in(product, self.currency)
    }

    /// Divides by `divisor`, rounding the quotient once with `mode`.
    ///
    /// The quotient is a single rounded value; to share an amount between
    /// parties without losing a unit use [`Money::split_evenly`] or
    /// [`Money::allocate`].
    pub fn divide(&self, divisor: impl Into<Decimal>, mode: RoundingMode) -> MoneyResult<Self> {
        self.with_amount(decimal::divide_rounded(
            self.amount,
            divisor.into(),
            self.currency.minor_unit_digits(),
            mode,
        )?)
    }

    /// Adds `rate_percent` percent of tax, rounding half-up once.
    ///
    /// The result is `amount * (1 + rate_percent / 100)` rounded a single
    /// time, never the sum of a separately rounded tax line.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use minted_core::Money;
    ///
    /// let net = Money::new("100.00", "USD").unwrap();
    /// assert_eq!(net.with_tax(dec!(8.25)).unwrap().amount(), dec!(108.25));
    /// ```
    pub fn with_tax(&self, rate_percent: impl Into<Decimal>) -> MoneyResult<Self> {
        self.with_tax_rounding(rate_percent, RoundingMode::default())
    }

    /// Adds `rate_percent` percent of tax, rounding once with `mode`.
    pub fn with_tax_rounding(
        &self,
        rate_percent: impl Into<Decimal>,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let multiplier = decimal::percent_multiplier(rate_percent.into())?;
        self.multiply_with(multiplier, mode)
    }

    /// Orders two amounts of the same currency.
    pub fn try_cmp(&self, other: &Self) -> MoneyResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// `self > other`, failing across currencies.
    pub fn is_greater_than(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.try_cmp(other)? == Ordering::Greater)
    }

    /// `self < other`, failing across currencies.
    pub fn is_less_than(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.try_cmp(other)? == Ordering::Less)
    }

    /// Sums `items`, all of which must be in currency `code`.
    ///
    /// An empty iterator yields zero.
    pub fn sum<'a>(code: &str, items: impl IntoIterator<Item = &'a Self>) -> MoneyResult<Self> {
        items
            .into_iter()
            .try_fold(Self::zero(code)?, |total, item| total.add(item))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.code())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses `"12.34 USD"` or `"USD 12.34"`, rounding half-up.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MoneyError::InvalidAmount(format!(
                "expected \"<amount> <currency>\", got {s:?}"
            )));
        };
        if currency::is_registered(first) {
            Self::new(second, first)
        } else {
            Self::new(first, second)
        }
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
