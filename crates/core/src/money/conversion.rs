//! Currency conversion.
//!
//! CRITICAL: Conversion is always explicit. Rates are supplied by the caller,
//! the product is computed exactly, and it is rounded once to the target
//! currency's minor unit.

use rust_decimal::Decimal;

use minted_shared::rounding::RoundingMode;
use minted_shared::{Currency, MoneyError, MoneyResult, currency};

use super::Money;
use super::exchange::ExchangeRate;
use crate::decimal;

impl Money {
    /// Converts into currency `code` at `rate` (1 unit of `self` = `rate`
    /// units of the target), rounding half-up.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use minted_core::Money;
    ///
    /// let usd = Money::new("100.00", "USD").unwrap();
    /// let yen = usd.convert_to("JPY", dec!(110.505)).unwrap();
    /// assert_eq!(yen.amount(), dec!(11051));
    /// ```
    pub fn convert_to(&self, code: &str, rate: Decimal) -> MoneyResult<Self> {
        self.convert_to_with(code, rate, RoundingMode::default())
    }

    /// Converts into currency `code` at `rate`, rounding with `mode`.
    pub fn convert_to_with(&self, code: &str, rate: Decimal, mode: RoundingMode) -> MoneyResult<Self> {
        let target = currency::lookup(code)?;
        self.convert_into(target, rate, mode)
    }

    /// Converts with a quoted exchange rate, rounding half-up.
    ///
    /// Fails with `CurrencyMismatch` if the quote is not from this amount's
    /// currency.
    pub fn convert(&self, rate: &ExchangeRate) -> MoneyResult<Self> {
        if rate.from_currency() != self.currency {
            return Err(MoneyError::mismatch(
                self.currency.code(),
                rate.from_currency().code(),
            ));
        }
        self.convert_into(rate.to_currency(), rate.rate(), RoundingMode::default())
    }

    fn convert_into(
        &self,
        target: &'static Currency,
        rate: Decimal,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        validate_rate(rate)?;
        tracing::trace!(
            from = self.currency.code(),
            to = target.code(),
            %rate,
            "converting"
        );
        let converted =
            decimal::multiply_rounded(self.amount, rate, target.minor_unit_digits(), mode)?;
        Self::in_currency(converted, target, RoundingMode::Down)
    }
}

/// Fails with `InvalidRate` unless `rate` is strictly positive.
pub fn validate_rate(rate: Decimal) -> MoneyResult<()> {
    if rate <= Decimal::ZERO {
        return Err(MoneyError::InvalidRate(format!(
            "rate must be positive, got {rate}"
        )));
    }
    Ok(())
}
