//! Exchange rate quotes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use minted_shared::{Currency, MoneyResult, currency};

use super::conversion::validate_rate;
use crate::decimal;

/// Exchange rate between two currencies, as quoted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRate {
    from_currency: &'static Currency,
    to_currency: &'static Currency,
    rate: Decimal,
    effective_date: Option<NaiveDate>,
}

impl ExchangeRate {
    /// Creates a quote: 1 `from` = `rate` `to`.
    ///
    /// Fails with `UnknownCurrency` for unregistered codes and `InvalidRate`
    /// for a rate that is not strictly positive.
    pub fn new(
        from: &str,
        to: &str,
        rate: Decimal,
        effective_date: Option<NaiveDate>,
    ) -> MoneyResult<Self> {
        validate_rate(rate)?;
        Ok(Self {
            from_currency: currency::lookup(from)?,
            to_currency: currency::lookup(to)?,
            rate,
            effective_date,
        })
    }

    /// Source currency.
    #[must_use]
    pub const fn from_currency(&self) -> &'static Currency {
        self.from_currency
    }

    /// Target currency.
    #[must_use]
    pub const fn to_currency(&self) -> &'static Currency {
        self.to_currency
    }

    /// Units of the target currency per unit of the source currency.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Date this rate is effective, if the quote carries one.
    #[must_use]
    pub const fn effective_date(&self) -> Option<NaiveDate> {
        self.effective_date
    }

    /// Returns the inverse quote (`to` -> `from` at `1 / rate`).
    pub fn inverse(&self) -> MoneyResult<Self> {
        Ok(Self {
            from_currency: self.to_currency,
            to_currency: self.from_currency,
            rate: decimal::divide(Decimal::ONE, self.rate)?,
            effective_date: self.effective_date,
        })
    }
}
