//! Plain record form of a money value for storage and transport.
//!
//! The amount always crosses the boundary as exact decimal text, never as a
//! binary float.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use minted_shared::{MoneyResult, currency};

use crate::decimal;
use crate::money::Money;

/// `{"amount": "<exact decimal>", "currency": "<code>"}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoneyRecord {
    /// Exact decimal text, e.g. `"1234.50"`.
    pub amount: String,
    /// Currency code, e.g. `"USD"`.
    pub currency: String,
}

impl Money {
    /// Converts to a plain record.
    ///
    /// # Example
    ///
    /// ```
    /// use minted_core::Money;
    ///
    /// let record = Money::new("12.5", "EUR").unwrap().to_dict();
    /// assert_eq!(record.amount, "12.50");
    /// assert_eq!(record.currency, "EUR");
    /// ```
    #[must_use]
    pub fn to_dict(&self) -> MoneyRecord {
        MoneyRecord {
            amount: self.amount().to_string(),
            currency: self.currency().code().to_string(),
        }
    }

    /// Rebuilds a value from a record.
    ///
    /// Fails with `InvalidAmount` or `UnknownCurrency` for malformed fields,
    /// and with `Precision` if the amount has more digits than the currency
    /// allows: a stored amount is never silently rounded.
    pub fn from_dict(record: &MoneyRecord) -> MoneyResult<Self> {
        let currency = currency::lookup(&record.currency)?;
        let amount = decimal::parse_amount(&record.amount)?;
        Self::exact_in(amount, currency)
    }
}

impl From<Money> for MoneyRecord {
    fn from(money: Money) -> Self {
        money.to_dict()
    }
}

impl TryFrom<MoneyRecord> for Money {
    type Error = minted_shared::MoneyError;

    fn try_from(record: MoneyRecord) -> Result<Self, Self::Error> {
        Self::from_dict(&record)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dict().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = MoneyRecord::deserialize(deserializer)?;
        Self::from_dict(&record).map_err(serde::de::Error::custom)
    }
}
