//! Rounding strategies for exact decimal magnitudes.
//!
//! CRITICAL: Rounding happens on exact `Decimal` digits only, never through a
//! floating-point approximation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{MoneyError, MoneyResult};

/// Named rounding strategy applied when a value has more fractional digits
/// than its target precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties round away from zero. `0.125 -> 0.13`
    #[default]
    HalfUp,
    /// Ties round toward zero. `0.125 -> 0.12`
    HalfDown,
    /// Ties round to the even neighbour (banker's rounding). `0.125 -> 0.12`
    HalfEven,
    /// Always away from zero. `0.121 -> 0.13`
    Up,
    /// Always toward zero (truncation). `0.129 -> 0.12`
    Down,
    /// Toward positive infinity. `-0.129 -> -0.12`
    Ceiling,
    /// Toward negative infinity. `-0.121 -> -0.13`
    Floor,
}

impl RoundingMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::HalfUp,
        Self::HalfDown,
        Self::HalfEven,
        Self::Up,
        Self::Down,
        Self::Ceiling,
        Self::Floor,
    ];

    /// Canonical snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HalfUp => "half_up",
            Self::HalfDown => "half_down",
            Self::HalfEven => "half_even",
            Self::Up => "up",
            Self::Down => "down",
            Self::Ceiling => "ceiling",
            Self::Floor => "floor",
        }
    }

    const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfDown => RoundingStrategy::MidpointTowardZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::Up => RoundingStrategy::AwayFromZero,
            Self::Down => RoundingStrategy::ToZero,
            Self::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Self::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }

    /// Rounds `value` to `digits` fractional digits with this mode.
    ///
    /// See [`round`].
    pub fn round(self, value: Decimal, digits: u32) -> MoneyResult<Decimal> {
        round(value, digits, self)
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = MoneyError;

    /// Accepts `half_even`, `HALF_EVEN`, `half-even`, and a `round_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let name = normalized.strip_prefix("round_").unwrap_or(&normalized);
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| MoneyError::InvalidAmount(format!("unknown rounding mode: {s}")))
    }
}

/// Rounds an exact value to `digits` fractional digits.
///
/// The result always carries exactly `digits` fractional digits: values with
/// fewer digits are padded, so `round(1.5, 2, _)` is `1.50`.
///
/// Fails with `Overflow` if the padded value no longer fits the 96-bit
/// mantissa (e.g. `Decimal::MAX` at 2 digits).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use minted_shared::rounding::{round, RoundingMode};
///
/// assert_eq!(round(dec!(0.125), 2, RoundingMode::HalfEven).unwrap(), dec!(0.12));
/// assert_eq!(round(dec!(0.125), 2, RoundingMode::HalfUp).unwrap(), dec!(0.13));
/// assert_eq!(round(dec!(7), 2, RoundingMode::Floor).unwrap().to_string(), "7.00");
/// ```
pub fn round(value: Decimal, digits: u32, mode: RoundingMode) -> MoneyResult<Decimal> {
    let mut rounded = value.round_dp_with_strategy(digits, mode.strategy());
    // rescale quietly keeps fewer digits when the mantissa would overflow
    rounded.rescale(digits);
    if rounded.scale() != digits {
        return Err(MoneyError::Overflow);
    }
    if rounded.is_zero() {
        // -0.001 floors/truncates to a signed zero
        rounded.set_sign_positive(true);
    }
    Ok(rounded)
}

/// Returns true if `value` has non-zero digits beyond `digits` fractional
/// digits, i.e. if representing it at that precision would change it.
#[must_use]
pub fn requires_rounding(value: Decimal, digits: u32) -> bool {
    value.round_dp_with_strategy(digits, RoundingStrategy::ToZero) != value
}
