//! Error taxonomy for every money operation.

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors that can occur while constructing or operating on money values.
///
/// Every operation either returns a fully valid value or one of these;
/// there are no partial results and nothing here is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    // ========== Input Errors ==========
    /// Amount text is empty, malformed, or not a finite number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Currency code is not in the registry.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Locale identifier is not known to the locale data source.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    // ========== Arithmetic Errors ==========
    /// Operands carry different currencies.
    #[error("Currency mismatch: cannot combine {left} and {right}")]
    CurrencyMismatch {
        /// Currency code of the left-hand operand.
        left: String,
        /// Currency code of the right-hand operand.
        right: String,
    },

    /// Conversion rate is zero, negative, or not finite.
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    /// Exact semantics were requested but the value needs rounding.
    #[error("{value} cannot be represented with {digits} fractional digits without rounding")]
    Precision {
        /// The unrepresentable value, as exact decimal text.
        value: String,
        /// Fractional digits allowed by the currency.
        digits: u32,
    },

    /// Allocation weights are empty, all zero, or negative.
    #[error("Invalid allocation: {0}")]
    Allocation(String),

    /// Result exceeds the representable decimal range.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Division by zero.
    #[error("Division by zero")]
    DivisionByZero,
}

impl MoneyError {
    /// Builds a `CurrencyMismatch` from two currency codes.
    #[must_use]
    pub fn mismatch(left: &str, right: &str) -> Self {
        Self::CurrencyMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// Returns a stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::UnknownLocale(_) => "UNKNOWN_LOCALE",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::Precision { .. } => "PRECISION_ERROR",
            Self::Allocation(_) => "ALLOCATION_ERROR",
            Self::Overflow => "OVERFLOW",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
        }
    }

    /// Returns true if the error was caused by caller-supplied input rather
    /// than by the arithmetic itself.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::UnknownCurrency(_)
                | Self::UnknownLocale(_)
                | Self::InvalidRate(_)
                | Self::Allocation(_)
        )
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
