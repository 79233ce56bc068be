//! Exact decimal parsing and checked arithmetic.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every value here is a `rust_decimal::Decimal` (96-bit mantissa, up to 28
//! fractional digits); overflow is reported, never wrapped or saturated.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use minted_shared::rounding::{self, RoundingMode, requires_rounding};
use minted_shared::{MoneyError, MoneyResult};

/// Parses decimal text into an exact `Decimal`.
///
/// Accepts an optional sign, digits with at most one `.`, and an optional
/// exponent (`1.5e3`). Surrounding whitespace is ignored. Thousands
/// separators, `NaN`, `inf`, and values that do not fit exactly are rejected.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use minted_core::decimal::parse_amount;
///
/// assert_eq!(parse_amount("1234.5600").unwrap(), dec!(1234.56));
/// assert_eq!(parse_amount("-2.5e2").unwrap(), dec!(-250));
/// assert!(parse_amount("12,00").is_err());
/// ```
pub fn parse_amount(text: &str) -> MoneyResult<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::InvalidAmount("amount is empty".to_string()));
    }

    let (mantissa, exponent) = split_exponent(trimmed);
    let mantissa = canonical_mantissa(mantissa)
        .ok_or_else(|| MoneyError::InvalidAmount(format!("not a decimal number: {text}")))?;

    let parsed = match exponent {
        None => Decimal::from_str_exact(&mantissa),
        Some(exp) => {
            if !is_valid_exponent(exp) {
                return Err(MoneyError::InvalidAmount(format!(
                    "not a decimal number: {text}"
                )));
            }
            let exp = exp.strip_prefix('+').unwrap_or(exp);
            Decimal::from_scientific(&format!("{mantissa}e{exp}"))
        }
    };

    parsed.map_err(|e| MoneyError::InvalidAmount(format!("{text}: {e}")))
}

fn split_exponent(text: &str) -> (&str, Option<&str>) {
    match text.find(['e', 'E']) {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    }
}

fn is_valid_exponent(exp: &str) -> bool {
    let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
    !digits.is_empty() && digits.len() <= 3 && digits.chars().all(|c| c.is_ascii_digit())
}

/// Validates `[+-]digits[.digits]` and returns it with a leading `0` added
/// before a bare `.` and a trailing bare `.` dropped. `None` if malformed.
fn canonical_mantissa(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part)
    {
        return None;
    }

    let mut canonical = String::with_capacity(unsigned.len() + 2);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        canonical.push('.');
        canonical.push_str(frac_part);
    }
    Some(canonical)
}

/// Converts a binary float into a `Decimal`.
///
/// LOSSY: a float such as `0.1` is not exactly representable, so the result is
/// the shortest decimal that round-trips to the same float, not the value the
/// caller may have had in mind. Prefer [`parse_amount`] with decimal text.
pub fn from_f64_lossy(value: f64) -> MoneyResult<Decimal> {
    if !value.is_finite() {
        return Err(MoneyError::InvalidAmount(format!(
            "non-finite float: {value}"
        )));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| MoneyError::InvalidAmount(format!("float out of range: {value}")))
}

/// Most fractional digits a `Decimal` can carry.
pub const MAX_SCALE: u32 = 28;

/// Returns the integer count of minor units in `amount`.
///
/// Fails with `Precision` if `amount` has non-zero digits beyond `digits`, and
/// with `Overflow` if the count does not fit the 96-bit mantissa.
pub fn to_minor_units(amount: Decimal, digits: u32) -> MoneyResult<i128> {
    if requires_rounding(amount, digits) {
        return Err(MoneyError::Precision {
            value: amount.to_string(),
            digits,
        });
    }
    let mut scaled = amount;
    scaled.rescale(digits);
    if scaled.scale() != digits {
        return Err(MoneyError::Overflow);
    }
    Ok(scaled.mantissa())
}

/// Builds a value with exactly `digits` fractional digits from a minor-unit
/// count.
pub fn from_minor_units(units: i128, digits: u32) -> MoneyResult<Decimal> {
    Decimal::try_from_i128_with_scale(units, digits).map_err(|_| MoneyError::Overflow)
}

/// Exact addition.
///
/// Fails with `Overflow` if the sum does not fit at the operands' precision.
pub fn add(a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
    let sum = a.checked_add(b).ok_or(MoneyError::Overflow)?;
    ensure_kept_digits(sum, a, b)
}

/// Exact subtraction.
///
/// Fails with `Overflow` if the difference does not fit at the operands'
/// precision.
pub fn subtract(a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
    let difference = a.checked_sub(b).ok_or(MoneyError::Overflow)?;
    ensure_kept_digits(difference, a, b)
}

// checked_add/checked_sub round instead of failing once the aligned
// mantissa overflows
fn ensure_kept_digits(result: Decimal, a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
    let needed = a.normalize().scale().max(b.normalize().scale());
    if result.scale() < needed {
        return Err(MoneyError::Overflow);
    }
    Ok(result)
}

/// Exact product.
///
/// Fails with `Precision` if the product needs more than [`MAX_SCALE`]
/// fractional digits and with `Overflow` if it does not fit the mantissa.
/// The product is never rounded.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use minted_core::decimal::multiply;
///
/// assert_eq!(multiply(dec!(19.99), dec!(1.0825)).unwrap(), dec!(21.639175));
/// assert!(multiply(dec!(0.01), dec!(1.0000000000000000000000000001)).is_err());
/// ```
pub fn multiply(a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
    let exact_scale = product_scale(a.normalize(), b.normalize());
    if exact_scale > MAX_SCALE {
        return Err(MoneyError::Precision {
            value: format!("{a} * {b}"),
            digits: MAX_SCALE,
        });
    }
    let product = a.checked_mul(b).ok_or(MoneyError::Overflow)?;
    if product.scale() < exact_scale {
        return Err(MoneyError::Overflow);
    }
    Ok(product)
}

/// Fractional digits of the exact product of two normalized values.
fn product_scale(a: Decimal, b: Decimal) -> u32 {
    if a.is_zero() || b.is_zero() {
        return 0;
    }
    let (ma, mb) = (a.mantissa().unsigned_abs(), b.mantissa().unsigned_abs());
    // trailing decimal zeros of ma * mb = min(factors of 2, factors of 5)
    let twos = ma.trailing_zeros() + mb.trailing_zeros();
    let fives = factors_of_five(ma) + factors_of_five(mb);
    (a.scale() + b.scale()).saturating_sub(twos.min(fives))
}

fn factors_of_five(mut n: u128) -> u32 {
    let mut count = 0;
    while n != 0 && n % 5 == 0 {
        n /= 5;
        count += 1;
    }
    count
}

/// Quotient carried to the full 28-digit precision of `Decimal`.
///
/// The quotient may already be rounded at the last digit; use
/// [`divide_rounded`] when the result is rounded again.
pub fn divide(a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
    if b.is_zero() {
        return Err(MoneyError::DivisionByZero);
    }
    a.checked_div(b).ok_or(MoneyError::Overflow)
}

/// `1 + rate_percent / 100`, exactly.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use minted_core::decimal::percent_multiplier;
///
/// assert_eq!(percent_multiplier(dec!(8.25)).unwrap(), dec!(1.0825));
/// ```
pub fn percent_multiplier(rate_percent: Decimal) -> MoneyResult<Decimal> {
    let shifted = add(Decimal::ONE_HUNDRED, rate_percent)?;
    let scale = shifted.scale() + 2;
    if scale > MAX_SCALE {
        return Err(MoneyError::Precision {
            value: format!("{rate_percent}%"),
            digits: MAX_SCALE,
        });
    }
    from_minor_units(shifted.mantissa(), scale)
}

/// `a * b` rounded once to `digits` fractional digits.
///
/// The rounding decision uses every digit of the exact product, even past
/// the 28 digits a `Decimal` can hold.
pub fn multiply_rounded(
    a: Decimal,
    b: Decimal,
    digits: u32,
    mode: RoundingMode,
) -> MoneyResult<Decimal> {
    let (a, b) = (a.normalize(), b.normalize());
    let Some(product) = a.mantissa().checked_mul(b.mantissa()) else {
        // wider than i128: only exact products are accepted
        return rounding::round(multiply(a, b)?, digits, mode);
    };

    let scale = a.scale() + b.scale();
    let units = if scale >= digits {
        round_quotient(product, pow10(scale - digits), mode)?
    } else {
        pow10(digits - scale)
            .and_then(|factor| product.checked_mul(factor))
            .ok_or(MoneyError::Overflow)?
    };
    from_minor_units(units, digits)
}

/// `a / b` rounded once to `digits` fractional digits.
///
/// The quotient is computed on integers with its remainder, so it is never
/// rounded at 28 digits first.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use minted_core::decimal::divide_rounded;
/// use minted_shared::RoundingMode;
///
/// assert_eq!(divide_rounded(dec!(10), dec!(3), 2, RoundingMode::Up).unwrap(), dec!(3.34));
/// assert_eq!(divide_rounded(dec!(0.05), dec!(2), 2, RoundingMode::HalfEven).unwrap(), dec!(0.02));
/// ```
pub fn divide_rounded(
    a: Decimal,
    b: Decimal,
    digits: u32,
    mode: RoundingMode,
) -> MoneyResult<Decimal> {
    if b.is_zero() {
        return Err(MoneyError::DivisionByZero);
    }
    let b = b.normalize();

    // a / b * 10^digits = (ma * 10^(sb + digits)) / (mb * 10^sa)
    let up = b.scale() + digits;
    let down = a.scale();
    let common = up.min(down);
    let numerator = pow10(up - common)
        .and_then(|factor| a.mantissa().checked_mul(factor))
        .ok_or(MoneyError::Overflow)?;
    let denominator = pow10(down - common)
        .and_then(|factor| b.mantissa().checked_mul(factor))
        .ok_or(MoneyError::Overflow)?;

    let (numerator, denominator) = if denominator < 0 {
        (
            numerator.checked_neg().ok_or(MoneyError::Overflow)?,
            denominator.checked_neg().ok_or(MoneyError::Overflow)?,
        )
    } else {
        (numerator, denominator)
    };
    let units = round_quotient(numerator, Some(denominator), mode)?;
    from_minor_units(units, digits)
}

fn pow10(exponent: u32) -> Option<i128> {
    10i128.checked_pow(exponent)
}

/// Rounds `numerator / denominator` (denominator > 0) to an integer.
///
/// A `None` denominator stands for a power of ten larger than `i128::MAX`,
/// which every `i128` numerator is below half of.
fn round_quotient(
    numerator: i128,
    denominator: Option<i128>,
    mode: RoundingMode,
) -> MoneyResult<i128> {
    let (quotient, remainder, half) = match denominator {
        Some(denominator) => {
            let remainder = numerator % denominator;
            let half = (remainder.unsigned_abs() * 2).cmp(&denominator.unsigned_abs());
            (numerator / denominator, remainder, half)
        }
        None => (0, numerator, Ordering::Less),
    };
    if remainder == 0 {
        return Ok(quotient);
    }

    let sign = remainder.signum();
    let away = match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => sign > 0,
        RoundingMode::Floor => sign < 0,
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::HalfEven => match half {
            Ordering::Equal => quotient % 2 != 0,
            other => other == Ordering::Greater,
        },
    };
    if away {
        quotient.checked_add(sign).ok_or(MoneyError::Overflow)
    } else {
        Ok(quotient)
    }
}

/// Splits `total` minor units into `parts` shares that differ by at most one
/// unit and sum exactly to `total`.
///
/// The first `total % parts` shares carry the extra unit (a negative total
/// gives them one extra negative unit). Returns an empty vector for zero
/// parts.
///
/// # Example
///
/// ```
/// use minted_core::decimal::split_units;
///
/// assert_eq!(split_units(10_000, 3), vec![3334, 3333, 3333]);
/// assert_eq!(split_units(-5, 2), vec![-3, -2]);
/// ```
#[must_use]
pub fn split_units(total: i128, parts: usize) -> Vec<i128> {
    if parts == 0 {
        return vec![];
    }
    let count = i128::try_from(parts).unwrap_or(i128::MAX);
    let base = total / count;
    let remainder = total % count;
    let extra = usize::try_from(remainder.unsigned_abs()).unwrap_or(usize::MAX);
    let step = remainder.signum();

    (0..parts)
        .map(|i| if i < extra { base + step } else { base })
        .collect()
}
