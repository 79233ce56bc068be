//! Human-readable rendering of money values.
//!
//! Formatting is pure string work on the exact decimal digits; the amount is
//! never routed through a float.

pub mod locale;

pub use locale::{BuiltinLocales, LocaleData};

use minted_shared::MoneyResult;

use crate::money::Money;

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SymbolPlacement {
    /// `$1,234.56`
    #[default]
    Prefix,
    /// `1.234,56 €`
    Suffix,
}

/// Locale conventions for rendering an amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatStyle {
    /// Symbol before or after the number.
    pub symbol_placement: SymbolPlacement,
    /// Put a space between the symbol and the number.
    pub symbol_spacing: bool,
    /// Separator between digit groups of the integer part.
    pub grouping_separator: String,
    /// Separator between integer and fractional digits.
    pub decimal_separator: String,
    /// Digits per group; `0` disables grouping.
    pub group_size: usize,
}

impl Default for FormatStyle {
    /// `$1,234.56`
    fn default() -> Self {
        Self {
            symbol_placement: SymbolPlacement::Prefix,
            symbol_spacing: false,
            grouping_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            group_size: 3,
        }
    }
}

/// Renders `money` using `style`.
///
/// Negative amounts get a leading `-` (`-$5.00`, `-5,00 €`). The fractional
/// part always shows every minor-unit digit; zero-digit currencies have no
/// decimal separator.
#[must_use]
pub fn format(money: &Money, style: &FormatStyle) -> String {
    let digits = money.amount().abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut number = group_digits(integer, &style.grouping_separator, style.group_size);
    if !fraction.is_empty() {
        number.push_str(&style.decimal_separator);
        number.push_str(fraction);
    }

    let symbol = money.currency().symbol();
    let space = if style.symbol_spacing { " " } else { "" };
    let sign = if money.is_negative() { "-" } else { "" };

    match style.symbol_placement {
        SymbolPlacement::Prefix => format!("{sign}{symbol}{space}{number}"),
        SymbolPlacement::Suffix => format!("{sign}{number}{space}{symbol}"),
    }
}

fn group_digits(integer: &str, separator: &str, group_size: usize) -> String {
    if group_size == 0 || integer.len() <= group_size {
        return integer.to_string();
    }

    let mut grouped = String::with_capacity(integer.len() + integer.len() / group_size * separator.len());
    let head = integer.len() % group_size;
    if head > 0 {
        grouped.push_str(&integer[..head]);
    }
    for (i, chunk) in integer.as_bytes()[head..].chunks(group_size).enumerate() {
        if head > 0 || i > 0 {
            grouped.push_str(separator);
        }
        // chunks of ASCII digits are valid UTF-8
        grouped.push_str(std::str::from_utf8(chunk).unwrap_or_default());
    }
    grouped
}

impl Money {
    /// Formats with the default style: symbol prefix, `,` grouping, `.`
    /// decimal separator.
    ///
    /// # Example
    ///
    /// ```
    /// use minted_core::Money;
    ///
    /// assert_eq!(Money::new("1234.56", "USD").unwrap().format(), "$1,234.56");
    /// ```
    #[must_use]
    pub fn format(&self) -> String {
        format(self, &FormatStyle::default())
    }

    /// Formats using the built-in locale table.
    ///
    /// Fails with `UnknownLocale` for an unrecognized id.
    pub fn format_locale(&self, locale_id: &str) -> MoneyResult<String> {
        self.format_with(&BuiltinLocales, locale_id)
    }

    /// Formats using conventions resolved from `locales`.
    pub fn format_with(&self, locales: &impl LocaleData, locale_id: &str) -> MoneyResult<String> {
        let style = locales.resolve(locale_id)?;
        Ok(format(self, &style))
    }
}
