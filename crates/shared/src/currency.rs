//! Currency metadata and the process-wide currency registry.
//!
//! The registry is built once from a fixed table of ISO 4217 codes the first
//! time it is touched and is read-only afterwards, so lookups never lock.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

use crate::error::{MoneyError, MoneyResult};

/// ISO 4217 currency metadata.
///
/// Instances only exist inside the registry and are handed out as
/// `&'static Currency`, so every money value in a currency shares one record.
#[derive(Debug)]
pub struct Currency {
    code: &'static str,
    name: &'static str,
    minor_unit_digits: u32,
    symbol: Option<&'static str>,
}

impl Currency {
    const fn new(
        code: &'static str,
        name: &'static str,
        minor_unit_digits: u32,
        symbol: Option<&'static str>,
    ) -> Self {
        Self {
            code,
            name,
            minor_unit_digits,
            symbol,
        }
    }

    /// Uppercase ISO code, e.g. `"USD"`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// English display name, e.g. `"US Dollar"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of fractional digits of the minor unit (2 for cents, 0 for yen).
    #[must_use]
    pub const fn minor_unit_digits(&self) -> u32 {
        self.minor_unit_digits
    }

    /// Display glyph, falling back to the code when the currency has none.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.symbol.unwrap_or(self.code)
    }

    /// Returns true if the currency has its own glyph.
    #[must_use]
    pub const fn has_symbol(&self) -> bool {
        self.symbol.is_some()
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Currency {}

impl std::hash::Hash for Currency {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

/// Built-in table. Digit counts follow ISO 4217.
static BUILTIN_CURRENCIES: [Currency; 36] = [
    Currency::new("AED", "UAE Dirham", 2, None),
    Currency::new("AUD", "Australian Dollar", 2, Some("A$")),
    Currency::new("BHD", "Bahraini Dinar", 3, None),
    Currency::new("BRL", "Brazilian Real", 2, Some("R$")),
    Currency::new("CAD", "Canadian Dollar", 2, Some("CA$")),
    Currency::new("CHF", "Swiss Franc", 2, None),
    Currency::new("CLP", "Chilean Peso", 0, None),
    Currency::new("CNY", "Chinese Yuan", 2, Some("CN¥")),
    Currency::new("CZK", "Czech Koruna", 2, Some("Kč")),
    Currency::new("DKK", "Danish Krone", 2, Some("kr")),
    Currency::new("EUR", "Euro", 2, Some("€")),
    Currency::new("GBP", "British Pound", 2, Some("£")),
    Currency::new("HKD", "Hong Kong Dollar", 2, Some("HK$")),
    Currency::new("HUF", "Hungarian Forint", 2, Some("Ft")),
    Currency::new("IDR", "Indonesian Rupiah", 2, Some("Rp")),
    Currency::new("ILS", "Israeli New Shekel", 2, Some("₪")),
    Currency::new("INR", "Indian Rupee", 2, Some("₹")),
    Currency::new("ISK", "Icelandic Krona", 0, Some("kr")),
    Currency::new("JOD", "Jordanian Dinar", 3, None),
    Currency::new("JPY", "Japanese Yen", 0, Some("¥")),
    Currency::new("KRW", "South Korean Won", 0, Some("₩")),
    Currency::new("KWD", "Kuwaiti Dinar", 3, None),
    Currency::new("MXN", "Mexican Peso", 2, Some("MX$")),
    Currency::new("NOK", "Norwegian Krone", 2, Some("kr")),
    Currency::new("NZD", "New Zealand Dollar", 2, Some("NZ$")),
    Currency::new("OMR", "Omani Rial", 3, None),
    Currency::new("PHP", "Philippine Peso", 2, Some("₱")),
    Currency::new("PLN", "Polish Zloty", 2, Some("zł")),
    Currency::new("SAR", "Saudi Riyal", 2, None),
    Currency::new("SEK", "Swedish Krona", 2, Some("kr")),
    Currency::new("SGD", "Singapore Dollar", 2, Some("S$")),
    Currency::new("THB", "Thai Baht", 2, Some("฿")),
    Currency::new("TND", "Tunisian Dinar", 3, None),
    Currency::new("USD", "US Dollar", 2, Some("$")),
    Currency::new("VND", "Vietnamese Dong", 0, Some("₫")),
    Currency::new("ZAR", "South African Rand", 2, Some("R")),
];

static REGISTRY: Lazy<HashMap<&'static str, &'static Currency>> = Lazy::new(|| {
    let registry: HashMap<_, _> = BUILTIN_CURRENCIES.iter().map(|c| (c.code, c)).collect();
    tracing::debug!(currencies = registry.len(), "currency registry initialized");
    registry
});

/// Looks up a currency by code.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Example
///
/// ```
/// use minted_shared::currency;
///
/// let usd = currency::lookup("usd").unwrap();
/// assert_eq!(usd.code(), "USD");
/// assert_eq!(usd.minor_unit_digits(), 2);
/// ```
pub fn lookup(code: &str) -> MoneyResult<&'static Currency> {
    let normalized = code.trim().to_ascii_uppercase();
    REGISTRY
        .get(normalized.as_str())
        .copied()
        .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
}

/// Returns true if `code` resolves to a registered currency.
#[must_use]
pub fn is_registered(code: &str) -> bool {
    lookup(code).is_ok()
}

/// Iterates every registered currency, ordered by code.
pub fn all() -> impl Iterator<Item = &'static Currency> {
    BUILTIN_CURRENCIES.iter()
}
