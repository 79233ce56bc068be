//! Exact money arithmetic for Minted.
//!
//! This crate contains pure value logic with ZERO I/O dependencies.
//! Every operation is synchronous, deterministic, and thread-safe.
//!
//! # Modules
//!
//! - `decimal` - Exact parsing, minor units, and checked arithmetic
//! - `money` - The `Money` value type, allocation, and conversion
//! - `format` - Locale-styled rendering
//! - `serialization` - Plain record form for storage and transport
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use minted_core::Money;
//!
//! let total = Money::new("1000.00", "USD").unwrap();
//! let parts = total.allocate(&[3, 7, 5, 1, 4]).unwrap();
//! assert_eq!(Money::sum("USD", &parts).unwrap(), total);
//!
//! let eur = total.convert_to("EUR", dec!(0.85)).unwrap();
//! assert_eq!(eur.format_locale("de_DE").unwrap(), "850,00 €");
//! ```

pub mod decimal;
pub mod format;
pub mod money;
pub mod serialization;

pub use format::{BuiltinLocales, FormatStyle, LocaleData, SymbolPlacement};
pub use minted_shared::{Currency, MoneyError, MoneyResult, RoundingMode};
pub use money::Money;
pub use money::exchange::ExchangeRate;
pub use serialization::MoneyRecord;
