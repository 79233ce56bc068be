//! Shared building blocks for Minted.
//!
//! This crate provides what every other crate leans on:
//! - The read-only ISO 4217 currency registry
//! - Rounding modes and the rounding engine
//! - The money error taxonomy
//! - Configuration management

pub mod config;
pub mod currency;
pub mod error;
pub mod rounding;

pub use config::AppConfig;
pub use currency::Currency;
pub use error::{MoneyError, MoneyResult};
pub use rounding::RoundingMode;
