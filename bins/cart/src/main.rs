//! Minted cart walkthrough
//!
//! Prices a small cart, splits the bill, converts the total into a few
//! currencies, and prints the stored record form.

mod cart;

use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use minted_core::ExchangeRate;
use minted_shared::AppConfig;

use crate::cart::{CartLine, Pricing, checkout};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log.filter.as_str().into());
    let (json, text) = if config.log.json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();

    let money = &config.money;
    let code = money.default_currency.as_str();
    let locale = money.default_locale.as_str();
    info!(
        currency = code,
        locale,
        rounding = %money.default_rounding,
        "Pricing cart"
    );

    let lines = vec![
        CartLine::new("Laptop", "1299.99", code, 1)?,
        CartLine::new("Mouse", "25.99", code, 2)?,
        CartLine::new("Keyboard", "49.99", code, 1)?,
    ];
    let pricing = Pricing {
        discount_percent: dec!(10),
        tax_percent: dec!(8.25),
        rounding: money.default_rounding,
    };
    let receipt = checkout(code, lines, &pricing)?;

    for line in &receipt.lines {
        println!(
            "{:<10} {:>3} x {:>12} = {:>12}",
            line.name,
            line.quantity,
            line.unit_price.format_locale(locale)?,
            line.subtotal()?.format_locale(locale)?,
        );
    }
    println!("Subtotal:  {}", receipt.subtotal.format_locale(locale)?);
    println!("Discount: -{}", receipt.discount.format_locale(locale)?);
    println!("Tax:       {}", receipt.tax.format_locale(locale)?);
    println!("Total:     {}", receipt.total.format_locale(locale)?);

    let shares = receipt.total.split_evenly(3)?;
    for (i, share) in shares.iter().enumerate() {
        println!("Share {}:   {}", i + 1, share.format_locale(locale)?);
    }

    for (target, rate, target_locale) in [
        ("EUR", dec!(0.85), "de_DE"),
        ("GBP", dec!(0.75), "en_GB"),
        ("JPY", dec!(110.50), "ja_JP"),
    ] {
        let rate = ExchangeRate::new(code, target, rate, None)?;
        let converted = receipt.total.convert(&rate)?;
        println!("In {target}:    {}", converted.format_locale(target_locale)?);
    }

    let record = serde_json::to_string_pretty(&receipt.total.to_dict())?;
    println!("Stored as: {record}");

    info!(total = %receipt.total, "Done");
    Ok(())
}
