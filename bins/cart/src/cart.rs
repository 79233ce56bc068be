//! Checkout arithmetic for the walkthrough.

use rust_decimal::Decimal;
use serde::Serialize;

use minted_core::{Money, MoneyResult, RoundingMode, decimal};

/// One line of the cart.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    /// Product name.
    pub name: String,
    /// Price per unit.
    pub unit_price: Money,
    /// Units bought.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line priced from exact decimal text.
    pub fn new(name: &str, unit_price: &str, code: &str, quantity: u32) -> MoneyResult<Self> {
        Ok(Self {
            name: name.to_string(),
            unit_price: Money::exact(unit_price, code)?,
            quantity,
        })
    }

    /// `unit_price * quantity`, exact.
    pub fn subtotal(&self) -> MoneyResult<Money> {
        self.unit_price.multiply_exact(self.quantity)
    }
}

/// Discount and tax settings for a checkout.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    /// Discount in percent of the subtotal.
    pub discount_percent: Decimal,
    /// Tax in percent of the discounted total.
    pub tax_percent: Decimal,
    /// Mode used for every rounding step.
    pub rounding: RoundingMode,
}

/// Totals for a checked-out cart.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    /// Cart lines as bought.
    pub lines: Vec<CartLine>,
    /// Sum of line subtotals.
    pub subtotal: Money,
    /// Discount taken off the subtotal.
    pub discount: Money,
    /// Subtotal minus discount.
    pub discounted: Money,
    /// Tax on the discounted total.
    pub tax: Money,
    /// Amount due.
    pub total: Money,
}

/// Prices a cart. All lines must share one currency.
pub fn checkout(code: &str, lines: Vec<CartLine>, pricing: &Pricing) -> MoneyResult<Receipt> {
    let subtotals = lines
        .iter()
        .map(CartLine::subtotal)
        .collect::<MoneyResult<Vec<_>>>()?;
    let subtotal = Money::sum(code, &subtotals)?;

    let rate = decimal::divide(pricing.discount_percent, Decimal::ONE_HUNDRED)?;
    let discount = subtotal.multiply_with(rate, pricing.rounding)?;
    let discounted = subtotal.subtract(&discount)?;
    let total = discounted.with_tax_rounding(pricing.tax_percent, pricing.rounding)?;
    let tax = total.subtract(&discounted)?;

    tracing::info!(
        lines = lines.len(),
        subtotal = %subtotal,
        total = %total,
        "cart checked out"
    );

    Ok(Receipt {
        lines,
        subtotal,
        discount,
        discounted,
        tax,
        total,
    })
}
