//! Pricing

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::items::LineItem;

/// Derived cart totals, recomputed fresh on every read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of per-line subtotals.
    pub grand_total: Decimal,

    /// Sum of quantities across all lines; the header badge shows this.
    pub item_count: u64,
}

/// Sum subtotals and quantities over the given line items.
#[must_use]
pub fn totals(lines: &[LineItem]) -> Totals {
    lines.iter().fold(Totals::default(), |acc, line| Totals {
        grand_total: acc.grand_total + line.subtotal(),
        item_count: acc.item_count + u64::from(line.quantity()),
    })
}

/// Present an amount as display money in the given currency.
#[must_use]
pub fn display_price(amount: Decimal, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_decimal(amount, currency)
}
