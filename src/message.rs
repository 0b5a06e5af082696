//! Checkout message

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use rusty_money::iso::Currency;

use crate::{items::LineItem, pricing};

/// Opening line of the checkout message.
const GREETING: &str = "Hi! I'd like to complete my purchase with the following items:";

/// Pre-filled checkout text for the messaging-app hand-off.
///
/// Composed fresh from the cart lines; composing never mutates cart state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutMessage {
    body: String,
}

impl CheckoutMessage {
    /// Compose the message for the given lines, or `None` when there is
    /// nothing to check out.
    #[must_use]
    pub fn compose(lines: &[LineItem], currency: &'static Currency) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }

        let mut body = String::from(GREETING);
        body.push_str("\n\n");

        for line in lines {
            let subtotal = pricing::display_price(line.subtotal(), currency);
            body.push_str(&format!(
                "- {}x {} - {subtotal}\n",
                line.quantity(),
                line.name()
            ));
        }

        let total = pricing::display_price(pricing::totals(lines).grand_total, currency);
        body.push_str(&format!("\n*Cart total: {total}*"));

        Some(Self { body })
    }

    /// The plain message text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Deep link opening a chat to `phone` with the body pre-filled,
    /// percent-escaped into the query string.
    #[must_use]
    pub fn deep_link(&self, phone: &str) -> String {
        let encoded = utf8_percent_encode(&self.body, NON_ALPHANUMERIC);
        format!("https://wa.me/{phone}?text={encoded}")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use smallvec::SmallVec;

    use crate::catalog::{Product, ProductId};

    use super::*;

    fn line(name: &str, price: i64, quantity: u32) -> LineItem {
        let product = Product {
            id: ProductId::from(name),
            name: name.to_owned(),
            price: Decimal::from(price),
            stock: quantity,
            images: SmallVec::new(),
            category: None,
            description: None,
        };

        let mut line = LineItem::first_of(&product);
        for _ in 1..quantity {
            line.increment();
        }
        line
    }

    #[test]
    fn compose_empty_cart_returns_none() {
        assert!(CheckoutMessage::compose(&[], iso::USD).is_none());
    }

    #[test]
    fn compose_lists_every_line_and_the_total() {
        let lines = [line("Bowie-10", 1000, 2), line("Verijero-12", 500, 1)];

        let Some(message) = CheckoutMessage::compose(&lines, iso::USD) else {
            panic!("expected a message for a non-empty cart");
        };

        assert_eq!(
            message.body(),
            "Hi! I'd like to complete my purchase with the following items:\n\n\
             - 2x Bowie-10 - $2,000.00\n\
             - 1x Verijero-12 - $500.00\n\n\
             *Cart total: $2,500.00*"
        );
    }

    #[test]
    fn deep_link_escapes_the_body() {
        let lines = [line("Bowie-10", 1000, 1)];

        let Some(message) = CheckoutMessage::compose(&lines, iso::USD) else {
            panic!("expected a message for a non-empty cart");
        };

        let link = message.deep_link("5491100000000");

        assert!(
            link.starts_with("https://wa.me/5491100000000?text="),
            "unexpected link prefix: {link}"
        );
        assert!(!link.contains(' '), "spaces must be escaped: {link}");
        assert!(!link.contains('\n'), "newlines must be escaped: {link}");
        assert!(link.contains("Bowie%2D10"), "body missing from link: {link}");
    }
}
