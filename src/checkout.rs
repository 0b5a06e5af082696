//! Checkout

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::items::LineItem;

/// Failure reported while reserving stock for checkout.
#[derive(Debug, Error)]
pub enum ReservationError {
    /// The service rejected the reservation, e.g. insufficient stock.
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// All-or-nothing stock reservation for the full cart contents.
///
/// The store calls this once per checkout attempt with the current line
/// sequence. There is no partial reservation and no automatic retry; a
/// failed attempt is reported once and the user re-triggers checkout.
pub trait StockReservation {
    /// Reserve stock for every line, or fail the whole request.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservationError`] when the service rejects the
    /// reservation or cannot be reached.
    fn reserve(&self, lines: &[LineItem]) -> Result<(), ReservationError>;
}

/// Errors returned by [`CartStore::checkout`](crate::cart::CartStore::checkout).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart is empty; nothing was sent to the service.
    #[error("cart is empty; nothing to check out")]
    EmptyCart,

    /// A previous checkout call has not finished.
    #[error("a checkout is already in flight")]
    InFlight,

    /// The reservation failed; cart contents are unchanged.
    #[error(transparent)]
    Reservation(#[from] ReservationError),
}

/// Checkout settings: where the pre-filled message goes and how money is
/// displayed.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Phone number receiving the checkout message, international format
    /// without the leading `+`.
    pub phone: String,

    /// Display currency for subtotals and totals.
    pub currency: &'static Currency,
}

impl CheckoutConfig {
    /// Create a config for the given phone and display currency.
    pub fn new(phone: impl Into<String>, currency: &'static Currency) -> Self {
        Self {
            phone: phone.into(),
            currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    #[test]
    fn reservation_rejection_displays_the_service_reason() {
        let err = ReservationError::Rejected("insufficient stock for Bowie-10".to_owned());

        assert_eq!(err.to_string(), "insufficient stock for Bowie-10");
    }

    #[test]
    fn checkout_error_wraps_reservation_reason_transparently() {
        let err = CheckoutError::from(ReservationError::Rejected("sold out".to_owned()));

        assert_eq!(err.to_string(), "sold out");
    }

    #[test]
    fn config_holds_phone_and_currency() {
        let config = CheckoutConfig::new("5491100000000", iso::ARS);

        assert_eq!(config.phone, "5491100000000");
        assert_eq!(config.currency, iso::ARS);
    }
}
