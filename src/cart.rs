//! Cart store

use tracing::{debug, instrument, warn};

use crate::{
    catalog::{Catalog, Product},
    checkout::{CheckoutConfig, CheckoutError, StockReservation},
    items::LineItem,
    message::CheckoutMessage,
    observer::{CartNotice, CartObserver, CartView, NoopObserver},
    pricing::{self, Totals},
    storage::CartStorage,
};

/// The cart store: owns the ordered line sequence, persists it after every
/// mutation, and pushes fresh derived state to its observer.
///
/// All operations run to completion on the caller's thread. While a
/// checkout call is in flight the store rejects further mutations, so a
/// re-entrant event handler cannot change the sequence the reservation was
/// issued for.
#[derive(Debug)]
pub struct CartStore<S, O = NoopObserver> {
    lines: Vec<LineItem>,
    storage: S,
    observer: O,
    config: CheckoutConfig,
    checkout_in_flight: bool,
}

impl<S: CartStorage> CartStore<S> {
    /// Create an empty, unobserved store. Call [`load`](Self::load) to
    /// restore a persisted cart.
    pub fn new(storage: S, config: CheckoutConfig) -> Self {
        Self::with_observer(storage, NoopObserver, config)
    }
}

impl<S: CartStorage, O: CartObserver> CartStore<S, O> {
    /// Create an empty store that reports changes and notices to
    /// `observer`.
    pub fn with_observer(storage: S, observer: O, config: CheckoutConfig) -> Self {
        Self {
            lines: Vec::new(),
            storage,
            observer,
            config,
            checkout_in_flight: false,
        }
    }

    /// Replace in-memory state with the persisted record.
    ///
    /// A missing or malformed record falls open to the empty cart and is
    /// never propagated. Notifies a full recompute either way so consumers
    /// start from a rendered state.
    pub fn load(&mut self) {
        self.lines = match self.storage.load() {
            Ok(Some(lines)) => lines,
            Ok(None) => Vec::new(),
            Err(err) => {
                debug!(%err, "discarding unreadable cart record");
                Vec::new()
            }
        };

        self.notify_change();
    }

    /// Add one unit of `product`.
    ///
    /// An existing line increments while below the snapshot's stock,
    /// otherwise the observer gets [`CartNotice::OutOfStock`] and state is
    /// unchanged. A product with zero stock is not added and raises no
    /// notice.
    pub fn add(&mut self, product: &Product) {
        if self.reject_while_in_flight() {
            return;
        }

        match self
            .lines
            .iter_mut()
            .find(|line| line.id() == &product.id)
        {
            Some(line) => {
                if line.quantity() < product.stock {
                    line.increment();
                    self.notify(CartNotice::Added(product.name.clone()));
                } else {
                    self.notify(CartNotice::OutOfStock(product.name.clone()));
                }
            }
            None if product.stock > 0 => {
                self.lines.push(LineItem::first_of(product));
                self.notify(CartNotice::Added(product.name.clone()));
            }
            None => {}
        }

        self.commit();
    }

    /// Add one unit at `index`, re-checking stock against the supplied
    /// catalog rather than the line's own snapshot; the two may have
    /// diverged.
    ///
    /// Out-of-range indexes are ignored. A product that has vanished from
    /// the catalog counts as having no stock.
    pub fn increment(&mut self, index: usize, catalog: &Catalog) {
        if self.reject_while_in_flight() {
            return;
        }

        let Some(line) = self.lines.get(index) else {
            return;
        };

        let name = line.name().to_owned();
        let below_stock = catalog
            .find(line.id())
            .is_some_and(|product| line.quantity() < product.stock);

        if below_stock {
            if let Some(line) = self.lines.get_mut(index) {
                line.increment();
            }
            self.commit();
        } else {
            self.notify(CartNotice::OutOfStock(name));
        }
    }

    /// Remove one unit at `index`; a line at quantity 1 is removed
    /// entirely, so quantity never reaches 0. Out-of-range indexes are
    /// ignored.
    pub fn decrement(&mut self, index: usize) {
        if self.reject_while_in_flight() {
            return;
        }

        let Some(line) = self.lines.get_mut(index) else {
            return;
        };

        if line.quantity() > 1 {
            line.decrement();
        } else {
            self.lines.remove(index);
        }

        self.commit();
    }

    /// Drop the line at `index` unconditionally. Out-of-range indexes are
    /// ignored.
    pub fn remove(&mut self, index: usize) {
        if self.reject_while_in_flight() {
            return;
        }

        if index < self.lines.len() {
            self.lines.remove(index);
            self.commit();
        }
    }

    /// Line items in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines. The header badge shows
    /// [`Totals::item_count`] instead, which sums quantities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Recompute derived totals from the current lines.
    #[must_use]
    pub fn totals(&self) -> Totals {
        pricing::totals(&self.lines)
    }

    /// Current renderable snapshot: lines plus fresh totals.
    #[must_use]
    pub fn view(&self) -> CartView<'_> {
        CartView {
            lines: &self.lines,
            totals: self.totals(),
        }
    }

    /// Compose the checkout message, or `None` when the cart is empty.
    #[must_use]
    pub fn checkout_message(&self) -> Option<CheckoutMessage> {
        CheckoutMessage::compose(&self.lines, self.config.currency)
    }

    /// Checkout settings this store was built with.
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// The observer, for callers that read accumulated state back out.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Reserve stock for the full cart and clear it on success.
    ///
    /// The cart is cleared only after the service confirms the
    /// reservation; any failure leaves the lines untouched so the user can
    /// retry without re-adding items. The returned message carries the
    /// deep link for the hand-off.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: nothing to check out; no service
    ///   call was made.
    /// - [`CheckoutError::InFlight`]: a previous checkout has not
    ///   finished.
    /// - [`CheckoutError::Reservation`]: the service rejected the
    ///   reservation or could not be reached.
    #[instrument(skip_all, fields(lines = self.lines.len()))]
    pub fn checkout(
        &mut self,
        service: &impl StockReservation,
    ) -> Result<CheckoutMessage, CheckoutError> {
        let Some(message) = self.checkout_message() else {
            return Err(CheckoutError::EmptyCart);
        };

        if self.checkout_in_flight {
            return Err(CheckoutError::InFlight);
        }

        self.checkout_in_flight = true;
        let reserved = service.reserve(&self.lines);
        self.checkout_in_flight = false;

        match reserved {
            Ok(()) => {
                self.lines.clear();
                self.commit();
                self.notify(CartNotice::CheckoutCompleted);
                Ok(message)
            }
            Err(err) => {
                warn!(%err, "stock reservation failed");
                self.notify(CartNotice::CheckoutFailed(err.to_string()));
                Err(err.into())
            }
        }
    }

    fn reject_while_in_flight(&mut self) -> bool {
        if self.checkout_in_flight {
            self.notify(CartNotice::CheckoutInFlight);
        }
        self.checkout_in_flight
    }

    fn notify(&mut self, notice: CartNotice) {
        self.observer.on_notice(&notice);
    }

    /// Persist the full record and push a fresh view to the observer.
    fn commit(&mut self) {
        if let Err(err) = self.storage.save(&self.lines) {
            warn!(%err, "failed to persist cart record");
        }

        self.notify_change();
    }

    fn notify_change(&mut self) {
        let totals = pricing::totals(&self.lines);
        self.observer.on_change(CartView {
            lines: &self.lines,
            totals,
        });
    }
}
