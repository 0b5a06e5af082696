//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    backend::{BackendClient, BackendError},
    cart::CartStore,
    catalog::{Catalog, Product, ProductId},
    checkout::{CheckoutConfig, CheckoutError, ReservationError, StockReservation},
    items::LineItem,
    message::CheckoutMessage,
    observer::{CartNotice, CartObserver, CartView, NoopObserver},
    pricing::{Totals, totals},
    storage::{CartStorage, JsonFileStorage, MemoryStorage, STORAGE_KEY, StorageError},
};
