//! Backend client

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, Product},
    checkout::{ReservationError, StockReservation},
    items::LineItem,
};

/// Errors raised while talking to the storefront backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request failed or the response could not be decoded.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Success/failure envelope the backend wraps around mutation replies.
#[derive(Debug, Deserialize)]
struct ServiceReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl ServiceReply {
    fn into_result(self) -> Result<(), ReservationError> {
        if self.success {
            Ok(())
        } else {
            Err(ReservationError::Rejected(
                self.error
                    .unwrap_or_else(|| "stock update rejected".to_owned()),
            ))
        }
    }
}

/// Blocking HTTP client for the storefront backend.
///
/// Covers the two cart-facing endpoints: the product listing consumed at
/// page load and the all-or-nothing stock update issued at checkout.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl BackendClient {
    /// Client for the backend at `base_url`, given without a trailing
    /// slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Fetch the full product list and build a catalog from it.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] when the request fails or the
    /// response is not a product list.
    pub fn fetch_catalog(&self) -> Result<Catalog, BackendError> {
        let products: Vec<Product> = self
            .http
            .get(format!("{}/api/products", self.base_url))
            .send()?
            .error_for_status()?
            .json()?;

        debug!(count = products.len(), "fetched product catalog");

        Ok(Catalog::new(products))
    }
}

impl StockReservation for BackendClient {
    /// POST the full line sequence to the stock-update endpoint.
    ///
    /// The backend replies with its envelope even on rejection, so the
    /// body is decoded regardless of the HTTP status.
    fn reserve(&self, lines: &[LineItem]) -> Result<(), ReservationError> {
        let reply: ServiceReply = self
            .http
            .post(format!("{}/api/update-stock", self.base_url))
            .json(lines)
            .send()?
            .json()?;

        debug!(success = reply.success, "stock update replied");

        reply.into_result()
    }
}
