//! Remote product store.
//!
//! [`RemoteStore`] is the contract the controller consumes; [`HttpStore`]
//! speaks it over the catalog REST API.

mod api_types;
#[cfg(test)]
pub mod fake;
mod http;

pub use api_types::Health;
pub use http::HttpStore;

use crate::catalog::types::{Listing, NewProduct, Product, ProductId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  /// Network failure, non-success status, or an unreadable body
  #[error("{0}")]
  Transport(String),
  #[error("product {0} not found")]
  NotFound(ProductId),
}

impl From<reqwest::Error> for StoreError {
  fn from(e: reqwest::Error) -> Self {
    StoreError::Transport(e.to_string())
  }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RemoteStore: Send + Sync {
  /// Full product list plus where it was served from
  async fn list(&self) -> StoreResult<Listing>;

  async fn create(&self, product: &NewProduct) -> StoreResult<Product>;

  async fn update(&self, id: &ProductId, product: &NewProduct) -> StoreResult<Product>;

  async fn delete(&self, id: &ProductId) -> StoreResult<()>;

  /// Backend liveness probe
  async fn health(&self) -> StoreResult<Health>;
}
