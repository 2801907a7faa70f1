use super::api_types::{ApiListResponse, ApiWriteReply, Health};
use super::{RemoteStore, StoreError, StoreResult};
use crate::catalog::types::{Listing, NewProduct, Product, ProductId};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

/// Catalog REST API client
#[derive(Debug, Clone)]
pub struct HttpStore {
  client: reqwest::Client,
  base_url: String,
}

impl HttpStore {
  /// Create a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
  pub fn new(base_url: &Url) -> StoreResult<Self> {
    let client = reqwest::Client::builder()
      .build()
      .map_err(|e| StoreError::Transport(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: base_url.as_str().trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn products_url(&self) -> String {
    format!("{}/products", self.base_url)
  }

  fn product_url(&self, id: &ProductId) -> String {
    format!("{}/products/{}", self.base_url, id)
  }

  /// Map non-success statuses; 404 becomes `NotFound` when an id is known.
  fn check_status(response: Response, id: Option<&ProductId>) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }
    match (status, id) {
      (StatusCode::NOT_FOUND, Some(id)) => Err(StoreError::NotFound(id.clone())),
      _ => Err(StoreError::Transport(format!(
        "{} returned {}",
        response.url().path(),
        status
      ))),
    }
  }

  async fn write_reply(
    response: Response,
    id: Option<&ProductId>,
    sent: &NewProduct,
  ) -> StoreResult<Product> {
    // An empty success body (204, bare 201) carries nothing to decode
    let text = response.text().await?;
    let reply = if text.trim().is_empty() {
      ApiWriteReply::Other(serde_json::Value::Null)
    } else {
      serde_json::from_str(&text)
        .map_err(|e| StoreError::Transport(format!("Unreadable write reply: {}", e)))?
    };
    reply
      .into_product(id, sent)
      .ok_or_else(|| StoreError::Transport("Write reply did not identify the product".to_string()))
  }
}

#[async_trait]
impl RemoteStore for HttpStore {
  async fn list(&self) -> StoreResult<Listing> {
    debug!(url = %self.products_url(), "GET products");
    let response = self.client.get(self.products_url()).send().await?;
    let body: ApiListResponse = Self::check_status(response, None)?.json().await?;

    Ok(Listing {
      products: body.products,
      provenance: body.source,
    })
  }

  async fn create(&self, product: &NewProduct) -> StoreResult<Product> {
    debug!(name = %product.name, "POST product");
    let response = self
      .client
      .post(self.products_url())
      .json(product)
      .send()
      .await?;
    let response = Self::check_status(response, None)?;
    Self::write_reply(response, None, product).await
  }

  async fn update(&self, id: &ProductId, product: &NewProduct) -> StoreResult<Product> {
    debug!(%id, "PUT product");
    let full = product.clone().with_id(id.clone());
    let response = self
      .client
      .put(self.product_url(id))
      .json(&full)
      .send()
      .await?;
    let response = Self::check_status(response, Some(id))?;
    Self::write_reply(response, Some(id), product).await
  }

  async fn delete(&self, id: &ProductId) -> StoreResult<()> {
    debug!(%id, "DELETE product");
    let response = self.client.delete(self.product_url(id)).send().await?;
    Self::check_status(response, Some(id))?;
    Ok(())
  }

  async fn health(&self) -> StoreResult<Health> {
    let response = self
      .client
      .get(format!("{}/health", self.base_url))
      .send()
      .await?;
    Ok(Self::check_status(response, None)?.json().await?)
  }
}
