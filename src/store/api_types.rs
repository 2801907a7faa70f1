//! Wire types for the catalog REST API.

use crate::catalog::types::{NewProduct, Product, ProductId, Provenance};
use serde::Deserialize;
use serde_json::Value;

/// `GET /products`
#[derive(Debug, Deserialize)]
pub struct ApiListResponse {
  pub products: Vec<Product>,
  pub source: Provenance,
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
  pub status: String,
  #[serde(default)]
  pub service: Option<String>,
}

/// Reply to a create or update.
///
/// The backend answers creates with `{message, product_id}` and updates with
/// `{message}`; other deployments return the product itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiWriteReply {
  Product(Product),
  Wrapped { product: Product },
  Created { product_id: ProductId },
  Other(Value),
}

impl ApiWriteReply {
  /// Resolve the reply into the stored product.
  ///
  /// `id` is the id already known to the caller (updates); `sent` is the
  /// body that was written.
  pub fn into_product(self, id: Option<&ProductId>, sent: &NewProduct) -> Option<Product> {
    match self {
      ApiWriteReply::Product(product) | ApiWriteReply::Wrapped { product } => Some(product),
      ApiWriteReply::Created { product_id } => Some(sent.clone().with_id(product_id)),
      ApiWriteReply::Other(_) => id.map(|id| sent.clone().with_id(id.clone())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal::Decimal;

  fn body() -> NewProduct {
    NewProduct {
      name: "A".to_string(),
      description: "B".to_string(),
      price: Decimal::new(100, 2),
      stock: 2,
    }
  }

  #[test]
  fn test_list_response_from_backend() {
    let json = r#"{"products": [{"id": 1, "name": "A", "description": "B", "price": 1.5, "stock": 0}], "source": "database"}"#;
    let response: ApiListResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.products.len(), 1);
    assert_eq!(response.source, Provenance::Primary);
  }

  #[test]
  fn test_list_with_zero_price_product() {
    let json = r#"{"products": [{"id": 1, "name": "Sticker", "description": "Free", "price": null, "stock": 1}, {"id": 2, "name": "Lamp", "description": "Desk", "price": 1.5, "stock": 4}], "source": "database"}"#;
    let response: ApiListResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.products.len(), 2);
    assert_eq!(response.products[0].price, Decimal::ZERO);
    assert_eq!(response.products[1].price, Decimal::new(15, 1));
  }

  #[test]
  fn test_product_reply_with_null_price() {
    let reply: ApiWriteReply = serde_json::from_str(
      r#"{"id": 5, "name": "Sticker", "description": "Free", "price": null, "stock": 1}"#,
    )
    .unwrap();
    assert!(matches!(reply, ApiWriteReply::Product(_)));
    let product = reply.into_product(None, &body()).unwrap();
    assert_eq!(product.id, ProductId::new("5"));
    assert_eq!(product.price, Decimal::ZERO);
  }

  #[test]
  fn test_created_reply_assembles_product() {
    let reply: ApiWriteReply =
      serde_json::from_str(r#"{"message": "Product created successfully", "product_id": 12}"#)
        .unwrap();
    let product = reply.into_product(None, &body()).unwrap();
    assert_eq!(product.id, ProductId::new("12"));
    assert_eq!(product.name, "A");
  }

  #[test]
  fn test_message_reply_uses_known_id() {
    let reply: ApiWriteReply =
      serde_json::from_str(r#"{"message": "Product updated successfully"}"#).unwrap();
    let id = ProductId::new("4");
    assert_eq!(
      reply.into_product(Some(&id), &body()).map(|p| p.id),
      Some(id.clone())
    );

    let reply: ApiWriteReply = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
    assert!(reply.into_product(None, &body()).is_none());
  }

  #[test]
  fn test_full_product_reply() {
    let reply: ApiWriteReply = serde_json::from_str(
      r#"{"product": {"id": "9", "name": "Z", "description": "Y", "price": 2, "stock": 1}}"#,
    )
    .unwrap();
    let product = reply.into_product(None, &body()).unwrap();
    assert_eq!(product.name, "Z");
    assert_eq!(product.price, Decimal::from(2));
  }
}
