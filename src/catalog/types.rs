use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned product identifier.
///
/// The backend emits integer ids, but the client treats them as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for ProductId {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
      Number(i64),
      Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
      RawId::Number(n) => ProductId(n.to_string()),
      RawId::Text(s) => ProductId(s),
    })
  }
}

/// A persisted product, as read back from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub description: String,
  #[serde(
    serialize_with = "rust_decimal::serde::float::serialize",
    deserialize_with = "price_or_zero"
  )]
  pub price: Decimal,
  pub stock: u32,
}

/// The backend renders a zero price as `null`
fn price_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
  D: Deserializer<'de>,
{
  let price = rust_decimal::serde::float_option::deserialize(deserializer)?;
  Ok(price.unwrap_or(Decimal::ZERO))
}

/// Product fields without an id: the body of create and update writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub description: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  pub stock: u32,
}

impl NewProduct {
  /// Attach a server-assigned id
  pub fn with_id(self, id: ProductId) -> Product {
    Product {
      id,
      name: self.name,
      description: self.description,
      price: self.price,
      stock: self.stock,
    }
  }
}

/// Where the most recent list read was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
  #[serde(rename = "cache")]
  Cache,
  #[serde(rename = "db", alias = "database")]
  Primary,
}

impl Provenance {
  pub fn label(self) -> &'static str {
    match self {
      Provenance::Cache => "CACHE",
      Provenance::Primary => "PRIMARY",
    }
  }
}

/// Result of a full list read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
  pub products: Vec<Product>,
  pub provenance: Provenance,
}
