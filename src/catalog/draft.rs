//! In-progress product edits.
//!
//! A [`Draft`] holds every field as raw text so partially typed input
//! survives until submit. [`DraftEditor`] owns the one draft on screen and
//! turns submit/reset into intents for the controller.
//!
//! The editor only checks what the form's input constraints would: required
//! fields are present, and numeric fields never go below zero (the form only
//! accepts digits there). Whether `price`/`stock` actually parse is decided by
//! [`Draft::validate`], which the controller runs before any write.

use super::controller::Intent;
use super::types::{NewProduct, Product, ProductId};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Editable product fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Description,
  Price,
  Stock,
}

impl Field {
  pub const ALL: [Field; 4] = [Field::Name, Field::Description, Field::Price, Field::Stock];

  pub fn label(self) -> &'static str {
    match self {
      Field::Name => "Product Name",
      Field::Description => "Description",
      Field::Price => "Price ($)",
      Field::Stock => "Stock",
    }
  }

  pub fn next(self) -> Self {
    match self {
      Field::Name => Field::Description,
      Field::Description => Field::Price,
      Field::Price => Field::Stock,
      Field::Stock => Field::Name,
    }
  }

  pub fn prev(self) -> Self {
    match self {
      Field::Name => Field::Stock,
      Field::Description => Field::Name,
      Field::Price => Field::Description,
      Field::Stock => Field::Price,
    }
  }

  /// Input constraint for a single typed character
  pub fn accepts(self, c: char) -> bool {
    match self {
      Field::Name | Field::Description => !c.is_control(),
      Field::Price => c.is_ascii_digit() || c == '.',
      Field::Stock => c.is_ascii_digit(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
  #[error("{} is required", .0.label())]
  Missing(Field),
  #[error("{} must not be negative", .0.label())]
  Negative(Field),
  #[error("price '{0}' is not a valid amount")]
  InvalidPrice(String),
  #[error("stock '{0}' is not a whole number")]
  InvalidStock(String),
}

/// A product being created (no id) or edited (id present)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
  pub id: Option<ProductId>,
  pub name: String,
  pub description: String,
  pub price: String,
  pub stock: String,
}

impl Draft {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn from_product(product: &Product) -> Self {
    Self {
      id: Some(product.id.clone()),
      name: product.name.clone(),
      description: product.description.clone(),
      price: product.price.to_string(),
      stock: product.stock.to_string(),
    }
  }

  pub fn get(&self, field: Field) -> &str {
    match field {
      Field::Name => &self.name,
      Field::Description => &self.description,
      Field::Price => &self.price,
      Field::Stock => &self.stock,
    }
  }

  /// Replace exactly one field
  pub fn set(&mut self, field: Field, value: String) {
    match field {
      Field::Name => self.name = value,
      Field::Description => self.description = value,
      Field::Price => self.price = value,
      Field::Stock => self.stock = value,
    }
  }

  /// First required field left blank, if any
  pub fn missing_field(&self) -> Option<Field> {
    Field::ALL
      .into_iter()
      .find(|f| self.get(*f).trim().is_empty())
  }

  /// Parse and coerce every field into a write body.
  pub fn validate(&self) -> Result<NewProduct, DraftError> {
    if let Some(field) = self.missing_field() {
      return Err(DraftError::Missing(field));
    }

    let price_text = self.price.trim();
    let price = Decimal::from_str(price_text)
      .map_err(|_| DraftError::InvalidPrice(price_text.to_string()))?;
    if price.is_sign_negative() && !price.is_zero() {
      return Err(DraftError::Negative(Field::Price));
    }

    let stock_text = self.stock.trim();
    let stock = match stock_text.parse::<u32>() {
      Ok(n) => n,
      Err(_) if stock_text.starts_with('-') => return Err(DraftError::Negative(Field::Stock)),
      Err(_) => return Err(DraftError::InvalidStock(stock_text.to_string())),
    };

    Ok(NewProduct {
      name: self.name.trim().to_string(),
      description: self.description.trim().to_string(),
      price,
      stock,
    })
  }
}

/// Owns the draft shown in the form.
///
/// The editor tracks which edit session it was seeded from. Whenever the
/// controller's edit generation moves, the whole draft is rebuilt from the
/// new edit target (or emptied when there is none).
#[derive(Debug, Default)]
pub struct DraftEditor {
  draft: Draft,
  target: Option<ProductId>,
  generation: u64,
}

impl DraftEditor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn draft(&self) -> &Draft {
    &self.draft
  }

  /// Whether an existing product is being edited
  pub fn is_editing(&self) -> bool {
    self.target.is_some()
  }

  /// Re-seed from the controller's edit target when its generation changed.
  ///
  /// Returns true if the draft was rebuilt.
  pub fn sync(&mut self, target: Option<&Product>, generation: u64) -> bool {
    if generation == self.generation {
      return false;
    }
    self.generation = generation;
    self.target = target.map(|p| p.id.clone());
    self.draft = match target {
      Some(product) => Draft::from_product(product),
      None => Draft::empty(),
    };
    true
  }

  /// Field-level change: shallow merge of one value
  pub fn set_field(&mut self, field: Field, value: String) {
    self.draft.set(field, value);
  }

  /// Hand a copy of the draft to the controller.
  ///
  /// Refused with the first blank field when a required value is missing.
  pub fn submit(&self) -> Result<Intent, DraftError> {
    if let Some(field) = self.draft.missing_field() {
      return Err(DraftError::Missing(field));
    }
    Ok(Intent::SaveRequested(self.draft.clone()))
  }

  /// Cancel while editing, clear while creating.
  ///
  /// Only the edit case notifies the controller.
  pub fn reset(&mut self) -> Option<Intent> {
    self.draft = Draft::empty();
    if self.target.take().is_some() {
      Some(Intent::CancelRequested)
    } else {
      None
    }
  }
}
