//! In-memory store for controller tests.

use super::{Health, RemoteStore, StoreError, StoreResult};
use crate::catalog::types::{Listing, NewProduct, Product, ProductId, Provenance};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// A call observed by the fake store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  List,
  Create(NewProduct),
  Update(ProductId, NewProduct),
  Delete(ProductId),
}

#[derive(Debug)]
pub struct FakeStore {
  products: Mutex<Vec<Product>>,
  provenance: Mutex<Provenance>,
  calls: Mutex<Vec<Call>>,
  next_id: AtomicU64,
  fail_list: AtomicBool,
  fail_writes: AtomicBool,
}

impl FakeStore {
  pub fn new(products: Vec<Product>, provenance: Provenance) -> Self {
    Self {
      products: Mutex::new(products),
      provenance: Mutex::new(provenance),
      calls: Mutex::new(Vec::new()),
      next_id: AtomicU64::new(100),
      fail_list: AtomicBool::new(false),
      fail_writes: AtomicBool::new(false),
    }
  }

  pub fn set_fail_list(&self, fail: bool) {
    self.fail_list.store(fail, Ordering::SeqCst);
  }

  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  pub fn set_provenance(&self, provenance: Provenance) {
    *self.provenance.lock().unwrap() = provenance;
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().unwrap().clone()
  }

  pub fn list_calls(&self) -> usize {
    self
      .calls()
      .iter()
      .filter(|c| matches!(c, Call::List))
      .count()
  }

  fn record(&self, call: Call) {
    self.calls.lock().unwrap().push(call);
  }

  fn check_writes(&self) -> StoreResult<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StoreError::Transport("connection refused".to_string()));
    }
    Ok(())
  }
}

#[async_trait]
impl RemoteStore for FakeStore {
  async fn list(&self) -> StoreResult<Listing> {
    self.record(Call::List);
    if self.fail_list.load(Ordering::SeqCst) {
      return Err(StoreError::Transport("/products returned 503".to_string()));
    }
    Ok(Listing {
      products: self.products.lock().unwrap().clone(),
      provenance: *self.provenance.lock().unwrap(),
    })
  }

  async fn create(&self, product: &NewProduct) -> StoreResult<Product> {
    self.record(Call::Create(product.clone()));
    self.check_writes()?;
    let id = ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
    let created = product.clone().with_id(id);
    self.products.lock().unwrap().push(created.clone());
    Ok(created)
  }

  async fn update(&self, id: &ProductId, product: &NewProduct) -> StoreResult<Product> {
    self.record(Call::Update(id.clone(), product.clone()));
    self.check_writes()?;
    let mut products = self.products.lock().unwrap();
    let slot = products
      .iter_mut()
      .find(|p| &p.id == id)
      .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    *slot = product.clone().with_id(id.clone());
    Ok(slot.clone())
  }

  async fn delete(&self, id: &ProductId) -> StoreResult<()> {
    self.record(Call::Delete(id.clone()));
    self.check_writes()?;
    let mut products = self.products.lock().unwrap();
    let before = products.len();
    products.retain(|p| &p.id != id);
    if products.len() == before {
      return Err(StoreError::NotFound(id.clone()));
    }
    Ok(())
  }

  async fn health(&self) -> StoreResult<Health> {
    Ok(Health {
      status: "healthy".to_string(),
      service: Some("fake".to_string()),
    })
  }
}
