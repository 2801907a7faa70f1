//! Canonical catalog state and the write/refresh protocol.
//!
//! Every store call runs as a spawned task whose completion comes back over a
//! channel. [`CatalogController::poll`] applies completions on the UI thread
//! in arrival order, so list, error, provenance and edit target are only
//! mutated here.
//!
//! The list is never patched locally. Each successful write is followed by
//! a full refetch and the list is replaced with whatever the server returns.
//! There is no cancellation: a slow fetch that lands after a newer one wins.

use super::draft::Draft;
use super::types::{Listing, Product, ProductId, Provenance};
use crate::store::{RemoteStore, StoreResult};
use chrono::{DateTime, Local};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Requests flowing from the view and the form into the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
  EditRequested(Product),
  /// Already confirmed by the user
  DeleteRequested(ProductId),
  SaveRequested(Draft),
  CancelRequested,
  RefreshRequested,
}

/// Fetch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Fetching,
  Ready,
  Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchSignal {
  Started,
  Succeeded,
  Failed,
}

impl Phase {
  fn next(self, signal: FetchSignal) -> Phase {
    match (self, signal) {
      // Re-entry is allowed from anywhere, including Failed
      (_, FetchSignal::Started) => Phase::Fetching,
      // A late completion may land after the phase already settled
      (_, FetchSignal::Succeeded) => Phase::Ready,
      (_, FetchSignal::Failed) => Phase::Failed,
    }
  }

  /// Ready and Failed are transient
  fn settle(self) -> Phase {
    match self {
      Phase::Ready | Phase::Failed => Phase::Idle,
      other => other,
    }
  }
}

/// Completed store call
#[derive(Debug)]
enum Completion {
  Listed(StoreResult<Listing>),
  Saved(StoreResult<Product>),
  Deleted(ProductId, StoreResult<()>),
}

pub struct CatalogController {
  store: Arc<dyn RemoteStore>,
  tx: mpsc::UnboundedSender<Completion>,
  rx: mpsc::UnboundedReceiver<Completion>,
  #[cfg(test)]
  in_flight: usize,

  phase: Phase,
  products: Vec<Product>,
  provenance: Option<Provenance>,
  error: Option<String>,
  refreshed_at: Option<DateTime<Local>>,

  edit_target: Option<Product>,
  edit_generation: u64,
}

impl CatalogController {
  pub fn new(store: Arc<dyn RemoteStore>) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      store,
      tx,
      rx,
      #[cfg(test)]
      in_flight: 0,
      phase: Phase::Idle,
      products: Vec::new(),
      provenance: None,
      error: None,
      refreshed_at: None,
      edit_target: None,
      edit_generation: 0,
    }
  }

  /// Route an intent to its operation
  pub fn dispatch(&mut self, intent: Intent) {
    debug!(?intent, "dispatch");
    match intent {
      Intent::EditRequested(product) => self.select_for_edit(product),
      Intent::DeleteRequested(id) => self.delete(id),
      Intent::SaveRequested(draft) => self.save(draft),
      Intent::CancelRequested => self.cancel_edit(),
      Intent::RefreshRequested => self.refresh(),
    }
  }

  /// Refetch the whole list.
  ///
  /// The current list and error stay in place until the fetch completes.
  pub fn refresh(&mut self) {
    self.transition(FetchSignal::Started);
    let store = Arc::clone(&self.store);
    self.spawn(async move { Completion::Listed(store.list().await) });
  }

  pub fn select_for_edit(&mut self, product: Product) {
    self.edit_target = Some(product);
    self.edit_generation += 1;
  }

  pub fn cancel_edit(&mut self) {
    self.edit_target = None;
    self.edit_generation += 1;
  }

  /// Validate the draft, then create (no id) or update (id).
  ///
  /// A draft that does not validate sets the error and sends nothing.
  pub fn save(&mut self, draft: Draft) {
    let body = match draft.validate() {
      Ok(body) => body,
      Err(e) => {
        warn!(error = %e, "draft rejected");
        self.error = Some(format!("Failed to save product: {}", e));
        return;
      }
    };

    let store = Arc::clone(&self.store);
    match draft.id {
      Some(id) => {
        debug!(%id, "dispatching update");
        self.spawn(async move { Completion::Saved(store.update(&id, &body).await) });
      }
      None => {
        debug!(name = %body.name, "dispatching create");
        self.spawn(async move { Completion::Saved(store.create(&body).await) });
      }
    }
  }

  /// Delete a product. Confirmation happens before this is called.
  pub fn delete(&mut self, id: ProductId) {
    debug!(%id, "dispatching delete");
    let store = Arc::clone(&self.store);
    self.spawn(async move {
      let result = store.delete(&id).await;
      Completion::Deleted(id, result)
    });
  }

  /// Apply every completion that has arrived.
  ///
  /// Returns true if anything changed.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;
    while let Ok(completion) = self.rx.try_recv() {
      self.apply(completion);
      changed = true;
    }
    changed
  }

  fn spawn<F>(&mut self, task: F)
  where
    F: Future<Output = Completion> + Send + 'static,
  {
    #[cfg(test)]
    {
      self.in_flight += 1;
    }
    let tx = self.tx.clone();
    tokio::spawn(async move {
      // Receiver lives as long as the controller
      let _ = tx.send(task.await);
    });
  }

  fn transition(&mut self, signal: FetchSignal) {
    let next = self.phase.next(signal);
    let settled = next.settle();
    debug!(from = ?self.phase, to = ?next, settled = ?settled, "phase");
    self.phase = settled;
  }

  fn apply(&mut self, completion: Completion) {
    #[cfg(test)]
    {
      self.in_flight = self.in_flight.saturating_sub(1);
    }
    match completion {
      Completion::Listed(Ok(listing)) => {
        debug!(count = listing.products.len(), provenance = ?listing.provenance, "list loaded");
        self.products = listing.products;
        self.provenance = Some(listing.provenance);
        self.error = None;
        self.refreshed_at = Some(Local::now());
        self.transition(FetchSignal::Succeeded);
      }
      Completion::Listed(Err(e)) => {
        warn!(error = %e, "list failed");
        // Keep the last good list and provenance visible
        self.error = Some(format!("Failed to fetch products: {}", e));
        self.transition(FetchSignal::Failed);
      }
      Completion::Saved(Ok(product)) => {
        info!(id = %product.id, name = %product.name, "product saved");
        self.edit_target = None;
        self.edit_generation += 1;
        self.refresh();
      }
      Completion::Saved(Err(e)) => {
        warn!(error = %e, "save failed");
        self.error = Some(format!("Failed to save product: {}", e));
      }
      Completion::Deleted(id, Ok(())) => {
        info!(%id, "product deleted");
        self.edit_target = None;
        self.edit_generation += 1;
        self.refresh();
      }
      Completion::Deleted(id, Err(e)) => {
        warn!(%id, error = %e, "delete failed");
        self.error = Some(format!("Failed to delete product: {}", e));
      }
    }
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn loading(&self) -> bool {
    self.phase() == Phase::Fetching
  }

  pub fn provenance(&self) -> Option<Provenance> {
    self.provenance
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn refreshed_at(&self) -> Option<DateTime<Local>> {
    self.refreshed_at
  }

  pub fn edit_target(&self) -> Option<&Product> {
    self.edit_target.as_ref()
  }

  /// Bumped whenever the edit session changes; drives draft re-seeding
  pub fn edit_generation(&self) -> u64 {
    self.edit_generation
  }

  /// Wait until every dispatched call, and any refresh it triggers, completed
  #[cfg(test)]
  async fn settle(&mut self) {
    while self.in_flight > 0 {
      match self.rx.recv().await {
        Some(completion) => self.apply(completion),
        None => break,
      }
    }
  }
}

impl std::fmt::Debug for CatalogController {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CatalogController")
      .field("phase", &self.phase)
      .field("products", &self.products.len())
      .field("provenance", &self.provenance)
      .field("error", &self.error)
      .field("edit_generation", &self.edit_generation)
      .finish_non_exhaustive()
  }
}
