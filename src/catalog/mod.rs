//! Client-side catalog state: products, drafts and the controller that
//! reconciles writes with the remote store.

pub mod controller;
pub mod draft;
pub mod types;

pub use controller::{CatalogController, Intent};
pub use draft::{DraftEditor, Field};
pub use types::{Product, ProductId, Provenance};
