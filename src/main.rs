mod app;
mod catalog;
mod config;
mod event;
mod logging;
mod store;
mod ui;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use std::sync::Arc;
use store::{HttpStore, RemoteStore};

#[derive(Parser, Debug)]
#[command(name = "catalog-tui")]
#[command(about = "A terminal client for a product catalog")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./catalog.yaml or $XDG_CONFIG_HOME/catalog-tui/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Catalog API base URL, e.g. http://localhost:5000/api
  #[arg(short, long)]
  api_url: Option<String>,

  /// Check backend health and list provenance, then exit
  #[arg(long)]
  check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration, command line wins over environment over file
  let config = config::Config::load(args.config.as_deref())?
    .with_overrides(args.api_url, std::env::var(config::API_URL_ENV).ok());
  let api_url = config.api_url()?;

  let _log_guard = logging::init(&config.log_file(), config.log.filter.as_deref())?;
  tracing::info!(api_url = %api_url, "starting");

  let store = HttpStore::new(&api_url)?;

  if args.check {
    return check(&store).await;
  }

  let api_url = store.base_url().to_string();
  let mut app = app::App::new(config, api_url, Arc::new(store));
  app.run().await?;

  Ok(())
}

/// Probe health and the list endpoint concurrently
async fn check(store: &HttpStore) -> Result<()> {
  let (health, listing) = futures::future::try_join(store.health(), store.list())
    .await
    .map_err(|e| eyre!("Backend check against {} failed: {}", store.base_url(), e))?;

  println!(
    "{}: {} ({})",
    store.base_url(),
    health.status,
    health.service.as_deref().unwrap_or("unknown service")
  );
  println!(
    "products: {} (source: {})",
    listing.products.len(),
    listing.provenance.label()
  );
  Ok(())
}
