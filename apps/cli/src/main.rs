//! # Storefront CLI
//!
//! Terminal front end for the storefront catalog and cart.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        storefront catalog                               │
//! │                                                                         │
//! │  1. Initialize Logging (RUST_LOG, stderr)                               │
//! │  2. Load CatalogConfig (file → env → flags)                             │
//! │  3. Start one load cycle                                                │
//! │  4. Print "Loading..." then the error text or the product grid          │
//! │  5. Exit 0 on Ready, 1 otherwise                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;
mod cart;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use storefront_catalog::{CatalogConfig, CatalogLoader, HttpCatalogSource};
use storefront_core::catalog::add_to_cart_ack;
use storefront_core::{Cart, CartView, LoadState};

use crate::args::{CartArgs, CatalogArgs, Command, USAGE};
use crate::cart::CartPresses;
use crate::render::{render_ack, render_cart, render_state, rows_for};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    match args::parse_env()? {
        Command::Catalog(args) => run_catalog(args).await,
        Command::Cart(args) => run_cart(args),
        Command::Help => {
            println!("{}", USAGE);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_catalog(args: CatalogArgs) -> anyhow::Result<ExitCode> {
    let mut config = match args.config.clone() {
        Some(path) => CatalogConfig::load(Some(path)).context("Failed to load catalog config")?,
        None => CatalogConfig::load_or_default(None),
    };
    args.apply_to(&mut config);
    config.validate()?;

    info!(
        url = %config.endpoint_url(),
        flavor = %config.flavor(),
        retries = config.loader.max_retries,
        cap = config.loader.cap,
        "Configuration loaded"
    );

    let source = HttpCatalogSource::from_settings(&config.source)?;
    let loader = CatalogLoader::new(Arc::new(source), config.loader.clone());
    let handle = loader.start();

    println!("{}", render_state(&handle.state()));

    let state = tokio::select! {
        state = handle.wait() => state,
        _ = interrupted() => {
            handle.cancel();
            handle.state()
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", render_state(&state).trim_end());
    }

    let LoadState::Ready(catalog) = &state else {
        return Ok(ExitCode::FAILURE);
    };

    info!(
        products = catalog.len(),
        rows = rows_for(catalog.len()),
        "Catalog ready"
    );

    if let Some(id) = args.add {
        match catalog.find(id) {
            Some(product) => println!("\n{}", render_ack(&add_to_cart_ack(&product.title))),
            None => warn!(product_id = id, "No product with that id in the catalog"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_cart(args: CartArgs) -> anyhow::Result<ExitCode> {
    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let cart: Cart = serde_json::from_str(&contents)
        .context("Cart file must be a JSON array of {id, title, price} items")?;

    let mut presses = CartPresses::default();
    {
        let mut view = CartView::new(&cart, &mut presses);
        for &id in &args.remove {
            view.press_remove(id);
        }
        if args.pay {
            view.press_pay();
        }
    }

    let cart = presses.apply(cart);
    print!("{}", render_cart(&cart)?);

    if presses.paid() {
        let total = cart.total()?;
        info!(%total, "Payment requested");
        println!("Payment requested.");
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolves on Ctrl+C.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(?e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Interrupted");
}
