//! # Catalog Loader
//!
//! Runs load cycles: fetch the catalog, retry on failure with a fixed delay,
//! and publish the resulting [`LoadState`].
//!
//! ## Load Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          One Load Cycle                                 │
//! │                                                                         │
//! │   load(budget)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   ┌────────┐  Ok(valid records)              ┌──────────────────┐       │
//! │   │ fetch  │ ─────► dedupe ─────► cap ─────► │ Ready(catalog)   │       │
//! │   └────────┘                                 └──────────────────┘       │
//! │       │  (invalid records already dropped by the wire adapter)          │
//! │       │ Err                                                             │
//! │       ▼                                                                 │
//! │   budget > 0 ? ──yes──► sleep(retry_delay) ──► budget -= 1 ──► fetch    │
//! │       │                 (state stays Loading)                           │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │   ┌──────────────────────────────────────────────────────────┐          │
//! │   │ Error("Unable to load products. Please try again later.")│          │
//! │   └──────────────────────────────────────────────────────────┘          │
//! │                                                                         │
//! │   A budget of N allows up to N + 1 requests.                            │
//! │   The CancelToken is checked before every state transition and         │
//! │   races every request and every retry delay.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records with a negative or non-finite price, or an empty title, are
//! rejected while the body is decoded (see [`crate::wire`]) and never reach
//! this module. Dedupe and the cap run on what is left, so a Ready catalog
//! holds `min(valid unique records, cap)` products.
//!
//! Each cycle is its own tokio task with its own `watch` channel, so two
//! cycles never share state.

use chrono::Utc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use storefront_core::validation::enforce_catalog_rules;
use storefront_core::{Catalog, LoadState, Product, ValidationError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cancel::CancelToken;
use crate::config::LoaderSettings;
use crate::error::FetchResult;
use crate::source::CatalogSource;

// =============================================================================
// Load Handle
// =============================================================================

/// Handle for observing and cancelling one load cycle.
///
/// Dropping the handle cancels the cycle.
pub struct LoadHandle {
    /// Cycle id used in logs.
    id: Uuid,
    /// Latest published state.
    state_rx: watch::Receiver<LoadState>,
    /// Cancels the cycle.
    cancel: CancelToken,
    /// Requests issued so far.
    attempts: Arc<AtomicU32>,
    /// The cycle task.
    task: JoinHandle<()>,
}

impl LoadHandle {
    /// Returns the cycle id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> LoadState {
        self.state_rx.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_rx.clone()
    }

    /// Waits until the cycle reaches `Ready` or `Error`.
    ///
    /// If the cycle is cancelled first, returns the last published state.
    pub async fn wait(&self) -> LoadState {
        let mut rx = self.state_rx.clone();
        loop {
            if rx.borrow_and_update().is_terminal() {
                break;
            }

            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = self.cancel.cancelled() => break,
            }
        }

        let state = rx.borrow().clone();
        state
    }

    /// Cancels the cycle. No further request or state update follows.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            info!(cycle = %self.id, "Cancelling catalog load cycle");
        }
        self.cancel.cancel();
    }

    /// Returns the token that cancels this cycle.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the number of requests issued so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Returns true once the cycle task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for LoadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadHandle")
            .field("id", &self.id)
            .field("state", &self.state_rx.borrow().name())
            .field("attempts", &self.attempts())
            .finish()
    }
}

// =============================================================================
// Catalog Loader
// =============================================================================

/// Starts load cycles against a catalog source.
///
/// ## Usage
/// ```rust,ignore
/// let source = HttpCatalogSource::from_settings(&config.source)?;
/// let loader = CatalogLoader::new(Arc::new(source), config.loader.clone());
///
/// let handle = loader.start();
/// match handle.wait().await {
///     LoadState::Ready(catalog) => println!("{} products", catalog.len()),
///     other => println!("{}", other.status_text().unwrap_or_default()),
/// }
/// ```
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    settings: LoaderSettings,
}

impl CatalogLoader {
    /// Creates a loader.
    pub fn new(source: Arc<dyn CatalogSource>, settings: LoaderSettings) -> Self {
        CatalogLoader { source, settings }
    }

    /// Returns the loader settings.
    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Starts a cycle with the configured retry budget.
    pub fn start(&self) -> LoadHandle {
        self.load(self.settings.max_retries)
    }

    /// Starts a cycle allowing `remaining_attempts` retries after the first
    /// request.
    ///
    /// Returns immediately. Must be called inside a tokio runtime.
    pub fn load(&self, remaining_attempts: u32) -> LoadHandle {
        let id = Uuid::new_v4();
        let cancel = CancelToken::new();
        let attempts = Arc::new(AtomicU32::new(0));
        let (state_tx, state_rx) = watch::channel(LoadState::Loading);

        let cycle = LoadCycle {
            id,
            source: self.source.clone(),
            cap: self.settings.cap,
            retry_delay: self.settings.retry_delay(),
            budget: remaining_attempts,
            remaining: remaining_attempts,
            state_tx,
            cancel: cancel.clone(),
            attempts: attempts.clone(),
        };

        let task = tokio::spawn(cycle.run());

        LoadHandle {
            id,
            state_rx,
            cancel,
            attempts,
            task,
        }
    }
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("source", &self.source.describe())
            .field("settings", &self.settings)
            .finish()
    }
}

// =============================================================================
// Load Cycle Task
// =============================================================================

struct LoadCycle {
    id: Uuid,
    source: Arc<dyn CatalogSource>,
    cap: usize,
    retry_delay: Duration,
    budget: u32,
    remaining: u32,
    state_tx: watch::Sender<LoadState>,
    cancel: CancelToken,
    attempts: Arc<AtomicU32>,
}

impl LoadCycle {
    /// 1-based number of the retry about to be scheduled.
    fn next_retry(&self) -> u32 {
        self.budget - self.remaining + 1
    }

    async fn run(mut self) {
        info!(
            cycle = %self.id,
            source = %self.source.describe(),
            budget = self.remaining,
            "Catalog load cycle started"
        );

        loop {
            if self.cancel.is_cancelled() {
                info!(cycle = %self.id, "Load cycle cancelled before request");
                return;
            }

            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(cycle = %self.id, attempt, "Fetching catalog");

            let result: FetchResult<Vec<Product>> = tokio::select! {
                result = self.source.fetch() => result,
                _ = self.cancel.cancelled() => {
                    info!(cycle = %self.id, attempt, "Load cycle cancelled during request");
                    return;
                }
            };

            let err = match result {
                Ok(products) => {
                    self.finish_ready(products);
                    return;
                }
                Err(err) => err,
            };

            if self.remaining == 0 {
                error!(
                    cycle = %self.id,
                    attempt,
                    kind = err.kind(),
                    error = %err,
                    "Catalog load failed, retries exhausted"
                );
                self.publish(LoadState::load_failed());
                return;
            }

            warn!(
                cycle = %self.id,
                attempt,
                kind = err.kind(),
                error = %err,
                "Catalog fetch failed"
            );

            let retry = self.next_retry();
            info!(
                cycle = %self.id,
                retry,
                budget = self.budget,
                delay = ?self.retry_delay,
                "Retrying... ({})",
                retry
            );

            tokio::select! {
                _ = tokio::time::sleep(self.retry_delay) => {}
                _ = self.cancel.cancelled() => {
                    info!(cycle = %self.id, "Load cycle cancelled during retry delay");
                    return;
                }
            }

            self.remaining -= 1;
        }
    }

    fn finish_ready(&self, products: Vec<Product>) {
        let received = products.len();
        let filter = enforce_catalog_rules(products, self.cap);

        for &id in &filter.duplicate_ids {
            let reason = ValidationError::Duplicate {
                field: "id".to_string(),
                value: id.to_string(),
            };
            warn!(cycle = %self.id, product_id = id, %reason, "Dropping product record");
        }

        debug!(
            cycle = %self.id,
            received,
            kept = filter.kept.len(),
            truncated = filter.truncated,
            "Catalog filtered"
        );

        self.publish(LoadState::Ready(Catalog::new(filter.kept, Utc::now())));
    }

    /// Publishes a state unless the cycle was cancelled.
    fn publish(&self, state: LoadState) {
        if self.cancel.is_cancelled() {
            debug!(cycle = %self.id, state = state.name(), "Dropping state update for cancelled cycle");
            return;
        }

        info!(cycle = %self.id, state = state.name(), "Load state changed");
        self.state_tx.send_replace(state);
    }
}
