//! Fetch-and-merge: two independent catalog requests feeding one view.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::catalog::{CatalogClient, Endpoints};
use crate::models::ViewState;
use crate::utils::TimeDisplay;

struct Slot {
    generation: u64,
    view: ViewState,
}

/// Shared view state.
///
/// Every `reset` starts a new generation; updates carrying an older
/// generation belong to a discarded view and are dropped.
#[derive(Clone)]
pub struct ViewHandle {
    inner: Arc<RwLock<Slot>>,
}

impl Default for ViewHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Slot {
                generation: 0,
                view: ViewState::default(),
            })),
        }
    }

    /// Replace the view with a fresh one and return its generation.
    pub async fn reset(&self) -> u64 {
        let mut slot = self.inner.write().await;
        slot.generation += 1;
        slot.view = ViewState::default();
        slot.generation
    }

    /// Read-modify-write against the latest view.
    ///
    /// Returns false if `generation` is stale and nothing was applied.
    pub async fn update<F>(&self, generation: u64, f: F) -> bool
    where
        F: FnOnce(&mut ViewState),
    {
        let mut slot = self.inner.write().await;
        if slot.generation != generation {
            return false;
        }
        f(&mut slot.view);
        true
    }

    pub async fn snapshot(&self) -> ViewState {
        self.inner.read().await.view.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }
}

/// Issues both catalog requests and merges each result as it settles.
///
/// No retry, no backoff, no cancellation.
pub struct FetchSession {
    client: CatalogClient,
    endpoints: Endpoints,
    time: TimeDisplay,
}

impl FetchSession {
    pub fn new(client: CatalogClient, endpoints: Endpoints, time: TimeDisplay) -> Self {
        Self {
            client,
            endpoints,
            time,
        }
    }

    /// Reset `view` and run both requests concurrently until both settle.
    pub async fn run(&self, view: &ViewHandle) {
        let generation = view.reset().await;
        tracing::info!(generation, "Starting catalog fetch");

        tokio::join!(
            self.load_metadata(view, generation),
            self.load_earthquakes(view, generation)
        );
    }

    /// Run in the background. The view resets before this returns, so a
    /// caller rendering right after sees the fresh loading state.
    pub async fn spawn(self: Arc<Self>, view: ViewHandle) -> JoinHandle<()> {
        let generation = view.reset().await;
        tracing::info!(generation, "Starting background catalog fetch");

        tokio::spawn(async move {
            tokio::join!(
                self.load_metadata(&view, generation),
                self.load_earthquakes(&view, generation)
            );
        })
    }

    async fn load_metadata(&self, view: &ViewHandle, generation: u64) {
        let applied = match self.client.application_metadata(&self.endpoints).await {
            Ok(meta) => {
                tracing::info!(
                    catalogs = meta.catalogs.len(),
                    contributors = meta.contributors.len(),
                    producttypes = meta.producttypes.len(),
                    eventtypes = meta.eventtypes.len(),
                    magnitudetypes = meta.magnitudetypes.len(),
                    "Loaded application metadata"
                );
                view.update(generation, |v| v.apply_metadata(meta)).await
            }
            Err(e) => {
                tracing::warn!("Application metadata request failed: {}", e);
                view.update(generation, ViewState::fail_metadata).await
            }
        };
        if !applied {
            tracing::debug!(generation, "Discarding metadata for a replaced view");
        }
    }

    async fn load_earthquakes(&self, view: &ViewHandle, generation: u64) {
        let applied = match self.client.earthquakes(&self.endpoints).await {
            Ok(collection) => {
                let records = collection.into_records(&self.time);
                tracing::info!(count = records.len(), "Loaded earthquake events");
                view.update(generation, |v| v.apply_earthquakes(records))
                    .await
            }
            Err(e) => {
                tracing::warn!("Earthquake query failed: {}", e);
                view.update(generation, ViewState::fail_earthquakes).await
            }
        };
        if !applied {
            tracing::debug!(generation, "Discarding earthquakes for a replaced view");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reset_starts_new_generation() {
        let view = ViewHandle::new();
        assert_eq!(view.generation().await, 0);
        let first = view.reset().await;
        let second = view.reset().await;
        assert_eq!(first + 1, second);
    }

    #[tokio::test]
    async fn test_stale_update_dropped() {
        let view = ViewHandle::new();
        let stale = view.reset().await;
        view.update(stale, ViewState::fail_earthquakes).await;
        assert!(!view.snapshot().await.loading);

        let current = view.reset().await;
        assert!(!view.update(stale, ViewState::fail_metadata).await);
        let snapshot = view.snapshot().await;
        assert!(snapshot.loading);
        assert!(snapshot.error.is_none());

        assert!(view.update(current, ViewState::fail_metadata).await);
        assert!(view.snapshot().await.error.is_some());
    }
}
