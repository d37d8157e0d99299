//! Store feed pump and admission submission

use super::cache::LiveCacheHandle;
use crate::adapters::store::{AdmissionStore, FeedEvent, FeedSubscription};
use crate::core::validate::validate;
use crate::domain::{AdmissionPayload, LiveAdmission, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Keeps a [`LiveCacheHandle`] in step with an [`AdmissionStore`]
///
/// Dropping the feed stops the pump; [`LiveFeed::shutdown`] does the same
/// and waits for it to finish.
#[derive(Debug)]
pub struct LiveFeed {
    shutdown_tx: watch::Sender<bool>,
    pump: Option<JoinHandle<()>>,
}

impl LiveFeed {
    /// Subscribes to the store, loads the full collection, then forwards
    /// notifications to `cache` in arrival order
    ///
    /// The subscription is opened before the fetch, so nothing created in
    /// between is lost; the cache buffers it until the fetch lands. On
    /// return the cache has applied the fetch and published a loaded
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Fails if the subscription or the initial fetch fails. No pump is left
    /// running in that case.
    pub async fn attach(store: Arc<dyn AdmissionStore>, cache: LiveCacheHandle) -> Result<Self> {
        let subscription = store.subscribe().await?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let pump = tokio::spawn(pump(
            Arc::clone(&store),
            cache.clone(),
            subscription,
            shutdown_rx,
        ));
        let feed = Self {
            shutdown_tx,
            pump: Some(pump),
        };

        let started = Instant::now();
        let admissions = store.fetch_all().await?;
        crate::log_load_complete!(store.name(), admissions.len(), started.elapsed());
        cache.load(admissions).await?;
        // Round-trip through the actor so the load is applied, not just queued
        cache.snapshot().await?;

        Ok(feed)
    }

    /// Stops the pump and waits for it to exit
    ///
    /// No notification is applied after this returns.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(pump) = self.pump.take() {
            let _ = pump.await;
        }
    }

    /// Whether the pump is still forwarding notifications
    pub fn is_running(&self) -> bool {
        self.pump.as_ref().is_some_and(|p| !p.is_finished())
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
    }
}

async fn pump(
    store: Arc<dyn AdmissionStore>,
    cache: LiveCacheHandle,
    mut subscription: FeedSubscription,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let event = tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            event = subscription.next() => event,
        };

        let applied = match event {
            Some(FeedEvent::Insert(admission)) => cache.insert(admission).await,
            Some(FeedEvent::Delete(id)) => cache.delete(id).await,
            Some(FeedEvent::Disconnected { reason }) => {
                tracing::warn!(store = store.name(), %reason, "Feed disconnected");
                cache.mark_stale().await
            }
            Some(FeedEvent::Resynced) => resync(store.as_ref(), &cache).await,
            None => {
                tracing::warn!(store = store.name(), "Feed ended");
                let _ = cache.mark_stale().await;
                break;
            }
        };

        if let Err(e) = applied {
            crate::log_error_with_context!(&e, "Feed pump stopped");
            break;
        }
    }
    tracing::debug!(store = store.name(), "Feed pump exited");
}

async fn resync(store: &dyn AdmissionStore, cache: &LiveCacheHandle) -> Result<()> {
    match store.fetch_all().await {
        Ok(admissions) => {
            tracing::info!(
                store = store.name(),
                count = admissions.len(),
                "Feed resynced"
            );
            cache.load(admissions).await?;
            cache.mark_current().await
        }
        Err(e) => {
            tracing::warn!(store = store.name(), error = %e, "Resync fetch failed");
            Ok(())
        }
    }
}

/// Validates and stores a new admission
///
/// When the store does not echo inserts through its feed, the confirmed
/// record is appended to `cache` directly; otherwise the feed delivers it.
///
/// # Errors
///
/// Returns a validation error before any write, or the store's error if the
/// insert is rejected. The cache is untouched in both cases.
pub async fn submit_admission(
    store: &dyn AdmissionStore,
    cache: &LiveCacheHandle,
    payload: &AdmissionPayload,
) -> Result<LiveAdmission> {
    let normalized = validate(payload)?;

    let confirmed = store.insert(&normalized).await.map_err(|e| {
        tracing::warn!(store = store.name(), error = %e, "Insert rejected");
        e
    })?;

    if !store.echoes_inserts() {
        cache.insert(confirmed.clone()).await?;
    }

    tracing::info!(
        id = %confirmed.id,
        department = confirmed.department.label(),
        "Admission recorded"
    );
    Ok(confirmed)
}
