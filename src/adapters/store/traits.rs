//! Admission store abstraction
//!
//! This module defines the trait that live admission stores implement, and
//! the change-feed types they hand out.

use crate::domain::{AdmissionId, LiveAdmission, NormalizedAdmission, StoreError};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A change notification from the store's feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A record was created
    Insert(LiveAdmission),

    /// A record was removed
    Delete(AdmissionId),

    /// The feed lost contact with the store; notifications may be missing
    Disconnected { reason: String },

    /// Contact is back; the consumer should re-read the full collection
    Resynced,
}

/// Receiving end of a store feed
///
/// Any background task feeding the subscription is aborted when it drops.
#[derive(Debug)]
pub struct FeedSubscription {
    events: mpsc::Receiver<FeedEvent>,
    worker: Option<JoinHandle<()>>,
}

impl FeedSubscription {
    /// Channel capacity used by the bundled stores
    pub const CAPACITY: usize = 256;

    pub fn new(events: mpsc::Receiver<FeedEvent>, worker: Option<JoinHandle<()>>) -> Self {
        Self { events, worker }
    }

    /// Next notification, `None` once the feed has ended
    pub async fn next(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

/// Live admission store
///
/// Implementations must be cheap to share behind an `Arc`.
#[async_trait]
pub trait AdmissionStore: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Every admission, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn fetch_all(&self) -> Result<Vec<LiveAdmission>, StoreError>;

    /// Persists a validated admission and returns the stored record
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] if the store refuses the write.
    async fn insert(&self, admission: &NormalizedAdmission) -> Result<LiveAdmission, StoreError>;

    /// Removes an admission; removing an unknown id is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn delete(&self, id: &AdmissionId) -> Result<(), StoreError>;

    /// Opens a change feed
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SubscriptionFailed`] if the feed cannot be opened.
    async fn subscribe(&self) -> Result<FeedSubscription, StoreError>;

    /// Whether confirmed inserts are delivered back through the feed
    fn echoes_inserts(&self) -> bool;
}
