//! In-process admission store
//!
//! Keeps admissions in memory and broadcasts every change to subscribers.
//! Used when no REST backend is configured, and in tests.

use super::traits::{AdmissionStore, FeedEvent, FeedSubscription};
use crate::domain::{AdmissionId, LiveAdmission, NormalizedAdmission, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, RwLock};

const BROADCAST_CAPACITY: usize = 1024;

#[derive(Debug)]
pub struct MemoryStore {
    admissions: RwLock<Vec<LiveAdmission>>,
    events: broadcast::Sender<FeedEvent>,
    echo_inserts: bool,
    rejecting: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_admissions(Vec::new())
    }

    /// Store pre-populated with `admissions`, in any order
    pub fn with_admissions(mut admissions: Vec<LiveAdmission>) -> Self {
        admissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let (events, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            admissions: RwLock::new(admissions),
            events,
            echo_inserts: true,
            rejecting: AtomicBool::new(false),
        }
    }

    /// Stops publishing this store's own inserts on the feed
    pub fn without_echo(mut self) -> Self {
        self.echo_inserts = false;
        self
    }

    /// Makes subsequent inserts fail with [`StoreError::Rejected`]
    pub fn reject_inserts(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }

    /// Records a change made by another writer and notifies subscribers
    pub async fn push_external(&self, admission: LiveAdmission) {
        self.admissions.write().await.insert(0, admission.clone());
        self.publish(FeedEvent::Insert(admission));
    }

    /// Tells subscribers the feed dropped
    pub fn disconnect(&self, reason: impl Into<String>) {
        self.publish(FeedEvent::Disconnected {
            reason: reason.into(),
        });
    }

    /// Tells subscribers the feed is back
    pub fn resync(&self) {
        self.publish(FeedEvent::Resynced);
    }

    fn publish(&self, event: FeedEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdmissionStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_all(&self) -> Result<Vec<LiveAdmission>, StoreError> {
        Ok(self.admissions.read().await.clone())
    }

    async fn insert(&self, admission: &NormalizedAdmission) -> Result<LiveAdmission, StoreError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 503,
                message: "store is not accepting writes".to_string(),
            });
        }

        let stored =
            LiveAdmission::from_normalized(AdmissionId::generate(), admission.clone(), Utc::now());
        self.admissions.write().await.insert(0, stored.clone());

        if self.echo_inserts {
            self.publish(FeedEvent::Insert(stored.clone()));
        }
        Ok(stored)
    }

    async fn delete(&self, id: &AdmissionId) -> Result<(), StoreError> {
        let removed = {
            let mut admissions = self.admissions.write().await;
            let before = admissions.len();
            admissions.retain(|a| &a.id != id);
            admissions.len() != before
        };
        if removed {
            self.publish(FeedEvent::Delete(id.clone()));
        }
        Ok(())
    }

    async fn subscribe(&self) -> Result<FeedSubscription, StoreError> {
        let mut events = self.events.subscribe();
        let (tx, rx) = mpsc::channel(FeedSubscription::CAPACITY);

        let worker = tokio::spawn(async move {
            loop {
                let forwarded = match events.recv().await {
                    Ok(event) => tx.send(event).await,
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Memory feed subscriber lagged");
                        let reason = format!("subscriber lagged by {missed} events");
                        match tx.send(FeedEvent::Disconnected { reason }).await {
                            Ok(()) => tx.send(FeedEvent::Resynced).await,
                            Err(e) => Err(e),
                        }
                    }
                    Err(RecvError::Closed) => break,
                };
                if forwarded.is_err() {
                    break;
                }
            }
        });

        Ok(FeedSubscription::new(rx, Some(worker)))
    }

    fn echoes_inserts(&self) -> bool {
        self.echo_inserts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CaseType, Department, Severity};
    use std::time::Duration;

    fn normalized(name: &str) -> NormalizedAdmission {
        NormalizedAdmission {
            patient_name: name.to_string(),
            department: Department::Nephrology,
            severity: Severity::new(1).unwrap(),
            doctor_name: "Dr. Kenji Watanabe".to_string(),
            case_type: CaseType::Outpatient,
        }
    }

    async fn next(subscription: &mut FeedSubscription) -> FeedEvent {
        tokio::time::timeout(Duration::from_secs(2), subscription.next())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_is_listed_newest_first() {
        let store = MemoryStore::new();
        store.insert(&normalized("First")).await.unwrap();
        let second = store.insert(&normalized("Second")).await.unwrap();

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], second);
    }

    #[tokio::test]
    async fn test_insert_is_echoed() {
        let store = MemoryStore::new();
        assert!(store.echoes_inserts());
        let mut feed = store.subscribe().await.unwrap();

        let stored = store.insert(&normalized("Echo")).await.unwrap();
        assert_eq!(next(&mut feed).await, FeedEvent::Insert(stored));
    }

    #[tokio::test]
    async fn test_delete_notifies_only_when_present() {
        let store = MemoryStore::new();
        let stored = store.insert(&normalized("Gone")).await.unwrap();
        let mut feed = store.subscribe().await.unwrap();

        store.delete(&AdmissionId::new("unknown").unwrap()).await.unwrap();
        store.delete(&stored.id).await.unwrap();

        assert_eq!(next(&mut feed).await, FeedEvent::Delete(stored.id));
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_insert_leaves_store_unchanged() {
        let store = MemoryStore::new();
        store.reject_inserts(true);

        let err = store.insert(&normalized("Nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 503, .. }));
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_without_echo() {
        let store = MemoryStore::new().without_echo();
        assert!(!store.echoes_inserts());
    }
}
