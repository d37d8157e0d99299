//! Live admission cache
//!
//! A single task owns the admission list. Everything else talks to it through
//! a [`LiveCacheHandle`]: commands go in over an mpsc channel, and each
//! change is published as a fresh immutable [`CacheSnapshot`] on a watch
//! channel. Readers never see a half-applied notification.
//!
//! Until the initial full fetch arrives the cache is `Loading`, and inserts
//! and deletes are buffered, then replayed in arrival order on top of the
//! fetched list.

use crate::domain::{AdmissionId, Loadable, LiveAdmission, Result, WardlensError};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

const COMMAND_CAPACITY: usize = 256;

/// Whether the cache is known to match the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    #[default]
    Current,
    /// The feed was disrupted; notifications may have been missed
    Stale,
}

/// Immutable view of the cache at one version
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    pub state: Loadable<Arc<Vec<LiveAdmission>>>,
    pub freshness: Freshness,
    /// Bumped on every published change
    pub version: u64,
}

impl CacheSnapshot {
    /// Admissions, newest first, once loaded
    pub fn admissions(&self) -> Option<&[LiveAdmission]> {
        self.state.as_ready().map(|list| list.as_slice())
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_ready()
    }

    /// Number of admissions, 0 while loading
    pub fn len(&self) -> usize {
        self.admissions().map_or(0, <[LiveAdmission]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
enum Change {
    Insert(LiveAdmission),
    Delete(AdmissionId),
}

#[derive(Debug)]
enum Command {
    Load(Vec<LiveAdmission>),
    Apply(Change),
    SetFreshness(Freshness),
    Snapshot(oneshot::Sender<CacheSnapshot>),
}

/// The actor that owns the admission list
pub struct LiveCache {
    commands: mpsc::Receiver<Command>,
    publisher: watch::Sender<CacheSnapshot>,
    admissions: Option<Arc<Vec<LiveAdmission>>>,
    pending: Vec<Change>,
    freshness: Freshness,
    version: u64,
}

impl LiveCache {
    /// Starts the actor on the current tokio runtime
    ///
    /// The task ends when the last handle is dropped.
    pub fn spawn() -> LiveCacheHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (publisher, snapshots) = watch::channel(CacheSnapshot::default());

        let actor = LiveCache {
            commands: command_rx,
            publisher,
            admissions: None,
            pending: Vec::new(),
            freshness: Freshness::Current,
            version: 0,
        };
        tokio::spawn(actor.run());

        LiveCacheHandle {
            commands: command_tx,
            snapshots,
        }
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Load(admissions) => self.load(admissions),
                Command::Apply(change) => self.receive(change),
                Command::SetFreshness(freshness) => {
                    if self.freshness != freshness {
                        self.freshness = freshness;
                        tracing::debug!(?freshness, "Live cache freshness changed");
                        self.publish();
                    }
                }
                Command::Snapshot(reply) => {
                    let _ = reply.send(self.snapshot());
                }
            }
        }
        tracing::debug!(version = self.version, "Live cache stopped");
    }

    fn load(&mut self, admissions: Vec<LiveAdmission>) {
        let fetched = admissions.len();
        self.admissions = Some(Arc::new(admissions));

        let pending = std::mem::take(&mut self.pending);
        let replayed = pending.len();
        for change in pending {
            self.apply(change);
        }

        tracing::info!(fetched, replayed, "Live cache loaded");
        self.publish();
    }

    fn receive(&mut self, change: Change) {
        if self.admissions.is_none() {
            self.pending.push(change);
            return;
        }
        let (event, id) = match &change {
            Change::Insert(admission) => ("insert", admission.id.clone()),
            Change::Delete(id) => ("delete", id.clone()),
        };
        if self.apply(change) {
            self.publish();
            crate::log_feed_event!(event, id, self.version);
        }
    }

    /// Applies one change to a loaded list, returning whether anything moved
    fn apply(&mut self, change: Change) -> bool {
        let Some(admissions) = self.admissions.as_mut() else {
            return false;
        };
        match change {
            Change::Insert(admission) => {
                if admissions.iter().any(|a| a.id == admission.id) {
                    return false;
                }
                Arc::make_mut(admissions).insert(0, admission);
                true
            }
            Change::Delete(id) => match admissions.iter().position(|a| a.id == id) {
                Some(index) => {
                    Arc::make_mut(admissions).remove(index);
                    true
                }
                None => false,
            },
        }
    }

    fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            state: match &self.admissions {
                Some(admissions) => Loadable::Ready(Arc::clone(admissions)),
                None => Loadable::Loading,
            },
            freshness: self.freshness,
            version: self.version,
        }
    }

    fn publish(&mut self) {
        self.version += 1;
        self.publisher.send_replace(self.snapshot());
    }
}

/// Cloneable handle to a running [`LiveCache`]
#[derive(Debug, Clone)]
pub struct LiveCacheHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<CacheSnapshot>,
}

impl LiveCacheHandle {
    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| WardlensError::Feed("live cache has stopped".to_string()))
    }

    /// Queues the initial full fetch (newest first)
    ///
    /// Like every command, this returns once the actor has accepted it, not
    /// once it is applied. A following [`snapshot`](Self::snapshot) call
    /// observes the result; [`current`](Self::current) may not yet.
    pub async fn load(&self, admissions: Vec<LiveAdmission>) -> Result<()> {
        self.send(Command::Load(admissions)).await
    }

    /// Queues an insert; the actor prepends it unless the id is present
    pub async fn insert(&self, admission: LiveAdmission) -> Result<()> {
        self.send(Command::Apply(Change::Insert(admission))).await
    }

    /// Queues a delete by id; unknown ids are ignored when applied
    pub async fn delete(&self, id: AdmissionId) -> Result<()> {
        self.send(Command::Apply(Change::Delete(id))).await
    }

    pub async fn mark_stale(&self) -> Result<()> {
        self.send(Command::SetFreshness(Freshness::Stale)).await
    }

    pub async fn mark_current(&self) -> Result<()> {
        self.send(Command::SetFreshness(Freshness::Current)).await
    }

    /// Snapshot taken after every command sent before this call
    pub async fn snapshot(&self) -> Result<CacheSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot(reply_tx)).await?;
        reply_rx
            .await
            .map_err(|_| WardlensError::Feed("live cache has stopped".to_string()))
    }

    /// Most recently published snapshot, without waiting
    ///
    /// Commands still queued on the actor are not reflected here.
    pub fn current(&self) -> CacheSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that wakes on every published change
    pub fn subscribe(&self) -> watch::Receiver<CacheSnapshot> {
        self.snapshots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CaseType, Department, Severity};
    use chrono::{Duration, TimeZone, Utc};

    fn admission(id: &str, minute: i64) -> LiveAdmission {
        LiveAdmission {
            id: AdmissionId::new(id).unwrap(),
            patient_name: format!("Patient {id}"),
            department: Department::Cardiology,
            severity: Severity::new(2).unwrap(),
            doctor_name: "Dr. Sarah Mitchell".to_string(),
            case_type: CaseType::Inpatient,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minute),
        }
    }

    fn ids(snapshot: &CacheSnapshot) -> Vec<String> {
        snapshot
            .admissions()
            .unwrap_or_default()
            .iter()
            .map(|a| a.id.to_string())
            .collect()
    }

    fn id(value: &str) -> AdmissionId {
        AdmissionId::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let cache = LiveCache::spawn();
        let snapshot = cache.snapshot().await.unwrap();
        assert!(!snapshot.is_loaded());
        assert_eq!(snapshot.admissions(), None);
        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.freshness, Freshness::Current);
    }

    #[tokio::test]
    async fn test_load_then_insert_prepends() {
        let cache = LiveCache::spawn();
        cache
            .load(vec![admission("b", 2), admission("a", 1)])
            .await
            .unwrap();
        cache.insert(admission("c", 3)).await.unwrap();

        let snapshot = cache.snapshot().await.unwrap();
        assert_eq!(ids(&snapshot), vec!["c", "b", "a"]);
        assert_eq!(snapshot.version, 2);
    }

    #[tokio::test]
    async fn test_empty_load_is_ready_not_loading() {
        let cache = LiveCache::spawn();
        cache.load(Vec::new()).await.unwrap();
        let snapshot = cache.snapshot().await.unwrap();
        assert!(snapshot.is_loaded());
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_delete_restores_prior_state() {
        let cache = LiveCache::spawn();
        cache
            .load(vec![admission("b", 2), admission("a", 1)])
            .await
            .unwrap();
        let before = cache.snapshot().await.unwrap();

        cache.insert(admission("x", 9)).await.unwrap();
        cache.delete(id("x")).await.unwrap();

        let after = cache.snapshot().await.unwrap();
        assert_eq!(after.admissions(), before.admissions());
    }

    #[tokio::test]
    async fn test_delete_from_any_position() {
        let cache = LiveCache::spawn();
        cache
            .load(vec![admission("c", 3), admission("b", 2), admission("a", 1)])
            .await
            .unwrap();
        cache.delete(id("b")).await.unwrap();
        assert_eq!(ids(&cache.snapshot().await.unwrap()), vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_idempotent() {
        let cache = LiveCache::spawn();
        cache.load(vec![admission("a", 1)]).await.unwrap();
        cache.insert(admission("b", 2)).await.unwrap();
        let once = cache.snapshot().await.unwrap();

        cache.insert(admission("b", 2)).await.unwrap();
        let twice = cache.snapshot().await.unwrap();

        assert_eq!(ids(&twice), vec!["b", "a"]);
        assert_eq!(twice.version, once.version);
    }

    #[tokio::test]
    async fn test_unknown_delete_is_absorbed() {
        let cache = LiveCache::spawn();
        cache.load(vec![admission("a", 1)]).await.unwrap();
        cache.delete(id("nope")).await.unwrap();

        let snapshot = cache.snapshot().await.unwrap();
        assert_eq!(ids(&snapshot), vec!["a"]);
        assert_eq!(snapshot.version, 1);
    }

    #[tokio::test]
    async fn test_changes_before_load_are_replayed() {
        let cache = LiveCache::spawn();
        cache.insert(admission("new", 5)).await.unwrap();
        cache.delete(id("old")).await.unwrap();
        cache.insert(admission("a", 1)).await.unwrap();

        assert!(!cache.snapshot().await.unwrap().is_loaded());

        cache
            .load(vec![admission("old", 0), admission("a", 1)])
            .await
            .unwrap();

        let snapshot = cache.snapshot().await.unwrap();
        assert_eq!(ids(&snapshot), vec!["new", "a"]);
    }

    #[tokio::test]
    async fn test_freshness_transitions() {
        let cache = LiveCache::spawn();
        cache.load(Vec::new()).await.unwrap();

        cache.mark_stale().await.unwrap();
        let stale = cache.snapshot().await.unwrap();
        assert_eq!(stale.freshness, Freshness::Stale);

        cache.mark_stale().await.unwrap();
        assert_eq!(cache.snapshot().await.unwrap().version, stale.version);

        cache.mark_current().await.unwrap();
        assert_eq!(
            cache.snapshot().await.unwrap().freshness,
            Freshness::Current
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_published_snapshots() {
        let cache = LiveCache::spawn();
        let mut updates = cache.subscribe();

        cache.load(vec![admission("a", 1)]).await.unwrap();
        updates.changed().await.unwrap();
        assert_eq!(ids(&updates.borrow_and_update()), vec!["a"]);

        cache.snapshot().await.unwrap();
        assert_eq!(cache.current().len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_after_load_sees_it_applied() {
        let cache = LiveCache::spawn();
        cache.load(vec![admission("a", 1)]).await.unwrap();

        assert!(cache.snapshot().await.unwrap().is_loaded());
        assert!(cache.current().is_loaded());
    }

    #[tokio::test]
    async fn test_old_snapshots_are_unaffected_by_later_changes() {
        let cache = LiveCache::spawn();
        cache.load(vec![admission("a", 1)]).await.unwrap();
        let held = cache.snapshot().await.unwrap();

        cache.insert(admission("b", 2)).await.unwrap();
        cache.snapshot().await.unwrap();

        assert_eq!(ids(&held), vec!["a"]);
    }
}
