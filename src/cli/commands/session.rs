//! Shared command session
//!
//! Loads the historical dataset and attaches the live feed concurrently,
//! then answers the read-only commands from the merged, scoped result.

use crate::adapters::historical::{create_historical_source, load_historical};
use crate::adapters::store::{create_admission_store, AdmissionStore};
use crate::config::WardlensConfig;
use crate::core::dashboard::{Dashboard, DashboardView};
use crate::core::scope::AccessScope;
use crate::core::stream::{CacheSnapshot, LiveCache, LiveCacheHandle, LiveFeed};
use crate::domain::{LiveAdmission, MergedRecord, Result, WardlensError};
use std::sync::Arc;

pub struct Session {
    pub store: Arc<dyn AdmissionStore>,
    pub cache: LiveCacheHandle,
    pub dashboard: Dashboard,
    feed: LiveFeed,
}

impl Session {
    /// Opens both data sources for `config`, visible through `scope`
    ///
    /// # Errors
    ///
    /// Fails if either the historical source or the admission store cannot
    /// be read.
    pub async fn open(config: &WardlensConfig, scope: AccessScope) -> Result<Self> {
        let source = create_historical_source(&config.historical)?;
        let store = create_admission_store(&config.store)?;
        let cache = LiveCache::spawn();

        let (historical, feed) = futures::try_join!(
            load_historical(source.as_ref()),
            LiveFeed::attach(Arc::clone(&store), cache.clone()),
        )?;

        let mut dashboard = Dashboard::new(scope);
        dashboard.set_historical(historical);

        tracing::debug!(
            store = store.name(),
            source = %source.describe(),
            "Session opened"
        );

        Ok(Self {
            store,
            cache,
            dashboard,
            feed,
        })
    }

    pub async fn snapshot(&self) -> Result<CacheSnapshot> {
        self.cache.snapshot().await
    }

    /// Merged records for `snapshot`, visible to this session's scope
    pub fn merged_at(&self, snapshot: &CacheSnapshot) -> Result<Vec<MergedRecord>> {
        self.dashboard
            .merged(snapshot)
            .into_ready()
            .ok_or_else(|| WardlensError::Feed("live admissions have not loaded".to_string()))
    }

    pub async fn merged(&self) -> Result<Vec<MergedRecord>> {
        let snapshot = self.snapshot().await?;
        self.merged_at(&snapshot)
    }

    pub async fn view(&self) -> Result<DashboardView> {
        Ok(DashboardView::compute(&self.merged().await?))
    }

    /// Live admissions visible to this session's scope
    pub async fn live_admissions(&self) -> Result<Vec<LiveAdmission>> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot
            .admissions()
            .map(|admissions| self.dashboard.scope().apply(admissions))
            .unwrap_or_default())
    }

    /// Stops the live feed
    pub async fn close(self) {
        self.feed.shutdown().await;
    }
}
