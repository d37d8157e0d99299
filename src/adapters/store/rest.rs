//! PostgREST-style admission store
//!
//! Talks to a table exposed at `{base_url}/rest/v1/{table}`. The feed is
//! produced by polling the table and diffing successive snapshots.

use super::traits::{AdmissionStore, FeedEvent, FeedSubscription};
use crate::config::{SecretString, StoreConfig};
use crate::domain::{AdmissionId, LiveAdmission, NormalizedAdmission, StoreError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use secrecy::ExposeSecret;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::mpsc;

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
    poll_interval: Duration,
    echo_inserts: bool,
}

impl RestStore {
    /// Builds a client for the table named in `config`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConnectionFailed`] if `base_url` is missing or
    /// the HTTP client cannot be built.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| StoreError::ConnectionFailed("store.base_url is not set".to_string()))?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StoreError::ConnectionFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), config.table),
            api_key: config.api_key.clone(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            echo_inserts: config.echo_inserts,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => {
                let key = key.expose_secret().as_ref();
                request
                    .header("apikey", key)
                    .header("Authorization", format!("Bearer {key}"))
            }
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        self.authorize(request).send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout(e.to_string())
            } else {
                StoreError::ConnectionFailed(e.to_string())
            }
        })
    }

    async fn fetch_once(&self) -> Result<Vec<LiveAdmission>, StoreError> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::QueryFailed(format!(
                "listing admissions failed with status {status}: {body}"
            )));
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        Ok(decode_rows(rows))
    }

    async fn poll(self, tx: mpsc::Sender<FeedEvent>, mut known: HashSet<AdmissionId>) {
        let mut disconnected = false;
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let events = match self.fetch_once().await {
                Ok(admissions) if disconnected => {
                    disconnected = false;
                    known = admissions.iter().map(|a| a.id.clone()).collect();
                    vec![FeedEvent::Resynced]
                }
                Ok(admissions) => diff(&mut known, admissions),
                Err(e) if !disconnected => {
                    disconnected = true;
                    vec![FeedEvent::Disconnected {
                        reason: e.to_string(),
                    }]
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Store still unreachable");
                    Vec::new()
                }
            };

            for event in events {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
        }
    }
}

/// Events that turn `known` into the ids of `current`
///
/// Inserts come out oldest first so that prepending them leaves the newest
/// at the front.
fn diff(known: &mut HashSet<AdmissionId>, current: Vec<LiveAdmission>) -> Vec<FeedEvent> {
    let current_ids: HashSet<AdmissionId> = current.iter().map(|a| a.id.clone()).collect();

    let mut deleted: Vec<AdmissionId> = known.difference(&current_ids).cloned().collect();
    deleted.sort();

    let mut events: Vec<FeedEvent> = deleted.into_iter().map(FeedEvent::Delete).collect();
    events.extend(
        current
            .into_iter()
            .rev()
            .filter(|a| !known.contains(&a.id))
            .map(FeedEvent::Insert),
    );

    *known = current_ids;
    events
}

fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<LiveAdmission> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<LiveAdmission>(row) {
            Ok(admission) => Some(admission),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable admission row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl AdmissionStore for RestStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn fetch_all(&self) -> Result<Vec<LiveAdmission>, StoreError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once().await {
                Err(e @ (StoreError::ConnectionFailed(_) | StoreError::Timeout(_)))
                    if attempt < MAX_ATTEMPTS =>
                {
                    crate::log_retry_attempt!(attempt, MAX_ATTEMPTS, e);
                    let delay = INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt - 1);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn insert(&self, admission: &NormalizedAdmission) -> Result<LiveAdmission, StoreError> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("Prefer", "return=representation")
            .json(admission);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected { status, message });
        }

        let mut rows: Vec<LiveAdmission> = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::InvalidResponse(
                "insert returned no representation".to_string(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    async fn delete(&self, id: &AdmissionId) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(&self.endpoint)
            .query(&[("id", format!("eq.{id}"))]);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected { status, message });
        }
        Ok(())
    }

    async fn subscribe(&self) -> Result<FeedSubscription, StoreError> {
        let baseline = self
            .fetch_once()
            .await
            .map_err(|e| StoreError::SubscriptionFailed(e.to_string()))?;
        let known = baseline.into_iter().map(|a| a.id).collect();

        let (tx, rx) = mpsc::channel(FeedSubscription::CAPACITY);
        let worker = tokio::spawn(self.clone().poll(tx, known));
        Ok(FeedSubscription::new(rx, Some(worker)))
    }

    fn echoes_inserts(&self) -> bool {
        self.echo_inserts
    }
}
