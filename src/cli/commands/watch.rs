//! Watch command implementation
//!
//! Follows the live feed and prints the headline figures every time the
//! cache publishes, until a shutdown signal arrives. Snapshots that are
//! still loading are skipped.

use super::session::Session;
use super::{open_session, EXIT_OK};
use crate::core::dashboard::DashboardView;
use crate::core::stream::{CacheSnapshot, Freshness};
use crate::domain::{Loadable, MergedRecord};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Limit the figures to one department (within the configured access)
    #[arg(short, long)]
    pub department: Option<String>,
}

impl WatchArgs {
    /// Execute the watch command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let session = match open_session(config_path, self.department.as_deref()).await {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };

        println!("👀 Watching live admissions (Ctrl+C to stop)");
        let mut changes = session.cache.subscribe();
        changes.borrow_and_update();
        print_headline(&session, &session.snapshot().await?);

        while !*shutdown_signal.borrow() {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        tracing::warn!("Live cache stopped publishing");
                        break;
                    }
                    let snapshot = changes.borrow_and_update().clone();
                    print_headline(&session, &snapshot);
                }
                signal = shutdown_signal.changed() => {
                    tracing::info!("Shutdown requested, detaching from live feed");
                    if signal.is_err() {
                        break;
                    }
                }
            }
        }

        session.close().await;
        println!("✅ Stopped watching");
        Ok(EXIT_OK)
    }
}

fn print_headline(session: &Session, snapshot: &CacheSnapshot) {
    match session.dashboard.merged(snapshot) {
        Loadable::Ready(records) => println!("{}", headline(snapshot, &records)),
        Loadable::Loading => {
            tracing::debug!(version = snapshot.version, "Live admissions still loading")
        }
    }
}

fn headline(snapshot: &CacheSnapshot, records: &[MergedRecord]) -> String {
    let view = DashboardView::compute(records);
    let freshness = match snapshot.freshness {
        Freshness::Current => "live",
        Freshness::Stale => "stale",
    };
    format!(
        "[v{} {}] cases {} (live {}) ALOS {:.2} CMI {:.3} revenue {:.2}",
        snapshot.version,
        freshness,
        view.total_cases,
        view.live_cases,
        view.alos,
        view.cmi,
        view.total_revenue
    )
}
