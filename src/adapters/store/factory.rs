//! Admission store factory

use super::memory::MemoryStore;
use super::rest::RestStore;
use super::traits::AdmissionStore;
use crate::config::{StoreConfig, StoreKind};
use crate::domain::Result;
use std::sync::Arc;

/// Create the admission store selected by `config.kind`
///
/// # Errors
///
/// Returns an error if the REST client cannot be built
pub fn create_admission_store(config: &StoreConfig) -> Result<Arc<dyn AdmissionStore>> {
    match config.kind {
        StoreKind::Memory => {
            tracing::info!("Using in-memory admission store");
            let store = if config.echo_inserts {
                MemoryStore::new()
            } else {
                MemoryStore::new().without_echo()
            };
            Ok(Arc::new(store))
        }
        StoreKind::Rest => {
            tracing::info!(table = %config.table, "Using REST admission store");
            Ok(Arc::new(RestStore::new(config)?))
        }
    }
}
