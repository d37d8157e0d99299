//! External system integrations for Wardlens.
//!
//! - [`historical`] - where the historical case dataset is read from
//! - [`store`] - the live admission store and its change feed
//!
//! # Design Pattern
//!
//! Adapters isolate I/O behind traits ([`historical::HistoricalSource`],
//! [`store::AdmissionStore`]) so the core can be exercised against the
//! in-memory implementations.
//!
//! ```rust,no_run
//! use wardlens::adapters::store::{AdmissionStore, MemoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let admissions = store.fetch_all().await?;
//! println!("{} live admissions", admissions.len());
//! # Ok(())
//! # }
//! ```

pub mod historical;
pub mod store;
