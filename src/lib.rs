// Wardlens - Hospital Operations Analytics
// Copyright (c) 2025 Wardlens Contributors
// Licensed under the MIT License

//! # Wardlens - Hospital Operations Analytics
//!
//! Wardlens combines a historical dataset of closed clinical cases with a
//! live feed of new admissions and computes operational metrics over the
//! union: average length of stay, case-mix index, revenue trends,
//! departmental workload and an operational review list.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Decoding** the historical dataset from delimiter-separated text
//! - **Following** a live admission store through its change feed
//! - **Merging** both sources into one analytical record shape
//! - **Scoping** results to the departments a caller may see
//! - **Aggregating** the merged set into dashboard views
//!
//! ## Architecture
//!
//! Wardlens follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (decode, merge, scope, aggregate, live cache)
//! - [`adapters`] - External integrations (historical sources, admission stores)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wardlens::adapters::store::MemoryStore;
//! use wardlens::core::dashboard::Dashboard;
//! use wardlens::core::decode::decode;
//! use wardlens::core::scope::AccessScope;
//! use wardlens::core::stream::{LiveCache, LiveFeed};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = std::fs::read_to_string("data/hospital_data.csv")?;
//!
//!     let cache = LiveCache::spawn();
//!     let feed = LiveFeed::attach(Arc::new(MemoryStore::new()), cache.clone()).await?;
//!
//!     let mut dashboard = Dashboard::new(AccessScope::unrestricted());
//!     dashboard.set_historical(decode(&text));
//!
//!     if let Some(view) = dashboard.view(&cache.current()).into_ready() {
//!         println!("{} cases, ALOS {:.2}", view.total_cases, view.alos);
//!     }
//!
//!     feed.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Live Admissions
//!
//! The live cache is a single task that owns the admission list. Changes
//! that arrive before the initial load are buffered and replayed, inserts
//! are idempotent by id, and every change publishes a new immutable
//! snapshot:
//!
//! ```rust,no_run
//! use wardlens::core::stream::LiveCache;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = LiveCache::spawn();
//! let mut changes = cache.subscribe();
//!
//! cache.load(Vec::new()).await?;
//! changes.changed().await?;
//! assert!(changes.borrow().is_loaded());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Wardlens uses the [`domain::WardlensError`] type for all errors:
//!
//! ```rust,no_run
//! use wardlens::domain::WardlensError;
//!
//! fn example() -> Result<(), WardlensError> {
//!     let config = wardlens::config::load_config("wardlens.toml")?;
//!     config.validate().map_err(WardlensError::Configuration)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Wardlens uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(cases = 120, "Historical dataset loaded");
//! warn!(store = "rest", "Live feed disconnected");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
