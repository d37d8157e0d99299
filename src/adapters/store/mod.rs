//! Live admission stores
//!
//! - [`MemoryStore`] - in-process, broadcasts changes to subscribers
//! - [`RestStore`] - PostgREST-style HTTP table with a polling feed

pub mod factory;
pub mod memory;
pub mod rest;
pub mod traits;

pub use factory::create_admission_store;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use traits::{AdmissionStore, FeedEvent, FeedSubscription};
