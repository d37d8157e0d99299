//! Live admission stream
//!
//! - [`cache`] - the actor that owns the live admission list
//! - [`feed`] - the pump that keeps it in step with a store, and submission

pub mod cache;
pub mod feed;

pub use cache::{CacheSnapshot, Freshness, LiveCache, LiveCacheHandle};
pub use feed::{submit_admission, LiveFeed};
