//! Core business logic for Wardlens.
//!
//! Everything here except [`stream`] is synchronous and does no I/O.
//!
//! # Modules
//!
//! - [`decode`] - historical dataset text to records
//! - [`validate`] - live admission field checks
//! - [`merge`] - historical + live into one analytical shape
//! - [`scope`] - department visibility
//! - [`aggregate`] - metrics over merged records
//! - [`dashboard`] - the overview, with explicit loading state
//! - [`review`] - operational action items
//! - [`roster`] - search, sort and paging of live admissions
//! - [`stream`] - live admission cache actor and feed pump
//!
//! # Pipeline
//!
//! 1. **Decode** the historical text once
//! 2. **Attach** a [`stream::LiveFeed`] to keep the live cache current
//! 3. **Merge** historical and live records on each change
//! 4. **Scope** the merged set to the caller's department
//! 5. **Aggregate** into a [`dashboard::DashboardView`]
//!
//! # Example
//!
//! ```rust
//! use wardlens::core::{aggregate, decode::decode, merge::merge, scope::AccessScope};
//!
//! let text = "header\n\
//!     2024-01-01,C1,1980,UAE,F,L1,Dr. A,Consultant,Active,1.4,Cardiology,P,Plan,Cash,IP,5,3,Med,09:00,No,2500";
//! let merged = merge(&decode(text), &[]);
//! let visible = AccessScope::department("Cardiology").apply(&merged);
//!
//! assert_eq!(aggregate::calculate_alos(&visible), 5.0);
//! ```

pub mod aggregate;
pub mod dashboard;
pub mod decode;
pub mod merge;
pub mod review;
pub mod roster;
pub mod scope;
pub mod stream;
pub mod validate;
