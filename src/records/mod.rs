//! Config record core: model, persistence, resolution.
//!
//! # Data Flow
//! ```text
//! store file (JSON)
//!     → store.rs (load whole table; missing/corrupt ⇒ empty)
//!     → resolver.rs (customer entry → default-customer entry → empty)
//!     → record.rs (merge raw fields over defaults, coerce types)
//!     → ConfigRecord (complete, typed)
//!
//! On update:
//!     partial payload
//!     → resolver.rs (overlay non-empty keys on stored entry)
//!     → record.rs (coerce the merged whole; any bad value rejects all)
//!     → store.rs (persist the full table)
//! ```
//!
//! # Design Decisions
//! - The file is the single source of truth: loaded fresh per operation,
//!   written back in full after every mutation, no in-memory cache
//! - Missing data never fails resolution; a present-but-invalid value does
//! - Updates are all-or-nothing per call; no partial record is ever stored

pub mod record;
pub mod resolver;
pub mod store;

pub use record::{ConfigRecord, Field, RecordError};
pub use resolver::{ConfigResolver, UpdateError};
pub use store::{ConfigTable, RecordStore, StoreError};
