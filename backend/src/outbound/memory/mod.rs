//! In-process record store.
//!
//! Backs every repository port with lock-guarded vectors so the service can
//! run without PostgreSQL. Records stay in insertion order, which is the
//! "store default" order for list queries without a recognised sort key.

mod record_store;

pub use record_store::MemoryRecordStore;
