//! SQLite storage layer.
//!
//! Session history persisted in a WAL-mode SQLite file with split read/write
//! connection pools.

pub mod kv;
pub mod pool;
