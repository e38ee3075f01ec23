//! Durable, bounded per-user history storage.

pub mod store;
