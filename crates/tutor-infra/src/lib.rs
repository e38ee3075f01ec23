//! Infrastructure layer for Tutor.
//!
//! Implementations of the ports defined in `tutor-core`: SQLite and
//! in-memory history storage, HTTP inference providers, and the config
//! loader.

pub mod config;
pub mod llm;
pub mod memory;
pub mod sqlite;
pub mod store;
