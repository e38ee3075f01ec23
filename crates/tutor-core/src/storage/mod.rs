//! Storage abstractions for Tutor.
//!
//! Defines the durable key-value port that backs per-user histories.
//! Implementations live in tutor-infra.

pub mod kv_store;
