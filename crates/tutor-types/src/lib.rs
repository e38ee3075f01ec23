//! Shared domain types for Tutor.
//!
//! This crate contains the core domain types used across the Tutor workspace:
//! interaction records, bounded histories, chat request/reply shapes, LLM
//! request/response types, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
