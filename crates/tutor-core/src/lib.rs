//! Business logic and port trait definitions for Tutor.
//!
//! This crate defines the "ports" (storage and LLM provider traits) that the
//! infrastructure layer implements, plus the per-user session actors and the
//! chat orchestrator built on top of them. It depends only on `tutor-types` --
//! never on `tutor-infra` or any database/IO crate.

pub mod chat;
pub mod history;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
