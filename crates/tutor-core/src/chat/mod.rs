//! Request-level chat workflow.
//!
//! `ChatService` resolves the session actor for a user, builds the prompt
//! from its recent history, calls the inference provider, and records the
//! exchange.

pub mod service;
