//! HTTP API layer for Tutor.
//!
//! Axum router exposing the chat and session endpoints under `/api/`, with
//! permissive CORS and `{error}` JSON bodies on failure.

pub mod error;
pub mod handlers;
pub mod router;
