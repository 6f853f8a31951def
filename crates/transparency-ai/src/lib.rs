//! Adaptive product questionnaires and transparency scoring.
//!
//! The [`workflows::transparency`] module holds the rule tables and pure scoring
//! functions; the provider layer wraps them behind a remote-first, local-fallback
//! contract so callers always receive a result unless both paths fail.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
