//! Shared building blocks for smsrelay services: configuration loading, tracing
//! setup, request-id middleware, liveness handler and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
