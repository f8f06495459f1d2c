//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every dispatched request.
//!
//! - [`trace`]: per-request span with method, path, status, latency

pub mod trace;
