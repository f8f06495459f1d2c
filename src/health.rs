//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve traffic? |
//!
//! The store lives in memory and is ready as soon as the process is, so both
//! probes answer unconditionally.

use crate::Request;

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> &'static str {
    "ok"
}

/// Readiness probe. Always `200 OK` with body `"ready"`.
pub async fn readiness(_req: Request) -> &'static str {
    "ready"
}
