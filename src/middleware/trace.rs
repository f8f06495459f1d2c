//! Per-request tracing.
//!
//! Every request runs inside an `info_span!("request")` carrying `method` and
//! `path`. When the response is ready one event is emitted with `status` and
//! `latency_ms`, at a level chosen by status class:
//!
//! | Status | Level |
//! |---|---|
//! | 5xx | `error` |
//! | 4xx | `warn` |
//! | other | `info` |

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, error, info, info_span, warn};

use crate::response::Response;

/// Runs `fut` inside a request span and logs its outcome.
pub async fn instrument<F>(method: &str, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, %path);
    let started = Instant::now();

    async move {
        let res = fut.await;
        let status = res.status_code().as_u16();
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        match status {
            500.. => error!(status, latency_ms, "request failed"),
            400..=499 => warn!(status, latency_ms, "request rejected"),
            _ => info!(status, latency_ms, "request served"),
        }
        res
    }
    .instrument(span)
    .await
}
