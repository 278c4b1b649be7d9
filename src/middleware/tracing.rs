use std::time::Duration;

use tracing::info;

use super::Middleware;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Logs one event per completed dispatch.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn after(&self, req: &HandlerRequest, res: &mut HandlerResponse, latency: Duration) {
        info!(
            method = ?req.method,
            path = %req.path,
            handler = %req.handler_name,
            status = res.status,
            latency_ms = latency.as_millis() as u64,
            "request completed"
        );
    }
}
