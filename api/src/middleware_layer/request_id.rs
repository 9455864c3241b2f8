use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info, info_span};

pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Caller-supplied ids longer than this are replaced.
const MAX_ID_LEN: usize = 128;

fn incoming_id(headers: &HeaderMap) -> Option<String> {
    let v = headers.get(&REQUEST_ID)?.to_str().ok()?.trim();
    (!v.is_empty() && v.len() <= MAX_ID_LEN).then(|| v.to_string())
}

fn new_id() -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    format!("req-{nanos}")
}

/// Propagates `X-Request-Id` (generating one when absent), runs the request
/// inside a span carrying it, and logs the outcome.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = incoming_id(req.headers()).unwrap_or_else(new_id);
    let header = HeaderValue::from_str(&id).ok();
    if let Some(h) = &header {
        req.headers_mut().insert(REQUEST_ID, h.clone());
    }

    let span = info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path()
    );
    let started = Instant::now();

    let mut res = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = res.status().as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "request completed"
        )
    });

    if let Some(h) = header {
        res.headers_mut().insert(REQUEST_ID, h);
    }
    res
}
