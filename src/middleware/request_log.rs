//! Per-request log buffer.
//!
//! Responsibility:
//! - Create a `RequestLog` for every request and expose it through request extensions.
//! - Let middleware/handlers append entries while the request is in flight.
//! - Flush the buffer through an injected `LogSink` once the response is finalized.
//!
//! Notes:
//! - The buffer is owned by one request. Nothing here is process-wide.
//! - The `TracingSink` replays entries via `tracing`, so `RUST_LOG` still applies.

use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use axum::{
    Router,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Method, Request, StatusCode, request::Parts},
    middleware::{self, Next},
    response::Response,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// What the sink learns about the finished request.
#[derive(Debug, Clone)]
pub struct RequestSummary {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub latency: Duration,
}

pub trait LogSink: Send + Sync {
    fn flush(&self, summary: &RequestSummary, entries: &[LogEntry]);
}

/// Default sink: forwards everything to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn flush(&self, summary: &RequestSummary, entries: &[LogEntry]) {
        for entry in entries {
            match entry.level {
                LogLevel::Info => tracing::info!(at = %entry.at, "{}", entry.message),
                LogLevel::Warning => tracing::warn!(at = %entry.at, "{}", entry.message),
                LogLevel::Error => tracing::error!(at = %entry.at, "{}", entry.message),
            }
        }

        tracing::info!(
            method = %summary.method,
            path = %summary.path,
            status = summary.status.as_u16(),
            latency = ?summary.latency,
            "request finished"
        );
    }
}

/// Cheap to clone; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RequestLog {
    pub fn push(&self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry {
            at: Utc::now(),
            level,
            message: message.into(),
        };
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<LogEntry> {
        std::mem::take(
            &mut *self
                .entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The request's buffer, or a detached one when the pipeline did not install it.
    pub fn of<B>(req: &Request<B>) -> Self {
        req.extensions().get::<RequestLog>().cloned().unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for RequestLog
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestLog>()
            .cloned()
            .unwrap_or_default())
    }
}

pub fn apply<S>(router: Router<S>, sink: Arc<dyn LogSink>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(sink, request_log_middleware))
}

async fn request_log_middleware(
    State(sink): State<Arc<dyn LogSink>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let log = RequestLog::default();
    req.extensions_mut().insert(log.clone());

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let summary = RequestSummary {
        method,
        path,
        status: response.status(),
        latency: started.elapsed(),
    };
    sink.flush(&summary, &log.take());

    response
}
