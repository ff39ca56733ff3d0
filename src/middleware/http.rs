//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Panic isolation (a panicking handler becomes a 500, the process keeps serving)
//! - Per-request log buffer (see `request_log`)
//! - Global timeouts and body size limits
//!
//! Layer order, outermost first:
//! request-id → trace → request log → panic guard → timeout → body limit → routes
//!
//! The panic guard sits inside the request log so a panicked request is still
//! flushed with its 500.
//!
//! Trailing-slash normalisation has to run before routing, so `app` wraps the
//! finished router with it.

use std::{any::Any, sync::Arc, time::Duration};

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use axum::response::Response;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::request_log::{self, LogSink};
use crate::error::error_response;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub timeout: Duration,
    pub body_limit: usize,
}

impl Default for PipelineSettings {
    /// 30 s, 1 MiB.
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            body_limit: 1024 * 1024,
        }
    }
}

/// Apply HTTP-level middleware to the given Router.
pub fn apply(router: Router, settings: PipelineSettings, sink: Arc<dyn LogSink>) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let bounded = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                error_response(StatusCode::REQUEST_TIMEOUT, "request timed out")
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }))
        .layer(TimeoutLayer::new(settings.timeout))
        .layer(RequestBodyLimitLayer::new(settings.body_limit));

    let router = request_log::apply(
        router
            .layer(bounded)
            .layer(CatchPanicLayer::custom(panic_response)),
        sink,
    );

    let outer = ServiceBuilder::new()
        // Generate a request id if missing, then propagate it to the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(TraceLayer::new_for_http());

    router.layer(outer)
}

/// Full detail goes to the log; the client gets the generic body.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::middleware::request_log::{LogEntry, RequestLog, RequestSummary, TracingSink};
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[derive(Default)]
    struct Recording {
        flushed: Mutex<Vec<(StatusCode, Vec<String>)>>,
    }

    impl LogSink for Recording {
        fn flush(&self, summary: &RequestSummary, entries: &[LogEntry]) {
            self.flushed.lock().unwrap().push((
                summary.status,
                entries.iter().map(|e| e.message.clone()).collect(),
            ));
        }
    }

    async fn boom() -> &'static str {
        panic!("kaboom")
    }

    async fn logged_boom(log: RequestLog) -> &'static str {
        log.info("before panic");
        panic!("kaboom")
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    fn app(settings: PipelineSettings) -> Router {
        let routes = Router::new()
            .route("/boom", get(boom))
            .route("/slow", get(slow))
            .route("/ok", get(|| async { "ok" }));
        apply(routes, settings, Arc::new(TracingSink))
    }

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn panics_become_generic_500() {
        let res = app(PipelineSettings::default())
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["error"]["message"], "internal server error");
        assert!(!body.to_string().contains("kaboom"));
    }

    #[tokio::test]
    async fn panicked_requests_are_still_flushed() {
        let sink = Arc::new(Recording::default());
        let app = apply(
            Router::new().route("/boom", get(logged_boom)),
            PipelineSettings::default(),
            sink.clone(),
        );

        let res = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let flushed = sink.flushed.lock().unwrap();
        assert_eq!(flushed.len(), 1);
        assert_eq!(flushed[0].0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(flushed[0].1, vec!["before panic".to_string()]);
    }

    #[tokio::test]
    async fn slow_handlers_time_out() {
        let settings = PipelineSettings {
            timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let res = app(settings)
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body_json(res).await["error"]["code"], 408);
    }

    #[tokio::test]
    async fn request_id_is_generated_and_propagated() {
        let res = app(PipelineSettings::default())
            .oneshot(Request::get("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.headers().contains_key(REQUEST_ID_HEADER));

        let res = app(PipelineSettings::default())
            .oneshot(
                Request::get("/ok")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.headers()[REQUEST_ID_HEADER], "abc-123");
    }
}
