#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use gecko_gateway::{
    app::{App, build_app},
    authz::{PolicyClients, PolicyError, ResourceListingPolicy, ServiceAccessPolicy},
    middleware::{LogSink, PipelineSettings, request_log::{LogEntry, RequestSummary}},
    repos::{ConfigStore, RepoError},
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

/// What the fake policy service answers for `get_allowed_resources`.
#[derive(Clone)]
pub enum Listing {
    Grants(Vec<String>),
    Fail(PolicyError),
    Hang,
}

pub struct FakePolicy {
    listing: Listing,
    service_access: Result<bool, PolicyError>,
    calls: AtomicUsize,
}

impl FakePolicy {
    pub fn granting(paths: &[&str]) -> Arc<Self> {
        Self::with(Listing::Grants(paths.iter().map(|p| p.to_string()).collect()), Ok(true))
    }

    pub fn with(listing: Listing, service_access: Result<bool, PolicyError>) -> Arc<Self> {
        Arc::new(Self {
            listing,
            service_access,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceListingPolicy for FakePolicy {
    async fn get_allowed_resources(
        &self,
        _token: &str,
        _action: &str,
        _service: &str,
    ) -> Result<Vec<String>, PolicyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.listing {
            Listing::Grants(paths) => Ok(paths.clone()),
            Listing::Fail(e) => Err(e.clone()),
            Listing::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(vec![])
            }
        }
    }
}

#[async_trait]
impl ServiceAccessPolicy for FakePolicy {
    async fn check_resource_service_access(
        &self,
        _token: &str,
        _action: &str,
        _service: &str,
        _resource_path: &str,
    ) -> Result<bool, PolicyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.service_access.clone()
    }
}

pub fn full_policy(fake: &Arc<FakePolicy>) -> PolicyClients {
    PolicyClients::full(fake.clone()).with_timeout(Duration::from_millis(200))
}

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<(String, String), Value>>,
}

impl MemoryStore {
    pub fn seeded(entries: &[(&str, &str, Value)]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut docs = store.docs.lock().unwrap();
            for (kind, id, content) in entries {
                docs.insert((kind.to_string(), id.to_string()), content.clone());
            }
        }
        Arc::new(store)
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn list(&self, config_type: &str) -> Result<Vec<String>, RepoError> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .keys()
            .filter(|(kind, _)| kind == config_type)
            .map(|(_, id)| id.clone())
            .collect())
    }

    async fn get(&self, config_type: &str, config_id: &str) -> Result<Option<Value>, RepoError> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .get(&(config_type.to_string(), config_id.to_string()))
            .cloned())
    }

    async fn put(&self, config_type: &str, config_id: &str, content: &Value) -> Result<(), RepoError> {
        self.docs
            .lock()
            .unwrap()
            .insert((config_type.to_string(), config_id.to_string()), content.clone());
        Ok(())
    }

    async fn delete(&self, config_type: &str, config_id: &str) -> Result<bool, RepoError> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .remove(&(config_type.to_string(), config_id.to_string()))
            .is_some())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

/// Keeps every flushed entry so tests can look at what a request logged.
#[derive(Default)]
pub struct RecordingSink {
    pub entries: Mutex<Vec<String>>,
}

impl LogSink for RecordingSink {
    fn flush(&self, _summary: &RequestSummary, entries: &[LogEntry]) {
        self.entries
            .lock()
            .unwrap()
            .extend(entries.iter().map(|e| e.message.clone()));
    }
}

pub fn app(state: &AppState) -> App {
    app_with_sink(state, Arc::new(RecordingSink::default()))
}

pub fn app_with_sink(state: &AppState, sink: Arc<dyn LogSink>) -> App {
    build_app(state, PipelineSettings::default(), sink).unwrap()
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &App, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}
