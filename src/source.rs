//! Remote sources the resource stores read from.

use crate::config::ApiConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

/// Read-only access to the remote collections.
///
/// Implementations return the raw JSON body of a GET on `path`; decoding
/// into entities is left to the store.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, FetchError>;
}

/// HTTP source for the remote REST API.
pub struct HttpSource {
    config: ApiConfig,
    client: Client,
}

impl HttpSource {
    /// Create a source from config.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl ResourceSource for HttpSource {
    async fn get(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.config.endpoint_url(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

/// In-memory source serving canned JSON bodies.
///
/// Paths without a body, and paths marked with [`MemorySource::fail`],
/// answer with a transport error. Every request is counted, whether it
/// succeeds or not.
#[derive(Default)]
pub struct MemorySource {
    bodies: RwLock<HashMap<String, Value>>,
    failures: RwLock<HashMap<String, String>>,
    requests: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`.
    pub fn with(self, path: impl Into<String>, body: Value) -> Self {
        self.insert(path, body);
        self
    }

    /// Replace the body served for `path`.
    pub fn insert(&self, path: impl Into<String>, body: Value) {
        self.bodies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), body);
    }

    /// Make `path` fail with `message` until [`MemorySource::recover`] is called.
    pub fn fail(&self, path: impl Into<String>, message: impl Into<String>) {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), message.into());
    }

    pub fn recover(&self, path: &str) {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }

    /// Total number of `get` calls served so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceSource for MemorySource {
    async fn get(&self, path: &str) -> Result<Value, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self
            .failures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            return Err(FetchError::Transport(message.clone()));
        }

        self.bodies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("no route for {path}")))
    }
}
