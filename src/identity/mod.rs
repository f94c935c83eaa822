//! Display-name lookup.
//!
//! Names are resolved best-effort from an external profile service. Every
//! failure degrades to the "Unknown" placeholder; callers never see an error.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::IdentityConfig;
use crate::models::{EntityId, UNKNOWN_NAME};

/// Errors from a single profile lookup.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status} for {id}")]
    HttpStatus { status: u16, id: String },

    #[error("Profile for {0} has no name")]
    MissingName(String),
}

/// Resolves an entity id to a display name.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Single attempt. Returns "Unknown" when the name cannot be resolved.
    async fn resolve_name(&self, id: &EntityId) -> String;
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    name: Option<String>,
}

/// Looks names up at `<base_url>/<id>`, expecting `{"name": "..."}`.
pub struct HttpIdentityService {
    client: Client,
    base_url: Url,
}

impl HttpIdentityService {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| IdentityError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, base_url })
    }

    fn profile_url(&self, id: &EntityId) -> Result<Url, IdentityError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| IdentityError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    async fn lookup(&self, id: &EntityId) -> Result<String, IdentityError> {
        let url = self.profile_url(id)?;
        debug!("Resolving name for {} via {}", id, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::HttpStatus {
                status: status.as_u16(),
                id: id.to_string(),
            });
        }

        let profile: ProfileResponse = response.json().await?;
        profile
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| IdentityError::MissingName(id.to_string()))
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn resolve_name(&self, id: &EntityId) -> String {
        match self.lookup(id).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Name lookup failed for {}: {}", id, e);
                UNKNOWN_NAME.to_string()
            }
        }
    }
}

/// Fixed id → name table. Used when lookups are disabled.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    names: HashMap<String, String>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, id: &str, name: &str) -> Self {
        self.names.insert(id.to_string(), name.to_string());
        self
    }
}

#[async_trait]
impl IdentityService for StaticIdentity {
    async fn resolve_name(&self, id: &EntityId) -> String {
        self.names
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }
}
