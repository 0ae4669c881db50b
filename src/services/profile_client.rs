//! Narrow read-only collaborator interfaces into the external profile
//! subsystem, and an HTTP-backed implementation of both.
//!
//! This core owns the Action Ledger and Mutual Match Registry but only
//! reads Profiles and Preferences; `ProfileReader`/`PreferenceReader` are
//! the seam the Matchmaking Service is coded against, the same role the
//! reference implementation's Appwrite HTTP client plays against its
//! external document store.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::domain::{Preference, Profile};

#[derive(Debug, Error)]
pub enum ProfileClientError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("profile service returned an error: {0}")]
    ApiError(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileClientError>;
    async fn get_by_internal_id(&self, id: i64) -> Result<Option<Profile>, ProfileClientError>;
    async fn resolve_internal_id(&self, public_profile_id: i64) -> Result<Option<Uuid>, ProfileClientError>;

    /// An approximate, bounded batch of candidates: opposite gender, live,
    /// ordered by `last_login` descending. Not trusted for correctness —
    /// `CandidateFilter` re-applies every guarantee authoritatively.
    async fn query_candidates(
        &self,
        seeker: &Profile,
        preference: Option<&Preference>,
        exclude: &HashSet<Uuid>,
        limit: usize,
    ) -> Result<Vec<Profile>, ProfileClientError>;
}

#[async_trait]
pub trait PreferenceReader: Send + Sync {
    async fn get(&self, profile_id: i64) -> Result<Option<Preference>, ProfileClientError>;
}

/// HTTP client for the external profile subsystem's read API.
pub struct HttpProfileClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl HttpProfileClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build profile service HTTP client");

        Self { base_url, api_key, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    async fn get_json(&self, path: &str) -> Result<Option<Value>, ProfileClientError> {
        let response = self
            .client
            .get(self.url(path))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(ProfileClientError::ApiError(format!(
                "request to {path} failed: {}",
                response.status()
            )));
        }

        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl ProfileReader for HttpProfileClient {
    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileClientError> {
        match self.get_json(&format!("profiles/by-user/{user_id}")).await? {
            None => Ok(None),
            Some(json) => serde_json::from_value(json)
                .map(Some)
                .map_err(|e| ProfileClientError::InvalidResponse(e.to_string())),
        }
    }

    async fn get_by_internal_id(&self, id: i64) -> Result<Option<Profile>, ProfileClientError> {
        match self.get_json(&format!("profiles/{id}")).await? {
            None => Ok(None),
            Some(json) => serde_json::from_value(json)
                .map(Some)
                .map_err(|e| ProfileClientError::InvalidResponse(e.to_string())),
        }
    }

    async fn resolve_internal_id(&self, public_profile_id: i64) -> Result<Option<Uuid>, ProfileClientError> {
        match self.get_json(&format!("profiles/{public_profile_id}/user-id")).await? {
            None => Ok(None),
            Some(json) => {
                let raw = json
                    .get("userId")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ProfileClientError::InvalidResponse("missing userId".into()))?;
                Uuid::parse_str(raw)
                    .map(Some)
                    .map_err(|e| ProfileClientError::InvalidResponse(e.to_string()))
            }
        }
    }

    async fn query_candidates(
        &self,
        seeker: &Profile,
        _preference: Option<&Preference>,
        exclude: &HashSet<Uuid>,
        limit: usize,
    ) -> Result<Vec<Profile>, ProfileClientError> {
        let query = serde_json::json!({
            "isBride": !seeker.is_bride,
            "excludeUserIds": exclude.iter().map(Uuid::to_string).collect::<Vec<_>>(),
            "limit": limit,
        });
        let encoded = urlencoding::encode(&query.to_string());
        let path = format!("profiles/candidates?query={encoded}");

        let json = self.get_json(&path).await?.unwrap_or(Value::Array(vec![]));
        let documents = json
            .as_array()
            .ok_or_else(|| ProfileClientError::InvalidResponse("expected a JSON array".into()))?;

        let profiles = documents
            .iter()
            .filter_map(|doc| serde_json::from_value::<Profile>(doc.clone()).ok())
            .filter(|p| p.user_id != seeker.user_id && !exclude.contains(&p.user_id))
            .collect();

        Ok(profiles)
    }
}

#[async_trait]
impl PreferenceReader for HttpProfileClient {
    async fn get(&self, profile_id: i64) -> Result<Option<Preference>, ProfileClientError> {
        match self.get_json(&format!("profiles/{profile_id}/preferences")).await? {
            None => Ok(None),
            Some(json) => serde_json::from_value(json)
                .map(Some)
                .map_err(|e| ProfileClientError::InvalidResponse(e.to_string())),
        }
    }
}
