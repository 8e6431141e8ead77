//! JSON REST backend.
//!
//! Endpoints (relative to the configured base URL):
//! - `GET   notifications/preferences/{user}`
//! - `GET   calendar/{user}/events?start=..&end=..`
//! - `GET   profiles/{user}`
//! - `POST  suggestions`
//! - `PATCH suggestions/{id}`

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::traits::{CalendarReader, PreferencesReader, ProfileReader, SuggestionStore};
use super::types::{
    CalendarEvent, NotificationPreferences, ProfileRecord, SuggestionRecord, SuggestionUsage,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

pub struct RestClient {
    base_url: Url,
    api_key: Option<String>,
    http_client: Client,
}

#[derive(Deserialize)]
struct InsertedId {
    id: String,
}

impl RestClient {
    /// Create a client with default HTTP settings.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key: None,
            http_client: Client::new(),
        })
    }

    /// Build from the `[api]` config section. An empty key means no auth.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            http_client,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Unavailable(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http_client.request(method, url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, ApiError> {
        let resp = self.request(Method::GET, url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(resp).await.map(Some)
    }
}

async fn ensure_success(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let bytes = ensure_success(resp).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl PreferencesReader for RestClient {
    async fn notification_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<NotificationPreferences>, ApiError> {
        let url = self.endpoint(&["notifications", "preferences", user_id])?;
        self.get_optional(url).await
    }
}

#[async_trait]
impl CalendarReader for RestClient {
    async fn calendar_events(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        let mut url = self.endpoint(&["calendar", user_id, "events"])?;
        url.query_pairs_mut()
            .append_pair("start", &timestamp(start))
            .append_pair("end", &timestamp(end));
        let resp = self.request(Method::GET, url).send().await?;
        read_json(resp).await
    }
}

#[async_trait]
impl ProfileReader for RestClient {
    async fn partner_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>, ApiError> {
        let url = self.endpoint(&["profiles", user_id])?;
        self.get_optional(url).await
    }
}

#[async_trait]
impl SuggestionStore for RestClient {
    async fn insert_suggestion(&self, record: &SuggestionRecord) -> Result<String, ApiError> {
        let url = self.endpoint(&["suggestions"])?;
        let resp = self.request(Method::POST, url).json(record).send().await?;
        let inserted: InsertedId = read_json(resp).await?;
        Ok(inserted.id)
    }

    async fn update_suggestion_usage(
        &self,
        suggestion_id: &str,
        usage: &SuggestionUsage,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["suggestions", suggestion_id])?;
        let resp = self.request(Method::PATCH, url).json(usage).send().await?;
        ensure_success(resp).await.map(|_| ())
    }
}
