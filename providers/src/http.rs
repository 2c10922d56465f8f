//! HTTP client for the checklist backend.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use gameday_types::Game;

use crate::{FetchError, GameProvider, TemplateProvider, truncate_error_body};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

pub const CHECKLISTS_PATH: &str = "/checklists";
pub const CURRENT_GAME_PATH: &str = "/current-game";

fn base_client_builder() -> reqwest::ClientBuilder {
    use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::limited(3))
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
        .user_agent(concat!("gameday/", env!("CARGO_PKG_VERSION")))
        .default_headers(default_headers)
}

pub fn http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    base_client_builder().timeout(timeout).build()
}

/// Both providers backed by one HTTP client.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = http_client_with_timeout(timeout).map_err(FetchError::Client)?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build on an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        tracing::debug!(%url, "Fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status,
                body: truncate_error_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

impl TemplateProvider for HttpProvider {
    async fn fetch_template(&self) -> Result<Value, FetchError> {
        self.get_json(CHECKLISTS_PATH).await
    }
}

impl GameProvider for HttpProvider {
    async fn fetch_game(&self) -> Result<Game, FetchError> {
        self.get_json(CURRENT_GAME_PATH).await
    }
}
