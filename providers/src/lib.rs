//! Providers for the checklist template and the current game.
//!
//! - [`HttpProvider`] talks to the checklist backend: `GET {base}/checklists`
//!   returns the raw template, `GET {base}/current-game` returns the active game.
//! - [`FileTemplateProvider`] reads the raw template from a local JSON file.
//!
//! Providers hand back the template as untyped JSON. Shape detection and
//! defaulting happen later, in `gameday_core::normalize`. Nothing here retries;
//! callers recover from a [`FetchError`] with defaults.

mod file;
mod http;

use std::future::Future;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use gameday_types::Game;

pub use file::FileTemplateProvider;
pub use http::{HttpProvider, http_client_with_timeout};

pub use gameday_types;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read template at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in template at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Source of the raw checklist template.
pub trait TemplateProvider {
    fn fetch_template(&self) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Source of the active game.
pub trait GameProvider {
    fn fetch_game(&self) -> impl Future<Output = Result<Game, FetchError>> + Send;
}

fn truncate_error_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &body[..end])
}
