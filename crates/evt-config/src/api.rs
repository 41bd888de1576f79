//! Remote API endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_graphql_path() -> String {
    "/graphql/".to_string()
}

fn default_download_path() -> String {
    "/download/".to_string()
}

fn default_csrf_cookie() -> String {
    "csrftoken".to_string()
}

fn default_csrf_header() -> String {
    "X-CSRFToken".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Origin serving both the GraphQL endpoint and the export resource.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the single query/mutation endpoint.
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Path of the participant export resource.
    #[serde(default = "default_download_path")]
    pub download_path: String,

    /// Name of the anti-forgery cookie set by the server.
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,

    /// Header echoing the anti-forgery cookie on every request.
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            graphql_path: default_graphql_path(),
            download_path: default_download_path(),
            csrf_cookie: default_csrf_cookie(),
            csrf_header: default_csrf_header(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Full URL of the GraphQL endpoint.
    #[must_use]
    pub fn graphql_url(&self) -> String {
        join_url(&self.base_url, &self.graphql_path)
    }

    /// Full URL of the export resource, without query parameters.
    #[must_use]
    pub fn download_url(&self) -> String {
        join_url(&self.base_url, &self.download_path)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim();
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{base}/{}", path.trim_start_matches('/'))
    }
}
