//! # Remote Store Client
//!
//! HTTP client for the backend that persists each user's hierarchy
//! snapshot. The backend exposes bearer-token auth, a whole-snapshot
//! get/put pair, and a backup-restore endpoint; the client never blocks
//! the rendering path, which always reads the in-memory store.
//!
//! The backend location is auto-detected by probing the usual local
//! candidates, falling back to the default port when nothing answers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{TrackError, TrackResult};
use crate::model::Store;

/// Default backend when detection fails.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:10000";

/// Candidate URLs probed during backend detection, in order.
pub const CANDIDATE_BACKEND_URLS: [&str; 4] = [
    "http://localhost:10000",
    "http://127.0.0.1:10000",
    "http://localhost:10001",
    "http://127.0.0.1:10001",
];

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Probe the candidate URLs and return the first backend that answers.
///
/// Each probe is a plain GET on the base URL with a short timeout; any
/// successful status wins. Falls back to [`DEFAULT_BACKEND_URL`].
pub fn detect_backend_url() -> String {
    let client = match reqwest::blocking::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
    {
        Ok(c) => c,
        Err(_) => return DEFAULT_BACKEND_URL.to_string(),
    };

    for base in CANDIDATE_BACKEND_URLS {
        match client.get(format!("{}/", base)).send() {
            Ok(res) if res.status().is_success() => {
                debug!(backend = base, "backend detected");
                return base.to_string();
            }
            _ => continue,
        }
    }

    warn!(default = DEFAULT_BACKEND_URL, "backend detection failed, using default");
    DEFAULT_BACKEND_URL.to_string()
}

/// Client for the remote store backend.
///
/// Holds the bearer token after a successful login or registration; the
/// session discards the token (via [`RemoteStore::clear_token`]) whenever
/// an auth error comes back.
pub struct RemoteStore {
    base_url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl RemoteStore {
    /// Create a client against an explicit backend URL.
    pub fn new(base_url: impl Into<String>) -> TrackResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TrackError::remote("client setup", e.to_string()))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(RemoteStore {
            base_url,
            token: None,
            client,
        })
    }

    /// Create a client against the auto-detected backend.
    pub fn auto() -> TrackResult<Self> {
        RemoteStore::new(detect_backend_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Discard the bearer token, returning the client to a logged-out state.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> TrackResult<&str> {
        self.token.as_deref().ok_or(TrackError::AuthFailed {
            reason: "Not logged in".to_string(),
        })
    }

    /// Log in and keep the returned bearer token.
    pub fn login(&mut self, username: &str, password: &str) -> TrackResult<()> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() {
            return Err(TrackError::missing_field("username"));
        }
        if password.is_empty() {
            return Err(TrackError::missing_field("password"));
        }
        self.authenticate("/api/auth/login", username, password)
    }

    /// Register a new account and keep the returned bearer token.
    pub fn register(&mut self, username: &str, password: &str, confirm: &str) -> TrackResult<()> {
        let username = username.trim();
        let password = password.trim();
        let confirm = confirm.trim();
        if username.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(TrackError::missing_field("username/password"));
        }
        if password != confirm {
            return Err(TrackError::invalid_input(
                "confirm",
                "***",
                "Passwords do not match",
            ));
        }
        if password.len() < 4 {
            return Err(TrackError::invalid_input(
                "password",
                "***",
                "Password must be at least 4 characters",
            ));
        }
        if username.len() < 3 {
            return Err(TrackError::invalid_input(
                "username",
                username,
                "Username must be at least 3 characters",
            ));
        }
        self.authenticate("/api/auth/register", username, password)
    }

    fn authenticate(&mut self, path: &str, username: &str, password: &str) -> TrackResult<()> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(&Credentials { username, password })
            .send()
            .map_err(|e| TrackError::remote("authentication", e.to_string()))?;

        let status = response.status();
        let body: AuthResponse = response.json().unwrap_or(AuthResponse {
            token: None,
            error: None,
        });

        if status.is_success() {
            if let Some(token) = body.token {
                self.token = Some(token);
                return Ok(());
            }
        }

        Err(TrackError::AuthFailed {
            reason: body
                .error
                .unwrap_or_else(|| format!("server returned {}", status)),
        })
    }

    /// Fetch the current user's full hierarchy snapshot.
    pub fn fetch_snapshot(&self) -> TrackResult<Store> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(self.endpoint("/api/data"))
            .bearer_auth(token)
            .send()
            .map_err(|e| TrackError::remote("fetch snapshot", e.to_string()))?;

        let response = Self::check_status("fetch snapshot", response)?;
        response
            .json()
            .map_err(|e| TrackError::remote("fetch snapshot", e.to_string()))
    }

    /// Replace the remote snapshot with the given store.
    ///
    /// Callers treat this as best-effort: the session swallows failures and
    /// retries on the next flush.
    pub fn push_snapshot(&self, store: &Store) -> TrackResult<()> {
        let token = self.bearer()?;
        let response = self
            .client
            .put(self.endpoint("/api/data"))
            .bearer_auth(token)
            .json(store)
            .send()
            .map_err(|e| TrackError::remote("push snapshot", e.to_string()))?;

        Self::check_status("push snapshot", response)?;
        Ok(())
    }

    /// Send an imported backup to the restore endpoint and return the
    /// merged snapshot that now lives on the backend.
    pub fn restore(&self, backup: &Store) -> TrackResult<Store> {
        let token = self.bearer()?;
        let response = self
            .client
            .post(self.endpoint("/api/backup/restore"))
            .bearer_auth(token)
            .json(backup)
            .send()
            .map_err(|e| TrackError::remote("restore", e.to_string()))?;

        let response = Self::check_status("restore", response)?;
        response
            .json()
            .map_err(|e| TrackError::remote("restore", e.to_string()))
    }

    fn check_status(
        operation: &str,
        response: reqwest::blocking::Response,
    ) -> TrackResult<reqwest::blocking::Response> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TrackError::AuthFailed {
                reason: "Session expired".to_string(),
            });
        }
        if !status.is_success() {
            return Err(TrackError::remote(
                operation,
                format!("server returned {}", status),
            ));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let remote = RemoteStore::new("http://localhost:10000///").unwrap();
        assert_eq!(remote.base_url(), "http://localhost:10000");
        assert_eq!(remote.endpoint("/api/data"), "http://localhost:10000/api/data");
    }

    #[test]
    fn test_login_requires_credentials() {
        let mut remote = RemoteStore::new(DEFAULT_BACKEND_URL).unwrap();
        assert_eq!(
            remote.login("", "secret").unwrap_err().error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            remote.login("mason", "  ").unwrap_err().error_code(),
            "MISSING_FIELD"
        );
    }

    #[test]
    fn test_register_validation() {
        let mut remote = RemoteStore::new(DEFAULT_BACKEND_URL).unwrap();
        assert_eq!(
            remote
                .register("mason", "abcd", "abce")
                .unwrap_err()
                .error_code(),
            "INVALID_INPUT"
        );
        assert!(remote.register("mason", "abc", "abc").is_err());
        assert!(remote.register("ma", "abcd", "abcd").is_err());
    }

    #[test]
    fn test_unauthenticated_requests_fail_fast() {
        let remote = RemoteStore::new(DEFAULT_BACKEND_URL).unwrap();
        let error = remote.fetch_snapshot().unwrap_err();
        assert!(error.invalidates_session());
        assert!(remote.push_snapshot(&Store::default()).is_err());
    }

    #[test]
    fn test_auth_response_parsing() {
        let ok: AuthResponse = serde_json::from_str(r#"{"token":"abc123"}"#).unwrap();
        assert_eq!(ok.token.as_deref(), Some("abc123"));
        let err: AuthResponse = serde_json::from_str(r#"{"error":"bad password"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("bad password"));
    }
}
