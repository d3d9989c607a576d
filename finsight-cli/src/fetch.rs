//! Client for the account backend's `fetch_transactions` endpoint.

use anyhow::{Context, Result, bail};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, info};

use crate::config::ApiSection;

/// Environment variable holding the backend API key
pub const API_KEY_ENV: &str = "FINSIGHT_API_KEY";
/// Environment variable overriding `api.username`
pub const USERNAME_ENV: &str = "FINSIGHT_USERNAME";

pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    /// Username from the environment or config, API key from the environment only
    pub fn from_env(api: &ApiSection) -> Result<Self> {
        let username = std::env::var(USERNAME_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| api.username.clone())
            .with_context(|| format!("no username: set api.username in config or {USERNAME_ENV}"))?;
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .with_context(|| format!("{API_KEY_ENV} is not set"))?;
        Ok(Self { username, api_key })
    }
}

pub fn endpoint(api: &ApiSection) -> String {
    format!("{}/fetch_transactions", api.base_url.trim_end_matches('/'))
}

/// POST to the backend and return the raw response body.
///
/// Any non-success status is an error; there is no retry.
pub async fn fetch_transactions(api: &ApiSection, creds: &Credentials) -> Result<String> {
    let url = endpoint(api);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        "username",
        HeaderValue::from_str(&creds.username).context("username is not a valid header value")?,
    );
    headers.insert(
        "x-api-key",
        HeaderValue::from_str(&creds.api_key).context("API key is not a valid header value")?,
    );

    debug!(%url, "fetching transactions");
    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .headers(headers)
        .send()
        .await
        .with_context(|| format!("POST {url}"))?;

    let status = resp.status();
    if !status.is_success() {
        bail!("HTTP error! status: {status}");
    }

    let body = resp.text().await.context("read response body")?;
    info!(bytes = body.len(), "fetched transactions");
    Ok(body)
}
