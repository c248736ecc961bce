//! HTTP client for the JD open platform router.
//!
//! Every call goes to one endpoint; the method name, credentials, a
//! timestamp and the JSON-encoded business parameters travel as query
//! pairs, together with a signature over all of them. The answer is wrapped
//! in a `{"<method>_response": {...}}` envelope (or `error_response`), which
//! [`JdClient`] unwraps into a [`ProviderResponse`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use md5::{Digest, Md5};
use reqwest::{Client, Url};
use serde_json::Value;

use jdcat_core::AppConfig;

use crate::error::ProviderError;
use crate::provider::{CatalogProvider, CatalogRequest, ProviderResponse};

const DEFAULT_BASE_URL: &str = "https://api.jd.com/routerjson";
const API_VERSION: &str = "2.0";
const SIGN_METHOD: &str = "md5";
const ERROR_ENVELOPE_KEY: &str = "error_response";
/// Envelope suffixes; the router has shipped both spellings.
const ENVELOPE_SUFFIXES: &[&str] = &["_response", "_responce"];

/// Client for the JD open platform router.
///
/// Use [`JdClient::new`] for production or [`JdClient::with_base_url`] to
/// point at a mock server in tests.
pub struct JdClient {
    client: Client,
    app_key: String,
    app_secret: String,
    base_url: Url,
}

impl JdClient {
    /// Creates a client pointed at the production router.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(app_key: &str, app_secret: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(app_key, app_secret, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom router URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        app_key: &str,
        app_secret: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("jdcat/0.1 (catalog-normalizer)")
            .build()?;

        let base_url = Url::parse(base_url.trim()).map_err(|e| ProviderError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            app_key: app_key.to_owned(),
            app_secret: app_secret.to_owned(),
            base_url,
        })
    }

    /// Builds a client from loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`JdClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            &config.jd_app_key,
            &config.jd_app_secret,
            config.request_timeout_secs,
            &config.api_base_url,
        )
    }

    /// Builds the signed request URL for `request` at `timestamp`.
    fn build_url(&self, request: &CatalogRequest, timestamp: &str) -> Url {
        let param_json = request.params().to_string();
        let mut params = vec![
            ("method", request.method()),
            ("app_key", self.app_key.as_str()),
            ("timestamp", timestamp),
            ("v", API_VERSION),
            ("360buy_param_json", param_json.as_str()),
            ("sign_method", SIGN_METHOD),
        ];
        let sign = sign(&self.app_secret, &params);
        params.push(("sign", sign.as_str()));

        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] on network failure or a non-2xx status.
    /// Returns [`ProviderError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url, context: &str) -> Result<Value, ProviderError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[async_trait]
impl CatalogProvider for JdClient {
    async fn execute(&self, request: &CatalogRequest) -> Result<ProviderResponse, ProviderError> {
        let url = self.build_url(request, &router_timestamp());
        let body = self.request_json(&url, &request.describe()).await?;
        let response = unwrap_envelope(request.method(), body)?;
        if !response.is_success() {
            tracing::debug!(
                method = request.method(),
                code = %response.code,
                "provider answered with non-zero code"
            );
        }
        Ok(response)
    }
}

/// Signature over the request parameters: uppercase hex MD5 of
/// `secret + k1 + v1 + k2 + v2 + ... + secret`, keys in ascending order.
fn sign(secret: &str, params: &[(&str, &str)]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_unstable_by_key(|(k, _)| *k);

    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    for (k, v) in sorted {
        hasher.update(k.as_bytes());
        hasher.update(v.as_bytes());
    }
    hasher.update(secret.as_bytes());
    format!("{:X}", hasher.finalize())
}

/// Current time in the router's zone (UTC+8), formatted as it expects.
fn router_timestamp() -> String {
    (Utc::now() + chrono::Duration::hours(8))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Extracts the inner response object and its code from a router envelope.
///
/// # Errors
///
/// Returns [`ProviderError::Envelope`] if neither the method's response key
/// nor `error_response` is present, or the inner object has no code.
fn unwrap_envelope(method: &str, body: Value) -> Result<ProviderResponse, ProviderError> {
    let Value::Object(mut outer) = body else {
        return Err(envelope_error(method, "body is not a JSON object"));
    };

    let prefix = method.replace('.', "_");
    let inner = ENVELOPE_SUFFIXES
        .iter()
        .find_map(|suffix| outer.remove(&format!("{prefix}{suffix}")))
        .or_else(|| outer.remove(ERROR_ENVELOPE_KEY))
        .ok_or_else(|| envelope_error(method, "no response object"))?;

    let code = match inner.get("code") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(envelope_error(method, "response object has no code")),
    };

    Ok(ProviderResponse {
        code,
        payload: inner,
    })
}

fn envelope_error(method: &str, reason: &str) -> ProviderError {
    ProviderError::Envelope {
        method: method.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
