//! Internal HTTP client that handles request signing and API version
//! negotiation.

use crate::core::domain::{
    error::{MaasError, MaasResult},
    value_object::{ApiKey, ApiVersion},
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use url::Url;

/// The API versions this client knows how to decode, in preference order.
/// Negotiation walks this list until the region controller answers.
const SUPPORTED_API_VERSIONS: &[&str] = &["2.0"];

/// Rate limiting configuration for outgoing requests.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

/// Client-level configuration. Rate limiting is off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientConfig {
    pub rate_limit: Option<RateLimitConfig>,
}

/// The version endpoint's payload.
#[derive(Debug, Deserialize)]
struct VersionResponse {
    version: String,
    #[serde(default)]
    subversion: String,
    #[serde(default)]
    capabilities: Vec<String>,
}

/// Internal HTTP client for the MAAS region API.
///
/// Every request carries an OAuth 1.0 `Authorization` header built from the
/// API key triple (MAAS uses the PLAINTEXT signature method, so the header
/// is pure string assembly, no HMAC). The negotiated controller version is
/// what the decoding core dispatches on; the path version stays at the
/// supported version string that answered during negotiation.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
    api_key: ApiKey,
    path_version: &'static str,
    api_version: ApiVersion,
    subversion: String,
    capabilities: Vec<String>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Connects to a region controller and negotiates the API version.
    ///
    /// # Errors
    ///
    /// Returns `MaasError::Connection` if the controller is unreachable or
    /// answers none of the supported versions, and
    /// `MaasError::Authentication` if the API key is rejected.
    pub async fn connect(
        base_url: Url,
        api_key: ApiKey,
        config: ClientConfig,
    ) -> MaasResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| MaasError::Connection(e.to_string()))?;

        let rate_limiter = config.rate_limit.map(|rl| {
            let per_second =
                NonZeroU32::new(rl.requests_per_second).unwrap_or(NonZeroU32::MIN);
            let burst = NonZeroU32::new(rl.burst_size).unwrap_or(NonZeroU32::MIN);
            let quota = Quota::per_second(per_second).allow_burst(burst);
            Arc::new(DefaultDirectRateLimiter::direct(quota))
        });

        for &candidate in SUPPORTED_API_VERSIONS {
            let url = endpoint(&base_url, candidate, "version/", None);
            debug!(%url, "negotiating API version");
            let response = http_client
                .get(&url)
                .header("Authorization", oauth_header(&api_key))
                .send()
                .await
                .map_err(|e| MaasError::Connection(format!("HTTP request failed: {}", e)))?;

            match response.status() {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(MaasError::Authentication(format!(
                        "API key rejected by {}",
                        base_url
                    )));
                }
                StatusCode::NOT_FOUND => continue,
                status if status.is_success() => {
                    let info: VersionResponse = response.json().await.map_err(|e| {
                        MaasError::Connection(format!("Failed to parse version response: {}", e))
                    })?;
                    let api_version = ApiVersion::parse(&info.version)?;
                    debug!(%api_version, "negotiated");
                    return Ok(Self {
                        http_client,
                        base_url,
                        api_key,
                        path_version: candidate,
                        api_version,
                        subversion: info.subversion,
                        capabilities: info.capabilities,
                        rate_limiter,
                    });
                }
                status => {
                    let body = response.text().await.unwrap_or_else(|_| "unknown".to_string());
                    return Err(MaasError::Connection(format!(
                        "API error ({}): {}",
                        status, body
                    )));
                }
            }
        }

        Err(MaasError::Connection(format!(
            "{} supports none of the API versions known to this client ({})",
            base_url,
            SUPPORTED_API_VERSIONS.join(", ")
        )))
    }

    /// The controller's negotiated API version; decode dispatch keys on it.
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    pub fn subversion(&self) -> &str {
        &self.subversion
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Performs a signed GET and returns the parsed JSON body.
    pub async fn get(&self, path: &str) -> MaasResult<Value> {
        self.request(path, None).await
    }

    /// Performs a signed GET with an `op` query parameter.
    pub async fn get_op(&self, path: &str, op: &str) -> MaasResult<Value> {
        self.request(path, Some(op)).await
    }

    async fn request(&self, path: &str, op: Option<&str>) -> MaasResult<Value> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = endpoint(&self.base_url, self.path_version, path, op);
        debug!(%url, "GET");

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", oauth_header(&self.api_key))
            .send()
            .await
            .map_err(|e| MaasError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(MaasError::Authentication(format!(
                "API key rejected ({})",
                status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(MaasError::Connection(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| MaasError::Connection(format!("Failed to parse response: {}", e)))
    }
}

fn endpoint(base: &Url, version: &str, path: &str, op: Option<&str>) -> String {
    let mut url = format!(
        "{}/api/{}/{}",
        base.as_str().trim_end_matches('/'),
        version,
        path.trim_start_matches('/')
    );
    if let Some(op) = op {
        url.push_str("?op=");
        url.push_str(op);
    }
    url
}

/// Builds the OAuth 1.0 PLAINTEXT `Authorization` header MAAS expects.
fn oauth_header(key: &ApiKey) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!(
        "OAuth oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
         oauth_consumer_key=\"{}\", oauth_token=\"{}\", oauth_signature=\"&{}\", \
         oauth_nonce=\"{}\", oauth_timestamp=\"{}\"",
        key.consumer_key(),
        key.token_key(),
        key.token_secret(),
        now.as_nanos(),
        now.as_secs()
    )
}
