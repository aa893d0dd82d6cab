//! HTTP client wrapper: default headers plus bounded retry for idempotent
//! reads.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use teor_logging::harvest_warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    #[error("network failure after {attempts} attempt(s): {message}")]
    Network { attempts: u32, message: String },

    #[error("http status {status} for {url}")]
    Status { status: u16, url: String },
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    /// Per-request timeout for metadata calls. Document downloads get
    /// twice this, to tolerate large bodies.
    pub request_timeout: Duration,
    /// Total attempts for a GET, including the first one.
    pub max_attempts: u32,
    /// First backoff interval; doubles on every further retry.
    pub backoff_base: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_attempts: 6,
            backoff_base: Duration::from_millis(500),
            user_agent: "teor-harvester/0.1 (+https://github.com/cebrap-lab)".to_string(),
        }
    }
}

/// A configured, injectable HTTP client.
///
/// Declares JSON acceptance and a fixed identifying User-Agent on every
/// request. Retries are applied to GETs only, for transport failures and
/// for the usual transient status codes, and never mutate any local state.
pub struct HttpClient {
    client: Client,
    settings: HttpSettings,
}

impl HttpClient {
    pub fn new(settings: HttpSettings) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(&settings.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|err| HttpError::Build(err.to_string()))?;

        Ok(Self { client, settings })
    }

    /// GET with retry; returns the final response whatever its status, so
    /// callers can treat non-2xx as a soft failure where appropriate.
    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response, HttpError> {
        self.get_with(url, query, None, None).await
    }

    /// GET that turns a non-2xx final status into `HttpError::Status`.
    pub async fn get_ok(&self, url: &str, query: &[(&str, String)]) -> Result<Response, HttpError> {
        let response = self.get(url, query).await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }

    /// GET intended for streaming a document body: accepts anything and
    /// doubles the request timeout. The body is not read here; callers
    /// consume it via `Response::bytes_stream`.
    pub async fn get_stream(&self, url: &str) -> Result<Response, HttpError> {
        self.get_with(url, &[], Some("*/*"), Some(self.settings.request_timeout * 2))
            .await
    }

    async fn get_with(
        &self,
        url: &str,
        query: &[(&str, String)],
        accept: Option<&'static str>,
        timeout: Option<Duration>,
    ) -> Result<Response, HttpError> {
        let mut attempt = 0u32;
        let mut backoff = self.settings.backoff_base;

        loop {
            attempt += 1;

            let mut request = self.client.get(url);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(accept) = accept {
                request = request.header(ACCEPT, accept);
            }
            if let Some(timeout) = timeout {
                request = request.timeout(timeout);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if !is_retryable_status(status) || attempt >= self.settings.max_attempts {
                        return Ok(response);
                    }
                    harvest_warn!(
                        "GET {} returned {}, retrying (attempt {}/{})",
                        url,
                        status,
                        attempt,
                        self.settings.max_attempts
                    );
                }
                Err(err) => {
                    let transient = err.is_timeout() || err.is_connect();
                    if !transient || attempt >= self.settings.max_attempts {
                        return Err(HttpError::Network {
                            attempts: attempt,
                            message: err.to_string(),
                        });
                    }
                    harvest_warn!(
                        "GET {} failed ({}), retrying (attempt {}/{})",
                        url,
                        err,
                        attempt,
                        self.settings.max_attempts
                    );
                }
            }

            tokio::time::sleep(backoff).await;
            backoff *= 2;
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}
