//! PostgREST client shared by the hosted-table adapters.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RestConfig::new("https://project.example.co", anon_key)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = RestClient::new(config)?;
//! client.set_access_token(Some(session_token));
//! ```
//!
//! Every request carries the `apikey` header. The bearer token is the signed-in
//! user's access token when one is set, otherwise the anon key, which is what
//! row-level security on the hosted tables expects.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::config::BackendConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::RemoteProfileError;

/// Path prefix of the REST interface on the hosted backend.
const REST_PREFIX: &str = "/rest/v1";

/// Errors from the REST transport
#[derive(Debug, Clone, thiserror::Error)]
pub enum RestError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Not authorized")]
    Unauthorized,

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<RestError> for RemoteProfileError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Unauthorized => RemoteProfileError::Unauthorized,
            RestError::Status { status, body } => RemoteProfileError::Status { status, body },
            RestError::Decode(msg) => RemoteProfileError::Decode(msg),
            other => RemoteProfileError::Network(other.to_string()),
        }
    }
}

impl From<RestError> for DomainError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Unauthorized => DomainError::new(ErrorCode::Unauthorized, err.to_string()),
            RestError::Status { status, .. } => {
                DomainError::backend(err.to_string()).with_detail("status", status.to_string())
            }
            other => DomainError::backend(other.to_string()),
        }
    }
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, without the `/rest/v1` suffix.
    pub base_url: String,
    anon_key: Secret<String>,
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: Secret::new(anon_key.into()),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn anon_key(&self) -> &str {
        self.anon_key.expose_secret()
    }
}

impl From<&BackendConfig> for RestConfig {
    fn from(config: &BackendConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            timeout: config.request_timeout(),
        }
    }
}

/// Thin PostgREST client. Cheap to clone; clones share the access token.
#[derive(Debug, Clone)]
pub struct RestClient {
    config: RestConfig,
    http: Client,
    access_token: Arc<RwLock<Option<Secret<String>>>>,
}

impl RestClient {
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RestError::Client(e.to_string()))?;

        Ok(Self {
            config,
            http,
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Set or clear the signed-in user's access token.
    pub fn set_access_token(&self, token: Option<String>) {
        let mut slot = self
            .access_token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = token.map(Secret::new);
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}{}/{}", self.config.base_url, REST_PREFIX, table)
    }

    fn bearer(&self) -> String {
        let slot = self
            .access_token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match slot.as_ref() {
            Some(token) => token.expose_secret().clone(),
            None => self.config.anon_key().to_string(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.bearer())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RestError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RestError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                RestError::Network(format!("Connection failed: {}", e))
            } else {
                RestError::Network(e.to_string())
            }
        })?;
        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<Response, RestError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RestError::Unauthorized),
            _ => Err(RestError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// `GET /rest/v1/<table>?<query>` decoded as a JSON array of rows.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, RestError> {
        let response = self
            .send(self.request(Method::GET, table).query(query))
            .await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| RestError::Decode(e.to_string()))
    }

    /// Exact row count from the `Content-Range` header of a `HEAD` request.
    pub async fn count(&self, table: &str, query: &[(&str, String)]) -> Result<u64, RestError> {
        let response = self
            .send(
                self.request(Method::HEAD, table)
                    .header("Prefer", "count=exact")
                    .query(query),
            )
            .await?;

        let range = response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| RestError::Decode("missing Content-Range header".to_string()))?;
        parse_content_range_total(range)
    }

    pub async fn insert<B: Serialize + ?Sized>(&self, table: &str, body: &B) -> Result<(), RestError> {
        self.send(
            self.request(Method::POST, table)
                .header("Prefer", "return=minimal")
                .json(body),
        )
        .await?;
        Ok(())
    }

    /// Insert or merge on primary key.
    pub async fn upsert<B: Serialize + ?Sized>(&self, table: &str, body: &B) -> Result<(), RestError> {
        self.send(
            self.request(Method::POST, table)
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(body),
        )
        .await?;
        Ok(())
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<(), RestError> {
        self.send(
            self.request(Method::PATCH, table)
                .header("Prefer", "return=minimal")
                .query(query)
                .json(body),
        )
        .await?;
        Ok(())
    }
}

/// PostgREST equality filter value, e.g. `eq.<id>`.
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// Total from a `Content-Range` value such as `0-24/3573` or `*/0`.
fn parse_content_range_total(range: &str) -> Result<u64, RestError> {
    range
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse::<u64>().ok())
        .ok_or_else(|| RestError::Decode(format!("unparseable Content-Range: {}", range)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Row {
        id: String,
    }

    fn client_for(server: &MockServer) -> RestClient {
        RestClient::new(RestConfig::new(server.uri(), "anon-key")).unwrap()
    }

    #[test]
    fn config_strips_trailing_slash() {
        let config = RestConfig::new("https://backend.example.co/", "k")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://backend.example.co");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.anon_key(), "k");
    }

    #[test]
    fn content_range_total_is_parsed() {
        assert_eq!(parse_content_range_total("0-24/3573").unwrap(), 3573);
        assert_eq!(parse_content_range_total("*/0").unwrap(), 0);
        assert!(parse_content_range_total("*/*").is_err());
    }

    #[tokio::test]
    async fn anon_key_is_bearer_until_a_token_is_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/profiles"))
            .and(header("authorization", "Bearer user-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "id": "u1" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let rows: Vec<Row> = client.select("profiles", &[]).await.unwrap();
        assert!(rows.is_empty());

        client.set_access_token(Some("user-token".to_string()));
        let rows: Vec<Row> = client.select("profiles", &[]).await.unwrap();
        assert_eq!(rows[0].id, "u1");
    }

    #[tokio::test]
    async fn unauthorized_status_is_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .select::<Row>("profiles", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RestError::Unauthorized));
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .select::<Row>("profiles", &[])
            .await
            .unwrap_err();
        match err {
            RestError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn count_reads_content_range() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/rest/v1/profiles"))
            .and(header("prefer", "count=exact"))
            .and(query_param("select", "*"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-range", "0-9/42"))
            .mount(&server)
            .await;

        let total = client_for(&server)
            .count("profiles", &[("select", "*".to_string())])
            .await
            .unwrap();
        assert_eq!(total, 42);
    }

    #[test]
    fn rest_errors_map_into_port_errors() {
        assert!(matches!(
            RemoteProfileError::from(RestError::Unauthorized),
            RemoteProfileError::Unauthorized
        ));
        assert!(matches!(
            RemoteProfileError::from(RestError::Timeout { timeout_secs: 3 }),
            RemoteProfileError::Network(_)
        ));
        let domain = DomainError::from(RestError::Status {
            status: 500,
            body: String::new(),
        });
        assert_eq!(domain.code, ErrorCode::BackendError);
        assert_eq!(domain.details.get("status").map(String::as_str), Some("500"));
    }
}
