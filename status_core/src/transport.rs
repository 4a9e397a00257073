use crate::{config::ViewConfig, error::Result, error::StatusError};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

/// A response as seen by the view: the status line and the undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// 2xx-class responses are the only successful ones.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues the single GET the status view needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthTransport: Send + Sync {
    /// Fetch `url`. Errors are [`StatusError::Transport`] when no response
    /// arrived at all.
    async fn get(&self, url: &str) -> Result<RawResponse>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    origin: Option<Url>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            origin: None,
        }
    }

    /// Relative request URLs are resolved against `origin`.
    pub fn with_origin(origin: &str) -> Result<Self> {
        let origin = Url::parse(origin)
            .map_err(|e| StatusError::InvalidConfig(format!("Invalid origin '{}': {}", origin, e)))?;
        Ok(Self {
            client: reqwest::Client::new(),
            origin: Some(origin),
        })
    }

    pub fn from_config(config: &ViewConfig) -> Result<Self> {
        match &config.origin {
            Some(origin) => Self::with_origin(origin),
            None => Ok(Self::new()),
        }
    }

    fn resolve(&self, url: &str) -> Result<Url> {
        match (Url::parse(url), &self.origin) {
            (Ok(url), _) => Ok(url),
            (Err(_), Some(origin)) => origin
                .join(url)
                .map_err(|e| StatusError::Transport(e.to_string())),
            (Err(e), None) => Err(StatusError::Transport(format!("{}: '{}'", e, url))),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        let url = self.resolve(url)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StatusError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| StatusError::MalformedBody {
                status,
                message: e.to_string(),
            })?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(199, "").is_success());
        assert!(!RawResponse::new(301, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }

    #[test]
    fn test_relative_url_resolves_against_origin() {
        let transport = ReqwestTransport::with_origin("http://localhost:8000").unwrap();
        let url = transport.resolve("/api/v1/healthcheck").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/healthcheck");

        let url = transport.resolve("http://example.com/api/v1/healthcheck").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_relative_url_without_origin_is_transport_failure() {
        let err = ReqwestTransport::new()
            .resolve("/api/v1/healthcheck")
            .unwrap_err();
        assert!(matches!(err, StatusError::Transport(_)));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_invalid_origin_rejected() {
        assert!(matches!(
            ReqwestTransport::with_origin("not a url"),
            Err(StatusError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let transport = ReqwestTransport::new();
        let err = transport
            .get("http://127.0.0.1:1/api/v1/healthcheck")
            .await
            .unwrap_err();
        assert!(matches!(err, StatusError::Transport(_)));
    }
}
