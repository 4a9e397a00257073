use crate::{
    error::{Result, StatusError},
    transport::HealthTransport,
    uptime::HealthcheckResponse,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const HEALTHCHECK_PATH: &str = "/api/v1/healthcheck";

pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Error bodies only need a `message`; anything else is ignored.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Value,
}

impl ErrorBody {
    fn into_message(self) -> String {
        match self.message {
            Value::String(s) if !s.is_empty() => s,
            Value::Number(n) if n.as_f64() == Some(0.0) => UNKNOWN_ERROR.to_string(),
            Value::Null | Value::Bool(false) | Value::String(_) => UNKNOWN_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

pub fn healthcheck_url(base_url: &str) -> String {
    format!("{}{}", base_url, HEALTHCHECK_PATH)
}

/// Issue one healthcheck request and classify the outcome.
pub async fn fetch_health(
    transport: &dyn HealthTransport,
    base_url: &str,
) -> Result<HealthcheckResponse> {
    let url = healthcheck_url(base_url);
    debug!("Requesting healthcheck from '{}'", url);

    let response = transport.get(&url).await.inspect_err(|e| {
        warn!("Healthcheck request failed: {}", e);
    })?;
    let status = response.status;

    if response.is_success() {
        serde_json::from_slice::<HealthcheckResponse>(&response.body).map_err(|e| {
            warn!("Healthcheck returned {} with an unreadable body: {}", status, e);
            StatusError::MalformedBody {
                status,
                message: e.to_string(),
            }
        })
    } else {
        let body: ErrorBody =
            serde_json::from_slice(&response.body).map_err(|e| StatusError::MalformedBody {
                status,
                message: e.to_string(),
            })?;
        let message = body.into_message();
        warn!("Healthcheck returned {}: {}", status, message);
        Err(StatusError::Application { status, message })
    }
}
