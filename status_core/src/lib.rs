pub mod config;
pub mod error;
pub mod fetch;
pub mod transport;
pub mod uptime;
pub mod view;

pub use config::{parse_config_from_file, parse_config_from_str, ViewConfig, BASE_URL_ENV};
pub use error::{Result, StatusError};
pub use fetch::{fetch_health, healthcheck_url, HEALTHCHECK_PATH};
pub use transport::{HealthTransport, RawResponse, ReqwestTransport};
pub use uptime::{HealthcheckResponse, Uptime};
pub use view::{Frame, Line, MountedView, StatusView, Tone, ViewState};

// Re-export commonly used types
pub use async_trait::async_trait;
