use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "NEXT_PUBLIC_API_BASE_URL";

pub const DEFAULT_TITLE: &str = "TEMPLATE_PROJECT_NAME";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewConfig {
    /// Prefix of the healthcheck URL. Empty means relative to `origin`.
    pub base_url: String,
    /// Origin used to resolve a relative healthcheck URL.
    pub origin: Option<String>,
    pub title: String,
    /// Repeat the error message under the status line.
    pub mirror_error: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            origin: None,
            title: DEFAULT_TITLE.to_string(),
            mirror_error: true,
        }
    }
}

/// TOML files keep the view settings under a `[view]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfigFile {
    pub view: ViewConfig,
}

impl ViewConfig {
    /// Overlay `NEXT_PUBLIC_API_BASE_URL`, if set.
    pub fn with_env(self) -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) => self.base_url(base_url),
            Err(_) => self,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn mirror_error(mut self, mirror_error: bool) -> Self {
        self.mirror_error = mirror_error;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("View title cannot be empty".to_string());
        }

        if let Some(origin) = &self.origin {
            if !origin.contains("://") {
                return Err(format!("Origin '{}' must be an absolute URL", origin));
            }
        }

        Ok(())
    }
}

pub async fn parse_config_from_file(path: impl AsRef<Path>) -> Result<ViewConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        _ => Err(anyhow::anyhow!(
            "Unsupported file format. Use .yaml, .yml, .toml, or .json"
        )),
    }
}

pub fn parse_config_from_str(content: &str, format: &str) -> Result<ViewConfig> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => parse_yaml(content),
        "toml" => parse_toml(content),
        "json" => parse_json(content),
        _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
    }
}

fn parse_yaml(content: &str) -> Result<ViewConfig> {
    let config: ViewConfig = serde_yaml::from_str(content)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

fn parse_toml(content: &str) -> Result<ViewConfig> {
    let file: ViewConfigFile = toml::from_str(content)?;
    file.view.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(file.view)
}

fn parse_json(content: &str) -> Result<ViewConfig> {
    let config: ViewConfig = serde_json::from_str(content)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}
