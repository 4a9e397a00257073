pub mod check;
pub mod validate;

use anyhow::Result;
use status_core::{parse_config_from_file, ViewConfig};
use std::path::Path;

/// Defaults, then the config file, then `NEXT_PUBLIC_API_BASE_URL`.
pub async fn load_config(config_file: Option<&Path>) -> Result<ViewConfig> {
    let config = match config_file {
        Some(path) => parse_config_from_file(path).await?,
        None => ViewConfig::default(),
    };
    Ok(config.with_env())
}
