use crate::ui;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use status_core::{ReqwestTransport, StatusView, ViewState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct CheckArgs {
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
    pub origin: Option<String>,
    pub title: Option<String>,
    pub single_error: bool,
    pub json: bool,
}

/// Mount the view once and render it until it settles. Returns whether the
/// backend reported healthy.
pub async fn execute(args: CheckArgs) -> Result<bool> {
    let mut config = super::load_config(args.config.as_deref()).await?;
    if let Some(base_url) = args.base_url {
        config = config.base_url(base_url);
    }
    if let Some(origin) = args.origin {
        config = config.origin(origin);
    }
    if let Some(title) = args.title {
        config = config.title(title);
    }
    if args.single_error {
        config = config.mirror_error(false);
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!("Checking {}", status_core::healthcheck_url(&config.base_url));

    let transport = ReqwestTransport::from_config(&config)?;
    let view = StatusView::new(config.clone(), Arc::new(transport));
    let mut mounted = view.mount();

    if args.json {
        let state = mounted.settled().await;
        let report = serde_json::json!({
            "title": config.title,
            "checked_at": chrono::Utc::now(),
            "view": state,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(state.is_ok());
    }

    let loading = mounted.render();
    ui::print_header(&loading.title);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    if let Some(line) = loading.lines.first() {
        pb.set_message(line.text.clone());
    }
    pb.enable_steady_tick(Duration::from_millis(100));

    let state = mounted.settled().await;
    pb.finish_and_clear();

    ui::print_lines(&mounted.render());

    Ok(matches!(state, ViewState::Ok { .. }))
}
