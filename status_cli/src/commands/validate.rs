use crate::ui;
use anyhow::Result;
use colored::Colorize;
use status_core::{healthcheck_url, parse_config_from_file, ViewState};
use std::path::PathBuf;

pub async fn execute(config_file: PathBuf) -> Result<()> {
    println!("{}", "=== Validating View Config ===".bold().cyan());
    println!("File: {}", config_file.display());

    match parse_config_from_file(&config_file).await {
        Ok(config) => {
            println!("\n{}", "✓ Config is valid!".green().bold());
            println!("\nView Details:");
            println!("  Title: {}", config.title);
            println!("  Request: GET {}", healthcheck_url(&config.base_url));
            if let Some(origin) = &config.origin {
                println!("  Origin: {}", origin);
            }
            println!("  Mirror error line: {}", config.mirror_error);

            if config.base_url.is_empty() && config.origin.is_none() {
                println!(
                    "\n{}",
                    "⚠ Warning: no base_url or origin, the request URL is relative".yellow()
                );
            }

            println!("\nPreview:");
            ui::print_frame(&ViewState::Loading.render(&config));

            Ok(())
        }
        Err(e) => {
            println!("\n{}", "✗ Config is invalid!".red().bold());
            println!("\nError: {}", e);
            Err(e)
        }
    }
}
