use clap::Parser;
use status_service::{app, parse_allow_origins, AppState, DEFAULT_ALLOW_ORIGINS};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "healthcheck_service")]
#[command(about = "Serves the healthcheck endpoint read by the status page", long_about = None)]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "HEALTHCHECK_BIND", default_value = "0.0.0.0:8000")]
    bind: String,

    /// Name used in the healthy message
    #[arg(short, long, env = "SERVICE_NAME", default_value = "TEMPLATE_PROJECT_NAME")]
    name: String,

    /// Comma-separated list of origins allowed by CORS
    #[arg(long, env = "ALLOW_ORIGINS", default_value = DEFAULT_ALLOW_ORIGINS)]
    allow_origins: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let origins = parse_allow_origins(&args.allow_origins);
    let app = app(AppState::new(args.name.clone()), &origins)?;

    info!("Starting healthcheck service '{}' on {}", args.name, args.bind);
    info!("Endpoints:");
    info!("  GET  /api/v1/healthcheck - Health check with uptime");
    info!("Allowed origins: {}", origins.join(", "));

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
