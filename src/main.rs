//! Transformix server - HTTP API for file transformations
//!
//! Serves the capability listing and one conversion endpoint per registered
//! capability. All conversion work is delegated to external tools found on
//! PATH.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use transformix_lib::capabilities::CapabilityRegistry;
use transformix_lib::server::{build_router, ServerState, DEFAULT_BODY_LIMIT};
use transformix_lib::tools::is_on_path;

/// Transformix API server
#[derive(Parser)]
#[command(name = "transformix-server")]
#[command(author, version)]
#[command(about = "HTTP API for file conversion and PDF manipulation")]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    bind: String,

    /// Maximum upload body size in MiB
    #[arg(long, default_value = "100")]
    max_upload_mib: usize,
}

/// External tools the capabilities delegate to. A missing tool only disables
/// the conversions that need it, so startup just warns.
const TOOLS: [&str; 6] = ["soffice", "gs", "qpdf", "pdftoppm", "magick", "wkhtmltopdf"];

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    for tool in TOOLS {
        if !is_on_path(tool) {
            log::warn!("{} not found on PATH; conversions that need it will fail", tool);
        }
    }

    let registry = Arc::new(CapabilityRegistry::new());
    log::info!("registered {} capabilities", registry.len());

    let body_limit = cli
        .max_upload_mib
        .checked_mul(1024 * 1024)
        .unwrap_or(DEFAULT_BODY_LIMIT);
    let app = build_router(ServerState::new(registry), body_limit);

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    log::info!("transformix server listening on http://{}", cli.bind);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
