use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use backend_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "pulse-backend")]
#[command(about = "Campus Pulse registration and check-in server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("PULSE_CONFIG", config);
    }

    let config = AppConfig::load().await?;
    let _log_guard = backend_bootstrap::logging::init(config.log_dir.as_deref());
    match &config.source {
        Some(path) => info!("loaded config from {}", path.display()),
        None => warn!("config file not found, using defaults"),
    }

    backend_bootstrap::run_standalone(config).await
}
