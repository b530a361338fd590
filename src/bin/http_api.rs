use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};

use warden::config::Config;
use warden::http_server::start_http_server;
use warden::prefix_store::PrefixStore;

/// Serves the prefix API without connecting to the gateway.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("🚀 Starting Warden prefix API...");

    let store = PrefixStore::load(&config.prefix_store_path).await?;
    info!("✅ Prefix store loaded from {}", config.prefix_store_path);

    if let Err(e) = start_http_server(store, config.http_port).await {
        error!("❌ HTTP server failed: {}", e);
        return Err(e);
    }

    Ok(())
}
