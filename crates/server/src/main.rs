//! GHG Emission Predictor Server
//!
//! Loads the fitted scaler and model, then serves predictions over HTTP.
//! Exits non-zero without binding if either artifact fails to load.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
