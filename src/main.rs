//! image-gate - upload-and-moderate HTTP gateway binary
//!
//! Loads the layered configuration and runs the server until a
//! shutdown signal arrives. Startup errors (missing bucket, failed
//! bind) log and exit non-zero.

use image_gate::GateConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--version" || arg == "-V") {
        println!("image-gate {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = GateConfig::load()?;

    // Start server
    image_gate::start_server(config).await?;

    Ok(())
}
