//! Example to run the Hive relay standalone
//!
//! Run with: cargo run -p hive-relay --example run_relay

use hive_relay::{run_relay, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = RelayConfig::default();

    println!("Starting Hive relay on port {}", config.port);
    println!("Connect with ws://localhost:{}/ws", config.port);

    run_relay(config).await
}
