//! Server command - start the turn relay
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_relay(), start_relay()
//! - Level 3: (delegated to hive-relay crate)
//! - Level 4: configuration validation

use anyhow::Result;
use clap::Args;

use hive_relay::{run_relay, RelayConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "3001")]
    pub port: u16,

    /// Browser origin allowed to connect ("*" allows any)
    #[arg(long, default_value = "http://localhost:3000")]
    pub allowed_origin: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure relay
/// 2. Start relay (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_relay(&args)?;

    tracing::info!("Starting Hive relay on port {}", config.port);

    start_relay(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Build relay config from command arguments
fn configure_relay(args: &ServerArgs) -> Result<RelayConfig> {
    let allowed_origin = validate_origin(&args.allowed_origin)?;

    Ok(RelayConfig {
        port: args.port,
        allowed_origin,
    })
}

/// Start the relay (blocking)
fn start_relay(config: RelayConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_relay(config).await })
}

// ============================================================================
// LEVEL 4 - VALIDATION
// ============================================================================

/// `*` means any origin; anything else must look like `scheme://host`
fn validate_origin(origin: &str) -> Result<Option<String>> {
    if origin == "*" {
        tracing::warn!("Relay accepts connections from any origin");
        return Ok(None);
    }
    if !origin.contains("://") {
        anyhow::bail!("Allowed origin must include a scheme: {}", origin);
    }

    Ok(Some(origin.trim_end_matches('/').to_string()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_relay_defaults() {
        let args = ServerArgs {
            port: 3001,
            allowed_origin: "http://localhost:3000/".to_string(),
        };

        let config = configure_relay(&args).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.allowed_origin.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_wildcard_origin() {
        assert_eq!(validate_origin("*").unwrap(), None);
    }

    #[test]
    fn test_origin_without_scheme_rejected() {
        assert!(validate_origin("localhost:3000").is_err());
    }
}
