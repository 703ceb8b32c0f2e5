//! forza-dualsense - Forza telemetry to DualSenseX adaptive triggers.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use forza_dualsense_bridge::{BridgeConfig, DEFAULT_DSX_PORT, DEFAULT_TELEMETRY_PORT, TelemetryBridge};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "forza-dualsense")]
#[command(about = "Forward Forza Data Out telemetry to DualSenseX as trigger and light bar commands")]
#[command(version)]
struct Cli {
    /// Address Forza's Data Out sends to
    #[arg(long, default_value_t = SocketAddr::from(([0, 0, 0, 0], DEFAULT_TELEMETRY_PORT)))]
    listen: SocketAddr,

    /// DualSenseX UDP server
    #[arg(long, default_value_t = SocketAddr::from(([127, 0, 0, 1], DEFAULT_DSX_PORT)))]
    peer: SocketAddr,

    /// Apply the grip feedback to the right trigger too
    #[arg(long)]
    throttle_grip_feedback: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> BridgeConfig {
        BridgeConfig {
            listen: self.listen,
            peer: self.peer,
            throttle_grip_feedback: self.throttle_grip_feedback,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "forza_dualsense={log_level},forza_dualsense_bridge={log_level},\
                     forza_dualsense_telemetry={log_level},forza_dualsense_haptics={log_level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut bridge = TelemetryBridge::bind(cli.config()).await?;
    let stats = bridge.run_until(shutdown_signal()).await;
    info!(?stats, "exiting");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Ctrl-C handler unavailable, running until killed: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_defaults_match_config_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["forza-dualsense"])?;
        assert_eq!(cli.config(), BridgeConfig::default());
        assert_eq!(cli.verbose, 0);
        Ok(())
    }

    #[test]
    fn parse_overrides() -> TestResult {
        let cli = Cli::try_parse_from([
            "forza-dualsense",
            "--listen",
            "127.0.0.1:5400",
            "--peer",
            "192.168.1.20:6750",
            "--throttle-grip-feedback",
            "-vv",
        ])?;
        let config = cli.config();
        assert_eq!(config.listen, SocketAddr::from(([127, 0, 0, 1], 5400)));
        assert_eq!(config.peer, SocketAddr::from(([192, 168, 1, 20], 6750)));
        assert!(config.throttle_grip_feedback);
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    #[test]
    fn parse_rejects_controller_flag() {
        assert!(Cli::try_parse_from(["forza-dualsense", "--controller", "1"]).is_err());
    }

    #[test]
    fn parse_rejects_bad_address() {
        assert!(Cli::try_parse_from(["forza-dualsense", "--peer", "not-an-address"]).is_err());
    }
}
