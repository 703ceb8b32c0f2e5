//! Bridge configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use forza_dualsense_haptics::{EncoderSettings, HapticEncoder};
use serde::{Deserialize, Serialize};

/// Port Forza's Data Out is pointed at.
pub const DEFAULT_TELEMETRY_PORT: u16 = 5300;
/// Port the DualSenseX UDP server listens on.
pub const DEFAULT_DSX_PORT: u16 = 6750;

/// Where to listen, where to forward, and how to encode.
///
/// The defaults are the fixed ports both applications ship with, so a
/// default config needs no setup beyond enabling Data Out in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Local address receiving Forza datagrams.
    pub listen: SocketAddr,
    /// DSX listener.
    pub peer: SocketAddr,
    pub throttle_grip_feedback: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_TELEMETRY_PORT),
            peer: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_DSX_PORT),
            throttle_grip_feedback: false,
        }
    }
}

impl BridgeConfig {
    pub fn with_listen(mut self, listen: SocketAddr) -> Self {
        self.listen = listen;
        self
    }

    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = peer;
        self
    }

    /// Encoder matching this configuration. Instructions address controller 0.
    pub fn encoder(&self) -> HapticEncoder {
        HapticEncoder::new().with_settings(EncoderSettings {
            throttle_grip_feedback: self.throttle_grip_feedback,
        })
    }
}
