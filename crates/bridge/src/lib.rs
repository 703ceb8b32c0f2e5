//! Forza Data Out → DualSenseX bridge.
//!
//! Listens for Forza telemetry datagrams (UDP 5300 by default), decodes
//! each one, maps tire grip onto the left adaptive trigger and engine RPM
//! onto the light bar, and forwards the resulting JSON command packet to
//! DSX (127.0.0.1:6750 by default).
//!
//! The decode and encode steps live in the `forza-dualsense-telemetry`,
//! `forza-dualsense-haptics` and `forza-dualsense-dsx-protocol` crates;
//! this crate owns the sockets.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod pipeline;
pub mod transport;

pub use config::{BridgeConfig, DEFAULT_DSX_PORT, DEFAULT_TELEMETRY_PORT};
pub use pipeline::{DropReason, translate, translate_to_bytes};
pub use transport::{BridgeStats, RECV_BUFFER_SIZE, TelemetryBridge, Tick};
