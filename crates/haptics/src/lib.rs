//! Haptic policy for the Forza → DualSenseX bridge.
//!
//! Turns one decoded [`TelemetryRecord`](forza_dualsense_telemetry::TelemetryRecord)
//! into one DSX [`CommandPacket`](forza_dualsense_dsx_protocol::CommandPacket):
//!
//! - left trigger resistance follows tire grip (see [`grip`])
//! - light bar green follows engine speed (see [`lightbar`])
//! - right trigger holds full resistance, or mirrors the grip policy when
//!   [`EncoderSettings::throttle_grip_feedback`] is set
//!
//! ```
//! use forza_dualsense_haptics::encode;
//! use forza_dualsense_telemetry::TelemetryRecord;
//!
//! let record = TelemetryRecord {
//!     engine_max_rpm: 7000.0,
//!     current_engine_rpm: 3500.0,
//!     ..TelemetryRecord::default()
//! };
//! let packet = encode(&record);
//! assert_eq!(packet.len(), 3);
//! ```

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod curves;
pub mod encoder;
pub mod grip;
pub mod lightbar;

pub use curves::map_range;
pub use encoder::{EncoderSettings, HapticEncoder, encode};
pub use grip::{combined_slip, grip_trigger_mode, vibrate_frequency};
pub use lightbar::rpm_green;
