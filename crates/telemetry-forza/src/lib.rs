//! Forza Motorsport / Forza Horizon "Data Out" telemetry decoding.
//!
//! Supports the packet variants Forza emits over UDP:
//!
//! - **Sled** (232 bytes): physics only. Recognised but rejected, since it
//!   carries no dash section.
//! - **CarDash** (311 bytes): Sled plus dashboard and driver-input fields.
//! - **Horizon CarDash** (324 bytes): CarDash with 12 extra bytes ahead of the
//!   dash section, so every dash field is shifted by 12.
//!
//! All fields are little-endian. Decoding is two steps: [`select_layout`]
//! turns a datagram length into a [`DashOffset`], and [`decode`] reads every
//! field at a fixed offset using that value. The offset is an argument, not
//! shared state.
//!
//! ```
//! use forza_dualsense_telemetry::{decode, select_layout};
//!
//! let packet = vec![0u8; 324];
//! let offset = select_layout(packet.len())?;
//! let record = decode(&packet, offset)?;
//! assert!(!record.is_race_on);
//! # Ok::<(), forza_dualsense_telemetry::TelemetryError>(())
//! ```
//!
//! # Reference
//! <https://support.forzamotorsport.net/hc/en-us/articles/21742934790291>

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod decode;
pub mod error;
pub mod layout;
pub mod record;

pub use decode::{decode, decode_datagram};
pub use error::TelemetryError;
pub use layout::{
    CARDASH_SIZE, DashOffset, HORIZON_CARDASH_SIZE, PacketFormat, SLED_SIZE, select_layout,
};
pub use record::{Corners, TelemetryRecord};
