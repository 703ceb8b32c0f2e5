//! Per-tick translation: datagram in, command packet out.

use forza_dualsense_dsx_protocol::{CommandPacket, ProtocolError};
use forza_dualsense_haptics::HapticEncoder;
use forza_dualsense_telemetry::{TelemetryError, decode, select_layout};
use thiserror::Error;

/// Why a telemetry tick produced nothing to forward.
#[derive(Debug, Error)]
pub enum DropReason {
    #[error("telemetry rejected: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("command packet could not be serialized: {0}")]
    Encode(#[from] ProtocolError),
}

/// Select the layout from the datagram length, decode, and encode.
///
/// # Errors
///
/// Returns [`DropReason::Telemetry`] for Sled-only, unsupported, or
/// truncated datagrams.
pub fn translate(datagram: &[u8], encoder: &HapticEncoder) -> Result<CommandPacket, DropReason> {
    let offset = select_layout(datagram.len())?;
    let record = decode(datagram, offset)?;
    Ok(encoder.encode(&record))
}

/// [`translate`] followed by JSON serialization, ready for the DSX socket.
///
/// # Errors
///
/// As [`translate`], plus [`DropReason::Encode`] if serialization fails.
pub fn translate_to_bytes(datagram: &[u8], encoder: &HapticEncoder) -> Result<Vec<u8>, DropReason> {
    Ok(translate(datagram, encoder)?.to_bytes()?)
}
