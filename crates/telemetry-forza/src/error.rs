//! Decoder errors.

/// Reasons a datagram cannot be turned into a [`crate::TelemetryRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TelemetryError {
    /// Length matches no known Forza packet variant.
    #[error("unsupported Forza packet length: {len} (expected 311 or 324)")]
    UnsupportedLength {
        /// Received datagram length.
        len: usize,
    },

    /// 232-byte Sled packet; it has no dash section to decode.
    #[error("Forza Sled packet (232 bytes) carries no dash section")]
    SledOnly,

    /// Datagram is shorter than the selected layout requires.
    #[error("Forza packet too short: need {needed} bytes, got {actual}")]
    Truncated {
        /// Bytes required by the selected layout.
        needed: usize,
        /// Bytes actually received.
        actual: usize,
    },
}
