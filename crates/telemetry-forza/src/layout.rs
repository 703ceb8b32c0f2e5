//! Forza "Data Out" packet variants and dash-section addressing.
//!
//! Every variant shares the same 232-byte Sled section. The larger variants
//! append a dash section; Forza Horizon inserts 12 extra bytes between the
//! two, so every dash field moves by a constant.

use crate::TelemetryError;

/// Sled packet: 58 × 4-byte fields.
pub const SLED_SIZE: usize = 232;
/// CarDash packet (FM7 dash): Sled + 79 bytes of dash fields.
pub const CARDASH_SIZE: usize = 311;
/// Forza Horizon CarDash packet: CarDash with 12 bytes inserted before the dash
/// section and one trailing byte.
pub const HORIZON_CARDASH_SIZE: usize = 324;

/// Bytes Forza Horizon inserts ahead of the dash section.
const HORIZON_DASH_SHIFT: usize = 12;

/// Wire variant of a Forza telemetry datagram, keyed by datagram length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketFormat {
    /// 232 bytes, no dash section. Not decodable into a full record.
    Sled,
    /// 311 bytes, dash section at its base offsets.
    CarDash,
    /// 324 bytes, dash section shifted by 12 bytes.
    HorizonCarDash,
}

impl PacketFormat {
    /// Identify the variant from a datagram length. The set is closed.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            SLED_SIZE => Some(Self::Sled),
            CARDASH_SIZE => Some(Self::CarDash),
            HORIZON_CARDASH_SIZE => Some(Self::HorizonCarDash),
            _ => None,
        }
    }

    /// Offset added to every dash-section field, or `None` when the variant
    /// carries no dash section.
    pub fn dash_offset(self) -> Option<DashOffset> {
        match self {
            Self::Sled => None,
            Self::CarDash => Some(DashOffset::CARDASH),
            Self::HorizonCarDash => Some(DashOffset::HORIZON),
        }
    }
}

/// Constant shift applied to dash-section reads.
///
/// Produced by [`select_layout`] and passed explicitly into
/// [`crate::decode`]; nothing about the selected layout is remembered
/// between datagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DashOffset(usize);

impl DashOffset {
    /// Dash fields at their base offsets (311-byte packets).
    pub const CARDASH: Self = Self(0);
    /// Dash fields shifted for Forza Horizon (324-byte packets).
    pub const HORIZON: Self = Self(HORIZON_DASH_SHIFT);

    /// Raw byte shift.
    pub fn get(self) -> usize {
        self.0
    }

    /// Smallest datagram that holds every field under this offset.
    pub fn min_packet_len(self) -> usize {
        CARDASH_SIZE.saturating_add(self.0)
    }
}

/// Pick the dash offset for a datagram of `len` bytes.
///
/// Accepts 311 (offset 0) and 324 (offset 12). 232-byte Sled packets are
/// rejected with [`TelemetryError::SledOnly`]; every other length with
/// [`TelemetryError::UnsupportedLength`].
pub fn select_layout(len: usize) -> Result<DashOffset, TelemetryError> {
    match PacketFormat::from_len(len) {
        Some(format) => format.dash_offset().ok_or(TelemetryError::SledOnly),
        None => Err(TelemetryError::UnsupportedLength { len }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_select_layout_cardash() -> TestResult {
        assert_eq!(select_layout(311)?, DashOffset::CARDASH);
        assert_eq!(select_layout(311)?.get(), 0);
        Ok(())
    }

    #[test]
    fn test_select_layout_horizon() -> TestResult {
        assert_eq!(select_layout(324)?.get(), 12);
        Ok(())
    }

    #[test]
    fn test_select_layout_rejects_sled() {
        assert!(matches!(select_layout(232), Err(TelemetryError::SledOnly)));
    }

    #[test]
    fn test_select_layout_rejects_unknown() {
        for len in [0, 1, 231, 233, 310, 312, 323, 325, 331, 1024] {
            assert!(
                matches!(
                    select_layout(len),
                    Err(TelemetryError::UnsupportedLength { len: l }) if l == len
                ),
                "length {len} must be rejected"
            );
        }
    }

    #[test]
    fn test_format_from_len() {
        assert_eq!(PacketFormat::from_len(SLED_SIZE), Some(PacketFormat::Sled));
        assert_eq!(PacketFormat::from_len(CARDASH_SIZE), Some(PacketFormat::CarDash));
        assert_eq!(
            PacketFormat::from_len(HORIZON_CARDASH_SIZE),
            Some(PacketFormat::HorizonCarDash)
        );
        assert_eq!(PacketFormat::from_len(300), None);
    }

    #[test]
    fn test_min_packet_len_fits_variant() {
        assert_eq!(DashOffset::CARDASH.min_packet_len(), CARDASH_SIZE);
        assert!(DashOffset::HORIZON.min_packet_len() <= HORIZON_CARDASH_SIZE);
    }
}
