//! Fixed-offset decoder for the Sled and dash sections.
//!
//! Sled fields are read at their published offsets. Dash fields are read at
//! `base + DashOffset`. There is no cursor: every read is independent.

use tracing::trace;

use crate::{Corners, DashOffset, TelemetryError, TelemetryRecord, select_layout};

// ── Sled section (never shifted) ─────────────────────────────────────────────
const OFF_IS_RACE_ON: usize = 0; // i32
const OFF_TIMESTAMP_MS: usize = 4; // u32
const OFF_ENGINE_MAX_RPM: usize = 8;
const OFF_ENGINE_IDLE_RPM: usize = 12;
const OFF_CURRENT_RPM: usize = 16;
const OFF_ACCEL: usize = 20; // XYZ
const OFF_VEL: usize = 32; // XYZ
const OFF_ANGULAR_VEL: usize = 44; // XYZ
const OFF_YAW: usize = 56;
const OFF_PITCH: usize = 60;
const OFF_ROLL: usize = 64;
// Per-wheel blocks, 4 × 4 bytes in FL FR RL RR order
const OFF_NORM_SUSP_TRAVEL: usize = 68;
const OFF_TIRE_SLIP_RATIO: usize = 84;
const OFF_WHEEL_ROTATION_SPEED: usize = 100;
const OFF_WHEEL_ON_RUMBLE_STRIP: usize = 116; // i32
const OFF_WHEEL_IN_PUDDLE_DEPTH: usize = 132;
const OFF_SURFACE_RUMBLE: usize = 148;
const OFF_TIRE_SLIP_ANGLE: usize = 164;
const OFF_TIRE_COMBINED_SLIP: usize = 180;
const OFF_SUSP_TRAVEL_METERS: usize = 196;
const OFF_CAR_ORDINAL: usize = 212; // i32
const OFF_CAR_CLASS: usize = 216; // i32
const OFF_CAR_PERFORMANCE_INDEX: usize = 220; // i32
const OFF_DRIVETRAIN_TYPE: usize = 224; // i32
const OFF_NUM_CYLINDERS: usize = 228; // i32

// ── Dash section (base offsets, add DashOffset) ─────────────────────────────
const OFF_DASH_POSITION: usize = 232; // XYZ
const OFF_DASH_SPEED: usize = 244;
const OFF_DASH_POWER: usize = 248;
const OFF_DASH_TORQUE: usize = 252;
const OFF_DASH_TIRE_TEMP: usize = 256; // FL FR RL RR
const OFF_DASH_BOOST: usize = 272;
const OFF_DASH_FUEL: usize = 276;
const OFF_DASH_DISTANCE: usize = 280;
const OFF_DASH_BEST_LAP: usize = 284;
const OFF_DASH_LAST_LAP: usize = 288;
const OFF_DASH_CUR_LAP: usize = 292;
const OFF_DASH_CUR_RACE_TIME: usize = 296;
const OFF_DASH_LAP_NUMBER: usize = 300; // u16
const OFF_DASH_RACE_POS: usize = 302; // u8
const OFF_DASH_ACCEL: usize = 303; // u8
const OFF_DASH_BRAKE: usize = 304; // u8
const OFF_DASH_CLUTCH: usize = 305; // u8
const OFF_DASH_HANDBRAKE: usize = 306; // u8
const OFF_DASH_GEAR: usize = 307; // u8
const OFF_DASH_STEER: usize = 308; // i8
const OFF_DASH_DRIVING_LINE: usize = 309; // i8
const OFF_DASH_AI_BRAKE_DIFF: usize = 310; // i8

/// Little-endian reads against one datagram.
struct Fields<'a> {
    data: &'a [u8],
    dash: usize,
}

impl Fields<'_> {
    fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N], TelemetryError> {
        let end = offset.saturating_add(N);
        self.data
            .get(offset..end)
            .and_then(|b| b.try_into().ok())
            .ok_or(TelemetryError::Truncated {
                needed: end,
                actual: self.data.len(),
            })
    }

    fn f32(&self, offset: usize) -> Result<f32, TelemetryError> {
        self.bytes(offset).map(f32::from_le_bytes)
    }

    fn i32(&self, offset: usize) -> Result<i32, TelemetryError> {
        self.bytes(offset).map(i32::from_le_bytes)
    }

    fn u32(&self, offset: usize) -> Result<u32, TelemetryError> {
        self.bytes(offset).map(u32::from_le_bytes)
    }

    fn vec3(&self, offset: usize) -> Result<[f32; 3], TelemetryError> {
        Ok([
            self.f32(offset)?,
            self.f32(offset + 4)?,
            self.f32(offset + 8)?,
        ])
    }

    fn corners(&self, offset: usize) -> Result<Corners<f32>, TelemetryError> {
        Ok(Corners::new(
            self.f32(offset)?,
            self.f32(offset + 4)?,
            self.f32(offset + 8)?,
            self.f32(offset + 12)?,
        ))
    }

    fn corner_flags(&self, offset: usize) -> Result<Corners<bool>, TelemetryError> {
        Ok(Corners::new(
            self.i32(offset)? != 0,
            self.i32(offset + 4)? != 0,
            self.i32(offset + 8)? != 0,
            self.i32(offset + 12)? != 0,
        ))
    }

    fn dash(&self, offset: usize) -> usize {
        offset + self.dash
    }

    fn dash_f32(&self, offset: usize) -> Result<f32, TelemetryError> {
        self.f32(self.dash(offset))
    }

    fn dash_u8(&self, offset: usize) -> Result<u8, TelemetryError> {
        self.bytes::<1>(self.dash(offset)).map(u8::from_le_bytes)
    }

    fn dash_i8(&self, offset: usize) -> Result<i8, TelemetryError> {
        self.bytes::<1>(self.dash(offset)).map(i8::from_le_bytes)
    }

    fn dash_u16(&self, offset: usize) -> Result<u16, TelemetryError> {
        self.bytes(self.dash(offset)).map(u16::from_le_bytes)
    }
}

/// Decode one datagram with an already selected dash offset.
///
/// `bytes` must hold at least [`DashOffset::min_packet_len`] bytes; shorter
/// input is reported as [`TelemetryError::Truncated`] and nothing is decoded.
pub fn decode(bytes: &[u8], offset: DashOffset) -> Result<TelemetryRecord, TelemetryError> {
    let needed = offset.min_packet_len();
    if bytes.len() < needed {
        return Err(TelemetryError::Truncated {
            needed,
            actual: bytes.len(),
        });
    }

    let f = Fields {
        data: bytes,
        dash: offset.get(),
    };

    let record = TelemetryRecord {
        is_race_on: f.i32(OFF_IS_RACE_ON)? != 0,
        timestamp_ms: f.u32(OFF_TIMESTAMP_MS)?,

        engine_max_rpm: f.f32(OFF_ENGINE_MAX_RPM)?,
        engine_idle_rpm: f.f32(OFF_ENGINE_IDLE_RPM)?,
        current_engine_rpm: f.f32(OFF_CURRENT_RPM)?,

        acceleration: f.vec3(OFF_ACCEL)?,
        velocity: f.vec3(OFF_VEL)?,
        angular_velocity: f.vec3(OFF_ANGULAR_VEL)?,
        yaw: f.f32(OFF_YAW)?,
        pitch: f.f32(OFF_PITCH)?,
        roll: f.f32(OFF_ROLL)?,

        normalized_suspension_travel: f.corners(OFF_NORM_SUSP_TRAVEL)?,
        tire_slip_ratio: f.corners(OFF_TIRE_SLIP_RATIO)?,
        wheel_rotation_speed: f.corners(OFF_WHEEL_ROTATION_SPEED)?,
        wheel_on_rumble_strip: f.corner_flags(OFF_WHEEL_ON_RUMBLE_STRIP)?,
        wheel_in_puddle_depth: f.corners(OFF_WHEEL_IN_PUDDLE_DEPTH)?,
        surface_rumble: f.corners(OFF_SURFACE_RUMBLE)?,
        tire_slip_angle: f.corners(OFF_TIRE_SLIP_ANGLE)?,
        tire_combined_slip: f.corners(OFF_TIRE_COMBINED_SLIP)?,
        suspension_travel_meters: f.corners(OFF_SUSP_TRAVEL_METERS)?,

        car_ordinal: f.i32(OFF_CAR_ORDINAL)?,
        car_class: f.i32(OFF_CAR_CLASS)?,
        car_performance_index: f.i32(OFF_CAR_PERFORMANCE_INDEX)?,
        drivetrain_type: f.i32(OFF_DRIVETRAIN_TYPE)?,
        num_cylinders: f.i32(OFF_NUM_CYLINDERS)?,

        position: f.vec3(f.dash(OFF_DASH_POSITION))?,
        speed: f.dash_f32(OFF_DASH_SPEED)?,
        power: f.dash_f32(OFF_DASH_POWER)?,
        torque: f.dash_f32(OFF_DASH_TORQUE)?,
        tire_temp: f.corners(f.dash(OFF_DASH_TIRE_TEMP))?,
        boost: f.dash_f32(OFF_DASH_BOOST)?,
        fuel: f.dash_f32(OFF_DASH_FUEL)?,
        distance_traveled: f.dash_f32(OFF_DASH_DISTANCE)?,
        best_lap_time: f.dash_f32(OFF_DASH_BEST_LAP)?,
        last_lap_time: f.dash_f32(OFF_DASH_LAST_LAP)?,
        current_lap_time: f.dash_f32(OFF_DASH_CUR_LAP)?,
        current_race_time: f.dash_f32(OFF_DASH_CUR_RACE_TIME)?,
        lap_number: f.dash_u16(OFF_DASH_LAP_NUMBER)?,
        race_position: f.dash_u8(OFF_DASH_RACE_POS)?,
        accelerator: f.dash_u8(OFF_DASH_ACCEL)?,
        brake: f.dash_u8(OFF_DASH_BRAKE)?,
        clutch: f.dash_u8(OFF_DASH_CLUTCH)?,
        handbrake: f.dash_u8(OFF_DASH_HANDBRAKE)?,
        gear: f.dash_u8(OFF_DASH_GEAR)?,
        steer: f.dash_i8(OFF_DASH_STEER)?,
        normalized_driving_line: f.dash_i8(OFF_DASH_DRIVING_LINE)?,
        normalized_ai_brake_difference: f.dash_i8(OFF_DASH_AI_BRAKE_DIFF)?,
    };

    trace!(
        len = bytes.len(),
        dash_offset = offset.get(),
        rpm = record.current_engine_rpm,
        "decoded Forza packet"
    );
    Ok(record)
}

/// Select the layout from the datagram length, then decode.
pub fn decode_datagram(bytes: &[u8]) -> Result<TelemetryRecord, TelemetryError> {
    let offset = select_layout(bytes.len())?;
    decode(bytes, offset)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Packet builders shared by unit and property tests.

    use super::*;
    use crate::{CARDASH_SIZE, HORIZON_CARDASH_SIZE, SLED_SIZE};

    pub(crate) fn put_f32(data: &mut [u8], offset: usize, value: f32) {
        if let Some(slot) = data.get_mut(offset..offset + 4) {
            slot.copy_from_slice(&value.to_le_bytes());
        }
    }

    pub(crate) fn put_i32(data: &mut [u8], offset: usize, value: i32) {
        if let Some(slot) = data.get_mut(offset..offset + 4) {
            slot.copy_from_slice(&value.to_le_bytes());
        }
    }

    pub(crate) fn put_u8(data: &mut [u8], offset: usize, value: u8) {
        if let Some(slot) = data.get_mut(offset) {
            *slot = value;
        }
    }

    /// 311-byte packet with a recognisable value in every field kind.
    pub(crate) fn sample_cardash() -> Vec<u8> {
        let mut data = vec![0u8; CARDASH_SIZE];
        put_i32(&mut data, OFF_IS_RACE_ON, 1);
        data[OFF_TIMESTAMP_MS..OFF_TIMESTAMP_MS + 4].copy_from_slice(&123_456u32.to_le_bytes());
        put_f32(&mut data, OFF_ENGINE_MAX_RPM, 7000.0);
        put_f32(&mut data, OFF_ENGINE_IDLE_RPM, 900.0);
        put_f32(&mut data, OFF_CURRENT_RPM, 3500.0);
        put_f32(&mut data, OFF_VEL + 8, 42.0);
        put_f32(&mut data, OFF_YAW, 1.25);
        for (i, slip) in [0.1f32, 0.2, 0.3, 0.4].into_iter().enumerate() {
            put_f32(&mut data, OFF_TIRE_COMBINED_SLIP + i * 4, slip);
        }
        put_i32(&mut data, OFF_WHEEL_ON_RUMBLE_STRIP + 12, 1);
        put_i32(&mut data, OFF_CAR_ORDINAL, 2352);
        put_i32(&mut data, OFF_NUM_CYLINDERS, 8);
        put_f32(&mut data, OFF_DASH_POSITION, -512.5);
        put_f32(&mut data, OFF_DASH_SPEED, 41.5);
        put_f32(&mut data, OFF_DASH_TIRE_TEMP + 4, 180.0);
        put_f32(&mut data, OFF_DASH_BEST_LAP, 92.75);
        put_f32(&mut data, OFF_DASH_CUR_RACE_TIME, 310.0);
        data[OFF_DASH_LAP_NUMBER..OFF_DASH_LAP_NUMBER + 2].copy_from_slice(&3u16.to_le_bytes());
        put_u8(&mut data, OFF_DASH_RACE_POS, 5);
        put_u8(&mut data, OFF_DASH_ACCEL, 255);
        put_u8(&mut data, OFF_DASH_BRAKE, 64);
        put_u8(&mut data, OFF_DASH_HANDBRAKE, 1);
        put_u8(&mut data, OFF_DASH_GEAR, 4);
        put_u8(&mut data, OFF_DASH_STEER, (-20i8).to_le_bytes()[0]);
        put_u8(&mut data, OFF_DASH_AI_BRAKE_DIFF, 7);
        data
    }

    /// Re-frame a 311-byte packet as a 324-byte Horizon packet: same Sled,
    /// 12 filler bytes, same dash fields, one trailing byte.
    pub(crate) fn to_horizon(cardash: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(HORIZON_CARDASH_SIZE);
        out.extend_from_slice(&cardash[..SLED_SIZE]);
        out.extend_from_slice(&[0xAB; 12]);
        out.extend_from_slice(&cardash[SLED_SIZE..CARDASH_SIZE]);
        out.push(0xCD);
        out
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::test_support::*;
    use super::*;
    use crate::CARDASH_SIZE;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn decode_datagram_no_panic_on_arbitrary_bytes(
            data in proptest::collection::vec(any::<u8>(), 0..512)
        ) {
            let _ = decode_datagram(&data);
        }

        #[test]
        fn decode_no_panic_with_any_offset(
            data in proptest::collection::vec(any::<u8>(), 0..400),
            horizon in any::<bool>(),
        ) {
            let offset = if horizon { DashOffset::HORIZON } else { DashOffset::CARDASH };
            let _ = decode(&data, offset);
        }

        #[test]
        fn horizon_framing_preserves_every_field(
            payload in proptest::collection::vec(any::<u8>(), CARDASH_SIZE..=CARDASH_SIZE)
        ) {
            let horizon = to_horizon(&payload);
            let base = decode(&payload, DashOffset::CARDASH);
            let shifted = decode(&horizon, DashOffset::HORIZON);
            prop_assert!(base.is_ok() && shifted.is_ok());
            if let (Ok(base), Ok(shifted)) = (base, shifted) {
                // Compare bit patterns so NaN payloads compare equal.
                prop_assert_eq!(base.engine_max_rpm.to_bits(), shifted.engine_max_rpm.to_bits());
                prop_assert_eq!(base.speed.to_bits(), shifted.speed.to_bits());
                prop_assert_eq!(base.current_race_time.to_bits(), shifted.current_race_time.to_bits());
                prop_assert_eq!(base.lap_number, shifted.lap_number);
                prop_assert_eq!(base.gear, shifted.gear);
                prop_assert_eq!(base.steer, shifted.steer);
                prop_assert_eq!(base.normalized_ai_brake_difference, shifted.normalized_ai_brake_difference);
            }
        }

        #[test]
        fn sled_section_ignores_offset(
            payload in proptest::collection::vec(any::<u8>(), 400..=400)
        ) {
            let base = decode(&payload, DashOffset::CARDASH);
            let shifted = decode(&payload, DashOffset::HORIZON);
            if let (Ok(base), Ok(shifted)) = (base, shifted) {
                prop_assert_eq!(base.timestamp_ms, shifted.timestamp_ms);
                prop_assert_eq!(base.car_ordinal, shifted.car_ordinal);
                prop_assert_eq!(
                    base.tire_combined_slip.front_left.to_bits(),
                    shifted.tire_combined_slip.front_left.to_bits()
                );
                prop_assert_eq!(
                    base.suspension_travel_meters.rear_right.to_bits(),
                    shifted.suspension_travel_meters.rear_right.to_bits()
                );
            }
        }
    }
}
