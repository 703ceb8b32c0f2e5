//! Tire-grip policy for an adaptive trigger.
//!
//! Combined slip is the mean of the four per-wheel combined-slip values:
//! 0.0 is full grip, 1.0 and above is total loss of traction.
//!
//! | combined slip        | trigger                                       |
//! |----------------------|-----------------------------------------------|
//! | `> 1.0`              | released (`Normal`, 0, 0)                     |
//! | `(0.25, 1.0]`        | vibrating resistance, frequency 35 → 0        |
//! | `<= 0.25` (or NaN)   | uniform hard resistance (`Resistance`, 0, 8)  |

use forza_dualsense_dsx_protocol::TriggerMode;
use forza_dualsense_telemetry::TelemetryRecord;

use crate::curves::map_range;

/// Above this the trigger is released.
pub const GRIP_LOST: f32 = 1.0;
/// Above this the trigger starts to vibrate.
pub const SLIP_ONSET: f32 = 0.25;
/// Vibration frequency right at [`SLIP_ONSET`].
pub const MAX_VIBRATE_FREQUENCY: f32 = 35.0;
pub const VIBRATE_STIFFNESS: u8 = 104;
pub const VIBRATE_START: u8 = 76;

/// Uniform hard resistance, the no-slip state.
pub const FULL_RESISTANCE: TriggerMode = TriggerMode::Resistance { start: 0, force: 8 };

/// Mean combined slip across all four tires.
pub fn combined_slip(record: &TelemetryRecord) -> f32 {
    record.tire_combined_slip.mean()
}

/// Vibration frequency for a slip in the vibrate band: 35 at the onset,
/// falling linearly to 0 at total grip loss.
pub fn vibrate_frequency(slip: f32) -> u8 {
    let mapped = map_range(slip, SLIP_ONSET, GRIP_LOST, 0.0, MAX_VIBRATE_FREQUENCY).floor();
    // NaN saturates to 0 in the cast.
    (MAX_VIBRATE_FREQUENCY - mapped).clamp(0.0, MAX_VIBRATE_FREQUENCY) as u8
}

/// Trigger mode for a given combined slip.
pub fn grip_trigger_mode(slip: f32) -> TriggerMode {
    if slip > GRIP_LOST {
        TriggerMode::RELEASED
    } else if slip > SLIP_ONSET {
        TriggerMode::vibrate_resistance(vibrate_frequency(slip), VIBRATE_STIFFNESS, VIBRATE_START)
    } else {
        FULL_RESISTANCE
    }
}
