//! Decoded telemetry snapshot.

/// One value per wheel, in Forza's FL, FR, RL, RR order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Corners<T> {
    pub front_left: T,
    pub front_right: T,
    pub rear_left: T,
    pub rear_right: T,
}

impl<T: Copy> Corners<T> {
    /// Build from values in wire order.
    pub fn new(front_left: T, front_right: T, rear_left: T, rear_right: T) -> Self {
        Self {
            front_left,
            front_right,
            rear_left,
            rear_right,
        }
    }

    /// Same value on every wheel.
    pub fn splat(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn to_array(self) -> [T; 4] {
        [
            self.front_left,
            self.front_right,
            self.rear_left,
            self.rear_right,
        ]
    }
}

impl Corners<f32> {
    /// Arithmetic mean of the four wheels.
    pub fn mean(&self) -> f32 {
        (self.front_left + self.front_right + self.rear_left + self.rear_right) / 4.0
    }
}

/// A full snapshot of one simulator tick.
///
/// Built fresh from exactly one datagram and never mutated afterwards.
/// Units follow Forza: metres, m/s, rad, rad/s, Kelvin, seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TelemetryRecord {
    // session
    pub is_race_on: bool,
    pub timestamp_ms: u32,

    // engine
    pub engine_max_rpm: f32,
    pub engine_idle_rpm: f32,
    pub current_engine_rpm: f32,

    // motion, car-local axes
    pub acceleration: [f32; 3],
    pub velocity: [f32; 3],
    pub angular_velocity: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,

    // per wheel
    /// 0.0 = max stretch, 1.0 = max compression.
    pub normalized_suspension_travel: Corners<f32>,
    pub tire_slip_ratio: Corners<f32>,
    pub wheel_rotation_speed: Corners<f32>,
    pub wheel_on_rumble_strip: Corners<bool>,
    pub wheel_in_puddle_depth: Corners<f32>,
    pub surface_rumble: Corners<f32>,
    pub tire_slip_angle: Corners<f32>,
    /// 0.0 = full grip, 1.0 and above = grip lost.
    pub tire_combined_slip: Corners<f32>,
    pub suspension_travel_meters: Corners<f32>,

    // car identity
    pub car_ordinal: i32,
    pub car_class: i32,
    pub car_performance_index: i32,
    /// 0 = FWD, 1 = RWD, 2 = AWD.
    pub drivetrain_type: i32,
    pub num_cylinders: i32,

    // dash
    pub position: [f32; 3],
    pub speed: f32,
    pub power: f32,
    pub torque: f32,
    pub tire_temp: Corners<f32>,
    pub boost: f32,
    pub fuel: f32,
    pub distance_traveled: f32,
    pub best_lap_time: f32,
    pub last_lap_time: f32,
    pub current_lap_time: f32,
    pub current_race_time: f32,
    pub lap_number: u16,
    pub race_position: u8,
    pub accelerator: u8,
    pub brake: u8,
    pub clutch: u8,
    pub handbrake: u8,
    pub gear: u8,
    pub steer: i8,
    pub normalized_driving_line: i8,
    pub normalized_ai_brake_difference: i8,
}
