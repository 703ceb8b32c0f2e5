//! Light bar colour from engine speed.

/// Green intensity for the light bar: `floor(current / max * 255)`.
///
/// Clamped to `0..=255`. A missing or non-positive `max` yields 0 rather
/// than a division by zero.
pub fn rpm_green(current_rpm: f32, max_rpm: f32) -> u8 {
    if !max_rpm.is_finite() || max_rpm <= 0.0 {
        return 0;
    }
    ((current_rpm / max_rpm) * 255.0).floor().clamp(0.0, 255.0) as u8
}
