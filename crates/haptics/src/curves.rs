//! Range mapping used by the haptic policies.

/// Linearly map `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// No clamping: inputs outside the source range extrapolate. A degenerate
/// source range (`in_min == in_max`) divides by zero and yields a
/// non-finite result; callers only pass fixed, non-degenerate ranges.
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
