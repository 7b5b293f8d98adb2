//! Angle geometry - pure math mapping time-of-day to dial angles
//!
//! One angular convention is used everywhere in the engine: 0 degrees points
//! at 12 o'clock (top of the dial) and angles increase clockwise. Markers,
//! labels, dial rotation, and pointer decoding all share it; mixing
//! conventions misaligns the nested dials.

/// Degrees of dial arc per hour of offset (360 / 24)
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Minutes in a day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Wrap an angle into [0, 360) with floored modulo
pub fn wrap_degrees(angle_deg: f64) -> f64 {
    angle_deg.rem_euclid(360.0)
}

/// Wrap a minute-of-day into [0, 1440) with floored modulo
///
/// `rem_euclid` keeps negative inputs correct: -530 wraps to 910, where a
/// plain `%` would leave it negative.
pub fn wrap_minutes(minute_of_day: f64) -> f64 {
    minute_of_day.rem_euclid(MINUTES_PER_DAY)
}

/// Angle of an hour marker: hour 0 at the top, 15 degrees per hour clockwise
pub fn hour_to_angle_deg(hour_of_day: u32) -> f64 {
    f64::from(hour_of_day) * DEGREES_PER_HOUR
}

/// Angle of the time indicator for a minute-of-day
pub fn minute_to_angle_deg(minute_of_day: f64) -> f64 {
    wrap_minutes(minute_of_day) / MINUTES_PER_DAY * 360.0
}

/// Inverse of [`minute_to_angle_deg`]; round-trips within float tolerance
pub fn angle_to_minute_of_day(angle_deg: f64) -> f64 {
    wrap_degrees(angle_deg) / 360.0 * MINUTES_PER_DAY
}

/// Dial rotation for a whole-hour offset difference
///
/// Sign convention: a target zone *ahead* of the reference (positive
/// difference) rotates its dial clockwise by a positive angle, so the
/// target's later hours line up under the reference's current hour.
pub fn offset_diff_to_rotation_deg(offset_diff_hours: i32) -> f64 {
    f64::from(offset_diff_hours) * DEGREES_PER_HOUR
}

/// Place a point at `radius_percent` from the center of a square container
///
/// Coordinates are percentages of the container with the origin at the top
/// left and y growing downward, so (50, 50) is the center and angle 0 lands
/// at (50, 50 - radius).
pub fn polar_to_percent(angle_deg: f64, radius_percent: f64) -> (f64, f64) {
    let radians = angle_deg.to_radians();
    let x = 50.0 + radius_percent * radians.sin();
    let y = 50.0 - radius_percent * radians.cos();
    (x, y)
}

/// Decode a pointer position relative to the dial center into an angle
///
/// `dx` is rightward and `dy_down` is downward from the center (screen
/// coordinates). Returns the angle under the shared convention, so a pointer
/// straight above the center decodes to 0 and straight right to 90.
pub fn pointer_angle_deg(dx: f64, dy_down: f64) -> f64 {
    wrap_degrees(dx.atan2(-dy_down).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_hour_angles() {
        assert_eq!(hour_to_angle_deg(0), 0.0);
        assert_eq!(hour_to_angle_deg(6), 90.0);
        assert_eq!(hour_to_angle_deg(12), 180.0);
        assert_eq!(hour_to_angle_deg(23), 345.0);
    }

    #[test]
    fn test_minute_angle_round_trip() {
        for m in 0..1440 {
            let minute = f64::from(m);
            let angle = minute_to_angle_deg(minute);
            assert!((0.0..360.0).contains(&angle));
            assert!(
                (angle_to_minute_of_day(angle) - minute).abs() < EPSILON,
                "round trip failed for minute {}",
                m
            );
        }
    }

    #[test]
    fn test_six_am_is_ninety_degrees() {
        assert!((minute_to_angle_deg(360.0) - 90.0).abs() < EPSILON);
        assert!((angle_to_minute_of_day(90.0) - 360.0).abs() < EPSILON);
    }

    #[test]
    fn test_offset_diff_rotation_direction() {
        // A zone 3 hours ahead rotates its dial +45 degrees (clockwise)
        assert_eq!(offset_diff_to_rotation_deg(3), 45.0);
        assert_eq!(offset_diff_to_rotation_deg(-5), -75.0);
        assert_eq!(offset_diff_to_rotation_deg(0), 0.0);
    }

    #[test]
    fn test_wrap_minutes_handles_negatives() {
        assert!((wrap_minutes(-530.0) - 910.0).abs() < EPSILON);
        assert!((wrap_minutes(1450.0) - 10.0).abs() < EPSILON);
        assert!((wrap_minutes(10.0) - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_degrees_handles_negatives() {
        assert!((wrap_degrees(-90.0) - 270.0).abs() < EPSILON);
        assert!((wrap_degrees(725.0) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_polar_to_percent_cardinal_points() {
        let (x, y) = polar_to_percent(0.0, 48.0);
        assert!((x - 50.0).abs() < EPSILON);
        assert!((y - 2.0).abs() < EPSILON);

        let (x, y) = polar_to_percent(90.0, 48.0);
        assert!((x - 98.0).abs() < EPSILON);
        assert!((y - 50.0).abs() < EPSILON);

        let (x, y) = polar_to_percent(180.0, 48.0);
        assert!((x - 50.0).abs() < EPSILON);
        assert!((y - 98.0).abs() < EPSILON);

        let (x, y) = polar_to_percent(270.0, 48.0);
        assert!((x - 2.0).abs() < EPSILON);
        assert!((y - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_pointer_angle_matches_placement() {
        // Straight up (negative dy in screen coordinates) is 0 degrees
        assert!(pointer_angle_deg(0.0, -1.0).abs() < EPSILON);
        // Right is 90, down is 180, left is 270
        assert!((pointer_angle_deg(1.0, 0.0) - 90.0).abs() < EPSILON);
        assert!((pointer_angle_deg(0.0, 1.0) - 180.0).abs() < EPSILON);
        assert!((pointer_angle_deg(-1.0, 0.0) - 270.0).abs() < EPSILON);
    }

    #[test]
    fn test_pointer_angle_inverts_polar_placement() {
        for deg in (0..360).step_by(15) {
            let angle = f64::from(deg);
            let (x, y) = polar_to_percent(angle, 48.0);
            let decoded = pointer_angle_deg(x - 50.0, y - 50.0);
            assert!(
                (decoded - angle).abs() < 1e-6,
                "pointer decode mismatch at {} degrees",
                deg
            );
        }
    }
}
