use std::f64::consts::{PI, TAU};

/// Wraps an angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round a tiny negative input up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Signed shortest rotation from `from` to `to`, in `(-π, π]`.
pub fn signed_angle_delta(from: f64, to: f64) -> f64 {
    let mut diff = normalize_angle(to) - normalize_angle(from);
    if diff > PI {
        diff -= TAU;
    } else if diff <= -PI {
        diff += TAU;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_normalize_angle() {
        assert_approx_eq!(normalize_angle(0.0), 0.0);
        assert_approx_eq!(normalize_angle(TAU + 1.0), 1.0);
        assert_approx_eq!(normalize_angle(-PI / 2.0), 3.0 * PI / 2.0);
        assert_approx_eq!(normalize_angle(-5.0 * TAU - 0.25), TAU - 0.25);
        assert_eq!(normalize_angle(TAU), 0.0);

        // Tiny negatives must never come back as TAU
        let tiny = normalize_angle(-1e-18);
        assert!((0.0..TAU).contains(&tiny), "got {}", tiny);
    }

    #[test]
    fn test_signed_angle_delta() {
        assert_approx_eq!(signed_angle_delta(0.0, PI / 2.0), PI / 2.0);
        assert_approx_eq!(signed_angle_delta(PI / 2.0, 0.0), -PI / 2.0);

        // Wrapping takes the short way round
        assert_approx_eq!(signed_angle_delta(0.1, TAU - 0.1), -0.2);
        assert_approx_eq!(signed_angle_delta(TAU - 0.1, 0.1), 0.2);

        // Exactly opposite resolves to +π, never -π
        assert_approx_eq!(signed_angle_delta(0.0, PI), PI);
        assert_approx_eq!(signed_angle_delta(PI, 0.0), PI);
    }
}
