//! Angle and distance helpers shared by the visibility classifier and the
//! projection engine.
//!
//! World angles are radians in `[0, 2π)` measured from +x, growing towards
//! +y. The player's facing angle is authored in degrees in `[0, 360)` and
//! converted at the seams.

use glam::Vec2;
use std::f32::consts::TAU;

/// Equivalent angle in `[0, 360)`.
#[inline]
pub fn normalize_degrees(a: f32) -> f32 {
    a.rem_euclid(360.0)
}

/// Equivalent angle in `[0, 2π)`.
#[inline]
pub fn normalize_radians(a: f32) -> f32 {
    a.rem_euclid(TAU)
}

#[inline]
fn in_between(a: f32, lo: f32, hi: f32) -> bool {
    lo <= a && a <= hi
}

/// True if `a` lies in the closed sector swept from `left` to `right`.
///
/// When `left > right` the sector wraps through the 0/2π seam; this is how
/// view cones straddling the angle origin are expressed. All three inputs
/// must already be normalized to `[0, 2π)`.
pub fn angle_in_sector(a: f32, left: f32, right: f32) -> bool {
    if left > right {
        in_between(a, left, TAU) || in_between(a, 0.0, right)
    } else {
        in_between(a, left, right)
    }
}

/// Angle from `from` to `to`, normalized to `[0, 2π)` (`atan2` itself
/// returns `[-π, π]`).
pub fn angle_to_point(from: Vec2, to: Vec2) -> f32 {
    let v = to - from;
    normalize_radians(v.y.atan2(v.x))
}

/// Euclidean distance between two points.
#[inline]
pub fn distance_to_point(from: Vec2, to: Vec2) -> f32 {
    (to - from).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn normalize_degrees_range_and_idempotence() {
        for a in [-720.5, -360.0, -0.25, 0.0, 42.0, 359.9, 360.0, 1234.5] {
            let n = normalize_degrees(a);
            assert!((0.0..360.0).contains(&n), "{a} -> {n}");
            assert_eq!(normalize_degrees(n), n);
        }
    }

    #[test]
    fn normalize_radians_range_and_idempotence() {
        for a in [-3.0 * TAU, -0.1, 0.0, 1.0, TAU - 1e-4, TAU, 17.5] {
            let n = normalize_radians(a);
            assert!((0.0..TAU).contains(&n), "{a} -> {n}");
            assert_eq!(normalize_radians(n), n);
        }
    }

    #[test]
    fn sector_straddling_the_seam() {
        let deg = |d: f32| d.to_radians();
        // cone from 340° to 20° wraps through 0°
        assert!(angle_in_sector(deg(350.0), deg(340.0), deg(20.0)));
        assert!(angle_in_sector(deg(10.0), deg(340.0), deg(20.0)));
        assert!(!angle_in_sector(deg(180.0), deg(340.0), deg(20.0)));
    }

    #[test]
    fn sector_without_wrap() {
        let deg = |d: f32| d.to_radians();
        assert!(angle_in_sector(deg(45.0), deg(30.0), deg(60.0)));
        assert!(angle_in_sector(deg(30.0), deg(30.0), deg(60.0)));
        assert!(!angle_in_sector(deg(20.0), deg(30.0), deg(60.0)));
    }

    #[test]
    fn angle_to_point_quadrants() {
        let o = vec2(1.0, 1.0);
        assert!((angle_to_point(o, vec2(2.0, 1.0)) - 0.0).abs() < 1e-6);
        assert!((angle_to_point(o, vec2(1.0, 2.0)) - TAU / 4.0).abs() < 1e-6);
        // negative-y result wraps into [0, 2π)
        assert!((angle_to_point(o, vec2(1.0, 0.0)) - 3.0 * TAU / 4.0).abs() < 1e-6);
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((distance_to_point(vec2(0.0, 0.0), vec2(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
