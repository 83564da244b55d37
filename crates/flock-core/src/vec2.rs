use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::{Add, Sub};

/// 2D vector value type. Every operation returns a new value; the only
/// in-place mutation is [`Vec2::accumulate`], reserved for per-tick force
/// accumulation buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction. The zero vector normalizes to
    /// itself rather than dividing by zero.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    pub fn scaled(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }

    /// Angle of the vector in radians, normalized into `[0, 2π)`.
    pub fn angle_radians(self) -> f64 {
        self.y.atan2(self.x).rem_euclid(TAU)
    }

    /// Angle of the vector in degrees, in `[0, 360)`.
    pub fn angle_degrees(self) -> f64 {
        self.angle_radians().to_degrees()
    }

    /// Unit vector pointing along `deg` degrees.
    pub fn from_angle_degrees(deg: f64) -> Vec2 {
        let rad = deg.to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }

    pub fn distance_to(self, p: Vec2) -> f64 {
        (p - self).length()
    }

    /// Unit vector from `self` toward `p`; zero when the points coincide.
    pub fn direction_to(self, p: Vec2) -> Vec2 {
        (p - self).normalized()
    }

    pub fn dot(self, v: Vec2) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// Closest point to `self` on the segment `a`-`b` (projection with the
    /// parameter clamped to `[0, 1]`). A degenerate segment returns `a`.
    pub fn closest_point_on_segment(self, a: Vec2, b: Vec2) -> Vec2 {
        let seg = b - a;
        let len_sq = seg.length_squared();
        if len_sq == 0.0 {
            return a;
        }
        let t = ((self - a).dot(seg) / len_sq).clamp(0.0, 1.0);
        a + seg.scaled(t)
    }

    /// In-place sum. Accumulation buffers only.
    pub fn accumulate(&mut self, v: Vec2) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn normalize_is_idempotent() {
        let v = Vec2::new(3.0, -4.0);
        let once = v.normalized();
        let twice = once.normalized();
        assert!((once.x - twice.x).abs() < EPS && (once.y - twice.y).abs() < EPS);
        assert!((once.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn normalize_of_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn angle_radians_is_normalized_into_zero_tau() {
        // (0, -1) is at -π/2 via atan2; normalized it must land at 3π/2.
        let angle = Vec2::new(0.0, -1.0).angle_radians();
        assert!((angle - 3.0 * std::f64::consts::FRAC_PI_2).abs() < EPS);
        for deg in [0.0, 45.0, 90.0, 180.0, 270.0, 359.0] {
            let a = Vec2::from_angle_degrees(deg).angle_radians();
            assert!((0.0..TAU).contains(&a), "angle {a} out of range for {deg}");
        }
    }

    #[test]
    fn from_angle_degrees_round_trips() {
        for deg in [0.0, 30.0, 90.0, 179.5, 270.0, 333.0] {
            let v = Vec2::from_angle_degrees(deg);
            assert!((v.length() - 1.0).abs() < EPS);
            assert!((v.angle_degrees() - deg).abs() < 1e-9, "round trip of {deg}");
        }
    }

    #[test]
    fn direction_to_is_unit_or_zero() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert!((a.direction_to(b).length() - 1.0).abs() < EPS);
        assert_eq!(a.direction_to(a), Vec2::ZERO);
    }

    #[test]
    fn closest_point_on_segment_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        // Interior projection.
        let mid = Vec2::new(5.0, 3.0).closest_point_on_segment(a, b);
        assert!((mid.x - 5.0).abs() < EPS && mid.y.abs() < EPS);
        // Beyond either endpoint clamps.
        assert_eq!(Vec2::new(-4.0, 2.0).closest_point_on_segment(a, b), a);
        assert_eq!(Vec2::new(14.0, -2.0).closest_point_on_segment(a, b), b);
        // Degenerate segment returns the endpoint.
        assert_eq!(Vec2::new(3.0, 3.0).closest_point_on_segment(a, a), a);
    }

    #[test]
    fn accumulate_sums_in_place() {
        let mut acc = Vec2::ZERO;
        acc.accumulate(Vec2::new(1.0, 2.0));
        acc.accumulate(Vec2::new(-0.5, 0.5));
        assert_eq!(acc, Vec2::new(0.5, 2.5));
    }
}
