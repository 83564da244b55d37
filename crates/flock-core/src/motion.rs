//! Kinematic update shared by agents and predators: bounded-rate turning and
//! toroidal position wrapping.

use crate::vec2::Vec2;

/// Rotate `current` toward `desired` by at most `max_turn_deg` degrees,
/// taking the shorter of the two arcs. Both inputs are unit vectors and so is
/// the result.
pub(crate) fn turn_toward(current: Vec2, desired: Vec2, max_turn_deg: f64) -> Vec2 {
    let cur = current.angle_degrees();
    let des = desired.angle_degrees();
    let ccw = (des - cur).rem_euclid(360.0);
    let cw = (cur - des).rem_euclid(360.0);
    if ccw <= cw {
        Vec2::from_angle_degrees(cur + ccw.min(max_turn_deg))
    } else {
        Vec2::from_angle_degrees(cur - cw.min(max_turn_deg))
    }
}

/// Wrap a position onto the torus `[0, arena.x) × [0, arena.y)`.
pub(crate) fn wrap(p: Vec2, arena: Vec2) -> Vec2 {
    Vec2::new(p.x.rem_euclid(arena.x), p.y.rem_euclid(arena.y))
}
