use crate::biod::Biod;
use crate::config::SwarmConfig;
use crate::field::{Falloff, ForceField};
use crate::motion;
use crate::vec2::Vec2;

/// A hunting agent. Shares the bounded-turn kinematics of [`Biod`] but steers
/// by pursuing the nearest visible prey instead of flocking, and carries a
/// repulsive [`ForceField`] that follows it around. Predators have no
/// crowding behavior: they close distance, they never avoid.
#[derive(Clone, Debug)]
pub struct Predator {
    pub position: Vec2,
    /// Always unit length.
    pub heading: Vec2,
    pub speed: f64,
    /// Maximum turn per tick, degrees.
    pub turn_rate: f64,
    pub body_radius: f64,
    pub sight_radius: f64,
    field: ForceField,
}

impl Predator {
    pub(crate) fn from_config(position: Vec2, heading: Vec2, config: &SwarmConfig) -> Self {
        Self {
            position,
            heading: heading.normalized(),
            speed: config.predator_speed,
            turn_rate: config.predator_turn_rate,
            body_radius: config.predator_radius,
            sight_radius: config.predator_sight_radius,
            field: ForceField {
                position,
                strength: config.predator_field_strength,
                radius: config.predator_field_radius,
                falloff: Falloff::Linear,
                repels: true,
            },
        }
    }

    /// The owned repulsive field, position-synchronized on every move.
    pub fn field(&self) -> &ForceField {
        &self.field
    }

    /// Direction toward the closest agent inside the sight radius and the
    /// forward half-plane; `None` when no prey qualifies (the caller keeps
    /// the current heading — no coasting, no wander).
    pub(crate) fn desired_heading(&self, prey: &[Biod]) -> Option<Vec2> {
        let mut best: Option<(f64, Vec2)> = None;
        for biod in prey {
            let distance = self.position.distance_to(biod.position);
            if distance > self.sight_radius {
                continue;
            }
            let toward = self.position.direction_to(biod.position);
            if self.heading.dot(toward) <= 0.0 {
                continue;
            }
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, toward));
            }
        }
        best.map(|(_, toward)| toward)
    }

    /// Identical kinematic update to [`Biod::advance`], then re-sync the
    /// owned field to the new position.
    pub(crate) fn advance(&mut self, desired: Vec2, arena: Vec2) {
        self.heading = motion::turn_toward(self.heading, desired, self.turn_rate);
        self.position = motion::wrap(self.position + self.heading.scaled(self.speed), arena);
        self.field.position = self.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predator(position: Vec2, heading_deg: f64) -> Predator {
        Predator::from_config(
            position,
            Vec2::from_angle_degrees(heading_deg),
            &SwarmConfig::default(),
        )
    }

    fn prey_at(x: f64, y: f64) -> Biod {
        Biod::from_config(
            Vec2::new(x, y),
            Vec2::new(1.0, 0.0),
            &SwarmConfig::default(),
        )
    }

    #[test]
    fn pursues_the_nearest_visible_prey() {
        let p = predator(Vec2::new(100.0, 100.0), 0.0);
        let prey = vec![prey_at(180.0, 100.0), prey_at(130.0, 100.0)];
        let desired = p.desired_heading(&prey).unwrap();
        assert!((desired.x - 1.0).abs() < 1e-9, "nearest is straight ahead");
    }

    #[test]
    fn prey_behind_or_out_of_sight_is_ignored() {
        let p = predator(Vec2::new(100.0, 100.0), 0.0);
        // One behind, one beyond the default 120-unit sight radius.
        let prey = vec![prey_at(40.0, 100.0), prey_at(300.0, 100.0)];
        assert!(p.desired_heading(&prey).is_none());
    }

    #[test]
    fn keeps_heading_when_nothing_qualifies() {
        let mut p = predator(Vec2::new(100.0, 100.0), 45.0);
        let heading_before = p.heading;
        let desired = p.desired_heading(&[]).unwrap_or(p.heading);
        p.advance(desired, Vec2::new(800.0, 600.0));
        assert!((p.heading.dot(heading_before) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn owned_field_tracks_the_predator() {
        let mut p = predator(Vec2::new(100.0, 100.0), 0.0);
        p.advance(p.heading, Vec2::new(800.0, 600.0));
        assert_eq!(p.field().position, p.position);
        assert!(p.field().repels);
    }
}
