//! The flocking agent. Steering is two-phase: [`Biod::desired_heading`] is a
//! pure function of one immutable swarm snapshot plus this tick's accumulated
//! field forces, and [`Biod::advance`] applies the bounded-rate turn and move
//! only after every agent's desired heading has been computed.

use crate::config::SwarmConfig;
use crate::field::FieldAccum;
use crate::motion;
use crate::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Additive crowding penalty for a neighbor inside the body radius; large
/// enough to dominate every other steering signal. A softness parameter, not
/// a hard non-overlap constraint.
const OVERLAP_PENALTY: f64 = 1_000_000.0;

/// Which steering signal most strongly shaped the last heading decision.
/// Presentation only; never read back by the steering math.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantForce {
    #[default]
    None,
    Crowding,
    Cohesion,
    Field,
}

impl DominantForce {
    pub fn as_str(self) -> &'static str {
        match self {
            DominantForce::None => "none",
            DominantForce::Crowding => "crowding",
            DominantForce::Cohesion => "cohesion",
            DominantForce::Field => "field",
        }
    }
}

/// An autonomous flocking agent.
#[derive(Clone, Debug)]
pub struct Biod {
    pub position: Vec2,
    /// Always unit length.
    pub heading: Vec2,
    pub speed: f64,
    /// Maximum turn per tick, degrees.
    pub turn_rate: f64,
    pub body_radius: f64,
    pub proximity_radius: f64,
    pub sight_radius: f64,
    pub crowding_severity: f64,
    /// Diagnostic label from the last steering decision.
    pub dominant: DominantForce,
}

impl Biod {
    pub(crate) fn from_config(position: Vec2, heading: Vec2, config: &SwarmConfig) -> Self {
        Self {
            position,
            heading: heading.normalized(),
            speed: config.agent_speed,
            turn_rate: config.agent_turn_rate,
            body_radius: config.agent_radius,
            proximity_radius: config.proximity_radius,
            sight_radius: config.sight_radius,
            crowding_severity: config.crowding_severity,
            dominant: DominantForce::None,
        }
    }

    /// Desired heading from the swarm snapshot `others` (with
    /// `neighbor_indices` pre-filtered to the sight radius) and this tick's
    /// field forces. Pure: mutates nothing.
    ///
    /// A combined steering vector of zero keeps the current heading, so a
    /// lone agent with no field influence flies straight.
    pub(crate) fn desired_heading(
        &self,
        others: &[Biod],
        neighbor_indices: &[usize],
        forces: &FieldAccum,
    ) -> (Vec2, DominantForce) {
        let mut heading_sum = Vec2::ZERO;
        let mut position_sum = Vec2::ZERO;
        let mut visible = 0usize;
        let mut crowd_sum = Vec2::ZERO;
        let mut crowding = 0usize;

        for &i in neighbor_indices {
            let other = &others[i];
            let toward = self.position.direction_to(other.position);
            // Forward half-plane: a neighbor exactly behind (dot <= 0) is
            // never visible. Coincident positions yield a zero direction and
            // fall out here too.
            if self.heading.dot(toward) <= 0.0 {
                continue;
            }
            visible += 1;
            heading_sum.accumulate(other.heading);
            position_sum.accumulate(other.position);

            let distance = self.position.distance_to(other.position);
            if distance <= self.proximity_radius {
                let radial_point = self.position + toward.scaled(self.proximity_radius);
                let mut force =
                    other.position.distance_to(radial_point) * self.crowding_severity;
                if distance < self.body_radius * 1.1 {
                    force += OVERLAP_PENALTY;
                }
                // Repulsion points from the neighbor back toward self.
                crowd_sum.accumulate(toward.scaled(-force));
                crowding += 1;
            }
        }

        let (avg_heading, toward_center) = if visible > 0 {
            let avg_heading = heading_sum.scaled(1.0 / visible as f64).normalized();
            let center = position_sum.scaled(1.0 / visible as f64);
            (avg_heading, self.position.direction_to(center))
        } else {
            (Vec2::ZERO, Vec2::ZERO)
        };
        let crowd_avg = if crowding > 0 {
            crowd_sum.scaled(1.0 / crowding as f64)
        } else {
            Vec2::ZERO
        };

        let dominant = dominant_force(crowd_avg, avg_heading + toward_center, forces.sum);

        let combined = (forces.sum + avg_heading + crowd_avg + toward_center)
            .scaled(1.0 / (3 + forces.count) as f64);
        let desired = combined.normalized();
        if desired == Vec2::ZERO {
            (self.heading, dominant)
        } else {
            (desired, dominant)
        }
    }

    /// Turn toward `desired` by at most `turn_rate` degrees, then advance by
    /// one tick of movement, wrapping inside the arena.
    pub(crate) fn advance(&mut self, desired: Vec2, arena: Vec2) {
        self.heading = motion::turn_toward(self.heading, desired, self.turn_rate);
        debug_assert!((self.heading.length() - 1.0).abs() < 1e-9);
        self.position = motion::wrap(self.position + self.heading.scaled(self.speed), arena);
    }
}

fn dominant_force(crowding: Vec2, cohesion: Vec2, field: Vec2) -> DominantForce {
    let c = crowding.length();
    let h = cohesion.length();
    let f = field.length();
    if c == 0.0 && h == 0.0 && f == 0.0 {
        DominantForce::None
    } else if c >= h && c >= f {
        DominantForce::Crowding
    } else if h >= f {
        DominantForce::Cohesion
    } else {
        DominantForce::Field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biod(position: Vec2, heading_deg: f64) -> Biod {
        Biod::from_config(
            position,
            Vec2::from_angle_degrees(heading_deg),
            &SwarmConfig::default(),
        )
    }

    #[test]
    fn neighbor_behind_is_never_visible() {
        // Subject faces +x; the only other agent sits directly behind it.
        let subject = biod(Vec2::new(100.0, 100.0), 0.0);
        let behind = biod(Vec2::new(60.0, 100.0), 0.0);
        let others = vec![subject.clone(), behind];
        let (desired, dominant) =
            others[0].desired_heading(&others, &[1], &FieldAccum::default());
        // Nothing visible and no fields: heading is kept verbatim.
        assert_eq!(desired, others[0].heading);
        assert_eq!(dominant, DominantForce::None);
    }

    #[test]
    fn neighbor_on_the_exact_side_is_not_visible() {
        // dot == 0 sits outside the forward half-plane.
        let subject = biod(Vec2::new(100.0, 100.0), 0.0);
        let beside = biod(Vec2::new(100.0, 140.0), 0.0);
        let others = vec![subject, beside];
        let (desired, _) = others[0].desired_heading(&others, &[1], &FieldAccum::default());
        assert_eq!(desired, others[0].heading);
    }

    #[test]
    fn aligned_forward_neighbor_keeps_course() {
        // A neighbor straight ahead flying the same way reinforces the
        // current heading: cohesion and alignment both point along +x.
        let subject = biod(Vec2::new(100.0, 100.0), 0.0);
        let ahead = biod(Vec2::new(160.0, 100.0), 0.0);
        let others = vec![subject, ahead];
        let (desired, dominant) =
            others[0].desired_heading(&others, &[1], &FieldAccum::default());
        assert!((desired.x - 1.0).abs() < 1e-9);
        assert!(desired.y.abs() < 1e-9);
        assert_eq!(dominant, DominantForce::Cohesion);
    }

    #[test]
    fn overlapping_neighbor_triggers_crowding_dominance() {
        let subject = biod(Vec2::new(100.0, 100.0), 0.0);
        // Inside body_radius * 1.1 (7.7 for the default config).
        let overlapping = biod(Vec2::new(105.0, 100.0), 0.0);
        let others = vec![subject, overlapping];
        let (desired, dominant) =
            others[0].desired_heading(&others, &[1], &FieldAccum::default());
        assert_eq!(dominant, DominantForce::Crowding);
        // The penalty repulsion points back along -x and swamps cohesion.
        assert!(desired.x < 0.0, "expected retreat, got {desired:?}");
    }

    #[test]
    fn field_sum_dominates_when_strongest() {
        let subject = biod(Vec2::new(100.0, 100.0), 0.0);
        let others = vec![subject];
        let mut forces = FieldAccum::default();
        forces.push(Vec2::new(0.0, 25.0));
        let (desired, dominant) = others[0].desired_heading(&others, &[], &forces);
        assert_eq!(dominant, DominantForce::Field);
        // Only signal present: desired heading points along it.
        assert!(desired.y > 0.99);
    }

    #[test]
    fn field_count_dilutes_the_combined_vector_direction_invariantly() {
        // The denominator (3 + n) rescales but never redirects: desired
        // heading is the same unit vector for one or many contributions
        // summing to the same direction.
        let subject = biod(Vec2::new(100.0, 100.0), 90.0);
        let others = vec![subject];
        let mut one = FieldAccum::default();
        one.push(Vec2::new(4.0, 4.0));
        let mut many = FieldAccum::default();
        many.push(Vec2::new(2.0, 2.0));
        many.push(Vec2::new(1.0, 1.0));
        many.push(Vec2::new(1.0, 1.0));
        let (a, _) = others[0].desired_heading(&others, &[], &one);
        let (b, _) = others[0].desired_heading(&others, &[], &many);
        assert!((a.x - b.x).abs() < 1e-12 && (a.y - b.y).abs() < 1e-12);
    }

    #[test]
    fn advance_respects_turn_rate_and_speed() {
        let mut b = biod(Vec2::new(100.0, 100.0), 0.0);
        b.advance(Vec2::from_angle_degrees(90.0), Vec2::new(800.0, 600.0));
        // Turn limited to 10 degrees (default), then one speed-length step.
        assert!((b.heading.angle_degrees() - 10.0).abs() < 1e-9);
        let moved = Vec2::new(100.0, 100.0).distance_to(b.position);
        assert!((moved - b.speed).abs() < 1e-9);
    }
}
