//! Radial force emitters. A [`ForceField`] pushes a direction-scaled
//! contribution into the per-tick accumulator of every agent inside its
//! radius; agents consume the accumulated sum when steering.

use crate::biod::Biod;
use crate::vec2::Vec2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::{error::Error, fmt};

/// Distance-to-force-reduction function of a [`ForceField`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Falloff {
    #[default]
    Linear,
    Logarithmic,
    Quadratic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFalloffError {
    input: String,
}

impl fmt::Display for ParseFalloffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized falloff {:?} (expected linear, logarithmic, or quadratic)",
            self.input
        )
    }
}

impl Error for ParseFalloffError {}

impl FromStr for Falloff {
    type Err = ParseFalloffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Falloff::Linear),
            "logarithmic" | "log" => Ok(Falloff::Logarithmic),
            "quadratic" => Ok(Falloff::Quadratic),
            _ => Err(ParseFalloffError { input: s.to_owned() }),
        }
    }
}

/// A positioned, radius-bounded attractive or repulsive influence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForceField {
    pub position: Vec2,
    pub strength: f64,
    pub radius: f64,
    pub falloff: Falloff,
    pub repels: bool,
}

/// One agent's per-tick sum of field contributions. Owned by the tick
/// orchestrator, sized to the agent population, and dropped when the tick
/// completes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldAccum {
    pub sum: Vec2,
    pub count: usize,
}

impl FieldAccum {
    pub(crate) fn push(&mut self, contribution: Vec2) {
        self.sum.accumulate(contribution);
        self.count += 1;
    }
}

impl ForceField {
    /// Force magnitude felt at `distance` from the field center. Zero at or
    /// beyond `radius`.
    pub fn influence_at(&self, distance: f64) -> f64 {
        if distance >= self.radius {
            return 0.0;
        }
        let falloff = match self.falloff {
            Falloff::Linear => self.strength.min(distance),
            Falloff::Logarithmic => distance.ln().max(0.0),
            Falloff::Quadratic => (distance * distance).max(0.0),
        };
        (self.strength - falloff).max(0.0)
    }

    /// Push this field's contribution into the accumulator of every agent
    /// inside `radius`: toward the field when attractive, away when
    /// repulsive. Agents at or beyond the radius are untouched. Mutates only
    /// the accumulators.
    pub fn apply(&self, biods: &[Biod], accum: &mut [FieldAccum]) {
        debug_assert_eq!(biods.len(), accum.len());
        for (biod, acc) in biods.iter().zip(accum.iter_mut()) {
            let distance = biod.position.distance_to(self.position);
            if distance >= self.radius {
                continue;
            }
            let influence = self.influence_at(distance);
            let toward = biod.position.direction_to(self.position);
            let contribution = if self.repels {
                toward.scaled(-influence)
            } else {
                toward.scaled(influence)
            };
            acc.push(contribution);
        }
    }
}
