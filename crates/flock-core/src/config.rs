use crate::field::Falloff;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Swarm construction parameters. Validated before any entity is built, so a
/// tick never observes an invalid entity.
///
/// Spawn randomness (agent positions and headings) is drawn from a ChaCha
/// stream seeded with `seed`; the tick algorithm itself consumes none.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub agent_count: usize,
    pub agent_speed: f64,
    /// Maximum agent turn per tick, degrees.
    pub agent_turn_rate: f64,
    /// Agent body radius (kill range and overlap-penalty range).
    pub agent_radius: f64,
    /// Crowding-avoidance range; at least `agent_radius`.
    pub proximity_radius: f64,
    pub sight_radius: f64,
    pub crowding_severity: f64,
    pub arena_width: f64,
    pub arena_height: f64,
    pub predator_speed: f64,
    pub predator_turn_rate: f64,
    pub predator_radius: f64,
    pub predator_sight_radius: f64,
    pub predator_field_strength: f64,
    pub predator_field_radius: f64,
    pub pointer_field_strength: f64,
    pub pointer_field_radius: f64,
    pub pointer_falloff: Falloff,
    pub seed: u64,
    /// Compute desired headings on a rayon pool. Results are identical to the
    /// sequential path; off by default.
    pub parallel: bool,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            agent_count: 150,
            agent_speed: 2.0,
            agent_turn_rate: 10.0,
            agent_radius: 7.0,
            proximity_radius: 35.0,
            sight_radius: 80.0,
            crowding_severity: 1.0,
            arena_width: 800.0,
            arena_height: 600.0,
            predator_speed: 2.5,
            predator_turn_rate: 8.0,
            predator_radius: 10.0,
            predator_sight_radius: 120.0,
            predator_field_strength: 60.0,
            predator_field_radius: 90.0,
            pointer_field_strength: 50.0,
            pointer_field_radius: 100.0,
            pointer_falloff: Falloff::Linear,
            seed: 0,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwarmConfigError {
    TooManyAgents { max: usize, actual: usize },
    NonPositive { name: &'static str, value: f64 },
    NegativeStrength { name: &'static str, value: f64 },
    NegativeCrowdingSeverity { value: f64 },
    ProximityBelowBody { proximity: f64, body: f64 },
}

impl fmt::Display for SwarmConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwarmConfigError::TooManyAgents { max, actual } => {
                write!(f, "agent count ({actual}) exceeds supported maximum ({max})")
            }
            SwarmConfigError::NonPositive { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            SwarmConfigError::NegativeStrength { name, value } => {
                write!(f, "{name} must be non-negative, got {value}")
            }
            SwarmConfigError::NegativeCrowdingSeverity { value } => {
                write!(f, "crowding_severity must be non-negative, got {value}")
            }
            SwarmConfigError::ProximityBelowBody { proximity, body } => {
                write!(
                    f,
                    "proximity_radius ({proximity}) must be at least agent_radius ({body})"
                )
            }
        }
    }
}

impl Error for SwarmConfigError {}

impl SwarmConfig {
    pub const MAX_AGENTS: usize = 100_000;

    pub fn validate(&self) -> Result<(), SwarmConfigError> {
        if self.agent_count > Self::MAX_AGENTS {
            return Err(SwarmConfigError::TooManyAgents {
                max: Self::MAX_AGENTS,
                actual: self.agent_count,
            });
        }
        // `!(v > 0.0)` also rejects NaN.
        for (name, value) in [
            ("agent_speed", self.agent_speed),
            ("agent_turn_rate", self.agent_turn_rate),
            ("agent_radius", self.agent_radius),
            ("sight_radius", self.sight_radius),
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("predator_speed", self.predator_speed),
            ("predator_turn_rate", self.predator_turn_rate),
            ("predator_radius", self.predator_radius),
            ("predator_sight_radius", self.predator_sight_radius),
            ("predator_field_radius", self.predator_field_radius),
            ("pointer_field_radius", self.pointer_field_radius),
        ] {
            if !(value > 0.0) {
                return Err(SwarmConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("predator_field_strength", self.predator_field_strength),
            ("pointer_field_strength", self.pointer_field_strength),
        ] {
            if !(value >= 0.0) {
                return Err(SwarmConfigError::NegativeStrength { name, value });
            }
        }
        if !(self.crowding_severity >= 0.0) {
            return Err(SwarmConfigError::NegativeCrowdingSeverity {
                value: self.crowding_severity,
            });
        }
        if self.proximity_radius < self.agent_radius {
            return Err(SwarmConfigError::ProximityBelowBody {
                proximity: self.proximity_radius,
                body: self.agent_radius,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SwarmConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_kinematics() {
        let config = SwarmConfig {
            agent_speed: 0.0,
            ..SwarmConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SwarmConfigError::NonPositive { name: "agent_speed", .. })
        ));

        let config = SwarmConfig {
            arena_height: -10.0,
            ..SwarmConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SwarmConfigError::NonPositive { name: "arena_height", .. })
        ));
    }

    #[test]
    fn rejects_nan_dimensions() {
        let config = SwarmConfig {
            sight_radius: f64::NAN,
            ..SwarmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_proximity_tighter_than_body() {
        let config = SwarmConfig {
            agent_radius: 10.0,
            proximity_radius: 5.0,
            ..SwarmConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SwarmConfigError::ProximityBelowBody {
                proximity: 5.0,
                body: 10.0
            })
        );
    }

    #[test]
    fn rejects_agent_count_over_cap() {
        let config = SwarmConfig {
            agent_count: SwarmConfig::MAX_AGENTS + 1,
            ..SwarmConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SwarmConfigError::TooManyAgents { .. })
        ));
    }

    #[test]
    fn config_round_trips_through_json_with_defaults() {
        let parsed: SwarmConfig =
            serde_json::from_str(r#"{"agent_count": 12, "seed": 7}"#).unwrap();
        assert_eq!(parsed.agent_count, 12);
        assert_eq!(parsed.seed, 7);
        assert_eq!(parsed.arena_width, SwarmConfig::default().arena_width);

        let full = serde_json::to_string(&parsed).unwrap();
        let back: SwarmConfig = serde_json::from_str(&full).unwrap();
        assert_eq!(back.agent_count, 12);
        assert_eq!(back.pointer_falloff, Falloff::Linear);
    }
}
