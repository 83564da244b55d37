pub mod metrics;
mod tick;

pub use metrics::*;
pub use tick::TickTimings;

use crate::biod::Biod;
use crate::config::{SwarmConfig, SwarmConfigError};
use crate::field::{Falloff, ForceField};
use crate::motion;
use crate::predator::Predator;
use crate::vec2::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Owns the agent, predator, and field populations and orchestrates the
/// per-tick update. There is no ambient state: hosts hold a `Swarm` and call
/// [`Swarm::tick`] from their own fixed-timestep driver.
pub struct Swarm {
    pub(crate) biods: Vec<Biod>,
    pub(crate) predators: Vec<Predator>,
    pub(crate) fields: Vec<ForceField>,
    pub(crate) pointer: ForceField,
    pub(crate) pointer_active: bool,
    pub(crate) arena: Vec2,
    pub(crate) config: SwarmConfig,
    pub(crate) rng: ChaCha12Rng,
    pub(crate) tick_index: usize,
    pub(crate) eaten_last_tick: usize,
    pub(crate) total_eaten: usize,
}

impl Swarm {
    pub fn new(config: SwarmConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(config: SwarmConfig) -> Result<Self, SwarmConfigError> {
        config.validate()?;
        let arena = Vec2::new(config.arena_width, config.arena_height);
        let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
        let biods = (0..config.agent_count)
            .map(|_| {
                let position = Vec2::new(
                    rng.random::<f64>() * arena.x,
                    rng.random::<f64>() * arena.y,
                );
                let heading = Vec2::from_angle_degrees(rng.random::<f64>() * 360.0);
                Biod::from_config(position, heading, &config)
            })
            .collect();
        let pointer = ForceField {
            position: Vec2::ZERO,
            strength: config.pointer_field_strength,
            radius: config.pointer_field_radius,
            falloff: config.pointer_falloff,
            repels: false,
        };
        log::debug!(
            "spawned swarm: {} agents in {}x{} arena (seed {})",
            config.agent_count,
            arena.x,
            arena.y,
            config.seed
        );
        Ok(Self {
            biods,
            predators: Vec::new(),
            fields: Vec::new(),
            pointer,
            pointer_active: false,
            arena,
            config,
            rng,
            tick_index: 0,
            eaten_last_tick: 0,
            total_eaten: 0,
        })
    }

    /// Discard every entity and rebuild from `config` — wholesale
    /// replacement, including the spawn RNG. On error the swarm is left
    /// untouched.
    pub fn reset(&mut self, config: SwarmConfig) -> Result<(), SwarmConfigError> {
        *self = Self::try_new(config)?;
        Ok(())
    }

    /// Append one agent at `position` (wrapped into the arena) with a random
    /// heading, using the swarm's configured steering parameters.
    pub fn add_agent(&mut self, position: Vec2) -> Result<(), SwarmConfigError> {
        if self.biods.len() >= SwarmConfig::MAX_AGENTS {
            return Err(SwarmConfigError::TooManyAgents {
                max: SwarmConfig::MAX_AGENTS,
                actual: self.biods.len() + 1,
            });
        }
        let heading = Vec2::from_angle_degrees(self.rng.random::<f64>() * 360.0);
        let position = motion::wrap(position, self.arena);
        self.biods.push(Biod::from_config(position, heading, &self.config));
        Ok(())
    }

    /// Append one predator at `position` with a random heading. Its repulsive
    /// field is created alongside and follows it for the rest of the run.
    pub fn add_predator(&mut self, position: Vec2) {
        let heading = Vec2::from_angle_degrees(self.rng.random::<f64>() * 360.0);
        let position = motion::wrap(position, self.arena);
        self.predators
            .push(Predator::from_config(position, heading, &self.config));
    }

    /// Append a user-placed field. Fields are only ever added within a run;
    /// `reset` discards them.
    pub fn add_field(
        &mut self,
        position: Vec2,
        strength: f64,
        radius: f64,
        falloff: Falloff,
        repels: bool,
    ) -> Result<(), SwarmConfigError> {
        if !(radius > 0.0) {
            return Err(SwarmConfigError::NonPositive {
                name: "field radius",
                value: radius,
            });
        }
        if !(strength >= 0.0) {
            return Err(SwarmConfigError::NegativeStrength {
                name: "field strength",
                value: strength,
            });
        }
        self.fields.push(ForceField {
            position: motion::wrap(position, self.arena),
            strength,
            radius,
            falloff,
            repels,
        });
        Ok(())
    }

    /// Update the transient pointer-driven field. While `active`, it
    /// participates in field application exactly like a user-placed field.
    pub fn set_pointer_field(&mut self, position: Vec2, repels: bool, active: bool) {
        self.pointer.position = position;
        self.pointer.repels = repels;
        self.pointer_active = active;
    }

    pub fn biods(&self) -> &[Biod] {
        &self.biods
    }

    pub fn predators(&self) -> &[Predator] {
        &self.predators
    }

    /// User-placed fields only; each predator's owned field is reachable via
    /// [`crate::Predator::field`].
    pub fn fields(&self) -> &[ForceField] {
        &self.fields
    }

    pub fn pointer_field(&self) -> Option<&ForceField> {
        self.pointer_active.then_some(&self.pointer)
    }

    pub fn agent_count(&self) -> usize {
        self.biods.len()
    }

    pub fn tick_index(&self) -> usize {
        self.tick_index
    }

    pub fn eaten_last_tick(&self) -> usize {
        self.eaten_last_tick
    }

    pub fn total_eaten(&self) -> usize {
        self.total_eaten
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }
}
