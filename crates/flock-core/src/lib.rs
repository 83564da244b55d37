//! Headless flocking simulation engine: agents steering by neighbor
//! alignment/cohesion and crowding avoidance on a toroidal 2D arena, shaped
//! by radial force emitters and hunted by predators. Rendering, input, and
//! the fixed-timestep driver belong to external hosts that consume the
//! read-only state exposed by [`Swarm`].

pub mod biod;
pub mod config;
pub mod field;
mod motion;
pub mod predator;
mod spatial;
pub mod swarm;
pub mod vec2;

pub use biod::{Biod, DominantForce};
pub use config::{SwarmConfig, SwarmConfigError};
pub use field::{Falloff, FieldAccum, ForceField, ParseFalloffError};
pub use predator::Predator;
pub use swarm::{ExperimentError, RunSummary, Swarm, TickMetrics, TickTimings};
pub use vec2::Vec2;
