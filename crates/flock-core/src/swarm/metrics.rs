use super::Swarm;
use crate::biod::DominantForce;
use crate::vec2::Vec2;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Population-level snapshot taken after a tick. Serialized into run
/// summaries for hosts and offline analysis; nothing in here feeds back into
/// the simulation.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TickMetrics {
    pub tick: usize,
    pub agent_count: usize,
    pub predator_count: usize,
    pub field_count: usize,
    pub eaten: usize,
    pub total_eaten: usize,
    /// Flocking order parameter: magnitude of the mean heading, in `[0, 1]`.
    /// 1 means perfect alignment, 0 means headings cancel out.
    pub polarization: f64,
    pub dominant_crowding: usize,
    pub dominant_cohesion: usize,
    pub dominant_field: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub ticks: usize,
    pub sample_every: usize,
    pub final_agent_count: usize,
    pub total_eaten: usize,
    pub samples: Vec<TickMetrics>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    InvalidSampleEvery,
    TooManyTicks { max: usize, actual: usize },
    TooManySamples { max: usize, actual: usize },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            ExperimentError::TooManyTicks { max, actual } => {
                write!(f, "ticks ({actual}) exceed supported maximum ({max})")
            }
            ExperimentError::TooManySamples { max, actual } => {
                write!(
                    f,
                    "sample count ({actual}) exceeds supported maximum ({max})"
                )
            }
        }
    }
}

impl Error for ExperimentError {}

impl Swarm {
    pub const MAX_EXPERIMENT_TICKS: usize = 1_000_000;
    pub const MAX_EXPERIMENT_SAMPLES: usize = 50_000;

    pub fn collect_tick_metrics(&self) -> TickMetrics {
        let mut heading_sum = Vec2::ZERO;
        let mut crowding = 0usize;
        let mut cohesion = 0usize;
        let mut field = 0usize;
        for biod in &self.biods {
            heading_sum.accumulate(biod.heading);
            match biod.dominant {
                DominantForce::Crowding => crowding += 1,
                DominantForce::Cohesion => cohesion += 1,
                DominantForce::Field => field += 1,
                DominantForce::None => {}
            }
        }
        let polarization = if self.biods.is_empty() {
            0.0
        } else {
            heading_sum.scaled(1.0 / self.biods.len() as f64).length()
        };
        TickMetrics {
            tick: self.tick_index,
            agent_count: self.biods.len(),
            predator_count: self.predators.len(),
            field_count: self.fields.len(),
            eaten: self.eaten_last_tick,
            total_eaten: self.total_eaten,
            polarization,
            dominant_crowding: crowding,
            dominant_cohesion: cohesion,
            dominant_field: field,
        }
    }

    pub fn run_experiment(&mut self, ticks: usize, sample_every: usize) -> RunSummary {
        self.try_run_experiment(ticks, sample_every)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Run `ticks` steps, sampling metrics every `sample_every` ticks (the
    /// final tick is always sampled).
    pub fn try_run_experiment(
        &mut self,
        ticks: usize,
        sample_every: usize,
    ) -> Result<RunSummary, ExperimentError> {
        if sample_every == 0 {
            return Err(ExperimentError::InvalidSampleEvery);
        }
        if ticks > Self::MAX_EXPERIMENT_TICKS {
            return Err(ExperimentError::TooManyTicks {
                max: Self::MAX_EXPERIMENT_TICKS,
                actual: ticks,
            });
        }
        let estimated_samples = if ticks == 0 {
            0
        } else {
            ((ticks - 1) / sample_every) + 1
        };
        if estimated_samples > Self::MAX_EXPERIMENT_SAMPLES {
            return Err(ExperimentError::TooManySamples {
                max: Self::MAX_EXPERIMENT_SAMPLES,
                actual: estimated_samples,
            });
        }

        let mut samples = Vec::with_capacity(estimated_samples);
        for tick in 1..=ticks {
            self.tick();
            if tick % sample_every == 0 || tick == ticks {
                samples.push(self.collect_tick_metrics());
            }
        }
        Ok(RunSummary {
            schema_version: 1,
            ticks,
            sample_every,
            final_agent_count: self.biods.len(),
            total_eaten: self.total_eaten,
            samples,
        })
    }
}
