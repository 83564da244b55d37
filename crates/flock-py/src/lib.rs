//! PyO3 module exposing flock-core to a Python scene host. The host owns the
//! fixed-timestep driver and rendering; it consumes only the read-only state
//! exported here.

use flock_core::{Falloff, SwarmConfig, Vec2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyfunction]
fn version() -> &'static str {
    "0.1.0"
}

#[pyclass]
struct Swarm {
    inner: flock_core::Swarm,
}

#[pymethods]
impl Swarm {
    /// Build a swarm from a JSON-encoded configuration; omitted keys take
    /// their defaults. `Swarm()` uses the default configuration.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config: SwarmConfig = match config_json {
            Some(json) => {
                serde_json::from_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?
            }
            None => SwarmConfig::default(),
        };
        let inner =
            flock_core::Swarm::try_new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Advance the simulation by exactly one step.
    fn tick(&mut self) {
        self.inner.tick();
    }

    /// Discard every entity and rebuild from a JSON-encoded configuration.
    fn reset(&mut self, config_json: &str) -> PyResult<()> {
        let config: SwarmConfig =
            serde_json::from_str(config_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.inner
            .reset(config)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn agent_count(&self) -> usize {
        self.inner.agent_count()
    }

    fn tick_index(&self) -> usize {
        self.inner.tick_index()
    }

    fn total_eaten(&self) -> usize {
        self.inner.total_eaten()
    }

    fn agent_positions(&self) -> Vec<(f64, f64)> {
        self.inner
            .biods()
            .iter()
            .map(|b| (b.position.x, b.position.y))
            .collect()
    }

    fn agent_headings(&self) -> Vec<(f64, f64)> {
        self.inner
            .biods()
            .iter()
            .map(|b| (b.heading.x, b.heading.y))
            .collect()
    }

    /// Per-agent dominant-influence labels ("none", "crowding", "cohesion",
    /// or "field"), aligned with `agent_positions`.
    fn dominant_forces(&self) -> Vec<&'static str> {
        self.inner
            .biods()
            .iter()
            .map(|b| b.dominant.as_str())
            .collect()
    }

    fn predator_positions(&self) -> Vec<(f64, f64)> {
        self.inner
            .predators()
            .iter()
            .map(|p| (p.position.x, p.position.y))
            .collect()
    }

    /// User-placed fields as (x, y, strength, radius, repels) tuples.
    fn fields(&self) -> Vec<(f64, f64, f64, f64, bool)> {
        self.inner
            .fields()
            .iter()
            .map(|f| (f.position.x, f.position.y, f.strength, f.radius, f.repels))
            .collect()
    }

    fn add_agent(&mut self, x: f64, y: f64) -> PyResult<()> {
        self.inner
            .add_agent(Vec2::new(x, y))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn add_predator(&mut self, x: f64, y: f64) {
        self.inner.add_predator(Vec2::new(x, y));
    }

    #[pyo3(signature = (x, y, strength, radius, falloff="linear", repels=false))]
    fn add_field(
        &mut self,
        x: f64,
        y: f64,
        strength: f64,
        radius: f64,
        falloff: &str,
        repels: bool,
    ) -> PyResult<()> {
        let falloff: Falloff = falloff
            .parse()
            .map_err(|e: flock_core::ParseFalloffError| PyValueError::new_err(e.to_string()))?;
        self.inner
            .add_field(Vec2::new(x, y), strength, radius, falloff, repels)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn set_pointer_field(&mut self, x: f64, y: f64, repels: bool, active: bool) {
        self.inner.set_pointer_field(Vec2::new(x, y), repels, active);
    }

    /// Run `ticks` steps sampling metrics every `sample_every` ticks and
    /// return the run summary as JSON.
    fn run(&mut self, ticks: usize, sample_every: usize) -> PyResult<String> {
        let summary = self
            .inner
            .try_run_experiment(ticks, sample_every)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        serde_json::to_string(&summary).map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_class::<Swarm>()?;
    Ok(())
}
