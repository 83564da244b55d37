use super::Swarm;
use crate::biod::{Biod, DominantForce};
use crate::field::FieldAccum;
use crate::spatial;
use crate::vec2::Vec2;
use rayon::prelude::*;
use std::time::Instant;

/// Wall-clock breakdown of one tick's phases, microseconds. Observability
/// only; simulation state never depends on it.
#[derive(Clone, Debug)]
pub struct TickTimings {
    pub predation_us: u64,
    pub field_us: u64,
    pub predator_us: u64,
    pub agent_us: u64,
    pub total_us: u64,
}

fn elapsed_us(since: Instant) -> u64 {
    since.elapsed().as_micros() as u64
}

impl Swarm {
    /// Advance the simulation by exactly one step.
    ///
    /// Phase order is fixed: predation resolution, field application,
    /// predator update, agent update. Within each population every desired
    /// heading is computed from one immutable snapshot before any member
    /// moves, so iteration order cannot bias steering. Predators are fully
    /// processed before agents compute headings, so predator repositioning
    /// (and the scare fields it drags along) is visible to agents in the same
    /// tick, while agent repositioning is never visible to predators until
    /// the next one.
    pub fn tick(&mut self) -> TickTimings {
        let total_start = Instant::now();
        self.tick_index += 1;
        self.eaten_last_tick = 0;

        let t0 = Instant::now();
        self.resolve_predation();
        let predation_us = elapsed_us(t0);

        // The accumulator is owned here, sized to the post-predation
        // population, and dropped when the tick completes.
        let t1 = Instant::now();
        let mut accum = vec![FieldAccum::default(); self.biods.len()];
        for field in &self.fields {
            field.apply(&self.biods, &mut accum);
        }
        if self.pointer_active {
            self.pointer.apply(&self.biods, &mut accum);
        }
        let field_us = elapsed_us(t1);

        let t2 = Instant::now();
        self.update_predators(&mut accum);
        let predator_us = elapsed_us(t2);

        let t3 = Instant::now();
        self.update_biods(&accum);
        let agent_us = elapsed_us(t3);

        TickTimings {
            predation_us,
            field_us,
            predator_us,
            agent_us,
            total_us: elapsed_us(total_start),
        }
    }

    /// Remove every agent within kill range of any predator: a read-only
    /// mark pass over the population, then one batch removal, so several
    /// agents can be eaten in the same tick and iteration never observes a
    /// mutating collection.
    fn resolve_predation(&mut self) {
        if self.predators.is_empty() || self.biods.is_empty() {
            return;
        }
        let doomed: Vec<bool> = self
            .biods
            .iter()
            .map(|biod| {
                self.predators.iter().any(|predator| {
                    predator.position.distance_to(biod.position)
                        < biod.body_radius.max(predator.body_radius)
                })
            })
            .collect();
        let before = self.biods.len();
        let mut index = 0;
        self.biods.retain(|_| {
            let keep = !doomed[index];
            index += 1;
            keep
        });
        let eaten = before - self.biods.len();
        if eaten > 0 {
            self.eaten_last_tick = eaten;
            self.total_eaten += eaten;
            log::debug!(
                "tick {}: {} agent(s) eaten, {} remain",
                self.tick_index,
                eaten,
                self.biods.len()
            );
        }
    }

    /// Desired headings for all predators from the pre-movement agent
    /// snapshot, then movement. Each move re-syncs the predator's owned field
    /// and applies it into the same accumulators agents consume this tick.
    fn update_predators(&mut self, accum: &mut [FieldAccum]) {
        let desired: Vec<Vec2> = self
            .predators
            .iter()
            .map(|predator| predator.desired_heading(&self.biods).unwrap_or(predator.heading))
            .collect();
        for (predator, desired) in self.predators.iter_mut().zip(desired) {
            predator.advance(desired, self.arena);
            predator.field().apply(&self.biods, accum);
        }
    }

    /// Desired headings for all agents from one snapshot (post-predator
    /// movement), then movement. The per-agent computation is pure and
    /// results are collected in index order, so the rayon path is
    /// tick-for-tick identical to the sequential one.
    fn update_biods(&mut self, accum: &[FieldAccum]) {
        let biods = &self.biods;
        let tree = spatial::build_index(biods);
        let compute = |(index, biod): (usize, &Biod)| {
            let neighbors = spatial::neighbors_within(
                &tree,
                [biod.position.x, biod.position.y],
                biod.sight_radius,
                index,
            );
            biod.desired_heading(biods, &neighbors, &accum[index])
        };
        let desired: Vec<(Vec2, DominantForce)> = if self.config.parallel {
            biods.par_iter().enumerate().map(compute).collect()
        } else {
            biods.iter().enumerate().map(compute).collect()
        };

        let arena = self.arena;
        for (biod, (heading, dominant)) in self.biods.iter_mut().zip(desired) {
            biod.dominant = dominant;
            biod.advance(heading, arena);
        }
    }
}
