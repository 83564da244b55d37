use flock_core::{Swarm, SwarmConfig, Vec2};
use std::time::Instant;

fn build(config: &SwarmConfig) -> Swarm {
    let mut swarm = Swarm::new(config.clone());
    swarm.add_predator(Vec2::new(1000.0, 1000.0));
    swarm
}

fn main() {
    let agents = 5_000;
    let ticks = 200u32;
    println!("Benchmarking {agents} agents, 1 predator, {ticks} ticks");

    let config = SwarmConfig {
        agent_count: agents,
        arena_width: 2000.0,
        arena_height: 2000.0,
        seed: 42,
        ..SwarmConfig::default()
    };
    let mut swarm1 = build(&config);
    let mut swarm2 = build(&config);

    // Run WITHOUT metrics, accumulating the per-phase breakdown.
    let start = Instant::now();
    let mut predation_us = 0u64;
    let mut field_us = 0u64;
    let mut predator_us = 0u64;
    let mut agent_us = 0u64;
    for _ in 0..ticks {
        let t = swarm1.tick();
        predation_us += t.predation_us;
        field_us += t.field_us;
        predator_us += t.predator_us;
        agent_us += t.agent_us;
    }
    let duration_no_metrics = start.elapsed();
    println!("Time for {ticks} ticks WITHOUT metrics: {duration_no_metrics:?}");
    println!("Avg time per tick (no metrics): {:?}", duration_no_metrics / ticks);
    println!(
        "Phase totals: predation {predation_us}us, fields {field_us}us, \
         predators {predator_us}us, agents {agent_us}us"
    );

    // Run WITH metrics sampled every tick.
    let start = Instant::now();
    swarm2.run_experiment(ticks as usize, 1);
    let duration_metrics = start.elapsed();
    println!("Time for {ticks} ticks WITH metrics: {duration_metrics:?}");
    println!("Avg time per tick (with metrics): {:?}", duration_metrics / ticks);

    let diff = duration_metrics.saturating_sub(duration_no_metrics);
    println!("Total metrics overhead: {diff:?}");
    println!("Avg metrics overhead per tick: {:?}", diff / ticks);
}
