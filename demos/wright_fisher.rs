//! A small Wright-Fisher forward simulation driving `tsbuild` directly,
//! without the (out of scope) ancestor matcher: each generation's
//! individuals are given a genome made of a single recombinant path
//! through last generation's population, so the builder sees the same
//! shape of input a real inference pipeline would produce.

use anyhow::Context;
use rand::distributions::Distribution;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::Uniform;
use tracing_subscriber::EnvFilter;

use tsbuild::prelude::*;

const NUM_SITES: usize = 50;
const POP_SIZE: usize = 20;
const NUM_GENERATIONS: usize = 8;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = StdRng::seed_from_u64(0xf15e_d00d);
    let mut builder = TreeSequenceBuilder::alloc(NUM_SITES, BuilderConfig::default());

    let mut generation: Vec<NodeId> = (0..POP_SIZE)
        .map(|_| builder.add_node(Time::from((NUM_GENERATIONS + 1) as f64), NodeFlags::IS_SAMPLE))
        .collect();

    let breakpoint_dist = Uniform::new(1, NUM_SITES as u64);
    let parent_dist = Uniform::new(0, POP_SIZE);

    for gen in (0..NUM_GENERATIONS).rev() {
        let time = Time::from(gen as f64);
        let mut next_generation = Vec::with_capacity(POP_SIZE);
        for _ in 0..POP_SIZE {
            let child = builder.add_node(time, NodeFlags::NONE);

            let left_parent = generation[parent_dist.sample(&mut rng)];
            let right_parent = generation[parent_dist.sample(&mut rng)];
            let breakpoint = breakpoint_dist.sample(&mut rng);

            // Edges are appended right-to-left, per `add_path`'s contract.
            let edges = [
                PathSegment {
                    left: Position::from(breakpoint),
                    right: Position::from(NUM_SITES as u64),
                    parent: right_parent,
                },
                PathSegment {
                    left: Position::from(0_u64),
                    right: Position::from(breakpoint),
                    parent: left_parent,
                },
            ];
            builder
                .add_path(child, &edges, PathFlags::COMPRESS_PATH)
                .with_context(|| format!("add_path failed for child {child} at generation {gen}"))?;

            next_generation.push(child);
        }
        generation = next_generation;
    }

    builder.freeze_indexes();
    let frozen = builder.frozen().expect("just frozen");
    tracing::info!(
        nodes = builder.get_num_nodes(),
        edges = builder.get_num_edges(),
        frozen_edges = frozen.num_edges(),
        "simulation complete"
    );

    let mut tables = TableCollection::new(NUM_SITES as u64);
    builder.dump(&mut tables, DumpFlags::NONE);

    let mut stderr = std::io::stderr();
    builder.print_state(&mut stderr)?;

    println!(
        "wrote {} nodes, {} edges, {} sites",
        tables.nodes().len(),
        tables.edges().len(),
        tables.sites().len()
    );

    Ok(())
}
