use anyhow::{Result, bail};
use clap::Parser;
use levelgen::mapgen::validate::{
    floor_count, is_fully_connected, overlapping_zone_pairs, reachable_floor_count,
    wall_inconsistencies,
};
use levelgen::mapgen::{LevelDescriptor, LevelGenerator};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of generator instances to exercise
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    /// Levels generated per instance
    #[arg(short, long, default_value_t = 3)]
    levels: u32,
    #[arg(long, default_value_t = 63)]
    max_size: usize,
}

fn pick_size(rng: &mut ChaCha8Rng, max_size: usize) -> usize {
    5 + (rng.next_u64() as usize % max_size.saturating_sub(4).max(1))
}

fn check_invariants(level: &LevelDescriptor) -> Vec<String> {
    let mut failures = Vec::new();
    if !level.connectivity.is_complete() {
        failures.push(format!("partial connectivity {:?}", level.connectivity));
    }
    if !is_fully_connected(level) {
        failures.push(format!(
            "reached {} of {} floor tiles from {:?}",
            reachable_floor_count(level),
            floor_count(level),
            level.start
        ));
    }
    let mismatches = wall_inconsistencies(level);
    if !mismatches.is_empty() {
        failures.push(format!("{} inconsistent wall edges", mismatches.len()));
    }
    for (left, right) in overlapping_zone_pairs(&level.override_zones) {
        failures.push(format!("zones {left} and {right} overlap"));
    }
    if level.stairs_up.is_some_and(|pos| !level.is_floor(pos))
        || level.stairs_down.is_some_and(|pos| !level.is_floor(pos))
    {
        failures.push("stairs placed on a solid tile".to_string());
    }
    failures
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seed {} for {} runs of {} levels...",
        args.seed, args.runs, args.levels
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut failed_runs = 0_u32;

    for run in 0..args.runs {
        let width = pick_size(&mut rng, args.max_size);
        let height = pick_size(&mut rng, args.max_size);
        let level_seed = rng.next_u64();
        let mut generator = LevelGenerator::new(width, height, Some(level_seed.into()))?;

        for level_number in 1..=args.levels {
            let level = generator.generate_level(level_number);
            let failures = check_invariants(&level);
            if !failures.is_empty() {
                failed_runs += 1;
                println!(
                    "run {run}: seed {level_seed} {width}x{height} level {level_number} failed:"
                );
                for failure in failures {
                    println!("  - {failure}");
                }
                break;
            }
        }
    }

    if failed_runs > 0 {
        bail!("{failed_runs} of {} runs violated level invariants", args.runs);
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
