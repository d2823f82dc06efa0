//! Performance benchmark: sequential reference sweep vs. fork-join scheduler

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use mnca::{
    EvolutionRules, Grid, Scheduler,
    application::DEFAULT_RULE_PATH,
    domain::{ParseMode, load_rules},
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "benchmark")]
#[command(about = "Time generation steps for a rule file")]
struct Cli {
    /// Rule definition file (defaults to rules.txt)
    rule_file: Option<PathBuf>,
}

const SIZES: &[(usize, usize)] = &[(128, 96), (256, 192), (512, 384), (1024, 768)];
const GENERATIONS: u32 = 10;

fn seeded_grid(width: usize, height: usize, rules: &Arc<EvolutionRules>) -> Result<Grid> {
    let mut grid = Grid::new(width, height, Arc::clone(rules))?;
    grid.randomize(&mut StdRng::seed_from_u64(0x5eed), 0.6);
    Ok(grid)
}

fn benchmark_sequential(mut grid: Grid) -> f64 {
    let start = Instant::now();
    for _ in 0..GENERATIONS {
        grid.step_sequential();
    }
    start.elapsed().as_secs_f64() * 1000.0 / GENERATIONS as f64
}

fn benchmark_parallel(mut grid: Grid, scheduler: Scheduler) -> f64 {
    let start = Instant::now();
    for _ in 0..GENERATIONS {
        scheduler.step(&mut grid);
    }
    start.elapsed().as_secs_f64() * 1000.0 / GENERATIONS as f64
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let path = cli.rule_file.unwrap_or_else(|| PathBuf::from(DEFAULT_RULE_PATH));
    let rules = Arc::new(
        load_rules(&path, ParseMode::Permissive)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
    );
    let scheduler = Scheduler::with_host_parallelism();
    let members: usize = rules.neighborhoods().iter().map(|n| n.size()).sum();

    println!("=== MNCA Benchmark ===");
    println!(
        "{} neighborhoods ({} offsets total), {} rules, {} row chunks, {} generations per size\n",
        rules.neighborhoods().len(),
        members,
        rules.rules().len(),
        scheduler.chunks(),
        GENERATIONS
    );
    println!("{:>12} {:>14} {:>14} {:>9}", "Grid", "Sequential", "Parallel", "Speedup");

    for &(width, height) in SIZES {
        let sequential = benchmark_sequential(seeded_grid(width, height, &rules)?);
        let parallel = benchmark_parallel(seeded_grid(width, height, &rules)?, scheduler);
        println!(
            "{:>12} {:>11.2} ms {:>11.2} ms {:>8.1}x",
            format!("{}x{}", width, height),
            sequential,
            parallel,
            sequential / parallel
        );
    }

    Ok(())
}
