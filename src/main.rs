use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use macroquad::prelude::{BLACK, Conf, clear_background, get_frame_time, next_frame};
use mnca::{
    Grid, Simulation, SimulationConfig,
    domain::load_rules,
    input, rendering::{self, FrameRenderer},
};

#[derive(Parser)]
#[command(name = "mnca")]
#[command(about = "Multiple-neighborhood cellular automaton simulator")]
struct Cli {
    /// Rule definition file (defaults to rules.txt)
    rule_file: Option<PathBuf>,
}

fn window_conf(config: &SimulationConfig) -> Conf {
    Conf {
        window_title: "MNCA Simulator".to_owned(),
        window_width: (config.width as u32 * config.cell_scale) as i32,
        window_height: (config.height as u32 * config.cell_scale) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = SimulationConfig::default().with_rule_path(cli.rule_file);
    config.validate().context("invalid configuration")?;

    // Nothing else is built until the rules are in hand
    let rules = load_rules(&config.rule_path, config.parse_mode)
        .with_context(|| format!("failed to load rules from {}", config.rule_path.display()))?;
    let grid = Grid::new(config.width, config.height, Arc::new(rules))
        .context("rule neighborhoods do not fit the grid")?;

    let sim = Simulation::from_config(grid, &config);
    log::info!(
        "starting {}x{} grid with {} row chunks, initial population {}",
        config.width,
        config.height,
        sim.scheduler.chunks(),
        sim.grid.population()
    );

    macroquad::Window::from_config(window_conf(&config), run(sim));
    Ok(())
}

async fn run(mut sim: Simulation) {
    let (width, height) = sim.grid.dimensions();
    let mut renderer = FrameRenderer::new(width, height);

    loop {
        if input::quit_requested() {
            break;
        }
        sim = input::process_keyboard_input(sim);
        sim = sim.tick(get_frame_time());

        let render_start = std::time::Instant::now();
        clear_background(BLACK);
        renderer.draw(sim.grid.cells());
        rendering::draw_overlay(&sim);
        sim.last_render_time_ms = render_start.elapsed().as_secs_f32() * 1000.0;

        next_frame().await;
    }
}
