use macroquad::prelude::*;

use crate::application::Simulation;
use crate::domain::Cell;

/// Age at which the palette reaches its darkest shade
const AGE_SATURATION: u32 = 64;

/// Map a cell to an RGBA color. Dead cells are black; alive cells start
/// bright and fade toward deep teal as they age.
pub fn cell_color(cell: Cell) -> [u8; 4] {
    if !cell.alive {
        return [0, 0, 0, 255];
    }
    let t = cell.age.min(AGE_SATURATION) as f32 / AGE_SATURATION as f32;
    let lerp = |from: f32, to: f32| (from + (to - from) * t).round() as u8;
    [lerp(255.0, 0.0), lerp(255.0, 120.0), lerp(255.0, 140.0), 255]
}

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Uploads the cell buffer to a texture once per frame and draws it
/// stretched over the window.
pub struct FrameRenderer {
    image: Image,
    texture: Texture2D,
}

impl FrameRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let image = Image::gen_image_color(width as u16, height as u16, BLACK);
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);
        Self { image, texture }
    }

    /// Draw a row-major cell snapshot
    pub fn draw(&mut self, cells: &[Cell]) {
        self.image
            .bytes
            .chunks_exact_mut(4)
            .zip(cells)
            .for_each(|(pixel, cell)| pixel.copy_from_slice(&cell_color(*cell)));
        self.texture.update(&self.image);

        draw_texture_ex(
            &self.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
    }
}

/// Draw the status overlay in the top-left corner
pub fn draw_overlay(sim: &Simulation) {
    let (gw, gh) = sim.grid.dimensions();
    let step_ms = sim.last_step_time_ms;

    // Color code the step time
    let perf_color = if step_ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if step_ms < 16.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else if step_ms < 50.0 {
        Color::from_rgba(255, 165, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    };
    let status_color = if sim.is_running {
        Color::from_rgba(0, 255, 0, 255)
    } else {
        Color::from_rgba(255, 165, 0, 255)
    };
    let dim = Color::from_rgba(200, 200, 200, 255);

    let labels = [
        (format!("Generation: {}", sim.generation), WHITE),
        (format!("Population: {}", format_number(sim.grid.population())), dim),
        (format!("Grid: {}x{} | Workers: {}", gw, gh, sim.scheduler.chunks()), dim),
        (format!("Step: {:.1}ms", step_ms), perf_color),
        (format!("Render: {:.1}ms | FPS: {}", sim.last_render_time_ms, get_fps()), dim),
        (format!("Speed: {:.0} gen/s", sim.updates_per_second), dim),
        (
            if sim.is_running { "Running".to_string() } else { "Paused".to_string() },
            status_color,
        ),
        ("Space pause | N step | R reseed | Up/Down speed".to_string(), GRAY),
    ];

    draw_rectangle(4.0, 4.0, 330.0, 18.0 * labels.len() as f32 + 8.0, Color::from_rgba(0, 0, 0, 170));
    labels.iter().enumerate().for_each(|(i, (text, color))| {
        draw_text(text, 10.0, 22.0 + 18.0 * i as f32, 18.0, *color);
    });
}
