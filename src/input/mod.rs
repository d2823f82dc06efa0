use macroquad::prelude::*;

use crate::application::Simulation;

/// Process keyboard input functionally
pub fn process_keyboard_input(sim: Simulation) -> Simulation {
    type KeyAction = (KeyCode, fn(Simulation) -> Simulation);

    let actions: [KeyAction; 6] = [
        (KeyCode::Space, Simulation::toggle_running),
        (KeyCode::N, Simulation::step),
        (KeyCode::Right, Simulation::step),
        (KeyCode::R, Simulation::reseed),
        (KeyCode::Up, |s| s.adjust_speed(5.0)),
        (KeyCode::Down, |s| s.adjust_speed(-5.0)),
    ];

    actions.iter().fold(sim, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    })
}

/// Escape closes the window
pub fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Escape)
}
