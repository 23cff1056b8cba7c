//! Meteor Defense native entry point
//!
//! There is no window here: the binary drives the full state machine with
//! scripted input, lets the autopilot play one session to the end and logs a
//! JSON summary. `RUST_LOG=info` shows the mode transitions.

use std::time::{SystemTime, UNIX_EPOCH};

use meteor_defense::demo::Autopilot;
use meteor_defense::input::{KeyboardState, PointerState};
use meteor_defense::{Difficulty, Flow, Game, Mode, Settings};

const SETTINGS_PATH: &str = "settings.json";
/// One hour of play at the nominal tick rate
const MAX_TICKS: u64 = 60 * 60 * meteor_defense::consts::TICK_RATE as u64;

fn main() {
    env_logger::init();
    log::info!("Meteor Defense (native) starting...");

    let settings = Settings::load_or_default(SETTINGS_PATH);
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut game = Game::new(&settings, seed);

    let difficulty = Difficulty::default();

    let start = game.buttons().start.center();
    click(&mut game, start.x, start.y);
    let pick = match difficulty {
        Difficulty::Easy => game.buttons().easy.center(),
        Difficulty::Medium => game.buttons().medium.center(),
        Difficulty::Hard => game.buttons().hard.center(),
    };
    click(&mut game, pick.x, pick.y);

    let mut pilot = Autopilot::new();
    let mut ticks = 0;
    while game.mode() == Mode::Playing && ticks < MAX_TICKS {
        let pointer = pilot.pointer(game.session());
        game.tick(pointer, KeyboardState::default());
        ticks += 1;
    }

    match serde_json::to_string(&game.session().summary()) {
        Ok(json) => log::info!("Session summary: {}", json),
        Err(e) => log::warn!("Could not serialize session summary: {}", e),
    }
    if let Some(rank) = game.last_rank() {
        log::info!("New high score at rank {}", rank);
    }
    for line in game.board().lines() {
        log::info!("{}", line);
    }

    // Leave via the menu the way a player would
    while escape(&mut game) == Flow::Continue {}
    log::info!("Bye");
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn click(game: &mut Game, x: f32, y: f32) -> Flow {
    game.tick(PointerState::new(x, y, true), KeyboardState::default());
    game.tick(PointerState::new(x, y, false), KeyboardState::default())
}

fn escape(game: &mut Game) -> Flow {
    game.tick(PointerState::default(), KeyboardState { escape: true });
    game.tick(PointerState::default(), KeyboardState { escape: false })
}
