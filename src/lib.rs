//! Meteor Defense - a top-down city defense arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, score)
//! - `game`: Top-level mode state machine (menus, difficulty, game over)
//! - `input`: Polled pointer/keyboard snapshots and click targets
//! - `highscores`: Plain-text top-five leaderboard
//! - `settings`: Difficulty table and JSON configuration
//! - `demo`: Autopilot used by the headless binary

pub mod demo;
pub mod game;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;

pub use game::{Flow, Game, InfoKind, Mode};
pub use highscores::{HighScoreBoard, HighScoreError, HighScores};
pub use settings::{Difficulty, Settings, SettingsError};

/// Game configuration constants
///
/// All speeds and cadences are "per tick": the simulation assumes a fixed
/// tick rate and does not scale by elapsed wall-clock time.
pub mod consts {
    /// Nominal tick rate the per-tick constants were balanced against
    pub const TICK_RATE: u32 = 60;

    /// Default playfield
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Meteor sprite frame (also its collision box)
    pub const METEOR_WIDTH: f32 = 41.0;
    pub const METEOR_HEIGHT: f32 = 92.0;
    pub const METEOR_SPAWN_Y: f32 = -50.0;
    /// Distance travelled per tick
    pub const METEOR_SPEED: f32 = 6.0;
    pub const METEOR_FRAMES: u32 = 4;
    pub const METEOR_FRAME_DELAY: u32 = 5;

    /// Shot sprite frame (also its collision box)
    pub const SHOT_WIDTH: f32 = 19.0;
    pub const SHOT_HEIGHT: f32 = 59.0;
    pub const SHOT_SPEED: f32 = 8.0;
    pub const SHOT_FRAMES: u32 = 4;
    pub const SHOT_FRAME_DELAY: u32 = 7;

    /// City sprite frame; the collision box only covers the top third
    pub const CITY_WIDTH: f32 = 172.0;
    pub const CITY_HEIGHT: f32 = 126.0;
    pub const CITY_HIT_HEIGHT: f32 = CITY_HEIGHT / 3.0;
    pub const CITY_MAX_HITS: u8 = 3;
    /// Horizontal inset applied to every city slot
    pub const CITY_SLOT_INSET: f32 = 43.0;
    /// City slots, in tenths of the screen width
    pub const CITY_SLOTS: [u32; 4] = [0, 2, 6, 8];
    /// Explosion offsets relative to a city's top-left corner
    pub const CITY_EXPLOSION_DX: f32 = 80.0;
    pub const CITY_DESTROYED_EXPLOSION_RISE: f32 = 96.0;
    pub const CITY_DAMAGED_EXPLOSION_RISE: f32 = 130.0;

    /// Turret sits half its sprite height above the bottom edge
    pub const TURRET_HALF_HEIGHT: f32 = 52.0;
    pub const TURRET_FRAMES: u32 = 5;
    pub const TURRET_FRAME_DELAY: u32 = 3;

    /// Explosion sprite sheets
    pub const EXPLOSION_FRAME_DELAY: u32 = 7;
    pub const GROUND_EXPLOSION_FRAMES: u32 = 5 * 3;
    pub const AIR_EXPLOSION_FRAMES: u32 = 4 * 4;

    /// Score values
    pub const POINTS_PER_METEOR: i64 = 100;
    pub const POINTS_PER_CITY_DAMAGE: i64 = 100;
    /// Damage units charged when a hit destroys a city
    pub const CITY_DESTROYED_DAMAGE: u32 = 3;
}

/// Turret-style rotation: 0 faces up, positive is clockwise on screen
#[inline]
pub fn facing_angle(from: glam::Vec2, to: glam::Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x) + std::f32::consts::FRAC_PI_2
}
