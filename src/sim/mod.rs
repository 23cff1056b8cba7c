//! Deterministic simulation module
//!
//! All gameplay logic for a running session lives here:
//! - Fixed timestep only; every speed and delay is per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity list)
//! - No rendering, audio or platform dependencies

pub mod anim;
pub mod collision;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use anim::SpriteAnimation;
pub use collision::{CollisionCounts, resolve};
pub use rect::{Bounds, Rect};
pub use score::ScoreTracker;
pub use state::{
    City, Explosion, ExplosionKind, Meteor, SessionState, SessionSummary, Shot, Turret,
    new_session,
};
pub use tick::{TickReport, tick};
