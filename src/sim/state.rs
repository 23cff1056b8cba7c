//! Session state and entity types
//!
//! Everything a running session owns lives in `SessionState`. Entity
//! collections keep insertion order; that order is the scan order the
//! collision engine relies on.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::SpriteAnimation;
use super::rect::{Bounds, Rect};
use super::score::ScoreTracker;
use crate::consts::*;
use crate::facing_angle;
use crate::input::{ClickTarget, InputSnapshot};
use crate::settings::Difficulty;

/// A falling meteor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteor {
    pub id: u32,
    pub pos: Vec2,
    /// Constant per-tick displacement
    pub vel: Vec2,
    /// Ground-level X the meteor is aimed at
    pub hitpoint: f32,
    /// Sprite rotation along the travel line (presentation only)
    pub rotation: f32,
    pub anim: SpriteAnimation,
}

impl Meteor {
    /// Spawn above the screen, aimed at a random ground point
    pub fn spawn(id: u32, rng: &mut impl Rng, bounds: Bounds) -> Self {
        let max_x = bounds.width.max(0.0) as u32;
        let hitpoint = rng.random_range(0..=max_x) as f32;
        let spawn_x = rng.random_range(0..=max_x) as f32;
        Self::aimed(id, spawn_x, hitpoint, bounds)
    }

    /// Meteor starting at `spawn_x` that lands on `hitpoint`
    pub fn aimed(id: u32, spawn_x: f32, hitpoint: f32, bounds: Bounds) -> Self {
        let travel = Vec2::new(hitpoint - spawn_x, bounds.height);
        let vel = travel.normalize_or_zero() * METEOR_SPEED;
        let rotation = -std::f32::consts::FRAC_PI_2 + bounds.height.atan2(hitpoint - spawn_x);
        Self {
            id,
            pos: Vec2::new(spawn_x, METEOR_SPAWN_Y),
            vel,
            hitpoint,
            rotation,
            anim: SpriteAnimation::new(METEOR_FRAMES, METEOR_FRAME_DELAY),
        }
    }

    /// Meteor with explicit position and velocity
    pub fn with_motion(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            hitpoint: pos.x,
            rotation: 0.0,
            anim: SpriteAnimation::new(METEOR_FRAMES, METEOR_FRAME_DELAY),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.anim.advance();
    }

    /// Collision box: the unrotated sprite frame, nudged up a fifth of its height
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - METEOR_WIDTH / 2.0,
            self.pos.y - METEOR_HEIGHT * 0.2,
            METEOR_WIDTH,
            METEOR_HEIGHT,
        )
    }

    /// Past the point where it would be drawn below the ground line
    pub fn is_off_screen(&self, bounds: Bounds) -> bool {
        self.pos.y > bounds.height - METEOR_HEIGHT
    }

    pub fn frame(&self) -> u32 {
        self.anim.frame()
    }
}

/// An interceptor fired from the turret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub anim: SpriteAnimation,
}

impl Shot {
    /// Fire from `origin` toward `target`. A target on the origin fires straight up.
    pub fn fire(id: u32, origin: Vec2, target: Vec2, rotation: f32) -> Self {
        let dir = (target - origin).try_normalize().unwrap_or(Vec2::NEG_Y);
        Self {
            id,
            pos: origin,
            vel: dir * SHOT_SPEED,
            rotation,
            anim: SpriteAnimation::new(SHOT_FRAMES, SHOT_FRAME_DELAY),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.anim.advance();
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, Vec2::new(SHOT_WIDTH, SHOT_HEIGHT))
    }

    pub fn frame(&self) -> u32 {
        self.anim.frame()
    }
}

/// A city on the ground line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    hits: u8,
}

impl City {
    pub fn new(id: u32, x: f32, bounds: Bounds) -> Self {
        Self {
            id,
            pos: Vec2::new(x, bounds.height - CITY_HEIGHT),
            hits: 0,
        }
    }

    /// X of every city slot, left to right
    pub fn slot_positions(bounds: Bounds) -> [f32; 4] {
        CITY_SLOTS.map(|tenths| tenths as f32 * bounds.width / 10.0 + CITY_SLOT_INSET)
    }

    /// Register one meteor hit. No-op once destroyed.
    pub fn apply_hit(&mut self) {
        if self.hits < CITY_MAX_HITS {
            self.hits += 1;
        }
    }

    pub fn hits(&self) -> u8 {
        self.hits
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits == CITY_MAX_HITS
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CITY_WIDTH, CITY_HIT_HEIGHT)
    }

    /// Damage stage doubles as the sprite frame
    pub fn frame(&self) -> u32 {
        self.hits as u32
    }
}

/// Which explosion sheet to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Ground,
    Air,
}

impl ExplosionKind {
    /// Ground when the spawn point is within `reference_height` of the bottom edge
    pub fn for_height(y: f32, reference_height: f32, bounds: Bounds) -> Self {
        if y >= bounds.height - reference_height {
            ExplosionKind::Ground
        } else {
            ExplosionKind::Air
        }
    }

    pub fn frame_count(&self) -> u32 {
        match self {
            ExplosionKind::Ground => GROUND_EXPLOSION_FRAMES,
            ExplosionKind::Air => AIR_EXPLOSION_FRAMES,
        }
    }
}

/// Visual side effect of a collision; no gameplay state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub kind: ExplosionKind,
    anim: SpriteAnimation,
    complete: bool,
}

impl Explosion {
    pub fn new(pos: Vec2, kind: ExplosionKind) -> Self {
        Self {
            pos,
            kind,
            anim: SpriteAnimation::new(kind.frame_count(), EXPLOSION_FRAME_DELAY),
            complete: false,
        }
    }

    pub fn update(&mut self) {
        if !self.complete && self.anim.advance() {
            self.complete = true;
        }
    }

    pub fn is_animation_complete(&self) -> bool {
        self.complete
    }

    /// Ticks from spawn until completion
    pub fn duration_ticks(&self) -> u32 {
        self.anim.cycle_ticks()
    }

    pub fn frame(&self) -> u32 {
        self.anim.frame()
    }
}

/// The player's turret at the bottom centre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub pos: Vec2,
    /// Aim rotation; 0 faces up
    pub rotation: f32,
    /// A fire command was issued this tick
    pub fired: bool,
    /// The last fire command was dropped at the shot cap
    pub cannot_fire: bool,
    recoiling: bool,
    recoil: SpriteAnimation,
}

impl Turret {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            pos: Vec2::new(bounds.width / 2.0, bounds.height - TURRET_HALF_HEIGHT),
            rotation: 0.0,
            fired: false,
            cannot_fire: false,
            recoiling: false,
            recoil: SpriteAnimation::new(TURRET_FRAMES, TURRET_FRAME_DELAY),
        }
    }

    /// Re-aim at the pointer and latch this tick's fire edge
    pub fn update(&mut self, input: &InputSnapshot) {
        self.rotation = facing_angle(self.pos, input.pointer_pos());
        self.fired = self.is_clicked(input);
        if self.fired {
            self.recoil.reset();
        }

        // Finish a recoil even after it is cancelled
        if (self.recoiling || self.recoil.frame() != 0) && self.recoil.advance() {
            self.recoiling = false;
        }
    }

    /// A shot left the barrel
    pub fn start_recoil(&mut self) {
        self.recoiling = true;
        self.cannot_fire = false;
    }

    /// A fire command hit the shot cap
    pub fn block(&mut self) {
        self.recoiling = false;
        self.cannot_fire = true;
    }

    pub fn frame(&self) -> u32 {
        self.recoil.frame()
    }
}

impl ClickTarget for Turret {
    /// Any click fires, wherever the pointer is
    fn hit_region(&self) -> Option<Rect> {
        None
    }
}

/// Serializable overview of a session, for logs and HUDs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub score: i64,
    pub ticks: u64,
    pub cities: usize,
    pub meteors: usize,
    pub shots: usize,
    pub explosions: usize,
}

/// Complete state of one playthrough
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Seed the session RNG started from
    pub seed: u64,
    pub difficulty: Difficulty,
    pub bounds: Bounds,
    /// Playing ticks simulated so far
    pub time_ticks: u64,
    /// Ticks since the last meteor spawn
    pub spawn_counter: u32,
    pub score: ScoreTracker,
    pub turret: Turret,
    pub meteors: Vec<Meteor>,
    pub shots: Vec<Shot>,
    pub cities: Vec<City>,
    pub explosions: Vec<Explosion>,
    rng: Pcg32,
    next_id: u32,
}

/// Fresh session: four cities, no projectiles, zero score
pub fn new_session(difficulty: Difficulty, bounds: Bounds, seed: u64) -> SessionState {
    SessionState::new(difficulty, bounds, seed)
}

impl SessionState {
    pub fn new(difficulty: Difficulty, bounds: Bounds, seed: u64) -> Self {
        let mut state = Self {
            seed,
            difficulty,
            bounds,
            time_ticks: 0,
            spawn_counter: 0,
            score: ScoreTracker::new(),
            turret: Turret::new(bounds),
            meteors: Vec::new(),
            shots: Vec::new(),
            cities: Vec::new(),
            explosions: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        for x in City::slot_positions(bounds) {
            let id = state.next_entity_id();
            state.cities.push(City::new(id, x, bounds));
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn max_shots(&self) -> usize {
        self.difficulty.max_shots()
    }

    /// Spawn one random meteor above the screen
    pub fn spawn_meteor(&mut self) {
        let id = self.next_entity_id();
        let meteor = Meteor::spawn(id, &mut self.rng, self.bounds);
        log::trace!("Meteor {} spawned at x={} aimed at x={}", id, meteor.pos.x, meteor.hitpoint);
        self.meteors.push(meteor);
    }

    /// Fire toward `target` if under the shot cap. Returns whether a shot was added.
    pub fn try_fire(&mut self, target: Vec2) -> bool {
        if self.shots.len() >= self.max_shots() {
            self.turret.block();
            return false;
        }
        let id = self.next_entity_id();
        let shot = Shot::fire(id, self.turret.pos, target, self.turret.rotation);
        self.shots.push(shot);
        self.turret.start_recoil();
        true
    }

    pub fn is_lost(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            difficulty: self.difficulty,
            score: self.score.score(),
            ticks: self.time_ticks,
            cities: self.cities.len(),
            meteors: self.meteors.len(),
            shots: self.shots.len(),
            explosions: self.explosions.len(),
        }
    }
}
