//! Fixed-step Playing tick
//!
//! Advances a session by exactly one frame, in this order: spawn timer,
//! meteors, turret (may fire), shots, collision engine, explosions, score.
//! All distances and delays are per tick; the tick rate is the game speed.

use serde::{Deserialize, Serialize};

use super::collision::{self, CollisionCounts};
use super::state::SessionState;
use crate::input::InputSnapshot;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub counts: CollisionCounts,
    /// Score change applied this tick
    pub score_delta: i64,
    /// A meteor was spawned
    pub spawned: bool,
    /// A shot was fired
    pub fired: bool,
    /// A fire command was dropped at the shot cap
    pub fire_blocked: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut SessionState, input: &InputSnapshot) -> TickReport {
    let mut report = TickReport::default();
    state.time_ticks += 1;

    report.spawned = advance_spawn_timer(state);

    for meteor in &mut state.meteors {
        meteor.update();
    }

    state.turret.update(input);
    if state.turret.fired {
        report.fired = state.try_fire(input.pointer_pos());
        report.fire_blocked = !report.fired;
        if report.fire_blocked {
            log::trace!("Shot cap of {} reached", state.max_shots());
        }
    }

    for shot in &mut state.shots {
        shot.update();
    }

    report.counts = collision::resolve(state);

    for explosion in &mut state.explosions {
        explosion.update();
    }
    state.explosions.retain(|e| !e.is_animation_complete());

    report.score_delta = state.score.apply(&report.counts);
    report
}

/// Count one tick; spawn a meteor on every `spawn_interval`-th tick
fn advance_spawn_timer(state: &mut SessionState) -> bool {
    state.spawn_counter += 1;
    if state.spawn_counter < state.difficulty.spawn_interval() {
        return false;
    }
    state.spawn_counter = 0;
    state.spawn_meteor();
    true
}
