//! Score tracking from per-tick collision counts

use serde::{Deserialize, Serialize};

use super::collision::CollisionCounts;
use crate::consts::{POINTS_PER_CITY_DAMAGE, POINTS_PER_METEOR};

/// Running score; city damage can push it below zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: i64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick's collision counts into the score. Returns the change.
    pub fn apply(&mut self, counts: &CollisionCounts) -> i64 {
        let delta = counts.meteors_destroyed as i64 * POINTS_PER_METEOR
            - counts.city_damage as i64 * POINTS_PER_CITY_DAMAGE;
        self.score += delta;
        delta
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}
