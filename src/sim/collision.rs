//! Collision and lifecycle engine
//!
//! One pass per Playing tick, in a fixed order:
//! 1. meteors past the ground line burst (no score)
//! 2. shots that left the screen vanish
//! 3. each meteor is killed by at most one shot (first overlap in list order)
//! 4. each city absorbs overlapping meteors; a hit that destroys the city
//!    ends that city's scan
//!
//! Removals found in steps 3 and 4 are only flagged during the scans and
//! applied once per collection at the end, so no scan ever sees a shifted
//! list or a removed entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{City, Explosion, ExplosionKind, SessionState};
use crate::consts::*;

/// What one engine pass did, for the score tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionCounts {
    /// Meteors shot down
    pub meteors_destroyed: u32,
    /// City damage units: 1 per surviving hit, 3 per destroying hit
    pub city_damage: u32,
}

/// Run the engine pass over the session's entity collections
pub fn resolve(state: &mut SessionState) -> CollisionCounts {
    let bounds = state.bounds;
    let SessionState {
        meteors,
        shots,
        cities,
        explosions,
        ..
    } = state;
    let mut counts = CollisionCounts::default();

    meteors.retain(|meteor| {
        if meteor.is_off_screen(bounds) {
            explosions.push(Explosion::new(meteor.pos, ExplosionKind::Ground));
            false
        } else {
            true
        }
    });

    shots.retain(|shot| bounds.contains(shot.pos));

    let mut dead_meteors = vec![false; meteors.len()];
    let mut dead_shots = vec![false; shots.len()];

    for (mi, meteor) in meteors.iter().enumerate() {
        let meteor_rect = meteor.rect();
        let hit = shots
            .iter()
            .enumerate()
            .find(|(si, shot)| !dead_shots[*si] && shot.rect().intersects(&meteor_rect))
            .map(|(si, _)| si);

        if let Some(si) = hit {
            dead_meteors[mi] = true;
            dead_shots[si] = true;
            let kind = ExplosionKind::for_height(meteor.pos.y, METEOR_HEIGHT, bounds);
            explosions.push(Explosion::new(meteor.pos, kind));
            counts.meteors_destroyed += 1;
        }
    }

    let mut dead_cities = vec![false; cities.len()];

    for (ci, city) in cities.iter_mut().enumerate() {
        let city_rect = city.rect();
        for (mi, meteor) in meteors.iter().enumerate() {
            if dead_meteors[mi] || !meteor.rect().intersects(&city_rect) {
                continue;
            }

            city.apply_hit();
            dead_meteors[mi] = true;

            if city.is_destroyed() {
                log::debug!("City {} destroyed by meteor {}", city.id, meteor.id);
                explosions.push(Explosion::new(
                    destroyed_explosion_pos(city, bounds.height),
                    ExplosionKind::Ground,
                ));
                dead_cities[ci] = true;
                counts.city_damage += CITY_DESTROYED_DAMAGE;
                // The city is gone; nothing else can hit it this tick
                break;
            }

            log::debug!("City {} hit ({} hits)", city.id, city.hits());
            explosions.push(Explosion::new(
                damaged_explosion_pos(city, bounds.height),
                ExplosionKind::Ground,
            ));
            counts.city_damage += 1;
        }
    }

    remove_flagged(meteors, &dead_meteors);
    remove_flagged(shots, &dead_shots);
    remove_flagged(cities, &dead_cities);

    counts
}

fn destroyed_explosion_pos(city: &City, screen_height: f32) -> Vec2 {
    Vec2::new(
        city.pos.x + CITY_EXPLOSION_DX,
        screen_height - CITY_DESTROYED_EXPLOSION_RISE,
    )
}

fn damaged_explosion_pos(city: &City, screen_height: f32) -> Vec2 {
    Vec2::new(
        city.pos.x + CITY_EXPLOSION_DX,
        screen_height - CITY_DAMAGED_EXPLOSION_RISE,
    )
}

/// Drop every item whose flag is set; `flags` is indexed like `items`
fn remove_flagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut flags = flags.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
