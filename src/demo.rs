//! Autopilot for headless demo sessions
//!
//! Produces the pointer state a player would: track the most dangerous
//! meteor, lead it by the shot's flight time, and click whenever the turret
//! has a free shot.

use glam::Vec2;

use crate::consts::SHOT_SPEED;
use crate::input::PointerState;
use crate::sim::{Meteor, SessionState};

/// Scripted player
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pressed: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer state for the next frame. Clicks are a press frame followed
    /// by a release frame, so at most one shot goes out every two frames.
    pub fn pointer(&mut self, session: &SessionState) -> PointerState {
        let Some(meteor) = most_dangerous(session) else {
            self.pressed = false;
            let up = session.turret.pos - Vec2::new(0.0, session.bounds.height);
            return PointerState::new(up.x, up.y, false);
        };

        let aim = lead_target(session.turret.pos, meteor);
        self.pressed = !self.pressed && session.shots.len() < session.max_shots();
        PointerState::new(aim.x, aim.y, self.pressed)
    }
}

/// The meteor closest to the ground
fn most_dangerous(session: &SessionState) -> Option<&Meteor> {
    session.meteors.iter().max_by(|a, b| {
        a.pos
            .y
            .partial_cmp(&b.pos.y)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Where the meteor will be once a shot has covered the distance to it
fn lead_target(origin: Vec2, meteor: &Meteor) -> Vec2 {
    let flight_ticks = origin.distance(meteor.pos) / (SHOT_SPEED + meteor.vel.length());
    meteor.pos + meteor.vel * flight_ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputTracker, KeyboardState};
    use crate::settings::Difficulty;
    use crate::sim::{Bounds, new_session, tick};

    #[test]
    fn test_idle_without_meteors() {
        let state = new_session(Difficulty::Medium, Bounds::default(), 1);
        let mut pilot = Autopilot::new();
        for _ in 0..5 {
            assert!(!pilot.pointer(&state).pressed);
        }
    }

    #[test]
    fn test_shoots_down_incoming_meteor() {
        let mut state = new_session(Difficulty::Medium, Bounds::default(), 1);
        let id = state.next_entity_id();
        state
            .meteors
            .push(Meteor::with_motion(id, Vec2::new(640.0, 200.0), Vec2::new(0.0, 6.0)));

        let mut pilot = Autopilot::new();
        let mut tracker = InputTracker::new();
        for _ in 0..60 {
            let input = tracker.poll(pilot.pointer(&state), KeyboardState::default());
            tick(&mut state, &input);
        }

        assert!(state.meteors.is_empty());
        assert_eq!(state.score.score(), 100);
        assert_eq!(state.cities.len(), 4);
    }

    #[test]
    fn test_holds_fire_at_cap() {
        let mut state = new_session(Difficulty::Hard, Bounds::default(), 1);
        let id = state.next_entity_id();
        state
            .meteors
            .push(Meteor::with_motion(id, Vec2::new(300.0, 100.0), Vec2::new(0.0, 6.0)));
        assert!(state.try_fire(Vec2::new(640.0, 0.0)));

        let mut pilot = Autopilot::new();
        for _ in 0..4 {
            assert!(!pilot.pointer(&state).pressed);
        }
    }

    #[test]
    fn test_leads_moving_target() {
        let meteor = Meteor::with_motion(1, Vec2::new(640.0, 300.0), Vec2::new(3.0, 5.0));
        let aim = lead_target(Vec2::new(640.0, 668.0), &meteor);
        assert!(aim.x > 640.0);
        assert!(aim.y > 300.0);
    }
}
