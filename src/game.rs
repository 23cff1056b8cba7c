//! Top-level mode state machine
//!
//! `Game` owns the menus, the running session and the high-score board, and
//! decides each frame which of them gets to react to input. One call to
//! [`Game::tick`] is one frame: poll input, dispatch on the current mode, and
//! in `Playing` advance the simulation once.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::highscores::HighScoreBoard;
use crate::input::{Button, ClickTarget, InputSnapshot, InputTracker, KeyboardState, PointerState};
use crate::settings::{Difficulty, Settings};
use crate::sim::{self, Bounds, SessionState, TickReport};

/// Read-only text screens reachable from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoKind {
    HighScores,
    HowToPlay,
    Help,
    About,
}

impl InfoKind {
    pub const ALL: [InfoKind; 4] = [
        InfoKind::HighScores,
        InfoKind::HowToPlay,
        InfoKind::Help,
        InfoKind::About,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InfoKind::HighScores => "High Scores",
            InfoKind::HowToPlay => "How to Play",
            InfoKind::Help => "Help",
            InfoKind::About => "About",
        }
    }
}

/// Current game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Menu,
    DifficultySelect,
    Playing,
    GameOver,
    Info(InfoKind),
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Menu => "Menu",
            Mode::DifficultySelect => "DifficultySelect",
            Mode::Playing => "Playing",
            Mode::GameOver => "GameOver",
            Mode::Info(kind) => kind.as_str(),
        }
    }
}

/// Whether the frame loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

const HOW_TO_PLAY_LINES: &[&str] = &["Aim with the mouse", "Click to shoot", "Protect the cities"];

const HELP_LINES: &[&str] = &[
    "Stop the meteors raining from the sky before they reach the cities below.",
    "Move the mouse to aim the turret and click where a meteor is heading",
    "to fire a missile at it.",
    "Only a few missiles can be in the air at once; harder levels allow fewer.",
    "",
    "100 points are gained for each meteor shot down.",
    "100 points are lost for each city hit.",
    "300 points are lost for each city destroyed.",
];

const ABOUT_LINES: &[&str] = &[
    "Meteor Defense, a city defense arcade game",
    "Based on the 1980 arcade game Missile Command by Atari Inc.",
];

/// Every clickable button, at fixed screen positions
#[derive(Debug, Clone)]
pub struct MenuButtons {
    pub start: Button,
    pub high_scores: Button,
    pub how_to_play: Button,
    pub help: Button,
    pub about: Button,
    pub quit: Button,
    /// Back to the main menu; shared by every screen but the menu itself
    pub menu: Button,
    pub easy: Button,
    pub medium: Button,
    pub hard: Button,
}

impl MenuButtons {
    pub fn new(bounds: Bounds) -> Self {
        let at = |label: &str, y: f32| Button::new(label, Vec2::new(100.0, y));
        Self {
            start: at("Start", 100.0),
            high_scores: at("High Scores", 150.0),
            how_to_play: at("How to Play", 200.0),
            help: at("Help", 250.0),
            about: at("About", 300.0),
            quit: at("Quit", 350.0),
            menu: at("Menu", bounds.height - 100.0),
            easy: at("Easy", 100.0),
            medium: at("Medium", 150.0),
            hard: at("Hard", 200.0),
        }
    }

    /// Info-screen button paired with the screen it opens
    fn info(&self) -> [(&Button, InfoKind); 4] {
        [
            (&self.high_scores, InfoKind::HighScores),
            (&self.how_to_play, InfoKind::HowToPlay),
            (&self.help, InfoKind::Help),
            (&self.about, InfoKind::About),
        ]
    }

    fn difficulties(&self) -> [(&Button, Difficulty); 3] {
        [
            (&self.easy, Difficulty::Easy),
            (&self.medium, Difficulty::Medium),
            (&self.hard, Difficulty::Hard),
        ]
    }

    /// Buttons shown (and clickable) in a mode
    pub fn visible(&self, mode: Mode) -> Vec<&Button> {
        match mode {
            Mode::Menu => vec![
                &self.start,
                &self.high_scores,
                &self.how_to_play,
                &self.help,
                &self.about,
                &self.quit,
            ],
            Mode::DifficultySelect => vec![&self.menu, &self.easy, &self.medium, &self.hard],
            Mode::Info(_) | Mode::GameOver => vec![&self.menu],
            Mode::Playing => Vec::new(),
        }
    }
}

/// The whole game: mode, session, high scores and input history
pub struct Game {
    mode: Mode,
    bounds: Bounds,
    session: SessionState,
    board: HighScoreBoard,
    input: InputTracker,
    buttons: MenuButtons,
    /// Source of per-session seeds
    seeds: Pcg32,
    last_report: TickReport,
    last_rank: Option<usize>,
}

impl Game {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let bounds = settings.bounds();
        let mut seeds = Pcg32::seed_from_u64(seed);
        let session = sim::new_session(Difficulty::default(), bounds, seeds.random());
        log::info!("Game created with seed {}", seed);
        Self {
            mode: Mode::Menu,
            bounds,
            session,
            board: HighScoreBoard::open(&settings.high_score_path),
            input: InputTracker::new(),
            buttons: MenuButtons::new(bounds),
            seeds,
            last_report: TickReport::default(),
            last_rank: None,
        }
    }

    /// Run one frame with this frame's pointer and keyboard state
    pub fn tick(&mut self, pointer: PointerState, keyboard: KeyboardState) -> Flow {
        let input = self.input.poll(pointer, keyboard);
        match self.mode {
            Mode::Menu => return self.update_menu(&input),
            Mode::DifficultySelect => self.update_difficulty_select(&input),
            Mode::Playing => self.update_playing(&input),
            Mode::Info(_) => {
                if self.back_to_menu(&input) {
                    self.set_mode(Mode::Menu);
                }
            }
            Mode::GameOver => {
                if self.back_to_menu(&input) {
                    self.reset_session();
                    self.board.refresh();
                    self.set_mode(Mode::Menu);
                }
            }
        }
        Flow::Continue
    }

    fn update_menu(&mut self, input: &InputSnapshot) -> Flow {
        if input.escape_released() || self.buttons.quit.is_clicked(input) {
            log::info!("Quit from menu");
            return Flow::Exit;
        }
        if self.buttons.start.is_clicked(input) {
            self.set_mode(Mode::DifficultySelect);
            return Flow::Continue;
        }
        let picked = self
            .buttons
            .info()
            .into_iter()
            .find(|(button, _)| button.is_clicked(input))
            .map(|(_, kind)| kind);
        if let Some(kind) = picked {
            if kind == InfoKind::HighScores {
                self.board.refresh();
            }
            self.set_mode(Mode::Info(kind));
        }
        Flow::Continue
    }

    fn update_difficulty_select(&mut self, input: &InputSnapshot) {
        if self.back_to_menu(input) {
            self.set_mode(Mode::Menu);
            return;
        }
        let picked = self
            .buttons
            .difficulties()
            .into_iter()
            .find(|(button, _)| button.is_clicked(input))
            .map(|(_, difficulty)| difficulty);
        if let Some(difficulty) = picked {
            self.start_session(difficulty);
        }
    }

    fn update_playing(&mut self, input: &InputSnapshot) {
        // Escape abandons the session; it is not resumable
        if input.escape_released() {
            log::info!(
                "Session abandoned at score {} after {} ticks",
                self.session.score.score(),
                self.session.time_ticks
            );
            self.reset_session();
            self.set_mode(Mode::Menu);
            return;
        }

        self.last_report = sim::tick(&mut self.session, input);

        if self.session.is_lost() {
            let score = self.session.score.score();
            log::info!(
                "All cities destroyed: score {} after {} ticks",
                score,
                self.session.time_ticks
            );
            self.last_rank = self.board.record(score);
            self.set_mode(Mode::GameOver);
        }
    }

    /// Escape or the Menu button
    fn back_to_menu(&self, input: &InputSnapshot) -> bool {
        input.escape_released() || self.buttons.menu.is_clicked(input)
    }

    fn start_session(&mut self, difficulty: Difficulty) {
        let seed = self.seeds.random();
        self.session = sim::new_session(difficulty, self.bounds, seed);
        self.last_report = TickReport::default();
        self.last_rank = None;
        log::info!(
            "Session started: {} (max shots {}, spawn every {} ticks, seed {})",
            difficulty.as_str(),
            difficulty.max_shots(),
            difficulty.spawn_interval(),
            seed
        );
        self.set_mode(Mode::Playing);
    }

    /// Fresh cities, no projectiles, zero score and spawn timer
    fn reset_session(&mut self) {
        let seed = self.seeds.random();
        self.session = sim::new_session(self.session.difficulty, self.bounds, seed);
        self.last_report = TickReport::default();
    }

    fn set_mode(&mut self, mode: Mode) {
        log::info!("Mode {} -> {}", self.mode.as_str(), mode.as_str());
        self.mode = mode;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn board(&self) -> &HighScoreBoard {
        &self.board
    }

    pub fn buttons(&self) -> &MenuButtons {
        &self.buttons
    }

    /// What the last Playing tick did
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// High-score rank reached by the session that just ended
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Title followed by body lines for an info screen
    pub fn info_lines(&self, kind: InfoKind) -> Vec<String> {
        let body = match kind {
            InfoKind::HighScores => return self.board.lines(),
            InfoKind::HowToPlay => HOW_TO_PLAY_LINES,
            InfoKind::Help => HELP_LINES,
            InfoKind::About => ABOUT_LINES,
        };
        std::iter::once(kind.as_str())
            .chain(body.iter().copied())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CITY_MAX_HITS;
    use crate::highscores::{HighScores, TITLE};
    use crate::sim::{CollisionCounts, Meteor};
    use tempfile::TempDir;

    fn test_game() -> (Game, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            high_score_path: dir.path().join("HighScores.txt"),
            ..Default::default()
        };
        (Game::new(&settings, 42), dir)
    }

    fn idle(game: &mut Game) -> Flow {
        game.tick(PointerState::default(), KeyboardState::default())
    }

    /// Press then release over `target`
    fn click(game: &mut Game, target: Vec2) -> Flow {
        game.tick(PointerState::new(target.x, target.y, true), KeyboardState::default());
        game.tick(PointerState::new(target.x, target.y, false), KeyboardState::default())
    }

    fn press_escape(game: &mut Game) -> Flow {
        game.tick(PointerState::default(), KeyboardState { escape: true });
        game.tick(PointerState::default(), KeyboardState { escape: false })
    }

    fn start_playing(game: &mut Game, difficulty: Difficulty) {
        let start = game.buttons.start.center();
        click(game, start);
        assert_eq!(game.mode(), Mode::DifficultySelect);
        let (button, _) = game
            .buttons
            .difficulties()
            .into_iter()
            .find(|(_, d)| *d == difficulty)
            .unwrap();
        let target = button.center();
        click(game, target);
        assert_eq!(game.mode(), Mode::Playing);
    }

    /// Leave one city at two hits with a meteor already on it
    fn doom_last_city(game: &mut Game) {
        let session = &mut game.session;
        session.cities.truncate(1);
        for _ in 1..CITY_MAX_HITS {
            session.cities[0].apply_hit();
        }
        let rect = session.cities[0].rect();
        let id = session.next_entity_id();
        session.meteors.push(Meteor::with_motion(
            id,
            Vec2::new(rect.x + rect.w / 2.0, rect.y),
            Vec2::ZERO,
        ));
    }

    #[test]
    fn test_starts_in_menu() {
        let (game, _dir) = test_game();
        assert_eq!(game.mode(), Mode::Menu);
        assert_eq!(game.session().cities.len(), 4);
    }

    #[test]
    fn test_menu_exit_on_escape_and_quit() {
        let (mut game, _dir) = test_game();
        assert_eq!(press_escape(&mut game), Flow::Exit);

        let (mut game, _dir) = test_game();
        let quit = game.buttons.quit.center();
        assert_eq!(click(&mut game, quit), Flow::Exit);
    }

    #[test]
    fn test_click_outside_buttons_does_nothing() {
        let (mut game, _dir) = test_game();
        assert_eq!(click(&mut game, Vec2::new(900.0, 600.0)), Flow::Continue);
        assert_eq!(game.mode(), Mode::Menu);
    }

    #[test]
    fn test_difficulty_binds_session() {
        for difficulty in Difficulty::ALL {
            let (mut game, _dir) = test_game();
            start_playing(&mut game, difficulty);
            assert_eq!(game.session().difficulty, difficulty);
            assert_eq!(game.session().max_shots(), difficulty.max_shots());
        }
    }

    #[test]
    fn test_difficulty_select_back_to_menu() {
        let (mut game, _dir) = test_game();
        let start = game.buttons.start.center();
        click(&mut game, start);
        press_escape(&mut game);
        assert_eq!(game.mode(), Mode::Menu);

        let start = game.buttons.start.center();
        click(&mut game, start);
        let menu = game.buttons.menu.center();
        click(&mut game, menu);
        assert_eq!(game.mode(), Mode::Menu);
    }

    #[test]
    fn test_info_screens_round_trip() {
        let (mut game, _dir) = test_game();
        for kind in InfoKind::ALL {
            let target = game
                .buttons
                .info()
                .into_iter()
                .find(|(_, k)| *k == kind)
                .map(|(button, _)| button.center())
                .unwrap();
            click(&mut game, target);
            assert_eq!(game.mode(), Mode::Info(kind));
            press_escape(&mut game);
            assert_eq!(game.mode(), Mode::Menu);
        }

        let help = game.buttons.help.center();
        click(&mut game, help);
        let menu = game.buttons.menu.center();
        click(&mut game, menu);
        assert_eq!(game.mode(), Mode::Menu);
    }

    #[test]
    fn test_playing_advances_simulation() {
        let (mut game, _dir) = test_game();
        start_playing(&mut game, Difficulty::Medium);
        for _ in 0..100 {
            idle(&mut game);
        }
        assert_eq!(game.session().time_ticks, 100);
        assert_eq!(game.session().meteors.len(), 1);
    }

    #[test]
    fn test_menu_does_not_advance_simulation() {
        let (mut game, _dir) = test_game();
        for _ in 0..300 {
            idle(&mut game);
        }
        assert_eq!(game.session().time_ticks, 0);
        assert!(game.session().meteors.is_empty());
    }

    #[test]
    fn test_escape_discards_session() {
        let (mut game, _dir) = test_game();
        start_playing(&mut game, Difficulty::Easy);
        for _ in 0..250 {
            idle(&mut game);
        }
        game.session.cities[0].apply_hit();

        press_escape(&mut game);
        assert_eq!(game.mode(), Mode::Menu);
        let session = game.session();
        assert_eq!(session.time_ticks, 0);
        assert_eq!(session.spawn_counter, 0);
        assert!(session.meteors.is_empty());
        assert!(session.cities.iter().all(|c| c.hits() == 0));

        // Starting again begins from scratch rather than resuming
        start_playing(&mut game, Difficulty::Hard);
        assert_eq!(game.session().difficulty, Difficulty::Hard);
        assert_eq!(game.session().time_ticks, 0);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let (mut game, dir) = test_game();
        start_playing(&mut game, Difficulty::Medium);
        game.session.score.apply(&CollisionCounts {
            meteors_destroyed: 10,
            city_damage: 0,
        });
        doom_last_city(&mut game);

        idle(&mut game);
        assert_eq!(game.mode(), Mode::GameOver);
        assert_eq!(game.session().score.score(), 700);
        assert_eq!(game.last_rank(), Some(1));
        assert_eq!(
            HighScores::load(dir.path().join("HighScores.txt"))
                .unwrap()
                .entries,
            [700, 0, 0, 0, 0]
        );

        // Game over is sticky until the player leaves
        for _ in 0..10 {
            idle(&mut game);
        }
        assert_eq!(game.mode(), Mode::GameOver);
    }

    #[test]
    fn test_game_over_back_to_menu_resets() {
        let (mut game, _dir) = test_game();
        start_playing(&mut game, Difficulty::Medium);
        doom_last_city(&mut game);
        idle(&mut game);
        assert_eq!(game.mode(), Mode::GameOver);

        let menu = game.buttons.menu.center();
        click(&mut game, menu);
        assert_eq!(game.mode(), Mode::Menu);
        let session = game.session();
        assert_eq!(session.cities.len(), 4);
        assert_eq!(session.score.score(), 0);
        assert!(session.meteors.is_empty());
        assert!(session.shots.is_empty());
        assert!(session.explosions.is_empty());
    }

    #[test]
    fn test_info_lines() {
        let (game, _dir) = test_game();
        let how = game.info_lines(InfoKind::HowToPlay);
        assert_eq!(
            how,
            vec!["How to Play", "Aim with the mouse", "Click to shoot", "Protect the cities"]
        );

        let scores = game.info_lines(InfoKind::HighScores);
        assert_eq!(scores.len(), 6);
        assert_eq!(scores[0], TITLE);
        assert!(scores[1..].iter().all(|s| s == "0"));

        assert_eq!(game.info_lines(InfoKind::About)[0], "About");
        assert!(game.info_lines(InfoKind::Help).len() > 1);
    }

    #[test]
    fn test_visible_buttons_per_mode() {
        let (game, _dir) = test_game();
        let buttons = game.buttons();
        assert_eq!(buttons.visible(Mode::Menu).len(), 6);
        assert_eq!(buttons.visible(Mode::DifficultySelect).len(), 4);
        assert!(buttons.visible(Mode::Playing).is_empty());
        assert_eq!(buttons.visible(Mode::GameOver)[0].label, "Menu");
    }
}
