//! Polled input snapshots and click targets
//!
//! The core never talks to an input device. Each frame the platform layer
//! hands over the current pointer and keyboard state; `InputTracker` pairs it
//! with the previous frame so clicks and key presses can be edge-triggered.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// Pointer (mouse/touch) state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub pos: Vec2,
    /// Primary button held down
    pub pressed: bool,
}

impl PointerState {
    pub fn new(x: f32, y: f32, pressed: bool) -> Self {
        Self {
            pos: Vec2::new(x, y),
            pressed,
        }
    }
}

/// Keyboard state for one frame (only Escape matters to the core)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardState {
    pub escape: bool,
}

/// Current and previous frame input, as seen by one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub pointer: PointerState,
    pub previous_pointer: PointerState,
    pub keyboard: KeyboardState,
    pub previous_keyboard: KeyboardState,
}

impl InputSnapshot {
    /// Primary button was down last frame and is up this frame
    pub fn click_released(&self) -> bool {
        self.previous_pointer.pressed && !self.pointer.pressed
    }

    /// Escape was down last frame and is up this frame
    pub fn escape_released(&self) -> bool {
        self.previous_keyboard.escape && !self.keyboard.escape
    }

    /// Pointer position at the current frame
    pub fn pointer_pos(&self) -> Vec2 {
        self.pointer.pos
    }
}

/// Remembers the last polled frame so each new poll yields a full snapshot
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous_pointer: PointerState,
    previous_keyboard: KeyboardState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair this frame's state with the previous one
    pub fn poll(&mut self, pointer: PointerState, keyboard: KeyboardState) -> InputSnapshot {
        let snapshot = InputSnapshot {
            pointer,
            previous_pointer: self.previous_pointer,
            keyboard,
            previous_keyboard: self.previous_keyboard,
        };
        self.previous_pointer = pointer;
        self.previous_keyboard = keyboard;
        snapshot
    }
}

/// Anything that reacts to an edge-triggered pointer click
pub trait ClickTarget {
    /// Screen region that accepts clicks; `None` accepts clicks anywhere
    fn hit_region(&self) -> Option<Rect>;

    /// True only on the release frame of a click landing inside the region
    fn is_clicked(&self, input: &InputSnapshot) -> bool {
        input.click_released()
            && self
                .hit_region()
                .is_none_or(|region| region.contains(input.pointer_pos()))
    }
}

/// Horizontal padding around a button label
pub const BUTTON_PADDING: f32 = 5.0;
/// Approximate glyph advance of the heading font
pub const BUTTON_CHAR_WIDTH: f32 = 18.0;
/// Line height of the heading font
pub const BUTTON_HEIGHT: f32 = 40.0;

/// A labelled menu button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    /// Where the label text starts
    pub pos: Vec2,
    pub rect: Rect,
}

impl Button {
    pub fn new(label: impl Into<String>, pos: Vec2) -> Self {
        let label = label.into();
        let width = label.chars().count() as f32 * BUTTON_CHAR_WIDTH + 2.0 * BUTTON_PADDING;
        let rect = Rect::new(pos.x - BUTTON_PADDING, pos.y, width, BUTTON_HEIGHT);
        Self { label, pos, rect }
    }

    /// Point inside the button, handy for scripted input
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.rect.x + self.rect.w / 2.0,
            self.rect.y + self.rect.h / 2.0,
        )
    }
}

impl ClickTarget for Button {
    fn hit_region(&self) -> Option<Rect> {
        Some(self.rect)
    }
}
