//! Frame-delay sprite animation
//!
//! Purely cosmetic: the presentation layer reads `frame()` to pick the
//! sprite-sheet cell. The only gameplay-visible signal is the wrap reported
//! by `advance`, which explosions use as their completion flag.

use serde::{Deserialize, Serialize};

/// Sprite-sheet cursor that steps one frame every `delay + 1` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteAnimation {
    frame: u32,
    frame_count: u32,
    delay: u32,
    counter: u32,
}

impl SpriteAnimation {
    pub fn new(frame_count: u32, delay: u32) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            delay,
            counter: 0,
        }
    }

    /// Advance one tick. Returns true on the tick the cursor wraps back to frame 0.
    pub fn advance(&mut self) -> bool {
        self.counter += 1;
        if self.counter <= self.delay {
            return false;
        }
        self.counter = 0;
        self.frame += 1;
        if self.frame >= self.frame_count {
            self.frame = 0;
            return true;
        }
        false
    }

    /// Rewind to the first frame
    pub fn reset(&mut self) {
        self.frame = 0;
        self.counter = 0;
    }

    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Ticks needed for one full pass over every frame
    pub fn cycle_ticks(&self) -> u32 {
        self.frame_count * (self.delay + 1)
    }
}
