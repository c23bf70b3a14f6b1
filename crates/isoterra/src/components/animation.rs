//! Frame animations for entities.
//!
//! Playback is tick-based: every call to [`Animation::advance`] moves the
//! frame cursor forward by `speed` frames, so fractional speeds hold a frame
//! for several ticks.

use glam::Vec2;

use crate::components::sprite::Sprite;

/// A single animation sequence and its playback cursor.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Frames in playback order.
    pub frames: Vec<Sprite>,
    /// Frames advanced per tick.
    pub speed: f32,
    /// Locked animations stop on their last frame instead of looping.
    pub locked: bool,
    cursor: f32,
}

impl Animation {
    pub fn new(frames: Vec<Sprite>, speed: f32) -> Self {
        Self {
            frames,
            speed,
            locked: false,
            cursor: 0.0,
        }
    }

    /// A one-frame animation that never changes.
    pub fn still(frame: Sprite) -> Self {
        Self::new(vec![frame], 0.0)
    }

    pub fn with_lock(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Get the number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Current frame index.
    pub fn frame_index(&self) -> usize {
        (self.cursor as usize).min(self.frames.len().saturating_sub(1))
    }

    /// Current frame. None only for an animation without frames.
    pub fn current(&self) -> Option<&Sprite> {
        self.frames.get(self.frame_index())
    }

    /// Footprint of the current frame, zero for an empty animation.
    pub fn size(&self) -> Vec2 {
        self.current().map(Sprite::size).unwrap_or(Vec2::ZERO)
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        self.cursor += self.speed;
        if self.cursor >= self.frames.len() as f32 {
            if self.locked {
                self.cursor -= self.speed;
            } else {
                self.cursor = 0.0;
            }
        }
    }

    /// Rewind to the first frame.
    pub fn reset(&mut self) {
        self.cursor = 0.0;
    }

    /// Check if a locked animation has reached its last frame.
    pub fn is_finished(&self) -> bool {
        self.locked && self.cursor + self.speed >= self.frames.len() as f32
    }
}
