//! Flat frame buffer shared with a JS painter.
//! Must stay in sync with the painter's `protocol.ts`.
//!
//! Layout (all slots 4 bytes):
//! ```text
//! [Header: 9 floats]
//! [Commands: max_commands × 4 words]
//! ```
//!
//! A command is `sprite, x, y, elevation`. The sprite slot holds the raw
//! `u32` bits; read it through a `Uint32Array` view, the rest as `f32`.

use crate::config::EngineConfig;
use crate::renderer::camera::Camera;
use crate::renderer::draw::{DrawCommand, DrawList};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 9;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_COMMANDS: usize = 2;
pub const HEADER_COMMAND_COUNT: usize = 3;
pub const HEADER_VIEWPORT_WIDTH: usize = 4;
pub const HEADER_VIEWPORT_HEIGHT: usize = 5;
pub const HEADER_CAMERA_X: usize = 6;
pub const HEADER_CAMERA_Y: usize = 7;
pub const HEADER_PROTOCOL_VERSION: usize = 8;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Words per draw command (wire format, never changes).
pub const COMMAND_WORDS: usize = DrawCommand::WORDS;

/// Buffer layout for a given command capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_commands: usize,
    /// Size of the command section in floats.
    pub command_data_floats: usize,
    /// Offset (in floats) where command data begins.
    pub command_data_offset: usize,
    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_commands: usize) -> Self {
        let command_data_floats = max_commands * COMMAND_WORDS;
        let command_data_offset = HEADER_FLOATS;
        let buffer_total_floats = command_data_offset + command_data_floats;
        Self {
            max_commands,
            command_data_floats,
            command_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_draw_commands)
    }

    /// Allocate a zeroed buffer of the right size with capacity and version
    /// already in the header.
    pub fn alloc(&self) -> Vec<f32> {
        let mut buf = vec![0.0; self.buffer_total_floats];
        buf[HEADER_MAX_COMMANDS] = self.max_commands as f32;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf
    }

    /// Write one frame into `buf` (which must come from [`alloc`](Self::alloc)
    /// or be at least as large). Commands past capacity are dropped with a
    /// warning. Returns the number of commands written.
    pub fn write_frame(&self, buf: &mut [f32], frame: u64, camera: &Camera, list: &DrawList) -> usize {
        let count = list.len().min(self.max_commands);
        if count < list.len() {
            log::warn!(
                "draw list truncated: {} commands, capacity {}",
                list.len(),
                self.max_commands
            );
        }

        let words: &[f32] = bytemuck::cast_slice(&list.as_slice()[..count]);
        let start = self.command_data_offset;
        buf[start..start + words.len()].copy_from_slice(words);

        buf[HEADER_FRAME_COUNTER] = frame as f32;
        buf[HEADER_MAX_COMMANDS] = self.max_commands as f32;
        buf[HEADER_COMMAND_COUNT] = count as f32;
        buf[HEADER_VIEWPORT_WIDTH] = camera.viewport.x;
        buf[HEADER_VIEWPORT_HEIGHT] = camera.viewport.y;
        buf[HEADER_CAMERA_X] = camera.offset.x;
        buf[HEADER_CAMERA_Y] = camera.offset.y;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        count
    }
}
