use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};

/// One sprite blit, read by the painter.
/// Must match the web protocol: 4 x 32-bit words = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawCommand {
    /// Sprite handle, resolved to an atlas cell by the painter.
    pub sprite: u32,
    /// Final screen x of the sprite's top-left corner.
    pub x: f32,
    /// Final screen y of the sprite's top-left corner.
    pub y: f32,
    /// World elevation the sprite was drawn at.
    pub elevation: f32,
}

impl DrawCommand {
    pub const WORDS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::WORDS * 4;
}

/// Ordered draw commands for one frame, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn as_slice(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// The list as raw bytes, for painters that copy it out wholesale.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.commands)
    }

    /// Raw pointer to command data for zero-copy reads from JS.
    pub fn commands_ptr(&self) -> *const f32 {
        self.commands.as_ptr() as *const f32
    }
}

/// Depth buckets for one frame: ascending key, insertion order inside a key.
#[derive(Debug, Default)]
pub struct DepthBuckets {
    buckets: BTreeMap<i32, Vec<DrawCommand>>,
}

impl DepthBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: i32, command: DrawCommand) {
        self.buckets.entry(key).or_default().push(command);
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    /// Append every command to `out` back to front and empty the buckets.
    pub fn drain_into(&mut self, out: &mut DrawList) {
        for (_, bucket) in std::mem::take(&mut self.buckets) {
            for command in bucket {
                out.push(command);
            }
        }
    }
}
