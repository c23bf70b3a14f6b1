use isoterra::{
    DrawList, EngineContext, EngineError, FixedTimestep, Game, InputEvent, InputQueue,
    ProtocolLayout,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`export_game!`](crate::export_game)),
/// because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    draw_list: DrawList,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    /// Header plus commands, read by the painter after every tick.
    frame_buffer: Vec<f32>,
    frames: u64,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt());
        let layout = ProtocolLayout::from_config(&config);
        let frame_buffer = layout.alloc();
        let draw_list = DrawList::with_capacity(config.max_draw_commands);

        Self {
            game,
            ctx: EngineContext::new(config),
            input: InputQueue::new(),
            draw_list,
            timestep,
            layout,
            frame_buffer,
            frames: 0,
            initialized: false,
        }
    }

    /// Replace the asset registry. Call before `init` so the game can look
    /// sprites up by name.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), EngineError> {
        self.ctx.load_assets(json)
    }

    /// Replace the terrain. Call before `init`.
    pub fn load_map(&mut self, text: &str) -> Result<(), EngineError> {
        self.ctx.load_map(text)
    }

    /// Initialize the game and publish the first frame. Call once.
    pub fn init(&mut self) -> Result<(), EngineError> {
        self.game.init(&mut self.ctx)?;
        self.initialized = true;
        self.publish_frame();
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run the ticks owed for `dt` seconds of wall time, then rebuild the
    /// frame. Queued input is seen by the first tick only.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.input.clear();
            self.ctx.step();
        }

        self.publish_frame();
    }

    fn publish_frame(&mut self) {
        self.ctx.build_draw_list(&mut self.draw_list);
        self.layout
            .write_frame(&mut self.frame_buffer, self.frames, &self.ctx.camera, &self.draw_list);
        self.frames += 1;
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Resize the viewport (e.g. on canvas resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.camera.resize(width, height);
    }

    // ---- Pointer accessors for zero-copy reads from JS ----

    pub fn frame_buffer_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_buffer_floats(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn draw_commands_ptr(&self) -> *const f32 {
        self.draw_list.commands_ptr()
    }

    pub fn draw_command_count(&self) -> u32 {
        self.draw_list.len() as u32
    }

    pub fn max_draw_commands(&self) -> u32 {
        self.layout.max_commands as u32
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
