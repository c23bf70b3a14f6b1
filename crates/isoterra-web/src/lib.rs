pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, frame accessors)
///
/// The calling crate must depend on `wasm-bindgen`, `log`, `console_log` and
/// `console_error_panic_hook`, and have `InputEvent` in scope.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use isoterra::*;
///
/// mod game;
/// use game::Meadow;
///
/// isoterra_web::export_game!(Meadow, "meadow");
/// ```
///
/// # Arguments
///
/// - `$game_type`: A type implementing `isoterra::Game` with a `new()` constructor
/// - `$game_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        /// Load assets and map, then start the game.
        #[wasm_bindgen]
        pub fn game_init(manifest_json: &str, map_text: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::GameRunner::new(<$game_type>::new());
            let started = runner
                .load_manifest(manifest_json)
                .and_then(|_| runner.load_map(map_text))
                .and_then(|_| runner.init());
            if let Err(err) = started {
                log::error!("{}: {}", $game_name, err);
                return Err(JsValue::from_str(&err.to_string()));
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        // ---- Frame accessors ----

        #[wasm_bindgen]
        pub fn get_frame_buffer_ptr() -> *const f32 {
            with_runner(|r| r.frame_buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_buffer_floats() -> u32 {
            with_runner(|r| r.frame_buffer_floats())
        }

        #[wasm_bindgen]
        pub fn get_draw_commands_ptr() -> *const f32 {
            with_runner(|r| r.draw_commands_ptr())
        }

        #[wasm_bindgen]
        pub fn get_draw_command_count() -> u32 {
            with_runner(|r| r.draw_command_count())
        }

        #[wasm_bindgen]
        pub fn get_max_draw_commands() -> u32 {
            with_runner(|r| r.max_draw_commands())
        }
    };
}
