//! Arcade Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use arcade_shooter::consts::*;
    use arcade_shooter::renderer::{RenderState, Scene, TextSlot, build_scene};
    use arcade_shooter::sim::{GameState, TickInput, autopilot_input, tick};
    use arcade_shooter::{HighScores, Settings};

    const ALL_TEXT_SLOTS: [TextSlot; 7] = [
        TextSlot::Score,
        TextSlot::Lives,
        TextSlot::Fps,
        TextSlot::GameOverTitle,
        TextSlot::FinalScore,
        TextSlot::HighScoreRank,
        TextSlot::RestartHint,
    ];

    /// Keys currently held down
    #[derive(Debug, Clone, Copy, Default)]
    struct HeldKeys {
        left: bool,
        right: bool,
        fire: bool,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        high_scores: HighScores,
        /// Leaderboard rank of the finished run, for the game-over screen
        last_rank: Option<usize>,
        /// Whether the finished run has been submitted to the leaderboard
        recorded: bool,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        keys: HeldKeys,
        autopilot: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, high_scores: HighScores) -> Self {
            Self {
                state: GameState::new(seed),
                settings,
                high_scores,
                last_rank: None,
                recorded: false,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                keys: HeldKeys::default(),
                autopilot: false,
            }
        }

        fn tick_input(&self, now_ms: u64) -> TickInput {
            if self.autopilot {
                return autopilot_input(&self.state, now_ms);
            }
            TickInput {
                left: self.keys.left,
                right: self.keys.right,
                fire: self.keys.fire,
                now_ms,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let now_ms = time.max(0.0) as u64;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.tick_input(now_ms);
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            if self.state.is_game_over() && !self.recorded {
                self.record_score();
            }
        }

        /// Submit the finished run to the leaderboard once
        fn record_score(&mut self) {
            self.recorded = true;
            self.last_rank = self.high_scores.add_score(
                self.state.score,
                self.state.time_ticks,
                js_sys::Date::now(),
            );
            if let Some(rank) = self.last_rank {
                log::info!("New high score {} at rank {}", self.state.score, rank);
                self.high_scores.save();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = build_scene(&self.state, &self.settings, self.last_rank);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (width, height) = render_state.size;
                        render_state.resize(width, height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            update_hud(&scene);
        }

        /// Start a new run
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.recorded = false;
            self.last_rank = None;
            self.accumulator = 0.0;
            self.keys = HeldKeys::default();
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    /// Write the scene's text into the HUD overlay; hide slots with no text
    fn update_hud(scene: &Scene) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for slot in ALL_TEXT_SLOTS {
            let Some(el) = document.get_element_by_id(slot.element_id()) else {
                continue;
            };
            match scene.text(slot) {
                Some(text) => {
                    if el.text_content().as_deref() != Some(text) {
                        el.set_text_content(Some(text));
                    }
                    let _ = el.set_attribute("class", "");
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        if let Some(el) = document.get_element_by_id("game-over") {
            let class = if scene.text(TextSlot::GameOverTitle).is_some() {
                ""
            } else {
                "hidden"
            };
            let _ = el.set_attribute("class", class);
        }
    }

    fn new_seed(settings: &Settings) -> u64 {
        settings.seed_or(js_sys::Date::now() as u64)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Arcade Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let high_scores = HighScores::load();
        let seed = new_seed(&settings);
        let game = Rc::new(RefCell::new(Game::new(seed, settings, high_scores)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;

                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => {
                                game.borrow_mut().render_state = Some(render_state)
                            }
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Arcade Shooter running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: held keys and one-shot commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.keys.left = true,
                    "ArrowRight" | "d" | "D" => g.keys.right = true,
                    " " => {
                        event.prevent_default();
                        g.keys.fire = true;
                    }
                    "r" | "R" if g.state.is_game_over() => {
                        let seed = new_seed(&g.settings);
                        g.restart(seed);
                    }
                    "i" | "I" => {
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot: {}", g.autopilot);
                    }
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    "c" | "C" => {
                        g.settings.high_contrast = !g.settings.high_contrast;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release held keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.keys.left = false,
                    "ArrowRight" | "d" | "D" => g.keys.right = false,
                    " " => g.keys.fire = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys = HeldKeys::default();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.is_game_over() {
                    let seed = new_seed(&g.settings);
                    g.restart(seed);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Native: autopilot games on a simulated clock, logged to the console
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use arcade_shooter::consts::FRAME_RATE;
    use arcade_shooter::headless;
    use arcade_shooter::renderer::build_scene;
    use arcade_shooter::storage::MemoryStore;
    use arcade_shooter::{HighScores, Settings};

    /// Games per session
    const GAMES: u64 = 5;
    /// Frame cap per game (five simulated minutes)
    const MAX_FRAMES: u64 = FRAME_RATE as u64 * 60 * 5;

    env_logger::init();
    log::info!("Arcade Shooter (native) starting...");
    log::info!("Native mode runs headless autopilot games - run with `trunk serve` for web version");

    let settings = Settings::load();
    let now_ms = || {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    };
    let base_seed = settings.seed_or(now_ms() as u64);
    let mut store = MemoryStore::default();
    let mut high_scores = HighScores::load_from(&store);

    for game in 0..GAMES {
        let seed = base_seed.wrapping_add(game);
        let state = headless::play(seed, MAX_FRAMES);
        let rank = high_scores.add_score(state.score, state.time_ticks, now_ms());
        if rank.is_some() {
            if let Err(e) = high_scores.save_to(&mut store) {
                log::warn!("High scores not saved: {}", e);
            }
        }

        if !state.is_game_over() {
            log::info!(
                "Game {} (seed {}) still alive after {} frames",
                game + 1,
                seed,
                state.time_ticks
            );
        }
        for item in build_scene(&state, &settings, rank).texts {
            log::info!("Game {}: {}", game + 1, item.content);
        }
    }

    log::info!("Leaderboard:");
    for (i, entry) in HighScores::load_from(&store).entries.iter().enumerate() {
        log::info!(
            "  #{:<2} {:>4} kills  ({:.1}s)",
            i + 1,
            entry.score,
            entry.ticks as f64 / FRAME_RATE as f64
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
