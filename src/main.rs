//! Coin Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlCanvasElement};

    use coin_runner::audio::{AudioManager, SoundEffect};
    use coin_runner::platform::{FrameClock, needs_frame};
    use coin_runner::platform::web::{
        self, FrameRequest, GAME_OVER_SCREEN, GAME_SCREEN, START_SCREEN,
    };
    use coin_runner::renderer::{RendererError, SdfRenderState};
    use coin_runner::sim::{Arena, GameHooks, GamePhase, GameState, Intent, apply_intent, step};

    const CANVAS_ID: &str = "game-canvas";
    const CONTAINER_ID: &str = "game-container";
    const SCORE_ID: &str = "score";
    const FINAL_SCORE_ID: &str = "final-score";

    /// Forwards core notifications to the DOM and the speakers
    struct DomHooks<'a> {
        audio: &'a AudioManager,
    }

    impl GameHooks for DomHooks<'_> {
        fn on_score_changed(&mut self, score: u32) {
            web::set_text(SCORE_ID, &score.to_string());
            self.audio.play(SoundEffect::CoinCollect);
        }

        fn on_game_over(&mut self, final_score: u32) {
            self.audio.play(SoundEffect::GameOver);
            web::set_text(FINAL_SCORE_ID, &final_score.to_string());
            web::show_screen(GAME_OVER_SCREEN);
        }

        fn on_jump_performed(&mut self) {
            self.audio.play(SoundEffect::Jump);
        }

        fn on_game_started(&mut self) {
            web::set_text(SCORE_ID, "0");
            web::show_screen(GAME_SCREEN);
            self.audio.play(SoundEffect::Start);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<SdfRenderState>,
        clock: FrameClock,
        audio: AudioManager,
        frame: FrameRequest,
        canvas: HtmlCanvasElement,
        pixel_ratio: f32,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement) -> Self {
            Self {
                state: GameState::with_tuning(seed, Arena::default(), web::load_tuning()),
                render_state: None,
                clock: FrameClock::new(),
                audio: AudioManager::new(),
                frame: FrameRequest::default(),
                canvas,
                pixel_ratio: 1.0,
            }
        }

        /// Size the canvas backing store to its container and tell the
        /// simulation about the new play area
        fn fit_canvas(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (css_w, css_h) = match web::element(CONTAINER_ID) {
                Some(container) => (container.client_width(), container.client_height()),
                None => (self.canvas.client_width(), self.canvas.client_height()),
            };
            let dpr = window.device_pixel_ratio().max(1.0);
            let width = (css_w.max(0) as f64 * dpr) as u32;
            let height = (css_h.max(0) as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.pixel_ratio = dpr as f32;

            self.state.resize(css_w as f32, css_h as f32);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
            if self.state.arena.is_degenerate() {
                log::warn!("Play area is {}x{}; spawning paused", css_w, css_h);
            }
        }

        /// Run the ticks owed for this frame. Returns false once the run is over.
        fn update(&mut self, time: f64) -> bool {
            let ticks = self.clock.advance(time);
            let mut hooks = DomHooks { audio: &self.audio };
            for i in 0..ticks {
                step(&mut self.state, FrameClock::tick_time(time, ticks, i), &mut hooks);
                if self.state.phase != GamePhase::Playing {
                    break;
                }
            }
            self.state.phase == GamePhase::Playing
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(&self.state, self.pixel_ratio) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Coin Runner starting...");

        let Some(canvas) = web::element(CANVAS_ID).and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"{}\"> on the page", CANVAS_ID);
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone())));
        game.borrow_mut().fit_canvas();
        log::info!("Game initialized with seed: {}", seed);

        // The DOM is usable without a GPU; only the picture is lost
        let (width, height) = (canvas.width(), canvas.height());
        match init_renderer(canvas.clone(), width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        setup_input_handlers(&canvas, &game);
        setup_buttons(&game);
        setup_window_handlers(&game);

        web::show_screen(START_SCREEN);
        game.borrow_mut().render();

        log::info!("Coin Runner running!");
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<SdfRenderState, RendererError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        SdfRenderState::new(surface, &adapter, width, height).await
    }

    /// Attach a listener for the lifetime of the page
    fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to listen for {}: {:?}", event, e);
        }
        closure.forget();
    }

    /// Click and tap both send `intent`. Taps suppress the synthetic click.
    fn listen_press(target: &EventTarget, game: &Rc<RefCell<Game>>, intent: Intent) {
        {
            let game = game.clone();
            listen(target, "click", move |_event| send_intent(&game, intent));
        }
        {
            let game = game.clone();
            listen(target, "touchstart", move |event| {
                event.prevent_default();
                send_intent(&game, intent);
            });
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) {
        listen_press(canvas, game, Intent::Jump);
    }

    fn setup_buttons(game: &Rc<RefCell<Game>>) {
        for (id, intent) in [("play-btn", Intent::Start), ("restart-btn", Intent::Restart)] {
            match web::element(id) {
                Some(btn) => listen_press(&btn, game, intent),
                None => log::warn!("Missing button #{}", id),
            }
        }
    }

    fn setup_window_handlers(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            listen(&window, "resize", move |_event| {
                let mut g = game.borrow_mut();
                g.fit_canvas();
                // A running loop repaints on its own
                if g.state.phase != GamePhase::Playing {
                    g.render();
                }
            });
        }

        // Stop scheduling frames when the page goes away
        {
            let game = game.clone();
            listen(&window, "pagehide", move |_event| {
                game.borrow_mut().frame.cancel();
                log::info!("Page hidden, frame loop stopped");
            });
        }

        // Restored from the back/forward cache mid-run
        {
            let game = game.clone();
            listen(&window, "pageshow", move |_event| {
                if resume_loop(&game) {
                    log::info!("Page shown, frame loop resumed");
                }
            });
        }
    }

    /// Apply a host intent, then make sure a live run has a frame queued
    fn send_intent(game: &Rc<RefCell<Game>>, intent: Intent) {
        {
            let g = &mut *game.borrow_mut();
            g.audio.resume();
            if intent == Intent::Restart && g.state.phase == GamePhase::Over {
                let seed = js_sys::Date::now() as u64;
                g.state.reseed(seed);
            }
            let mut hooks = DomHooks { audio: &g.audio };
            apply_intent(&mut g.state, intent, web::now_ms(), &mut hooks);
        }
        resume_loop(game);
    }

    /// Start the frame loop if a run is live and no frame is queued. Returns
    /// true when a frame was scheduled.
    fn resume_loop(game: &Rc<RefCell<Game>>) -> bool {
        let mut g = game.borrow_mut();
        if !needs_frame(g.state.phase, g.frame.is_pending()) {
            return false;
        }
        g.clock.reset();
        request_animation_frame(&mut g, game.clone());
        true
    }

    fn request_animation_frame(g: &mut Game, game: Rc<RefCell<Game>>) {
        g.frame.schedule(move |time| game_loop(game, time));
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let mut g = game.borrow_mut();
        g.frame.fired();

        let still_playing = g.update(time);
        g.render();

        if still_playing {
            request_animation_frame(&mut g, game.clone());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Coin Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    if let Err(e) = headless::run(std::env::args().skip(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Attract-mode session without a window: the autopilot plays one run and the
/// result is logged.
///
/// Usage: `coin-runner [seed] [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use coin_runner::consts::SIM_DT_MS;
    use coin_runner::sim::autopilot::wants_jump;
    use coin_runner::sim::{Arena, GameEvent, GamePhase, GameState, request_jump, start, step};
    use coin_runner::{Tuning, TuningError};

    /// Upper bound on a demo run (ten minutes of game time)
    const MAX_TICKS: u64 = 60 * 60 * 10;

    #[derive(Debug, thiserror::Error)]
    pub enum DemoError {
        #[error("invalid seed {0:?}")]
        Seed(String),
        #[error("failed to read {path}: {source}")]
        Read {
            path: String,
            #[source]
            source: std::io::Error,
        },
        #[error("bad tuning file: {0}")]
        Tuning(#[from] TuningError),
    }

    pub fn run(mut args: impl Iterator<Item = String>) -> Result<(), DemoError> {
        let seed = match args.next() {
            Some(arg) => arg.parse().map_err(|_| DemoError::Seed(arg))?,
            None => 12345,
        };
        let tuning = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| DemoError::Read { path, source })?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };

        let mut state = GameState::with_tuning(seed, Arena::default(), tuning);
        let mut events: Vec<GameEvent> = Vec::new();
        let mut now = 0.0;
        start(&mut state, now, &mut events);

        while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
            if wants_jump(&state) {
                request_jump(&mut state, &mut events);
            }
            now += SIM_DT_MS;
            step(&mut state, now, &mut events);
        }

        let jumps = events
            .iter()
            .filter(|e| matches!(e, GameEvent::JumpPerformed))
            .count();
        let coins = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreChanged(_)))
            .count();
        log::info!(
            "Seed {}: score {} ({} coins, {} jumps) in {:.1}s, {}",
            seed,
            state.score,
            coins,
            jumps,
            state.time_ticks as f64 * SIM_DT_MS / 1000.0,
            match state.phase {
                GamePhase::Over => "crashed",
                _ => "survived",
            }
        );
        Ok(())
    }
}
