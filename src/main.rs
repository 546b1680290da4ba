//! Pixel Snake entry point
//!
//! The browser build wires the DOM and WebGPU to the game loop. The native
//! build runs a headless autopilot game and prints the final board.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

    use pixel_snake::consts::GRID;
    use pixel_snake::input::{DpadButton, SwipeTracker, captures_keys, heading_for_key};
    use pixel_snake::renderer::{FrameSnapshot, FrameStyle, RenderState, build_frame};
    use pixel_snake::sim::Heading;
    use pixel_snake::storage::LocalStorage;
    use pixel_snake::{GameEvent, GameLoop, Settings};

    /// Largest board edge in CSS pixels
    const MAX_BOARD_PX: i32 = 400;

    /// Browser-side app state
    struct App {
        game: GameLoop<LocalStorage>,
        settings: Settings,
        render_state: Option<RenderState>,
        last_time: Option<f64>,
        frame_pending: bool,
        swipe: SwipeTracker,
    }

    impl App {
        fn new(seed: u64) -> Self {
            let settings = Settings::load(&LocalStorage);
            Self {
                game: GameLoop::new(LocalStorage, &settings, seed),
                settings,
                render_state: None,
                last_time: None,
                frame_pending: false,
                swipe: SwipeTracker::default(),
            }
        }

        /// Start or replay. Returns true if a session began.
        fn start(&mut self) -> bool {
            // First user gesture: the audio context may be created now
            self.game.audio_mut().unlock();
            if !self.game.start() {
                return false;
            }
            self.last_time = None;
            if let Some(doc) = document() {
                set_hidden(&doc, "snake-splash", true);
                set_hidden(&doc, "snake-gameover", true);
                set_hidden(&doc, "snake-board", false);
            }
            true
        }

        /// Direction from any source; an explicit input also ends a pause
        fn steer(&mut self, heading: Heading) -> bool {
            let resumed = self.game.is_paused();
            if resumed {
                self.game.resume();
                self.last_time = None;
            }
            self.game.offer_heading(heading);
            resumed
        }

        fn toggle_autopilot(&mut self) {
            let on = !self.game.autopilot();
            self.game.set_autopilot(on);
            self.settings.autopilot = on;
            self.settings.save(&mut LocalStorage);
        }

        fn render(&mut self, snapshot: &FrameSnapshot) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let style = FrameStyle {
                board_px: render_state.board_px(),
                grid_lines: self.settings.grid_lines,
            };
            let vertices = build_frame(snapshot, &style);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn update_hud(&self, snapshot: &FrameSnapshot) {
            let Some(doc) = document() else { return };
            if let Some(el) = doc.get_element_by_id("snake-score") {
                el.set_text_content(Some(&pad_score(snapshot.score)));
            }
            if let Some(el) = doc.get_element_by_id("snake-best") {
                el.set_text_content(Some(&pad_score(snapshot.best)));
            }
        }

        fn update_sound_button(&self) {
            let Some(doc) = document() else { return };
            if let Some(btn) = doc.get_element_by_id("snake-sound-btn") {
                let on = !self.game.audio().is_muted();
                btn.set_text_content(Some(if on { "SND:ON" } else { "SND:OFF" }));
                let _ = btn.set_attribute("aria-pressed", if on { "true" } else { "false" });
            }
        }

        fn show_game_over(&self, score: u32) {
            let Some(doc) = document() else { return };
            if let Some(el) = doc.get_element_by_id("snake-gameover-score") {
                el.set_text_content(Some(&format!("SCORE: {}", pad_score(score))));
            }
            set_hidden(&doc, "snake-gameover", false);
        }
    }

    fn pad_score(score: u32) -> String {
        format!("{:03}", score)
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_hidden(doc: &Document, id: &str, hidden: bool) {
        if let Some(el) = doc.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Pixel Snake starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(doc) = window.document() else {
            log::error!("No document");
            return;
        };

        let canvas: HtmlCanvasElement = match doc
            .get_element_by_id("snake-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("Missing #snake-canvas");
                return;
            }
        };

        // Whole number of cells, capped at MAX_BOARD_PX
        let client = canvas.client_width().clamp(GRID, MAX_BOARD_PX);
        let board = (client / GRID * GRID) as u32;
        canvas.set_width(board);
        canvas.set_height(board);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Seed {}", seed);

        match init_renderer(canvas.clone(), board).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("WebGPU unavailable, running without a board: {}", e),
        }

        {
            let mut a = app.borrow_mut();
            let snapshot = a.game.snapshot();
            a.render(&snapshot);
            a.update_hud(&snapshot);
            a.update_sound_button();
        }

        setup_buttons(&doc, app.clone());
        setup_keyboard(&window, app.clone());
        setup_dpad(&doc, app.clone());
        setup_swipe(&doc, app.clone());
        setup_auto_pause(&window, &doc, app);

        log::info!("Pixel Snake ready");
    }

    async fn init_renderer(canvas: HtmlCanvasElement, board: u32) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| format!("surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("adapter: {}", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, board, board)
            .await
            .map_err(|e| format!("device: {}", e))
    }

    /// Schedule one animation frame unless one is already pending
    fn request_animation_frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.frame_pending {
                return;
            }
            a.frame_pending = true;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        let keep_running = {
            let mut a = app.borrow_mut();
            a.frame_pending = false;

            let delta = a.last_time.map_or(0.0, |last| time - last);
            a.last_time = Some(time);

            let report = a.game.frame(delta);
            a.render(&report.snapshot);
            a.update_hud(&report.snapshot);

            for event in &report.events {
                if let GameEvent::GameOver { score, .. } = *event {
                    a.show_game_over(score);
                }
            }

            if !report.keep_running {
                a.last_time = None;
            }
            report.keep_running
        };

        if keep_running {
            request_animation_frame(app);
        }
    }

    fn on_click<F>(doc: &Document, id: &str, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        let Some(btn) = doc.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(doc: &Document, app: Rc<RefCell<App>>) {
        for id in ["snake-play-btn", "snake-replay-btn"] {
            let app = app.clone();
            on_click(doc, id, move || {
                let started = app.borrow_mut().start();
                if started {
                    request_animation_frame(app.clone());
                }
            });
        }

        on_click(doc, "snake-sound-btn", move || {
            let mut a = app.borrow_mut();
            a.game.audio_mut().unlock();
            a.game.toggle_sound();
            a.update_sound_button();
        });
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if let Some(heading) = heading_for_key(&key) {
                // Arrows still scroll the page on the splash/game-over screens
                if captures_keys(app.borrow().game.state().phase) {
                    event.prevent_default();
                }
                if app.borrow_mut().steer(heading) {
                    request_animation_frame(app.clone());
                }
                return;
            }
            match key.as_str() {
                "i" | "I" => app.borrow_mut().toggle_autopilot(),
                "p" | "P" | "Escape" => {
                    let resumed = {
                        let mut a = app.borrow_mut();
                        if a.game.is_paused() {
                            a.game.resume();
                            a.last_time = None;
                            true
                        } else {
                            a.game.pause();
                            false
                        }
                    };
                    if resumed {
                        request_animation_frame(app.clone());
                    }
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_dpad(doc: &Document, app: Rc<RefCell<App>>) {
        let Ok(buttons) = doc.query_selector_all(".snake-dpad-btn") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let dir = btn.dataset().get("dir").unwrap_or_default();
            let Some(button) = DpadButton::from_str(&dir) else {
                log::warn!("D-pad button with unknown direction {:?}", dir);
                continue;
            };

            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                if app.borrow_mut().steer(button.heading()) {
                    request_animation_frame(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_swipe(doc: &Document, app: Rc<RefCell<App>>) {
        let Some(area) = doc.get_element_by_id("snake-screen") else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    app.borrow_mut().swipe.begin(pos);
                }
            });
            let _ = area.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                let heading = app.borrow_mut().swipe.end(pos);
                if let Some(heading) = heading {
                    event.prevent_default();
                    if app.borrow_mut().steer(heading) {
                        request_animation_frame(app.clone());
                    }
                }
            });
            let _ = area.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, doc: &Document, app: Rc<RefCell<App>>) {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let doc_clone = doc.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if doc_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = doc.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.pause();
                log::info!("Auto-paused (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pixel_snake::audio::synth;
    use pixel_snake::renderer::render_text;
    use pixel_snake::storage::FileStore;
    use pixel_snake::{GameEvent, GameLoop, Settings};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop a demo that never ends
    const MAX_FRAMES: u32 = 1_000_000;

    #[derive(Debug, Default)]
    struct Args {
        seed: Option<u64>,
        wav: Option<String>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args::default();
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--wav" => args.wav = Some(it.next().ok_or("--wav needs a path")?),
                _ => {
                    let seed = arg
                        .parse()
                        .map_err(|_| format!("expected a numeric seed, got {:?}", arg))?;
                    args.seed = Some(seed);
                }
            }
        }
        Ok(args)
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn export_wav(path: &str) -> std::io::Result<()> {
        let pcm = synth::to_pcm16(&synth::synthesize_nom());
        std::fs::write(path, synth::encode_wav(&pcm, synth::SAMPLE_RATE))?;
        log::info!("Wrote bite sound to {}", path);
        Ok(())
    }

    pub fn run() -> Result<(), String> {
        let args = parse_args()?;

        if let Some(path) = &args.wav {
            export_wav(path).map_err(|e| format!("writing {}: {}", path, e))?;
            return Ok(());
        }

        let data = std::env::var("SNAKE_DATA").unwrap_or_else(|_| "pixel-snake.json".to_string());
        let store = FileStore::new(&data);
        let settings = Settings {
            autopilot: true,
            ..Settings::load(&store)
        };
        let seed = args.seed.unwrap_or_else(clock_seed);
        log::info!("Headless autopilot game, seed {}, data {}", seed, data);

        let mut game = GameLoop::new(store, &settings, seed);
        game.start();

        let mut snapshot = game.snapshot();
        for _ in 0..MAX_FRAMES {
            let report = game.frame(FRAME_MS);
            for event in &report.events {
                match event {
                    GameEvent::FoodEaten { score } => log::debug!("nom ({})", score),
                    GameEvent::GameOver {
                        cause,
                        score,
                        new_best,
                    } => {
                        println!(
                            "Game over: {} with score {}{}",
                            cause.as_str(),
                            score,
                            if *new_best { " (new best!)" } else { "" }
                        );
                    }
                }
            }
            snapshot = report.snapshot;
            if !report.keep_running {
                break;
            }
        }

        print!("{}", render_text(&snapshot));
        println!(
            "score {:03}  best {:03}  ticks {}",
            snapshot.score,
            game.best().best(),
            game.state().time_ticks
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        eprintln!("pixel-snake: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds start from `wasm_main`
}
