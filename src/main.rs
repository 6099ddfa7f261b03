//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use breakout::driver::NullSink;
    use breakout::renderer::RenderState;
    use breakout::sim::{Direction, GameEvent};
    use breakout::{Autopilot, FrameDriver, InputEvent, Settings};
    use glam::Vec2;

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        render_state: Option<RenderState>,
        /// Demo mode; `None` while the player is in control
        autopilot: Option<Autopilot>,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                driver: FrameDriver::new(settings),
                render_state: None,
                autopilot: None,
            }
        }

        fn toggle_autopilot(&mut self) {
            match self.autopilot.take() {
                Some(mut pilot) => {
                    if let Some(release) = pilot.disengage() {
                        self.driver.push_input(release);
                    }
                    log::info!("Autopilot off");
                }
                None => {
                    self.autopilot = Some(Autopilot::new());
                    log::info!("Autopilot on");
                }
            }
        }

        /// Player input always wins over the autopilot
        fn player_input(&mut self, event: InputEvent) {
            if self.autopilot.is_some() {
                self.toggle_autopilot();
            }
            self.driver.push_input(event);
        }

        /// Run one frame: steer, tick, render
        fn frame(&mut self, time: f64) -> Vec<GameEvent> {
            if let Some(pilot) = self.autopilot.as_mut() {
                for event in pilot.steer(self.driver.state()) {
                    self.driver.push_input(event);
                }
            }

            let events = match self.render_state.as_mut() {
                Some(render_state) => self.driver.frame(time, render_state),
                None => self.driver.frame(time, &mut NullSink),
            };
            for event in &events {
                log::trace!("{:?}", event);
            }
            events
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, events: &[GameEvent]) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.driver.state();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("try-again-btn") {
                let class = if state.try_again_visible { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(hud) = document.get_element_by_id("hud") {
                for event in events {
                    match event {
                        GameEvent::FullClear { .. } => {
                            let _ = hud.set_attribute("class", "celebrate");
                        }
                        GameEvent::Reset { .. } => {
                            let _ = hud.set_attribute("class", "");
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Breakout starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> element");
            return;
        };

        let settings = Settings::load();
        // Write back so the stored copy always lists every field
        settings.save();
        let field = Vec2::new(settings.field.width, settings.field.height);

        // Canvas backing store matches the field, scaled for HiDPI
        let dpr = window.device_pixel_ratio();
        let width = (field.x as f64 * dpr) as u32;
        let height = (field.y as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let css_size = settings.field.css_size();
        let _ = canvas.set_attribute("style", &css_size);
        if let Some(container) = document.get_element_by_id("game") {
            let _ = container.set_attribute("style", &format!("width: {}px;", field.x));
        }

        let game = Rc::new(RefCell::new(Game::new(settings)));

        // Initialize WebGPU; without it the game still runs, undrawn
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
                        match RenderState::new(surface, &adapter, width, height, field).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create renderer: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(&window, game.clone());
        setup_try_again_button(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Breakout running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down: direction intent, reset, autopilot toggle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                if let Some(direction) = Direction::from_key(&key) {
                    event.prevent_default();
                    g.player_input(InputEvent::Pressed(direction));
                    return;
                }
                match key.as_str() {
                    "r" | "R" => g.player_input(InputEvent::Reset),
                    "i" | "I" => g.toggle_autopilot(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: either direction stops the paddle
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = Direction::from_key(&event.key()) {
                    game.borrow_mut()
                        .player_input(InputEvent::Released(direction));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_try_again_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("try-again-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().player_input(InputEvent::Reset);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #try-again-btn element; use R to reset");
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
            let events = g.frame(time);
            g.update_hud(&events);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout::Settings;
    use breakout::consts::FRAME_MS;
    use breakout::driver::run_headless;

    /// One minute of play at 60 Hz
    const DEFAULT_FRAMES: u64 = 3600;

    env_logger::init();
    log::info!("Breakout (native) starting...");
    log::info!("Native mode runs headless with the autopilot - use `trunk serve` to play");

    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(path) => match Settings::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::error!("Could not load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::load(),
    };

    let frames = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring frame count {:?}, using {}", arg, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }),
        None => DEFAULT_FRAMES,
    };

    let summary = run_headless(settings, frames, FRAME_MS);
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not encode run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
