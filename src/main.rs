//! Hat Runner entry point
//!
//! On the web this wires the session to a canvas, the DOM and the animation
//! frame callback. Natively it plays a headless autopilot run and prints a
//! JSON summary.
//!
//! Usage (native):
//!   hat-runner [--frames N] [--tuning FILE] [--seed N] [--quality low|medium|high]

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use hat_runner::renderer::{DrawCommand, RenderState, TextAlign};
    use hat_runner::{Frame, Key, Session, Settings, Tuning};

    /// Host-side state around the session
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        /// Last text pushed to the overlay element
        overlay_text: String,
    }

    impl Game {
        fn render(&mut self, frame: &Frame) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let logical = self.session.state.surface;
            let segments = self.session.settings.quality.circle_segments();
            match render_state.render(&frame.commands, logical, segments) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                    self.session.invalidate();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Push score and overlay text into the DOM
        fn update_text(&mut self, document: &Document, frame: &Frame) {
            if let Some(text) = &frame.score_text
                && let Some(el) = document.get_element_by_id("score")
            {
                el.set_text_content(Some(text));
            }

            let overlay: Vec<&str> = frame
                .commands
                .iter()
                .filter_map(|c| match c {
                    DrawCommand::Text {
                        text,
                        align: TextAlign::Center,
                        ..
                    } => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            let overlay = overlay.join("\n");
            if overlay != self.overlay_text {
                if let Some(el) = document.get_element_by_id("overlay") {
                    el.set_text_content(Some(&overlay));
                }
                self.overlay_text = overlay;
            }
        }
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// CSS size of the viewport
    fn viewport(window: &Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as f32, h as f32)
    }

    fn physical(window: &Window, (w, h): (f32, f32)) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        ((w as f64 * dpr) as u32, (h as f64 * dpr) as u32)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Hat Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        let css = viewport(&window);
        let (width, height) = physical(&window, css);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let session = Session::new(seed, Tuning::default(), settings, css.0, css.1);
        log::info!("Session created with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_err)?;

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state: Some(render_state),
            overlay_text: String::new(),
        }));

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_keyboard(&window, game.clone())?;
        setup_start_button(&document, game.clone())?;
        setup_resize(&window, canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("Hat Runner running!");
        Ok(())
    }

    fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = Key::from_dom(&event.key());
            if key == Key::Jump {
                // Keep Space from scrolling the page
                event.prevent_default();
            }
            game.borrow_mut().session.handle_key(key);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("start-button") else {
            // No start screen: begin immediately
            game.borrow_mut().session.start();
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if game.borrow_mut().session.start()
                && let Some(screen) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("start-screen"))
            {
                let _ = screen.set_attribute("class", "hidden");
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(
        window: &Window,
        canvas: HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let css = viewport(&window);
            let (width, height) = physical(&window, css);
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.session.resize(css.0, css.1);
            if let Some(rs) = g.render_state.as_mut() {
                rs.resize(width, height);
            }
            log::debug!("Resized to {}x{}", css.0, css.1);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
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
            let frame = g.session.frame(time);
            if frame.redraw {
                g.render(&frame);
            }
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_text(&document, &frame);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hat_runner::{Session, Settings, Tuning};

    env_logger::init();

    let settings = Settings::load();
    let args: Vec<String> = std::env::args().collect();

    let mut max_ticks: u64 = 60 * 60;
    let mut tuning_path = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--frames" => {
                if i + 1 < args.len() {
                    max_ticks = args[i + 1].parse().unwrap_or(max_ticks);
                    i += 1;
                }
            }
            "-t" | "--tuning" => {
                if i + 1 < args.len() {
                    tuning_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    let tuning = match tuning_path {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Failed to load tuning from {path}: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => Tuning::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    log::info!("Hat Runner (native) headless run, seed {seed}, up to {max_ticks} ticks");
    let mut session = Session::new(seed, tuning, settings, 800.0, 600.0);
    let summary = session.run_headless(max_ticks);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to encode summary: {e}");
            std::process::exit(1);
        }
    }
}
