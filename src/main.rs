//! Flappy Gap entry point
//!
//! On the web this wires the browser (canvas, events, requestAnimationFrame,
//! LocalStorage, Web Audio) to the game controller. Natively it runs a
//! headless autopilot session and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlSelectElement, KeyboardEvent, Window};

    use flappy_gap::audio::AudioManager;
    use flappy_gap::input::{InputController, InputEvent};
    use flappy_gap::persistence::LocalStore;
    use flappy_gap::platform::{AnimationFrameLoop, ViewportFit, fit_viewport};
    use flappy_gap::renderer::{Align, RenderState, Renderer, TextLabel, VertexBatch};
    use flappy_gap::sim::Mode;
    use flappy_gap::{GameController, Settings};

    type Controller = GameController<AnimationFrameLoop, LocalStore, AudioManager>;

    /// Everything the browser callbacks touch
    struct Game {
        controller: Controller,
        renderer: Renderer,
        batch: VertexBatch,
        input: InputController,
        render_state: RenderState,
        settings: Settings,
        /// Settings storage, shared with the best-score store
        store: LocalStore,
        canvas: HtmlCanvasElement,
        fit: ViewportFit,
    }

    impl Game {
        fn on_frame(&mut self) {
            self.controller.frame();
            self.draw();
        }

        /// Route a host event through the input mapping
        fn on_input(&mut self, event: InputEvent) {
            // Audio contexts only start after a user gesture
            self.controller.audio_mut().resume();

            if let InputEvent::ModeSelect(mode) = event {
                self.settings.mode = mode;
                self.settings.save(&mut self.store);
            }
            if let Some(intent) = self.input.map(&event) {
                self.controller.handle(intent);
                self.draw();
            }
        }

        fn on_resize(&mut self, window: &Window) {
            let fit = host_fit(window);
            if fit == self.fit {
                return;
            }
            self.fit = fit;
            apply_fit(&self.canvas, fit);
            self.render_state.resize(fit.backing.0, fit.backing.1, fit.logical);
            self.controller.resize(fit.logical);
            self.draw();
        }

        fn on_hidden(&mut self, reason: &str) {
            log::debug!("Host lost focus ({})", reason);
            self.controller.auto_pause();
            self.draw();
        }

        /// Draw the current state. Also used while the loop is suspended.
        fn draw(&mut self) {
            self.batch.reset();
            self.controller.render(&mut self.renderer, &mut self.batch);

            match self.render_state.render(&self.batch) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    self.render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => log::error!("Out of memory!"),
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            update_overlay(&self.batch.labels);
        }
    }

    fn host_fit(window: &Window) -> ViewportFit {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        fit_viewport(width as f32, height as f32, window.device_pixel_ratio() as f32)
    }

    fn apply_fit(canvas: &HtmlCanvasElement, fit: ViewportFit) {
        canvas.set_width(fit.backing.0);
        canvas.set_height(fit.backing.1);
        let style = format!(
            "width:{}px;height:{}px",
            fit.logical.width, fit.logical.height
        );
        let _ = canvas.set_attribute("style", &style);
        if let Some(overlay) = document().and_then(|d| d.get_element_by_id("overlay")) {
            let _ = overlay.set_attribute("style", &style);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Mirror the frame's text labels into the HTML overlay
    fn update_overlay(labels: &[TextLabel]) {
        let Some(overlay) = document().and_then(|d| d.get_element_by_id("overlay")) else {
            return;
        };
        let html: String = labels
            .iter()
            .map(|label| {
                let (anchor, shift) = match label.align {
                    Align::Left => ("left", "0"),
                    Align::Center => ("left", "-50%"),
                    Align::Right => ("right", "0"),
                };
                let x = match label.align {
                    Align::Right => {
                        // Measured from the right edge
                        overlay.client_width() as f32 - label.pos.x
                    }
                    _ => label.pos.x,
                };
                let [r, g, b, a] = label.color;
                format!(
                    "<span style=\"position:absolute;{}:{}px;top:{}px;font-size:{}px;\
                     transform:translate({},-50%);color:rgba({},{},{},{})\">{}</span>",
                    anchor,
                    x,
                    label.pos.y,
                    label.size,
                    shift,
                    (r * 255.0) as u8,
                    (g * 255.0) as u8,
                    (b * 255.0) as u8,
                    a,
                    label.text
                )
            })
            .collect();
        overlay.set_inner_html(&html);
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flappy Gap starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let store = LocalStore::new();
        let settings = Settings::load(&store);
        let fit = host_fit(&window);
        apply_fit(&canvas, fit);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, fit.backing.0, fit.backing.1, fit.logical)
                .await
                .map_err(|e| JsValue::from_str(&format!("Failed to get device: {}", e)))?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let weak = weak.clone();
            let scheduler = AnimationFrameLoop::new(move |_time| {
                if let Some(game) = weak.upgrade() {
                    game.borrow_mut().on_frame();
                }
            });

            let audio = AudioManager::new(settings.effective_volume());

            let controller = GameController::new(
                settings.mode,
                fit.logical,
                seed,
                store.clone(),
                audio,
                scheduler,
            );

            RefCell::new(Game {
                controller,
                renderer: Renderer::new(settings.parallax),
                batch: VertexBatch::new(),
                input: InputController::new(settings.keys.clone()),
                render_state,
                settings: settings.clone(),
                store: store.clone(),
                canvas: canvas.clone(),
                fit,
            })
        });

        setup_input_handlers(&window, &canvas, &game)?;
        setup_mode_select(&document, &game, settings.mode)?;
        setup_resize(&window, &game)?;
        setup_auto_pause(&window, &document, &game, settings.mute_on_blur)?;

        // Idle frame until the first flap starts the loop
        game.borrow_mut().draw();

        log::info!("Flappy Gap ready (seed {})", seed);
        Ok(())
    }

    fn setup_input_handlers(
        window: &Window,
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Pointer (mouse and pen)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                // Touch pointers are handled by touchstart
                if event.pointer_type() != "touch" {
                    game.borrow_mut().on_input(InputEvent::PointerDown);
                }
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                game.borrow_mut().on_input(InputEvent::TouchStart);
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = event.key();
                let mut g = game.borrow_mut();
                if g.input.bindings().lookup(&key).is_some() {
                    // Keep Space and arrows from scrolling the page
                    event.prevent_default();
                    g.on_input(InputEvent::Key(key));
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_mode_select(
        document: &Document,
        game: &Rc<RefCell<Game>>,
        initial: Mode,
    ) -> Result<(), JsValue> {
        let Some(select) = document.get_element_by_id("mode") else {
            log::warn!("No #mode selector found");
            return Ok(());
        };
        let select: HtmlSelectElement = select.dyn_into()?;
        select.set_value(initial.as_str());

        let game = game.clone();
        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let value = select_clone.value();
            match Mode::from_str(&value) {
                Some(mode) => game.borrow_mut().on_input(InputEvent::ModeSelect(mode)),
                None => log::warn!("Unknown mode {:?}", value),
            }
        });
        select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(window: &Window, game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                game.borrow_mut().on_resize(&window);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_auto_pause(
        window: &Window,
        document: &Document,
        game: &Rc<RefCell<Game>>,
        pause_on_blur: bool,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().on_hidden("tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        if pause_on_blur {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().on_hidden("window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_gap::GameController;
    use flappy_gap::audio::Silent;
    use flappy_gap::autopilot;
    use flappy_gap::input::Intent;
    use flappy_gap::persistence::MemoryStore;
    use flappy_gap::platform::ManualScheduler;
    use flappy_gap::sim::{Mode, Viewport};

    env_logger::init();
    log::info!("Flappy Gap (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let mode = std::env::args()
        .nth(1)
        .and_then(|arg| Mode::from_str(&arg))
        .unwrap_or(Mode::Normal);
    let frames: u64 = std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3_600);

    let mut controller = GameController::new(
        mode,
        Viewport::new(960.0, 480.0),
        0x5eed,
        MemoryStore::new(),
        Silent,
        ManualScheduler::new(),
    );
    controller.handle(Intent::Flap);

    for _ in 0..frames {
        if controller.world().is_terminal() {
            break;
        }
        if autopilot::should_flap(controller.world(), controller.profile()) {
            controller.handle(Intent::Flap);
        }
        controller.frame();
    }

    let world = controller.world();
    println!(
        "mode={} ticks={} score={} best={} crashed={}",
        mode.as_str(),
        world.ticks,
        world.score,
        controller.best_score(),
        world.is_terminal()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
