//! Grade Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, HtmlElement, HtmlImageElement, KeyboardEvent, TouchEvent,
    };

    use grade_catcher::platform::{
        AssetGate, CanvasLayout, Controls, ImageAsset, Side, canvas_layout, touch_side,
    };
    use grade_catcher::renderer::{
        BLOCK_LABEL_FONT_PX, RenderState, SceneOptions, block_labels, build_scene,
    };
    use grade_catcher::sim::{GameEvent, autopilot_input};
    use grade_catcher::{GameConfig, GameLoop, PlatformError};

    /// DOM image for a sprite plus the label shown if the image fails
    struct SpriteView {
        asset: ImageAsset,
        img: HtmlImageElement,
        label: HtmlElement,
    }

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        render_state: Option<RenderState>,
        controls: Controls,
        assets: AssetGate,
        /// Autopilot drives the player (toggle with I)
        idle_mode: bool,
        layout: CanvasLayout,
        canvas: HtmlCanvasElement,
        sprites: Vec<SpriteView>,
        /// Collected grades currently shown in the strip
        shown_grades: usize,
        /// Pooled text elements for falling-block grade labels
        block_labels: Vec<HtmlElement>,
    }

    impl Game {
        /// Run one simulation frame
        fn update(&mut self, time: f64) {
            let input = if self.idle_mode {
                autopilot_input(self.game.state())
            } else {
                self.controls.tick_input()
            };
            let report = self.game.frame(&input, time);
            for event in &report.events {
                if let GameEvent::Spawned { count } = event {
                    log::debug!("Spawned {count} blocks");
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let options = SceneOptions {
                player_fallback: self.assets.failed(ImageAsset::Player),
                professor_fallback: self.assets.failed(ImageAsset::Professor),
            };
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(self.game.state(), &options);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        log::warn!("Surface lost, reconfiguring");
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Move the sprite images over the canvas
        fn place_sprites(&self) {
            let state = self.game.state();
            let rect = self.canvas.get_bounding_client_rect();
            let arena_width = state.config.arena_width;
            let scale = self.layout.scale(arena_width);
            let sprite_scale = self.layout.sprite_scale(arena_width);

            for sprite in &self.sprites {
                let (pos, size) = match sprite.asset {
                    ImageAsset::Player => (state.player.pos, state.player.size),
                    ImageAsset::Professor => (state.professor.pos, state.professor.size),
                };
                let left = rect.left() as f32 + pos.x * scale;
                let top = rect.top() as f32 + pos.y * scale;
                let img: &HtmlElement = &sprite.img;
                for el in [img, &sprite.label] {
                    let style = el.style();
                    let _ = style.set_property("left", &format!("{left}px"));
                    let _ = style.set_property("top", &format!("{top}px"));
                    let _ = style.set_property("width", &format!("{}px", size.x * sprite_scale));
                    let _ = style.set_property("height", &format!("{}px", size.y * sprite_scale));
                }
            }
        }

        /// Center each falling block's grade text over its quad
        fn place_block_labels(&mut self, document: &Document) {
            let state = self.game.state();
            let labels = block_labels(state);
            let rect = self.canvas.get_bounding_client_rect();
            let scale = self.layout.scale(state.config.arena_width);

            while self.block_labels.len() < labels.len() {
                let Some(el) = document
                    .create_element("div")
                    .ok()
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                else {
                    break;
                };
                if let Some(body) = document.body() {
                    let _ = body.append_child(&el);
                }
                self.block_labels.push(el);
            }

            for (i, el) in self.block_labels.iter().enumerate() {
                let Some(label) = labels.get(i) else {
                    el.set_class_name("block-label hidden");
                    continue;
                };
                el.set_class_name("block-label");
                el.set_text_content(Some(label.text));
                let style = el.style();
                let left = rect.left() as f32 + label.center.x * scale;
                let top = rect.top() as f32 + label.center.y * scale;
                let _ = style.set_property("left", &format!("{left}px"));
                let _ = style.set_property("top", &format!("{top}px"));
                let _ = style.set_property("font-size", &format!("{}px", BLOCK_LABEL_FONT_PX * scale));
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let state = self.game.state();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.game.summary()));
            }

            // Rebuild the collected strip only when it changed
            let collected = &state.run.collected;
            if collected.len() != self.shown_grades {
                if let Some(container) = document.get_element_by_id("collected-grades") {
                    container.set_inner_html("");
                    for grade in collected {
                        if let Ok(tile) = document.create_element("div") {
                            tile.set_class_name("grade-tile");
                            tile.set_text_content(Some(grade.label()));
                            let _ = tile.set_attribute(
                                "style",
                                &format!("background-color: {}", grade.color_hex()),
                            );
                            let _ = container.append_child(&tile);
                        }
                    }
                }
                self.shown_grades = collected.len();
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match state.run.ended {
                    Some(reason) => {
                        let _ = el.set_attribute("class", "");
                        if let Some(title) = document.get_element_by_id("game-over-title") {
                            title.set_text_content(Some(reason.title()));
                        }
                        if let Some(gpa) = document.get_element_by_id("final-gpa") {
                            gpa.set_text_content(Some(&format!(
                                "Final GPA: {}",
                                state.run.average_display()
                            )));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Fit the canvas to the window and toggle the touch buttons
        fn apply_layout(&mut self, document: &Document) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let window_w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0) as f32;
            let window_h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0) as f32;
            let config = &self.game.state().config;
            self.layout = canvas_layout(window_w, window_h, config.arena_width, config.arena_height);

            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", self.layout.css_width));
            let _ = style.set_property("height", &format!("{}px", self.layout.css_height));

            let dpr = window.device_pixel_ratio() as f32;
            let width = (self.layout.css_width * dpr) as u32;
            let height = (self.layout.css_height * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }

            if let Some(controls) = document.get_element_by_id("mobile-controls") {
                let class = if self.layout.mobile { "" } else { "hidden" };
                let _ = controls.set_attribute("class", class);
            }
        }
    }

    fn load_config(document: &Document) -> GameConfig {
        let Some(json) = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        else {
            return GameConfig::default();
        };
        match GameConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded tuning overrides");
                config
            }
            Err(e) => {
                log::warn!("Ignoring game config: {e}");
                GameConfig::default()
            }
        }
    }

    async fn init_gpu(
        canvas: &HtmlCanvasElement,
        config: &GameConfig,
    ) -> Result<RenderState, PlatformError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| PlatformError::Gpu(format!("create_surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| PlatformError::Gpu(format!("request_adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
            (config.arena_width, config.arena_height),
        )
        .await
    }

    fn create_sprite(document: &Document, asset: ImageAsset) -> Result<SpriteView, PlatformError> {
        let body = document.body().ok_or(PlatformError::NoGlobal("document.body"))?;

        let img: HtmlImageElement = document
            .create_element("img")
            .map_err(|_| PlatformError::MissingElement("img".into()))?
            .dyn_into()
            .map_err(|_| PlatformError::WrongElementType {
                id: asset.name().into(),
                expected: "HtmlImageElement",
            })?;
        img.set_class_name("sprite");
        img.set_alt(asset.fallback_label());

        let label: HtmlElement = document
            .create_element("div")
            .map_err(|_| PlatformError::MissingElement("div".into()))?
            .dyn_into()
            .map_err(|_| PlatformError::WrongElementType {
                id: asset.name().into(),
                expected: "HtmlElement",
            })?;
        label.set_class_name("sprite-label hidden");
        label.set_text_content(Some(asset.fallback_label()));
        let _ = label
            .style()
            .set_property("background-color", asset.fallback_color_hex());

        let _ = body.append_child(&img);
        let _ = body.append_child(&label);
        Ok(SpriteView { asset, img, label })
    }

    pub async fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Grade Catcher starting...");

        let window = web_sys::window().ok_or(PlatformError::NoGlobal("window"))?;
        let document = window
            .document()
            .ok_or(PlatformError::NoGlobal("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| PlatformError::MissingElement("canvas".into()))?
            .dyn_into()
            .map_err(|_| PlatformError::WrongElementType {
                id: "canvas".into(),
                expected: "HtmlCanvasElement",
            })?;

        let config = load_config(&document);
        let seed = js_sys::Date::now() as u64;

        let sprites = ImageAsset::ALL
            .iter()
            .map(|&asset| create_sprite(&document, asset))
            .collect::<Result<Vec<_>, _>>()?;

        let layout = canvas_layout(800.0, 600.0, config.arena_width, config.arena_height);
        let game = Rc::new(RefCell::new(Game {
            game: GameLoop::new(config.clone(), seed),
            render_state: None,
            controls: Controls::default(),
            assets: AssetGate::new(),
            idle_mode: false,
            layout,
            canvas: canvas.clone(),
            sprites,
            shown_grades: 0,
            block_labels: Vec::new(),
        }));
        game.borrow_mut().apply_layout(&document);

        match init_gpu(&canvas, &config).await {
            Ok(render_state) => {
                let mut g = game.borrow_mut();
                g.render_state = Some(render_state);
                g.apply_layout(&document);
            }
            // HUD and sprites still work without a canvas renderer
            Err(e) => log::error!("{e}"),
        }

        setup_input_handlers(&document, game.clone());
        setup_resize_handler(game.clone());
        load_images(game.clone());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        Ok(())
    }

    /// Start loading both sprite images; the loop starts once both settle
    fn load_images(game: Rc<RefCell<Game>>) {
        let g = game.borrow();
        for sprite in &g.sprites {
            let asset = sprite.asset;

            let on_load = {
                let game = game.clone();
                Closure::<dyn FnMut()>::new(move || image_settled(game.clone(), asset, true))
            };
            let on_error = {
                let game = game.clone();
                Closure::<dyn FnMut()>::new(move || image_settled(game.clone(), asset, false))
            };
            sprite.img.set_onload(Some(on_load.as_ref().unchecked_ref()));
            sprite.img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            on_load.forget();
            on_error.forget();

            sprite.img.set_src(asset.src());
        }
    }

    fn image_settled(game: Rc<RefCell<Game>>, asset: ImageAsset, loaded: bool) {
        let ready = {
            let mut g = game.borrow_mut();
            if !loaded {
                if let Some(sprite) = g.sprites.iter().find(|s| s.asset == asset) {
                    let _ = sprite.img.style().set_property("display", "none");
                    sprite.label.set_class_name("sprite-label");
                }
            }
            g.assets.settle(asset, loaded)
        };
        if ready {
            log::info!("Assets settled, starting game loop");
            request_animation_frame(game);
        }
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(side) = Controls::key_side(&key) {
                    g.controls.key(side, true);
                } else if Controls::is_restart_key(&key) {
                    if g.game.press_restart() {
                        g.shown_grades = usize::MAX;
                    }
                } else if key == "i" || key == "I" {
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(side) = Controls::key_side(&key) {
                    g.controls.key(side, false);
                } else if Controls::is_restart_key(&key) {
                    g.game.release_restart();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch anywhere: screen halves steer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let screen_width = web_sys::window()
                    .and_then(|w| w.inner_width().ok())
                    .and_then(|v| v.as_f64())
                    .unwrap_or(800.0) as f32;
                let side = touch_side(touch.client_x() as f32, screen_width);
                game.borrow_mut().controls.touch(side, true);
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().controls.release_touch();
            });
            let _ = document
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // On-screen arrow buttons
        for (id, side) in [("left-btn", Side::Left), ("right-btn", Side::Right)] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            for (event_name, down) in [("touchstart", true), ("touchend", false)] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    event.stop_propagation();
                    game.borrow_mut().controls.touch(side, down);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                game.borrow_mut().apply_layout(&document);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        let running = {
            let mut g = game.borrow_mut();

            g.update(time);
            g.render();
            g.place_sprites();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.place_block_labels(&document);
                g.update_hud(&document);
            }
            g.game.is_running()
        };

        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Grade Catcher failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use grade_catcher::sim::autopilot_input;
    use grade_catcher::{GameConfig, GameLoop};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Grade Catcher (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED_u64);

    // Ten simulated minutes at 60 Hz
    let max_frames = 60 * 60 * 10;
    let mut game = GameLoop::new(GameConfig::default(), seed);
    let frames = game.run_until(
        |state| {
            if state.is_terminal() {
                None
            } else {
                Some((autopilot_input(state), state.headless_clock_ms()))
            }
        },
        max_frames,
    );

    let run = &game.state().run;
    let collected: Vec<&str> = run.collected.iter().map(|g| g.label()).collect();
    match run.ended {
        Some(reason) => log::info!("{} after {frames} frames", reason.title()),
        None => log::info!("Demo stopped after {frames} frames without finishing"),
    }
    log::info!("{}", game.summary());
    log::info!("Collected: [{}]", collected.join(", "));
    game.stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
