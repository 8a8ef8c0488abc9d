//! Sky Toys entry point
//!
//! Handles platform-specific initialization and wires canvas events to the
//! simulation. The hosting page marks its canvas with `data-demo` set to
//! either `constellation` or `duel`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use sky_toys::consts::{CANVAS_MARGIN, MAX_SUBSTEPS, SIM_DT};
    use sky_toys::render::canvas;
    use sky_toys::sim::{
        Command, ConstellationState, DuelState, PlayerSlot, SpinDirection,
    };

    /// Size the canvas to the viewport minus the page margin. Degenerate
    /// viewports are not guarded; the unsigned cast does whatever it does.
    fn resize_canvas(canvas: &HtmlCanvasElement) -> (f64, f64) {
        let window = web_sys::window().expect("no window");
        let inner = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        let width = inner(window.inner_width()) - 2.0 * CANVAS_MARGIN;
        let height = inner(window.inner_height()) - 2.0 * CANVAS_MARGIN;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        (width, height)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Toys starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        resize_canvas(&canvas);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context unavailable")
            .expect("2d context unavailable")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let demo = canvas.get_attribute("data-demo").unwrap_or_default();

        match demo.as_str() {
            "duel" => run_duel(canvas, ctx, seed),
            _ => run_constellation(canvas, ctx, seed),
        }
    }

    fn run_constellation(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, seed: u64) {
        let state = Rc::new(RefCell::new(ConstellationState::new(seed)));

        canvas::paint_night_sky(&ctx, canvas.width() as f64, canvas.height() as f64);
        log::info!("Constellation sketcher ready (seed {seed})");

        // Click: place a star at the pointer, relative to the canvas origin
        {
            let state = state.clone();
            let canvas_clone = canvas.clone();
            let ctx = ctx.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let pos = Vec2::new(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                );
                let star = state.borrow_mut().place_star(pos);
                canvas::paint_star(&ctx, &star);
                canvas::paint_current_ring(&ctx, star.pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Arrow keys: connect the current star to its nearest neighbor
        {
            let state = state.clone();
            let ctx = ctx.clone();
            let document = web_sys::window().unwrap().document().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if !matches!(
                    event.key().as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
                ) {
                    return;
                }
                let mut s = state.borrow_mut();
                if let Some(conn) = s.connect_nearest() {
                    let from = s.stars[conn.from].pos;
                    let to = s.stars[conn.to].pos;
                    canvas::paint_connection(&ctx, from, to);
                    canvas::paint_current_ring(&ctx, to);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize clears the surface, so repaint the sky; stars repaint only
        // through new input
        {
            let canvas_clone = canvas.clone();
            let ctx = ctx.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (width, height) = resize_canvas(&canvas_clone);
                canvas::paint_night_sky(&ctx, width, height);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Save button: export the raster as a PNG download
        {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(button) = document.get_element_by_id("save-button") {
                let canvas_clone = canvas.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    export_png(&canvas_clone);
                });
                let _ = button
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Serialize the canvas to a PNG data URI and trigger a client-side
    /// download via a temporary anchor element.
    fn export_png(canvas: &HtmlCanvasElement) {
        let Ok(data_url) = canvas.to_data_url_with_type("image/png") else {
            log::warn!("PNG export failed");
            return;
        };
        let document = web_sys::window().unwrap().document().unwrap();
        let Ok(anchor) = document
            .create_element("a")
            .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().map_err(Into::into))
        else {
            return;
        };
        anchor.set_download("constellation-screenshot.png");
        anchor.set_href(&data_url);
        if let Some(body) = document.body() {
            let _ = body.append_child(&anchor);
            anchor.click();
            let _ = body.remove_child(&anchor);
        }
        log::info!("Exported constellation-screenshot.png");
    }

    /// Pressed-key latches; shooting fires on the key-down edge only
    #[derive(Default)]
    struct HeldKeys {
        w: bool,
        arrow_up: bool,
    }

    struct DuelApp {
        state: DuelState,
        held: HeldKeys,
        accumulator: f32,
        last_time: f64,
    }

    fn run_duel(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, seed: u64) {
        let bounds = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        let app = Rc::new(RefCell::new(DuelApp {
            state: DuelState::new(seed, bounds),
            held: HeldKeys::default(),
            accumulator: 0.0,
            last_time: 0.0,
        }));

        log::info!("Tornado duel ready (seed {seed})");

        // Key down: spins and ducks repeat with the key, shots fire once
        // per press
        {
            let app = app.clone();
            let document = web_sys::window().unwrap().document().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                match event.key().as_str() {
                    "a" | "A" => app.state.apply(Command::Spin {
                        slot: PlayerSlot::P1,
                        direction: SpinDirection::Left,
                    }),
                    "d" | "D" => app.state.apply(Command::Spin {
                        slot: PlayerSlot::P1,
                        direction: SpinDirection::Right,
                    }),
                    "w" | "W" => {
                        if !app.held.w {
                            app.held.w = true;
                            app.state.apply(Command::Shoot { slot: PlayerSlot::P1 });
                        }
                    }
                    "s" | "S" => app.state.apply(Command::Duck { slot: PlayerSlot::P1 }),
                    "ArrowLeft" => app.state.apply(Command::Spin {
                        slot: PlayerSlot::P2,
                        direction: SpinDirection::Left,
                    }),
                    "ArrowRight" => app.state.apply(Command::Spin {
                        slot: PlayerSlot::P2,
                        direction: SpinDirection::Right,
                    }),
                    "ArrowUp" => {
                        if !app.held.arrow_up {
                            app.held.arrow_up = true;
                            app.state.apply(Command::Shoot { slot: PlayerSlot::P2 });
                        }
                    }
                    "ArrowDown" => app.state.apply(Command::Duck { slot: PlayerSlot::P2 }),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release the shot latches
        {
            let app = app.clone();
            let document = web_sys::window().unwrap().document().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" => app.held.w = false,
                    "ArrowUp" => app.held.arrow_up = false,
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize: re-anchor both tornadoes relative to the new center
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (width, height) = resize_canvas(&canvas_clone);
                app.borrow_mut()
                    .state
                    .resize(Vec2::new(width as f32, height as f32));
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        request_animation_frame(app, canvas, ctx);
    }

    fn request_animation_frame(
        app: Rc<RefCell<DuelApp>>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    ) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, canvas, ctx, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(
        app: Rc<RefCell<DuelApp>>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        time: f64,
    ) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.accumulator += dt.min(0.1);
            let mut substeps = 0;
            while a.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                a.state.tick();
                a.accumulator -= SIM_DT;
                substeps += 1;
            }

            canvas::paint_duel_frame(
                &ctx,
                canvas.width() as f64,
                canvas.height() as f64,
                &a.state,
            );
        }

        request_animation_frame(app, canvas, ctx);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use sky_toys::sim::{Command, DuelState, PlayerSlot, SpinDirection};

    env_logger::init();
    log::info!("Sky Toys (native) starting...");
    log::info!("Canvas frontends need a browser - run with `trunk serve` for the web version");

    // Headless check: run a short scripted duel and dump the state snapshot.
    let mut duel = DuelState::new(7, Vec2::new(900.0, 600.0));
    for _ in 0..4 {
        duel.apply(Command::Spin {
            slot: PlayerSlot::P1,
            direction: SpinDirection::Right,
        });
        duel.apply(Command::Spin {
            slot: PlayerSlot::P2,
            direction: SpinDirection::Left,
        });
    }
    duel.apply(Command::Shoot { slot: PlayerSlot::P1 });
    duel.apply(Command::Shoot { slot: PlayerSlot::P2 });
    for _ in 0..180 {
        duel.tick();
    }

    match serde_json::to_string_pretty(&duel) {
        Ok(snapshot) => println!("{snapshot}"),
        Err(err) => log::error!("snapshot failed: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
