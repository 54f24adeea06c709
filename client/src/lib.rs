mod canvas;
mod dom;
mod scheduler;
mod storage;

pub use canvas::CanvasSurface;
pub use dom::DomShell;
pub use scheduler::{FrameSlot, RafScheduler};
pub use storage::BrowserStore;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use common::{ArcadeConfig, GameKind, GameLoop};
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlCanvasElement, KeyboardEvent,
    Performance, TouchEvent,
};

const CANVAS_ID: &str = "gameCanvas";

type BrowserLoop = GameLoop<CanvasSurface, BrowserStore, DomShell, RafScheduler>;

pub(crate) fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

/// Run `f` against the loop unless another callback already holds it
fn with_loop(game_loop: &Rc<RefCell<BrowserLoop>>, f: impl FnOnce(&mut BrowserLoop) -> Result<()>) {
    match game_loop.try_borrow_mut() {
        Ok(mut game_loop) => {
            if let Err(e) = f(&mut game_loop) {
                error!("{:#}", e);
            }
        }
        Err(_) => warn!("Game loop busy, dropping event"),
    }
}

/// Handle owned by the page script. Buttons call `start_game`, `back_to_lobby`
/// and `handle_input`; keyboard, touch and animation frames are wired up here.
#[wasm_bindgen]
pub struct Arcade {
    game_loop: Rc<RefCell<BrowserLoop>>,
    performance: Performance,
}

#[wasm_bindgen]
impl Arcade {
    /// `config_json` is an optional partial `ArcadeConfig` object
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Arcade, JsValue> {
        console_error_panic_hook::set_once();
        Self::create(config_json.as_deref()).map_err(to_js)
    }

    pub fn start_game(&self, game: &str) -> Result<(), JsValue> {
        let game = game
            .parse::<GameKind>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let now = self.performance.now();
        self.borrow_loop()?.start_game(game, now).map_err(to_js)
    }

    pub fn back_to_lobby(&self) -> Result<(), JsValue> {
        self.borrow_loop()?.return_to_lobby().map_err(to_js)
    }

    /// Synthetic input from on-screen buttons: left, up, right, down or rotate
    pub fn handle_input(&self, action: &str) {
        with_loop(&self.game_loop, |game_loop| {
            game_loop.handle_action_name(action);
            Ok(())
        });
    }
}

impl Arcade {
    fn create(config_json: Option<&str>) -> Result<Arcade> {
        let mut config = match config_json {
            Some(json) => ArcadeConfig::from_json(json)?,
            None => ArcadeConfig::default(),
        };
        wasm_logger::init(wasm_logger::Config::new(config.log_level()));

        let window = web_sys::window().context("No global window")?;
        let document = window.document().context("Window has no document")?;
        let performance = window.performance().context("Performance API unavailable")?;

        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .with_context(|| format!("Missing #{} element", CANVAS_ID))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| anyhow!("#{} is not a canvas", CANVAS_ID))?;

        // Drawing is bounded by the element, so its size wins over the config
        config = config.with_canvas(canvas.width() as i32, canvas.height() as i32);
        if config.rng_seed.is_none() {
            config.rng_seed = Some(performance.now().to_bits());
        }
        config.validate()?;

        let shell = DomShell::new(document.clone())?;
        let controls = shell.controls().clone();
        let slot = FrameSlot::default();

        let game_loop = Rc::new(RefCell::new(GameLoop::new(
            config.clone(),
            CanvasSurface::new(canvas.clone())?,
            BrowserStore::open(&window),
            shell,
            RafScheduler::new(window.clone(), slot.clone()),
        )));

        let weak = Rc::downgrade(&game_loop);
        slot.install(move |token, time| {
            if let Some(game_loop) = weak.upgrade() {
                with_loop(&game_loop, |game_loop| game_loop.on_frame(token, time));
            }
        });

        listen_keys(&document, &game_loop)?;
        listen_touches(&canvas, &game_loop)?;
        listen_buttons(&controls, &game_loop)?;

        info!("Arcade ready on a {}x{} canvas", config.canvas_width, config.canvas_height);
        Ok(Arcade { game_loop, performance })
    }

    fn borrow_loop(&self) -> Result<std::cell::RefMut<'_, BrowserLoop>, JsValue> {
        self.game_loop
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Game loop is busy"))
    }
}

fn listen_keys(document: &Document, game_loop: &Rc<RefCell<BrowserLoop>>) -> Result<()> {
    let game_loop = game_loop.clone();
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let key = event.key();
        with_loop(&game_loop, |game_loop| {
            game_loop.handle_key(&key);
            Ok(())
        });
    });

    document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
        .map_err(js_err)?;
    on_key.forget();
    Ok(())
}

fn first_touch(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = event.changed_touches().get(0)?;
    Some((touch.screen_x() as f64, touch.screen_y() as f64))
}

fn listen_touches(canvas: &HtmlCanvasElement, game_loop: &Rc<RefCell<BrowserLoop>>) -> Result<()> {
    // Non-passive so preventDefault can stop the page from scrolling
    let options = AddEventListenerOptions::new();
    options.set_passive(false);

    let start_loop = game_loop.clone();
    let on_start = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
        event.prevent_default();
        if let Some((x, y)) = first_touch(&event) {
            with_loop(&start_loop, |game_loop| {
                game_loop.touch_start(x, y);
                Ok(())
            });
        }
    });

    let end_loop = game_loop.clone();
    let on_end = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
        event.prevent_default();
        if let Some((x, y)) = first_touch(&event) {
            with_loop(&end_loop, |game_loop| {
                game_loop.touch_end(x, y);
                Ok(())
            });
        }
    });

    canvas
        .add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            on_start.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;
    canvas
        .add_event_listener_with_callback_and_add_event_listener_options(
            "touchend",
            on_end.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;

    on_start.forget();
    on_end.forget();
    Ok(())
}

/// One delegated listener for every on-screen button, whatever scheme is showing
fn listen_buttons(controls: &Element, game_loop: &Rc<RefCell<BrowserLoop>>) -> Result<()> {
    let game_loop = game_loop.clone();
    let selector = format!("[{}]", dom::ACTION_ATTRIBUTE);
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(button)) = target.closest(&selector) else {
            return;
        };
        if let Some(action) = button.get_attribute(dom::ACTION_ATTRIBUTE) {
            with_loop(&game_loop, |game_loop| {
                game_loop.handle_action_name(&action);
                Ok(())
            });
        }
    });

    controls
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(js_err)?;
    on_click.forget();
    Ok(())
}
