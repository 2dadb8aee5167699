mod utils;

pub mod animation;
pub mod canvas;
pub mod color;
pub mod heart;
pub mod particle;
pub mod pool;
pub mod scheduler;
pub mod settings;
pub mod surface;

extern crate nalgebra_glm as glm;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement, Window};

use animation::Animation;
use canvas::{bitmap_to_canvas, fit_to_container, CanvasSurface};
use heart::create_heart_image;
use scheduler::{FrameHandle, FrameScheduler};
use settings::Settings;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Shared between the handle given to JS and the callbacks it registered.
struct Running {
    window: Window,
    scheduler: FrameScheduler,
    stopped: Cell<bool>,
    pending: Cell<Option<FrameHandle>>,
    frame: RefCell<Option<Closure<dyn FnMut()>>>,
    resize: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Running {
    fn schedule(&self) -> Result<(), JsValue> {
        if let Some(frame) = self.frame.borrow().as_ref() {
            self.pending.set(Some(self.scheduler.request(frame)?));
        }
        Ok(())
    }

    fn shut_down(&self) {
        self.stopped.set(true);
        if let Some(handle) = self.pending.take() {
            if let Err(err) = self.scheduler.cancel(handle) {
                console::error_2(&"failed to cancel frame:".into(), &err);
            }
        }
        if let Some(resize) = self.resize.borrow_mut().take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            {
                console::error_2(&"failed to remove resize listener:".into(), &err);
            }
        }
        // Drops the frame closure and with it the simulation state.
        self.frame.borrow_mut().take();
    }
}

/// Handle to a running heart animation. The animation keeps going after the
/// handle is dropped; call `stop` to end it.
#[wasm_bindgen]
pub struct HeartAnimation {
    running: Rc<Running>,
}

#[wasm_bindgen]
impl HeartAnimation {
    pub fn stop(&self) {
        if !self.running.stopped.get() {
            console::log_1(&"heart animation stopped".into());
        }
        self.running.shut_down();
    }

    pub fn is_running(&self) -> bool {
        !self.running.stopped.get()
    }
}

/// Starts the animation on the canvas with id `element_id`, sized to fill
/// its container.
#[wasm_bindgen]
pub fn run(element_id: &str) -> Result<HeartAnimation, JsValue> {
    utils::set_panic_hook();
    run_with_settings(element_id, Settings::default())
}

pub fn run_with_settings(element_id: &str, settings: Settings) -> Result<HeartAnimation, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))?;
    let canvas = document
        .get_element_by_id(element_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{}`", element_id)))?
        .dyn_into::<HtmlCanvasElement>()?;

    fit_to_container(&canvas);
    let sprite = {
        let _timer = Timer::new("bake heart sprite");
        bitmap_to_canvas(&document, &create_heart_image(settings.size, settings.color))?
    };
    let mut surface = CanvasSurface::new(canvas)?;
    let mut animation = Animation::new(settings, rand::thread_rng());

    let running = Rc::new(Running {
        scheduler: FrameScheduler::new(window.clone()),
        window,
        stopped: Cell::new(false),
        pending: Cell::new(None),
        frame: RefCell::new(None),
        resize: RefCell::new(None),
    });

    {
        let canvas = surface.canvas().clone();
        let resize = Closure::<dyn FnMut()>::new(move || fit_to_container(&canvas));
        running
            .window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        *running.resize.borrow_mut() = Some(resize);
    }

    {
        let state = running.clone();
        *running.frame.borrow_mut() = Some(Closure::new(move || {
            state.pending.set(None);
            if state.stopped.get() {
                return;
            }

            let now = js_sys::Date::now() / 1000.0;
            let result = animation
                .frame(now, &mut surface, &sprite)
                .and_then(|_| state.schedule());
            if let Err(err) = result {
                console::error_2(&"heart animation failed, stopping:".into(), &err);
                state.stopped.set(true);
            }
        }));
    }

    running.schedule()?;
    if !running.scheduler.is_native() {
        console::log_1(&"requestAnimationFrame unavailable, using a timer".into());
    }
    console::log_1(&"heart animation started".into());

    Ok(HeartAnimation { running })
}
