// Next-frame scheduling. Prefers requestAnimationFrame and falls back to a
// ~60 Hz setTimeout when the window does not provide it.

use std::cell::Cell;

use js_sys::{Date, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

pub const FALLBACK_FRAME_MS: f64 = 16.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameHandle {
    AnimationFrame(i32),
    Timeout(i32),
}

/// Delay for the timer fallback so that frames land every
/// `FALLBACK_FRAME_MS` after the previously scheduled one.
pub fn fallback_delay(now: f64, last_frame: f64) -> f64 {
    (FALLBACK_FRAME_MS - (now - last_frame)).max(0.0)
}

pub struct FrameScheduler {
    window: Window,
    native: bool,
    last_frame: Cell<f64>,
}

impl FrameScheduler {
    pub fn new(window: Window) -> FrameScheduler {
        let native = Reflect::has(&window, &JsValue::from_str("requestAnimationFrame"))
            .unwrap_or(false);
        FrameScheduler {
            window,
            native,
            last_frame: Cell::new(0.0),
        }
    }

    pub fn is_native(&self) -> bool {
        self.native
    }

    pub fn request(&self, callback: &Closure<dyn FnMut()>) -> Result<FrameHandle, JsValue> {
        if self.native {
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map(FrameHandle::AnimationFrame)
        } else {
            let now = Date::now();
            let delay = fallback_delay(now, self.last_frame.get());
            self.last_frame.set(now + delay);
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    delay as i32,
                )
                .map(FrameHandle::Timeout)
        }
    }

    pub fn cancel(&self, handle: FrameHandle) -> Result<(), JsValue> {
        match handle {
            FrameHandle::AnimationFrame(id) => self.window.cancel_animation_frame(id),
            FrameHandle::Timeout(id) => {
                self.window.clear_timeout_with_handle(id);
                Ok(())
            }
        }
    }
}
