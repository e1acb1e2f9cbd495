#![forbid(unsafe_code)]

use rescuenet_runtime::{FrameCallback, FrameScheduler};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Performance, Window};

use super::log_js_error;

/// `requestAnimationFrame` scheduling with `performance.now()` as the clock.
#[derive(Debug, Clone)]
pub struct BrowserFrames {
    window: Window,
    performance: Option<Performance>,
}

impl BrowserFrames {
    #[must_use]
    pub fn new(window: Window) -> Self {
        let performance = window.performance();
        Self {
            window,
            performance,
        }
    }
}

impl FrameScheduler for BrowserFrames {
    fn now(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }

    fn request_frame(&self, callback: FrameCallback) {
        let frame = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        // Fails only for a detached window, where no further frames would run.
        if let Err(err) = self.window.request_animation_frame(frame.unchecked_ref()) {
            log_js_error("requestAnimationFrame", &err);
        }
    }
}
