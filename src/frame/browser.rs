//! Browser frame scheduler backed by `requestAnimationFrame`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{FrameCallback, FrameHandle, FrameScheduler};
use crate::error::{ColsizeError, Result};

/// Schedules frames on the page's `window`.
pub struct BrowserScheduler {
    window: web_sys::Window,
}

impl BrowserScheduler {
    /// Bind to the global `window`.
    ///
    /// # Errors
    /// Fails outside a browsing context (e.g. in a worker).
    pub fn new() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| ColsizeError::Scheduler("no global window".into()))?;
        Ok(Self { window })
    }
}

impl FrameScheduler for BrowserScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle> {
        // `once_into_js` frees the closure after it runs. A cancelled frame
        // leaks its closure, which only happens on teardown or supersede.
        let closure = Closure::once_into_js(move || callback());
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| ColsizeError::Scheduler(format!("requestAnimationFrame: {e:?}")))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }

    fn defer(&self, callback: FrameCallback) -> Result<()> {
        let closure = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(closure.unchecked_ref(), 0)
            .map(|_| ())
            .map_err(|e| ColsizeError::Scheduler(format!("setTimeout: {e:?}")))
    }
}
