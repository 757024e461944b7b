//! Frame scheduling primitives.
//!
//! The sizing core yields to the host between batches through
//! [`FrameScheduler::request_frame`] (animation-frame semantics) and defers
//! post-load work through [`FrameScheduler::defer`] (run on the next tick,
//! after the current synchronous work). Two implementations ship:
//! - [`ManualScheduler`]: queue-backed, driven explicitly (native hosts, tests)
//! - `BrowserScheduler`: `requestAnimationFrame` / `setTimeout(0)` (wasm32 only)

#[cfg(target_arch = "wasm32")]
mod browser;
mod manual;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserScheduler;
pub use manual::ManualScheduler;

use crate::error::Result;

/// Opaque handle identifying a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// A callback queued on the scheduler.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Request/cancel animation frames and defer work to the next tick.
///
/// Implementations must never invoke a callback synchronously from inside
/// `request_frame` or `defer`.
pub trait FrameScheduler {
    /// Run `callback` on the next animation frame.
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle>;

    /// Cancel a pending frame callback. Unknown or fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);

    /// Run `callback` once the current synchronous work has finished.
    fn defer(&self, callback: FrameCallback) -> Result<()>;
}
