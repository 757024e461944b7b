//! Deterministic, queue-backed frame scheduler.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{FrameCallback, FrameHandle, FrameScheduler};
use crate::error::Result;

#[derive(Default)]
struct Queues {
    next_handle: i32,
    frames: VecDeque<(FrameHandle, FrameCallback)>,
    deferred: VecDeque<FrameCallback>,
    frames_run: usize,
    frames_cancelled: usize,
}

/// Frame scheduler that only runs callbacks when told to.
///
/// Native hosts pump it from their own event loop; tests use it to step a
/// full recalculation one frame at a time.
#[derive(Default)]
pub struct ManualScheduler {
    queues: RefCell<Queues>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the oldest pending frame callback. Returns false if none was queued.
    pub fn run_frame(&self) -> bool {
        // The borrow ends before the callback runs; callbacks reschedule.
        let next = self.queues.borrow_mut().frames.pop_front();
        match next {
            Some((_, callback)) => {
                self.queues.borrow_mut().frames_run += 1;
                callback();
                true
            }
            None => false,
        }
    }

    /// Run every deferred task queued so far. Tasks they queue wait for the
    /// next call. Returns how many ran.
    pub fn run_deferred(&self) -> usize {
        let tasks: Vec<FrameCallback> = self.queues.borrow_mut().deferred.drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }

    /// Drain deferred tasks and frames until both queues are empty.
    /// Returns the number of frames run.
    pub fn run_until_idle(&self) -> usize {
        let mut frames = 0;
        loop {
            self.run_deferred();
            if self.run_frame() {
                frames += 1;
            } else if !self.has_pending_deferred() {
                return frames;
            }
        }
    }

    /// Number of frame callbacks waiting to run.
    pub fn pending_frames(&self) -> usize {
        self.queues.borrow().frames.len()
    }

    /// True if deferred tasks are waiting to run.
    pub fn has_pending_deferred(&self) -> bool {
        !self.queues.borrow().deferred.is_empty()
    }

    /// Total frame callbacks run so far.
    pub fn frames_run(&self) -> usize {
        self.queues.borrow().frames_run
    }

    /// Total frame callbacks cancelled before they ran.
    pub fn frames_cancelled(&self) -> usize {
        self.queues.borrow().frames_cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle> {
        let mut q = self.queues.borrow_mut();
        q.next_handle = q.next_handle.wrapping_add(1);
        let handle = FrameHandle(q.next_handle);
        q.frames.push_back((handle, callback));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut q = self.queues.borrow_mut();
        let before = q.frames.len();
        q.frames.retain(|(h, _)| *h != handle);
        if q.frames.len() < before {
            q.frames_cancelled += 1;
        }
    }

    fn defer(&self, callback: FrameCallback) -> Result<()> {
        self.queues.borrow_mut().deferred.push_back(callback);
        Ok(())
    }
}
