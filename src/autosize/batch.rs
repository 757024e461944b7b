//! Full-table recalculation spread across animation frames.
//!
//! The column space is cut into batches of `CALCULATION_STEP + 1` columns;
//! each frame callback measures one batch (forced) and schedules the next.
//! A run is identified by a token so that starting a new run supersedes the
//! old one instead of interleaving with it.

use std::rc::{Rc, Weak};

use super::{AutoColumnSize, Shared};
use crate::frame::FrameHandle;
use crate::types::Span;

/// A batch covers `[current, current + CALCULATION_STEP]`.
pub const CALCULATION_STEP: u32 = 19;

/// Cursor of an in-flight run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Next column to measure.
    pub current: u32,
    /// Last column to cover.
    pub last: u32,
    /// Rows sampled for every batch.
    pub rows: Span,
}

/// State of the full-recalculation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run has started, or the last one was aborted.
    Idle,
    /// A batch is scheduled for the next frame.
    BatchInFlight {
        run_id: u64,
        cursor: Cursor,
        pending: Option<FrameHandle>,
    },
    /// The last run measured every column.
    Completed { run_id: u64 },
}

impl RunState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::BatchInFlight { .. })
    }
}

/// What to do after a batch ran.
enum Next {
    Reschedule,
    Finish,
}

impl AutoColumnSize {
    /// Recalculate every column, one batch per animation frame.
    ///
    /// `rows` defaults to all rows. With a sync limit configured, the first
    /// full calculation measures the leading columns immediately. When the
    /// last batch has run, the host's layout is re-adjusted exactly once.
    /// An in-flight run is cancelled and superseded.
    pub fn calculate_all_columns_width(&self, rows: Option<Span>) {
        let Some(host) = self.host() else {
            return;
        };
        if !self.is_enabled() {
            return;
        }
        self.cancel_run();

        let col_count = host.count_cols();
        let rows = rows.unwrap_or_else(|| Span::up_to(host.count_rows()));
        let Some(last) = col_count.checked_sub(1) else {
            return;
        };

        let mut s = self.shared.state.borrow_mut();
        let mut current = 0;
        if s.first_calculation {
            s.first_calculation = false;
            if let Some(limit) = s.options.sync_limit.clone() {
                match limit.resolve(last) {
                    Ok(0) => log::debug!("sync limit resolved to 0, skipping synchronous pass"),
                    Ok(limit) => {
                        s.engine.calculate_columns_width(
                            host.as_ref(),
                            Some(Span::new(0, limit)),
                            Some(rows),
                            true,
                        );
                        current = limit + 1;
                        log::debug!("measured columns 0..={limit} synchronously");
                    }
                    Err(e) => log::warn!("ignoring sync limit: {e}"),
                }
            }
        }

        s.next_run_id += 1;
        let run_id = s.next_run_id;
        if current > last {
            s.run = RunState::Completed { run_id };
            drop(s);
            host.adjust_layout();
            return;
        }

        s.run = RunState::BatchInFlight {
            run_id,
            cursor: Cursor {
                current,
                last,
                rows,
            },
            pending: None,
        };
        drop(s);
        log::debug!("full recalculation #{run_id} started over {col_count} column(s)");
        schedule_batch(&self.shared, run_id);
    }

    /// True while a full recalculation has batches left to run.
    pub fn is_in_progress(&self) -> bool {
        self.shared.state.borrow().run.is_in_flight()
    }

    /// Current state of the full-recalculation loop.
    pub fn run_state(&self) -> RunState {
        self.shared.state.borrow().run
    }

    /// Cancel the in-flight run, if any, and return to `Idle`.
    pub(crate) fn cancel_run(&self) {
        cancel_run(&self.shared);
    }
}

fn cancel_run(shared: &Shared) {
    let pending = {
        let mut s = shared.state.borrow_mut();
        let run = s.run;
        match run {
            RunState::BatchInFlight {
                run_id, pending, ..
            } => {
                log::debug!("full recalculation #{run_id} cancelled");
                s.run = RunState::Idle;
                pending
            }
            _ => None,
        }
    };
    if let Some(handle) = pending {
        shared.scheduler.cancel_frame(handle);
    }
}

fn schedule_batch(shared: &Rc<Shared>, run_id: u64) {
    let weak = Rc::downgrade(shared);
    let requested = shared
        .scheduler
        .request_frame(Box::new(move || run_batch(&weak, run_id)));

    let mut s = shared.state.borrow_mut();
    match requested {
        Ok(handle) => {
            if let RunState::BatchInFlight {
                run_id: current,
                pending,
                ..
            } = &mut s.run
            {
                if *current == run_id {
                    *pending = Some(handle);
                }
            }
        }
        Err(e) => {
            log::warn!("full recalculation #{run_id} aborted: {e}");
            s.run = RunState::Idle;
        }
    }
}

fn run_batch(shared: &Weak<Shared>, run_id: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let Some(host) = shared.host.upgrade() else {
        log::debug!("host gone, full recalculation #{run_id} aborted");
        cancel_run(&shared);
        return;
    };

    let next = {
        let mut s = shared.state.borrow_mut();
        let run = s.run;
        let mut cursor = match run {
            RunState::BatchInFlight {
                run_id: current,
                cursor,
                ..
            } if current == run_id => cursor,
            // Superseded or cancelled
            _ => return,
        };

        let to = cursor.current.saturating_add(CALCULATION_STEP).min(cursor.last);
        s.engine.calculate_columns_width(
            host.as_ref(),
            Some(Span::new(cursor.current, to)),
            Some(cursor.rows),
            true,
        );
        log::trace!("run #{run_id}: batch {}..={to}", cursor.current);

        match to.checked_add(1) {
            Some(next) if next <= cursor.last => {
                cursor.current = next;
                s.run = RunState::BatchInFlight {
                    run_id,
                    cursor,
                    pending: None,
                };
                Next::Reschedule
            }
            _ => {
                s.run = RunState::Completed { run_id };
                Next::Finish
            }
        }
    };

    match next {
        Next::Reschedule => schedule_batch(&shared, run_id),
        Next::Finish => {
            log::debug!("full recalculation #{run_id} completed");
            host.adjust_layout();
        }
    }
}
