//! The auto column size plugin.
//!
//! `AutoColumnSize` ties the calculation engine to a host grid and a frame
//! scheduler:
//! - `batch`: full-table recalculation spread across animation frames
//! - `hooks`: reactions to host lifecycle events (render, load, edit, resize)
//!
//! The plugin is a cheap handle around shared state. Scheduled callbacks hold
//! `Weak` references to that state, and the state holds only a `Weak`
//! reference to the host, so tearing down either side makes pending work
//! a silent no-op.

mod batch;
mod hooks;

pub use batch::{RunState, CALCULATION_STEP};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::AutoSizeOptions;
use crate::engine::CalculationEngine;
use crate::frame::FrameScheduler;
use crate::host::GridHost;
use crate::measure::TextWidthSurface;
use crate::types::Span;

pub(crate) struct Shared {
    pub(crate) state: RefCell<AutoSizeState>,
    pub(crate) host: Weak<dyn GridHost>,
    pub(crate) scheduler: Rc<dyn FrameScheduler>,
}

pub(crate) struct AutoSizeState {
    pub(crate) engine: CalculationEngine,
    pub(crate) options: AutoSizeOptions,
    pub(crate) enabled: bool,
    /// Sync limit applies to the first full calculation only.
    pub(crate) first_calculation: bool,
    pub(crate) run: RunState,
    pub(crate) next_run_id: u64,
}

/// Auto column sizing for one grid.
///
/// [`GridHost`] methods are called while the plugin state is borrowed and must
/// not call back into the plugin. [`GridHost::adjust_layout`] runs after the
/// borrow is released.
#[derive(Clone)]
pub struct AutoColumnSize {
    shared: Rc<Shared>,
}

impl AutoColumnSize {
    /// Attach to `host` with the default sampler and native text surface.
    ///
    /// The plugin enables itself when the host's settings allow it.
    pub fn new<H: GridHost + 'static>(
        host: &Rc<H>,
        scheduler: Rc<dyn FrameScheduler>,
        options: AutoSizeOptions,
    ) -> Self {
        let engine = CalculationEngine::new(
            Box::new(options.sampler()),
            Box::new(TextWidthSurface::default()),
        );
        Self::with_engine(host, scheduler, options, engine)
    }

    /// Attach to `host` with a custom engine (sampler and surface).
    pub fn with_engine<H: GridHost + 'static>(
        host: &Rc<H>,
        scheduler: Rc<dyn FrameScheduler>,
        options: AutoSizeOptions,
        engine: CalculationEngine,
    ) -> Self {
        let host: Weak<H> = Rc::downgrade(host);
        let host: Weak<dyn GridHost> = host;
        let engine = engine.with_headers(options.use_headers);
        let plugin = Self {
            shared: Rc::new(Shared {
                state: RefCell::new(AutoSizeState {
                    engine,
                    options,
                    enabled: false,
                    first_calculation: true,
                    run: RunState::Idle,
                    next_run_id: 0,
                }),
                host,
                scheduler,
            }),
        };
        plugin.enable();
        plugin
    }

    pub(crate) fn from_shared(shared: Rc<Shared>) -> Self {
        Self { shared }
    }

    pub(crate) fn host(&self) -> Option<Rc<dyn GridHost>> {
        self.shared.host.upgrade()
    }

    /// True when the host's settings allow auto-sizing: it is not disabled and
    /// no static column widths are configured.
    pub fn is_allowed_by_host(&self) -> bool {
        self.host()
            .is_some_and(|h| !h.is_auto_size_disabled() && !h.has_static_column_widths())
    }

    /// Whether the plugin is currently active.
    pub fn is_enabled(&self) -> bool {
        self.shared.state.borrow().enabled
    }

    /// Activate the plugin if the host allows it.
    pub fn enable(&self) {
        if self.is_enabled() || !self.is_allowed_by_host() {
            return;
        }
        let mut s = self.shared.state.borrow_mut();
        s.enabled = true;
        s.first_calculation = true;
        log::debug!("auto column size enabled");
    }

    /// Deactivate: cancel any in-flight run and drop every cached width.
    pub fn disable(&self) {
        if !self.is_enabled() {
            return;
        }
        self.cancel_run();
        let mut s = self.shared.state.borrow_mut();
        s.enabled = false;
        s.engine.clear();
        s.engine.release();
        log::debug!("auto column size disabled");
    }

    /// Re-evaluate enablement after the host's settings changed.
    pub fn update_settings(&self) {
        if self.is_allowed_by_host() {
            self.enable();
        } else {
            self.disable();
        }
    }

    /// First visible column reported by the host.
    pub fn first_visible_column(&self) -> Option<u32> {
        self.host().and_then(|h| h.first_visible_column())
    }

    /// Last visible column reported by the host.
    pub fn last_visible_column(&self) -> Option<u32> {
        self.host().and_then(|h| h.last_visible_column())
    }

    /// Measure the stale columns of `cols` over `rows`. See
    /// [`CalculationEngine::calculate_columns_width`]. Returns how many widths
    /// were written; 0 when disabled or the host is gone.
    pub fn calculate_columns_width(
        &self,
        cols: Option<Span>,
        rows: Option<Span>,
        force: bool,
    ) -> usize {
        let Some(host) = self.host() else {
            return 0;
        };
        let mut s = self.shared.state.borrow_mut();
        if !s.enabled {
            return 0;
        }
        s.engine
            .calculate_columns_width(host.as_ref(), cols, rows, force)
    }

    /// Width the host should use for `col`. See
    /// [`CalculationEngine::column_width`].
    pub fn column_width(&self, col: u32, default: Option<f32>) -> Option<f32> {
        self.shared.state.borrow().engine.column_width(col, default)
    }

    /// Cached width of `col`, if measured.
    pub fn cached_width(&self, col: u32) -> Option<f32> {
        self.shared.state.borrow().engine.cached_width(col)
    }

    /// Snapshot of every measured `(col, width)` pair.
    pub fn widths(&self) -> Vec<(u32, f32)> {
        self.shared.state.borrow().engine.widths().iter().collect()
    }

    /// Drop every cached width.
    pub fn clear_cache(&self) {
        self.shared.state.borrow_mut().engine.clear();
    }

    /// True if any column of the grid lacks a cached width.
    pub fn needs_recalculation(&self) -> bool {
        let Some(host) = self.host() else {
            return false;
        };
        self.shared
            .state
            .borrow()
            .engine
            .widths()
            .has_gaps(host.count_cols())
    }

    /// Clear the cache and start a full recalculation.
    pub fn recalculate_all_columns_width(&self) {
        if !self.is_enabled() || self.host().is_none() {
            return;
        }
        self.clear_cache();
        self.calculate_all_columns_width(None);
    }
}
