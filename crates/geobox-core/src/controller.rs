//! Bidirectional sync between externally supplied boxes and user edits.
//!
//! The controller owns the canonical box and mediates between two
//! independent sources of truth: programmatic pushes from the host and
//! freehand edits on the drawing surface. Every engine mutation it
//! performs triggers echo events that re-enter it before the original
//! call completes; a single-slot update-origin tag keeps those echoes
//! from being mistaken for new user edits.

use crate::adapter::{EditAction, EngineAdapter, UserEdit};
use crate::engine::{DrawEngine, EngineEvent};
use crate::feature::RectangleFeature;
use crate::geometry::{self, BoundingBox, InvalidGeometry};
use crate::viewport::{FIT_PADDING, Viewport};
use thiserror::Error;

/// Who is currently pushing an update through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrigin {
    #[default]
    None,
    External,
    User,
}

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Ready,
    Detached,
}

/// Errors surfaced to callers of the sync operations.
///
/// None of these are fatal; the worst-case outcome is "box does not
/// update".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("rejected box: {0}")]
    Invalid(#[from] InvalidGeometry),
    /// Drawing engine not initialized yet; the candidate was buffered and
    /// will be replayed once it is.
    #[error("drawing engine not ready, update buffered")]
    NotReady,
    #[error("widget already detached")]
    Detached,
}

/// Outward notifications, polled by the host binding layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// The canonical box changed through a user edit.
    BoxChanged(BoundingBox),
}

/// Canonical box state plus the machinery that keeps it in sync with the
/// drawing engine.
#[derive(Debug)]
pub struct BBoxSyncController<E, V> {
    adapter: EngineAdapter<E>,
    viewport: V,
    phase: Phase,
    origin: UpdateOrigin,
    /// Last accepted canonical box.
    current_box: Option<BoundingBox>,
    /// Which side produced `current_box`. A user redraw identical to the
    /// last external push still notifies, because the source of truth
    /// shifted from host to user.
    current_source: UpdateOrigin,
    /// Last external box received before the engine was ready; replayed
    /// exactly once at initialization.
    pending_box: Option<BoundingBox>,
    events: Vec<SyncEvent>,
}

impl<E: DrawEngine, V: Viewport> BBoxSyncController<E, V> {
    pub fn new(engine: E, viewport: V) -> Self {
        Self {
            adapter: EngineAdapter::new(engine),
            viewport,
            phase: Phase::Uninitialized,
            origin: UpdateOrigin::None,
            current_box: None,
            current_source: UpdateOrigin::None,
            pending_box: None,
            events: Vec::new(),
        }
    }

    /// Transition to `Ready` once the drawing engine signals load
    /// completion, replaying the buffered external box if one arrived
    /// early.
    pub fn initialize(&mut self) {
        if self.phase != Phase::Uninitialized {
            log::debug!("initialize called in phase {:?}, ignoring", self.phase);
            return;
        }
        self.phase = Phase::Ready;
        log::info!("drawing engine ready");
        if let Some(pending) = self.pending_box.take() {
            if let Err(err) = self.apply_external_box(pending) {
                log::debug!("buffered external box rejected: {err}");
            }
        }
    }

    /// Tear down; terminal.
    pub fn detach(&mut self) {
        self.phase = Phase::Detached;
        self.pending_box = None;
        self.events.clear();
        log::info!("sync controller detached");
    }

    /// Accept a new box from the host.
    ///
    /// Rejected candidates leave all state untouched: the host keeps its
    /// last good box rather than seeing an error surface.
    pub fn apply_external_box(&mut self, candidate: BoundingBox) -> Result<(), SyncError> {
        if self.origin != UpdateOrigin::None {
            // Feedback echo of our own engine write; must not recurse.
            log::debug!("dropping re-entrant external update");
            return Ok(());
        }
        match self.phase {
            Phase::Detached => return Err(SyncError::Detached),
            Phase::Uninitialized => {
                log::debug!("engine not ready, buffering external box");
                self.pending_box = Some(candidate);
                return Err(SyncError::NotReady);
            }
            Phase::Ready => {}
        }

        let candidate = geometry::validate(candidate)?;
        if self.current_box == Some(candidate) {
            // Redundant push; avoid engine churn.
            return Ok(());
        }

        self.with_origin(UpdateOrigin::External, |ctl| {
            let echoes = ctl.adapter.clear();
            ctl.dispatch(echoes);
            let echoes = ctl.adapter.add_rectangle(candidate);
            ctl.dispatch(echoes);
            ctl.viewport.fit_bounds(candidate, FIT_PADDING);
        });
        self.current_box = Some(candidate);
        self.current_source = UpdateOrigin::External;
        // External pushes are already known to the host; only user edits
        // are reported outward.
        Ok(())
    }

    /// Feed a native drawing-engine event through the adapter and, when
    /// it amounts to a user edit, into the sync machine.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        if self.phase != Phase::Ready {
            log::debug!("engine event in phase {:?}, dropping", self.phase);
            return;
        }
        if let Some(UserEdit { feature, action }) = self.adapter.translate(event) {
            self.on_user_edit(feature, action);
        }
    }

    /// Process a finished/changed rectangle coming from the user.
    pub fn on_user_edit(&mut self, feature: RectangleFeature, action: EditAction) {
        if self.origin != UpdateOrigin::None {
            log::debug!("suppressed {:?} echo from own engine write", action);
            return;
        }
        let candidate = match geometry::validate(feature.bounding_box()) {
            Ok(bbox) => bbox,
            Err(err) => {
                // Mid-drag collapse and the like; expected, never propagated.
                log::debug!("ignoring transient user edit: {err}");
                return;
            }
        };
        if self.current_box == Some(candidate) && self.current_source == UpdateOrigin::User {
            return;
        }
        self.current_box = Some(candidate);
        self.current_source = UpdateOrigin::User;
        // The engine already holds the authoritative visual; no re-render,
        // and no viewport fit on user-driven edits.
        self.events.push(SyncEvent::BoxChanged(candidate));
    }

    /// Drain pending outward notifications (non-blocking).
    pub fn poll_events(&mut self) -> Vec<SyncEvent> {
        std::mem::take(&mut self.events)
    }

    /// The last accepted canonical box.
    pub fn current_box(&self) -> Option<BoundingBox> {
        self.current_box
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn engine(&self) -> &E {
        self.adapter.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.adapter.engine_mut()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Run `f` with the origin slot held, releasing it on the way out so
    /// an early return can never leave it set.
    fn with_origin<R>(&mut self, origin: UpdateOrigin, f: impl FnOnce(&mut Self) -> R) -> R {
        self.origin = origin;
        let out = f(self);
        self.origin = UpdateOrigin::None;
        out
    }

    fn dispatch(&mut self, echoes: Vec<EngineEvent>) {
        for event in echoes {
            self.handle_engine_event(event);
        }
    }
}
