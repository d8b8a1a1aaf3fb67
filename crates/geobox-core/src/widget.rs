//! Widget shell tying the sync controller to the host attribute surface.

use crate::attrs::{self, BoxAttributes, MapOptions};
use crate::controller::{BBoxSyncController, SyncError, SyncEvent};
use crate::engine::{DrawEngine, EngineEvent};
use crate::geometry::{self, BoundingBox, InvalidGeometry};
use crate::viewport::{FIT_PADDING, Viewport};
use std::time::Duration;

/// Delay before the one-shot post-initialization relayout, giving the
/// host's rendering surface time to settle its size.
pub const RELAYOUT_DELAY: Duration = Duration::from_millis(200);

/// Interactive bounding-box map widget.
///
/// Routes host attribute updates into the sync controller and exposes the
/// controller's outward notifications. Mirrors the lifecycle of an
/// attribute-driven custom element: attach, engine load, attribute
/// changes, detach.
#[derive(Debug)]
pub struct MapWidget<E, V> {
    controller: BBoxSyncController<E, V>,
    attrs: BoxAttributes,
    options: MapOptions,
    pending_relayout: bool,
}

impl<E: DrawEngine, V: Viewport> MapWidget<E, V> {
    pub fn new(engine: E, viewport: V) -> Self {
        Self::with_options(engine, viewport, MapOptions::default())
    }

    pub fn with_options(engine: E, viewport: V, options: MapOptions) -> Self {
        Self {
            controller: BBoxSyncController::new(engine, viewport),
            attrs: BoxAttributes::default(),
            options,
            pending_relayout: false,
        }
    }

    /// Host notification that an attribute changed value.
    ///
    /// Box coordinates may call into the sync loop; option keys are only
    /// honored before the engine has loaded.
    pub fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new {
            return;
        }
        if self.attrs.set(name, new) {
            self.apply_attributes();
        } else if !self.controller.is_ready() {
            self.options.set(name, new);
        } else if attrs::is_option_key(name) {
            log::debug!("option attribute {name} changed after initialization, ignored");
        }
    }

    /// The drawing engine finished loading: move to `Ready`, render any
    /// complete attribute box, and schedule the one-shot relayout.
    pub fn engine_loaded(&mut self) {
        self.controller.initialize();
        self.pending_relayout = true;
        if let Some(url) = &self.options.tile_url {
            log::info!(
                "map surface up: tiles {url}, center ({}, {}), zoom {}",
                self.options.center_lon,
                self.options.center_lat,
                self.options.zoom
            );
        }
        self.apply_attributes();
    }

    /// Forward native drawing-engine events into the sync machine.
    pub fn handle_engine_events(&mut self, events: impl IntoIterator<Item = EngineEvent>) {
        for event in events {
            self.controller.handle_engine_event(event);
        }
    }

    /// Drain pending outward notifications.
    pub fn poll_events(&mut self) -> Vec<SyncEvent> {
        self.controller.poll_events()
    }

    /// Take the scheduled relayout delay, at most once per attach.
    pub fn take_pending_relayout(&mut self) -> Option<Duration> {
        if self.pending_relayout {
            self.pending_relayout = false;
            Some(RELAYOUT_DELAY)
        } else {
            None
        }
    }

    pub fn detach(&mut self) {
        self.pending_relayout = false;
        self.controller.detach();
    }

    pub fn current_box(&self) -> Option<BoundingBox> {
        self.controller.current_box()
    }

    pub fn is_ready(&self) -> bool {
        self.controller.is_ready()
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        self.controller.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.controller.engine_mut()
    }

    pub fn viewport(&self) -> &V {
        self.controller.viewport()
    }

    /// Push the attribute box into the sync loop when complete.
    ///
    /// All failures are swallowed here: partial attribute sets and invalid
    /// geometries are transient host states, and the widget keeps its last
    /// good box.
    fn apply_attributes(&mut self) {
        let Some(candidate) = self.attrs.bounding_box() else {
            return;
        };
        match self.controller.apply_external_box(candidate) {
            Ok(()) => {}
            Err(err @ SyncError::NotReady) => log::debug!("{err}"),
            Err(err) => log::debug!("external box dropped: {err}"),
        }
    }
}

/// Display-only bounding-box view.
///
/// Renders a validated box once and fits the viewport to it; user edits
/// and outward notifications do not exist here, so there is no sync loop
/// to guard.
#[derive(Debug)]
pub struct ReadOnlyMapView<E, V> {
    engine: E,
    viewport: V,
}

impl<E: DrawEngine, V: Viewport> ReadOnlyMapView<E, V> {
    pub fn new(engine: E, viewport: V) -> Self {
        Self { engine, viewport }
    }

    /// Validate and render the box, fitting the viewport around it.
    pub fn show(&mut self, candidate: BoundingBox) -> Result<(), InvalidGeometry> {
        let bbox = geometry::validate(candidate)?;
        self.engine.clear();
        self.engine.add_rectangle(bbox);
        self.viewport.fit_bounds(bbox, FIT_PADDING);
        Ok(())
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }
}
