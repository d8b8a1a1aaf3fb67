//! Geobox Core Library
//!
//! Sync state machine for an interactive bounding-box map widget: keeps a
//! host-supplied box and a user-editable rectangle on a drawing surface
//! reconciled without feedback loops.

pub mod adapter;
pub mod attrs;
pub mod controller;
pub mod engine;
pub mod feature;
pub mod geometry;
pub mod viewport;
pub mod widget;

pub use adapter::{EditAction, EngineAdapter, UserEdit};
pub use attrs::{BoxAttributes, MapOptions};
pub use controller::{BBoxSyncController, SyncError, SyncEvent, UpdateOrigin};
pub use engine::{ChangeType, DrawAction, DrawEngine, EngineEvent, MemoryEngine};
pub use feature::{FeatureId, RectangleFeature};
pub use geometry::{BoundingBox, InvalidGeometry, validate};
pub use viewport::{FIT_PADDING, RecordingViewport, Viewport};
pub use widget::{MapWidget, ReadOnlyMapView, RELAYOUT_DELAY};
