//! Drawing engine seam.
//!
//! The interactive drawing surface is an external collaborator; the core
//! only issues it commands and consumes its events. Commands return the
//! echo events the engine generates synchronously while executing them,
//! so the controller can run those echoes through its normal event path
//! while the suppression slot is held.

use crate::feature::{FeatureId, RectangleFeature};
use crate::geometry::BoundingBox;

/// How a finished interaction was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawAction {
    /// A new rectangle was drawn.
    Draw,
    /// An existing rectangle was moved in select mode.
    Drag,
}

/// What a change event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Create,
    Update,
    Delete,
}

/// Native events of the drawing engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// An interaction on one feature completed.
    Finished { id: FeatureId, action: DrawAction },
    /// The feature store changed.
    Changed {
        ids: Vec<FeatureId>,
        change: ChangeType,
    },
}

/// Command surface of the external drawing engine.
pub trait DrawEngine {
    /// Remove every feature from the engine.
    fn clear(&mut self) -> Vec<EngineEvent>;

    /// Add a single rectangle feature with the box's four corners in
    /// closed-ring order.
    fn add_rectangle(&mut self, bbox: BoundingBox) -> Vec<EngineEvent>;

    /// Snapshot of the current features, oldest first.
    fn features(&self) -> Vec<RectangleFeature>;

    /// Remove the given features.
    fn remove_features(&mut self, ids: &[FeatureId]) -> Vec<EngineEvent>;
}

/// In-memory drawing engine.
///
/// Backs tests and the demo app. Besides the command surface it can
/// simulate user interactions, returning the events a real engine would
/// deliver so they can be fed back through the widget.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    /// Features in insertion order, oldest first.
    features: Vec<RectangleFeature>,
    clear_calls: usize,
    add_calls: usize,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a user finishing a freshly drawn rectangle.
    pub fn draw_rectangle(&mut self, bbox: BoundingBox) -> (FeatureId, Vec<EngineEvent>) {
        let feature = RectangleFeature::from_bbox(bbox);
        let id = feature.id();
        self.features.push(feature);
        let events = vec![
            EngineEvent::Changed {
                ids: vec![id],
                change: ChangeType::Create,
            },
            EngineEvent::Finished {
                id,
                action: DrawAction::Draw,
            },
        ];
        (id, events)
    }

    /// Simulate a user dragging an existing rectangle to a new extent.
    ///
    /// Returns no events if the feature is unknown.
    pub fn drag_feature(&mut self, id: FeatureId, bbox: BoundingBox) -> Vec<EngineEvent> {
        let Some(feature) = self.features.iter_mut().find(|f| f.id() == id) else {
            return Vec::new();
        };
        *feature = RectangleFeature::reconstruct(id, bbox.ring());
        vec![
            EngineEvent::Changed {
                ids: vec![id],
                change: ChangeType::Update,
            },
            EngineEvent::Finished {
                id,
                action: DrawAction::Drag,
            },
        ]
    }

    /// Number of `clear` commands received (test observability).
    pub fn clear_calls(&self) -> usize {
        self.clear_calls
    }

    /// Number of `add_rectangle` commands received (test observability).
    pub fn add_calls(&self) -> usize {
        self.add_calls
    }
}

impl DrawEngine for MemoryEngine {
    fn clear(&mut self) -> Vec<EngineEvent> {
        self.clear_calls += 1;
        let ids: Vec<FeatureId> = self.features.iter().map(|f| f.id()).collect();
        self.features.clear();
        if ids.is_empty() {
            Vec::new()
        } else {
            vec![EngineEvent::Changed {
                ids,
                change: ChangeType::Delete,
            }]
        }
    }

    fn add_rectangle(&mut self, bbox: BoundingBox) -> Vec<EngineEvent> {
        self.add_calls += 1;
        let feature = RectangleFeature::from_bbox(bbox);
        let id = feature.id();
        self.features.push(feature);
        // Programmatic adds still announce themselves; the controller's
        // suppression slot is what keeps these from looking like edits.
        vec![
            EngineEvent::Changed {
                ids: vec![id],
                change: ChangeType::Create,
            },
            EngineEvent::Finished {
                id,
                action: DrawAction::Draw,
            },
        ]
    }

    fn features(&self) -> Vec<RectangleFeature> {
        self.features.clone()
    }

    fn remove_features(&mut self, ids: &[FeatureId]) -> Vec<EngineEvent> {
        let removed: Vec<FeatureId> = self
            .features
            .iter()
            .map(|f| f.id())
            .filter(|id| ids.contains(id))
            .collect();
        self.features.retain(|f| !ids.contains(&f.id()));
        if removed.is_empty() {
            Vec::new()
        } else {
            vec![EngineEvent::Changed {
                ids: removed,
                change: ChangeType::Delete,
            }]
        }
    }
}
