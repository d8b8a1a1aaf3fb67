//! Thin translation layer between the core and the drawing engine.
//!
//! Holds nothing but the engine instance; all decision logic lives in the
//! sync controller. Its one invariant: at most one rectangle is active at
//! a time. Engines happily hold several features, so on every `Create`
//! echo the adapter discards all but the newest before the core sees the
//! edit.

use crate::engine::{ChangeType, DrawAction, DrawEngine, EngineEvent};
use crate::feature::{FeatureId, RectangleFeature};
use crate::geometry::BoundingBox;

/// How a user edit reached the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Created,
    Modified,
}

/// A drawing-engine event translated into core terms.
#[derive(Debug, Clone, PartialEq)]
pub struct UserEdit {
    pub feature: RectangleFeature,
    pub action: EditAction,
}

/// Wraps the external drawing engine behind the core's command set.
#[derive(Debug)]
pub struct EngineAdapter<E> {
    engine: E,
}

impl<E: DrawEngine> EngineAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn clear(&mut self) -> Vec<EngineEvent> {
        self.engine.clear()
    }

    pub fn add_rectangle(&mut self, bbox: BoundingBox) -> Vec<EngineEvent> {
        self.engine.add_rectangle(bbox)
    }

    pub fn features(&self) -> Vec<RectangleFeature> {
        self.engine.features()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct access to the engine, for hosts that also drive it.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Translate a native engine event into a user edit, enforcing the
    /// single-active-rectangle invariant along the way.
    ///
    /// `Create` changes trigger the cleanup of stale features and are then
    /// dropped; the matching `Finished` event carries the edit itself.
    pub fn translate(&mut self, event: EngineEvent) -> Option<UserEdit> {
        match event {
            EngineEvent::Changed {
                change: ChangeType::Create,
                ..
            } => {
                self.retain_newest_feature();
                None
            }
            EngineEvent::Changed { .. } => None,
            EngineEvent::Finished { id, action } => {
                let feature = self.find_feature(id)?;
                let action = match action {
                    DrawAction::Draw => EditAction::Created,
                    DrawAction::Drag => EditAction::Modified,
                };
                Some(UserEdit { feature, action })
            }
        }
    }

    fn find_feature(&self, id: FeatureId) -> Option<RectangleFeature> {
        let feature = self.engine.features().into_iter().find(|f| f.id() == id);
        if feature.is_none() {
            log::debug!("finished event for unknown feature {id}");
        }
        feature
    }

    /// Drop every feature except the most recently created one.
    fn retain_newest_feature(&mut self) {
        let snapshot = self.engine.features();
        if snapshot.len() <= 1 {
            return;
        }
        let stale: Vec<FeatureId> = snapshot[..snapshot.len() - 1]
            .iter()
            .map(|f| f.id())
            .collect();
        log::debug!("discarding {} stale feature(s)", stale.len());
        self.engine.remove_features(&stale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;

    #[test]
    fn test_create_echo_keeps_only_newest_feature() {
        let mut engine = MemoryEngine::new();
        engine.draw_rectangle(BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        let (newest, events) = engine.draw_rectangle(BoundingBox::new(2.0, 2.0, 3.0, 3.0));

        let mut adapter = EngineAdapter::new(engine);
        // First event is the Create change; translating it runs the cleanup.
        assert!(adapter.translate(events[0].clone()).is_none());
        let remaining = adapter.features();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), newest);
    }

    #[test]
    fn test_finish_draw_translates_to_created_edit() {
        let mut engine = MemoryEngine::new();
        let bbox = BoundingBox::new(-8.0, 41.0, 4.0, 49.0);
        let (id, events) = engine.draw_rectangle(bbox);

        let mut adapter = EngineAdapter::new(engine);
        let edit = adapter.translate(events[1].clone()).unwrap();
        assert_eq!(edit.action, EditAction::Created);
        assert_eq!(edit.feature.id(), id);
        assert_eq!(edit.feature.bounding_box(), bbox);
    }

    #[test]
    fn test_finish_drag_translates_to_modified_edit() {
        let mut engine = MemoryEngine::new();
        let (id, _) = engine.draw_rectangle(BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        let events = engine.drag_feature(id, BoundingBox::new(-8.0, 41.0, 4.0, 49.0));

        let mut adapter = EngineAdapter::new(engine);
        let edit = adapter.translate(events[1].clone()).unwrap();
        assert_eq!(edit.action, EditAction::Modified);
    }

    #[test]
    fn test_update_and_delete_changes_are_dropped() {
        let mut adapter = EngineAdapter::new(MemoryEngine::new());
        let ids = vec![FeatureId::new_v4()];
        assert!(adapter
            .translate(EngineEvent::Changed {
                ids: ids.clone(),
                change: ChangeType::Update,
            })
            .is_none());
        assert!(adapter
            .translate(EngineEvent::Changed {
                ids,
                change: ChangeType::Delete,
            })
            .is_none());
    }

    #[test]
    fn test_finish_for_removed_feature_is_dropped() {
        let mut adapter = EngineAdapter::new(MemoryEngine::new());
        let event = EngineEvent::Finished {
            id: FeatureId::new_v4(),
            action: DrawAction::Draw,
        };
        assert!(adapter.translate(event).is_none());
    }
}
