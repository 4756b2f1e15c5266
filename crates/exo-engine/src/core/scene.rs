use glam::{Affine3A, Vec3};
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Hierarchies deeper than this are treated as cycles.
const MAX_DEPTH: usize = 32;

/// Simple entity storage using a flat Vec.
/// Designed for small entity counts; parent links give a transform hierarchy.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(32),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// World transform of an entity, composed through its parent chain.
    /// Unknown ids yield `None`; a broken parent link stops the walk at the last known ancestor.
    pub fn world_transform(&self, id: EntityId) -> Option<Affine3A> {
        let mut entity = self.get(id)?;
        let mut world = entity.transform.to_affine();
        for _ in 0..MAX_DEPTH {
            let Some(parent_id) = entity.parent else {
                return Some(world);
            };
            let Some(parent) = self.get(parent_id) else {
                log::warn!("scene: entity {:?} has missing parent {:?}", entity.id, parent_id);
                return Some(world);
            };
            world = parent.transform.to_affine() * world;
            entity = parent;
        }
        log::warn!("scene: hierarchy too deep at {:?}", id);
        Some(world)
    }

    /// World-space origin of an entity.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.world_transform(id).map(|t| Vec3::from(t.translation))
    }

    /// Uniform world scale of an entity (product of the chain's scales).
    pub fn world_scale(&self, id: EntityId) -> f32 {
        let mut scale = 1.0;
        let mut current = self.get(id);
        let mut depth = 0;
        while let Some(entity) = current {
            scale *= entity.transform.scale;
            depth += 1;
            if depth >= MAX_DEPTH {
                break;
            }
            current = entity.parent.and_then(|p| self.get(p));
        }
        scale
    }

    /// Whether the entity and every ancestor are active.
    pub fn is_visible(&self, id: EntityId) -> bool {
        let mut current = self.get(id);
        let mut depth = 0;
        while let Some(entity) = current {
            if !entity.active {
                return false;
            }
            depth += 1;
            if depth >= MAX_DEPTH {
                return false;
            }
            current = entity.parent.and_then(|p| self.get(p));
        }
        depth > 0
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("star"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("planet"));
        assert_eq!(scene.get(EntityId(2)).unwrap().tag, "planet");
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn child_follows_rotating_parent() {
        let mut scene = Scene::new();
        let pivot = EntityId(1);
        let planet = EntityId(2);
        scene.spawn(Entity::new(pivot));
        scene.spawn(
            Entity::new(planet)
                .with_parent(pivot)
                .with_translation(Vec3::new(90.0, 0.0, 0.0)),
        );

        assert!((scene.world_position(planet).unwrap() - Vec3::new(90.0, 0.0, 0.0)).length() < 1e-4);

        scene.get_mut(pivot).unwrap().transform.rotation = Quat::from_rotation_y(FRAC_PI_2);
        let p = scene.world_position(planet).unwrap();
        assert!((p - Vec3::new(0.0, 0.0, -90.0)).length() < 1e-3, "p = {p}");
    }

    #[test]
    fn inactive_parent_hides_child() {
        let mut scene = Scene::new();
        let mut parent = Entity::new(EntityId(1));
        parent.active = false;
        scene.spawn(parent);
        scene.spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)));
        assert!(!scene.is_visible(EntityId(2)));
        assert!(!scene.is_visible(EntityId(99)));
    }

    #[test]
    fn missing_entity_has_no_transform() {
        let scene = Scene::new();
        assert!(scene.world_transform(EntityId(7)).is_none());
    }
}
