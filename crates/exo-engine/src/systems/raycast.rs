//! Ray picking against sphere meshes.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::renderer::camera::Ray;

/// Nearest intersection found by [`raycast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: EntityId,
    /// Distance along the ray.
    pub distance: f32,
    pub point: Vec3,
}

/// Smallest non-negative ray parameter at which the ray meets the sphere.
/// A ray starting inside the sphere hits its far side.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_disc;
    (far >= 0.0).then_some(far)
}

/// Intersect the ray with the sphere meshes of `targets` and return the nearest hit.
/// Inactive entities and non-sphere meshes are ignored.
pub fn raycast(scene: &Scene, ray: &Ray, targets: &[EntityId]) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for &id in targets {
        if !scene.is_visible(id) {
            continue;
        }
        let Some(radius) = scene.get(id).and_then(|e| e.mesh.as_ref()).and_then(|m| m.pick_radius()) else {
            continue;
        };
        let Some(center) = scene.world_position(id) else {
            continue;
        };
        let radius = radius * scene.world_scale(id);
        if let Some(t) = ray_sphere(ray, center, radius) {
            if best.map_or(true, |b| t < b.distance) {
                best = Some(RayHit { entity: id, distance: t, point: ray.at(t) });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::mesh::{Material, MeshComponent};

    fn ray_down_z() -> Ray {
        Ray { origin: Vec3::new(0.0, 0.0, 100.0), dir: Vec3::NEG_Z }
    }

    #[test]
    fn sphere_hit_distance() {
        let t = ray_sphere(&ray_down_z(), Vec3::ZERO, 10.0).unwrap();
        assert!((t - 90.0).abs() < 1e-4);
    }

    #[test]
    fn sphere_miss() {
        assert!(ray_sphere(&ray_down_z(), Vec3::new(50.0, 0.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        assert!(ray_sphere(&ray_down_z(), Vec3::new(0.0, 0.0, 200.0), 10.0).is_none());
    }

    #[test]
    fn nearest_target_wins() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_mesh(MeshComponent::sphere(6.4, Material::default())));
        scene.spawn(Entity::new(EntityId(2)).with_mesh(MeshComponent::sphere(6.5, Material::default())));
        scene.spawn(
            Entity::new(EntityId(3))
                .with_translation(Vec3::new(0.0, 0.0, 50.0))
                .with_mesh(MeshComponent::sphere(1.0, Material::default())),
        );

        let hit = raycast(&scene, &ray_down_z(), &[EntityId(1), EntityId(2)]).unwrap();
        assert_eq!(hit.entity, EntityId(2));

        let hit = raycast(&scene, &ray_down_z(), &[EntityId(1), EntityId(2), EntityId(3)]).unwrap();
        assert_eq!(hit.entity, EntityId(3));
        assert!((hit.point.z - 51.0).abs() < 1e-3);
    }

    #[test]
    fn inactive_targets_are_skipped() {
        let mut scene = Scene::new();
        let mut e = Entity::new(EntityId(1)).with_mesh(MeshComponent::sphere(5.0, Material::default()));
        e.active = false;
        scene.spawn(e);
        assert!(raycast(&scene, &ray_down_z(), &[EntityId(1)]).is_none());
    }
}
