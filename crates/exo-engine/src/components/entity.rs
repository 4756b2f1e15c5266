use glam::{Affine3A, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Transform relative to the parent entity (or world if no parent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.translation)
    }

    /// Rotate about the entity's own Y axis (post-multiplied, like `Object3D.rotateY`).
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(angle)).normalize();
    }
}

/// Fat Entity: one struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by render and picking.
    pub active: bool,
    /// Parent in the transform hierarchy.
    pub parent: Option<EntityId>,
    pub transform: Transform,
    /// Mesh (optional, entities without one are pure pivots).
    pub mesh: Option<MeshComponent>,
    /// Highlighted by the renderer's outline pass.
    pub outlined: bool,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            parent: None,
            transform: Transform::default(),
            mesh: None,
            outlined: false,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn local_y_rotation_accumulates() {
        let mut t = Transform::default();
        t.rotate_local_y(FRAC_PI_2);
        t.rotate_local_y(FRAC_PI_2);
        let x = t.rotation * Vec3::X;
        assert!((x - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn affine_applies_translation_after_rotation() {
        let t = Transform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            scale: 1.0,
        };
        let p = t.to_affine().transform_point3(Vec3::X);
        assert!((p - Vec3::new(10.0, 0.0, -1.0)).length() < 1e-5);
    }
}
