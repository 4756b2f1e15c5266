//! Per-frame projection of the 3D scene into the flat render buffers.

use glam::{EulerRot, Vec3};
use crate::components::mesh::{Material, Shape};
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};
#[cfg(feature = "vectors")]
use crate::systems::vector::{VectorColor, VectorState};
#[cfg(feature = "vectors")]
use glam::{Affine3A, Vec2};

/// Screen-space stroke width for line loops, pixels.
#[cfg(feature = "vectors")]
pub const LINE_WIDTH: f32 = 1.0;

fn sdf_flags(outlined: bool, material: &Material) -> u32 {
    let outline = if outlined { SDFInstance::FLAG_OUTLINE } else { 0 };
    outline | material.sdf_flags()
}

/// Single-sided rings are drawn only from the side their local +Z faces.
#[cfg(feature = "vectors")]
fn faces_camera(world: &Affine3A, camera: &PerspectiveCamera) -> bool {
    let normal = world.transform_vector3(Vec3::Z);
    normal.dot(camera.position - Vec3::from(world.translation)) > 0.0
}

/// Project every visible sphere into `buffer`, sorted back to front.
/// Only the nearest `max_instances` spheres are kept.
pub fn build_sdf_buffer(scene: &Scene, camera: &PerspectiveCamera, buffer: &mut SDFBuffer, max_instances: usize) {
    buffer.clear();

    let mut instances: Vec<SDFInstance> = Vec::new();
    for entity in scene.iter() {
        let Some(mesh) = &entity.mesh else {
            continue;
        };
        let Shape::Sphere { radius } = mesh.shape else {
            continue;
        };
        if !scene.is_visible(entity.id) {
            continue;
        }
        let Some(world) = scene.world_transform(entity.id) else {
            continue;
        };
        let center = Vec3::from(world.translation);
        let Some(proj) = camera.project(center) else {
            continue;
        };

        let (_, rot, _) = world.to_scale_rotation_translation();
        let (rotation, _, _) = rot.to_euler(EulerRot::YXZ);
        let m = &mesh.material;
        let lit = if m.emissive_intensity > 0.0 { m.emissive } else { m.color };
        instances.push(SDFInstance {
            x: proj.pos.x,
            y: proj.pos.y,
            radius: radius * scene.world_scale(entity.id) * proj.scale,
            rotation,
            r: lit.r,
            g: lit.g,
            b: lit.b,
            shininess: m.shininess,
            emissive: m.emissive_intensity,
            opacity: m.opacity,
            flags: sdf_flags(entity.outlined, m) as f32,
            depth: proj.depth,
        });
    }

    instances.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    if instances.len() > max_instances {
        log::warn!("sdf buffer full: dropping {} spheres", instances.len() - max_instances);
        instances.truncate(max_instances);
    }
    for inst in instances.into_iter().rev() {
        buffer.push(inst);
    }
}

/// Project a loop of world points. `None` if any point is behind the camera.
#[cfg(feature = "vectors")]
fn project_loop(camera: &PerspectiveCamera, points: impl Iterator<Item = Vec3>) -> Option<Vec<Vec2>> {
    points.map(|p| camera.project(p).map(|proj| proj.pos)).collect()
}

#[cfg(feature = "vectors")]
fn circle_points(radius: f32, segments: u32) -> impl Iterator<Item = Vec3> {
    let n = segments.max(3);
    (0..n).map(move |i| {
        let a = i as f32 / n as f32 * std::f32::consts::TAU;
        Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
    })
}

/// Tessellate every visible ring and line loop into `vectors`.
/// Shapes that cross the near plane are skipped for the frame.
#[cfg(feature = "vectors")]
pub fn build_vector_geometry(scene: &Scene, camera: &PerspectiveCamera, vectors: &mut VectorState) {
    vectors.clear();

    for entity in scene.iter() {
        let Some(mesh) = &entity.mesh else {
            continue;
        };
        if matches!(mesh.shape, Shape::Sphere { .. }) || !scene.is_visible(entity.id) {
            continue;
        }
        let Some(world) = scene.world_transform(entity.id) else {
            continue;
        };
        let color = VectorColor::from(mesh.material.color).with_alpha(mesh.material.opacity);

        match &mesh.shape {
            Shape::Ring { inner, outer, segments } => {
                if !mesh.material.double_sided && !faces_camera(&world, camera) {
                    continue;
                }
                let outer_pts = project_loop(camera, circle_points(*outer, *segments).map(|p| world.transform_point3(p)));
                let inner_pts = project_loop(camera, circle_points(*inner, *segments).map(|p| world.transform_point3(p)));
                if let (Some(o), Some(i)) = (outer_pts, inner_pts) {
                    vectors.fill_annulus(&o, &i, color);
                }
            }
            Shape::LineLoop { points } => {
                if let Some(pts) = project_loop(camera, points.iter().map(|p| world.transform_point3(*p))) {
                    vectors.stroke_polygon(&pts, LINE_WIDTH, color);
                }
            }
            Shape::Sphere { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::entity::Entity;
    use crate::components::mesh::{Color, Material, MeshComponent};
    use crate::renderer::camera::Viewport;

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(45.0, Viewport::new(800.0, 600.0), 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 100.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    #[test]
    fn spheres_sorted_back_to_front() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_translation(Vec3::new(0.0, 0.0, 40.0))
                .with_mesh(MeshComponent::sphere(1.0, Material::default())),
        );
        scene.spawn(Entity::new(EntityId(2)).with_mesh(MeshComponent::sphere(5.0, Material::default())));

        let mut buf = SDFBuffer::new();
        build_sdf_buffer(&scene, &camera(), &mut buf, 16);
        let inst = buf.instances();
        assert_eq!(inst.len(), 2);
        assert!(inst[0].depth > inst[1].depth);
        assert!((inst[0].x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn emissive_color_and_outline_are_written() {
        let mut scene = Scene::new();
        let mut star = Entity::new(EntityId(1)).with_mesh(MeshComponent::sphere(
            17.0,
            Material::new(Color::WHITE).with_emissive(Color::from_hex(0xFF6666), 1.9),
        ));
        star.outlined = true;
        scene.spawn(star);

        let mut buf = SDFBuffer::new();
        build_sdf_buffer(&scene, &camera(), &mut buf, 16);
        let inst = buf.instances()[0];
        assert_eq!(inst.r, 1.0);
        assert_eq!(inst.emissive, 1.9);
        assert!(inst.has_flag(SDFInstance::FLAG_OUTLINE));
        assert!(inst.has_flag(SDFInstance::FLAG_DEPTH_WRITE));
        assert!(!inst.has_flag(SDFInstance::FLAG_CAST_SHADOW));
        assert!(inst.radius > 0.0);
    }

    #[test]
    fn capacity_keeps_nearest() {
        let mut scene = Scene::new();
        for i in 0..3 {
            scene.spawn(
                Entity::new(EntityId(i + 1))
                    .with_translation(Vec3::new(0.0, 0.0, i as f32 * 10.0))
                    .with_mesh(MeshComponent::sphere(1.0, Material::default())),
            );
        }
        let mut buf = SDFBuffer::new();
        build_sdf_buffer(&scene, &camera(), &mut buf, 2);
        assert_eq!(buf.instance_count(), 2);
        assert!((buf.instances()[0].depth - 90.0).abs() < 1e-3);
        assert!((buf.instances()[1].depth - 80.0).abs() < 1e-3);
    }

    #[test]
    fn culled_and_inactive_spheres_are_skipped() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_translation(Vec3::new(0.0, 0.0, 150.0))
                .with_mesh(MeshComponent::sphere(1.0, Material::default())),
        );
        let mut hidden = Entity::new(EntityId(2)).with_mesh(MeshComponent::sphere(1.0, Material::default()));
        hidden.active = false;
        scene.spawn(hidden);

        let mut buf = SDFBuffer::new();
        build_sdf_buffer(&scene, &camera(), &mut buf, 16);
        assert_eq!(buf.instance_count(), 0);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn rings_and_loops_produce_geometry() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_mesh(MeshComponent::ring(
            20.0,
            30.0,
            64,
            Material::new(Color::from_hex(0x00FF00)).with_opacity(0.2),
        )));
        let mut vectors = VectorState::new();
        build_vector_geometry(&scene, &camera(), &mut vectors);
        let ring_vertices = vectors.vertex_count();
        assert!(ring_vertices > 0);
        assert_eq!(vectors.as_slice()[5], 0.2);

        let points: Vec<Vec3> = circle_points(40.0, 100).collect();
        scene.spawn(Entity::new(EntityId(2)).with_mesh(MeshComponent::line_loop(points, Material::new(Color::WHITE))));
        build_vector_geometry(&scene, &camera(), &mut vectors);
        assert!(vectors.vertex_count() > ring_vertices);
    }

    #[test]
    fn translucent_shell_flags_reach_the_instance() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_mesh(MeshComponent::sphere(
            6.5,
            Material::new(Color::WHITE).with_opacity(0.4).without_depth_write().with_shadows(true, true),
        )));
        let mut buf = SDFBuffer::new();
        build_sdf_buffer(&scene, &camera(), &mut buf, 16);
        let inst = buf.instances()[0];
        assert!(!inst.has_flag(SDFInstance::FLAG_DEPTH_WRITE));
        assert!(inst.has_flag(SDFInstance::FLAG_CAST_SHADOW));
        assert!(inst.has_flag(SDFInstance::FLAG_RECEIVE_SHADOW));
        assert!(!inst.has_flag(SDFInstance::FLAG_OUTLINE));
        assert_eq!(inst.opacity, 0.4);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn single_sided_rings_are_culled_from_behind() {
        let mut scene = Scene::new();
        // Local +Z turned away from the camera.
        scene.spawn(
            Entity::new(EntityId(1))
                .with_rotation(glam::Quat::from_rotation_x(std::f32::consts::PI))
                .with_mesh(MeshComponent::ring(20.0, 30.0, 32, Material::default())),
        );
        let mut vectors = VectorState::new();
        build_vector_geometry(&scene, &camera(), &mut vectors);
        assert_eq!(vectors.vertex_count(), 0);

        scene.get_mut(EntityId(1)).unwrap().mesh.as_mut().unwrap().material.double_sided = true;
        build_vector_geometry(&scene, &camera(), &mut vectors);
        assert!(vectors.vertex_count() > 0);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn loops_crossing_near_plane_are_skipped() {
        let mut scene = Scene::new();
        let points = vec![Vec3::new(-10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 200.0)];
        scene.spawn(Entity::new(EntityId(1)).with_mesh(MeshComponent::line_loop(points, Material::default())));
        let mut vectors = VectorState::new();
        build_vector_geometry(&scene, &camera(), &mut vectors);
        assert_eq!(vectors.vertex_count(), 0);
    }
}
