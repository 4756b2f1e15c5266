//! One-time construction of the star system scene.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use exo_engine::*;
use glam::{EulerRot, Quat, Vec3};

use crate::derive::{DerivedVisualParams, PLANET_TINT_INTENSITY};

// ── Lighting ─────────────────────────────────────────────────────────

const AMBIENT_HEX: u32 = 0x222222;
const AMBIENT_INTENSITY: f32 = 6.0;
const STAR_LIGHT_HEX: u32 = 0xFDFFD3;
const STAR_LIGHT_INTENSITY: f32 = 1200.0;
const STAR_LIGHT_DISTANCE: f32 = 400.0;
const STAR_LIGHT_DECAY: f32 = 1.4;
const SHADOW_MAP_SIZE: u32 = 1024;
const SHADOW_NEAR: f32 = 10.0;
const SHADOW_FAR: f32 = 20.0;

// ── Planet ───────────────────────────────────────────────────────────

/// Axial tilt, degrees.
const PLANET_TILT_DEG: f32 = 23.0;
const ATMOSPHERE_MARGIN: f32 = 0.1;
const ATMOSPHERE_OPACITY: f32 = 0.4;
const ATMOSPHERE_TILT: f32 = 0.41;
const RING_SEGMENTS: u32 = 30;

// ── Orbit path and habitable zone ───────────────────────────────────

pub const ORBIT_SAMPLES: usize = 100;
const ORBIT_OPACITY: f32 = 0.03;
const HZ_HEX: u32 = 0x00FF00;
const HZ_OPACITY: f32 = 0.2;
const HZ_SEGMENTS: u32 = 64;

/// Camera standoff when approaching a selected planet.
pub const PLANET_STANDOFF: f32 = 25.0;

/// Logical planet, shared by every mesh that belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanetId(pub u32);

/// Interactive mesh to its owning planet.
pub type PickMap = HashMap<EntityId, PlanetId>;

/// Ring radii as multiples of the planet radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub inner: f32,
    pub outer: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemOptions {
    pub atmosphere: bool,
    pub ring: Option<RingSpec>,
}

impl Default for SystemOptions {
    fn default() -> Self {
        Self { atmosphere: true, ring: None }
    }
}

#[derive(Debug, Clone)]
pub struct PlanetHandles {
    pub id: PlanetId,
    /// Revolves around the star; parent of the body, orbit path and ring.
    pub pivot: EntityId,
    pub body: EntityId,
    pub atmosphere: Option<EntityId>,
    pub ring: Option<EntityId>,
    pub orbit: EntityId,
}

#[derive(Debug, Clone)]
pub struct SystemHandles {
    pub star: EntityId,
    pub planet: PlanetHandles,
    pub habitable_zone: EntityId,
}

/// Closed loop of `samples` points at equal angular steps, in the local XY plane.
pub fn orbit_points(radius: f32, samples: usize) -> Vec<Vec3> {
    (0..samples)
        .map(|i| {
            let a = i as f32 / samples as f32 * TAU;
            Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect()
}

/// Spawn the star, its light, the planet and the habitable zone.
pub fn build_system(
    ctx: &mut EngineContext,
    params: &DerivedVisualParams,
    options: &SystemOptions,
    star_brightness: f32,
) -> (SystemHandles, PickMap) {
    ctx.lights.set_ambient(Color::from_hex(AMBIENT_HEX), AMBIENT_INTENSITY);
    ctx.lights.add(
        PointLight::new(Vec3::ZERO, STAR_LIGHT_HEX, STAR_LIGHT_INTENSITY, STAR_LIGHT_DISTANCE, STAR_LIGHT_DECAY)
            .with_shadows(),
    );
    ctx.lights.shadow = ShadowConfig { map_size: SHADOW_MAP_SIZE, near: SHADOW_NEAR, far: SHADOW_FAR };

    // Star
    let star_color = params.star_color.color();
    let star = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(star)
            .with_tag("star")
            .with_mesh(MeshComponent::sphere(
                params.star_radius as f32,
                Material::new(star_color).with_emissive(star_color, star_brightness),
            )),
    );

    // Planet system
    let orbit_radius = params.orbit_radius as f32;
    let planet_radius = params.planet_radius as f32;
    let tilt = PLANET_TILT_DEG.to_radians();
    let tint = params.planet_tint.color();

    let pivot = ctx.next_id();
    ctx.scene.spawn(Entity::new(pivot).with_tag("planet-pivot"));

    let body = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(body)
            .with_tag("planet")
            .with_parent(pivot)
            .with_translation(Vec3::new(orbit_radius, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_z(tilt))
            .with_mesh(MeshComponent::sphere(
                planet_radius,
                Material::new(tint)
                    .with_emissive(tint, PLANET_TINT_INTENSITY)
                    .with_shadows(true, true),
            )),
    );

    let atmosphere = options.atmosphere.then(|| {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("atmosphere")
                .with_parent(body)
                .with_rotation(Quat::from_rotation_z(ATMOSPHERE_TILT))
                .with_mesh(MeshComponent::sphere(
                    planet_radius + ATMOSPHERE_MARGIN,
                    Material::new(Color::WHITE)
                        .with_opacity(ATMOSPHERE_OPACITY)
                        .without_depth_write()
                        .with_shadows(true, true),
                )),
        );
        id
    });

    let ring = options.ring.map(|spec| {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("ring")
                .with_parent(pivot)
                .with_translation(Vec3::new(orbit_radius, 0.0, 0.0))
                .with_rotation(Quat::from_euler(EulerRot::XYZ, -FRAC_PI_2, -tilt, 0.0))
                .with_mesh(MeshComponent::ring(
                    spec.inner * planet_radius,
                    spec.outer * planet_radius,
                    RING_SEGMENTS,
                    Material::new(tint).double_sided(),
                )),
        );
        id
    });

    let orbit = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(orbit)
            .with_tag("orbit")
            .with_parent(pivot)
            .with_rotation(Quat::from_rotation_x(FRAC_PI_2))
            .with_mesh(MeshComponent::line_loop(
                orbit_points(orbit_radius, ORBIT_SAMPLES),
                Material::new(Color::WHITE).with_opacity(ORBIT_OPACITY),
            )),
    );

    // Habitable zone
    let habitable_zone = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(habitable_zone)
            .with_tag("habitable-zone")
            .with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
            .with_mesh(MeshComponent::ring(
                params.hz_inner_radius as f32,
                params.hz_outer_radius as f32,
                HZ_SEGMENTS,
                Material::new(Color::from_hex(HZ_HEX)).with_opacity(HZ_OPACITY).double_sided(),
            )),
    );

    let id = PlanetId(1);
    let mut pick = PickMap::new();
    pick.insert(body, id);
    if let Some(a) = atmosphere {
        pick.insert(a, id);
    }

    log::info!(
        "built system: star r={:.2}, planet r={:.2} at {:.1}, hz {:.1}..{:.1}",
        params.star_radius,
        params.planet_radius,
        params.orbit_radius,
        params.hz_inner_radius,
        params.hz_outer_radius
    );

    let handles = SystemHandles {
        star,
        planet: PlanetHandles { id, pivot, body, atmosphere, ring, orbit },
        habitable_zone,
    };
    (handles, pick)
}
