//! Orbit controls: drag to rotate the camera around a focus point, wheel to dolly.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};
use crate::renderer::camera::PerspectiveCamera;

/// Keeps the polar angle away from the poles.
const POLAR_EPSILON: f32 = 1e-6;

/// Spherical coordinates around the Y axis: `theta` is the azimuth from +Z,
/// `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius < 1e-9 {
            return Self { radius: 0.0, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Focus point the camera orbits and faces.
    pub target: Vec3,
    pub enable_damping: bool,
    /// Fraction of pending rotation applied (and removed) per update when damping.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    drag_from: Option<Vec2>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            drag_from: None,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = factor.clamp(0.0, 1.0);
        self
    }

    pub fn begin_drag(&mut self, pos: Vec2) {
        self.drag_from = Some(pos);
    }

    /// Accumulate rotation from a pointer move. `viewport_height` normalizes the drag.
    pub fn drag_to(&mut self, pos: Vec2, viewport_height: f32) {
        let Some(from) = self.drag_from else {
            return;
        };
        let delta = pos - from;
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * delta.x / h * self.rotate_speed;
        self.delta_phi -= TAU * delta.y / h * self.rotate_speed;
        self.drag_from = Some(pos);
    }

    pub fn end_drag(&mut self) {
        self.drag_from = None;
    }

    /// Wheel input: positive `delta_y` moves away from the target.
    pub fn dolly(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if delta_y > 0.0 {
            self.scale /= step;
        } else if delta_y < 0.0 {
            self.scale *= step;
        }
    }

    /// Apply pending input to the camera and orient it toward the target.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let mut s = Spherical::from_offset(camera.position - self.target);

        let gain = if self.enable_damping { self.damping_factor } else { 1.0 };
        s.theta += self.delta_theta * gain;
        s.phi = (s.phi + self.delta_phi * gain).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        s.radius = (s.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + s.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
    }
}
