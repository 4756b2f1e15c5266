//! Point and ambient lighting for the 3D scene.
//!
//! Lights are persistent: they stay until explicitly removed. Each frame the
//! runner serializes them for the renderer's lighting pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Color;

/// A point light with position, color, intensity and falloff.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, color_hex, intensity, distance, decay, cast_shadow]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Packed `0xRRGGBB`, stored as a float (exact below 2^24).
    pub color: f32,
    pub intensity: f32,
    /// Range in world units; 0 means unlimited.
    pub distance: f32,
    /// Physical falloff exponent.
    pub decay: f32,
    /// 1.0 when the light renders a shadow map.
    pub cast_shadow: f32,
}

impl PointLight {
    pub fn new(pos: Vec3, color_hex: u32, intensity: f32, distance: f32, decay: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            color: (color_hex & 0xFF_FFFF) as f32,
            intensity,
            distance,
            decay,
            cast_shadow: 0.0,
        }
    }

    pub fn with_shadows(mut self) -> Self {
        self.cast_shadow = 1.0;
        self
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn color(&self) -> Color {
        Color::from_hex(self.color as u32)
    }
}

/// Shadow map parameters for the single shadow-casting light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    pub map_size: u32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 512,
            near: 0.5,
            far: 500.0,
        }
    }
}

/// Active lights, ambient term and shadow settings.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
    ambient_intensity: f32,
    pub shadow: ShadowConfig,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::with_capacity(4),
            ambient: Color::WHITE,
            ambient_intensity: 1.0,
            shadow: ShadowConfig::default(),
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    /// Ambient color premultiplied by its intensity.
    pub fn ambient(&self) -> [f32; 3] {
        let c = self.ambient;
        [
            c.r * self.ambient_intensity,
            c.g * self.ambient_intensity,
            c.b * self.ambient_intensity,
        ]
    }

    /// Pointer to the lights data for shared-memory reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::LIGHT_FLOATS;

    #[test]
    fn point_light_packs_color() {
        let light = PointLight::new(Vec3::ZERO, 0xFDFFD3, 1200.0, 400.0, 1.4).with_shadows();
        assert_eq!(light.color as u32, 0xFDFFD3);
        assert_eq!(light.cast_shadow, 1.0);
        let c = light.color();
        assert!((c.r - 253.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn ambient_is_premultiplied() {
        let mut state = LightState::new();
        state.set_ambient(Color::from_hex(0x222222), 6.0);
        let a = state.ambient();
        assert!((a[0] - 0x22 as f32 / 255.0 * 6.0).abs() < 1e-5);
    }

    #[test]
    fn add_counts_lights() {
        let mut state = LightState::new();
        assert_eq!(state.count(), 0);
        state.add(PointLight::new(Vec3::ZERO, 0xFFFFFF, 1.0, 0.0, 2.0));
        assert_eq!(state.count(), 1);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
    }
}
