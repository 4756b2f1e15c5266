use glam::Vec3;
use crate::renderer::sdf_instance::SDFInstance;

/// Linear RGB color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Geometry primitive, in entity-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Sphere centered on the entity origin.
    Sphere { radius: f32 },
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32, segments: u32 },
    /// Closed polyline through local points.
    LineLoop { points: Vec<Vec3> },
}

/// Surface properties shared by every shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    /// HDR glow multiplier applied to `emissive` (0 = unlit by itself).
    pub emissive_intensity: f32,
    /// 1.0 = opaque.
    pub opacity: f32,
    /// Phong specular exponent.
    pub shininess: f32,
    pub depth_write: bool,
    pub double_sided: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::default(),
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            opacity: 1.0,
            shininess: 32.0,
            depth_write: true,
            double_sided: false,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self { color, ..Default::default() }
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn without_depth_write(mut self) -> Self {
        self.depth_write = false;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    /// Material bits of `SDFInstance::flags`.
    pub fn sdf_flags(&self) -> u32 {
        let mut flags = 0;
        if self.depth_write {
            flags |= SDFInstance::FLAG_DEPTH_WRITE;
        }
        if self.double_sided {
            flags |= SDFInstance::FLAG_DOUBLE_SIDED;
        }
        if self.cast_shadow {
            flags |= SDFInstance::FLAG_CAST_SHADOW;
        }
        if self.receive_shadow {
            flags |= SDFInstance::FLAG_RECEIVE_SHADOW;
        }
        flags
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Drawable mesh attached to an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn sphere(radius: f32, material: Material) -> Self {
        Self::new(Shape::Sphere { radius }, material)
    }

    pub fn ring(inner: f32, outer: f32, segments: u32, material: Material) -> Self {
        Self::new(Shape::Ring { inner, outer, segments }, material)
    }

    pub fn line_loop(points: Vec<Vec3>, material: Material) -> Self {
        Self::new(Shape::LineLoop { points }, material)
    }

    /// Radius of the bounding sphere used for picking, if the shape is pickable.
    pub fn pick_radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Sphere { radius } => Some(radius),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_unpacks_channels() {
        let c = Color::from_hex(0xFF6666);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.4).abs() < 1e-6);
        assert!((c.b - 0.4).abs() < 1e-6);
    }

    #[test]
    fn opacity_is_clamped() {
        let m = Material::default().with_opacity(3.0);
        assert_eq!(m.opacity, 1.0);
        assert!(!m.is_transparent());
        assert!(Material::default().with_opacity(0.03).is_transparent());
    }

    #[test]
    fn material_flags_follow_builders() {
        let shell = Material::default().without_depth_write().with_shadows(true, true);
        let flags = shell.sdf_flags();
        assert_eq!(flags & SDFInstance::FLAG_DEPTH_WRITE, 0);
        assert_ne!(flags & SDFInstance::FLAG_CAST_SHADOW, 0);
        assert_ne!(flags & SDFInstance::FLAG_RECEIVE_SHADOW, 0);
        assert_eq!(Material::default().sdf_flags(), SDFInstance::FLAG_DEPTH_WRITE);
        assert_ne!(Material::default().double_sided().sdf_flags() & SDFInstance::FLAG_DOUBLE_SIDED, 0);
    }

    #[test]
    fn only_spheres_are_pickable() {
        assert_eq!(MeshComponent::sphere(2.0, Material::default()).pick_radius(), Some(2.0));
        assert_eq!(MeshComponent::ring(1.0, 2.0, 8, Material::default()).pick_radius(), None);
    }
}
