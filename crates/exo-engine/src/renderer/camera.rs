use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Drawable surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Convert a pointer position (pixels, Y-down) to normalized device coordinates (Y-up).
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new((x / self.width) * 2.0 - 1.0, -(y / self.height) * 2.0 + 1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Projection of a world point onto the viewport.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Screen position in pixels, Y-down.
    pub pos: Vec2,
    /// Distance in front of the camera along the view axis.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

/// Perspective camera looking from `position` toward `look`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Point the camera is oriented toward.
    pub look: Vec3,
    pub up: Vec3,
    /// Vertical field of view, degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    viewport: Viewport,
}

impl PerspectiveCamera {
    pub fn new(fov_y: f32, viewport: Viewport, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            look: Vec3::ZERO,
            up: Vec3::Y,
            fov_y,
            near,
            far,
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    /// Resize the viewport, which also updates the projection aspect ratio.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn look_at(&mut self, point: Vec3) {
        self.look = point;
    }

    /// Unit vector from the camera toward its look point.
    pub fn forward(&self) -> Vec3 {
        (self.look - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let look = if self.look.distance_squared(self.position) < 1e-12 {
            self.position + Vec3::NEG_Z
        } else {
            self.look
        };
        Mat4::look_at_rh(self.position, look, self.up)
    }

    /// Right-handed perspective projection, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }

    /// Project a world point. `None` when the point is behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if depth < self.near {
            return None;
        }
        let clip = self.view_projection() * world.extend(1.0);
        let ndc = clip.xy() / clip.w;
        let pos = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.width,
            (1.0 - ndc.y) * 0.5 * self.viewport.height,
        );
        let focal = self.viewport.height / (2.0 * (self.fov_y.to_radians() / 2.0).tan());
        Some(Projection { pos, depth, scale: focal / depth })
    }

    /// World-space ray from the camera through a point given in NDC.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray {
            origin: self.position,
            dir: (far - self.position).normalize_or(self.forward()),
        }
    }

    /// World-space ray through a pointer position in pixels.
    pub fn ray_from_screen(&self, x: f32, y: f32) -> Ray {
        self.ray_from_ndc(self.viewport.to_ndc(x, y))
    }

    /// Move the camera a fraction of the way toward `target`.
    pub fn lerp_toward(&mut self, target: Vec3, factor: f32) {
        self.position = self.position.lerp(target, factor);
    }
}
