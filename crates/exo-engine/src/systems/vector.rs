//! Lyon-based vector tessellation for projected scene geometry.
//!
//! Orbit paths, rings and other flat 3D shapes are projected to screen space
//! by the render system and tessellated here into a flat triangle list that
//! the browser renderer draws beneath the SDF pass.
//!
//! ```ignore
//! ctx.vectors.stroke_polygon(&orbit_points, 1.0, VectorColor::WHITE.with_alpha(0.03));
//! ctx.vectors.fill_annulus(&outer, &inner, VectorColor::GREEN.with_alpha(0.2));
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{FillRule, Path};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};
use crate::components::mesh::Color;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
}

impl From<Color> for VectorColor {
    fn from(c: Color) -> Self {
        Self::rgb(c.r, c.g, c.b)
    }
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex { x: p.x, y: p.y, r: self.color.r, g: self.color.g, b: self.color.b, a: self.color.a }
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex { x: p.x, y: p.y, r: self.color.r, g: self.color.g, b: self.color.b, a: self.color.a }
    }
}

/// Holds lyon tessellators and the output vertex buffer.
/// Cleared each frame and populated by drawing commands.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Geometry past `max_vertices` is dropped with a warning.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Raw pointer to the flat float buffer.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        let available = self.max_vertices.saturating_sub(self.vertex_count());
        if self.geometry.indices.len() > available {
            log::warn!(
                "vector buffer full: dropping {} vertices",
                self.geometry.indices.len()
            );
        } else {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn closed_path(points: &[Vec2]) -> Path {
        let mut builder = Path::builder();
        Self::add_loop(&mut builder, points);
        builder.build()
    }

    fn add_loop(builder: &mut lyon::path::path::Builder, points: &[Vec2]) {
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
    }

    /// Fill a closed polygon (convex or concave).
    pub fn fill_polygon(&mut self, points: &[Vec2], color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        let path = Self::closed_path(points);
        self.fill_path(&path, &FillOptions::tolerance(0.5), color);
    }

    /// Fill the region between an outer and an inner loop.
    /// The loops may wind either way; the hole is cut by the even-odd rule.
    pub fn fill_annulus(&mut self, outer: &[Vec2], inner: &[Vec2], color: VectorColor) {
        if outer.len() < 3 {
            return;
        }
        if inner.len() < 3 {
            self.fill_polygon(outer, color);
            return;
        }
        let mut builder = Path::builder();
        Self::add_loop(&mut builder, outer);
        Self::add_loop(&mut builder, inner);
        let path = builder.build();
        let options = FillOptions::tolerance(0.5).with_fill_rule(FillRule::EvenOdd);
        self.fill_path(&path, &options, color);
    }

    pub fn fill_path(&mut self, path: &Path, options: &FillOptions, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            options,
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(_) => self.flush_geometry(),
            Err(e) => {
                log::debug!("fill tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    /// Stroke an open polyline.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Stroke a closed polygon.
    pub fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        let path = Self::closed_path(points);
        self.stroke_path(&path, width, color);
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(_) => self.flush_geometry(),
            Err(e) => {
                log::debug!("stroke tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn circle(radius: f32, n: usize) -> Vec<Vec2> {
        (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * TAU;
                Vec2::new(radius * a.cos(), radius * a.sin())
            })
            .collect()
    }

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn fill_polygon_triangle() {
        let mut state = VectorState::new();
        let points = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(50.0, 100.0)];
        state.fill_polygon(&points, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 3);
    }

    #[test]
    fn annulus_leaves_hole() {
        let mut state = VectorState::new();
        state.fill_annulus(&circle(100.0, 64), &circle(60.0, 64), VectorColor::GREEN.with_alpha(0.2));
        let count = state.vertex_count();
        assert!(count > 0);
        assert_eq!(count % 3, 0);

        // No triangle may have its centroid inside the hole.
        for tri in state.as_slice().chunks(VectorVertex::FLOATS * 3) {
            let cx = (tri[0] + tri[6] + tri[12]) / 3.0;
            let cy = (tri[1] + tri[7] + tri[13]) / 3.0;
            assert!(Vec2::new(cx, cy).length() > 55.0);
        }
        assert_eq!(state.as_slice()[5], 0.2);
    }

    #[test]
    fn stroke_polygon_produces_vertices() {
        let mut state = VectorState::new();
        state.stroke_polygon(&circle(50.0, 100), 1.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut state = VectorState::with_capacity(3);
        let tri = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        state.fill_polygon(&tri, VectorColor::WHITE);
        state.fill_polygon(&tri, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 3);
    }

    #[test]
    fn degenerate_input_produces_nothing() {
        let mut state = VectorState::new();
        state.fill_polygon(&[Vec2::ZERO, Vec2::ONE], VectorColor::WHITE);
        state.stroke_polyline(&[Vec2::ZERO], 1.0, VectorColor::WHITE);
        state.fill_annulus(&[], &[], VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn clear_resets_buffer() {
        let mut state = VectorState::new();
        state.stroke_polyline(&[Vec2::ZERO, Vec2::new(10.0, 10.0)], 2.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
        state.clear();
        assert_eq!(state.vertex_count(), 0);
    }
}
