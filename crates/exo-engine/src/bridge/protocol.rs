//! Render buffer layout shared with the browser renderer.
//! Must stay in sync with the renderer's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 20 floats]
//! [SDF instances: max_sdf_instances × 12 floats]
//! [Vector vertices: max_vector_vertices × 6 floats]
//! [Lights: max_lights × 8 floats]
//! [Camera: 20 floats]
//! ```
//!
//! Capacities are written once into the header at init.
//! The renderer reads them from the header to compute offsets dynamically.

use crate::api::viewer::ViewerConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 20;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_SDF_INSTANCES: usize = 3;
pub const HEADER_SDF_INSTANCE_COUNT: usize = 4;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 5;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 6;
pub const HEADER_MAX_LIGHTS: usize = 7;
pub const HEADER_LIGHT_COUNT: usize = 8;
pub const HEADER_VIEWPORT_WIDTH: usize = 9;
pub const HEADER_VIEWPORT_HEIGHT: usize = 10;
pub const HEADER_AMBIENT_R: usize = 11;
pub const HEADER_AMBIENT_G: usize = 12;
pub const HEADER_AMBIENT_B: usize = 13;
pub const HEADER_SHADOW_MAP_SIZE: usize = 14;
pub const HEADER_SHADOW_NEAR: usize = 15;
pub const HEADER_SHADOW_FAR: usize = 16;
// 17..20 reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per SDF instance: x, y, radius, rotation, r, g, b, shininess, emissive, opacity, flags, depth.
/// `flags` packs outline, depth write, sidedness and shadow bits.
pub const SDF_INSTANCE_FLOATS: usize = 12;

/// Floats per vector vertex: x, y, r, g, b, a.
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per point light: x, y, z, color, intensity, distance, decay, cast_shadow.
pub const LIGHT_FLOATS: usize = 8;

/// Floats in the camera section: view-projection matrix (column-major) and position.
pub const CAMERA_FLOATS: usize = 20;

pub const DEFAULT_MAX_LIGHTS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_sdf_instances: usize,
    pub max_vector_vertices: usize,
    pub max_lights: usize,

    pub sdf_data_floats: usize,
    pub vector_data_floats: usize,
    pub light_data_floats: usize,

    /// Offset (in floats) where SDF data begins.
    pub sdf_data_offset: usize,
    /// Offset (in floats) where vector data begins.
    pub vector_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where camera data begins.
    pub camera_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_sdf_instances: usize, max_vector_vertices: usize, max_lights: usize) -> Self {
        let sdf_data_floats = max_sdf_instances * SDF_INSTANCE_FLOATS;
        let vector_data_floats = max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;

        let sdf_data_offset = HEADER_FLOATS;
        let vector_data_offset = sdf_data_offset + sdf_data_floats;
        let light_data_offset = vector_data_offset + vector_data_floats;
        let camera_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = camera_data_offset + CAMERA_FLOATS;

        Self {
            max_sdf_instances,
            max_vector_vertices,
            max_lights,
            sdf_data_floats,
            vector_data_floats,
            light_data_floats,
            sdf_data_offset,
            vector_data_offset,
            light_data_offset,
            camera_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.max_sdf_instances, config.max_vector_vertices, config.max_lights)
    }

    /// Header with the capacity fields filled in and all counts zeroed.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_SDF_INSTANCES] = self.max_sdf_instances as f32;
        header[HEADER_MAX_VECTOR_VERTICES] = self.max_vector_vertices as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraUniform;
    use crate::renderer::sdf_instance::SDFInstance;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&ViewerConfig::default());
        assert_eq!(layout.max_sdf_instances, 128);
        assert_eq!(layout.max_vector_vertices, 16384);
        assert_eq!(layout.max_lights, DEFAULT_MAX_LIGHTS);
        assert_eq!(layout.sdf_data_floats, 128 * 12);
        assert_eq!(layout.vector_data_floats, 16384 * 6);
        assert_eq!(layout.light_data_floats, 4 * 8);
        assert_eq!(
            layout.buffer_total_floats,
            HEADER_FLOATS + 128 * 12 + 16384 * 6 + 4 * 8 + CAMERA_FLOATS
        );
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 200, 2);
        assert_eq!(layout.sdf_data_offset, HEADER_FLOATS);
        assert_eq!(layout.vector_data_offset, layout.sdf_data_offset + layout.sdf_data_floats);
        assert_eq!(layout.light_data_offset, layout.vector_data_offset + layout.vector_data_floats);
        assert_eq!(layout.camera_data_offset, layout.light_data_offset + layout.light_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.camera_data_offset + CAMERA_FLOATS);
    }

    #[test]
    fn wire_sizes_match_structs() {
        assert_eq!(SDFInstance::FLOATS, SDF_INSTANCE_FLOATS);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CAMERA_FLOATS * 4);
    }

    #[test]
    fn header_carries_capacities() {
        let header = ProtocolLayout::new(8, 64, 1).header();
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_SDF_INSTANCES], 8.0);
        assert_eq!(header[HEADER_MAX_VECTOR_VERTICES], 64.0);
        assert_eq!(header[HEADER_MAX_LIGHTS], 1.0);
        assert_eq!(header[HEADER_SDF_INSTANCE_COUNT], 0.0);
    }
}
