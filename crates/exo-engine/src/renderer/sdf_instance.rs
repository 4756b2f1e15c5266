use bytemuck::{Pod, Zeroable};

/// Per-instance sphere data for the raymarched SDF pipeline.
/// Written to shared memory for the browser renderer.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SDFInstance {
    /// Screen position, pixels.
    pub x: f32,
    pub y: f32,
    /// Screen radius, pixels.
    pub radius: f32,
    /// Spin about the view axis, radians.
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub shininess: f32,
    /// Emissive intensity (values > 1 feed the bloom pass).
    pub emissive: f32,
    pub opacity: f32,
    /// Bit set of `SDFInstance::FLAG_*` values, stored as a float (exact below 2^24).
    pub flags: f32,
    /// Distance from the camera, for depth testing.
    pub depth: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Highlighted by the outline pass.
    pub const FLAG_OUTLINE: u32 = 1;
    /// Writes depth; cleared for translucent shells.
    pub const FLAG_DEPTH_WRITE: u32 = 1 << 1;
    pub const FLAG_DOUBLE_SIDED: u32 = 1 << 2;
    pub const FLAG_CAST_SHADOW: u32 = 1 << 3;
    pub const FLAG_RECEIVE_SHADOW: u32 = 1 << 4;

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Buffer of SDF instances, rebuilt every frame.
pub struct SDFBuffer {
    instances: Vec<SDFInstance>,
}

impl SDFBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: SDFInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[SDFInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for SDFBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdf_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<SDFInstance>(), 48);
        assert_eq!(SDFInstance::STRIDE_BYTES, 48);
    }

    #[test]
    fn flags_round_trip_through_float() {
        let all = SDFInstance::FLAG_OUTLINE
            | SDFInstance::FLAG_DEPTH_WRITE
            | SDFInstance::FLAG_DOUBLE_SIDED
            | SDFInstance::FLAG_CAST_SHADOW
            | SDFInstance::FLAG_RECEIVE_SHADOW;
        let inst = SDFInstance { flags: all as f32, ..Default::default() };
        assert!(inst.has_flag(SDFInstance::FLAG_RECEIVE_SHADOW));
        assert!(inst.has_flag(SDFInstance::FLAG_OUTLINE));
        let plain = SDFInstance { flags: SDFInstance::FLAG_DEPTH_WRITE as f32, ..Default::default() };
        assert!(!plain.has_flag(SDFInstance::FLAG_OUTLINE));
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buf = SDFBuffer::new();
        buf.push(SDFInstance::default());
        buf.push(SDFInstance { flags: SDFInstance::FLAG_OUTLINE as f32, ..Default::default() });
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
