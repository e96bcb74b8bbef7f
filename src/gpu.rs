//! Plain-data buffer records shared with the ray-marching shaders.
//!
//! Every record is `#[repr(C)]` and [`Pod`], so a slice of them can be handed
//! to a graphics API with `bytemuck::cast_slice` without copying.

use bytemuck::{Pod, Zeroable};

use crate::body::RigidBody;

/// Default ray-march iteration count stored in [`GpuBodyRecord::extra`].
pub const DEFAULT_SHADER_MAX_ITERATIONS: f32 = 20.0;

/// Per-body render state.
///
/// # Memory Layout
///
/// Total size: 32 bytes
/// - position_radius: 16 bytes (xyz position, w radius)
/// - orientation: 16 bytes (w, x, y, z)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuBody {
    pub position_radius: [f32; 4],
    /// Orientation quaternion, scalar first.
    pub orientation: [f32; 4],
}

impl GpuBody {
    pub fn from_body(body: &RigidBody) -> Self {
        let p = body.position;
        let q = body.orientation.quaternion();
        Self {
            position_radius: [p.x, p.y, p.z, body.radius()],
            orientation: [q.w, q.i, q.j, q.k],
        }
    }
}

/// Pack both bodies into the 16-float layout the renderer expects.
pub fn pack_bodies(bodies: &[RigidBody; 2]) -> [GpuBody; 2] {
    [GpuBody::from_body(&bodies[0]), GpuBody::from_body(&bodies[1])]
}

/// View packed bodies as a flat float slice.
#[inline]
pub fn as_floats(bodies: &[GpuBody]) -> &[f32] {
    bytemuck::cast_slice(bodies)
}

/// Camera uniform.
///
/// # Memory Layout
///
/// Total size: 64 bytes. Each vector is 12 bytes followed by 4 bytes of
/// padding so every member starts on a 16-byte boundary.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuCamera {
    pub position: [f32; 3],
    _pad0: f32,
    pub forward: [f32; 3],
    _pad1: f32,
    pub up: [f32; 3],
    _pad2: f32,
    pub right: [f32; 3],
    _pad3: f32,
}

impl GpuCamera {
    pub const fn new(position: [f32; 3], forward: [f32; 3], up: [f32; 3], right: [f32; 3]) -> Self {
        Self {
            position,
            _pad0: 0.0,
            forward,
            _pad1: 0.0,
            up,
            _pad2: 0.0,
            right,
            _pad3: 0.0,
        }
    }
}

/// Full body record for shaders that run the physics step on the GPU
/// (std430).
///
/// # Memory Layout
///
/// Total size: 80 bytes
/// - pos: xyz position, w mass
/// - vel: xyz velocity
/// - ang_vel: xyz angular velocity
/// - orient: quaternion as (x, y, z, w)
/// - extra: x holds the ray-march iteration limit
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuBodyRecord {
    pub pos: [f32; 4],
    pub vel: [f32; 4],
    pub ang_vel: [f32; 4],
    pub orient: [f32; 4],
    pub extra: [f32; 4],
}

impl GpuBodyRecord {
    pub fn from_body(body: &RigidBody, max_iterations: f32) -> Self {
        let p = body.position;
        let v = body.velocity;
        let w = body.angular_velocity;
        let q = body.orientation.quaternion();
        Self {
            pos: [p.x, p.y, p.z, body.mass()],
            vel: [v.x, v.y, v.z, 0.0],
            ang_vel: [w.x, w.y, w.z, 0.0],
            orient: [q.i, q.j, q.k, q.w],
            extra: [max_iterations, 0.0, 0.0, 0.0],
        }
    }
}
