//! CPU-side meshes and per-instance data for the WebGPU renderer.

use glam::{Mat4, Quat, Vec3};
use globe_core::{PinNode, PinTransform};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PinInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
}

/// UV sphere centred at the origin, counter-clockwise from outside.
///
/// Texture coordinates follow an equirectangular map laid out the same way
/// pins are anchored: `u = 0` at longitude -180, `u = 0.5` on the prime
/// meridian (+X), `v = 0` at the north pole. The seam sits at +/-180 so
/// `u` stays inside `0..=1` without wrapping.
pub fn build_sphere(radius: f32, segments: u32, rings: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);

    for ring in 0..=rings {
        let theta = ring as f32 / rings as f32 * std::f32::consts::PI;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for segment in 0..=segments {
            let s = segment as f32 / segments as f32;
            let phi = s * std::f32::consts::TAU - std::f32::consts::PI;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            vertices.push(MeshVertex {
                position: (normal * radius).to_array(),
                normal: normal.to_array(),
                uv: [1.0 - s, ring as f32 / rings as f32],
            });
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let i0 = ring * stride + segment;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }
    (vertices, indices)
}

/// Unit quad in the XY plane facing +Z, drawn as a triangle strip. The
/// image's top-left corner maps to the quad's upper left.
pub const QUAD_VERTICES: [MeshVertex; 4] = [
    MeshVertex {
        position: [-0.5, -0.5, 0.0],
        normal: [0.0, 0.0, 1.0],
        uv: [0.0, 1.0],
    },
    MeshVertex {
        position: [0.5, -0.5, 0.0],
        normal: [0.0, 0.0, 1.0],
        uv: [1.0, 1.0],
    },
    MeshVertex {
        position: [-0.5, 0.5, 0.0],
        normal: [0.0, 0.0, 1.0],
        uv: [0.0, 0.0],
    },
    MeshVertex {
        position: [0.5, 0.5, 0.0],
        normal: [0.0, 0.0, 1.0],
        uv: [1.0, 0.0],
    },
];

/// World matrix of a pin quad: sphere rotation, then the pin's
/// sphere-local placement, then its size.
pub fn pin_model(sphere_orientation: Quat, transform: &PinTransform, width: f32, height: f32) -> Mat4 {
    let local = Mat4::from_scale_rotation_translation(
        Vec3::new(width * transform.scale, height * transform.scale, 1.0),
        transform.orientation,
        transform.position,
    );
    Mat4::from_quat(sphere_orientation) * local
}

/// One instance per pin; `color_of` picks the material tint, which is white
/// once the pin's image is on the GPU.
pub fn pin_instances(
    sphere_orientation: Quat,
    pins: &[PinNode],
    color_of: impl Fn(&PinNode) -> [f32; 3],
) -> Vec<PinInstance> {
    pins.iter()
        .map(|node| {
            let color = color_of(node);
            PinInstance {
                model: pin_model(
                    sphere_orientation,
                    &node.transform,
                    node.visual.size.width,
                    node.visual.size.height,
                )
                .to_cols_array_2d(),
                color: [color[0], color[1], color[2], 1.0],
            }
        })
        .collect()
}

pub fn star_vertices(stars: &[Vec3]) -> Vec<StarVertex> {
    stars
        .iter()
        .map(|s| StarVertex {
            position: s.to_array(),
        })
        .collect()
}
