//! Unit meshes the cake is assembled from. Every part is one of these,
//! scaled and placed by its descriptor.

use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    Cylinder,
    Sphere,
    Cube,
}

impl MeshKind {
    pub const ALL: [MeshKind; 3] = [MeshKind::Cylinder, MeshKind::Sphere, MeshKind::Cube];

    /// Triangle-list vertices for this unit mesh.
    pub fn build(self) -> Vec<Vertex> {
        match self {
            MeshKind::Cylinder => unit_cylinder(CYLINDER_SEGMENTS),
            MeshKind::Sphere => unit_sphere(SPHERE_RINGS, SPHERE_SECTORS),
            MeshKind::Cube => unit_cube(),
        }
    }
}

pub const CYLINDER_SEGMENTS: u32 = 32;
pub const SPHERE_RINGS: u32 = 10;
pub const SPHERE_SECTORS: u32 = 16;

#[inline]
fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

/// Radius 1, height 1, centered on the origin, axis along +Y.
pub fn unit_cylinder(segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut out = Vec::with_capacity(segments as usize * 12);
    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * TAU;
        let a1 = (i + 1) as f32 / segments as f32 * TAU;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        let (b0, t0) = ([c0, -0.5, s0], [c0, 0.5, s0]);
        let (b1, t1) = ([c1, -0.5, s1], [c1, 0.5, s1]);
        let n0 = [c0, 0.0, s0];
        let n1 = [c1, 0.0, s1];
        // side
        out.extend_from_slice(&[v(b0, n0), v(t0, n0), v(t1, n1)]);
        out.extend_from_slice(&[v(b0, n0), v(t1, n1), v(b1, n1)]);
        // caps
        let up = [0.0, 1.0, 0.0];
        let down = [0.0, -1.0, 0.0];
        out.extend_from_slice(&[v([0.0, 0.5, 0.0], up), v(t1, up), v(t0, up)]);
        out.extend_from_slice(&[v([0.0, -0.5, 0.0], down), v(b0, down), v(b1, down)]);
    }
    out
}

/// Radius 1 UV sphere.
pub fn unit_sphere(rings: u32, sectors: u32) -> Vec<Vertex> {
    let rings = rings.max(2);
    let sectors = sectors.max(3);
    let point = |r: u32, s: u32| {
        let theta = r as f32 / rings as f32 * PI;
        let phi = s as f32 / sectors as f32 * TAU;
        let p = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
        v(p, p)
    };
    let mut out = Vec::with_capacity((rings * sectors * 6) as usize);
    for r in 0..rings {
        for s in 0..sectors {
            let a = point(r, s);
            let b = point(r + 1, s);
            let c = point(r + 1, s + 1);
            let d = point(r, s + 1);
            out.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    out
}

/// Side 1 cube centered on the origin.
pub fn unit_cube() -> Vec<Vertex> {
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // normal, u axis, v axis
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let mut out = Vec::with_capacity(36);
    for (n, u, w) in FACES {
        let corner = |su: f32, sv: f32| {
            let p = [
                0.5 * n[0] + su * 0.5 * u[0] + sv * 0.5 * w[0],
                0.5 * n[1] + su * 0.5 * u[1] + sv * 0.5 * w[1],
                0.5 * n[2] + su * 0.5 * u[2] + sv * 0.5 * w[2],
            ];
            v(p, n)
        };
        let (a, b, c, d) = (
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        );
        out.extend_from_slice(&[a, b, c, a, c, d]);
    }
    out
}
