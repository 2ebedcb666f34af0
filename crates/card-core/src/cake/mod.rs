//! The 3D cake: static descriptor tables, a generic builder that turns them
//! into placed parts, and the animated scene the renderer draws.

pub mod descriptors;
pub mod mesh;
pub mod scene;

pub use descriptors::{Material, Role};
pub use mesh::{MeshKind, Vertex};
pub use scene::{CakeScene, Instance, SmokePuff};

use crate::color::Rgba;
use descriptors::*;
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::TAU;

/// A descriptor resolved into a transform. `local` maps the unit mesh into
/// cake-group space.
#[derive(Clone, Debug)]
pub struct CakePart {
    pub kind: MeshKind,
    pub local: Mat4,
    pub color: Rgba,
    pub material: Material,
    pub role: Role,
    /// Ring index for decorations, used to phase their bobbing.
    pub index: usize,
}

impl CakePart {
    fn from_desc(d: &PartDesc) -> Self {
        Self {
            kind: d.kind,
            local: placement(d.size, d.position, d.rotation_z),
            color: Rgba::from_u32(d.color),
            material: d.material,
            role: d.role,
            index: 0,
        }
    }
}

fn placement(size: [f32; 3], position: [f32; 3], rotation_z: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::from(size),
        Quat::from_rotation_z(rotation_z),
        Vec3::from(position),
    )
}

/// Assemble the whole cake from the descriptor tables.
pub fn build_cake() -> Vec<CakePart> {
    let mut parts = Vec::with_capacity(64);
    parts.push(CakePart::from_desc(&PLATE));

    for layer in &LAYERS {
        parts.push(CakePart::from_desc(&PartDesc {
            kind: MeshKind::Cylinder,
            size: [layer.radius, layer.height, layer.radius],
            position: [0.0, layer.y, 0.0],
            rotation_z: 0.0,
            color: layer.color,
            material: Material::Phong {
                shininess: LAYER_SHININESS,
            },
            role: Role::Layer,
        }));
        let r = layer.radius + CREAM_OVERHANG;
        parts.push(CakePart::from_desc(&PartDesc {
            kind: MeshKind::Cylinder,
            size: [r, CREAM_HEIGHT, r],
            position: [0.0, layer.y + layer.height / 2.0 + CREAM_HEIGHT / 2.0, 0.0],
            rotation_z: 0.0,
            color: CREAM_COLOR,
            material: Material::Phong {
                shininess: CREAM_SHININESS,
            },
            role: Role::Cream,
        }));
    }

    let group = Mat4::from_scale_rotation_translation(
        Vec3::splat(LETTERING_SCALE),
        Quat::IDENTITY,
        Vec3::from(LETTERING_OFFSET),
    );
    for b in &LETTERING {
        let local = group * placement(b.size, [b.position[0], b.position[1], 0.0], b.rotation_z);
        parts.push(CakePart {
            kind: MeshKind::Cube,
            local,
            color: Rgba::from_u32(LETTERING_COLOR),
            material: Material::Phong {
                shininess: LETTERING_SHININESS,
            },
            role: Role::Lettering,
            index: 0,
        });
    }

    parts.push(CakePart::from_desc(&CANDLE));
    parts.push(CakePart::from_desc(&FLAME));

    for i in 0..DECOR_COUNT {
        let (s, c) = (i as f32 / DECOR_COUNT as f32 * TAU).sin_cos();
        let mut part = CakePart::from_desc(&PartDesc {
            kind: MeshKind::Sphere,
            size: [DECOR_RADIUS; 3],
            position: [c * DECOR_RING_RADIUS, DECOR_BASE_Y, s * DECOR_RING_RADIUS],
            rotation_z: 0.0,
            color: DECOR_COLORS[i % DECOR_COLORS.len()],
            material: Material::Phong { shininess: 30.0 },
            role: Role::Decoration,
        });
        part.index = i;
        parts.push(part);
    }
    parts
}
