//! Static description of the cake. Sizes are in scene units, colors are
//! packed `0xRRGGBB`.

use super::mesh::MeshKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Lit with ambient + directional light and a specular highlight.
    Phong { shininess: f32 },
    /// Flat color, ignores lighting (flame, smoke).
    Basic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Plate,
    Layer,
    Cream,
    Lettering,
    Candle,
    Flame,
    Decoration,
}

/// One placed primitive before animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartDesc {
    pub kind: MeshKind,
    /// Scale applied to the unit mesh (cylinder: radius, height, radius).
    pub size: [f32; 3],
    pub position: [f32; 3],
    pub rotation_z: f32,
    pub color: u32,
    pub material: Material,
    pub role: Role,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerDesc {
    pub radius: f32,
    pub height: f32,
    pub color: u32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterBlock {
    pub size: [f32; 3],
    pub position: [f32; 2],
    pub rotation_z: f32,
}

pub const PLATE: PartDesc = PartDesc {
    kind: MeshKind::Cylinder,
    size: [4.8, 0.3, 4.8],
    position: [0.0, -1.8, 0.0],
    rotation_z: 0.0,
    color: 0xffffff,
    material: Material::Phong { shininess: 100.0 },
    role: Role::Plate,
};

/// Bottom to top: pink, blue, green.
pub const LAYERS: [LayerDesc; 3] = [
    LayerDesc { radius: 4.0, height: 1.6, color: 0xffb3e6, y: -1.3 },
    LayerDesc { radius: 3.2, height: 1.4, color: 0x81d4fa, y: 0.1 },
    LayerDesc { radius: 2.5, height: 1.2, color: 0xa5d6a7, y: 1.3 },
];
pub const LAYER_SHININESS: f32 = 50.0;

// White cream ring on top of each layer
pub const CREAM_OVERHANG: f32 = 0.08;
pub const CREAM_HEIGHT: f32 = 0.12;
pub const CREAM_COLOR: u32 = 0xffffff;
pub const CREAM_SHININESS: f32 = 100.0;

pub const CANDLE: PartDesc = PartDesc {
    kind: MeshKind::Cylinder,
    size: [0.12, 1.5, 0.12],
    position: [0.0, 2.45, 0.0],
    rotation_z: 0.0,
    color: 0xff6b9d,
    material: Material::Phong { shininess: 30.0 },
    role: Role::Candle,
};

pub const FLAME: PartDesc = PartDesc {
    kind: MeshKind::Sphere,
    size: [0.18, 0.18 * 1.5, 0.18],
    position: [0.0, 3.4, 0.0],
    rotation_z: 0.0,
    color: 0xffeb3b,
    material: Material::Basic,
    role: Role::Flame,
};

// Decorations: small spheres on a ring around the bottom layer
pub const DECOR_COUNT: usize = 16;
pub const DECOR_RING_RADIUS: f32 = 3.2;
pub const DECOR_RADIUS: f32 = 0.12;
pub const DECOR_BASE_Y: f32 = -0.6;
pub const DECOR_COLORS: [u32; 3] = [0xff69b4, 0xffd700, 0x00ff88];

// Block lettering on the middle layer
pub const LETTERING_COLOR: u32 = 0xffffff;
pub const LETTERING_SHININESS: f32 = 80.0;
pub const LETTERING_OFFSET: [f32; 3] = [0.0, 0.8, 3.25];
pub const LETTERING_SCALE: f32 = 0.3;

const STROKE: [f32; 3] = [0.08, 0.15, 0.05];
const BAR: [f32; 3] = [0.15, 0.05, 0.05];
const SHORT_BAR: [f32; 3] = [0.12, 0.05, 0.05];
const DIAGONAL: [f32; 3] = [0.05, 0.15, 0.05];

const fn block(size: [f32; 3], x: f32, y: f32, rotation_z: f32) -> LetterBlock {
    LetterBlock {
        size,
        position: [x, y],
        rotation_z,
    }
}

/// "VAN TRANG" in stick strokes.
pub const LETTERING: [LetterBlock; 24] = [
    // V
    block(STROKE, -1.2, 0.0, 0.3),
    block(STROKE, -1.0, 0.0, -0.3),
    // A
    block(STROKE, -0.7, 0.0, 0.2),
    block(STROKE, -0.5, 0.0, -0.2),
    block(BAR, -0.6, -0.03, 0.0),
    // N
    block(STROKE, -0.2, 0.0, 0.0),
    block(STROKE, 0.0, 0.0, 0.0),
    block(DIAGONAL, -0.1, 0.0, 0.5),
    // T
    block([0.2, 0.05, 0.05], 0.5, 0.05, 0.0),
    block(STROKE, 0.5, -0.03, 0.0),
    // R
    block(STROKE, 0.8, 0.0, 0.0),
    block(SHORT_BAR, 0.9, 0.05, 0.0),
    block(SHORT_BAR, 0.9, 0.0, 0.0),
    block([0.05, 0.08, 0.05], 0.95, -0.05, 0.3),
    // A
    block(STROKE, 1.2, 0.0, 0.2),
    block(STROKE, 1.4, 0.0, -0.2),
    block(BAR, 1.3, -0.03, 0.0),
    // N
    block(STROKE, 1.7, 0.0, 0.0),
    block(STROKE, 1.9, 0.0, 0.0),
    block(DIAGONAL, 1.8, 0.0, 0.5),
    // G
    block(STROKE, 2.2, 0.0, 0.0),
    block(SHORT_BAR, 2.3, 0.05, 0.0),
    block(SHORT_BAR, 2.3, -0.05, 0.0),
    block([0.05, 0.05, 0.05], 2.35, 0.0, 0.0),
];
