use super::descriptors::{Material, Role, FLAME};
use super::mesh::MeshKind;
use super::{build_cake, CakePart};
use crate::color::Rgba;
use crate::state::CAKE_EYE;
use glam::{Mat4, Quat, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;

// Animation rates (per second; the page ran at ~60 frames per second)
pub const CAKE_TURN_RATE: f32 = 0.3;
pub const DECOR_SPIN_RATE: f32 = 1.2;
pub const DECOR_BOB_AMPLITUDE: f32 = 0.1;
pub const DECOR_BOB_FREQ: f64 = 0.003; // per ms
pub const FLAME_OPACITY: f32 = 0.9;
pub const FLAME_FLICKER: f32 = 0.1;

// Smoke after blowing out the candle
pub const SMOKE_PUFFS: usize = 8;
pub const SMOKE_LIFETIME_MS: f64 = 1800.0;
pub const SMOKE_RISE_PER_SEC: f32 = 1.2;
pub const SMOKE_START_RADIUS: f32 = 0.08;
pub const SMOKE_END_RADIUS: f32 = 0.35;
pub const SMOKE_START_OPACITY: f32 = 0.5;
pub const SMOKE_COLOR: Rgba = Rgba::rgb(0xcc, 0xcc, 0xcc);

const MAX_FRAME_DT_SEC: f32 = 0.1;

/// One mesh draw for the current frame.
#[derive(Clone, Copy, Debug)]
pub struct Instance {
    pub mesh: MeshKind,
    pub model: Mat4,
    pub color: [f32; 4],
    pub shininess: f32,
    pub unlit: bool,
}

impl Instance {
    /// Distance from `eye` to the instance origin, used to order blending.
    pub fn distance_to(&self, eye: Vec3) -> f32 {
        self.model.w_axis.truncate().distance(eye)
    }

    #[inline]
    pub fn is_translucent(&self) -> bool {
        self.color[3] < 1.0
    }
}

#[derive(Clone, Debug)]
pub struct SmokePuff {
    pub origin: Vec3,
    pub drift: Vec3,
    pub born_ms: f64,
}

impl SmokePuff {
    /// Age in [0, 1]; values ≥ 1 mean the puff is gone.
    #[inline]
    pub fn age(&self, now_ms: f64) -> f32 {
        ((now_ms - self.born_ms) / SMOKE_LIFETIME_MS).max(0.0) as f32
    }
}

/// Animated cake: slow turn, bobbing decorations, a flickering flame that can
/// be lit and blown out, and smoke puffs.
pub struct CakeScene {
    parts: Vec<CakePart>,
    now_ms: f64,
    last_ms: Option<f64>,
    rotation_y: f32,
    decor_spin: f32,
    flame_opacity: f32,
    smoke: Vec<SmokePuff>,
    rng: StdRng,
}

impl CakeScene {
    pub fn new(seed: u64) -> Self {
        Self {
            parts: build_cake(),
            now_ms: 0.0,
            last_ms: None,
            rotation_y: 0.0,
            decor_spin: 0.0,
            flame_opacity: 0.0,
            smoke: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn parts(&self) -> &[CakePart] {
        &self.parts
    }

    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    #[inline]
    pub fn flame_visible(&self) -> bool {
        self.flame_opacity > 0.0
    }

    pub fn smoke(&self) -> &[SmokePuff] {
        &self.smoke
    }

    pub fn show_flame(&mut self) {
        self.flame_opacity = FLAME_OPACITY;
    }

    pub fn hide_flame(&mut self) {
        self.flame_opacity = 0.0;
    }

    /// Release a handful of puffs from the wick.
    pub fn create_smoke(&mut self) {
        let wick = Vec3::from(FLAME.position);
        for _ in 0..SMOKE_PUFFS {
            let drift = Vec3::new(
                self.rng.gen_range(-0.15..0.15),
                self.rng.gen_range(0.8..1.2) * SMOKE_RISE_PER_SEC,
                self.rng.gen_range(-0.15..0.15),
            );
            let stagger = self.rng.gen_range(0.0..250.0);
            self.smoke.push(SmokePuff {
                origin: wick,
                drift,
                born_ms: self.now_ms + stagger,
            });
        }
    }

    /// Advance the animation to host time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT_SEC),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.now_ms = now_ms;
        self.rotation_y += CAKE_TURN_RATE * dt;
        self.decor_spin += DECOR_SPIN_RATE * dt;
        self.smoke.retain(|p| p.age(now_ms) < 1.0);
    }

    /// Draw list for the current frame: opaque parts grouped by mesh, then
    /// translucent ones back to front as seen from the cake camera.
    pub fn instances(&self) -> SmallVec<[Instance; 64]> {
        self.instances_seen_from(CAKE_EYE)
    }

    pub fn instances_seen_from(&self, eye: Vec3) -> SmallVec<[Instance; 64]> {
        let group = Mat4::from_rotation_y(self.rotation_y);
        let mut out: SmallVec<[Instance; 64]> = SmallVec::new();
        let mut translucent: SmallVec<[Instance; 16]> = SmallVec::new();

        for part in &self.parts {
            let (local, alpha) = match part.role {
                Role::Flame => {
                    if !self.flame_visible() {
                        continue;
                    }
                    let t = self.now_ms;
                    let fx = 1.0 + (t * 0.01).sin() as f32 * FLAME_FLICKER;
                    let fz = 1.0 + (t * 0.015).cos() as f32 * FLAME_FLICKER;
                    (part.local * Mat4::from_scale(Vec3::new(fx, 1.0, fz)), self.flame_opacity)
                }
                Role::Decoration => {
                    let bob = (self.now_ms * DECOR_BOB_FREQ + part.index as f64).sin() as f32
                        * DECOR_BOB_AMPLITUDE;
                    let spin = Mat4::from_rotation_y(self.decor_spin);
                    (Mat4::from_translation(Vec3::Y * bob) * part.local * spin, 1.0)
                }
                _ => (part.local, 1.0),
            };
            let (shininess, unlit) = match part.material {
                Material::Phong { shininess } => (shininess, false),
                Material::Basic => (0.0, true),
            };
            let inst = Instance {
                mesh: part.kind,
                model: group * local,
                color: part.color.with_alpha(alpha).to_array(),
                shininess,
                unlit,
            };
            if inst.is_translucent() {
                translucent.push(inst);
            } else {
                out.push(inst);
            }
        }
        out.sort_by_key(|i| i.mesh);

        for puff in &self.smoke {
            let age = puff.age(self.now_ms);
            if !(0.0..1.0).contains(&age) || self.now_ms < puff.born_ms {
                continue;
            }
            let secs = (self.now_ms - puff.born_ms) as f32 / 1000.0;
            let radius = SMOKE_START_RADIUS + (SMOKE_END_RADIUS - SMOKE_START_RADIUS) * age;
            let pos = puff.origin + puff.drift * secs;
            translucent.push(Instance {
                mesh: MeshKind::Sphere,
                model: group
                    * Mat4::from_scale_rotation_translation(Vec3::splat(radius), Quat::IDENTITY, pos),
                color: SMOKE_COLOR
                    .with_alpha(SMOKE_START_OPACITY * (1.0 - age))
                    .to_array(),
                shininess: 0.0,
                unlit: true,
            });
        }
        translucent.sort_by(|a, b| b.distance_to(eye).total_cmp(&a.distance_to(eye)));
        out.extend(translucent);
        out
    }
}
