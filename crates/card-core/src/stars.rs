use crate::config::StarFieldConfig;
use crate::surface::{Surface2d, Viewport};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub base_alpha: f32,
    pub phase: f32,
    pub speed: f32,
}

impl Star {
    /// Current opacity: base alpha modulated by the twinkle phase.
    #[inline]
    pub fn alpha(&self, floor: f32, depth: f32) -> f32 {
        self.base_alpha * (floor + depth * self.phase.sin())
    }
}

/// Ambient twinkling background. Lives for the whole page session.
pub struct StarField {
    config: StarFieldConfig,
    viewport: Viewport,
    stars: Vec<Star>,
    rng: StdRng,
}

/// Stars for a viewport: one per `density` square css pixels, rounded.
pub fn star_count(viewport: &Viewport, density: f32) -> usize {
    if density <= 0.0 {
        return 0;
    }
    (viewport.area() / density).round() as usize
}

impl StarField {
    pub fn new(config: StarFieldConfig, viewport: Viewport, seed: u64) -> Self {
        let mut field = Self {
            config,
            viewport,
            stars: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        field.regenerate();
        field
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Adopt a new viewport and rebuild the star set wholesale.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.regenerate();
        log::debug!(
            "[stars] resized to {}x{} -> {} stars",
            viewport.width,
            viewport.height,
            self.stars.len()
        );
    }

    fn regenerate(&mut self) {
        let count = star_count(&self.viewport, self.config.density_px2);
        let (w, h) = (self.viewport.width, self.viewport.height);
        let c = &self.config;
        let rng = &mut self.rng;
        self.stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(rng.gen::<f32>() * w, rng.gen::<f32>() * h),
                radius: c.radius_min + rng.gen::<f32>() * c.radius_span,
                base_alpha: c.alpha_min + rng.gen::<f32>() * c.alpha_span,
                phase: rng.gen::<f32>() * TAU,
                speed: c.speed_min + rng.gen::<f32>() * c.speed_span,
            })
            .collect();
    }

    /// Advance every star one frame and draw the field.
    pub fn tick(&mut self, surface: &mut impl Surface2d) {
        surface.clear();
        let (floor, depth) = (self.config.twinkle_floor, self.config.twinkle_depth);
        for s in &mut self.stars {
            s.phase += s.speed;
            let alpha = s.alpha(floor, depth);
            surface.fill_circle(s.pos, s.radius, self.config.tint.with_alpha(alpha));
        }
    }
}
