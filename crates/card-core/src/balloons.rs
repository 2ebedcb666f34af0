use crate::config::BalloonConfig;
use rand::prelude::*;

/// Placement and timing of one CSS-animated balloon.
#[derive(Clone, Debug, PartialEq)]
pub struct BalloonSpec {
    /// CSS color class, e.g. `red`.
    pub color_class: String,
    /// Horizontal offset in viewport-width units.
    pub x_vw: f32,
    pub scale: f32,
    pub duration_s: f32,
    pub delay_s: f32,
}

/// Lay out `config.count` balloons, cycling through the color classes by index.
pub fn balloon_layout(config: &BalloonConfig, rng: &mut impl Rng) -> Vec<BalloonSpec> {
    if config.colors.is_empty() {
        return Vec::new();
    }
    (0..config.count)
        .map(|i| BalloonSpec {
            color_class: config.colors[i % config.colors.len()].clone(),
            x_vw: config.x_min_vw + rng.gen::<f32>() * config.x_span_vw,
            scale: config.scale_min + rng.gen::<f32>() * config.scale_span,
            duration_s: config.duration_min_s + rng.gen::<f32>() * config.duration_span_s,
            delay_s: rng.gen::<f32>() * config.delay_max_s,
        })
        .collect()
}
