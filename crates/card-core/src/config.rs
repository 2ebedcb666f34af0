//! Page configuration.
//!
//! The card has shipped in several variants (different step lists, wording,
//! autoplay behavior). They are all one implementation driven by
//! [`CardConfig`]. Every field has a default equal to the stock page, so a
//! partial JSON override only needs the fields it changes.

use crate::color::Rgba;
use crate::constants::*;
use crate::error::CardError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub steps: StepLabels,
    pub text: Texts,
    pub autoplay: AutoplayStrategy,
    /// Show a replay button once the final step has run.
    pub replay_enabled: bool,
    pub music: MusicConfig,
    pub stars: StarFieldConfig,
    pub confetti: ConfettiConfig,
    pub balloons: BalloonConfig,
    pub cake: CakeConfig,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            steps: StepLabels::default(),
            text: Texts::default(),
            autoplay: AutoplayStrategy::default(),
            replay_enabled: false,
            music: MusicConfig::default(),
            stars: StarFieldConfig::default(),
            confetti: ConfettiConfig::default(),
            balloons: BalloonConfig::default(),
            cake: CakeConfig::default(),
        }
    }
}

impl CardConfig {
    pub fn from_json(json: &str) -> Result<Self, CardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an override, falling back to the stock page on any error.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[config] ignoring invalid card config: {}", e);
                Self::default()
            }
        }
    }
}

/// Button labels, one per ceremony step, in order.
///
/// The step list itself is fixed at five entries wired to the page markup;
/// only the labels are configurable and unknown keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StepLabels {
    pub banner: String,
    pub balloons: String,
    pub bring_cake: String,
    pub blow_candle: String,
    pub finale: String,
}

impl Default for StepLabels {
    fn default() -> Self {
        Self {
            banner: "Happy".to_string(),
            balloons: "Balloons".to_string(),
            bring_cake: "Bring cake".to_string(),
            blow_candle: "Blow candle".to_string(),
            finale: "Happy Birthday".to_string(),
        }
    }
}

/// Locale strings. `None` leaves the markup's own text in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Texts {
    pub banner: Option<String>,
    pub message: Option<String>,
    pub music_button: Option<String>,
    pub replay_button: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AutoplayStrategy {
    /// Start the soundtrack as soon as the page is wired.
    Immediate,
    /// Try after a short delay; reveal the music button if the browser blocks it.
    Probe { delay_ms: i32 },
    /// Never autoplay; music starts from the music button only.
    ButtonOnly,
}

impl Default for AutoplayStrategy {
    fn default() -> Self {
        Self::Probe {
            delay_ms: AUTOPLAY_PROBE_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub volume: f64,
    /// After this long without a known duration the file is treated as missing.
    pub load_probe_ms: i32,
    pub fallback_loop_ms: i32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            volume: MUSIC_VOLUME,
            load_probe_ms: MUSIC_LOAD_PROBE_MS,
            fallback_loop_ms: FALLBACK_LOOP_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    pub density_px2: f32,
    pub radius_min: f32,
    pub radius_span: f32,
    pub alpha_min: f32,
    pub alpha_span: f32,
    pub speed_min: f32,
    pub speed_span: f32,
    pub twinkle_floor: f32,
    pub twinkle_depth: f32,
    pub tint: Rgba,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            density_px2: STAR_DENSITY_PX2,
            radius_min: STAR_RADIUS_MIN,
            radius_span: STAR_RADIUS_SPAN,
            alpha_min: STAR_ALPHA_MIN,
            alpha_span: STAR_ALPHA_SPAN,
            speed_min: STAR_SPEED_MIN,
            speed_span: STAR_SPEED_SPAN,
            twinkle_floor: STAR_TWINKLE_FLOOR,
            twinkle_depth: STAR_TWINKLE_DEPTH,
            tint: STAR_TINT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub cycle_ms: f64,
    pub hard_stop_slack_ms: f64,
    pub restart_pause_ms: f64,
    pub px_per_particle: f32,
    pub spawn_y: f32,
    pub recycle_margin: f32,
    pub drag: f32,
    pub vx_min: f32,
    pub vx_span: f32,
    pub vy_min: f32,
    pub vy_span: f32,
    pub size_min: f32,
    pub size_span: f32,
    pub spin_min: f32,
    pub spin_span: f32,
    pub rect_aspect: f32,
    pub circle_scale: f32,
    pub palette: Vec<Rgba>,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            cycle_ms: CONFETTI_CYCLE_MS,
            hard_stop_slack_ms: CONFETTI_HARD_STOP_SLACK_MS,
            restart_pause_ms: CONFETTI_RESTART_PAUSE_MS,
            px_per_particle: CONFETTI_PX_PER_PARTICLE,
            spawn_y: CONFETTI_SPAWN_Y,
            recycle_margin: CONFETTI_RECYCLE_MARGIN,
            drag: CONFETTI_DRAG,
            vx_min: CONFETTI_VX_MIN,
            vx_span: CONFETTI_VX_SPAN,
            vy_min: CONFETTI_VY_MIN,
            vy_span: CONFETTI_VY_SPAN,
            size_min: CONFETTI_SIZE_MIN,
            size_span: CONFETTI_SIZE_SPAN,
            spin_min: CONFETTI_SPIN_MIN,
            spin_span: CONFETTI_SPIN_SPAN,
            rect_aspect: CONFETTI_RECT_ASPECT,
            circle_scale: CONFETTI_CIRCLE_SCALE,
            palette: CONFETTI_PALETTE
                .iter()
                .filter_map(|hex| Rgba::from_hex(hex).ok())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    pub count: usize,
    pub colors: Vec<String>,
    pub x_min_vw: f32,
    pub x_span_vw: f32,
    pub scale_min: f32,
    pub scale_span: f32,
    pub duration_min_s: f32,
    pub duration_span_s: f32,
    pub delay_max_s: f32,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            count: BALLOON_COUNT,
            colors: BALLOON_COLORS.iter().map(|c| c.to_string()).collect(),
            x_min_vw: -45.0,
            x_span_vw: 90.0,
            scale_min: 0.8,
            scale_span: 0.8,
            duration_min_s: 7.0,
            duration_span_s: 6.0,
            delay_max_s: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CakeConfig {
    pub enabled: bool,
    pub max_size_px: f64,
    pub viewport_fraction: f64,
    /// Delay between bringing the cake and lighting the candle.
    pub light_delay_ms: i32,
    /// Delay between blowing and dropping the `lit` class.
    pub candle_out_delay_ms: i32,
}

impl Default for CakeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size_px: CAKE_MAX_SIZE_PX,
            viewport_fraction: CAKE_VIEWPORT_FRACTION,
            light_delay_ms: CAKE_LIGHT_DELAY_MS,
            candle_out_delay_ms: CANDLE_OUT_DELAY_MS,
        }
    }
}

/// Square size of the cake canvas: bounded by the cap, the container width and
/// a fraction of the window width.
pub fn cake_canvas_size(config: &CakeConfig, container_width: f64, window_width: f64) -> f64 {
    config
        .max_size_px
        .min(container_width)
        .min(window_width * config.viewport_fraction)
        .max(1.0)
}
