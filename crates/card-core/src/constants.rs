use crate::color::Rgba;

// Shared animation tuning constants. Defaults in `CardConfig` come from here.

// Device pixel ratio clamp for canvas backing stores
pub const MIN_PIXEL_RATIO: f32 = 1.0;
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Star field
pub const STAR_DENSITY_PX2: f32 = 9000.0; // one star per this many css px²
pub const STAR_RADIUS_MIN: f32 = 0.3;
pub const STAR_RADIUS_SPAN: f32 = 1.4;
pub const STAR_ALPHA_MIN: f32 = 0.2;
pub const STAR_ALPHA_SPAN: f32 = 0.6;
pub const STAR_SPEED_MIN: f32 = 0.008; // radians per frame
pub const STAR_SPEED_SPAN: f32 = 0.018;
pub const STAR_TWINKLE_FLOOR: f32 = 0.6;
pub const STAR_TWINKLE_DEPTH: f32 = 0.4;
pub const STAR_TINT: Rgba = Rgba::rgb(255, 182, 206);

// Confetti
pub const CONFETTI_CYCLE_MS: f64 = 3200.0;
pub const CONFETTI_HARD_STOP_SLACK_MS: f64 = 150.0;
pub const CONFETTI_RESTART_PAUSE_MS: f64 = 200.0;
pub const CONFETTI_PX_PER_PARTICLE: f32 = 14.0; // count = width / this
pub const CONFETTI_SPAWN_Y: f32 = -20.0;
pub const CONFETTI_RECYCLE_MARGIN: f32 = 30.0; // below the bottom edge
pub const CONFETTI_DRAG: f32 = 0.995;
pub const CONFETTI_VX_MIN: f32 = -1.0;
pub const CONFETTI_VX_SPAN: f32 = 2.0;
pub const CONFETTI_VY_MIN: f32 = 2.0;
pub const CONFETTI_VY_SPAN: f32 = 3.5;
pub const CONFETTI_SIZE_MIN: f32 = 6.0;
pub const CONFETTI_SIZE_SPAN: f32 = 6.0;
pub const CONFETTI_SPIN_MIN: f32 = -0.1;
pub const CONFETTI_SPIN_SPAN: f32 = 0.2;
pub const CONFETTI_RECT_ASPECT: f32 = 0.6;
pub const CONFETTI_CIRCLE_SCALE: f32 = 0.35;
pub const CONFETTI_PALETTE: [&str; 5] = ["#ff6fa5", "#9bd8ff", "#ffd59e", "#7be3b0", "#ffb3d9"];

// Balloons
pub const BALLOON_COUNT: usize = 24;
pub const BALLOON_COLORS: [&str; 6] = ["red", "yellow", "green", "blue", "pink", "orange"];

// Ceremony timings
pub const CAKE_LIGHT_DELAY_MS: i32 = 500;
pub const CANDLE_OUT_DELAY_MS: i32 = 50;

// Music
pub const MUSIC_VOLUME: f64 = 0.7;
pub const AUTOPLAY_PROBE_DELAY_MS: i32 = 100;
pub const MUSIC_LOAD_PROBE_MS: i32 = 1000;
pub const FALLBACK_LOOP_MS: i32 = 4000;
pub const FALLBACK_PEAK_GAIN: f32 = 0.1;
pub const FALLBACK_ATTACK_SEC: f64 = 0.1;
pub const FALLBACK_FLOOR_GAIN: f32 = 0.0001;

// Cake view
pub const CAKE_MAX_SIZE_PX: f64 = 450.0;
pub const CAKE_VIEWPORT_FRACTION: f64 = 0.9;
