pub mod balloons;
pub mod cake;
pub mod color;
pub mod confetti;
pub mod config;
pub mod constants;
pub mod error;
pub mod melody;
pub mod sched;
pub mod state;
pub mod stars;
pub mod steps;
pub mod surface;

pub use balloons::*;
pub use color::*;
pub use confetti::*;
pub use config::*;
pub use error::*;
pub use melody::*;
pub use sched::*;
pub use state::*;
pub use stars::*;
pub use steps::*;
pub use surface::*;

// Shaders bundled as string constants
pub static CAKE_WGSL: &str = include_str!("../shaders/cake.wgsl");
