pub mod constants;
pub mod context;
pub mod controller;
pub mod curve;
pub mod easing;
pub mod error;
pub mod input;
pub mod keyframe;
pub mod orbit;
pub mod scene;
pub mod state;
pub mod telemetry;

pub use constants::*;
pub use context::*;
pub use controller::*;
pub use curve::*;
pub use easing::*;
pub use error::*;
pub use input::*;
pub use keyframe::*;
pub use orbit::*;
pub use scene::*;
pub use state::*;
pub use telemetry::*;

// Shaders bundled as string constants
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");
