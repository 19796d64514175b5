use glam::Vec3;

use crate::easing::EasingType;
use crate::keyframe::CameraKeyframe;

// Shared path/interaction tuning constants used by both web and native frontends.

// Progress
pub const SCROLL_SENSITIVITY: f32 = 0.0001; // progress per wheel delta unit
pub const DEFAULT_INTERPOLATION_SPEED: f32 = 0.8; // fraction of remaining distance per frame
pub const INTERPOLATION_SPEED_MIN: f32 = 0.1;
pub const INTERPOLATION_SPEED_MAX: f32 = 1.0;
pub const INTERPOLATION_SPEED_STEP: f32 = 0.1;

// Keyframe defaults
pub const MIN_KEYFRAMES: usize = 2;
pub const DEFAULT_FOV_DEG: f32 = 75.0;
pub const DEFAULT_DURATION_SEC: f32 = 2.0;
pub const DEFAULT_EASING: EasingType = EasingType::EaseInOut;
pub const WORLD_UP: Vec3 = Vec3::Y;

// Keyframe editor steps
pub const DURATION_MIN_SEC: f32 = 0.5;
pub const DURATION_MAX_SEC: f32 = 5.0;
pub const DURATION_STEP_SEC: f32 = 0.1;
pub const FOV_MIN_DEG: f32 = 10.0;
pub const FOV_MAX_DEG: f32 = 120.0;
pub const FOV_STEP_DEG: f32 = 5.0;
pub const NUDGE_STEP: f32 = 0.1; // world units per key press

// Debug orbit control
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pixel
pub const ORBIT_ZOOM_SPEED: f32 = 0.001; // fractional distance per wheel unit
pub const ORBIT_PITCH_LIMIT: f32 = 1.55; // just under pi/2

// Path visualisation
pub const PATH_SAMPLE_DIVISIONS: usize = 100;
pub const CONNECTOR_PARAMS: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
pub const GRID_HALF_EXTENT: i32 = 10; // 20x20 cells around the origin
pub const GRID_CELL_SIZE: f32 = 1.0;

// Palette
pub const POSITION_PATH_COLOR: [f32; 4] = [1.0, 0.41, 0.71, 1.0]; // hot pink
pub const TARGET_PATH_COLOR: [f32; 4] = [0.0, 1.0, 1.0, 1.0]; // cyan
pub const CONNECTOR_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // yellow
pub const GRID_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.25];
pub const PLANE_COLOR: [f32; 4] = [0.95, 0.85, 0.6, 1.0];
pub const CLEAR_COLOR: [f64; 3] = [0.03, 0.04, 0.08];

// Projection and start-up camera
pub const INITIAL_EYE: [f32; 3] = [0.0, 3.0, 0.0];
pub const INITIAL_FOV_DEG: f32 = 60.0;
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 200.0;

/// The two keyframes every session starts from.
pub fn default_keyframes() -> Vec<CameraKeyframe> {
    vec![
        CameraKeyframe {
            position: Vec3::new(0.0, 2.0, 2.0),
            target: Vec3::new(0.0, 0.0, -0.5),
            up: Some(WORLD_UP),
            fov: Some(70.0),
            easing: Some(EasingType::EaseInOut),
            duration: Some(1.0),
        },
        CameraKeyframe {
            position: Vec3::new(2.0, 2.0, 2.0),
            target: Vec3::new(0.0, 0.0, -0.5),
            up: Some(WORLD_UP),
            fov: Some(40.0),
            easing: Some(EasingType::EaseInOut),
            duration: Some(1.0),
        },
    ]
}
