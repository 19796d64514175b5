//! Read-only camera and path snapshot for the debug menu.

use glam::Vec3;

use crate::easing::EasingType;
use crate::input::NudgeTarget;
use crate::keyframe::CameraKeyframe;
use crate::state::Camera;

/// Orientation of the live camera, sampled once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugCameraInfo {
    /// World-space forward direction.
    pub look_at: Vec3,
    pub up: Vec3,
    pub fov: Option<f32>,
}

impl DebugCameraInfo {
    pub fn sample(camera: &Camera) -> Self {
        Self {
            look_at: camera.forward(),
            up: camera.up,
            fov: camera.fov(),
        }
    }
}

/// Everything the debug menu shows, borrowed from the session context.
pub struct DebugReport<'a> {
    pub position: Vec3,
    pub target: Vec3,
    pub scroll: f32,
    pub easing: EasingType,
    pub speed: f32,
    pub camera: Option<DebugCameraInfo>,
    pub keyframes: &'a [CameraKeyframe],
    pub selected: Option<usize>,
    /// What the nudge keys move; shown in debug mode only.
    pub nudge_target: Option<NudgeTarget>,
    pub debug: bool,
}

fn vec_fixed(v: Vec3, decimals: usize) -> String {
    format!(
        "{:.*}, {:.*}, {:.*}",
        decimals, v.x, decimals, v.y, decimals, v.z
    )
}

/// Two display rows for one keyframe: waypoint and timing.
pub fn keyframe_rows(index: usize, kf: &CameraKeyframe) -> (String, String) {
    (
        format!(
            "{}: pos[{}] → target[{}]",
            index,
            vec_fixed(kf.position, 1),
            vec_fixed(kf.target, 1)
        ),
        format!(
            "easing: {}, duration: {}s",
            kf.easing_or_default(),
            kf.duration_or_default()
        ),
    )
}

impl DebugReport<'_> {
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(10 + self.keyframes.len() * 2);
        out.push(format!("Mode: {}", if self.debug { "debug" } else { "scroll" }));
        out.push(format!("Position: {}", vec_fixed(self.position, 2)));
        out.push(format!("Target: {}", vec_fixed(self.target, 2)));
        out.push(format!("Scroll: {:.4}", self.scroll));
        out.push(format!("Easing: {}", self.easing));
        out.push(format!("Speed: {:.2}", self.speed));
        if let Some(info) = &self.camera {
            out.push(format!("LookAt: [{}]", vec_fixed(info.look_at, 2)));
            out.push(format!("Up: [{}]", vec_fixed(info.up, 2)));
            if let Some(fov) = info.fov {
                out.push(format!("FOV: {:.2}", fov));
            }
        }
        if let Some(nudge) = self.nudge_target {
            out.push(format!("Nudge: {}", nudge.name()));
        }
        out.push(format!("Keyframes: ({})", self.keyframes.len()));
        for (i, kf) in self.keyframes.iter().enumerate() {
            let (head, timing) = keyframe_rows(i, kf);
            let marker = if self.selected == Some(i) { "> " } else { "" };
            out.push(format!("{}{}", marker, head));
            out.push(format!("   {}", timing));
        }
        out
    }
}
