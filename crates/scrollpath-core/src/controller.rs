//! Per-frame camera path driver.
//!
//! Wheel input moves `scroll_target`; every tick `scroll` relaxes towards it
//! and the camera pose is blended from the two keyframes bracketing the new
//! progress. Each keyframe pair owns an equal share of progress.

use glam::Vec2;

use crate::constants::{SCROLL_SENSITIVITY, WORLD_UP};
use crate::curve::PathCurves;
use crate::easing::{interpolate_keyframes, EasingType};
use crate::keyframe::{CameraKeyframe, KeyframeStore};
use crate::state::{Camera, CameraPose};

/// Keyframe pair and local parameter for a progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub current: usize,
    pub next: usize,
    /// Position inside the segment, in \[0, 1).
    pub t: f32,
}

/// Pick the segment for `progress` over `len` keyframes.
///
/// Returns `None` when there are fewer than two keyframes. Progress is
/// clamped to \[0, 1\]; progress 1 lands on the last keyframe with `t = 0`.
pub fn select_segment(progress: f32, len: usize) -> Option<Segment> {
    if len < 2 {
        return None;
    }
    let segments = len - 1;
    let index = progress.clamp(0.0, 1.0) * segments as f32;
    let current = (index.floor() as usize).min(segments);
    let next = (current + 1).min(segments);
    Some(Segment {
        current,
        next,
        t: index - current as f32,
    })
}

/// Camera pose for `progress`.
///
/// With two or more keyframes the bracketing pair is blended with `easing`;
/// otherwise the pose is read straight off the curves and carries no fov.
pub fn pose_at(
    keyframes: &[CameraKeyframe],
    curves: &PathCurves,
    easing: EasingType,
    progress: f32,
) -> CameraPose {
    match select_segment(progress, keyframes.len()) {
        Some(seg) => {
            let blended =
                interpolate_keyframes(&keyframes[seg.current], &keyframes[seg.next], seg.t, easing);
            CameraPose {
                position: blended.position,
                target: blended.target,
                up: WORLD_UP,
                fov: Some(blended.fov),
            }
        }
        None => curve_pose(curves, progress),
    }
}

fn curve_pose(curves: &PathCurves, progress: f32) -> CameraPose {
    CameraPose {
        position: curves.position.point_at(progress),
        target: curves.target.point_at(progress),
        up: WORLD_UP,
        fov: None,
    }
}

/// One step of exponential smoothing from `current` towards `target`.
#[inline]
pub fn relax(current: f32, target: f32, speed: f32) -> f32 {
    current + (target - current) * speed
}

#[derive(Clone, Debug, Default)]
pub struct PathController {
    scroll: f32,
    scroll_target: f32,
    /// Pointer position in \[-1, 1\]², tracked for parallax but not used by
    /// the pose.
    mouse: Vec2,
    mounted: bool,
}

impl PathController {
    pub fn new(scroll: f32) -> Self {
        let scroll = scroll.clamp(0.0, 1.0);
        Self {
            scroll,
            scroll_target: scroll,
            mouse: Vec2::ZERO,
            mounted: false,
        }
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn scroll_target(&self) -> f32 {
        self.scroll_target
    }

    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Accumulate a wheel delta into the target progress. Ignored in debug
    /// mode; returns whether the target moved.
    pub fn on_wheel(&mut self, delta_y: f32, debug: bool) -> bool {
        if debug {
            return false;
        }
        let before = self.scroll_target;
        self.scroll_target = (self.scroll_target + delta_y * SCROLL_SENSITIVITY).clamp(0.0, 1.0);
        self.scroll_target != before
    }

    pub fn on_pointer_move(&mut self, ndc: Vec2, debug: bool) {
        if !debug {
            self.mouse = ndc;
        }
    }

    /// Drop any pending scroll so a mode switch resumes from where the camera is.
    pub fn sync_target(&mut self) {
        self.scroll_target = self.scroll;
    }

    /// Snap the camera onto the curves at the current progress.
    pub fn mount(&mut self, store: &KeyframeStore, camera: &mut Camera) -> CameraPose {
        let pose = curve_pose(store.curves(), self.scroll);
        pose.apply_to(camera);
        self.mounted = true;
        log::info!(
            "[path] mounted at scroll={:.4} pos=({:.2},{:.2},{:.2})",
            self.scroll,
            pose.position.x,
            pose.position.y,
            pose.position.z
        );
        pose
    }

    /// Advance one frame. Does nothing and returns `None` in debug mode.
    ///
    /// The first frame outside debug mode mounts instead of blending.
    pub fn tick(
        &mut self,
        store: &KeyframeStore,
        debug: bool,
        camera: &mut Camera,
    ) -> Option<CameraPose> {
        if debug {
            return None;
        }
        if !self.mounted {
            return Some(self.mount(store, camera));
        }
        self.scroll = relax(self.scroll, self.scroll_target, store.interpolation_speed());
        let pose = pose_at(
            store.keyframes(),
            store.curves(),
            store.easing_type(),
            self.scroll,
        );
        pose.apply_to(camera);
        Some(pose)
    }
}
