//! Orbit control used while debug mode owns the camera.
//!
//! Spherical coordinates around the camera's current target; drag rotates,
//! wheel zooms.

use glam::{Vec2, Vec3};

use crate::constants::{
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PITCH_LIMIT, ORBIT_ROTATE_SPEED,
    ORBIT_ZOOM_SPEED, WORLD_UP,
};
use crate::state::Camera;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Radians around +Y, zero looking down -Z.
    pub yaw: f32,
    /// Radians above the horizon.
    pub pitch: f32,
    pub distance: f32,
    last_pointer: Option<Vec2>,
    changed: bool,
}

impl OrbitControls {
    /// Orbit that reproduces the camera's current eye and target.
    pub fn from_camera(camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.length().clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let (yaw, pitch) = if offset.length_squared() > 1e-12 {
            let dir = offset.normalize();
            (dir.x.atan2(dir.z), dir.y.clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };
        Self {
            target: camera.target,
            yaw,
            pitch: pitch.clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT),
            distance,
            last_pointer: None,
            changed: false,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn begin_drag(&mut self, pointer: Vec2) {
        self.last_pointer = Some(pointer);
    }

    pub fn end_drag(&mut self) {
        self.last_pointer = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Rotate by the pointer travel since the last call; ignored when no drag
    /// is active.
    pub fn drag_to(&mut self, pointer: Vec2) {
        if let Some(last) = self.last_pointer {
            let d = pointer - last;
            self.rotate(d.x, d.y);
            self.last_pointer = Some(pointer);
        }
    }

    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * ORBIT_ROTATE_SPEED;
        self.pitch = (self.pitch + dy_px * ORBIT_ROTATE_SPEED)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.changed = true;
    }

    pub fn zoom(&mut self, wheel_px: f32) {
        self.distance = (self.distance * (1.0 + wheel_px * ORBIT_ZOOM_SPEED))
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        self.changed = true;
    }

    /// Move the camera if the orbit changed since the last call. Until the
    /// first rotate or zoom the camera keeps the pose it had when the orbit
    /// was created.
    pub fn apply(&mut self, camera: &mut Camera) -> bool {
        if !std::mem::take(&mut self.changed) {
            return false;
        }
        camera.eye = self.eye();
        camera.up = WORLD_UP;
        camera.look_at(self.target);
        true
    }
}
