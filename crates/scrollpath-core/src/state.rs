//! Camera state shared with the frontends.
//!
//! These types avoid referencing platform-specific APIs and are suitable for
//! use on both native and web targets. The frontends build view/projection
//! matrices from them every frame.

use glam::{Mat4, Vec3};

use crate::constants::{INITIAL_EYE, INITIAL_FOV_DEG, WORLD_UP, ZFAR, ZNEAR};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective { fovy_deg: f32 },
    Orthographic { height: f32 },
}

/// Simple right-handed look-at camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub projection: Projection,
    pub znear: f32,
    pub zfar: f32,
    projection_dirty: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(INITIAL_FOV_DEG, 1.0)
    }
}

impl Camera {
    /// Perspective camera at the start-up eye, looking down -Z.
    pub fn perspective(fovy_deg: f32, aspect: f32) -> Self {
        let eye = Vec3::from(INITIAL_EYE);
        Self {
            eye,
            target: eye + Vec3::NEG_Z,
            up: WORLD_UP,
            aspect,
            projection: Projection::Perspective { fovy_deg },
            znear: ZNEAR,
            zfar: ZFAR,
            projection_dirty: true,
        }
    }

    pub fn orthographic(height: f32, aspect: f32) -> Self {
        Self {
            projection: Projection::Orthographic { height },
            ..Self::perspective(INITIAL_FOV_DEG, aspect)
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Unit vector from the eye towards the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Field of view in degrees, if this camera has one.
    pub fn fov(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { fovy_deg } => Some(fovy_deg),
            Projection::Orthographic { .. } => None,
        }
    }

    /// Set the field of view; returns `false` for cameras without one.
    pub fn set_fov(&mut self, fovy_deg: f32) -> bool {
        match &mut self.projection {
            Projection::Perspective { fovy_deg: f } => {
                if *f != fovy_deg {
                    *f = fovy_deg;
                    self.projection_dirty = true;
                }
                true
            }
            Projection::Orthographic { .. } => false,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 && aspect != self.aspect {
            self.aspect = aspect;
            self.projection_dirty = true;
        }
    }

    /// Returns whether the projection changed since the last call.
    pub fn take_projection_dirty(&mut self) -> bool {
        std::mem::take(&mut self.projection_dirty)
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fovy_deg } => {
                Mat4::perspective_rh(fovy_deg.to_radians(), self.aspect, self.znear, self.zfar)
            }
            Projection::Orthographic { height } => {
                let h = height * 0.5;
                let w = h * self.aspect;
                Mat4::orthographic_rh(-w, w, -h, h, self.znear, self.zfar)
            }
        }
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.eye,
            target: self.target,
            up: self.up,
            fov: self.fov(),
        }
    }
}

/// Camera pose handed to the renderer each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: Option<f32>,
}

impl CameraPose {
    /// Move `camera` to this pose. The fov is only applied to cameras that
    /// have one.
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.eye = self.position;
        camera.up = self.up;
        camera.look_at(self.target);
        if let Some(fov) = self.fov {
            camera.set_fov(fov);
        }
    }
}
