//! Easing curves and the keyframe blend used by the path controller.
//!
//! Everything here is a pure function of its inputs. Callers are expected to
//! clamp progress to \[0, 1\] before easing it.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::error::PathError;
use crate::keyframe::CameraKeyframe;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EasingType {
    Linear,
    #[default]
    EaseInOut,
    EaseIn,
    EaseOut,
    Smoothstep,
    Bounce,
}

impl EasingType {
    /// All easing types in the order the editor cycles through them.
    pub const ALL: [EasingType; 6] = [
        EasingType::Linear,
        EasingType::EaseInOut,
        EasingType::EaseIn,
        EasingType::EaseOut,
        EasingType::Smoothstep,
        EasingType::Bounce,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EasingType::Linear => "linear",
            EasingType::EaseInOut => "easeInOut",
            EasingType::EaseIn => "easeIn",
            EasingType::EaseOut => "easeOut",
            EasingType::Smoothstep => "smoothstep",
            EasingType::Bounce => "bounce",
        }
    }

    /// Next easing in [`EasingType::ALL`], wrapping around.
    pub fn next(self) -> EasingType {
        let i = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingType {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EasingType::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| PathError::UnknownEasing(s.to_string()))
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// Map linear progress `t` in \[0, 1\] to eased progress.
#[inline]
pub fn apply_easing(t: f32, easing: EasingType) -> f32 {
    match easing {
        EasingType::Linear => t,
        EasingType::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        EasingType::EaseIn => t * t,
        EasingType::EaseOut => t * (2.0 - t),
        EasingType::Smoothstep => t * t * (3.0 - 2.0 * t),
        EasingType::Bounce => bounce_out(t),
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
}

/// Result of blending two keyframes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendedPose {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
}

/// Ease `t` once and blend position, target and fov between two keyframes.
///
/// A keyframe without a usable fov contributes
/// [`DEFAULT_FOV_DEG`](crate::constants::DEFAULT_FOV_DEG).
pub fn interpolate_keyframes(
    a: &CameraKeyframe,
    b: &CameraKeyframe,
    t: f32,
    easing: EasingType,
) -> BlendedPose {
    let eased = apply_easing(t, easing);
    BlendedPose {
        position: lerp_vec3(a.position, b.position, eased),
        target: lerp_vec3(a.target, b.target, eased),
        fov: lerp(a.fov_or_default(), b.fov_or_default(), eased),
    }
}
