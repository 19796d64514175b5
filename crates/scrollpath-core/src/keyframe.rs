//! Camera keyframes and the store that owns the keyframe sequence.
//!
//! The sequence is held as an immutable snapshot (`Rc<[CameraKeyframe]>`) and
//! every edit swaps in a complete new snapshot. The derived path curves are
//! rebuilt inside the same call, so a reader never observes keyframes and
//! curves that disagree.

use std::rc::Rc;

use glam::Vec3;

use crate::constants::{
    default_keyframes, DEFAULT_DURATION_SEC, DEFAULT_EASING, DEFAULT_FOV_DEG,
    DEFAULT_INTERPOLATION_SPEED, MIN_KEYFRAMES, WORLD_UP,
};
use crate::curve::{CurveKind, PathCurves};
use crate::easing::EasingType;
use crate::error::{PathError, Result};

/// A waypoint on the camera journey.
///
/// `easing` and `duration` are carried for the editor and display only: the
/// controller blends with the global easing and gives every segment an equal
/// share of progress.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraKeyframe {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Option<Vec3>,
    pub fov: Option<f32>,
    pub easing: Option<EasingType>,
    pub duration: Option<f32>,
}

impl CameraKeyframe {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: None,
            fov: None,
            easing: None,
            duration: None,
        }
    }

    pub fn up_or_default(&self) -> Vec3 {
        self.up.unwrap_or(WORLD_UP)
    }

    /// Field of view to use; a missing or non-positive fov counts as unset.
    pub fn fov_or_default(&self) -> f32 {
        self.fov
            .filter(|f| f.is_finite() && *f > 0.0)
            .unwrap_or(DEFAULT_FOV_DEG)
    }

    pub fn easing_or_default(&self) -> EasingType {
        self.easing.unwrap_or(DEFAULT_EASING)
    }

    pub fn duration_or_default(&self) -> f32 {
        self.duration.unwrap_or(DEFAULT_DURATION_SEC)
    }

    /// Copy used when appending a keyframe: absent optional fields are filled
    /// with their defaults.
    fn appended_copy(&self) -> Self {
        Self {
            position: self.position,
            target: self.target,
            up: Some(self.up_or_default()),
            fov: Some(self.fov_or_default()),
            easing: Some(self.easing_or_default()),
            duration: Some(self.duration_or_default()),
        }
    }

    fn apply(&mut self, edit: KeyframeEdit) {
        match edit {
            KeyframeEdit::Position(v) => self.position = v,
            KeyframeEdit::Target(v) => self.target = v,
            KeyframeEdit::Up(v) => self.up = Some(v),
            KeyframeEdit::Fov(v) => self.fov = Some(v),
            KeyframeEdit::Easing(e) => self.easing = Some(e),
            KeyframeEdit::Duration(d) => self.duration = Some(d),
        }
    }
}

/// Replacement value for a single keyframe field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyframeEdit {
    Position(Vec3),
    Target(Vec3),
    Up(Vec3),
    Fov(f32),
    Easing(EasingType),
    Duration(f32),
}

/// Global interpolation settings applied to every segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSettings {
    pub easing_type: EasingType,
    /// Fraction of the remaining progress covered each frame. The editor keeps
    /// it inside \[0.1, 1.0\]; the store accepts any value.
    pub interpolation_speed: f32,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            easing_type: DEFAULT_EASING,
            interpolation_speed: DEFAULT_INTERPOLATION_SPEED,
        }
    }
}

pub struct KeyframeStore {
    keyframes: Rc<[CameraKeyframe]>,
    settings: PathSettings,
    curve_kind: CurveKind,
    curves: PathCurves,
    revision: u64,
}

impl Default for KeyframeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyframeStore {
    /// Store seeded with the default two-keyframe journey.
    pub fn new() -> Self {
        Self::from_parts(default_keyframes().into(), CurveKind::default())
    }

    /// Store seeded with `keyframes`, which must hold at least two entries.
    pub fn with_keyframes(keyframes: Vec<CameraKeyframe>) -> Result<Self> {
        check_len(keyframes.len())?;
        Ok(Self::from_parts(keyframes.into(), CurveKind::default()))
    }

    fn from_parts(keyframes: Rc<[CameraKeyframe]>, curve_kind: CurveKind) -> Self {
        let curves = PathCurves::build(&keyframes, curve_kind);
        Self {
            keyframes,
            settings: PathSettings::default(),
            curve_kind,
            curves,
            revision: 0,
        }
    }

    /// Current snapshot. Cloning the `Rc` is cheap and the snapshot never
    /// changes underneath the holder.
    pub fn keyframes(&self) -> &Rc<[CameraKeyframe]> {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CameraKeyframe> {
        self.keyframes.get(index)
    }

    pub fn curves(&self) -> &PathCurves {
        &self.curves
    }

    pub fn curve_kind(&self) -> CurveKind {
        self.curve_kind
    }

    /// Incremented whenever the keyframes or the curves change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn settings(&self) -> PathSettings {
        self.settings
    }

    pub fn easing_type(&self) -> EasingType {
        self.settings.easing_type
    }

    pub fn interpolation_speed(&self) -> f32 {
        self.settings.interpolation_speed
    }

    pub fn set_easing_type(&mut self, easing: EasingType) {
        log::info!("[keyframes] global easing -> {}", easing);
        self.settings.easing_type = easing;
    }

    pub fn set_interpolation_speed(&mut self, speed: f32) {
        log::info!("[keyframes] interpolation speed -> {:.2}", speed);
        self.settings.interpolation_speed = speed;
    }

    pub fn set_curve_kind(&mut self, kind: CurveKind) {
        self.curve_kind = kind;
        self.curves = PathCurves::build(&self.keyframes, kind);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Append a copy of the last keyframe.
    pub fn add_keyframe(&mut self) {
        let mut next: Vec<CameraKeyframe> = self.keyframes.to_vec();
        if let Some(last) = self.keyframes.last() {
            next.push(last.appended_copy());
        }
        self.swap(next);
        log::info!("[keyframes] added keyframe #{}", self.len() - 1);
    }

    /// Replace one field of the keyframe at `index`.
    pub fn update_keyframe(&mut self, index: usize, edit: KeyframeEdit) -> Result<()> {
        self.update_keyframe_fields(index, [edit])
    }

    /// Replace several fields of one keyframe as a single sequence swap.
    pub fn update_keyframe_fields(
        &mut self,
        index: usize,
        edits: impl IntoIterator<Item = KeyframeEdit>,
    ) -> Result<()> {
        self.check_index(index)?;
        let mut next: Vec<CameraKeyframe> = self.keyframes.to_vec();
        for edit in edits {
            next[index].apply(edit);
        }
        self.swap(next);
        Ok(())
    }

    /// Remove the keyframe at `index`.
    ///
    /// Returns `Ok(false)` without touching the sequence when the removal would
    /// leave fewer than two keyframes.
    pub fn remove_keyframe(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if self.len() <= MIN_KEYFRAMES {
            log::debug!(
                "[keyframes] refusing to remove #{}: {} keyframes is the minimum",
                index,
                MIN_KEYFRAMES
            );
            return Ok(false);
        }
        let next: Vec<CameraKeyframe> = self
            .keyframes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, kf)| kf.clone())
            .collect();
        self.swap(next);
        log::info!("[keyframes] removed keyframe #{}", index);
        Ok(true)
    }

    /// Replace the whole sequence.
    pub fn set_keyframes(&mut self, keyframes: Vec<CameraKeyframe>) -> Result<()> {
        check_len(keyframes.len())?;
        self.swap(keyframes);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(PathError::KeyframeIndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    fn swap(&mut self, next: Vec<CameraKeyframe>) {
        self.keyframes = next.into();
        self.curves = PathCurves::build(&self.keyframes, self.curve_kind);
        self.revision = self.revision.wrapping_add(1);
    }
}

fn check_len(len: usize) -> Result<()> {
    if len < MIN_KEYFRAMES {
        Err(PathError::TooFewKeyframes {
            min: MIN_KEYFRAMES,
            got: len,
        })
    } else {
        Ok(())
    }
}
