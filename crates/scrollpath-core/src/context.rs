//! Session-wide camera path state.
//!
//! One [`CameraPathContext`] exists per viewer session. The frontend owns it
//! behind `Rc<RefCell<_>>` and gives event handlers a [`ContextHandle`], which
//! refuses to resolve once the session has been dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::{Vec2, Vec3};

use crate::constants::{
    DURATION_MAX_SEC, DURATION_MIN_SEC, DURATION_STEP_SEC, FOV_MAX_DEG, FOV_MIN_DEG, FOV_STEP_DEG,
    INTERPOLATION_SPEED_MAX, INTERPOLATION_SPEED_MIN, INTERPOLATION_SPEED_STEP, NUDGE_STEP,
};
use crate::controller::PathController;
use crate::error::{PathError, Result};
use crate::input::{step_rounded, step_speed, Axis, EditorCommand, NudgeTarget};
use crate::keyframe::{CameraKeyframe, KeyframeEdit, KeyframeStore};
use crate::orbit::OrbitControls;
use crate::scene::{build_scene_lines, LineVertex, SceneKey};
use crate::state::{Camera, CameraPose};
use crate::telemetry::{DebugCameraInfo, DebugReport};

pub type SharedContext = Rc<RefCell<CameraPathContext>>;

pub struct CameraPathContext {
    store: KeyframeStore,
    pub controller: PathController,
    pub camera: Camera,
    debug: bool,
    show_path: bool,
    selected: usize,
    nudge_target: NudgeTarget,
    orbit: Option<OrbitControls>,
    camera_pos: Vec3,
    camera_target: Vec3,
    debug_info: Option<DebugCameraInfo>,
}

impl CameraPathContext {
    pub fn new(store: KeyframeStore, camera: Camera) -> Self {
        let camera_pos = camera.eye;
        let camera_target = camera.target;
        Self {
            store,
            controller: PathController::new(0.0),
            camera,
            debug: false,
            show_path: true,
            selected: 0,
            nudge_target: NudgeTarget::default(),
            orbit: None,
            camera_pos,
            camera_target,
            debug_info: None,
        }
    }

    pub fn into_shared(self) -> SharedContext {
        Rc::new(RefCell::new(self))
    }

    pub fn store(&self) -> &KeyframeStore {
        &self.store
    }

    /// Replace the whole sequence, keeping the selection inside it.
    pub fn set_keyframes(&mut self, keyframes: Vec<CameraKeyframe>) -> Result<()> {
        self.store.set_keyframes(keyframes)?;
        self.clamp_selection();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn show_path(&self) -> bool {
        self.show_path
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn nudge_target(&self) -> NudgeTarget {
        self.nudge_target
    }

    /// Key for the current scene geometry; the path overlay is only drawn in
    /// debug mode.
    pub fn scene_key(&self) -> SceneKey {
        SceneKey {
            revision: self.store.revision(),
            show_path: self.debug && self.show_path,
            selected: self.debug.then_some(self.selected),
        }
    }

    pub fn scene_lines(&self) -> Vec<LineVertex> {
        let key = self.scene_key();
        build_scene_lines(
            self.store.curves(),
            self.store.keyframes(),
            key.show_path,
            key.selected,
        )
    }

    /// Position and target last published by the controller or the orbit.
    pub fn published(&self) -> (Vec3, Vec3) {
        (self.camera_pos, self.camera_target)
    }

    pub fn debug_info(&self) -> Option<DebugCameraInfo> {
        self.debug_info
    }

    pub fn set_debug(&mut self, debug: bool) {
        if self.debug == debug {
            return;
        }
        self.debug = debug;
        self.controller.sync_target();
        self.orbit = debug.then(|| OrbitControls::from_camera(&self.camera));
        log::info!("[path] debug mode {}", if debug { "on" } else { "off" });
    }

    pub fn toggle_debug(&mut self) {
        self.set_debug(!self.debug);
    }

    /// Wheel input in pixels: scrolls the path, or zooms the orbit in debug mode.
    pub fn on_wheel(&mut self, delta_px: f32) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.zoom(delta_px);
        }
        self.controller.on_wheel(delta_px, self.debug);
    }

    pub fn on_pointer_move(&mut self, pointer_px: Vec2, ndc: Vec2) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.drag_to(pointer_px);
        }
        self.controller.on_pointer_move(ndc, self.debug);
    }

    pub fn on_pointer_down(&mut self, pointer_px: Vec2) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.begin_drag(pointer_px);
        }
    }

    pub fn on_pointer_up(&mut self) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.end_drag();
        }
    }

    /// Run one frame: drive the camera, publish the pose and sample telemetry.
    pub fn frame(&mut self) -> CameraPose {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.apply(&mut self.camera);
        } else {
            self.controller
                .tick(&self.store, self.debug, &mut self.camera);
        }
        self.publish();
        self.debug_info = Some(DebugCameraInfo::sample(&self.camera));
        self.camera.pose()
    }

    fn publish(&mut self) {
        self.camera_pos = self.camera.eye;
        self.camera_target = self.camera.target;
    }

    /// Apply a keyboard command. Editing commands are ignored outside debug
    /// mode.
    pub fn apply_command(&mut self, command: EditorCommand) -> Result<()> {
        if command.requires_debug() && !self.debug {
            return Ok(());
        }
        match command {
            EditorCommand::ToggleDebug => self.toggle_debug(),
            EditorCommand::AddKeyframe => {
                self.store.add_keyframe();
                self.selected = self.store.len() - 1;
            }
            EditorCommand::RemoveSelected => {
                if self.store.remove_keyframe(self.selected)? {
                    self.clamp_selection();
                }
            }
            EditorCommand::SelectPrevious => {
                self.selected = self.selected.checked_sub(1).unwrap_or(self.store.len() - 1);
            }
            EditorCommand::SelectNext => {
                self.selected = (self.selected + 1) % self.store.len();
            }
            EditorCommand::CycleEasing => {
                let next = self.store.easing_type().next();
                self.store.set_easing_type(next);
            }
            EditorCommand::SpeedDown | EditorCommand::SpeedUp => {
                let delta = if command == EditorCommand::SpeedUp {
                    INTERPOLATION_SPEED_STEP
                } else {
                    -INTERPOLATION_SPEED_STEP
                };
                let speed = step_speed(
                    self.store.interpolation_speed(),
                    delta,
                    INTERPOLATION_SPEED_MIN,
                    INTERPOLATION_SPEED_MAX,
                );
                self.store.set_interpolation_speed(speed);
            }
            EditorCommand::CaptureCamera => self.capture_camera()?,
            EditorCommand::TogglePath => self.show_path = !self.show_path,
            EditorCommand::CycleKeyframeEasing => {
                let next = self.selected_keyframe()?.easing_or_default().next();
                self.edit_selected(KeyframeEdit::Easing(next))?;
            }
            EditorCommand::DurationDown | EditorCommand::DurationUp => {
                let delta = if command == EditorCommand::DurationUp {
                    DURATION_STEP_SEC
                } else {
                    -DURATION_STEP_SEC
                };
                let current = self.selected_keyframe()?.duration_or_default();
                let duration = step_rounded(current, delta, DURATION_MIN_SEC, DURATION_MAX_SEC);
                self.edit_selected(KeyframeEdit::Duration(duration))?;
            }
            EditorCommand::FovDown | EditorCommand::FovUp => {
                let delta = if command == EditorCommand::FovUp {
                    FOV_STEP_DEG
                } else {
                    -FOV_STEP_DEG
                };
                let current = self.selected_keyframe()?.fov_or_default();
                let fov = step_rounded(current, delta, FOV_MIN_DEG, FOV_MAX_DEG);
                self.edit_selected(KeyframeEdit::Fov(fov))?;
            }
            EditorCommand::ToggleNudgeTarget => {
                self.nudge_target = self.nudge_target.toggled();
                log::info!("[keyframes] nudging {}", self.nudge_target.name());
            }
            EditorCommand::Nudge { axis, positive } => self.nudge_selected(axis, positive)?,
        }
        Ok(())
    }

    fn selected_keyframe(&self) -> Result<&CameraKeyframe> {
        self.store
            .get(self.selected)
            .ok_or(PathError::KeyframeIndexOutOfRange {
                index: self.selected,
                len: self.store.len(),
            })
    }

    fn edit_selected(&mut self, edit: KeyframeEdit) -> Result<()> {
        self.store.update_keyframe(self.selected, edit)?;
        log::debug!("[keyframes] #{} {:?}", self.selected, edit);
        Ok(())
    }

    /// Move the selected keyframe's position or target one step along `axis`.
    fn nudge_selected(&mut self, axis: Axis, positive: bool) -> Result<()> {
        let step = axis.unit() * if positive { NUDGE_STEP } else { -NUDGE_STEP };
        let kf = self.selected_keyframe()?;
        let edit = match self.nudge_target {
            NudgeTarget::Position => KeyframeEdit::Position(kf.position + step),
            NudgeTarget::Target => KeyframeEdit::Target(kf.target + step),
        };
        self.edit_selected(edit)
    }

    /// Store the live camera's position, target and fov into the selected
    /// keyframe.
    pub fn capture_camera(&mut self) -> Result<()> {
        let mut edits = vec![
            KeyframeEdit::Position(self.camera.eye),
            KeyframeEdit::Target(self.camera.target),
        ];
        if let Some(fov) = self.camera.fov() {
            edits.push(KeyframeEdit::Fov(fov));
        }
        self.store.update_keyframe_fields(self.selected, edits)?;
        log::info!("[keyframes] captured camera into #{}", self.selected);
        Ok(())
    }

    pub fn report(&self) -> DebugReport<'_> {
        DebugReport {
            position: self.camera_pos,
            target: self.camera_target,
            scroll: self.controller.scroll(),
            easing: self.store.easing_type(),
            speed: self.store.interpolation_speed(),
            camera: self.debug_info,
            keyframes: self.store.keyframes(),
            selected: self.debug.then_some(self.selected),
            nudge_target: self.debug.then_some(self.nudge_target),
            debug: self.debug,
        }
    }
}

/// Non-owning handle given to event handlers.
#[derive(Clone)]
pub struct ContextHandle(Weak<RefCell<CameraPathContext>>);

impl ContextHandle {
    pub fn new(ctx: &SharedContext) -> Self {
        Self(Rc::downgrade(ctx))
    }

    /// The live context, or [`PathError::ContextUnavailable`] once the
    /// session is gone.
    pub fn get(&self) -> Result<SharedContext> {
        self.0.upgrade().ok_or(PathError::ContextUnavailable)
    }

    /// Run `f` against the live context.
    pub fn with<R>(&self, f: impl FnOnce(&mut CameraPathContext) -> R) -> Result<R> {
        let ctx = self.get()?;
        let mut guard = ctx.borrow_mut();
        Ok(f(&mut guard))
    }
}
