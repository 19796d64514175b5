// Host-side tests for the session context, editor commands and orbit control.

use glam::{Vec2, Vec3};
use scrollpath_core::{
    default_keyframes, Axis, Camera, CameraPathContext, ContextHandle, EasingType, EditorCommand,
    KeyframeStore, NudgeTarget, OrbitControls, PathError, DURATION_MAX_SEC, DURATION_MIN_SEC,
    FOV_MAX_DEG, INITIAL_FOV_DEG, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
};

fn context() -> CameraPathContext {
    CameraPathContext::new(
        KeyframeStore::new(),
        Camera::perspective(INITIAL_FOV_DEG, 16.0 / 9.0),
    )
}

#[test]
fn editing_commands_need_debug_mode() {
    let mut ctx = context();
    ctx.apply_command(EditorCommand::AddKeyframe).unwrap();
    ctx.apply_command(EditorCommand::CycleEasing).unwrap();
    assert_eq!(ctx.store().len(), 2);
    assert_eq!(ctx.store().easing_type(), EasingType::EaseInOut);

    ctx.apply_command(EditorCommand::ToggleDebug).unwrap();
    assert!(ctx.debug());
    ctx.apply_command(EditorCommand::AddKeyframe).unwrap();
    assert_eq!(ctx.store().len(), 3);
    assert_eq!(ctx.selected(), 2);
}

#[test]
fn selection_wraps_in_both_directions() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::AddKeyframe).unwrap();
    assert_eq!(ctx.selected(), 2);
    ctx.apply_command(EditorCommand::SelectNext).unwrap();
    assert_eq!(ctx.selected(), 0);
    ctx.apply_command(EditorCommand::SelectPrevious).unwrap();
    assert_eq!(ctx.selected(), 2);
}

#[test]
fn removing_keeps_selection_in_range() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::AddKeyframe).unwrap();
    ctx.apply_command(EditorCommand::RemoveSelected).unwrap();
    assert_eq!(ctx.store().len(), 2);
    assert_eq!(ctx.selected(), 1);
    // at the minimum nothing changes
    ctx.apply_command(EditorCommand::RemoveSelected).unwrap();
    assert_eq!(ctx.store().len(), 2);
}

#[test]
fn speed_steps_stay_inside_limits() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::SpeedUp).unwrap();
    assert!((ctx.store().interpolation_speed() - 0.9).abs() < 1e-6);
    for _ in 0..5 {
        ctx.apply_command(EditorCommand::SpeedUp).unwrap();
    }
    assert!((ctx.store().interpolation_speed() - 1.0).abs() < 1e-6);
    for _ in 0..20 {
        ctx.apply_command(EditorCommand::SpeedDown).unwrap();
    }
    assert!((ctx.store().interpolation_speed() - 0.1).abs() < 1e-6);
}

#[test]
fn easing_and_path_toggles() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::CycleEasing).unwrap();
    assert_eq!(ctx.store().easing_type(), EasingType::EaseIn);
    assert!(ctx.show_path());
    ctx.apply_command(EditorCommand::TogglePath).unwrap();
    assert!(!ctx.show_path());
}

#[test]
fn capture_writes_the_live_camera_into_the_selection() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::SelectNext).unwrap();
    ctx.camera.eye = Vec3::new(4.0, 5.0, 6.0);
    ctx.camera.look_at(Vec3::new(1.0, 0.0, 0.0));
    ctx.apply_command(EditorCommand::CaptureCamera).unwrap();

    let kf = ctx.store().get(1).unwrap();
    assert_eq!(kf.position, Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(kf.target, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(kf.fov, Some(INITIAL_FOV_DEG));
    assert_eq!(ctx.store().curves().position.points()[1], kf.position);
}

#[test]
fn frames_publish_the_camera_pose() {
    let mut ctx = context();
    let pose = ctx.frame();
    let (pos, target) = ctx.published();
    assert_eq!(pos, pose.position);
    assert_eq!(target, pose.target);
    assert!(pos.abs_diff_eq(ctx.store().keyframes()[0].position, 1e-5));
    assert!(ctx.debug_info().is_some());
}

#[test]
fn wheel_in_debug_zooms_instead_of_scrolling() {
    let mut ctx = context();
    ctx.frame();
    ctx.set_debug(true);
    let target = ctx.controller.scroll_target();
    let before = ctx.camera.eye.distance(ctx.camera.target);
    ctx.on_wheel(500.0);
    ctx.frame();
    assert_eq!(ctx.controller.scroll_target(), target);
    let after = ctx.camera.eye.distance(ctx.camera.target);
    assert!(after > before);
}

#[test]
fn orbit_drag_keeps_distance_to_target() {
    let mut ctx = context();
    ctx.frame();
    ctx.set_debug(true);
    let eye = ctx.camera.eye;
    let target = ctx.camera.target;
    let radius = eye.distance(target);

    // entering debug does not move the camera
    ctx.frame();
    assert_eq!(ctx.camera.eye, eye);

    ctx.on_pointer_down(Vec2::new(100.0, 100.0));
    ctx.on_pointer_move(Vec2::new(160.0, 120.0), Vec2::ZERO);
    ctx.on_pointer_up();
    ctx.frame();
    assert_ne!(ctx.camera.eye, eye);
    assert!((ctx.camera.eye.distance(target) - radius).abs() < 1e-3);
    assert_eq!(ctx.camera.target, target);
}

#[test]
fn orbit_reproduces_the_camera_it_starts_from() {
    let mut camera = Camera::default();
    camera.eye = Vec3::new(0.0, 2.0, 2.0);
    camera.look_at(Vec3::new(0.0, 0.0, -0.5));
    let mut orbit = OrbitControls::from_camera(&camera);
    assert!(orbit.eye().abs_diff_eq(camera.eye, 1e-4));
    assert!(!orbit.apply(&mut camera));

    orbit.zoom(1.0e6);
    assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
    orbit.zoom(-1.0e6);
    assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
    assert!(orbit.apply(&mut camera));
}

#[test]
fn leaving_debug_resumes_without_a_jump() {
    let mut ctx = context();
    ctx.frame();
    ctx.on_wheel(2000.0);
    ctx.set_debug(true);
    ctx.set_debug(false);
    assert_eq!(ctx.controller.scroll_target(), ctx.controller.scroll());
}

#[test]
fn handle_fails_once_the_session_is_gone() {
    let shared = context().into_shared();
    let handle = ContextHandle::new(&shared);
    assert_eq!(handle.with(|c| c.store().len()), Ok(2));
    handle
        .with(|c| c.apply_command(EditorCommand::ToggleDebug))
        .unwrap()
        .unwrap();
    assert!(shared.borrow().debug());

    drop(shared);
    assert_eq!(handle.get().err(), Some(PathError::ContextUnavailable));
    assert_eq!(handle.with(|c| c.debug()), Err(PathError::ContextUnavailable));
}

#[test]
fn keyframe_easing_cycles_on_the_selection_only() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::SelectNext).unwrap();
    let revision = ctx.store().revision();
    ctx.apply_command(EditorCommand::CycleKeyframeEasing).unwrap();

    assert_eq!(ctx.store().get(1).unwrap().easing, Some(EasingType::EaseIn));
    assert_eq!(ctx.store().get(0).unwrap().easing, Some(EasingType::EaseInOut));
    assert_eq!(ctx.store().easing_type(), EasingType::EaseInOut);
    assert!(ctx.store().revision() > revision);
}

#[test]
fn keyframe_duration_steps_and_clamps() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::DurationDown).unwrap();
    assert_eq!(ctx.store().get(0).unwrap().duration, Some(0.9));
    for _ in 0..20 {
        ctx.apply_command(EditorCommand::DurationDown).unwrap();
    }
    assert_eq!(ctx.store().get(0).unwrap().duration, Some(DURATION_MIN_SEC));
    for _ in 0..60 {
        ctx.apply_command(EditorCommand::DurationUp).unwrap();
    }
    assert_eq!(ctx.store().get(0).unwrap().duration, Some(DURATION_MAX_SEC));
}

#[test]
fn keyframe_fov_steps_and_clamps() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::SelectNext).unwrap();
    ctx.apply_command(EditorCommand::FovUp).unwrap();
    assert_eq!(ctx.store().get(1).unwrap().fov, Some(45.0));
    ctx.apply_command(EditorCommand::FovDown).unwrap();
    ctx.apply_command(EditorCommand::FovDown).unwrap();
    assert_eq!(ctx.store().get(1).unwrap().fov, Some(35.0));
    for _ in 0..30 {
        ctx.apply_command(EditorCommand::FovUp).unwrap();
    }
    assert_eq!(ctx.store().get(1).unwrap().fov, Some(FOV_MAX_DEG));
    assert_eq!(ctx.store().get(0).unwrap().fov, Some(70.0));
}

#[test]
fn nudges_move_position_or_target_along_one_axis() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::SelectNext).unwrap();
    assert_eq!(ctx.nudge_target(), NudgeTarget::Position);

    ctx.apply_command(EditorCommand::Nudge { axis: Axis::X, positive: true })
        .unwrap();
    let kf = ctx.store().get(1).unwrap();
    assert!(kf.position.abs_diff_eq(Vec3::new(2.1, 2.0, 2.0), 1e-6));
    assert_eq!(kf.target, Vec3::new(0.0, 0.0, -0.5));
    assert_eq!(ctx.store().curves().position.points()[1], kf.position);

    ctx.apply_command(EditorCommand::ToggleNudgeTarget).unwrap();
    assert_eq!(ctx.nudge_target(), NudgeTarget::Target);
    ctx.apply_command(EditorCommand::Nudge { axis: Axis::Z, positive: false })
        .unwrap();
    let kf = ctx.store().get(1).unwrap();
    assert!(kf.target.abs_diff_eq(Vec3::new(0.0, 0.0, -0.6), 1e-6));
    assert!(kf.position.abs_diff_eq(Vec3::new(2.1, 2.0, 2.0), 1e-6));
}

#[test]
fn keyframe_edits_are_ignored_outside_debug() {
    let mut ctx = context();
    let revision = ctx.store().revision();
    ctx.apply_command(EditorCommand::FovUp).unwrap();
    ctx.apply_command(EditorCommand::DurationUp).unwrap();
    ctx.apply_command(EditorCommand::Nudge { axis: Axis::Y, positive: true })
        .unwrap();
    assert_eq!(ctx.store().revision(), revision);
    assert_eq!(&ctx.store().keyframes()[..], &default_keyframes()[..]);
}

#[test]
fn replacing_keyframes_keeps_selection_in_range() {
    let mut ctx = context();
    ctx.set_debug(true);
    ctx.apply_command(EditorCommand::AddKeyframe).unwrap();
    assert_eq!(ctx.selected(), 2);

    ctx.set_keyframes(default_keyframes()).unwrap();
    assert_eq!(ctx.selected(), 1);
    ctx.apply_command(EditorCommand::CaptureCamera).unwrap();
    ctx.apply_command(EditorCommand::FovUp).unwrap();
    ctx.frame();
    assert!(ctx.report().lines().iter().any(|l| l.starts_with("> 1: pos[")));

    // a rejected replacement leaves the selection alone
    assert!(ctx.set_keyframes(Vec::new()).is_err());
    assert_eq!(ctx.selected(), 1);
}

#[test]
fn scene_key_changes_only_when_geometry_inputs_change() {
    let mut ctx = context();
    ctx.frame();
    let key = ctx.scene_key();
    ctx.on_wheel(300.0);
    ctx.frame();
    assert_eq!(ctx.scene_key(), key);
    assert_eq!(key.selected, None);
    assert!(!key.show_path);

    ctx.set_debug(true);
    let debug_key = ctx.scene_key();
    assert_ne!(debug_key, key);
    assert_eq!(debug_key.selected, Some(0));

    ctx.apply_command(EditorCommand::TogglePath).unwrap();
    assert_ne!(ctx.scene_key(), debug_key);
    let toggled = ctx.scene_key();

    ctx.apply_command(EditorCommand::AddKeyframe).unwrap();
    let added = ctx.scene_key();
    assert!(added.revision > toggled.revision);
    assert_eq!(added.selected, Some(2));
    assert!(!ctx.scene_lines().is_empty());
}
