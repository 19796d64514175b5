// Host-side tests for the keyframe store.

use std::rc::Rc;

use glam::Vec3;
use scrollpath_core::{
    default_keyframes, CameraKeyframe, CurveKind, EasingType, KeyframeEdit, KeyframeStore,
    PathError, DEFAULT_INTERPOLATION_SPEED,
};

fn three_keyframes() -> Vec<CameraKeyframe> {
    vec![
        CameraKeyframe::new(Vec3::new(0.0, 1.0, 5.0), Vec3::ZERO),
        CameraKeyframe::new(Vec3::new(3.0, 1.0, 3.0), Vec3::ZERO),
        CameraKeyframe::new(Vec3::new(5.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    ]
}

#[test]
fn new_store_holds_the_default_journey() {
    let store = KeyframeStore::new();
    assert_eq!(store.len(), 2);
    assert_eq!(&store.keyframes()[..], &default_keyframes()[..]);
    assert_eq!(store.revision(), 0);
    assert_eq!(store.easing_type(), EasingType::EaseInOut);
    assert_eq!(store.interpolation_speed(), DEFAULT_INTERPOLATION_SPEED);
    assert_eq!(store.curve_kind(), CurveKind::Centripetal);
}

#[test]
fn store_rejects_fewer_than_two_keyframes() {
    let one = vec![CameraKeyframe::new(Vec3::ZERO, Vec3::NEG_Z)];
    assert_eq!(
        KeyframeStore::with_keyframes(one.clone()).err(),
        Some(PathError::TooFewKeyframes { min: 2, got: 1 })
    );

    let mut store = KeyframeStore::new();
    assert_eq!(
        store.set_keyframes(one),
        Err(PathError::TooFewKeyframes { min: 2, got: 1 })
    );
    assert_eq!(store.len(), 2);
    assert_eq!(store.revision(), 0);
}

#[test]
fn add_appends_a_filled_copy_of_the_last_keyframe() {
    let mut store = KeyframeStore::with_keyframes(three_keyframes()).unwrap();
    store.add_keyframe();
    assert_eq!(store.len(), 4);
    assert_eq!(store.revision(), 1);

    let last = store.get(3).unwrap();
    assert_eq!(last.position, Vec3::new(5.0, 2.0, 0.0));
    assert_eq!(last.target, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(last.up, Some(Vec3::Y));
    assert_eq!(last.fov, Some(75.0));
    assert_eq!(last.easing, Some(EasingType::EaseInOut));
    assert_eq!(last.duration, Some(2.0));
    assert_eq!(store.curves().position.points().len(), 4);
}

#[test]
fn add_then_remove_restores_the_sequence() {
    let mut store = KeyframeStore::with_keyframes(three_keyframes()).unwrap();
    let before = store.keyframes().clone();
    store.add_keyframe();
    assert_eq!(store.remove_keyframe(3), Ok(true));
    assert_eq!(store.len(), 3);
    // positions and targets are back; the appended copy is gone
    for (a, b) in before.iter().zip(store.keyframes().iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn remove_refuses_to_go_below_two() {
    let mut store = KeyframeStore::new();
    assert_eq!(store.remove_keyframe(0), Ok(false));
    assert_eq!(store.len(), 2);
    assert_eq!(store.revision(), 0);
}

#[test]
fn out_of_range_indices_are_errors() {
    let mut store = KeyframeStore::new();
    assert_eq!(
        store.remove_keyframe(5),
        Err(PathError::KeyframeIndexOutOfRange { index: 5, len: 2 })
    );
    assert_eq!(
        store.update_keyframe(2, KeyframeEdit::Fov(30.0)),
        Err(PathError::KeyframeIndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(store.revision(), 0);
}

#[test]
fn update_swaps_in_a_new_snapshot() {
    let mut store = KeyframeStore::with_keyframes(three_keyframes()).unwrap();
    let old: Rc<[CameraKeyframe]> = store.keyframes().clone();

    store
        .update_keyframe(1, KeyframeEdit::Position(Vec3::new(9.0, 9.0, 9.0)))
        .unwrap();

    // the held snapshot is untouched
    assert_eq!(old[1].position, Vec3::new(3.0, 1.0, 3.0));
    assert!(!Rc::ptr_eq(&old, store.keyframes()));
    assert_eq!(store.get(1).unwrap().position, Vec3::new(9.0, 9.0, 9.0));
    assert_eq!(store.revision(), 1);
    // curves follow the new snapshot
    assert_eq!(store.curves().position.points()[1], Vec3::new(9.0, 9.0, 9.0));
}

#[test]
fn multi_field_update_is_one_revision() {
    let mut store = KeyframeStore::new();
    store
        .update_keyframe_fields(
            0,
            [
                KeyframeEdit::Target(Vec3::new(1.0, 1.0, 1.0)),
                KeyframeEdit::Easing(EasingType::Bounce),
                KeyframeEdit::Duration(3.5),
            ],
        )
        .unwrap();
    assert_eq!(store.revision(), 1);
    let kf = store.get(0).unwrap();
    assert_eq!(kf.target, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(kf.easing, Some(EasingType::Bounce));
    assert_eq!(kf.duration, Some(3.5));
    assert_eq!(store.curves().target.points()[0], Vec3::new(1.0, 1.0, 1.0));
}

#[test]
fn settings_changes_do_not_touch_the_sequence() {
    let mut store = KeyframeStore::new();
    store.set_easing_type(EasingType::Linear);
    store.set_interpolation_speed(0.3);
    assert_eq!(store.settings().easing_type, EasingType::Linear);
    assert_eq!(store.settings().interpolation_speed, 0.3);
    assert_eq!(store.revision(), 0);

    store.set_curve_kind(CurveKind::Uniform { tension: 0.5 });
    assert_eq!(store.curve_kind(), CurveKind::Uniform { tension: 0.5 });
    assert_eq!(store.revision(), 1);
}

#[test]
fn curve_endpoints_track_every_mutation() {
    fn check(store: &KeyframeStore) {
        let kfs = store.keyframes();
        let curve = &store.curves().position;
        assert!(curve.point_at(0.0).abs_diff_eq(kfs[0].position, 1e-4));
        assert!(curve.point_at(1.0).abs_diff_eq(kfs[kfs.len() - 1].position, 1e-4));
    }

    let mut store = KeyframeStore::with_keyframes(three_keyframes()).unwrap();
    check(&store);
    store.add_keyframe();
    check(&store);
    store
        .update_keyframe(3, KeyframeEdit::Position(Vec3::new(-2.0, 4.0, 1.0)))
        .unwrap();
    check(&store);
    store
        .update_keyframe(0, KeyframeEdit::Position(Vec3::new(7.0, 0.5, 2.0)))
        .unwrap();
    check(&store);
    store.remove_keyframe(0).unwrap();
    check(&store);
    store.set_keyframes(default_keyframes()).unwrap();
    check(&store);
}

#[test]
fn add_replaces_a_zero_fov_with_the_default() {
    let mut kfs = three_keyframes();
    kfs[2].fov = Some(0.0);
    let mut store = KeyframeStore::with_keyframes(kfs).unwrap();
    store.add_keyframe();
    assert_eq!(store.get(3).unwrap().fov, Some(75.0));
}
