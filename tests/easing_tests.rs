// Host-side tests for easing curves and the keyframe blend.

use glam::Vec3;
use scrollpath_core::{
    apply_easing, interpolate_keyframes, CameraKeyframe, EasingType, PathError, DEFAULT_FOV_DEG,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn every_easing_maps_endpoints_to_endpoints() {
    for easing in EasingType::ALL {
        assert!(approx(apply_easing(0.0, easing), 0.0), "{easing} at 0");
        assert!(approx(apply_easing(1.0, easing), 1.0), "{easing} at 1");
    }
}

#[test]
fn every_easing_stays_inside_unit_range() {
    for easing in EasingType::ALL {
        for i in 0..=200 {
            let t = i as f32 / 200.0;
            let e = apply_easing(t, easing);
            assert!(
                (-1e-5..=1.0 + 1e-5).contains(&e),
                "{easing}({t}) = {e} left [0, 1]"
            );
        }
    }
}

#[test]
fn polynomial_easings_match_their_formulas() {
    assert!(approx(apply_easing(0.3, EasingType::Linear), 0.3));
    assert!(approx(apply_easing(0.25, EasingType::EaseInOut), 0.125));
    assert!(approx(apply_easing(0.75, EasingType::EaseInOut), 0.875));
    assert!(approx(apply_easing(0.5, EasingType::EaseIn), 0.25));
    assert!(approx(apply_easing(0.5, EasingType::EaseOut), 0.75));
    assert!(approx(apply_easing(0.5, EasingType::Smoothstep), 0.5));
    assert!(approx(apply_easing(0.25, EasingType::Smoothstep), 0.15625));
}

#[test]
fn bounce_follows_the_piecewise_parabola() {
    // first arc: 7.5625 t²
    assert!(approx(apply_easing(0.2, EasingType::Bounce), 0.3025));
    // second arc, just before its apex
    assert!(approx(apply_easing(0.5, EasingType::Bounce), 0.765625));
    // third arc apex at 2.25 / 2.75
    assert!(approx(apply_easing(2.25 / 2.75, EasingType::Bounce), 0.9375));
    // fourth arc apex at 2.625 / 2.75
    assert!(approx(apply_easing(2.625 / 2.75, EasingType::Bounce), 0.984375));
}

#[test]
fn easing_names_parse_back() {
    for easing in EasingType::ALL {
        assert_eq!(easing.name().parse::<EasingType>(), Ok(easing));
    }
    assert_eq!(
        "wobble".parse::<EasingType>(),
        Err(PathError::UnknownEasing("wobble".to_string()))
    );
}

#[test]
fn easing_cycle_wraps_around() {
    assert_eq!(EasingType::default(), EasingType::EaseInOut);
    assert_eq!(EasingType::EaseInOut.next(), EasingType::EaseIn);
    assert_eq!(EasingType::Bounce.next(), EasingType::Linear);
    let mut e = EasingType::Linear;
    for _ in 0..EasingType::ALL.len() {
        e = e.next();
    }
    assert_eq!(e, EasingType::Linear);
}

#[test]
fn blend_interpolates_position_target_and_fov() {
    let mut a = CameraKeyframe::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
    a.fov = Some(50.0);
    let mut b = CameraKeyframe::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 4.0, -1.0));
    b.fov = Some(90.0);

    let pose = interpolate_keyframes(&a, &b, 0.5, EasingType::Linear);
    assert!(pose.position.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-5));
    assert!(pose.target.abs_diff_eq(Vec3::new(0.0, 2.0, -1.0), 1e-5));
    assert!(approx(pose.fov, 70.0));

    // easing is applied once, before the blend
    let eased = interpolate_keyframes(&a, &b, 0.5, EasingType::EaseIn);
    assert!(eased.position.abs_diff_eq(Vec3::new(2.5, 0.0, 0.0), 1e-5));
}

#[test]
fn blend_uses_default_fov_for_missing_values() {
    let a = CameraKeyframe::new(Vec3::ZERO, Vec3::NEG_Z);
    let mut b = CameraKeyframe::new(Vec3::X, Vec3::NEG_Z);
    b.fov = Some(DEFAULT_FOV_DEG + 10.0);
    let start = interpolate_keyframes(&a, &b, 0.0, EasingType::Linear);
    assert!(approx(start.fov, DEFAULT_FOV_DEG));
    let end = interpolate_keyframes(&a, &b, 1.0, EasingType::Linear);
    assert!(approx(end.fov, DEFAULT_FOV_DEG + 10.0));
}

#[test]
fn blend_treats_zero_or_negative_fov_as_unset() {
    let mut a = CameraKeyframe::new(Vec3::ZERO, Vec3::NEG_Z);
    a.fov = Some(0.0);
    let mut b = CameraKeyframe::new(Vec3::X, Vec3::NEG_Z);
    b.fov = Some(-20.0);
    assert_eq!(a.fov_or_default(), DEFAULT_FOV_DEG);
    assert_eq!(b.fov_or_default(), DEFAULT_FOV_DEG);

    let mid = interpolate_keyframes(&a, &b, 0.5, EasingType::Linear);
    assert!(approx(mid.fov, DEFAULT_FOV_DEG));

    b.fov = Some(45.0);
    let end = interpolate_keyframes(&a, &b, 1.0, EasingType::Linear);
    assert!(approx(end.fov, 45.0));
}
