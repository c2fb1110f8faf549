//! Camera Tests - Bounded Rotator and Camera
//!
//! Tests for quaternion orientation: composition order, per-axis bounds,
//! tracking and the derived basis, plus the camera built on top.

use glam::{Mat4, Quat, Vec3};
use ghost_reef_engine::camera::{Axis, AxisBounds, BoundedRotator, Camera};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

fn assert_orthonormal(rotator: &BoundedRotator) {
    let (r, u, f) = (rotator.right(), rotator.up(), rotator.front());
    for v in [r, u, f] {
        assert!((v.length() - 1.0).abs() < 1e-5);
    }
    assert!(r.dot(u).abs() < 1e-5);
    assert!(r.dot(f).abs() < 1e-5);
    assert!(u.dot(f).abs() < 1e-5);
    // Right-handed with front = -Z
    assert!(r.cross(u).abs_diff_eq(-f, 1e-5));
}

// ============================================================================
// Free Mode Tests
// ============================================================================

#[test]
fn test_free_turn_composition_order_matters() {
    let (a, b) = (0.7, 1.1);

    let mut pitch_first = BoundedRotator::free();
    pitch_first.turn(a, 0.0, 0.0);
    pitch_first.turn(0.0, b, 0.0);

    let mut yaw_first = BoundedRotator::free();
    yaw_first.turn(0.0, b, 0.0);
    yaw_first.turn(a, 0.0, 0.0);

    assert!(!pitch_first.product().abs_diff_eq(yaw_first.product(), 1e-3));
    assert!(pitch_first.product().abs_diff_eq(Quat::from_rotation_y(b) * Quat::from_rotation_x(a), 1e-5));
}

#[test]
fn test_free_turn_quarter_yaw() {
    let mut rotator = BoundedRotator::free();
    rotator.turn(0.0, FRAC_PI_2, 0.0);

    // Yawing +90 degrees about Y swings -Z toward -X
    assert!(rotator.front().abs_diff_eq(Vec3::NEG_X, 1e-5));
    assert!(rotator.up().abs_diff_eq(Vec3::Y, 1e-5));
    assert_orthonormal(&rotator);
}

#[test]
fn test_basis_stays_orthonormal_after_many_turns() {
    let mut rotator = BoundedRotator::free();
    for i in 0..5000 {
        let t = i as f32 * 0.01;
        rotator.turn(0.013 * t.sin(), 0.021, -0.008 * t.cos());
    }
    assert!((rotator.product().length() - 1.0).abs() < 1e-5);
    assert_orthonormal(&rotator);
}

#[test]
fn test_matrix_and_transpose_are_inverse() {
    let mut rotator = BoundedRotator::free();
    rotator.turn(0.3, -0.4, 0.9);
    assert!((rotator.matrix() * rotator.transpose()).abs_diff_eq(Mat4::IDENTITY, 1e-5));
}

// ============================================================================
// Bound Mode Tests
// ============================================================================

#[test]
fn test_bound_pitch_never_exceeds_limit() {
    let max_angle = FRAC_PI_4;
    let bounds = AxisBounds::from_max_angles(max_angle, PI, PI);
    let mut rotator = BoundedRotator::bound(bounds);

    for _ in 0..500 {
        rotator.turn(0.05, 0.0, 0.0);
        let pitch = rotator.axis_component(Axis::Pitch).unwrap();
        assert!(pitch.w >= bounds.pitch);
    }

    // Stalled just inside the limit
    let pitch = rotator.axis_component(Axis::Pitch).unwrap();
    let angle = 2.0 * pitch.w.clamp(-1.0, 1.0).acos();
    assert!(angle <= max_angle + 1e-4);
    assert!(angle > max_angle - 0.05 - 1e-4);
}

#[test]
fn test_bound_rejected_axis_does_not_block_others() {
    let bounds = AxisBounds::from_max_angles(0.1, PI, PI);
    let mut rotator = BoundedRotator::bound(bounds);

    // Pitch step is over the limit, yaw step is fine
    rotator.turn(0.5, 0.3, 0.0);

    assert_eq!(rotator.axis_component(Axis::Pitch), Some(Quat::IDENTITY));
    let yaw = rotator.axis_component(Axis::Yaw).unwrap();
    assert!(yaw.abs_diff_eq(Quat::from_rotation_y(0.3), 1e-5));
    assert!(rotator.product().abs_diff_eq(yaw, 1e-5));
}

#[test]
fn test_bound_can_turn_back_from_limit() {
    let bounds = AxisBounds::from_max_angles(0.5, PI, PI);
    let mut rotator = BoundedRotator::bound(bounds);
    for _ in 0..100 {
        rotator.turn(0.1, 0.0, 0.0);
    }
    let at_limit = rotator.axis_component(Axis::Pitch).unwrap();
    rotator.turn(-0.2, 0.0, 0.0);
    let backed_off = rotator.axis_component(Axis::Pitch).unwrap();
    assert!(backed_off.w > at_limit.w);
}

#[test]
fn test_bound_product_is_pitch_yaw_roll() {
    let mut rotator = BoundedRotator::bound(AxisBounds::UNBOUNDED);
    rotator.turn(0.2, 0.0, 0.0);
    rotator.turn(0.0, 0.3, 0.0);
    rotator.turn(0.0, 0.0, 0.4);

    let expected =
        Quat::from_rotation_x(0.2) * Quat::from_rotation_y(0.3) * Quat::from_rotation_z(0.4);
    assert!(rotator.product().abs_diff_eq(expected, 1e-5));
    assert_orthonormal(&rotator);
}

#[test]
fn test_free_has_no_axis_components() {
    let rotator = BoundedRotator::free();
    assert!(rotator.axis_component(Axis::Yaw).is_none());
    assert!(rotator.bounds().is_none());
}

// ============================================================================
// Tracking Tests
// ============================================================================

#[test]
fn test_track_rate_endpoints() {
    let mut target = BoundedRotator::free();
    target.turn(0.4, 1.2, -0.3);

    let mut stay = BoundedRotator::free();
    stay.track(&target, 0.0);
    assert!(stay.product().abs_diff_eq(Quat::IDENTITY, 1e-5));

    let mut snap = BoundedRotator::free();
    snap.track(&target, 1.0);
    assert!(snap.product().abs_diff_eq(target.product(), 1e-5));
}

#[test]
fn test_track_converges_on_target() {
    let mut target = BoundedRotator::free();
    target.turn(0.0, 2.0, 0.0);

    let mut follower = BoundedRotator::free();
    for _ in 0..200 {
        follower.track(&target, 0.1);
    }
    assert!(follower.product().dot(target.product()).abs() > 0.9999);
}

#[test]
fn test_bound_track_single_axis_is_exact() {
    let mut target = BoundedRotator::free();
    target.turn(0.0, 0.6, 0.0);

    let mut follower = BoundedRotator::bound(AxisBounds::UNBOUNDED);
    follower.track(&target, 0.5);

    let yaw = follower.axis_component(Axis::Yaw).unwrap();
    assert!(yaw.abs_diff_eq(Quat::from_rotation_y(0.3), 1e-5));
    assert_eq!(follower.axis_component(Axis::Pitch), Some(Quat::IDENTITY));
}

#[test]
fn test_bound_track_respects_limit() {
    let bounds = AxisBounds::from_max_angles(0.2, PI, PI);
    let mut target = BoundedRotator::free();
    target.turn(1.0, 0.0, 0.0);

    let mut follower = BoundedRotator::bound(bounds);
    for _ in 0..50 {
        follower.track(&target, 0.2);
        assert!(follower.axis_component(Axis::Pitch).unwrap().w >= bounds.pitch);
    }
}

// ============================================================================
// Camera Tests
// ============================================================================

#[test]
fn test_camera_view_matrix_moves_world_opposite() {
    let camera = Camera::with_rotator(Vec3::new(0.0, 0.0, 5.0), BoundedRotator::free());
    let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
    // The origin sits 5 units in front of the camera
    assert!(origin_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-5));
}

#[test]
fn test_camera_follow_tracks_entity() {
    let mut creature = BoundedRotator::free();
    creature.turn(0.0, 0.8, 0.0);

    let mut camera = Camera::with_rotator(Vec3::ZERO, BoundedRotator::free());
    camera.follow(&creature, 1.0);
    assert!(camera.get_forward().abs_diff_eq(creature.front(), 1e-5));
}

#[test]
fn test_camera_projection_is_finite() {
    let camera = Camera::new();
    let vp = camera.view_projection(16.0 / 9.0);
    assert!(vp.is_finite());
    let clip = vp * Vec3::ZERO.extend(1.0);
    assert!(clip.w > 0.0);
}

#[test]
fn test_camera_reset_orientation() {
    let mut camera = Camera::new();
    camera.look(200.0, -80.0);
    camera.reset_orientation();
    assert!(camera.get_forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
}

#[test]
fn test_camera_moves_along_turned_view() {
    let mut camera = Camera::with_rotator(Vec3::ZERO, BoundedRotator::free());
    camera.look_sensitivity = 1.0;
    camera.look(FRAC_PI_2, 0.0);
    camera.look(0.0, -FRAC_PI_4);

    camera.translate_local(2.0, 0.0, 0.0);
    let expected = Vec3::new(FRAC_PI_4.cos(), FRAC_PI_4.sin(), 0.0) * 2.0;
    assert!(camera.position.abs_diff_eq(expected, 1e-5));
    assert!(camera.get_forward().abs_diff_eq(expected / 2.0, 1e-5));

    // Moving forward puts the origin straight behind the camera
    let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
    assert!(origin_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5));
}
