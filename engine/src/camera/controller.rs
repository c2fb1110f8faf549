//! Camera Controller Module
//!
//! A free-swimming camera: a world position plus a [`BoundedRotator`] for
//! orientation. Mouse deltas turn the rotator, movement follows the camera's
//! basis, and view/projection matrices are derived on demand.
//!
//! The camera's rotator holds the world-to-view rotation, so its
//! `pitch * yaw * roll` composition pitches about the camera's own right
//! axis and yaws about world +Y. The camera basis is the rotator's transpose.
//!
//! Conventions match the rest of the engine: right-handed, +Y up, the camera
//! looks down -Z when the rotator is at identity.

use glam::{Mat4, Vec3};

use super::rotator::{AxisBounds, BoundedRotator};

/// Default pitch limit: ±89 degrees
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Camera state
///
/// Input handling lives outside; callers pass deltas in.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// World-to-view orientation, pitch limited by default
    pub rotator: BoundedRotator,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Movement speed in units per second
    pub move_speed: f32,
    /// Speed multiplier while sprinting
    pub sprint_multiplier: f32,
    /// Radians per unit of mouse delta
    pub look_sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 8.0),
            rotator: BoundedRotator::bound(AxisBounds {
                pitch: (PITCH_LIMIT * 0.5).cos(),
                ..AxisBounds::UNBOUNDED
            }),
            fov: 60.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            move_speed: 5.0,
            sprint_multiplier: 2.5,
            look_sensitivity: 0.003,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera at `position` with a caller-built rotator.
    pub fn with_rotator(position: Vec3, rotator: BoundedRotator) -> Self {
        Self {
            position,
            rotator,
            ..Self::default()
        }
    }

    #[inline]
    pub fn get_forward(&self) -> Vec3 {
        self.rotator.to_local(Vec3::NEG_Z)
    }

    #[inline]
    pub fn get_right(&self) -> Vec3 {
        self.rotator.to_local(Vec3::X)
    }

    #[inline]
    pub fn get_up(&self) -> Vec3 {
        self.rotator.to_local(Vec3::Y)
    }

    /// Turn from a mouse delta.
    ///
    /// Positive `delta_x` (mouse right) looks right, positive `delta_y`
    /// (mouse down) looks down. Pitch is rejected past the rotator's bound.
    pub fn look(&mut self, delta_x: f32, delta_y: f32) {
        let pitch = delta_y * self.look_sensitivity;
        let yaw = delta_x * self.look_sensitivity;
        self.rotator.turn(pitch, yaw, 0.0);
    }

    /// Move by raw distances along the camera's own axes.
    pub fn translate_local(&mut self, forward: f32, right: f32, up: f32) {
        self.position += self.rotator.to_local(Vec3::new(right, up, -forward));
    }

    /// Move from normalized input axes over one frame.
    pub fn update_movement(&mut self, forward: f32, right: f32, up: f32, delta_time: f32, sprint: bool) {
        let speed = if sprint {
            self.move_speed * self.sprint_multiplier
        } else {
            self.move_speed
        };
        let step = speed * delta_time;
        self.translate_local(forward * step, right * step, up * step);
    }

    /// Ease the camera's orientation toward another entity's.
    ///
    /// `target` is an entity rotator (local to world), so the camera tracks
    /// its inverse.
    pub fn follow(&mut self, target: &BoundedRotator, rate: f32) {
        self.rotator.track_quat(target.product().conjugate(), rate);
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.rotator.matrix() * Mat4::from_translation(-self.position)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Back to the origin orientation, position untouched.
    pub fn reset_orientation(&mut self) {
        self.rotator.reset();
    }
}
