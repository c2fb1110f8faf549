//! Bounded Rotator
//!
//! Orientation kept as quaternions, either as one free product or as three
//! per-axis components with joint-like limits. Derived basis vectors and
//! matrices are rebuilt by [`BoundedRotator::make`] after every mutation.
//!
//! Axis bounds are stored as the minimum allowed cosine of the half-angle
//! (the quaternion's scalar part). An axis update that would drop below its
//! bound is silently discarded for that axis only.

use glam::{Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Rotation axis, in composition order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Rotation about X
    Pitch,
    /// Rotation about Y
    Yaw,
    /// Rotation about Z
    Roll,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Pitch, Axis::Yaw, Axis::Roll];

    pub fn index(self) -> usize {
        match self {
            Axis::Pitch => 0,
            Axis::Yaw => 1,
            Axis::Roll => 2,
        }
    }

    /// Single-axis rotation by `angle` radians.
    pub fn rotation(self, angle: f32) -> Quat {
        match self {
            Axis::Pitch => Quat::from_rotation_x(angle),
            Axis::Yaw => Quat::from_rotation_y(angle),
            Axis::Roll => Quat::from_rotation_z(angle),
        }
    }

    /// Keep only this axis' vector part of `q` and renormalize, with the
    /// scalar part made non-negative. Degenerate input yields identity.
    pub fn isolate(self, q: Quat) -> Quat {
        let v = match self {
            Axis::Pitch => Vec4::new(q.x, 0.0, 0.0, q.w),
            Axis::Yaw => Vec4::new(0.0, q.y, 0.0, q.w),
            Axis::Roll => Vec4::new(0.0, 0.0, q.z, q.w),
        };
        let v = if v.w < 0.0 { -v } else { v };
        let length = v.length();
        if length <= f32::EPSILON {
            Quat::IDENTITY
        } else {
            Quat::from_vec4(v / length)
        }
    }
}

/// Per-axis minimum scalar part (cosine of the half-angle).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl AxisBounds {
    /// Every rotation accepted
    pub const UNBOUNDED: Self = Self {
        pitch: -1.0,
        yaw: -1.0,
        roll: -1.0,
    };

    /// Bounds allowing at most `±angle` radians of rotation per axis.
    pub fn from_max_angles(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self {
            pitch: (pitch * 0.5).cos(),
            yaw: (yaw * 0.5).cos(),
            roll: (roll * 0.5).cos(),
        }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Pitch => self.pitch,
            Axis::Yaw => self.yaw,
            Axis::Roll => self.roll,
        }
    }

    /// Largest rotation in radians the bound on `axis` allows.
    pub fn max_angle(&self, axis: Axis) -> f32 {
        2.0 * self.get(axis).clamp(-1.0, 1.0).acos()
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

#[derive(Clone, Debug, PartialEq)]
enum RotationMode {
    Free,
    Bound {
        /// Pitch, yaw, roll components
        components: [Quat; 3],
        bounds: AxisBounds,
    },
}

/// Orientation of one animated entity.
///
/// Updated once per simulation tick via [`turn`](Self::turn) or
/// [`track`](Self::track); its matrices are read once per render tick.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedRotator {
    product: Quat,
    mode: RotationMode,
    right: Vec3,
    up: Vec3,
    front: Vec3,
    matrix: Mat4,
    transpose: Mat4,
}

impl Default for BoundedRotator {
    fn default() -> Self {
        Self::free()
    }
}

impl BoundedRotator {
    /// Unconstrained rotator at identity.
    pub fn free() -> Self {
        Self::with_mode(RotationMode::Free)
    }

    /// Per-axis constrained rotator at identity.
    pub fn bound(bounds: AxisBounds) -> Self {
        Self::with_mode(RotationMode::Bound {
            components: [Quat::IDENTITY; 3],
            bounds,
        })
    }

    fn with_mode(mode: RotationMode) -> Self {
        let mut rotator = Self {
            product: Quat::IDENTITY,
            mode,
            right: Vec3::X,
            up: Vec3::Y,
            front: Vec3::NEG_Z,
            matrix: Mat4::IDENTITY,
            transpose: Mat4::IDENTITY,
        };
        rotator.make();
        rotator
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.mode, RotationMode::Bound { .. })
    }

    /// Return to identity, keeping the mode and bounds.
    pub fn reset(&mut self) {
        self.product = Quat::IDENTITY;
        if let RotationMode::Bound { components, .. } = &mut self.mode {
            *components = [Quat::IDENTITY; 3];
        }
        self.make();
    }

    /// Rebuild basis vectors and matrices from the product quaternion.
    pub fn make(&mut self) {
        self.matrix = Mat4::from_quat(self.product);
        self.transpose = self.matrix.transpose();
        self.right = self.matrix.x_axis.truncate();
        self.up = self.matrix.y_axis.truncate();
        // Right-handed, so front is -Z
        self.front = -self.matrix.z_axis.truncate();
    }

    /// Apply incremental pitch, yaw and roll (radians).
    ///
    /// Free mode composes `pitch * yaw * roll * previous`. Bound mode updates
    /// each axis component on its own, skipping any axis whose result would
    /// fall below its bound, then recomposes `pitch * yaw * roll`.
    pub fn turn(&mut self, pitch: f32, yaw: f32, roll: f32) {
        let increments = [
            Axis::Pitch.rotation(pitch),
            Axis::Yaw.rotation(yaw),
            Axis::Roll.rotation(roll),
        ];

        match &mut self.mode {
            RotationMode::Free => {
                self.product =
                    (increments[0] * increments[1] * increments[2] * self.product).normalize();
            }
            RotationMode::Bound { components, bounds } => {
                for axis in Axis::ALL {
                    let i = axis.index();
                    let candidate = (increments[i] * components[i]).normalize();
                    if candidate.w >= bounds.get(axis) {
                        components[i] = candidate;
                    }
                }
                self.product = compose(components);
            }
        }
        self.make();
    }

    /// Slerp toward `other`'s orientation by `rate` in [0, 1].
    pub fn track(&mut self, other: &BoundedRotator, rate: f32) {
        self.track_quat(other.product, rate);
    }

    /// Slerp toward `target` by `rate` in [0, 1].
    ///
    /// In bound mode the blended rotation is split per axis by zeroing the
    /// other two vector components and renormalizing. That split is only
    /// exact for single-axis rotations; compound rotations come out
    /// approximately. Each axis is then accepted or kept as in `turn`.
    pub fn track_quat(&mut self, target: Quat, rate: f32) {
        let blended = self.product.slerp(target, rate.clamp(0.0, 1.0)).normalize();

        match &mut self.mode {
            RotationMode::Free => self.product = blended,
            RotationMode::Bound { components, bounds } => {
                for axis in Axis::ALL {
                    let candidate = axis.isolate(blended);
                    if candidate.w >= bounds.get(axis) {
                        components[axis.index()] = candidate;
                    }
                }
                self.product = compose(components);
            }
        }
        self.make();
    }

    /// Current orientation (local to world).
    pub fn product(&self) -> Quat {
        self.product
    }

    /// The component for `axis` in bound mode.
    pub fn axis_component(&self, axis: Axis) -> Option<Quat> {
        match &self.mode {
            RotationMode::Free => None,
            RotationMode::Bound { components, .. } => Some(components[axis.index()]),
        }
    }

    pub fn bounds(&self) -> Option<AxisBounds> {
        match &self.mode {
            RotationMode::Free => None,
            RotationMode::Bound { bounds, .. } => Some(*bounds),
        }
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Rotation matrix (local to world)
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Inverse rotation (world to local)
    pub fn transpose(&self) -> Mat4 {
        self.transpose
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.matrix.transform_vector3(local)
    }

    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.transpose.transform_vector3(world)
    }
}

fn compose(components: &[Quat; 3]) -> Quat {
    (components[0] * components[1] * components[2]).normalize()
}
