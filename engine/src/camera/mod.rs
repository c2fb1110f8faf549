//! Camera Module
//!
//! Orientation and viewpoint state for animated entities and the camera.
//! Window-system agnostic: it only deals with rotation state and matrix math.

pub mod controller;
pub mod rotator;

pub use controller::Camera;
pub use rotator::{Axis, AxisBounds, BoundedRotator};
