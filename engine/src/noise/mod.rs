//! Noise Module
//!
//! Seeded pseudo-random streams and the value-noise fields built from them.
//! Every field is an independent, explicitly seeded instance; once built it
//! is immutable and can be shared across any number of readers.

pub mod prng;
pub mod value_noise;

pub use prng::{Lcg, unit_f32};
pub use value_noise::{
    Interpolation, NoiseAxis, NoiseField1D, NoiseField2D, NoiseField3D, ValueNoise,
};
