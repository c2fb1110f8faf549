//! Value Noise Fields
//!
//! A periodic scalar function interpolated between PRNG-filled grid cells.
//! One const-generic type covers the 1D, 2D and 3D variants; the grid is
//! flattened x-fastest and filled in index order from the seeded stream,
//! then never written again.
//!
//! Lookups wrap around the grid (never clamp), so a field with `size` cells
//! and `period` p repeats every `size / p` units along that axis.

use glam::Vec3;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use tracing::debug;

use super::prng::{Lcg, unit_f32};
use crate::error::ConstructionError;

/// Interpolation kernel between two neighbouring grid samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// `y1 * (1 - mu) + y2 * mu`
    #[default]
    Linear,
    /// Linear blend on `(1 - cos(mu * PI)) / 2`
    Cosine,
}

impl Interpolation {
    /// Blend `y1` toward `y2` by `mu` in [0, 1].
    #[inline]
    pub fn blend(self, y1: f32, y2: f32, mu: f32) -> f32 {
        let mu = match self {
            Interpolation::Linear => mu,
            Interpolation::Cosine => (1.0 - (mu * PI).cos()) * 0.5,
        };
        y1 * (1.0 - mu) + y2 * mu
    }
}

/// Grid size and sampling period of one noise axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseAxis {
    /// Number of grid cells along the axis
    pub size: usize,
    /// Grid cells per world unit
    pub period: f32,
}

impl NoiseAxis {
    pub fn new(size: usize, period: f32) -> Self {
        Self { size, period }
    }

    /// World-space length after which the axis repeats.
    pub fn wavelength(&self) -> f32 {
        self.size as f32 / self.period
    }

    /// Lower cell, upper cell and fractional position for a coordinate.
    #[inline]
    fn locate(&self, coord: f32) -> (usize, usize, f32) {
        let f = self.period * coord.abs();
        let floor = f.floor();
        let mu = f - floor;
        // float -> u64 saturates, so huge coordinates still land in the grid
        let lo = (floor as u64 % self.size as u64) as usize;
        (lo, (lo + 1) % self.size, mu)
    }
}

/// Seeded value noise over `N` axes (1 to 3).
#[derive(Clone, Debug)]
pub struct ValueNoise<const N: usize> {
    seed: Option<u32>,
    amplitude: f32,
    axes: [NoiseAxis; N],
    interpolation: Interpolation,
    grid: Box<[f32]>,
}

/// Scalar noise along a line
pub type NoiseField1D = ValueNoise<1>;
/// Scalar noise over a plane
pub type NoiseField2D = ValueNoise<2>;
/// Scalar noise over a volume
pub type NoiseField3D = ValueNoise<3>;

// Built fields are shared read-only across generators.
static_assertions::assert_impl_all!(NoiseField1D: Send, Sync);
static_assertions::assert_impl_all!(NoiseField2D: Send, Sync);
static_assertions::assert_impl_all!(NoiseField3D: Send, Sync);

impl<const N: usize> ValueNoise<N> {
    /// Build a field from an integer seed using the engine's [`Lcg`].
    pub fn new(seed: u32, amplitude: f32, axes: [NoiseAxis; N]) -> Result<Self, ConstructionError> {
        let mut rng = Lcg::new(seed);
        let mut field = Self::from_rng(&mut rng, amplitude, axes)?;
        field.seed = Some(seed);
        Ok(field)
    }

    /// Build a field by drawing its grid from a caller-owned stream.
    ///
    /// The stream advances by exactly one draw per grid cell, so several
    /// fields can be taken from one seeded generator reproducibly.
    pub fn from_rng<R: RngCore + ?Sized>(
        rng: &mut R,
        amplitude: f32,
        axes: [NoiseAxis; N],
    ) -> Result<Self, ConstructionError> {
        const { assert!(N >= 1 && N <= 3, "value noise supports 1 to 3 axes") };

        if !amplitude.is_finite() {
            return Err(ConstructionError::InvalidAmplitude(amplitude));
        }
        for (axis, a) in axes.iter().enumerate() {
            if a.size == 0 {
                return Err(ConstructionError::EmptyNoiseAxis { axis });
            }
            if !a.period.is_finite() || a.period < 0.0 {
                return Err(ConstructionError::InvalidPeriod { axis, period: a.period });
            }
        }

        let cells: usize = axes.iter().map(|a| a.size).product();
        let grid: Box<[f32]> = (0..cells).map(|_| unit_f32(rng)).collect();

        debug!(dims = N, cells, amplitude, "built value noise field");

        Ok(Self {
            seed: None,
            amplitude,
            axes,
            interpolation: Interpolation::Linear,
            grid,
        })
    }

    /// Switch the interpolation kernel. The grid is untouched.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sample the field at an `N`-dimensional coordinate.
    pub fn sample(&self, coords: [f32; N]) -> f32 {
        let mut lo = [0usize; N];
        let mut hi = [0usize; N];
        let mut mu = [0.0f32; N];
        for a in 0..N {
            (lo[a], hi[a], mu[a]) = self.axes[a].locate(coords[a]);
        }

        // Corner c takes the upper cell on axis a when bit a of c is set.
        let count = 1usize << N;
        let mut corners = [0.0f32; 8];
        for (c, corner) in corners.iter_mut().take(count).enumerate() {
            let mut index = 0;
            let mut stride = 1;
            for a in 0..N {
                let cell = if (c >> a) & 1 == 1 { hi[a] } else { lo[a] };
                index += cell * stride;
                stride *= self.axes[a].size;
            }
            *corner = self.grid[index];
        }

        // Collapse one axis at a time: pairs (2c, 2c+1) differ only on axis a.
        let mut live = count;
        for &m in &mu {
            live /= 2;
            for c in 0..live {
                corners[c] = self.interpolation.blend(corners[2 * c], corners[2 * c + 1], m);
            }
        }

        corners[0] * self.amplitude
    }

    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn axes(&self) -> &[NoiseAxis; N] {
        &self.axes
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Raw grid samples in [0, 1), x-fastest.
    pub fn grid(&self) -> &[f32] {
        &self.grid
    }
}

impl ValueNoise<1> {
    /// 1D field: `size` cells sampled at `period` cells per unit.
    pub fn line(seed: u32, amplitude: f32, size: usize, period: f32) -> Result<Self, ConstructionError> {
        Self::new(seed, amplitude, [NoiseAxis::new(size, period)])
    }

    pub fn get(&self, x: f32) -> f32 {
        self.sample([x])
    }
}

impl ValueNoise<2> {
    pub fn plane(seed: u32, amplitude: f32, x: NoiseAxis, y: NoiseAxis) -> Result<Self, ConstructionError> {
        Self::new(seed, amplitude, [x, y])
    }

    pub fn get(&self, x: f32, y: f32) -> f32 {
        self.sample([x, y])
    }
}

impl ValueNoise<3> {
    pub fn volume(
        seed: u32,
        amplitude: f32,
        x: NoiseAxis,
        y: NoiseAxis,
        z: NoiseAxis,
    ) -> Result<Self, ConstructionError> {
        Self::new(seed, amplitude, [x, y, z])
    }

    pub fn get(&self, x: f32, y: f32, z: f32) -> f32 {
        self.sample([x, y, z])
    }

    /// Convenience for scalar-field closures that work in `Vec3`.
    pub fn get_vec(&self, p: Vec3) -> f32 {
        self.sample([p.x, p.y, p.z])
    }
}
