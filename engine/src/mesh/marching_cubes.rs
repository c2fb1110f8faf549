//! Marching Cubes Isosurface Extraction
//!
//! Walks a regular lattice, classifies every unit cube against a threshold
//! and emits triangles from the standard edge/triangle tables. Each emitted
//! triangle carries one flat normal derived from the cube's corner values.
//!
//! The scalar function is sampled at lattice points computed from integer
//! indices, so neighbouring cubes see bit-identical shared corners and the
//! resulting mesh has no cracks between cells.

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};
use super::vertex::{PositionNormal, VertexBuffer};
use crate::error::ConstructionError;

/// Values this close to the threshold, or to each other, snap to a corner.
pub const DEGENERATE_EPSILON: f32 = 1e-5;

/// Axis-aligned sampling lattice.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    pub min: Vec3,
    pub max: Vec3,
    pub step: f32,
}

impl Lattice {
    /// `max - min` should be a whole number of steps on every axis; the cube
    /// count per axis is rounded to the nearest integer.
    pub fn new(min: Vec3, max: Vec3, step: f32) -> Result<Self, ConstructionError> {
        let lattice = Self { min, max, step };
        lattice.validate()?;
        Ok(lattice)
    }

    /// Positive finite step, finite corners, `max >= min` on every axis.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ConstructionError::InvalidStep(self.step));
        }
        if self.max.cmplt(self.min).any() || !(self.min.is_finite() && self.max.is_finite()) {
            return Err(ConstructionError::InvertedLattice {
                min: self.min.to_array(),
                max: self.max.to_array(),
            });
        }
        Ok(())
    }

    /// Same `start..finish` range on all three axes.
    pub fn cube(start: f32, finish: f32, step: f32) -> Result<Self, ConstructionError> {
        Self::new(Vec3::splat(start), Vec3::splat(finish), step)
    }

    /// Number of unit cubes along each axis.
    pub fn cells(&self) -> UVec3 {
        ((self.max - self.min) / self.step).round().as_uvec3()
    }

    /// World position of lattice point `(i, j, k)`.
    #[inline]
    pub fn point(&self, i: u32, j: u32, k: u32) -> Vec3 {
        self.min + Vec3::new(i as f32, j as f32, k as f32) * self.step
    }
}

/// One extracted triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsoTriangle {
    pub vertices: [Vec3; 3],
    pub normal: Vec3,
}

/// Counters from one polygonization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolyStats {
    /// Unit cubes visited
    pub cubes: usize,
    /// Cubes whose edge-table entry was non-zero
    pub active_cubes: usize,
    /// Triangles handed to the emitter
    pub triangles: usize,
}

/// 8-bit configuration: bit `i` is set when corner `i` is below `threshold`.
pub fn cube_index(values: &[f32; 8], threshold: f32) -> u8 {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v < threshold)
        .fold(0u8, |index, (i, _)| index | (1 << i))
}

/// Crossing point on the edge `p1 -> p2`.
///
/// Snaps to `p1` when `v1` is at the threshold, to `p2` when `v2` is, and to
/// `p1` when the two values are too close to divide by.
pub fn interpolate_edge(threshold: f32, p1: Vec3, p2: Vec3, v1: f32, v2: f32) -> Vec3 {
    if (threshold - v1).abs() < DEGENERATE_EPSILON {
        return p1;
    }
    if (threshold - v2).abs() < DEGENERATE_EPSILON {
        return p2;
    }
    if (v1 - v2).abs() < DEGENERATE_EPSILON {
        return p1;
    }
    let mu = (threshold - v1) / (v2 - v1);
    p1 + (p2 - p1) * mu
}

/// Per axis: corners on the positive face minus corners on the negative face.
pub fn face_normal(values: &[f32; 8]) -> Vec3 {
    let v = values;
    let x = (v[1] + v[2] + v[5] + v[6]) - (v[0] + v[3] + v[4] + v[7]);
    let y = (v[2] + v[3] + v[6] + v[7]) - (v[0] + v[1] + v[4] + v[5]);
    let z = (v[4] + v[5] + v[6] + v[7]) - (v[0] + v[1] + v[2] + v[3]);
    Vec3::new(x, y, z).normalize_or_zero()
}

/// Polygonize one cube. Returns the number of triangles emitted, or `None`
/// when the surface does not cross the cube.
fn march_cube<E: FnMut(IsoTriangle)>(
    corners: &[Vec3; 8],
    values: &[f32; 8],
    threshold: f32,
    emit: &mut E,
) -> Option<usize> {
    let config = cube_index(values, threshold) as usize;
    let edges = EDGE_TABLE[config];
    if edges == 0 {
        return None;
    }

    let mut crossings = [Vec3::ZERO; 12];
    for (edge, &[a, b]) in EDGE_CORNERS.iter().enumerate() {
        if edges & (1 << edge) != 0 {
            crossings[edge] = interpolate_edge(threshold, corners[a], corners[b], values[a], values[b]);
        }
    }

    let normal = face_normal(values);
    let mut emitted = 0;
    for tri in TRI_TABLE[config].chunks_exact(3) {
        if tri[0] < 0 {
            break;
        }
        emit(IsoTriangle {
            vertices: [
                crossings[tri[0] as usize],
                crossings[tri[1] as usize],
                crossings[tri[2] as usize],
            ],
            normal,
        });
        emitted += 1;
    }
    Some(emitted)
}

/// Extract the `threshold` isosurface of `scalar` over `lattice`.
///
/// `scalar` is sampled at the eight corners of every cube; `emit` receives
/// each triangle in lattice order (x fastest, then y, then z).
pub fn poly<F, E>(
    lattice: &Lattice,
    threshold: f32,
    mut scalar: F,
    mut emit: E,
) -> Result<PolyStats, ConstructionError>
where
    F: FnMut(Vec3) -> f32,
    E: FnMut(IsoTriangle),
{
    lattice.validate()?;
    let cells = lattice.cells();
    let mut stats = PolyStats::default();

    for k in 0..cells.z {
        for j in 0..cells.y {
            for i in 0..cells.x {
                let mut corners = [Vec3::ZERO; 8];
                let mut values = [0.0f32; 8];
                for (c, offset) in CORNER_OFFSETS.iter().enumerate() {
                    corners[c] = lattice.point(
                        i + offset[0] as u32,
                        j + offset[1] as u32,
                        k + offset[2] as u32,
                    );
                    values[c] = scalar(corners[c]);
                }

                stats.cubes += 1;
                if let Some(emitted) = march_cube(&corners, &values, threshold, &mut emit) {
                    stats.active_cubes += 1;
                    stats.triangles += emitted;
                }
            }
        }
    }

    debug!(
        cubes = stats.cubes,
        active = stats.active_cubes,
        triangles = stats.triangles,
        "polygonized lattice"
    );
    Ok(stats)
}

/// Polygonize straight into a vertex buffer, three unindexed vertices per
/// triangle, each carrying the triangle's face normal.
pub fn polygonize_into<F>(
    lattice: &Lattice,
    threshold: f32,
    scalar: F,
    buffer: &mut VertexBuffer<PositionNormal>,
) -> Result<PolyStats, ConstructionError>
where
    F: FnMut(Vec3) -> f32,
{
    poly(lattice, threshold, scalar, |tri| {
        buffer.push_triangle(tri.vertices.map(|p| PositionNormal::new(p, tri.normal)));
    })
}
