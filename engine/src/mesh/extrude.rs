//! Height-field Extrusion
//!
//! Surfaces built on top of the subdivider: every leaf triangle of a planar
//! subdivision is lifted by a caller-supplied height function and written as
//! a flat-shaded triangle. Used for terrain patches (rectangular form) and
//! for fins, pads and skin panels (disc form).
//!
//! Plane coordinates `(u, v)` map to world `(u, height, v)`. Triangles are
//! wound so that their normal points up (+Y) for a flat height function.

use glam::{Vec2, Vec3};

use super::subdivide::{Triangle2, subdivide_disc, subdivide_rect};
use super::vertex::{PositionNormal, Vertex, VertexBuffer};

/// Lift one leaf and push it with an upward-facing winding.
fn push_lifted<V, M>(buffer: &mut VertexBuffer<V>, corners: [Vec3; 3], make: &mut M)
where
    V: Vertex,
    M: FnMut(Vec3, Vec3) -> V,
{
    let [p0, mut p1, mut p2] = corners;
    let mut normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
    if normal.y < 0.0 {
        std::mem::swap(&mut p1, &mut p2);
        normal = -normal;
    }
    buffer.push_triangle([make(p0, normal), make(p1, normal), make(p2, normal)]);
}

/// Extrude the rectangle `min..max` with a custom vertex constructor.
/// Returns the number of triangles written.
pub fn extrude_heightfield_with<V, H, M>(
    buffer: &mut VertexBuffer<V>,
    level: u32,
    min: Vec2,
    max: Vec2,
    mut height: H,
    mut make: M,
) -> usize
where
    V: Vertex,
    H: FnMut(Vec2) -> f32,
    M: FnMut(Vec3, Vec3) -> V,
{
    let mut triangles = 0;
    subdivide_rect(level, min, max, |leaf: Triangle2| {
        let lifted = leaf.map(|p| Vec3::new(p.x, height(p), p.y));
        push_lifted(buffer, lifted, &mut make);
        triangles += 1;
    });
    triangles
}

/// Extrude the rectangle `min..max` into position/normal vertices.
pub fn extrude_heightfield<H>(
    buffer: &mut VertexBuffer<PositionNormal>,
    level: u32,
    min: Vec2,
    max: Vec2,
    height: H,
) -> usize
where
    H: FnMut(Vec2) -> f32,
{
    extrude_heightfield_with(buffer, level, min, max, height, PositionNormal::new)
}

/// Extrude a disc of `radius` around `center` with a custom vertex
/// constructor. `height` receives unit-disc coordinates and its result is
/// added to `center.y`.
pub fn extrude_disc_with<V, H, M>(
    buffer: &mut VertexBuffer<V>,
    level: u32,
    center: Vec3,
    radius: f32,
    mut height: H,
    mut make: M,
) -> usize
where
    V: Vertex,
    H: FnMut(Vec2) -> f32,
    M: FnMut(Vec3, Vec3) -> V,
{
    let mut triangles = 0;
    subdivide_disc(level, Vec2::NEG_ONE, Vec2::ONE, |leaf: Triangle2| {
        let lifted = leaf.map(|p| center + Vec3::new(p.x * radius, height(p), p.y * radius));
        push_lifted(buffer, lifted, &mut make);
        triangles += 1;
    });
    triangles
}

/// Extrude a disc into position/normal vertices.
pub fn extrude_disc<H>(
    buffer: &mut VertexBuffer<PositionNormal>,
    level: u32,
    center: Vec3,
    radius: f32,
    height: H,
) -> usize
where
    H: FnMut(Vec2) -> f32,
{
    extrude_disc_with(buffer, level, center, radius, height, PositionNormal::new)
}
