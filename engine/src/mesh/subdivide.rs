//! Triangle Subdivision
//!
//! Uniform recursive quadrisection. A rectangle becomes two triangles, and
//! every triangle splits into four through its edge midpoints until the level
//! runs out. The leaf order is fixed so per-leaf attributes (colors, pattern
//! lookups) land on the same triangles every time.
//!
//! Split order for a triangle `(a, b, c)` with midpoints `ab`, `bc`, `ca`:
//! `(a, ab, ca)`, `(ab, b, bc)`, `(ca, bc, c)`, `(ab, bc, ca)`.

use glam::Vec2;

/// A 2D triangle as three corners.
pub type Triangle2 = [Vec2; 3];

/// Number of leaves the rectangular form produces at `level`.
pub fn leaf_count(level: u32) -> usize {
    2 * 4usize.pow(level)
}

/// The two root triangles of the rectangle spanned by `min` and `max`.
pub fn rect_triangles(min: Vec2, max: Vec2) -> [Triangle2; 2] {
    let (x0, y0, x1, y1) = (min.x, min.y, max.x, max.y);
    [
        [Vec2::new(x0, y0), Vec2::new(x1, y0), Vec2::new(x1, y1)],
        [Vec2::new(x0, y0), Vec2::new(x1, y1), Vec2::new(x0, y1)],
    ]
}

/// Subdivide a triangle `level` times, calling `callback` for each leaf.
pub fn subdivide_triangle<F: FnMut(Triangle2)>(level: u32, triangle: Triangle2, mut callback: F) {
    split(level, triangle, false, &mut callback);
}

/// Subdivide the rectangle `min..max`; exactly [`leaf_count`]`(level)` leaves.
pub fn subdivide_rect<F: FnMut(Triangle2)>(level: u32, min: Vec2, max: Vec2, mut callback: F) {
    for root in rect_triangles(min, max) {
        split(level, root, false, &mut callback);
    }
}

/// Like [`subdivide_rect`], but only leaves whose centroid lies inside the
/// unit circle are emitted. Pass `[-1, 1]²` to tile a disc.
pub fn subdivide_disc<F: FnMut(Triangle2)>(level: u32, min: Vec2, max: Vec2, mut callback: F) {
    for root in rect_triangles(min, max) {
        split(level, root, true, &mut callback);
    }
}

fn split<F: FnMut(Triangle2)>(level: u32, [a, b, c]: Triangle2, disc_mask: bool, callback: &mut F) {
    if level == 0 {
        let centroid = (a + b + c) / 3.0;
        if !disc_mask || centroid.length_squared() <= 1.0 {
            callback([a, b, c]);
        }
        return;
    }

    let ab = (a + b) * 0.5;
    let bc = (b + c) * 0.5;
    let ca = (c + a) * 0.5;
    let next = level - 1;
    split(next, [a, ab, ca], disc_mask, callback);
    split(next, [ab, b, bc], disc_mask, callback);
    split(next, [ca, bc, c], disc_mask, callback);
    split(next, [ab, bc, ca], disc_mask, callback);
}
