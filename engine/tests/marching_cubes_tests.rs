//! Marching Cubes Tests - Isosurface Extraction
//!
//! Sphere and plane surfaces extracted over regular lattices, checked for
//! vertex placement, normals and the empty cases.

use glam::Vec3;
use ghost_reef_engine::mesh::{
    IsoTriangle, Lattice, PositionNormal, VertexBuffer, poly, polygonize_into,
};

const RADIUS: f32 = 1.0;

fn sphere(p: Vec3) -> f32 {
    RADIUS - p.length()
}

fn collect(lattice: &Lattice, threshold: f32, scalar: impl FnMut(Vec3) -> f32) -> Vec<IsoTriangle> {
    let mut triangles = Vec::new();
    poly(lattice, threshold, scalar, |t| triangles.push(t)).unwrap();
    triangles
}

// ============================================================================
// Sphere Tests
// ============================================================================

#[test]
fn test_sphere_vertices_lie_on_radius() {
    let lattice = Lattice::cube(-1.5, 1.5, 0.1).unwrap();
    let triangles = collect(&lattice, 0.0, sphere);

    assert!(!triangles.is_empty());
    for tri in &triangles {
        for v in tri.vertices {
            let r = v.length();
            assert!((r - RADIUS).abs() < 0.01, "vertex {v} at radius {r}");
        }
    }
}

#[test]
fn test_sphere_normals_are_unit_or_zero() {
    let lattice = Lattice::cube(-1.5, 1.5, 0.25).unwrap();
    for tri in collect(&lattice, 0.0, sphere) {
        let len = tri.normal.length();
        assert!(len == 0.0 || (len - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_sphere_normals_follow_increasing_field() {
    // The field grows toward the center, so the normal points inward.
    let lattice = Lattice::cube(-1.5, 1.5, 0.1).unwrap();
    for tri in collect(&lattice, 0.0, sphere) {
        let centroid = (tri.vertices[0] + tri.vertices[1] + tri.vertices[2]) / 3.0;
        assert!(tri.normal.dot(centroid) < 0.0);
    }
}

#[test]
fn test_threshold_shifts_radius() {
    // R - |p| = 0.5  =>  |p| = 0.5
    let lattice = Lattice::cube(-1.0, 1.0, 0.05).unwrap();
    for tri in collect(&lattice, 0.5, sphere) {
        for v in tri.vertices {
            assert!((v.length() - 0.5).abs() < 0.01);
        }
    }
}

// ============================================================================
// Empty Lattice Tests
// ============================================================================

#[test]
fn test_lattice_entirely_outside_emits_nothing() {
    let lattice = Lattice::new(Vec3::splat(2.0), Vec3::splat(3.0), 0.1).unwrap();
    let mut count = 0;
    let stats = poly(&lattice, 0.0, sphere, |_| count += 1).unwrap();

    assert_eq!(count, 0);
    assert_eq!(stats.triangles, 0);
    assert_eq!(stats.active_cubes, 0);
    assert_eq!(stats.cubes, 1000);
}

#[test]
fn test_lattice_entirely_inside_emits_nothing() {
    let lattice = Lattice::cube(-0.4, 0.4, 0.1).unwrap();
    assert!(collect(&lattice, 0.0, sphere).is_empty());
}

#[test]
fn test_zero_volume_lattice_visits_nothing() {
    let lattice = Lattice::cube(0.0, 0.0, 0.1).unwrap();
    let stats = poly(&lattice, 0.0, sphere, |_| {}).unwrap();
    assert_eq!(stats.cubes, 0);
}

// ============================================================================
// Plane and Buffer Tests
// ============================================================================

#[test]
fn test_tilted_plane_vertices_on_plane() {
    let n = Vec3::new(1.0, 2.0, -0.5).normalize();
    let lattice = Lattice::cube(-1.0, 1.0, 0.2).unwrap();
    let triangles = collect(&lattice, 0.1, |p| p.dot(n));

    assert!(!triangles.is_empty());
    for tri in &triangles {
        for v in tri.vertices {
            assert!((v.dot(n) - 0.1).abs() < 1e-4);
        }
        assert!(tri.normal.dot(n) > 0.9);
    }
}

#[test]
fn test_polygonize_into_buffer() {
    let lattice = Lattice::cube(-1.5, 1.5, 0.2).unwrap();
    let mut buffer = VertexBuffer::<PositionNormal>::new();
    let stats = polygonize_into(&lattice, 0.0, sphere, &mut buffer).unwrap();

    assert_eq!(buffer.vertex_count(), stats.triangles * 3);
    let geometry = buffer.finalize(false);
    assert_eq!(geometry.draw_count(), stats.triangles * 3);
    assert!(geometry.indices().is_none());
    assert!(buffer.is_empty());
}

#[test]
fn test_same_inputs_same_mesh() {
    let lattice = Lattice::cube(-1.5, 1.5, 0.3).unwrap();
    assert_eq!(collect(&lattice, 0.0, sphere), collect(&lattice, 0.0, sphere));
}
