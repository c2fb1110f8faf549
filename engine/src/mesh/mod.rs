//! Mesh Module
//!
//! Procedural geometry generation and the buffers it is written into.
//!
//! - [`subdivide`] - recursive rectangle/triangle quadrisection, optional disc mask
//! - [`extrude`] - height-field and disc surfaces on top of the subdivider
//! - [`marching_cubes`] - table-driven isosurface extraction
//! - [`geometry_buffer`] - growable vertex/index store and its draw-ready form
//! - [`vertex`] - typed `Pod` vertices and the typed buffer builder

pub mod extrude;
pub mod geometry_buffer;
pub mod marching_cubes;
pub mod schema;
pub mod subdivide;
pub mod tables;
pub mod vertex;

pub use extrude::{extrude_disc, extrude_disc_with, extrude_heightfield, extrude_heightfield_with};
pub use geometry_buffer::{DrawGeometry, GeometryBuffer};
pub use marching_cubes::{
    DEGENERATE_EPSILON, IsoTriangle, Lattice, PolyStats, cube_index, face_normal, interpolate_edge,
    poly, polygonize_into,
};
pub use schema::{Attribute, AttributeSlot, VertexSchema};
pub use subdivide::{Triangle2, leaf_count, subdivide_disc, subdivide_rect, subdivide_triangle};
pub use vertex::{MeshVertex, PositionNormal, PositionVertex, Vertex, VertexBuffer};
