//! Ghost Reef Engine Library
//!
//! The procedural geometry core behind the reef scenes: seeded value noise,
//! isosurface and subdivision mesh generators, growable vertex buffers and
//! bounded quaternion orientation for swimming creatures and the camera.
//!
//! The core is pure computation. It touches no GPU, window or file system;
//! draw-ready data leaves as plain slices ([`mesh::DrawGeometry`]) for
//! whatever renderer hosts it.
//!
//! # Modules
//!
//! - [`noise`] - LCG stream and 1D/2D/3D value-noise fields
//! - [`mesh`] - vertex schemas, geometry buffers, marching cubes, subdivision, extrusion
//! - [`camera`] - bounded rotator and the camera built on it
//! - [`config`] - serde-loadable generator parameters
//! - [`logging`] - optional `tracing` subscriber setup
//!
//! # Example
//!
//! ```ignore
//! use ghost_reef_engine::mesh::{Lattice, PositionNormal, VertexBuffer, polygonize_into};
//! use ghost_reef_engine::noise::{NoiseAxis, NoiseField3D};
//!
//! let axis = NoiseAxis::new(8, 4.0);
//! let noise = NoiseField3D::volume(7, 0.2, axis, axis, axis)?;
//! let lattice = Lattice::cube(-1.5, 1.5, 0.1)?;
//!
//! let mut buffer = VertexBuffer::<PositionNormal>::new();
//! polygonize_into(&lattice, 0.0, |p| 1.0 - p.length() + noise.get_vec(p), &mut buffer)?;
//!
//! let geometry = buffer.finalize(false);
//! // upload geometry.vertex_bytes() and draw geometry.draw_count() vertices
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod logging;
pub mod mesh;
pub mod noise;

pub use camera::{Axis, AxisBounds, BoundedRotator, Camera};
pub use config::{GeneratorConfig, NoiseConfig, RotatorConfig, SurfaceConfig};
pub use error::{ConfigError, ConstructionError, GeometryError};
pub use logging::{LogLevel, init_tracing, init_tracing_default};
pub use mesh::{DrawGeometry, GeometryBuffer, VertexBuffer, VertexSchema};
pub use noise::{Lcg, NoiseField1D, NoiseField2D, NoiseField3D, ValueNoise};
