//! Typed Vertices
//!
//! `Pod` vertex structs with a compile-time attribute layout, and a typed
//! builder over [`GeometryBuffer`]. Pushing a whole struct always writes
//! exactly one stride of floats, so a schema mismatch cannot be expressed.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use static_assertions::assert_eq_size;
use std::marker::PhantomData;

use super::geometry_buffer::{DrawGeometry, GeometryBuffer};
use super::schema::{AttributeSlot, VertexSchema};

/// Sum of component counts in a layout.
pub const fn layout_stride(layout: &[(AttributeSlot, usize)]) -> usize {
    let mut stride = 0;
    let mut i = 0;
    while i < layout.len() {
        stride += layout[i].1;
        i += 1;
    }
    stride
}

/// A plain-old-data vertex made only of `f32` components.
pub trait Vertex: Pod {
    /// Attribute slots and component counts, in field order.
    const LAYOUT: &'static [(AttributeSlot, usize)];

    fn schema() -> VertexSchema {
        VertexSchema::from_layout(Self::LAYOUT)
    }
}

/// Position only
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

/// Position + flat or smooth normal (marching cubes, extrusions)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PositionNormal {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Position, normal and RGBA color (terrain and creature skins)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

assert_eq_size!(PositionVertex, [f32; 3]);
assert_eq_size!(PositionNormal, [f32; 6]);
assert_eq_size!(MeshVertex, [f32; 10]);

impl Vertex for PositionVertex {
    const LAYOUT: &'static [(AttributeSlot, usize)] = &[(AttributeSlot::Position, 3)];
}

impl Vertex for PositionNormal {
    const LAYOUT: &'static [(AttributeSlot, usize)] =
        &[(AttributeSlot::Position, 3), (AttributeSlot::Normal, 3)];
}

impl Vertex for MeshVertex {
    const LAYOUT: &'static [(AttributeSlot, usize)] = &[
        (AttributeSlot::Position, 3),
        (AttributeSlot::Normal, 3),
        (AttributeSlot::Color, 4),
    ];
}

impl PositionVertex {
    pub fn new(position: Vec3) -> Self {
        Self { position: position.to_array() }
    }
}

impl PositionNormal {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }
}

/// Typed builder over a [`GeometryBuffer`] whose schema comes from `V`.
#[derive(Clone, Debug)]
pub struct VertexBuffer<V: Vertex> {
    inner: GeometryBuffer,
    _vertex: PhantomData<V>,
}

impl<V: Vertex> VertexBuffer<V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(vertex_capacity: usize) -> Self {
        const {
            assert!(
                layout_stride(V::LAYOUT) * std::mem::size_of::<f32>() == std::mem::size_of::<V>(),
                "vertex layout does not match the vertex size"
            )
        };
        Self {
            inner: GeometryBuffer::with_capacity(V::schema(), vertex_capacity),
            _vertex: PhantomData,
        }
    }

    /// Append a vertex and return its index.
    pub fn push(&mut self, vertex: V) -> u32 {
        let index = self.inner.vertex_count() as u32;
        self.inner
            .write_vertex(bytemuck::cast_slice(std::slice::from_ref(&vertex)));
        index
    }

    /// Append three unindexed vertices.
    pub fn push_triangle(&mut self, triangle: [V; 3]) {
        for vertex in triangle {
            self.push(vertex);
        }
    }

    pub fn append_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.inner.append_triangle(a, b, c);
    }

    pub fn append_indices(&mut self, indices: &[u32]) {
        self.inner.append_indices(indices);
    }

    /// Written vertices, viewed as `V`.
    pub fn vertices(&self) -> &[V] {
        bytemuck::cast_slice(self.inner.vertex_data())
    }

    pub fn get(&self, i: usize) -> Option<&V> {
        self.vertices().get(i)
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn finalize(&mut self, retain_source: bool) -> DrawGeometry {
        self.inner.finalize(retain_source)
    }

    /// The underlying untyped buffer.
    pub fn geometry(&self) -> &GeometryBuffer {
        &self.inner
    }

    pub fn into_geometry(self) -> GeometryBuffer {
        self.inner
    }
}

impl<V: Vertex> Default for VertexBuffer<V> {
    fn default() -> Self {
        Self::new()
    }
}
