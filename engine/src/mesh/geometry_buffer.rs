//! Geometry Buffer
//!
//! Growable float vertex store with an optional, independently growable
//! `u32` index store. Both stores grow to the next power of two that fits
//! the write, so appends are amortized O(1) and existing data is preserved.
//!
//! A buffer is meant to be reused: content generators `reset()` it and
//! regenerate whenever the owning entity is re-activated, then `finalize()`
//! it into an immutable [`DrawGeometry`] for the rendering backend.

use tracing::{debug, trace};

use super::schema::VertexSchema;
use crate::error::GeometryError;

/// Resize `store` so it holds at least `required` elements.
fn grow_to_fit<T: Copy + Default>(store: &mut Vec<T>, required: usize, name: &'static str) {
    if required > store.len() {
        let capacity = required.next_power_of_two();
        trace!(store = name, from = store.len(), to = capacity, "growing geometry storage");
        store.resize(capacity, T::default());
    }
}

/// Editable vertex/index source for one mesh.
#[derive(Clone, Debug)]
pub struct GeometryBuffer {
    schema: VertexSchema,
    /// Backing store; `len()` is the capacity, `vertex_len` the used prefix
    vertices: Vec<f32>,
    vertex_len: usize,
    indices: Vec<u32>,
    index_len: usize,
}

impl GeometryBuffer {
    pub fn new(schema: VertexSchema) -> Self {
        Self {
            schema,
            vertices: Vec::new(),
            vertex_len: 0,
            indices: Vec::new(),
            index_len: 0,
        }
    }

    /// Pre-allocate room for `vertex_capacity` vertices.
    pub fn with_capacity(schema: VertexSchema, vertex_capacity: usize) -> Self {
        let floats = vertex_capacity * schema.stride();
        Self {
            vertices: vec![0.0; floats],
            ..Self::new(schema)
        }
    }

    pub fn schema(&self) -> &VertexSchema {
        &self.schema
    }

    /// Append one vertex.
    ///
    /// # Panics
    /// If `values.len()` differs from the schema stride. Continuing would
    /// shift every later vertex, so this is treated as a contract violation.
    pub fn append(&mut self, values: &[f32]) {
        assert_eq!(
            values.len(),
            self.schema.stride(),
            "schema mismatch: vertex has {} values but the stride is {}",
            values.len(),
            self.schema.stride()
        );
        self.write_vertex(values);
    }

    /// Append one vertex, reporting a stride mismatch instead of panicking.
    pub fn try_append(&mut self, values: &[f32]) -> Result<(), GeometryError> {
        if values.len() != self.schema.stride() {
            return Err(GeometryError::SchemaMismatch {
                expected: self.schema.stride(),
                got: values.len(),
            });
        }
        self.write_vertex(values);
        Ok(())
    }

    pub(crate) fn write_vertex(&mut self, values: &[f32]) {
        let end = self.vertex_len + values.len();
        grow_to_fit(&mut self.vertices, end, "vertex");
        self.vertices[self.vertex_len..end].copy_from_slice(values);
        self.vertex_len = end;
    }

    pub fn append_index(&mut self, index: u32) {
        self.append_indices(&[index]);
    }

    pub fn append_indices(&mut self, indices: &[u32]) {
        let end = self.index_len + indices.len();
        grow_to_fit(&mut self.indices, end, "index");
        self.indices[self.index_len..end].copy_from_slice(indices);
        self.index_len = end;
    }

    pub fn append_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.append_indices(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_len / self.schema.stride()
    }

    pub fn index_count(&self) -> usize {
        self.index_len
    }

    pub fn has_indices(&self) -> bool {
        self.index_len > 0
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_len == 0
    }

    /// Allocated vertex storage, in floats
    pub fn capacity(&self) -> usize {
        self.vertices.len()
    }

    /// Allocated index storage, in indices
    pub fn index_capacity(&self) -> usize {
        self.indices.len()
    }

    /// Written vertex floats
    pub fn vertex_data(&self) -> &[f32] {
        &self.vertices[..self.vertex_len]
    }

    /// Written indices
    pub fn index_data(&self) -> &[u32] {
        &self.indices[..self.index_len]
    }

    /// The floats of vertex `i`, if it has been written.
    pub fn vertex(&self, i: usize) -> Option<&[f32]> {
        let stride = self.schema.stride();
        let start = i.checked_mul(stride)?;
        let end = start.checked_add(stride)?;
        self.vertex_data().get(start..end)
    }

    /// Index count when indexed, vertex count otherwise.
    pub fn draw_count(&self) -> usize {
        if self.has_indices() {
            self.index_count()
        } else {
            self.vertex_count()
        }
    }

    /// Forget all written data but keep the allocations.
    pub fn reset(&mut self) {
        self.vertex_len = 0;
        self.index_len = 0;
    }

    /// Pack the written data into an immutable draw representation.
    ///
    /// With `retain_source == false` the editable stores are released and the
    /// buffer is left empty (zero capacity).
    pub fn finalize(&mut self, retain_source: bool) -> DrawGeometry {
        let vertices: Box<[f32]> = self.vertex_data().into();
        let indices = self.has_indices().then(|| Box::<[u32]>::from(self.index_data()));
        let draw = DrawGeometry {
            schema: self.schema.clone(),
            vertex_count: self.vertex_count(),
            vertices,
            indices,
        };

        debug!(
            vertices = draw.vertex_count,
            indices = draw.index_count(),
            retain_source,
            "finalized geometry"
        );

        if !retain_source {
            self.vertices = Vec::new();
            self.indices = Vec::new();
            self.reset();
        }
        draw
    }

    /// Like [`finalize`](Self::finalize), but first checks that every index
    /// refers to a written vertex. The buffer is untouched on error.
    pub fn finalize_checked(&mut self, retain_source: bool) -> Result<DrawGeometry, GeometryError> {
        let vertex_count = self.vertex_count();
        if let Some(&index) = self.index_data().iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GeometryError::IndexOutOfRange { index, vertex_count });
        }
        Ok(self.finalize(retain_source))
    }

    /// Consume the buffer into its draw representation.
    pub fn into_draw(mut self) -> DrawGeometry {
        self.finalize(false)
    }
}

/// Immutable, tightly packed geometry ready for upload.
#[derive(Clone, Debug)]
pub struct DrawGeometry {
    schema: VertexSchema,
    vertices: Box<[f32]>,
    indices: Option<Box<[u32]>>,
    vertex_count: usize,
}

impl DrawGeometry {
    pub fn schema(&self) -> &VertexSchema {
        &self.schema
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, |i| i.len())
    }

    /// Elements the backend should draw: indices if present, else vertices.
    pub fn draw_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count,
        }
    }

    /// Vertex data as raw bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for buffer upload
    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.indices.as_deref().map(|i| bytemuck::cast_slice(i))
    }
}
