//! Geometry Buffer Tests - Growth, Reuse and Finalization

use ghost_reef_engine::error::{ConstructionError, GeometryError};
use ghost_reef_engine::mesh::{
    AttributeSlot, GeometryBuffer, MeshVertex, PositionNormal, Vertex, VertexBuffer, VertexSchema,
};
use glam::Vec3;

fn schema(stride: usize) -> VertexSchema {
    VertexSchema::new(&[(AttributeSlot::Position, stride)]).unwrap()
}

// ============================================================================
// Schema Tests
// ============================================================================

#[test]
fn test_schema_offsets_and_stride() {
    let schema = VertexSchema::new(&[
        (AttributeSlot::Position, 3),
        (AttributeSlot::TexCoord, 2),
        (AttributeSlot::Custom(0), 1),
    ])
    .unwrap();

    assert_eq!(schema.stride(), 6);
    assert_eq!(schema.byte_stride(), 24);
    assert_eq!(schema.attribute(AttributeSlot::TexCoord).unwrap().offset, 3);
    assert_eq!(schema.attribute(AttributeSlot::Custom(0)).unwrap().byte_offset(), 20);
    assert!(schema.attribute(AttributeSlot::Normal).is_none());
}

#[test]
fn test_schema_rejects_invalid_declarations() {
    assert_eq!(VertexSchema::new(&[]), Err(ConstructionError::EmptySchema));
    assert_eq!(
        VertexSchema::new(&[(AttributeSlot::Color, 0)]),
        Err(ConstructionError::ZeroComponents { slot: AttributeSlot::Color })
    );
    assert_eq!(
        VertexSchema::new(&[(AttributeSlot::Position, 3), (AttributeSlot::Position, 2)]),
        Err(ConstructionError::DuplicateAttribute { slot: AttributeSlot::Position })
    );
}

// ============================================================================
// Growth Tests
// ============================================================================

#[test]
fn test_capacity_is_next_power_of_two() {
    let stride = 3;
    let mut buffer = GeometryBuffer::new(schema(stride));
    for n in 1..=50usize {
        buffer.append(&[n as f32; 3]);
        assert_eq!(buffer.capacity(), (n * stride).next_power_of_two());
    }
}

#[test]
fn test_growth_preserves_existing_values() {
    let mut buffer = GeometryBuffer::new(schema(2));
    for i in 0..100 {
        buffer.append(&[i as f32, -(i as f32)]);
    }
    for i in 0..100 {
        assert_eq!(buffer.vertex(i), Some(&[i as f32, -(i as f32)][..]));
    }
    assert_eq!(buffer.vertex(100), None);
}

#[test]
fn test_index_store_grows_independently() {
    let mut buffer = GeometryBuffer::new(schema(3));
    buffer.append(&[0.0; 3]);
    for _ in 0..10 {
        buffer.append_triangle(0, 0, 0);
    }
    assert_eq!(buffer.index_count(), 30);
    assert_eq!(buffer.index_capacity(), 32);
    assert_eq!(buffer.capacity(), 4);
}

#[test]
#[should_panic(expected = "schema mismatch")]
fn test_append_wrong_arity_panics() {
    let mut buffer = GeometryBuffer::new(schema(3));
    buffer.append(&[1.0, 2.0]);
}

#[test]
fn test_try_append_reports_mismatch() {
    let mut buffer = GeometryBuffer::new(schema(3));
    assert_eq!(
        buffer.try_append(&[1.0; 4]),
        Err(GeometryError::SchemaMismatch { expected: 3, got: 4 })
    );
    assert!(buffer.is_empty());
}

// ============================================================================
// Reset and Finalize Tests
// ============================================================================

#[test]
fn test_reset_keeps_allocation() {
    let mut buffer = GeometryBuffer::new(schema(4));
    for _ in 0..20 {
        buffer.append(&[1.0; 4]);
    }
    let capacity = buffer.capacity();
    buffer.reset();

    assert!(buffer.is_empty());
    assert_eq!(buffer.vertex_count(), 0);
    assert_eq!(buffer.capacity(), capacity);

    buffer.append(&[2.0; 4]);
    assert_eq!(buffer.vertex_data(), &[2.0; 4]);
}

#[test]
fn test_finalize_unindexed_draws_vertices() {
    let mut buffer = GeometryBuffer::new(schema(3));
    for i in 0..6 {
        buffer.append(&[i as f32; 3]);
    }
    let draw = buffer.finalize(true);

    assert_eq!(draw.draw_count(), 6);
    assert_eq!(draw.vertices().len(), 18);
    assert!(draw.index_bytes().is_none());
    assert_eq!(draw.vertex_bytes().len(), 18 * 4);
    // Source retained
    assert_eq!(buffer.vertex_count(), 6);
}

#[test]
fn test_finalize_indexed_draws_indices() {
    let mut buffer = GeometryBuffer::new(schema(3));
    for _ in 0..4 {
        buffer.append(&[0.0; 3]);
    }
    buffer.append_indices(&[0, 1, 2, 0, 2, 3]);
    let draw = buffer.finalize(false);

    assert_eq!(draw.draw_count(), 6);
    assert_eq!(draw.vertex_count(), 4);
    assert_eq!(draw.indices(), Some(&[0, 1, 2, 0, 2, 3][..]));
    // Source released
    assert_eq!(buffer.capacity(), 0);
    assert_eq!(buffer.index_capacity(), 0);
}

#[test]
fn test_finalize_checked_rejects_dangling_index() {
    let mut buffer = GeometryBuffer::new(schema(3));
    buffer.append(&[0.0; 3]);
    buffer.append_triangle(0, 0, 5);

    assert_eq!(
        buffer.finalize_checked(false).err(),
        Some(GeometryError::IndexOutOfRange { index: 5, vertex_count: 1 })
    );
    assert_eq!(buffer.index_count(), 3);
}

// ============================================================================
// Typed Vertex Buffer Tests
// ============================================================================

#[test]
fn test_typed_push_returns_indices() {
    let mut buffer = VertexBuffer::<PositionNormal>::new();
    let a = buffer.push(PositionNormal::new(Vec3::ZERO, Vec3::Y));
    let b = buffer.push(PositionNormal::new(Vec3::X, Vec3::Y));
    let c = buffer.push(PositionNormal::new(Vec3::Z, Vec3::Y));
    buffer.append_triangle(a, b, c);

    assert_eq!((a, b, c), (0, 1, 2));
    assert_eq!(buffer.get(1).map(|v| v.position), Some([1.0, 0.0, 0.0]));
    assert_eq!(buffer.geometry().vertex_data().len(), 18);

    let draw = buffer.finalize(false);
    assert_eq!(draw.schema(), &PositionNormal::schema());
    assert_eq!(draw.draw_count(), 3);
}

#[test]
fn test_typed_buffer_matches_untyped_layout() {
    let color = [1.0, 0.5, 0.25, 1.0];
    let mut typed = VertexBuffer::<MeshVertex>::with_capacity(4);
    typed.push(MeshVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Z, color));

    let mut untyped = GeometryBuffer::new(MeshVertex::schema());
    untyped.append(&[1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 1.0, 0.5, 0.25, 1.0]);

    assert_eq!(typed.geometry().vertex_data(), untyped.vertex_data());
}
