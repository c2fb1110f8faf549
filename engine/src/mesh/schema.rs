//! Vertex Schema
//!
//! Ordered attribute declarations for a packed float vertex store. The
//! rendering backend reads offsets and sizes from here when binding buffers.

use crate::error::ConstructionError;

/// Attribute slot identifiers understood by the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeSlot {
    Position,
    Normal,
    Color,
    TexCoord,
    /// Generator-specific extra channel (skin pattern weights, etc.)
    Custom(u8),
}

/// One attribute within a vertex, measured in floats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub slot: AttributeSlot,
    /// Number of f32 components
    pub components: usize,
    /// Offset from the start of the vertex, in floats
    pub offset: usize,
}

impl Attribute {
    /// Offset from the start of the vertex, in bytes
    pub fn byte_offset(&self) -> usize {
        self.offset * std::mem::size_of::<f32>()
    }
}

/// Fixed attribute layout, declared once per buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexSchema {
    attributes: Vec<Attribute>,
    stride: usize,
}

impl VertexSchema {
    /// Build a schema from `(slot, component_count)` pairs in vertex order.
    pub fn new(declaration: &[(AttributeSlot, usize)]) -> Result<Self, ConstructionError> {
        if declaration.is_empty() {
            return Err(ConstructionError::EmptySchema);
        }

        let mut attributes: Vec<Attribute> = Vec::with_capacity(declaration.len());
        let mut offset = 0;
        for &(slot, components) in declaration {
            if components == 0 {
                return Err(ConstructionError::ZeroComponents { slot });
            }
            if attributes.iter().any(|a| a.slot == slot) {
                return Err(ConstructionError::DuplicateAttribute { slot });
            }
            attributes.push(Attribute { slot, components, offset });
            offset += components;
        }

        Ok(Self { attributes, stride: offset })
    }

    /// Schema for a compile-time vertex layout. Layouts of the built-in
    /// vertex types are checked by their tests, so no validation here.
    pub(crate) fn from_layout(layout: &[(AttributeSlot, usize)]) -> Self {
        let mut offset = 0;
        let attributes = layout
            .iter()
            .map(|&(slot, components)| {
                let attribute = Attribute { slot, components, offset };
                offset += components;
                attribute
            })
            .collect();
        Self { attributes, stride: offset }
    }

    /// Floats per vertex
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes per vertex
    pub fn byte_stride(&self) -> usize {
        self.stride * std::mem::size_of::<f32>()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up the layout of one slot.
    pub fn attribute(&self, slot: AttributeSlot) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.slot == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_accumulate() {
        let schema = VertexSchema::new(&[
            (AttributeSlot::Position, 3),
            (AttributeSlot::Normal, 3),
            (AttributeSlot::TexCoord, 2),
        ])
        .unwrap();

        assert_eq!(schema.stride(), 8);
        assert_eq!(schema.byte_stride(), 32);
        let uv = schema.attribute(AttributeSlot::TexCoord).unwrap();
        assert_eq!(uv.offset, 6);
        assert_eq!(uv.byte_offset(), 24);
        assert!(schema.attribute(AttributeSlot::Color).is_none());
    }

    #[test]
    fn test_rejects_bad_declarations() {
        assert_eq!(VertexSchema::new(&[]), Err(ConstructionError::EmptySchema));
        assert_eq!(
            VertexSchema::new(&[(AttributeSlot::Position, 0)]),
            Err(ConstructionError::ZeroComponents { slot: AttributeSlot::Position })
        );
        assert_eq!(
            VertexSchema::new(&[(AttributeSlot::Custom(1), 1), (AttributeSlot::Custom(1), 2)]),
            Err(ConstructionError::DuplicateAttribute { slot: AttributeSlot::Custom(1) })
        );
    }
}
