//! Field layout planning.
//!
//! Before any record is decoded, the ordered field descriptors of the target
//! type are turned into a byte-exact plan of the record: per-field element
//! size, arity and cumulative offset. The plan is validated against the
//! header's declared geometry and then reused for every record in the table;
//! a mismatched plan cannot safely decode a single record, so validation
//! failures abort the parse before the first record read.

use crate::header::Wdb2Header;
use crate::schema::FieldDescriptor;
use crate::{Error, Result};

/// Derived byte layout of one field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Size of one element in bytes.
    pub element_size: u32,
    /// Element count (1 for scalars).
    pub arity: u32,
    /// Byte offset of the field from the start of the record.
    pub offset: u32,
}

impl FieldLayout {
    /// Total bytes this field occupies in the record.
    #[inline]
    pub fn byte_size(&self) -> u32 {
        self.element_size * self.arity
    }
}

/// Plan the record layout for an ordered field list and validate it against
/// the header.
///
/// A single left-to-right scan accumulates offsets; at the end of the scan
/// the total element count must equal `header.field_count` and the total
/// byte size must equal `header.record_size`. The result is pure: planning
/// the same fields twice yields the same layout.
pub fn plan(fields: &[FieldDescriptor], header: &Wdb2Header) -> Result<Vec<FieldLayout>> {
    let mut layouts = Vec::with_capacity(fields.len());
    let mut offset = 0u32;
    let mut element_count = 0u32;

    for field in fields {
        if field.arity == 0 {
            return Err(Error::InvalidFieldDescription { field: field.name });
        }

        let layout = FieldLayout {
            element_size: field.kind.byte_size(),
            arity: field.arity,
            offset,
        };
        offset += layout.byte_size();
        element_count += layout.arity;
        layouts.push(layout);
    }

    let expected_fields = header.field_count;
    if element_count != expected_fields {
        return Err(Error::FieldCountMismatch {
            expected: expected_fields,
            actual: element_count,
        });
    }

    let expected_size = header.record_size;
    if offset != expected_size {
        return Err(Error::RecordSizeMismatch {
            expected: expected_size,
            actual: offset,
        });
    }

    Ok(layouts)
}
