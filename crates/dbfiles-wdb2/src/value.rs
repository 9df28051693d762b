//! Type-safe values for decoded record fields.
//!
//! A decoded record is a [`Row`]: one [`FieldValue`] per declared field, in
//! declaration order. String values borrow from the underlying file data -
//! materializing an owned record copies them out.

use crate::schema::{FieldDescriptor, ScalarKind};

/// A single scalar value decoded from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value<'a> {
    /// Signed 8-bit integer.
    Int8(i8),
    /// Signed 16-bit integer.
    Int16(i16),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Unsigned 8-bit integer.
    UInt8(u8),
    /// Unsigned 16-bit integer.
    UInt16(u16),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// Single byte character.
    Char(char),
    /// 32-bit floating point.
    Float(f32),
    /// String resolved from the string table (borrowed from the file data).
    String(&'a str),
}

impl<'a> Value<'a> {
    /// The scalar kind this value was decoded as.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Int8(_) => ScalarKind::Int8,
            Self::Int16(_) => ScalarKind::Int16,
            Self::Int32(_) => ScalarKind::Int32,
            Self::Int64(_) => ScalarKind::Int64,
            Self::UInt8(_) => ScalarKind::UInt8,
            Self::UInt16(_) => ScalarKind::UInt16,
            Self::UInt32(_) => ScalarKind::UInt32,
            Self::UInt64(_) => ScalarKind::UInt64,
            Self::Char(_) => ScalarKind::Char,
            Self::Float(_) => ScalarKind::Float32,
            Self::String(_) => ScalarKind::String,
        }
    }

    /// Get as i32 if this is an Int32.
    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as i64, widening from any integer variant.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int8(v) => Some(*v as i64),
            Self::Int16(v) => Some(*v as i64),
            Self::Int32(v) => Some(*v as i64),
            Self::Int64(v) => Some(*v),
            Self::UInt8(v) => Some(*v as i64),
            Self::UInt16(v) => Some(*v as i64),
            Self::UInt32(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Get as u32 if this is a UInt32.
    #[inline]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as f32 if this is a Float.
    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as a string slice if this is a String.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::UInt8(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// A decoded field: a scalar, or a fixed-size array of scalars in index
/// order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldValue<'a> {
    Scalar(Value<'a>),
    Array(Vec<Value<'a>>),
}

impl<'a> FieldValue<'a> {
    /// Get the scalar value, if this field is a scalar.
    #[inline]
    pub fn as_scalar(&self) -> Option<&Value<'a>> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Array(_) => None,
        }
    }

    /// Get the array elements, if this field is an array.
    #[inline]
    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(v) => Some(v),
        }
    }
}

/// One fully decoded record, in field declaration order.
///
/// String values borrow from the file data the row was decoded from; a
/// `Row` is therefore a transient view handed to key accessors and
/// materialization, not a long-lived store.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    fields: &'static [FieldDescriptor],
    values: Vec<FieldValue<'a>>,
}

impl<'a> Row<'a> {
    pub(crate) fn new(fields: &'static [FieldDescriptor], values: Vec<FieldValue<'a>>) -> Self {
        debug_assert_eq!(fields.len(), values.len());
        Self { fields, values }
    }

    /// Number of fields in the record.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The field value at declaration index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds, like slice indexing.
    #[inline]
    pub fn value(&self, index: usize) -> &FieldValue<'a> {
        &self.values[index]
    }

    /// The descriptor of the field at declaration index `index`.
    #[inline]
    pub fn descriptor(&self, index: usize) -> &FieldDescriptor {
        &self.fields[index]
    }

    /// Iterate fields in declaration order with their descriptors.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldValue<'a>)> {
        self.fields.iter().zip(self.values.iter())
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue<'a>> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        Some(&self.values[index])
    }

    /// Get a scalar i32 field by name.
    #[inline]
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get(name)?.as_scalar()?.as_i32()
    }

    /// Get any integer field by name, widened to i64.
    #[inline]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_scalar()?.as_i64()
    }

    /// Get a scalar u32 field by name.
    #[inline]
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        self.get(name)?.as_scalar()?.as_u32()
    }

    /// Get a scalar f32 field by name.
    #[inline]
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name)?.as_scalar()?.as_f32()
    }

    /// Get a string field by name.
    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&'a str> {
        self.get(name)?.as_scalar()?.as_str()
    }

    /// Get an array field by name.
    #[inline]
    pub fn get_array(&self, name: &str) -> Option<&[Value<'a>]> {
        self.get(name)?.as_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::scalar("id", ScalarKind::Int32),
        FieldDescriptor::array("stats", ScalarKind::UInt16, 2),
        FieldDescriptor::scalar("name", ScalarKind::String),
    ];

    fn row() -> Row<'static> {
        Row::new(
            FIELDS,
            vec![
                FieldValue::Scalar(Value::Int32(7)),
                FieldValue::Array(vec![Value::UInt16(1), Value::UInt16(2)]),
                FieldValue::Scalar(Value::String("Foo")),
            ],
        )
    }

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::Int32(42)), "42");
        assert_eq!(format!("{}", Value::String("hello")), "hello");
        assert_eq!(format!("{}", Value::Char('x')), "x");
    }

    #[test]
    fn test_value_accessors() {
        let v = Value::Int32(42);
        assert_eq!(v.as_i32(), Some(42));
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_str(), None);

        let v = Value::String("test");
        assert_eq!(v.as_str(), Some("test"));
        assert_eq!(v.as_i32(), None);
    }

    #[test]
    fn test_row_lookup_by_name() {
        let row = row();
        assert_eq!(row.get_i32("id"), Some(7));
        assert_eq!(row.get_str("name"), Some("Foo"));
        assert_eq!(
            row.get_array("stats"),
            Some(&[Value::UInt16(1), Value::UInt16(2)][..])
        );
        assert!(row.get("missing").is_none());
        // Kind-mismatched access yields None, not a panic.
        assert_eq!(row.get_f32("id"), None);
    }

    #[test]
    fn test_row_iteration_order() {
        let row = row();
        let names: Vec<_> = row.iter().map(|(d, _)| d.name).collect();
        assert_eq!(names, ["id", "stats", "name"]);
    }
}
