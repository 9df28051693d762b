//! Per-type record decoding.
//!
//! A [`RecordDecoder`] is compiled once from a record type's descriptors and
//! planned layout, then run for every record in the table: a flat table of
//! per-field decode steps, so per-record decoding pays no repeated
//! type-introspection cost.

use dbfiles_common::BinaryReader;

use crate::layout::FieldLayout;
use crate::schema::{FieldDescriptor, ScalarKind};
use crate::strings::resolve_string;
use crate::value::{FieldValue, Row, Value};
use crate::Result;

/// One decode step: read `arity` elements of `kind`, in index order.
#[derive(Debug, Clone, Copy)]
struct DecodeStep {
    kind: ScalarKind,
    arity: u32,
}

/// A compiled decode routine for one record type.
///
/// Fields are decoded strictly in declaration order - declaration order is
/// the on-disk order, a structural invariant of the format. The decoder
/// leaves the reader wherever the last field ended; slot advancement is the
/// caller's job, since record slots may carry trailing bytes no field
/// describes.
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    fields: &'static [FieldDescriptor],
    steps: Vec<DecodeStep>,
}

impl RecordDecoder {
    /// Build the decode routine from a planned layout.
    pub fn compile(fields: &'static [FieldDescriptor], layout: &[FieldLayout]) -> Self {
        let steps = fields
            .iter()
            .zip(layout)
            .map(|(field, plan)| DecodeStep {
                kind: field.kind,
                arity: plan.arity,
            })
            .collect();

        Self { fields, steps }
    }

    /// Decode one record at the reader's current position.
    ///
    /// String fields resolve through `string_table_base`; the resolution is
    /// a scoped excursion, so the reader keeps advancing linearly through
    /// the record regardless.
    pub fn decode<'a>(
        &self,
        reader: &mut BinaryReader<'a>,
        string_table_base: usize,
    ) -> Result<Row<'a>> {
        let mut values = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let value = if step.arity == 1 {
                FieldValue::Scalar(read_scalar(reader, step.kind, string_table_base)?)
            } else {
                let mut elements = Vec::with_capacity(step.arity as usize);
                for _ in 0..step.arity {
                    elements.push(read_scalar(reader, step.kind, string_table_base)?);
                }
                FieldValue::Array(elements)
            };
            values.push(value);
        }

        Ok(Row::new(self.fields, values))
    }
}

fn read_scalar<'a>(
    reader: &mut BinaryReader<'a>,
    kind: ScalarKind,
    string_table_base: usize,
) -> Result<Value<'a>> {
    Ok(match kind {
        ScalarKind::Int8 => Value::Int8(reader.read_i8()?),
        ScalarKind::Int16 => Value::Int16(reader.read_i16()?),
        ScalarKind::Int32 => Value::Int32(reader.read_i32()?),
        ScalarKind::Int64 => Value::Int64(reader.read_i64()?),
        ScalarKind::UInt8 => Value::UInt8(reader.read_u8()?),
        ScalarKind::UInt16 => Value::UInt16(reader.read_u16()?),
        ScalarKind::UInt32 => Value::UInt32(reader.read_u32()?),
        ScalarKind::UInt64 => Value::UInt64(reader.read_u64()?),
        ScalarKind::Char => Value::Char(reader.read_u8()? as char),
        ScalarKind::Float32 => Value::Float(reader.read_f32()?),
        ScalarKind::String => {
            let rel = reader.read_u32()?;
            Value::String(resolve_string(reader, string_table_base, rel)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Wdb2Header;
    use crate::layout::plan;
    use crate::schema::FieldDescriptor;

    fn header(field_count: u32, record_size: u32) -> Wdb2Header {
        Wdb2Header {
            record_count: 1,
            field_count,
            record_size,
            string_table_size: 0,
            table_hash: 0,
            build: 0,
            timestamp_last_written: 0,
            min_index: 0,
            max_index: 0,
            locale_mask: 0,
            copy_table_size: 0,
        }
    }

    #[test]
    fn test_decode_scalars() {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::scalar("id", ScalarKind::Int32),
            FieldDescriptor::scalar("weight", ScalarKind::Float32),
            FieldDescriptor::scalar("flags", ScalarKind::UInt8),
        ];

        let layout = plan(FIELDS, &header(3, 9)).unwrap();
        let decoder = RecordDecoder::compile(FIELDS, &layout);

        let mut data = Vec::new();
        data.extend_from_slice(&7i32.to_le_bytes());
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.push(0x80);

        let mut reader = BinaryReader::new(&data);
        let row = decoder.decode(&mut reader, 0).unwrap();

        assert_eq!(row.get_i32("id"), Some(7));
        assert_eq!(row.get_f32("weight"), Some(1.5));
        assert_eq!(row.get_i64("flags"), Some(0x80));
        assert_eq!(reader.position(), 9);
    }

    #[test]
    fn test_decode_array_in_index_order() {
        const FIELDS: &[FieldDescriptor] =
            &[FieldDescriptor::array("stats", ScalarKind::UInt16, 3)];

        let layout = plan(FIELDS, &header(3, 6)).unwrap();
        let decoder = RecordDecoder::compile(FIELDS, &layout);

        let mut data = Vec::new();
        for v in [1u16, 2, 3] {
            data.extend_from_slice(&v.to_le_bytes());
        }

        let mut reader = BinaryReader::new(&data);
        let row = decoder.decode(&mut reader, 0).unwrap();

        assert_eq!(
            row.get_array("stats"),
            Some(&[Value::UInt16(1), Value::UInt16(2), Value::UInt16(3)][..])
        );
    }

    #[test]
    fn test_decode_string_field() {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::scalar("name", ScalarKind::String),
            FieldDescriptor::scalar("value", ScalarKind::Int32),
        ];

        let layout = plan(FIELDS, &header(2, 8)).unwrap();
        let decoder = RecordDecoder::compile(FIELDS, &layout);

        // One 8-byte record, then the string table.
        let mut data = Vec::new();
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(&99i32.to_le_bytes());
        let string_table_base = data.len();
        data.extend_from_slice(b"Foo\0Bar\0");

        let mut reader = BinaryReader::new(&data);
        let row = decoder.decode(&mut reader, string_table_base).unwrap();

        assert_eq!(row.get_str("name"), Some("Bar"));
        assert_eq!(row.get_i32("value"), Some(99));
        // The string excursion did not displace the reader.
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_padded_slots_decode_at_boundaries() {
        // Two 12-byte record slots whose fields occupy only 10 bytes each.
        // Reading each record at its slot boundary skips the two trailing
        // padding bytes; the decoder's stopping point is irrelevant.
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::scalar("id", ScalarKind::Int32),
            FieldDescriptor::array("stats", ScalarKind::UInt16, 3),
        ];

        let layout = plan(FIELDS, &header(4, 10)).unwrap();
        let decoder = RecordDecoder::compile(FIELDS, &layout);

        let mut data = Vec::new();
        for id in [1i32, 2] {
            data.extend_from_slice(&id.to_le_bytes());
            for stat in [10u16, 20, 30] {
                data.extend_from_slice(&(stat * id as u16).to_le_bytes());
            }
            data.extend_from_slice(&[0xAA, 0xBB]); // slot padding
        }

        let stride = 12;
        let mut reader = BinaryReader::new(&data);
        for (slot, id) in [1i32, 2].into_iter().enumerate() {
            reader.seek(slot * stride);
            let row = decoder.decode(&mut reader, 0).unwrap();

            assert_eq!(row.get_i32("id"), Some(id));
            assert_eq!(
                row.get_array("stats"),
                Some(
                    &[
                        Value::UInt16(10 * id as u16),
                        Value::UInt16(20 * id as u16),
                        Value::UInt16(30 * id as u16)
                    ][..]
                )
            );
            assert_eq!(reader.position(), slot * stride + 10);
        }
    }

    #[test]
    fn test_decode_truncated_record_fails() {
        const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::scalar("id", ScalarKind::Int64)];

        let layout = plan(FIELDS, &header(1, 8)).unwrap();
        let decoder = RecordDecoder::compile(FIELDS, &layout);

        let mut reader = BinaryReader::new(&[0u8; 4]);
        assert!(decoder.decode(&mut reader, 4).is_err());
    }
}
