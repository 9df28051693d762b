//! WDB2 table file parsing.
//!
//! [`TableFile`] drives the whole decode: it reads the header, plans and
//! validates the record layout, computes the region boundaries, then walks
//! the record table once - decoding each record, building the key to
//! file-offset index, and handing materialized records to a caller-supplied
//! sink. After the pass the table supports random access by key without
//! rescanning.

use std::hash::BuildHasherDefault;
use std::path::Path;

use hashbrown::HashMap as FastHashMap;
use memmap2::Mmap;
use rustc_hash::FxHasher;

use dbfiles_common::BinaryReader;

use crate::decoder::RecordDecoder;
use crate::header::{Regions, Wdb2Header};
use crate::layout::{plan, FieldLayout};
use crate::schema::RecordSchema;
use crate::{Error, Result};

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Parse configuration.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Construct and emit decoded records. When false, the parse still
    /// decodes rows to extract keys and builds the offset index, but skips
    /// materialization and emission.
    pub materialize_records: bool,
    /// Fail with [`Error::RecordOverrun`] if decoding a record consumes
    /// more bytes than the declared record size. An overrun means the field
    /// description under-reports the true record size and adjacent records'
    /// bytes are being read as field data.
    pub enforce_record_bounds: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            materialize_records: true,
            enforce_record_bounds: cfg!(debug_assertions),
        }
    }
}

impl ParseOptions {
    /// Build the offset index only, without materializing records.
    pub fn offsets_only() -> Self {
        Self {
            materialize_records: false,
            ..Self::default()
        }
    }
}

enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Backing {
    #[inline]
    fn as_slice(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => mmap,
            Self::Owned(vec) => vec,
        }
    }
}

/// A parsed WDB2 table, generic over the record type it decodes.
///
/// Parsing is a single linear pass; the parser exclusively owns its backing
/// data for the duration. Once built, the table is immutable: the header,
/// regions and offset index never change, and records can be re-decoded by
/// key via [`TableFile::fetch`].
///
/// # Example
///
/// ```no_run
/// use dbfiles_wdb2::{FieldDescriptor, ParseOptions, RecordSchema, Row, ScalarKind, TableFile};
///
/// struct Spell {
///     id: i32,
///     name: String,
/// }
///
/// impl RecordSchema for Spell {
///     type Key = i32;
///
///     const FIELDS: &'static [FieldDescriptor] = &[
///         FieldDescriptor::scalar("id", ScalarKind::Int32),
///         FieldDescriptor::scalar("name", ScalarKind::String),
///     ];
///
///     fn key(row: &Row<'_>) -> i32 {
///         row.get_i32("id").unwrap_or(0)
///     }
///
///     fn from_row(row: &Row<'_>) -> Self {
///         Self {
///             id: row.get_i32("id").unwrap_or(0),
///             name: row.get_str("name").unwrap_or("").to_owned(),
///         }
///     }
/// }
///
/// let mut spells = Vec::new();
/// let table = TableFile::<Spell>::open("Spell.db2", ParseOptions::default(), |_key, spell| {
///     spells.push(spell);
/// })?;
///
/// println!("{} spells", table.record_count());
/// # Ok::<(), dbfiles_wdb2::Error>(())
/// ```
pub struct TableFile<R: RecordSchema> {
    data: Backing,
    header: Wdb2Header,
    regions: Option<Regions>,
    layout: Vec<FieldLayout>,
    decoder: Option<RecordDecoder>,
    offset_index: FxHashMap<R::Key, u64>,
}

impl<R: RecordSchema> std::fmt::Debug for TableFile<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableFile")
            .field("header", &self.header)
            .field("regions", &self.regions)
            .field("layout", &self.layout)
            .field("decoder", &self.decoder)
            .field("indexed_records", &self.offset_index.len())
            .finish()
    }
}

impl<R: RecordSchema> TableFile<R> {
    /// Parse a table from a file path (memory-mapped).
    ///
    /// `sink` receives every materialized record; ownership transfers to
    /// the sink, the table keeps nothing but the offset index.
    pub fn open<P, F>(path: P, options: ParseOptions, sink: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: FnMut(R::Key, R),
    {
        let file = std::fs::File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::parse_backing(Backing::Mapped(mmap), options, sink)
    }

    /// Parse a table from bytes.
    pub fn parse<F>(data: &[u8], options: ParseOptions, sink: F) -> Result<Self>
    where
        F: FnMut(R::Key, R),
    {
        Self::parse_backing(Backing::Owned(data.to_vec()), options, sink)
    }

    fn parse_backing<F>(data: Backing, options: ParseOptions, mut sink: F) -> Result<Self>
    where
        F: FnMut(R::Key, R),
    {
        let bytes = data.as_slice();
        let mut reader = BinaryReader::new(bytes);

        let header: Wdb2Header = reader.read_struct()?;
        let mut offset_index = FxHashMap::default();

        // An empty table is a terminal "no data" outcome: no layout is
        // planned and no regions are computed.
        if header.is_empty() {
            return Ok(Self {
                data,
                header,
                regions: None,
                layout: Vec::new(),
                decoder: None,
                offset_index,
            });
        }

        let layout = plan(R::FIELDS, &header)?;
        let regions = header.regions();
        let decoder = RecordDecoder::compile(R::FIELDS, &layout);

        let string_table_base = regions.string_table.start as usize;
        let record_size = header.record_size as usize;

        reader.seek(regions.record_table.start as usize);
        for index in 0..header.record_count {
            let record_offset = reader.position();
            let row = decoder.decode(&mut reader, string_table_base)?;

            if options.enforce_record_bounds && reader.position() > record_offset + record_size {
                return Err(Error::RecordOverrun {
                    index,
                    consumed: reader.position() - record_offset,
                    record_size: header.record_size,
                });
            }

            let key = R::key(&row);
            offset_index.insert(key, record_offset as u64);

            if options.materialize_records {
                sink(key, R::from_row(&row));
            }

            // Advance by the declared slot size, not to wherever decoding
            // stopped: record slots may carry trailing padding bytes no
            // field describes.
            reader.seek(record_offset + record_size);
        }

        Ok(Self {
            data,
            header,
            regions: Some(regions),
            layout,
            decoder: Some(decoder),
            offset_index,
        })
    }

    /// The parsed file header.
    #[inline]
    pub fn header(&self) -> &Wdb2Header {
        &self.header
    }

    /// The computed region boundaries; `None` for an empty table.
    #[inline]
    pub fn regions(&self) -> Option<&Regions> {
        self.regions.as_ref()
    }

    /// The planned per-field layout; empty for an empty table.
    #[inline]
    pub fn layout(&self) -> &[FieldLayout] {
        &self.layout
    }

    /// Number of records in the table.
    #[inline]
    pub fn record_count(&self) -> u32 {
        self.header.record_count
    }

    /// Whether the table carries no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Absolute file offset of the record with the given key.
    #[inline]
    pub fn locate(&self, key: &R::Key) -> Option<u64> {
        self.offset_index.get(key).copied()
    }

    /// Iterate all indexed record keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &R::Key> {
        self.offset_index.keys()
    }

    /// Re-decode the record with the given key at its indexed offset,
    /// without rescanning the table.
    pub fn fetch(&self, key: &R::Key) -> Result<Option<R>> {
        let Some(offset) = self.locate(key) else {
            return Ok(None);
        };
        let (Some(decoder), Some(regions)) = (&self.decoder, &self.regions) else {
            return Ok(None);
        };

        let mut reader = BinaryReader::new_at(self.data.as_slice(), offset as usize);
        let row = decoder.decode(&mut reader, regions.string_table.start as usize)?;
        Ok(Some(R::from_row(&row)))
    }
}
