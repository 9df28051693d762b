//! WDB2 file header and region layout.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// The fixed 44-byte WDB2 header.
///
/// The header is self-describing: it declares the record geometry
/// (`record_count` x `record_size` bytes, `field_count` on-disk elements per
/// record) and the size of the trailing string table. `table_hash`, `build`,
/// `timestamp_last_written`, `locale_mask` and `copy_table_size` are carried
/// by the format but play no part in decoding.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct Wdb2Header {
    /// Number of records in the record table.
    pub record_count: u32,
    /// Total on-disk element count per record (array fields count once per
    /// element).
    pub field_count: u32,
    /// Size of one record slot in bytes.
    pub record_size: u32,
    /// Size of the string table in bytes.
    pub string_table_size: u32,
    /// Hash of the table name.
    pub table_hash: u32,
    /// Client build the file was generated by.
    pub build: u32,
    /// Last-written timestamp.
    pub timestamp_last_written: u32,
    /// Lowest id covered by the offset map.
    pub min_index: i32,
    /// Highest id covered by the offset map; zero means no offset map.
    pub max_index: i32,
    /// Locale bitmask.
    pub locale_mask: u32,
    /// Size of the copy table.
    pub copy_table_size: u32,
}

impl Wdb2Header {
    /// Byte size of the header on disk.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Whether the table carries any records at all.
    ///
    /// An empty table is a valid "no data" outcome, not a decode error.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Whether the file carries a sparse offset map between the header and
    /// the record table.
    #[inline]
    pub fn has_offset_map(&self) -> bool {
        self.max_index != 0
    }

    /// Compute the three file regions following the header, in file order:
    /// offset map, record table, string table. The regions are contiguous;
    /// an absent offset map contributes zero bytes.
    pub fn regions(&self) -> Regions {
        let offset_map_slots = if self.has_offset_map() {
            (self.max_index as i64 - self.min_index as i64 + 1).max(0) as u64
        } else {
            0
        };

        let offset_map = Region {
            exists: self.has_offset_map(),
            start: Self::SIZE as u64,
            size: offset_map_slots * std::mem::size_of::<OffsetMapEntry>() as u64,
        };
        let record_table = Region {
            exists: true,
            start: offset_map.end(),
            size: self.record_count as u64 * self.record_size as u64,
        };
        let string_table = Region {
            exists: true,
            start: record_table.end(),
            size: self.string_table_size as u64,
        };

        Regions {
            offset_map,
            record_table,
            string_table,
        }
    }
}

/// One entry of the sparse offset map: absolute record offset plus record
/// length, one entry per id in `min_index..=max_index`.
///
/// The decode path only needs the entry size for region accounting; the map
/// itself is not consulted when iterating the record table.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct OffsetMapEntry {
    /// Absolute file offset of the record.
    pub offset: u32,
    /// Record length in bytes.
    pub length: u16,
}

/// A contiguous byte range within the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    /// Whether the region is present in the file.
    pub exists: bool,
    /// Absolute offset of the region's first byte.
    pub start: u64,
    /// Region size in bytes.
    pub size: u64,
}

impl Region {
    /// Offset of the first byte past the region.
    #[inline]
    pub fn end(&self) -> u64 {
        self.start + self.size
    }
}

/// The three regions of a WDB2 file past the header.
#[derive(Debug, Clone, Copy)]
pub struct Regions {
    /// Sparse id-range index; present iff `max_index != 0`.
    pub offset_map: Region,
    /// The fixed-size record slots.
    pub record_table: Region,
    /// Null-terminated UTF-8 strings referenced by record fields.
    pub string_table: Region,
}
