//! WDB2 client database parser.
//!
//! WDB2 files are fixed-record binary tables from the client game data: a
//! self-describing header, an optional sparse offset map over an id range, a
//! contiguous table of fixed-size records, and a trailing table of
//! null-terminated UTF-8 strings referenced by relative offsets embedded in
//! the records. This crate decodes them into strongly-typed record values.
//!
//! # Quick Start
//!
//! Declare the record shape once, then parse:
//!
//! ```no_run
//! use dbfiles_wdb2::{FieldDescriptor, ParseOptions, RecordSchema, Row, ScalarKind, TableFile};
//!
//! struct ItemRecord {
//!     id: i32,
//!     display_id: u32,
//!     name: String,
//! }
//!
//! impl RecordSchema for ItemRecord {
//!     type Key = i32;
//!
//!     const FIELDS: &'static [FieldDescriptor] = &[
//!         FieldDescriptor::scalar("id", ScalarKind::Int32),
//!         FieldDescriptor::scalar("display_id", ScalarKind::UInt32),
//!         FieldDescriptor::scalar("name", ScalarKind::String),
//!     ];
//!
//!     fn key(row: &Row<'_>) -> i32 {
//!         row.get_i32("id").unwrap_or(0)
//!     }
//!
//!     fn from_row(row: &Row<'_>) -> Self {
//!         Self {
//!             id: row.get_i32("id").unwrap_or(0),
//!             display_id: row.get_u32("display_id").unwrap_or(0),
//!             name: row.get_str("name").unwrap_or("").to_owned(),
//!         }
//!     }
//! }
//!
//! let table = TableFile::<ItemRecord>::open(
//!     "Item.db2",
//!     ParseOptions::default(),
//!     |key, item| println!("{key}: {}", item.name),
//! )?;
//!
//! // Random access by key after the pass, without rescanning.
//! if let Some(offset) = table.locate(&17) {
//!     println!("record 17 lives at file offset {offset}");
//! }
//! # Ok::<(), dbfiles_wdb2::Error>(())
//! ```
//!
//! # Architecture
//!
//! Decoding is "plan once, decode many":
//!
//! - [`plan`] derives the byte-exact [`FieldLayout`] of a record from the
//!   type's ordered [`FieldDescriptor`] list and validates it against the
//!   header's declared geometry - a mismatch aborts before any record read.
//! - [`RecordDecoder`] compiles the layout into a flat table of per-field
//!   decode steps, run once per record with no repeated introspection.
//! - [`resolve_string`] resolves string fields through the string table via
//!   a scoped seek that always restores the reader.
//! - [`TableFile`] orchestrates the pass, builds the key to file-offset
//!   index, and emits records to the caller's sink.
//!
//! Decoded rows can also be inspected dynamically through [`Row`] and
//! [`Value`] without a typed record.

mod decoder;
mod error;
mod header;
mod layout;
mod schema;
mod strings;
mod table;
mod value;

pub use decoder::RecordDecoder;
pub use error::{Error, Result};
pub use header::{OffsetMapEntry, Region, Regions, Wdb2Header};
pub use layout::{plan, FieldLayout};
pub use schema::{FieldDescriptor, RecordSchema, ScalarKind};
pub use strings::resolve_string;
pub use table::{ParseOptions, TableFile};
pub use value::{FieldValue, Row, Value};
