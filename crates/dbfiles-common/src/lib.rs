//! Common utilities for dbfiles.
//!
//! This crate provides the foundation the table-format crates build on:
//!
//! - [`BinaryReader`] - positioned little-endian reading over a byte slice
//! - [`Error`] / [`Result`] - low-level read errors
//!
//! Client table files are read fully into memory (or memory-mapped) before
//! decoding, so the reader works on `&[u8]` and hands out zero-copy slices
//! and string views wherever it can.

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;
