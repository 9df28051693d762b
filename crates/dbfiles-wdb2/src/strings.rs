//! String table resolution.
//!
//! Record fields reference strings by a 4-byte offset relative to the start
//! of the string table. Resolution is a scoped excursion: the reader seeks
//! into the table, reads the null-terminated string, and is restored to
//! where it was - on every exit path, so a failed resolve never corrupts
//! the following record reads.

use dbfiles_common::BinaryReader;

use crate::Result;

/// Resolve a string-table reference.
///
/// `rel` is the relative offset that was just read from the record; the
/// reader sits at the next field's position and is guaranteed to sit there
/// again when this returns, whether the string decodes or not. An offset
/// pointing at a terminator byte yields the empty string.
pub fn resolve_string<'a>(
    reader: &mut BinaryReader<'a>,
    string_table_base: usize,
    rel: u32,
) -> Result<&'a str> {
    let return_position = reader.position();

    reader.seek(string_table_base + rel as usize);
    let result = reader.read_cstring();
    reader.seek(return_position);

    Ok(result?)
}
