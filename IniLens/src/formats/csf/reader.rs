//! ` FSC` archive reading and parsing

use super::{
    CsfLanguage, CsfTable, FILE_MAGIC, LABEL_MAGIC, STRING_MAGIC, WIDE_STRING_MAGIC, scramble_unit,
};
use crate::error::Result;
use crate::formats::common::LabelEntry;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;

/// Why decoding stopped early
#[derive(Error, Debug)]
enum Stop {
    #[error("expected {expected:?}, found {found:?}")]
    Magic { expected: String, found: String },

    #[error("negative length {0}")]
    NegativeLength(i32),

    #[error("length {wanted} exceeds the {remaining} bytes left")]
    Overrun { wanted: usize, remaining: usize },

    #[error("buffer exhausted: {0}")]
    Truncated(#[from] std::io::Error),
}

/// Read an archive from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read. Malformed
/// contents are not an error; see [`decode_csf`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_csf<P: AsRef<Path>>(path: P) -> Result<CsfTable> {
    let data = std::fs::read(path)?;
    Ok(decode_csf(&data))
}

/// Decode archive bytes
///
/// Never fails: on a bad magic, negative length or exhausted buffer the
/// labels decoded so far are returned. A bad file header yields an empty table.
#[must_use]
pub fn decode_csf(data: &[u8]) -> CsfTable {
    let mut table = CsfTable {
        language: CsfLanguage::Unknown(-1),
        ..CsfTable::default()
    };
    let mut cursor = Cursor::new(data);

    if let Err(stop) = read_table(&mut cursor, &mut table) {
        tracing::debug!(
            "CSF decoding stopped at byte {} after {} strings: {}",
            cursor.position(),
            table.entries.len(),
            stop
        );
    }

    table
}

fn read_table(cursor: &mut Cursor<&[u8]>, table: &mut CsfTable) -> std::result::Result<(), Stop> {
    // Header (24 bytes)
    expect_magic(cursor, FILE_MAGIC)?;
    table.version = cursor.read_i32::<LittleEndian>()?;
    let label_count = cursor.read_i32::<LittleEndian>()?;
    let _string_count = cursor.read_i32::<LittleEndian>()?;
    let _reserved = cursor.read_i32::<LittleEndian>()?;
    table.language = CsfLanguage::from_id(cursor.read_i32::<LittleEndian>()?);

    for _ in 0..label_count.max(0) {
        expect_magic(cursor, LABEL_MAGIC)?;
        let pair_count = cursor.read_i32::<LittleEndian>()?;
        let label_len = read_length(cursor, 1)?;
        let label = read_ascii(cursor, label_len)?;

        for _ in 0..pair_count.max(0) {
            let tag = read_magic(cursor)?;
            let wide = match tag {
                STRING_MAGIC => false,
                WIDE_STRING_MAGIC => true,
                other => {
                    return Err(Stop::Magic {
                        expected: "\" RTS\" or \"WRTS\"".to_string(),
                        found: String::from_utf8_lossy(&other).into_owned(),
                    });
                }
            };

            // Value: UTF-16 code units, each scrambled
            let unit_count = read_length(cursor, 2)?;
            let mut units = Vec::with_capacity(unit_count);
            for _ in 0..unit_count {
                units.push(scramble_unit(cursor.read_u16::<LittleEndian>()?));
            }
            let value = String::from_utf16_lossy(&units);

            let extra_value = if wide {
                let extra_len = read_length(cursor, 1)?;
                Some(read_ascii(cursor, extra_len)?)
            } else {
                None
            };

            table.entries.push(LabelEntry {
                label: label.clone(),
                value,
                extra_value,
            });
        }
    }

    Ok(())
}

fn read_magic(cursor: &mut Cursor<&[u8]>) -> std::result::Result<[u8; 4], Stop> {
    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic)?;
    Ok(magic)
}

fn expect_magic(cursor: &mut Cursor<&[u8]>, expected: [u8; 4]) -> std::result::Result<(), Stop> {
    let found = read_magic(cursor)?;
    if found != expected {
        return Err(Stop::Magic {
            expected: String::from_utf8_lossy(&expected).into_owned(),
            found: String::from_utf8_lossy(&found).into_owned(),
        });
    }
    Ok(())
}

/// Read an element count and check that `count * unit_size` bytes remain
fn read_length(cursor: &mut Cursor<&[u8]>, unit_size: usize) -> std::result::Result<usize, Stop> {
    let raw = cursor.read_i32::<LittleEndian>()?;
    if raw < 0 {
        return Err(Stop::NegativeLength(raw));
    }

    let count = raw as usize;
    let remaining = cursor.get_ref().len().saturating_sub(cursor.position() as usize);
    let wanted = count.saturating_mul(unit_size);
    if wanted > remaining {
        return Err(Stop::Overrun { wanted, remaining });
    }
    Ok(count)
}

fn read_ascii(cursor: &mut Cursor<&[u8]>, len: usize) -> std::result::Result<String, Stop> {
    let mut bytes = vec![0u8; len];
    cursor.read_exact(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header(label_count: i32, language: i32) -> Vec<u8> {
        let mut data = FILE_MAGIC.to_vec();
        for value in [3, label_count, label_count, 0, language] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data
    }

    fn label(data: &mut Vec<u8>, name: &str, pairs: i32) {
        data.extend_from_slice(&LABEL_MAGIC);
        data.extend_from_slice(&pairs.to_le_bytes());
        data.extend_from_slice(&(name.len() as i32).to_le_bytes());
        data.extend_from_slice(name.as_bytes());
    }

    fn string(data: &mut Vec<u8>, value: &str, extra: Option<&str>) {
        data.extend_from_slice(if extra.is_some() { &WIDE_STRING_MAGIC } else { &STRING_MAGIC });
        let units: Vec<u16> = value.encode_utf16().collect();
        data.extend_from_slice(&(units.len() as i32).to_le_bytes());
        for unit in units {
            data.extend_from_slice(&scramble_unit(unit).to_le_bytes());
        }
        if let Some(extra) = extra {
            data.extend_from_slice(&(extra.len() as i32).to_le_bytes());
            data.extend_from_slice(extra.as_bytes());
        }
    }

    #[test]
    fn test_single_label() {
        let mut data = FILE_MAGIC.to_vec();
        for value in [1i32, 1, 1, 0, 0] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(b" LBL");
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&3i32.to_le_bytes());
        data.extend_from_slice(b"FOO");
        data.extend_from_slice(b" RTS");
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&(0x0041u16 ^ 0xFFFF).to_le_bytes());

        let table = decode_csf(&data);
        assert_eq!(table.version, 1);
        assert_eq!(table.language, CsfLanguage::EnglishUs);
        assert_eq!(table.entries, vec![LabelEntry::new("FOO", "A")]);
    }

    #[test]
    fn test_wide_strings_and_multiple_pairs() {
        let mut data = header(2, 2);
        label(&mut data, "GUI:Ok", 1);
        string(&mut data, "Jawohl", Some("snd_ok"));
        label(&mut data, "Name:Tank", 2);
        string(&mut data, "Panzer", None);
        string(&mut data, "Kampfpanzer ü", None);

        let table = decode_csf(&data);
        assert_eq!(table.language, CsfLanguage::German);
        assert_eq!(
            table.entries,
            vec![
                LabelEntry::new("GUI:Ok", "Jawohl").with_extra("snd_ok"),
                LabelEntry::new("Name:Tank", "Panzer"),
                LabelEntry::new("Name:Tank", "Kampfpanzer ü"),
            ]
        );
    }

    #[test]
    fn test_bad_file_magic_yields_nothing() {
        let mut data = header(1, 0);
        data[0] = b'X';
        label(&mut data, "A", 1);
        string(&mut data, "a", None);

        let table = decode_csf(&data);
        assert!(table.is_empty());
        assert_eq!(table.language, CsfLanguage::Unknown(-1));
    }

    #[test]
    fn test_truncated_buffer_keeps_decoded_labels() {
        let mut data = header(3, 0);
        label(&mut data, "First", 1);
        string(&mut data, "one", None);
        label(&mut data, "Second", 1);
        string(&mut data, "two", None);
        let cut = data.len() - 2;
        data.truncate(cut);

        let table = decode_csf(&data);
        assert_eq!(table.entries, vec![LabelEntry::new("First", "one")]);
    }

    #[test]
    fn test_bad_record_magic_stops_decoding() {
        let mut data = header(2, 0);
        label(&mut data, "First", 2);
        string(&mut data, "one", None);
        data.extend_from_slice(b"JUNK");

        let table = decode_csf(&data);
        assert_eq!(table.entries, vec![LabelEntry::new("First", "one")]);
    }

    #[test]
    fn test_oversize_and_negative_lengths() {
        let mut data = header(1, 0);
        data.extend_from_slice(&LABEL_MAGIC);
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&i32::MAX.to_le_bytes());
        assert!(decode_csf(&data).is_empty());

        let mut data = header(1, 0);
        data.extend_from_slice(&LABEL_MAGIC);
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&(-4i32).to_le_bytes());
        assert!(decode_csf(&data).is_empty());
    }

    #[test]
    fn test_zero_pairs_produce_no_entry() {
        let mut data = header(2, 0);
        label(&mut data, "Empty", 0);
        label(&mut data, "Full", 1);
        string(&mut data, "x", None);

        let table = decode_csf(&data);
        assert_eq!(table.entries, vec![LabelEntry::new("Full", "x")]);
    }

    #[test]
    fn test_read_csf_missing_file_is_io_error() {
        let result = read_csf("/definitely/not/here.csf");
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
