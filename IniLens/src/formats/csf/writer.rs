//! ` FSC` archive writing

use super::{CsfTable, FILE_MAGIC, LABEL_MAGIC, STRING_MAGIC, WIDE_STRING_MAGIC, scramble_unit};
use crate::error::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write an archive to disk
///
/// # Errors
/// Returns an error if file writing fails.
pub fn write_csf<P: AsRef<Path>>(path: P, table: &CsfTable) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer, table)?;
    writer.flush()?;
    Ok(())
}

/// Encode an archive into memory
///
/// Every entry becomes its own label record with one string; entries with an
/// extra value are written as wide records.
///
/// # Errors
/// Only fails if the in-memory writer does, which it does not in practice.
pub fn encode_csf(table: &CsfTable) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, table)?;
    Ok(buffer)
}

fn write_table<W: Write>(writer: &mut W, table: &CsfTable) -> std::io::Result<()> {
    let count = table.entries.len() as i32;

    // Header
    writer.write_all(&FILE_MAGIC)?;
    writer.write_i32::<LittleEndian>(table.version)?;
    writer.write_i32::<LittleEndian>(count)?; // labels
    writer.write_i32::<LittleEndian>(count)?; // strings
    writer.write_i32::<LittleEndian>(0)?; // reserved
    writer.write_i32::<LittleEndian>(table.language.id())?;

    for entry in &table.entries {
        writer.write_all(&LABEL_MAGIC)?;
        writer.write_i32::<LittleEndian>(1)?;
        writer.write_i32::<LittleEndian>(entry.label.len() as i32)?;
        writer.write_all(entry.label.as_bytes())?;

        let magic = if entry.extra_value.is_some() {
            WIDE_STRING_MAGIC
        } else {
            STRING_MAGIC
        };
        writer.write_all(&magic)?;

        let units: Vec<u16> = entry.value.encode_utf16().collect();
        writer.write_i32::<LittleEndian>(units.len() as i32)?;
        for unit in units {
            writer.write_u16::<LittleEndian>(scramble_unit(unit))?;
        }

        if let Some(extra) = &entry.extra_value {
            writer.write_i32::<LittleEndian>(extra.len() as i32)?;
            writer.write_all(extra.as_bytes())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::LabelEntry;
    use crate::formats::csf::{CsfLanguage, decode_csf, read_csf};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encoded_layout() {
        let table = CsfTable::new(CsfLanguage::EnglishUs, vec![LabelEntry::new("FOO", "A")]);
        let bytes = encode_csf(&table).unwrap();

        assert_eq!(&bytes[0..4], b" FSC");
        assert_eq!(&bytes[24..28], b" LBL");
        assert_eq!(&bytes[36..39], b"FOO");
        assert_eq!(&bytes[39..43], b" RTS");
        assert_eq!(&bytes[47..49], &(0x0041u16 ^ 0xFFFF).to_le_bytes());
        assert_eq!(bytes.len(), 49);
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.csf");
        let table = CsfTable::new(
            CsfLanguage::Korean,
            vec![
                LabelEntry::new("Name:Dog", "개"),
                LabelEntry::new("Name:Spy", "").with_extra("spy_voice"),
            ],
        );

        write_csf(&path, &table).unwrap();
        let loaded = read_csf(&path).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(decode_csf(&std::fs::read(&path).unwrap()), table);
    }
}
