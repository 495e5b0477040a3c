//! TweakDB string table blob parser
//!
//! The primary blob stores every key as an opaque 64-bit hash. The
//! companion string table blob ships the original texts, grouped into the
//! same three families the database uses (records, flats, queries). Each
//! recovered string is keyed by a composite of its CRC32 checksum and its
//! character count, so callers can cross-reference a candidate string by
//! recomputing the same hash.

use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::stream::ByteStream;

/// Composite key of a recovered string: `crc32(utf8 bytes)` in the low 32
/// bits, character count in the high bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringHash(pub u64);

impl StringHash {
    /// Compute the key the string table uses for `text`.
    pub fn of(text: &str) -> Self {
        let crc = crc32fast::hash(text.as_bytes()) as u64;
        let chars = text.chars().count() as u64;
        StringHash(crc | (chars << 32))
    }
}

impl fmt::Display for StringHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Fixed 20-byte header of the string table blob.
#[derive(Debug, Clone)]
pub struct TweakStringHeader {
    pub magic: u32,
    pub version: u32,
    pub record_count: u32,
    pub flat_count: u32,
    pub query_count: u32,
}

impl TweakStringHeader {
    pub const MAGIC: u32 = 0x0BB1_DB57;
    pub const VERSION: u32 = 0x1;

    /// Parse and validate the header at the current stream position.
    pub fn read<R: Read + Seek>(stream: &mut ByteStream<R>) -> Result<Self> {
        stream.read_const(&Self::MAGIC.to_le_bytes())?;

        let version = stream.read_u32()?;
        if version != Self::VERSION {
            return Err(Error::UnsupportedStringVersion(version));
        }

        Ok(TweakStringHeader {
            magic: Self::MAGIC,
            version,
            record_count: stream.read_u32()?,
            flat_count: stream.read_u32()?,
            query_count: stream.read_u32()?,
        })
    }
}

/// The decoded string table: three independent collections sharing the
/// same keying scheme. They are never merged, a string may appear in more
/// than one family.
#[derive(Debug)]
pub struct TweakStrings {
    pub header: TweakStringHeader,
    pub records: HashMap<StringHash, String>,
    pub flats: HashMap<StringHash, String>,
    pub queries: HashMap<StringHash, String>,
}

impl TweakStrings {
    /// Check if data starts with the string table blob magic.
    pub fn is_tweakstr(data: &[u8]) -> bool {
        data.len() >= 4 && data[..4] == TweakStringHeader::MAGIC.to_le_bytes()
    }
}

/// Decoder for the string table blob.
pub struct TweakStringReader<R> {
    stream: ByteStream<R>,
}

impl<R: Read + Seek> TweakStringReader<R> {
    pub fn new(source: R) -> Self {
        TweakStringReader {
            stream: ByteStream::new(source),
        }
    }

    /// Decode the whole string table.
    pub fn read(mut self) -> Result<TweakStrings> {
        let header = TweakStringHeader::read(&mut self.stream)?;
        let records = self.read_collection(header.record_count)?;
        let flats = self.read_collection(header.flat_count)?;
        let queries = self.read_collection(header.query_count)?;

        Ok(TweakStrings {
            header,
            records,
            flats,
            queries,
        })
    }

    fn read_collection(&mut self, count: u32) -> Result<HashMap<StringHash, String>> {
        let mut strings = HashMap::with_capacity(count as usize);
        for _ in 0..count {
            let text = self.stream.read_string()?;
            strings.insert(StringHash::of(&text), text);
        }
        Ok(strings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_utf8_string(text: &str) -> Vec<u8> {
        // single-byte negative vint32 prefix; enough for test strings
        assert!(text.len() <= 0x3f);
        let mut bytes = vec![0x80 | text.len() as u8];
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }

    fn build_blob(records: &[&str], flats: &[&str], queries: &[&str]) -> Vec<u8> {
        let mut blob = Vec::new();
        blob.extend_from_slice(&TweakStringHeader::MAGIC.to_le_bytes());
        blob.extend_from_slice(&TweakStringHeader::VERSION.to_le_bytes());
        blob.extend_from_slice(&(records.len() as u32).to_le_bytes());
        blob.extend_from_slice(&(flats.len() as u32).to_le_bytes());
        blob.extend_from_slice(&(queries.len() as u32).to_le_bytes());
        for text in records.iter().chain(flats).chain(queries) {
            blob.extend_from_slice(&encode_utf8_string(text));
        }
        blob
    }

    #[test]
    fn test_string_hash_composite() {
        // crc32("Base") = 0x6086515F, 4 characters
        let hash = StringHash::of("Base");
        assert_eq!(hash.0, 0x6086515F | (4u64 << 32));
        assert_eq!(hash.0, 0x4_6086_515F);
    }

    #[test]
    fn test_string_hash_counts_characters_not_bytes() {
        // 2 characters, 4 UTF-8 bytes
        let text = "éé";
        assert_eq!(text.len(), 4);
        let hash = StringHash::of(text);
        assert_eq!(hash.0 >> 32, 2);
        assert_eq!(hash.0 as u32, crc32fast::hash(text.as_bytes()));
    }

    #[test]
    fn test_decode_collections() {
        let blob = build_blob(
            &["Items.Preset_Base", "Vehicle.v_standard2_archer"],
            &["Base"],
            &[],
        );
        let strings = TweakStringReader::new(Cursor::new(blob)).read().unwrap();

        assert_eq!(strings.header.record_count, 2);
        assert_eq!(strings.records.len(), 2);
        assert_eq!(
            strings.records[&StringHash::of("Items.Preset_Base")],
            "Items.Preset_Base"
        );
        assert_eq!(strings.flats[&StringHash(0x4_6086_515F)], "Base");
        assert!(strings.queries.is_empty());
    }

    #[test]
    fn test_reject_bad_version() {
        let mut blob = build_blob(&[], &[], &[]);
        blob[4] = 2;
        match TweakStringReader::new(Cursor::new(blob)).read() {
            Err(Error::UnsupportedStringVersion(2)) => {}
            other => panic!("expected UnsupportedStringVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_is_tweakstr() {
        assert!(TweakStrings::is_tweakstr(
            &TweakStringHeader::MAGIC.to_le_bytes()
        ));
        assert!(!TweakStrings::is_tweakstr(
            &0x0BB1_DB47u32.to_le_bytes()
        ));
    }
}
