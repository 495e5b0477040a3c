//! Main TweakDB blob decoder

use std::collections::HashMap;
use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::stream::ByteStream;
use crate::tweakdb::header::TweakDbHeader;
use crate::tweakdb::types::{Flat, FlatType, NameLookup, TweakDbId};

/// How flat type hashes resolve to value decoders.
///
/// Two blob generations exist with identical section layouts: one is
/// decoded against the fixed table of type hashes baked into this crate,
/// the other against a caller-supplied type dictionary. Both carry the
/// same magic and version fields, so the caller picks the variant.
pub enum FlatTypeTable<'a> {
    /// The fixed table of known 64-bit type hashes.
    Builtin,
    /// Resolve hashes to wire type names through a dictionary, then
    /// dispatch by name.
    Names(&'a dyn NameLookup),
}

/// A decoded tweak database.
///
/// Built in a single pass; immutable afterwards. Any decode failure aborts
/// the whole operation with no partial result.
#[derive(Debug)]
pub struct TweakDb {
    pub header: TweakDbHeader,
    pub flats: HashMap<TweakDbId, Flat>,
    pub records: HashMap<TweakDbId, String>,
    pub queries: HashMap<TweakDbId, Vec<TweakDbId>>,
    pub group_tags: HashMap<TweakDbId, u8>,
}

impl TweakDb {
    /// Check if data starts with the TweakDB blob magic.
    pub fn is_tweakdb(data: &[u8]) -> bool {
        data.len() >= 4 && data[..4] == TweakDbHeader::MAGIC.to_le_bytes()
    }
}

/// Decoder over an open byte source.
///
/// Owns the source for the duration of the decode. Sections are visited by
/// seeking to the absolute offsets recorded in the header, so the source
/// must not be shared with other readers.
pub struct TweakDbReader<'a, R> {
    stream: ByteStream<R>,
    record_names: &'a dyn NameLookup,
    flat_types: FlatTypeTable<'a>,
}

impl<'a, R: Read + Seek> TweakDbReader<'a, R> {
    pub fn new(
        source: R,
        record_names: &'a dyn NameLookup,
        flat_types: FlatTypeTable<'a>,
    ) -> Self {
        TweakDbReader {
            stream: ByteStream::new(source),
            record_names,
            flat_types,
        }
    }

    /// Decode the whole database.
    pub fn read(mut self) -> Result<TweakDb> {
        let header = TweakDbHeader::read(&mut self.stream)?;
        let flats = self.read_flats(header.flats_offset)?;
        let records = self.read_records(header.records_offset)?;
        let queries = self.read_queries(header.queries_offset)?;
        let group_tags = self.read_group_tags(header.group_tags_offset)?;

        Ok(TweakDb {
            header,
            flats,
            records,
            queries,
            group_tags,
        })
    }

    fn resolve_flat_type(&self, hash: u64) -> Result<FlatType> {
        match self.flat_types {
            FlatTypeTable::Builtin => FlatType::from_hash(hash),
            FlatTypeTable::Names(names) => {
                let name = names.resolve(hash).ok_or(Error::UnknownTypeHash(hash))?;
                FlatType::from_name(name)
            }
        }
    }

    /// Flats are stored per type: a table of (type hash, entry count)
    /// pairs, then for each type its full value array followed by a key
    /// table mapping each TweakDBID to an index into that array.
    fn read_flats(&mut self, offset: u32) -> Result<HashMap<TweakDbId, Flat>> {
        self.stream.seek_to(offset as u64)?;

        // wire order matters: each type's values follow the previous
        // type's key table
        let type_table = self
            .stream
            .read_array(|s| Ok((s.read_u64()?, s.read_u32()?)))?;

        let mut flats = HashMap::new();
        for (type_hash, _count) in type_table {
            let ty = self.resolve_flat_type(type_hash)?;
            let values = self.stream.read_array(|s| ty.decode(s))?;

            let key_count = self.stream.read_i32()?;
            if key_count < 0 {
                return Err(Error::InvalidLength(key_count as i64));
            }
            for _ in 0..key_count {
                let id = self.stream.read_tweakdbid()?;
                let index = self.stream.read_i32()?;
                let value = usize::try_from(index)
                    .ok()
                    .and_then(|i| values.get(i))
                    .ok_or(Error::FlatIndexOutOfRange {
                        index,
                        len: values.len(),
                    })?
                    .clone();
                flats.insert(
                    id,
                    Flat {
                        ty: ty.clone(),
                        value,
                    },
                );
            }
        }

        Ok(flats)
    }

    fn read_records(&mut self, offset: u32) -> Result<HashMap<TweakDbId, String>> {
        self.stream.seek_to(offset as u64)?;
        let record_names = self.record_names;
        self.stream.read_dict(
            |s| s.read_tweakdbid(),
            |s| {
                let raw = s.read_u32()?;
                let name = record_names
                    .resolve(raw as u64)
                    .ok_or(Error::UnknownRecordHash(raw))?;
                Ok(name.to_string())
            },
        )
    }

    fn read_queries(&mut self, offset: u32) -> Result<HashMap<TweakDbId, Vec<TweakDbId>>> {
        self.stream.seek_to(offset as u64)?;
        self.stream.read_dict(
            |s| s.read_tweakdbid(),
            |s| s.read_array(|s| s.read_tweakdbid()),
        )
    }

    fn read_group_tags(&mut self, offset: u32) -> Result<HashMap<TweakDbId, u8>> {
        self.stream.seek_to(offset as u64)?;
        self.stream
            .read_dict(|s| s.read_tweakdbid(), |s| s.read_u8())
    }
}
