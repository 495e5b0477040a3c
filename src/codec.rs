//! Format primitives shared by the TweakDB and string table blobs
//!
//! Both blob types build on the same handful of encodings: a variable
//! length signed integer, a length-prefixed string whose character width is
//! selected by the sign of the prefix, count-prefixed arrays and mappings,
//! and a named-field struct record used for the fixed-size math types.
//! A misread length here corrupts every subsequent offset, so each reader
//! consumes exactly the bytes the format defines and nothing else.

use std::collections::HashMap;
use std::hash::Hash;
use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::stream::ByteStream;
use crate::tweakdb::TweakDbId;

impl<R: Read + Seek> ByteStream<R> {
    /// Read a variable-length signed 32-bit integer.
    ///
    /// The first byte carries a sign flag (bit 7), a continuation flag
    /// (bit 6) and 6 value bits. Each continuation byte carries a
    /// continuation flag (bit 7) and 7 value bits, accumulated at shifts
    /// 6, 13, 20 and 27. A continuation flag still set after the fourth
    /// continuation byte is malformed.
    pub fn read_vint32(&mut self) -> Result<i32> {
        let b = self.read_u8()?;
        let negative = b & 0b1000_0000 != 0;
        let mut has_next = b & 0b0100_0000 != 0;
        let mut value = (b & 0b0011_1111) as u64;

        let mut shifts = [6u32, 13, 20, 27].into_iter();
        while has_next {
            let shift = shifts.next().ok_or(Error::MalformedVarint)?;
            let b = self.read_u8()?;
            has_next = b & 0b1000_0000 != 0;
            value |= ((b & 0b0111_1111) as u64) << shift;
        }

        let value = if negative {
            -(value as i64)
        } else {
            value as i64
        };
        i32::try_from(value).map_err(|_| Error::MalformedVarint)
    }

    /// Read a length-prefixed string.
    ///
    /// The prefix is a vint32; its absolute value is the length in
    /// characters and its sign selects the encoding: positive means
    /// UTF-16LE (two bytes per unit), negative means UTF-8. A zero prefix
    /// is an empty string regardless of sign, with no further bytes
    /// consumed.
    pub fn read_string(&mut self) -> Result<String> {
        let prefix = self.read_vint32()?;
        let length = prefix.unsigned_abs() as usize;

        if length == 0 {
            return Ok(String::new());
        }

        if prefix > 0 {
            let bytes = self.read_bytes(length * 2)?;
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            Ok(String::from_utf16_lossy(&units))
        } else {
            let bytes = self.read_bytes(length)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? > 0)
    }

    pub fn read_tweakdbid(&mut self) -> Result<TweakDbId> {
        Ok(TweakDbId(self.read_u64()?))
    }

    /// Read a count-prefixed sequence, decoding each element with `item`.
    pub fn read_array<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let count = self.read_u32()?;
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Read a count-prefixed mapping. Later duplicate keys overwrite
    /// earlier ones.
    pub fn read_dict<K: Eq + Hash, V>(
        &mut self,
        mut key: impl FnMut(&mut Self) -> Result<K>,
        mut val: impl FnMut(&mut Self) -> Result<V>,
    ) -> Result<HashMap<K, V>> {
        let count = self.read_u32()?;
        let mut map = HashMap::with_capacity(count as usize);
        for _ in 0..count {
            let k = key(self)?;
            let v = val(self)?;
            map.insert(k, v);
        }
        Ok(map)
    }

    /// Read one named struct field: name, type name, a constant (always
    /// 0x8), then the value. `Float` is the only field type the format has
    /// been observed to use.
    pub(crate) fn read_field(&mut self) -> Result<f32> {
        let _name = self.read_string()?;
        let field_type = self.read_string()?;
        let _marker = self.read_u32()?; // always 0x8
        debug_assert_eq!(_marker, 0x8);

        match field_type.as_str() {
            "Float" => self.read_f32(),
            _ => Err(Error::UnknownFieldType(field_type)),
        }
    }

    /// Read a fixed record of `N` named fields: one marker byte, the
    /// fields, then a trailing `"None"` string. The trailing string is not
    /// enforced, but skipping the read would desynchronize the stream.
    pub(crate) fn read_struct<const N: usize>(&mut self) -> Result<[f32; N]> {
        self.read_u8()?; // unknown marker byte
        let mut fields = [0.0f32; N];
        for field in &mut fields {
            *field = self.read_field()?;
        }
        let _terminator = self.read_string()?;
        debug_assert_eq!(_terminator, "None");
        Ok(fields)
    }
}
