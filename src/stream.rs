//! Bounds-checked primitive reads over a seekable byte source
//!
//! TweakDB blobs record absolute section offsets in their headers and the
//! sections are not visited in linear order, so every decoder in this crate
//! works through [`ByteStream`]: little-endian fixed-width reads plus
//! absolute seeking, with stream exhaustion reported as a crate error
//! instead of a bare IO error.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{Error, Result};

/// Little-endian reader over any seekable byte source.
///
/// The stream owns the source for the duration of a decode; sequential
/// seeks mean concurrent readers on the same source would corrupt position
/// state.
pub struct ByteStream<R> {
    inner: R,
}

impl<R: Read + Seek> ByteStream<R> {
    pub fn new(inner: R) -> Self {
        ByteStream { inner }
    }

    /// Consume the stream and return the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf).map_err(|e| map_eof(e, len))?;
        Ok(buf)
    }

    /// Read `expected.len()` bytes and verify they match.
    pub fn read_const(&mut self, expected: &[u8]) -> Result<()> {
        let found = self.read_bytes(expected.len())?;
        if found != expected {
            return Err(Error::UnexpectedBytes {
                expected: expected.to_vec(),
                found,
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.inner.read_u8().map_err(|e| map_eof(e, 1))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.inner.read_i8().map_err(|e| map_eof(e, 1))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.inner.read_u16::<LittleEndian>().map_err(|e| map_eof(e, 2))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.inner.read_i16::<LittleEndian>().map_err(|e| map_eof(e, 2))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.inner.read_u32::<LittleEndian>().map_err(|e| map_eof(e, 4))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.inner.read_i32::<LittleEndian>().map_err(|e| map_eof(e, 4))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.inner.read_u64::<LittleEndian>().map_err(|e| map_eof(e, 8))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.inner.read_i64::<LittleEndian>().map_err(|e| map_eof(e, 8))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.inner.read_f32::<LittleEndian>().map_err(|e| map_eof(e, 4))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.inner.read_f64::<LittleEndian>().map_err(|e| map_eof(e, 8))
    }

    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(self.inner.seek(pos)?)
    }

    /// Seek to an absolute offset from the start of the source.
    pub fn seek_to(&mut self, offset: u64) -> Result<u64> {
        self.seek(SeekFrom::Start(offset))
    }

    /// Current position in the source.
    pub fn tell(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }
}

fn map_eof(err: io::Error, requested: usize) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::TruncatedRead(requested)
    } else {
        Error::Io(err)
    }
}
