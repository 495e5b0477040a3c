//! # untweak
//!
//! A Rust library for decoding Cyberpunk 2077 TweakDB binary blobs.
//!
//! ## Overview
//!
//! The game stores its runtime tweak configuration in two binary blobs:
//! `tweakdb.bin`, a database of typed values, type records, queries and
//! group tags keyed by opaque 64-bit TweakDBIDs, and `tweakstr.bin`, a
//! companion table that recovers the original string keys behind those
//! hashes. This library provides:
//!
//! - Decoding `tweakdb.bin` into a structured [`tweakdb::TweakDb`]
//!   document (header, flats, records, queries, group tags)
//! - Both known dispatch variants: the fixed builtin table of 64-bit type
//!   hashes, and name dispatch through caller-supplied dictionaries
//! - Decoding `tweakstr.bin` into three hash-keyed string collections
//! - The shared wire primitives (variable-length integers, sign-selected
//!   string encodings, count-prefixed arrays and mappings)
//!
//! Loading the blobs and the hash dictionaries from disk is the caller's
//! concern; every decoder works over any `Read + Seek` source.
//!
//! ## Example - Tweak database
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use std::io::Cursor;
//! use untweak::tweakdb::{FlatTypeTable, TweakDbReader};
//!
//! let data = std::fs::read("tweakdb.bin")?;
//! let record_names: HashMap<u64, String> = HashMap::new();
//!
//! let db = TweakDbReader::new(
//!     Cursor::new(data),
//!     &record_names,
//!     FlatTypeTable::Builtin,
//! )
//! .read()?;
//!
//! println!("{} flats, {} records", db.flats.len(), db.records.len());
//! # Ok::<(), untweak::Error>(())
//! ```
//!
//! ## Example - String table
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use untweak::tweakstr::{StringHash, TweakStringReader};
//!
//! let data = std::fs::read("tweakstr.bin")?;
//! let strings = TweakStringReader::new(Cursor::new(data)).read()?;
//!
//! // cross-reference a candidate string by recomputing its hash
//! if let Some(text) = strings.records.get(&StringHash::of("Items.Preset_Base")) {
//!     println!("recovered: {}", text);
//! }
//! # Ok::<(), untweak::Error>(())
//! ```

mod codec;

pub mod error;
pub mod stream;
pub mod tweakdb;
pub mod tweakstr;

pub use error::{Error, Result};
pub use stream::ByteStream;
pub use tweakdb::{Flat, FlatType, FlatTypeTable, FlatValue, TweakDb, TweakDbId, TweakDbReader};
pub use tweakstr::{StringHash, TweakStringReader, TweakStrings};
