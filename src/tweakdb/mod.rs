//! TweakDB binary blob parser
//!
//! TweakDB is the binary format Cyberpunk 2077 uses to store its runtime
//! tweak configuration. A blob packs four sections behind a fixed header,
//! each addressed by an absolute offset: typed values ("flats"), per-entry
//! type records, cross-reference queries, and grouping tags.
//!
//! ## Format Overview
//!
//! A TweakDB blob consists of:
//! - 32-byte header with magic, versions, a records checksum and four
//!   section offsets
//! - Flats section: per-type value arrays plus key tables mapping each
//!   TweakDBID to an index into its type's array
//! - Records section: TweakDBID to raw type identifier pairs
//! - Queries section: TweakDBID to TweakDBID-list pairs
//! - Group tags section: TweakDBID to byte pairs
//!
//! Keys are opaque 64-bit TweakDBIDs; names are recovered through
//! caller-supplied dictionaries or the companion string table blob.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use std::io::Cursor;
//! use untweak::tweakdb::{FlatTypeTable, TweakDbReader};
//!
//! let data = std::fs::read("tweakdb.bin")?;
//! let record_names: HashMap<u64, String> = HashMap::new();
//! let db = TweakDbReader::new(
//!     Cursor::new(data),
//!     &record_names,
//!     FlatTypeTable::Builtin,
//! )
//! .read()?;
//!
//! for (id, flat) in &db.flats {
//!     println!("{} = {:?}", id, flat.value);
//! }
//! # Ok::<(), untweak::Error>(())
//! ```

mod header;
mod reader;
mod types;

pub use header::TweakDbHeader;
pub use reader::{FlatTypeTable, TweakDb, TweakDbReader};
pub use types::{
    Color, EulerAngles, Flat, FlatType, FlatValue, NameLookup, Quaternion, TweakDbId, Vector2,
    Vector3,
};
