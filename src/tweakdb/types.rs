//! Data types and flat type dispatch for the TweakDB format

use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::stream::ByteStream;

/// Opaque 64-bit database key. Never interpreted, only compared and looked
/// up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TweakDbId(pub u64);

impl fmt::Display for TweakDbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Hash-to-name dictionary supplied by the caller.
///
/// The blobs only store hashes; the record and type dictionaries that
/// recover the original names are loaded by surrounding tooling and
/// injected here, read-only for the duration of a decode.
pub trait NameLookup {
    fn resolve(&self, hash: u64) -> Option<&str>;
}

impl NameLookup for HashMap<u64, String> {
    fn resolve(&self, hash: u64) -> Option<&str> {
        self.get(&hash).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quaternion {
    pub i: f32,
    pub j: f32,
    pub k: f32,
    pub r: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

/// Wire type of a flat value.
///
/// The set is closed: the format only ever ships these types, and an
/// unrecognized name or hash means the game data outgrew this parser and
/// decoding must stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatType {
    Bool,
    Int32,
    Float,
    String,
    CName,
    TweakDbId,
    /// `raRef:CResource`, an opaque 64-bit resource reference
    ResourceRef,
    /// `gamedataLocKeyWrapper`, an opaque 64-bit localization key
    LocKey,
    Color,
    Vector2,
    Vector3,
    Quaternion,
    EulerAngles,
    Array(Box<FlatType>),
}

impl FlatType {
    /// Resolve a wire type name, recursing through `array:` wrappers.
    pub fn from_name(name: &str) -> Result<Self> {
        if let Some(element) = name.strip_prefix("array:") {
            return Ok(FlatType::Array(Box::new(FlatType::from_name(element)?)));
        }

        // irregular names that plain lowercasing does not cover
        match name {
            "gamedataLocKeyWrapper" => return Ok(FlatType::LocKey),
            "raRef:CResource" => return Ok(FlatType::ResourceRef),
            _ => {}
        }

        Ok(match name.to_ascii_lowercase().as_str() {
            "bool" => FlatType::Bool,
            "int32" => FlatType::Int32,
            "float" => FlatType::Float,
            "string" => FlatType::String,
            "cname" => FlatType::CName,
            "tweakdbid" => FlatType::TweakDbId,
            "color" => FlatType::Color,
            "vector2" => FlatType::Vector2,
            "vector3" => FlatType::Vector3,
            "quaternion" => FlatType::Quaternion,
            "eulerangles" => FlatType::EulerAngles,
            _ => return Err(Error::UnknownType(name.to_string())),
        })
    }

    /// Resolve one of the fixed 64-bit type hashes used by the
    /// self-describing blob variant.
    pub fn from_hash(hash: u64) -> Result<Self> {
        Ok(match hash {
            0xF7BD_D5A7_C820_889D => FlatType::Bool,
            0xB9A1_27F5_B4A6_21BF => FlatType::Int32,
            0xB64F_4A0A_CCC8_A8C5 => FlatType::Float,
            0x58B4_B3EC_D4EB_6238 => FlatType::String,
            0xA5E2_3DE2_A265_7AF9 => FlatType::CName,
            0x4072_151F_F3DC_F7BC => FlatType::TweakDbId,
            0xAF78_D916_D59A_1E5E => FlatType::ResourceRef,
            0xC552_7AD6_07D0_34ED => FlatType::LocKey,
            0x679F_6B8B_B908_3FF0 => FlatType::Vector2,
            0x679F_6C8B_B908_41A3 => FlatType::Vector3,
            0xF1C0_252C_FFE2_75CD => FlatType::Quaternion,
            0x5274_59E8_B7D4_F756 => FlatType::EulerAngles,
            0x272D_3F5D_BEDE_C48C => FlatType::Array(Box::new(FlatType::Bool)),
            0xA1ED_713E_69FB_24D8 => FlatType::Array(Box::new(FlatType::Int32)),
            0xBA0E_F953_A501_8666 => FlatType::Array(Box::new(FlatType::Float)),
            0x91E8_6AB1_5387_7615 => FlatType::Array(Box::new(FlatType::String)),
            0x24D1_E72A_8BBE_64D6 => FlatType::Array(Box::new(FlatType::CName)),
            0x2E57_DE74_8521_342F => FlatType::Array(Box::new(FlatType::TweakDbId)),
            0xBF98_C025_23E2_073D => FlatType::Array(Box::new(FlatType::ResourceRef)),
            0xDC6F_7517_BD43_58D3 => FlatType::Array(Box::new(FlatType::Vector2)),
            0xDC6F_7417_BD43_5720 => FlatType::Array(Box::new(FlatType::Vector3)),
            _ => return Err(Error::UnknownTypeHash(hash)),
        })
    }

    /// Wire name of this type, e.g. `array:Vector3`.
    pub fn name(&self) -> String {
        match self {
            FlatType::Bool => "Bool".into(),
            FlatType::Int32 => "Int32".into(),
            FlatType::Float => "Float".into(),
            FlatType::String => "String".into(),
            FlatType::CName => "CName".into(),
            FlatType::TweakDbId => "TweakDBID".into(),
            FlatType::ResourceRef => "raRef:CResource".into(),
            FlatType::LocKey => "gamedataLocKeyWrapper".into(),
            FlatType::Color => "Color".into(),
            FlatType::Vector2 => "Vector2".into(),
            FlatType::Vector3 => "Vector3".into(),
            FlatType::Quaternion => "Quaternion".into(),
            FlatType::EulerAngles => "EulerAngles".into(),
            FlatType::Array(element) => format!("array:{}", element.name()),
        }
    }

    /// Decode one value of this type at the current stream position.
    pub fn decode<R: Read + Seek>(&self, stream: &mut ByteStream<R>) -> Result<FlatValue> {
        Ok(match self {
            FlatType::Bool => FlatValue::Bool(stream.read_bool()?),
            FlatType::Int32 => FlatValue::Int32(stream.read_i32()?),
            FlatType::Float => FlatValue::Float(stream.read_f32()?),
            FlatType::String | FlatType::CName => FlatValue::String(stream.read_string()?),
            FlatType::TweakDbId => FlatValue::TweakDbId(stream.read_tweakdbid()?),
            FlatType::ResourceRef => FlatValue::ResourceRef(stream.read_u64()?),
            FlatType::LocKey => FlatValue::LocKey(stream.read_u64()?),
            FlatType::Color => {
                let [red, green, blue, alpha] = stream.read_struct::<4>()?;
                FlatValue::Color(Color { red, green, blue, alpha })
            }
            FlatType::Vector2 => {
                let [x, y] = stream.read_struct::<2>()?;
                FlatValue::Vector2(Vector2 { x, y })
            }
            FlatType::Vector3 => {
                let [x, y, z] = stream.read_struct::<3>()?;
                FlatValue::Vector3(Vector3 { x, y, z })
            }
            FlatType::Quaternion => {
                let [i, j, k, r] = stream.read_struct::<4>()?;
                FlatValue::Quaternion(Quaternion { i, j, k, r })
            }
            FlatType::EulerAngles => {
                let [pitch, roll, yaw] = stream.read_struct::<3>()?;
                FlatValue::EulerAngles(EulerAngles { pitch, roll, yaw })
            }
            FlatType::Array(element) => {
                FlatValue::Array(stream.read_array(|s| element.decode(s))?)
            }
        })
    }
}

/// A decoded flat value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Bool(bool),
    Int32(i32),
    Float(f32),
    String(String),
    TweakDbId(TweakDbId),
    ResourceRef(u64),
    LocKey(u64),
    Color(Color),
    Vector2(Vector2),
    Vector3(Vector3),
    Quaternion(Quaternion),
    EulerAngles(EulerAngles),
    Array(Vec<FlatValue>),
}

/// A single typed configuration value addressable by a database key.
#[derive(Debug, Clone, PartialEq)]
pub struct Flat {
    pub ty: FlatType,
    pub value: FlatValue,
}

impl Flat {
    /// Wire name of the flat's type.
    pub fn type_name(&self) -> String {
        self.ty.name()
    }
}
