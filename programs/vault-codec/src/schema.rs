//! Field Schemas
//!
//! A [`FieldSchema`] is the only description of where one field ends and the
//! next begins: the vault program's buffers carry no tags, lengths or
//! markers. The same schema drives encoding ([`FieldSchema::encode`]) and
//! decoding ([`crate::decoder::decode`]).
//!
//! # Field Types
//!
//! | Type | Bytes | Encoding |
//! |------|-------|----------|
//! | `U8` | 1 | unsigned |
//! | `U32` | 4 | unsigned, little-endian |
//! | `U64` | 8 | unsigned, little-endian |
//! | `Bool` | 1 | 0 or 1 |
//! | `Enum8` | 1 | byte from an [`EnumTable`] |
//! | `Address` | 32 | raw pubkey bytes |
//! | `FixedString(N)` | N | null-padded UTF-8 |
//! | `Padding(N)` | N | zeros, must read back as zeros |

use crate::{
    error::CodecError,
    numeric::{encode_bool, encode_uint, narrow_u32, narrow_u64, narrow_u8, EnumTable},
    text::encode_fixed,
};
use num_bigint::BigUint;
use solana_program::pubkey::Pubkey;

/// Size of a serialized address.
pub const ADDRESS_LEN: usize = 32;

// =============================================================================
// FIELD TYPES
// =============================================================================

/// Wire type of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    U8,
    U32,
    U64,
    Bool,
    Enum8(&'static EnumTable),
    Address,
    FixedString(usize),
    Padding(usize),
}

impl FieldType {
    /// Number of bytes this field occupies.
    pub const fn width(&self) -> usize {
        match self {
            FieldType::U8 | FieldType::Bool | FieldType::Enum8(_) => 1,
            FieldType::U32 => 4,
            FieldType::U64 => 8,
            FieldType::Address => ADDRESS_LEN,
            FieldType::FixedString(n) | FieldType::Padding(n) => *n,
        }
    }

    /// Short name used in `TypeMismatch` errors.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldType::U8 | FieldType::U32 | FieldType::U64 => "unsigned integer",
            FieldType::Bool => "bool",
            FieldType::Enum8(_) => "enum",
            FieldType::Address => "address",
            FieldType::FixedString(_) => "text",
            FieldType::Padding(_) => "padding",
        }
    }
}

/// A named, typed field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

// =============================================================================
// FIELD SCHEMA
// =============================================================================

/// Ordered list of fields making up one account or instruction layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FieldSchema {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    /// Total byte length: the sum of every field width.
    pub const fn len(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].ty.width();
            i += 1;
        }
        total
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of the named field, if present.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = 0;
        for field in self.fields {
            if field.name == name {
                return Some(offset);
            }
            offset += field.ty.width();
        }
        None
    }

    /// Encode one value per field, in schema order.
    ///
    /// The output is always exactly [`FieldSchema::len`] bytes. Integer
    /// values wider than their field fail with `Overflow`; text is
    /// truncated or padded to its fixed width.
    pub fn encode(&self, values: &[FieldValue]) -> Result<Vec<u8>, CodecError> {
        if values.len() != self.fields.len() {
            return Err(CodecError::FieldCount {
                schema: self.name,
                expected: self.fields.len(),
                actual: values.len(),
            });
        }

        let mut out = Vec::with_capacity(self.len());
        for (field, value) in self.fields.iter().zip(values) {
            let offset = out.len();
            let bytes = encode_field(field, value).map_err(|e| match e {
                CodecError::TypeMismatch { .. } => e,
                e => e.at_field(field.name, offset),
            })?;
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }
}

fn encode_field(field: &FieldSpec, value: &FieldValue) -> Result<Vec<u8>, CodecError> {
    let mismatch = || CodecError::TypeMismatch {
        field: field.name,
        expected: field.ty.kind(),
    };

    match (&field.ty, value) {
        (FieldType::U8 | FieldType::U32 | FieldType::U64, FieldValue::Uint(v)) => {
            encode_uint(v.clone(), field.ty.width())
        }
        (FieldType::Bool, FieldValue::Bool(b)) => Ok(vec![encode_bool(*b)]),
        (FieldType::Enum8(table), FieldValue::Enum(symbol)) => Ok(vec![table.encode(symbol)?]),
        (FieldType::Address, FieldValue::Address(key)) => Ok(key.to_bytes().to_vec()),
        (FieldType::FixedString(n), FieldValue::Text(text)) => Ok(encode_fixed(text, *n)),
        (FieldType::Padding(n), FieldValue::Padding) => Ok(vec![0; *n]),
        _ => Err(mismatch()),
    }
}

// =============================================================================
// VALUES AND RECORDS
// =============================================================================

/// A decoded (or to-be-encoded) field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Any of `U8`, `U32`, `U64`; the schema decides the width.
    Uint(BigUint),
    Bool(bool),
    /// Symbol from the field's enum table.
    Enum(&'static str),
    Address(Pubkey),
    Text(String),
    Padding,
}

impl FieldValue {
    pub fn uint<V: Into<BigUint>>(value: V) -> Self {
        FieldValue::Uint(value.into())
    }
}

/// Ordered `(name, value)` pairs produced by decoding a buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(&'static str, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: FieldValue) {
        self.fields.push((name, value));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, FieldValue)> {
        self.fields.iter()
    }

    /// Values in schema order; feeds straight back into [`FieldSchema::encode`].
    pub fn values(&self) -> Vec<FieldValue> {
        self.fields.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    fn require(&self, name: &str) -> Result<&FieldValue, CodecError> {
        self.get(name).ok_or_else(|| CodecError::MissingField {
            name: name.to_string(),
        })
    }

    fn uint(&self, name: &'static str) -> Result<&BigUint, CodecError> {
        match self.require(name)? {
            FieldValue::Uint(v) => Ok(v),
            _ => Err(CodecError::TypeMismatch {
                field: name,
                expected: "unsigned integer",
            }),
        }
    }

    pub fn u8(&self, name: &'static str) -> Result<u8, CodecError> {
        narrow_u8(self.uint(name)?)
    }

    pub fn u32(&self, name: &'static str) -> Result<u32, CodecError> {
        narrow_u32(self.uint(name)?)
    }

    pub fn u64(&self, name: &'static str) -> Result<u64, CodecError> {
        narrow_u64(self.uint(name)?)
    }

    pub fn bool(&self, name: &'static str) -> Result<bool, CodecError> {
        match self.require(name)? {
            FieldValue::Bool(b) => Ok(*b),
            _ => Err(CodecError::TypeMismatch {
                field: name,
                expected: "bool",
            }),
        }
    }

    pub fn symbol(&self, name: &'static str) -> Result<&'static str, CodecError> {
        match self.require(name)? {
            FieldValue::Enum(symbol) => Ok(symbol),
            _ => Err(CodecError::TypeMismatch {
                field: name,
                expected: "enum",
            }),
        }
    }

    pub fn address(&self, name: &'static str) -> Result<Pubkey, CodecError> {
        match self.require(name)? {
            FieldValue::Address(key) => Ok(*key),
            _ => Err(CodecError::TypeMismatch {
                field: name,
                expected: "address",
            }),
        }
    }

    pub fn text(&self, name: &'static str) -> Result<String, CodecError> {
        match self.require(name)? {
            FieldValue::Text(text) => Ok(text.clone()),
            _ => Err(CodecError::TypeMismatch {
                field: name,
                expected: "text",
            }),
        }
    }
}
