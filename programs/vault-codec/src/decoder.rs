//! Account State Decoder
//!
//! Walks a raw account buffer field by field using a [`FieldSchema`],
//! keeping a running byte offset. No field carries its own length, so the
//! schema alone decides how the bytes are split.
//!
//! ```text
//! raw:    [ field 0 ][ field 1 ][ ......... ][ field n ]
//! offset:  0         w0         w0+w1        ...        == raw.len()
//! ```

use crate::{
    error::CodecError,
    numeric::{decode_bool, decode_uint},
    schema::{FieldSchema, FieldType, FieldValue, Record},
    text::decode_fixed,
};
use arrayref::array_ref;
use solana_program::pubkey::Pubkey;

/// Decode `raw` into a [`Record`] according to `schema`.
///
/// # Errors
///
/// * `SchemaLength` when `raw` is shorter or longer than the schema. A short
///   buffer is caught before any slicing.
/// * `Field { name, offset, source }` when a single field fails (an enum
///   byte outside its table, a bool that is not 0/1, invalid UTF-8, a
///   non-zero padding byte).
pub fn decode(raw: &[u8], schema: &FieldSchema) -> Result<Record, CodecError> {
    let expected = schema.len();
    if raw.len() < expected {
        return Err(CodecError::SchemaLength {
            expected,
            actual: raw.len(),
        });
    }

    let mut record = Record::new();
    let mut offset = 0;

    for field in schema.fields {
        let width = field.ty.width();
        let value = decode_field(&field.ty, raw, offset)
            .map_err(|e| e.at_field(field.name, offset))?;
        record.push(field.name, value);
        offset += width;
    }

    if offset != raw.len() {
        return Err(CodecError::SchemaLength {
            expected: offset,
            actual: raw.len(),
        });
    }

    Ok(record)
}

fn decode_field(ty: &FieldType, raw: &[u8], offset: usize) -> Result<FieldValue, CodecError> {
    let value = match ty {
        FieldType::U8 => FieldValue::Uint(decode_uint(array_ref![raw, offset, 1])),
        FieldType::U32 => FieldValue::Uint(decode_uint(array_ref![raw, offset, 4])),
        FieldType::U64 => FieldValue::Uint(decode_uint(array_ref![raw, offset, 8])),
        FieldType::Bool => FieldValue::Bool(decode_bool(raw[offset])?),
        FieldType::Enum8(table) => FieldValue::Enum(table.decode(raw[offset])?),
        FieldType::Address => FieldValue::Address(Pubkey::new_from_array(*array_ref![
            raw, offset, 32
        ])),
        FieldType::FixedString(n) => FieldValue::Text(decode_fixed(&raw[offset..offset + *n])?),
        FieldType::Padding(n) => {
            check_padding(&raw[offset..offset + *n])?;
            FieldValue::Padding
        }
    };
    Ok(value)
}

/// Padding is written as zeros; anything else means the layout is wrong.
fn check_padding(bytes: &[u8]) -> Result<(), CodecError> {
    match bytes.iter().position(|&b| b != 0) {
        Some(index) => Err(CodecError::NonZeroPadding {
            index,
            value: bytes[index],
        }),
        None => Ok(()),
    }
}
