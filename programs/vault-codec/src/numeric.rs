//! Numeric Codec
//!
//! Unsigned integers to and from fixed-width little-endian bytes, and
//! booleans / enumerated statuses to and from single bytes.
//!
//! # Widths used by the vault program
//!
//! | Type | Bytes |
//! |------|-------|
//! | u8 | 1 |
//! | u32 | 4 |
//! | u64 | 8 |
//! | bool | 1 (0 or 1 only) |
//! | enum | 1 |
//!
//! No signed integers and no floating point cross the wire.

use crate::error::CodecError;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

// =============================================================================
// UNSIGNED INTEGERS
// =============================================================================

/// Encode a non-negative integer into exactly `width` little-endian bytes.
///
/// Accepts anything convertible into a [`BigInt`] (`u8`..`u128`, `i64`,
/// [`BigUint`], ...), so the range check happens here rather than in a
/// native cast that could wrap.
///
/// # Errors
///
/// * `Range` if `value < 0`
/// * `Overflow` if `value >= 2^(8 * width)`
///
/// # Example
///
/// ```
/// use vault_codec::numeric::encode_uint;
///
/// assert_eq!(encode_uint(1000u64, 4).unwrap(), vec![0xE8, 0x03, 0x00, 0x00]);
/// assert!(encode_uint(256u64, 1).is_err());
/// ```
pub fn encode_uint<V: Into<BigInt>>(value: V, width: usize) -> Result<Vec<u8>, CodecError> {
    let value: BigInt = value.into();
    if value.sign() == Sign::Minus {
        return Err(CodecError::Range {
            value: value.to_string(),
        });
    }

    let mut bytes = if value.is_zero() {
        Vec::new()
    } else {
        value.magnitude().to_bytes_le()
    };
    if bytes.len() > width {
        return Err(CodecError::Overflow {
            value: value.to_string(),
            width,
        });
    }
    bytes.resize(width, 0);
    Ok(bytes)
}

/// Interpret the whole slice as a little-endian unsigned integer.
///
/// The slice length is the width; an empty slice decodes to zero.
pub fn decode_uint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Narrow a decoded value to `u64`.
pub fn narrow_u64(value: &BigUint) -> Result<u64, CodecError> {
    value.to_u64().ok_or_else(|| CodecError::Overflow {
        value: value.to_string(),
        width: 8,
    })
}

/// Narrow a decoded value to `u32`.
pub fn narrow_u32(value: &BigUint) -> Result<u32, CodecError> {
    value.to_u32().ok_or_else(|| CodecError::Overflow {
        value: value.to_string(),
        width: 4,
    })
}

/// Narrow a decoded value to `u8`.
pub fn narrow_u8(value: &BigUint) -> Result<u8, CodecError> {
    value.to_u8().ok_or_else(|| CodecError::Overflow {
        value: value.to_string(),
        width: 1,
    })
}

/// Decode exactly 8 bytes as a `u64`.
pub fn decode_u64(bytes: &[u8]) -> Result<u64, CodecError> {
    let bytes: [u8; 8] = bytes.try_into().map_err(|_| CodecError::SchemaLength {
        expected: 8,
        actual: bytes.len(),
    })?;
    Ok(u64::from_le_bytes(bytes))
}

/// Decode exactly 4 bytes as a `u32`.
pub fn decode_u32(bytes: &[u8]) -> Result<u32, CodecError> {
    let bytes: [u8; 4] = bytes.try_into().map_err(|_| CodecError::SchemaLength {
        expected: 4,
        actual: bytes.len(),
    })?;
    Ok(u32::from_le_bytes(bytes))
}

/// Decode exactly 1 byte as a `u8`.
pub fn decode_u8(bytes: &[u8]) -> Result<u8, CodecError> {
    match bytes {
        [byte] => Ok(*byte),
        _ => Err(CodecError::SchemaLength {
            expected: 1,
            actual: bytes.len(),
        }),
    }
}

// =============================================================================
// BOOLEANS
// =============================================================================

/// `true -> 1`, `false -> 0`.
pub fn encode_bool(value: bool) -> u8 {
    u8::from(value)
}

/// Strict bool decoding: only 0 and 1 are legal.
///
/// Any other byte is `InvalidEnum { table: "bool" }`; it is never coerced to
/// `true`.
pub fn decode_bool(byte: u8) -> Result<bool, CodecError> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(CodecError::InvalidEnum {
            table: "bool",
            value,
        }),
    }
}

// =============================================================================
// ENUM TABLES
// =============================================================================

/// A closed, bijective mapping between bytes and symbolic names.
///
/// ```
/// use vault_codec::numeric::EnumTable;
///
/// const SWITCH: EnumTable = EnumTable::new("switch", &[(0, "Active"), (1, "Paused")]);
///
/// assert_eq!(SWITCH.encode("Paused").unwrap(), 1);
/// assert_eq!(SWITCH.decode(0).unwrap(), "Active");
/// assert!(SWITCH.decode(2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumTable {
    name: &'static str,
    entries: &'static [(u8, &'static str)],
}

impl EnumTable {
    /// Build a table. Entries must be unique in both byte and symbol.
    pub const fn new(name: &'static str, entries: &'static [(u8, &'static str)]) -> Self {
        Self { name, entries }
    }

    /// Table name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All `(byte, symbol)` pairs in declaration order.
    pub fn entries(&self) -> &'static [(u8, &'static str)] {
        self.entries
    }

    /// Symbol -> byte.
    pub fn encode(&self, symbol: &str) -> Result<u8, CodecError> {
        self.entries
            .iter()
            .find(|(_, s)| *s == symbol)
            .map(|(byte, _)| *byte)
            .ok_or_else(|| CodecError::UnknownSymbol {
                table: self.name,
                symbol: symbol.to_string(),
            })
    }

    /// Byte -> symbol.
    pub fn decode(&self, byte: u8) -> Result<&'static str, CodecError> {
        self.entries
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, symbol)| *symbol)
            .ok_or(CodecError::InvalidEnum {
                table: self.name,
                value: byte,
            })
    }

    /// Canonical `&'static` form of `symbol`, if it belongs to the table.
    pub fn symbol(&self, symbol: &str) -> Result<&'static str, CodecError> {
        self.encode(symbol).and_then(|byte| self.decode(byte))
    }
}
