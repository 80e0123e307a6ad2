//! Account State Structures
//!
//! Typed views of the accounts the vault program writes.
//!
//! # Account Types
//!
//! | Type | Size | Description |
//! |------|------|-------------|
//! | ConfigAccount | 287 bytes | Program-wide settings and balances |
//! | Escrow | 105 bytes | One maker's open token swap |
//!
//! # Serialization
//!
//! Every layout is a [`FieldSchema`] table:
//! - Little-endian for integers
//! - No padding between fields
//! - Same data always produces same bytes
//!
//! The table is shared by [`crate::decoder::decode`], so a typed record and
//! a generic [`Record`] always agree on offsets.
//!
//! ```ignore
//! let config = ConfigAccount::unpack(&account.data)?;  // Read
//! let bytes = config.pack()?;                           // Write
//! ```

// =============================================================================
// SUBMODULES
// =============================================================================

pub mod config;
pub mod escrow;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use config::{ConfigAccount, Status, MINT_SLOTS, STATUS_TABLE};
pub use escrow::Escrow;

use crate::{
    decoder::decode,
    error::CodecError,
    schema::{FieldSchema, FieldValue, Record},
};

// =============================================================================
// PACK TRAIT
// =============================================================================

/// Packing and unpacking of account state through its schema.
///
/// Implementors describe their layout once in [`Pack::SCHEMA`] and convert
/// between the typed struct and a [`Record`]; the byte work is shared.
///
/// # Example Implementation
///
/// ```ignore
/// impl Pack for MyState {
///     const SCHEMA: FieldSchema = FieldSchema::new("my_state", &[
///         FieldSpec::new("amount", FieldType::U64),
///     ]);
///
///     fn from_record(record: &Record) -> Result<Self, CodecError> {
///         Ok(MyState { amount: record.u64("amount")? })
///     }
///
///     fn to_values(&self) -> Vec<FieldValue> {
///         vec![FieldValue::uint(self.amount)]
///     }
/// }
/// ```
pub trait Pack: Sized {
    /// Field layout of the account.
    const SCHEMA: FieldSchema;

    /// The fixed size in bytes when serialized.
    ///
    /// Used to validate account data length and to size new accounts.
    const LEN: usize = Self::SCHEMA.len();

    /// Build the typed value from a decoded record.
    fn from_record(record: &Record) -> Result<Self, CodecError>;

    /// Field values in schema order.
    fn to_values(&self) -> Vec<FieldValue>;

    /// Deserialize from exactly [`Pack::LEN`] bytes.
    ///
    /// # Errors
    /// * `SchemaLength` - input is not exactly `LEN` bytes
    /// * `Field` - a field holds an illegal byte pattern
    fn unpack(input: &[u8]) -> Result<Self, CodecError> {
        let record = decode(input, &Self::SCHEMA)?;
        Self::from_record(&record)
    }

    /// Serialize into a fresh buffer of [`Pack::LEN`] bytes.
    fn pack(&self) -> Result<Vec<u8>, CodecError> {
        Self::SCHEMA.encode(&self.to_values())
    }

    /// Serialize into an existing account buffer.
    ///
    /// Checks that `dst.len() == Self::LEN` before writing.
    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), CodecError> {
        if dst.len() != Self::LEN {
            return Err(CodecError::SchemaLength {
                expected: Self::LEN,
                actual: dst.len(),
            });
        }
        dst.copy_from_slice(&self.pack()?);
        Ok(())
    }
}
