//! Escrow Account State
//!
//! One open swap offer: the maker locks `amount` of `mint_maker` and asks for
//! `mint_taker` in return. The account lives at
//! [`crate::pda::escrow_address`] for `(maker, id)`.
//!
//! # Size: 105 bytes

use crate::{
    error::CodecError,
    schema::{FieldSchema, FieldSpec, FieldType, FieldValue, Record},
    state::Pack,
};
use solana_program::pubkey::Pubkey;

/// Escrow account data.
///
/// # Memory Layout (105 bytes total)
///
/// ```text
/// ┌────────┬──────┬────────────┬────────┐
/// │ Offset │ Size │ Field      │ Type   │
/// ├────────┼──────┼────────────┼────────┤
/// │ 0      │ 32   │ maker      │ Pubkey │
/// │ 32     │ 32   │ mint_maker │ Pubkey │
/// │ 64     │ 32   │ mint_taker │ Pubkey │
/// │ 96     │ 8    │ amount     │ u64    │
/// │ 104    │ 1    │ bump       │ u8     │
/// └────────┴──────┴────────────┴────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Escrow {
    pub maker: Pubkey,
    pub mint_maker: Pubkey,
    pub mint_taker: Pubkey,
    /// Amount of `mint_taker` the maker asks for.
    pub amount: u64,
    pub bump: u8,
}

impl Pack for Escrow {
    const SCHEMA: FieldSchema = FieldSchema::new(
        "escrow",
        &[
            FieldSpec::new("maker", FieldType::Address),
            FieldSpec::new("mint_maker", FieldType::Address),
            FieldSpec::new("mint_taker", FieldType::Address),
            FieldSpec::new("amount", FieldType::U64),
            FieldSpec::new("bump", FieldType::U8),
        ],
    );

    fn from_record(record: &Record) -> Result<Self, CodecError> {
        Ok(Escrow {
            maker: record.address("maker")?,
            mint_maker: record.address("mint_maker")?,
            mint_taker: record.address("mint_taker")?,
            amount: record.u64("amount")?,
            bump: record.u8("bump")?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Address(self.maker),
            FieldValue::Address(self.mint_maker),
            FieldValue::Address(self.mint_taker),
            FieldValue::uint(self.amount),
            FieldValue::uint(self.bump),
        ]
    }
}
