//! Config Account State
//!
//! The single program-wide config account: accepted mints, the three
//! authorities, the fee, running balances and a status switch.
//!
//! # Size: 287 bytes (no padding, every field byte-aligned)

use crate::{
    error::CodecError,
    numeric::EnumTable,
    schema::{FieldSchema, FieldSpec, FieldType, FieldValue, Record},
    state::Pack,
    text::LABEL_LEN,
};
use solana_program::pubkey::Pubkey;

/// Number of mint slots in the config account.
pub const MINT_SLOTS: usize = 4;

const MINT_FIELDS: [&str; MINT_SLOTS] = ["mint_0", "mint_1", "mint_2", "mint_3"];

// =============================================================================
// STATUS
// =============================================================================

/// Byte table for [`Status`].
pub const STATUS_TABLE: EnumTable = EnumTable::new(
    "status",
    &[
        (0, "Waiting"),
        (1, "Active"),
        (2, "Expired"),
        (3, "Paused"),
        (4, "Canceled"),
    ],
);

/// Lifecycle status stored in the config account.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// Freshly created; a zeroed account reads as this.
    #[default]
    Waiting = 0,
    Active = 1,
    Expired = 2,
    Paused = 3,
    Canceled = 4,
}

impl Status {
    pub fn as_symbol(self) -> &'static str {
        match self {
            Status::Waiting => "Waiting",
            Status::Active => "Active",
            Status::Expired => "Expired",
            Status::Paused => "Paused",
            Status::Canceled => "Canceled",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, CodecError> {
        Self::try_from(STATUS_TABLE.encode(symbol)?)
    }
}

impl TryFrom<u8> for Status {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Status::Waiting),
            1 => Ok(Status::Active),
            2 => Ok(Status::Expired),
            3 => Ok(Status::Paused),
            4 => Ok(Status::Canceled),
            value => Err(CodecError::InvalidEnum {
                table: STATUS_TABLE.name(),
                value,
            }),
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status as u8
    }
}

// =============================================================================
// CONFIG ACCOUNT
// =============================================================================

/// Config account data.
///
/// # Memory Layout (287 bytes total)
///
/// ```text
/// ┌────────┬──────┬───────────────┬──────────────────┐
/// │ Offset │ Size │ Field         │ Type             │
/// ├────────┼──────┼───────────────┼──────────────────┤
/// │ 0      │ 128  │ mints[0..4]   │ 4 x Pubkey       │
/// │ 128    │ 32   │ authority     │ Pubkey (vault)   │
/// │ 160    │ 32   │ owner         │ Pubkey           │
/// │ 192    │ 32   │ admin         │ Pubkey           │
/// │ 224    │ 32   │ label         │ null-padded UTF-8│
/// │ 256    │ 8    │ fee           │ u64              │
/// │ 264    │ 8    │ sol_balance   │ u64              │
/// │ 272    │ 8    │ token_balance │ u64              │
/// │ 280    │ 4    │ updated_at    │ u32 (unix secs)  │
/// │ 284    │ 1    │ is_authorized │ bool (0 or 1)    │
/// │ 285    │ 1    │ status        │ Status           │
/// │ 286    │ 1    │ bump          │ u8               │
/// └────────┴──────┴───────────────┴──────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigAccount {
    pub mints: [Pubkey; MINT_SLOTS],
    /// Vault authority.
    pub authority: Pubkey,
    pub owner: Pubkey,
    pub admin: Pubkey,
    pub label: String,
    pub fee: u64,
    pub sol_balance: u64,
    pub token_balance: u64,
    pub updated_at: u32,
    pub is_authorized: bool,
    pub status: Status,
    /// Bump of the config address itself.
    pub bump: u8,
}

impl Pack for ConfigAccount {
    const SCHEMA: FieldSchema = FieldSchema::new(
        "config",
        &[
            FieldSpec::new("mint_0", FieldType::Address),
            FieldSpec::new("mint_1", FieldType::Address),
            FieldSpec::new("mint_2", FieldType::Address),
            FieldSpec::new("mint_3", FieldType::Address),
            FieldSpec::new("authority", FieldType::Address),
            FieldSpec::new("owner", FieldType::Address),
            FieldSpec::new("admin", FieldType::Address),
            FieldSpec::new("label", FieldType::FixedString(LABEL_LEN)),
            FieldSpec::new("fee", FieldType::U64),
            FieldSpec::new("sol_balance", FieldType::U64),
            FieldSpec::new("token_balance", FieldType::U64),
            FieldSpec::new("updated_at", FieldType::U32),
            FieldSpec::new("is_authorized", FieldType::Bool),
            FieldSpec::new("status", FieldType::Enum8(&STATUS_TABLE)),
            FieldSpec::new("bump", FieldType::U8),
        ],
    );

    fn from_record(record: &Record) -> Result<Self, CodecError> {
        let mut mints = [Pubkey::default(); MINT_SLOTS];
        for (mint, name) in mints.iter_mut().zip(MINT_FIELDS) {
            *mint = record.address(name)?;
        }

        Ok(ConfigAccount {
            mints,
            authority: record.address("authority")?,
            owner: record.address("owner")?,
            admin: record.address("admin")?,
            label: record.text("label")?,
            fee: record.u64("fee")?,
            sol_balance: record.u64("sol_balance")?,
            token_balance: record.u64("token_balance")?,
            updated_at: record.u32("updated_at")?,
            is_authorized: record.bool("is_authorized")?,
            status: Status::from_symbol(record.symbol("status")?)?,
            bump: record.u8("bump")?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        let mut values: Vec<FieldValue> =
            self.mints.iter().copied().map(FieldValue::Address).collect();
        values.extend([
            FieldValue::Address(self.authority),
            FieldValue::Address(self.owner),
            FieldValue::Address(self.admin),
            FieldValue::Text(self.label.clone()),
            FieldValue::uint(self.fee),
            FieldValue::uint(self.sol_balance),
            FieldValue::uint(self.token_balance),
            FieldValue::uint(self.updated_at),
            FieldValue::Bool(self.is_authorized),
            FieldValue::Enum(self.status.as_symbol()),
            FieldValue::uint(self.bump),
        ]);
        values
    }
}
