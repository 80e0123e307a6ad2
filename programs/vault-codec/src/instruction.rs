//! Instruction Types
//!
//! This module defines every instruction the vault program accepts and
//! builds byte-exact payloads for them.
//! Each instruction has:
//! - A discriminator (first byte, identifies the operation)
//! - Fixed-width argument fields (remaining bytes, no tags or lengths)
//! - Expected accounts (ordered, encoded by the constructor functions)
//!
//! # Instruction Format
//!
//! ```text
//! [discriminator: u8][args: laid out by the variant's FieldSchema]
//! ```
//!
//! # Discriminator Values
//!
//! | Value | Instruction | Arg bytes |
//! |-------|-------------|-----------|
//! | 0 | Deposit | 8 |
//! | 1 | Withdraw | 8 |
//! | 2 | Token2022Mint | 1 |
//! | 4 | Token2022InitAccount | 1 |
//! | 5 | TokenDeposit | 9 |
//! | 6 | TokenWithdraw | 9 |
//! | 12 | InitConfig | 42 |
//! | 13 | UpdateConfig | 88 |
//! | 14 | CloseConfig | 0 |
//! | 15 | EscrowMake | 26 |
//! | 17 | EscrowWithdraw | 8 |
//! | 18 | EscrowCancel | 0 |
//! | 19 | ConfigResize | 8 |

use crate::{
    config::VaultConfig,
    decoder::decode,
    error::CodecError,
    numeric::EnumTable,
    schema::{FieldSchema, FieldSpec, FieldType, FieldValue, Record},
    state::{Status, STATUS_TABLE},
    text::LABEL_LEN,
};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

/// Highest mint decimals the program accepts.
pub const MAX_DECIMALS: u8 = 18;

// =============================================================================
// PAYLOAD BUILDER
// =============================================================================

/// Concatenate a discriminator and pre-encoded argument bytes.
///
/// No delimiters are inserted and nothing is validated; the layout is
/// entirely the caller's schema.
///
/// ```
/// use vault_codec::instruction::build;
///
/// let amount = 460_000_000u64.to_le_bytes();
/// let payload = build(0, &[&amount]);
/// assert_eq!(payload[0], 0);
/// assert_eq!(&payload[1..], &amount);
/// ```
pub fn build(discriminator: u8, args: &[&[u8]]) -> Vec<u8> {
    let len = 1 + args.iter().map(|a| a.len()).sum::<usize>();
    let mut buf = Vec::with_capacity(len);
    buf.push(discriminator);
    for arg in args {
        buf.extend_from_slice(arg);
    }
    buf
}

// =============================================================================
// CONFIG SELECTOR
// =============================================================================

/// Byte table for [`ConfigSelector`].
pub const SELECTOR_TABLE: EnumTable =
    EnumTable::new("selector", &[(0, "Status"), (1, "Fee"), (2, "Admin")]);

/// Which config field an `UpdateConfig` call changes.
///
/// # Values
///
/// - `Status (0)`: set `status`
/// - `Fee (1)`: set `fee`
/// - `Admin (2)`: set `admin` from the first extra account
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigSelector {
    #[default]
    Status = 0,
    Fee = 1,
    Admin = 2,
}

impl ConfigSelector {
    pub fn as_symbol(self) -> &'static str {
        match self {
            ConfigSelector::Status => "Status",
            ConfigSelector::Fee => "Fee",
            ConfigSelector::Admin => "Admin",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, CodecError> {
        Self::try_from(SELECTOR_TABLE.encode(symbol)?)
    }
}

impl TryFrom<u8> for ConfigSelector {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ConfigSelector::Status),
            1 => Ok(ConfigSelector::Fee),
            2 => Ok(ConfigSelector::Admin),
            value => Err(CodecError::InvalidEnum {
                table: SELECTOR_TABLE.name(),
                value,
            }),
        }
    }
}

impl From<ConfigSelector> for u8 {
    fn from(selector: ConfigSelector) -> Self {
        selector as u8
    }
}

/// Arguments of `UpdateConfig`.
///
/// The program reads fixed slots: `words[0]` is the update timestamp,
/// `amounts[0]` the new fee, `amounts[1]` a token amount. Unused slots are
/// sent as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateConfigArgs {
    pub flags: [bool; 4],
    pub selector: ConfigSelector,
    pub status: Status,
    pub words: [u32; 4],
    pub amounts: [u64; 4],
    pub label: String,
}

impl UpdateConfigArgs {
    pub fn timestamp(&self) -> u32 {
        self.words[0]
    }

    pub fn fee(&self) -> u64 {
        self.amounts[0]
    }

    pub fn token_amount(&self) -> u64 {
        self.amounts[1]
    }
}

// =============================================================================
// ARGUMENT SCHEMAS
// =============================================================================

const FLAG_FIELDS: [&str; 4] = ["flag_0", "flag_1", "flag_2", "flag_3"];
const WORD_FIELDS: [&str; 4] = ["word_0", "word_1", "word_2", "word_3"];
const AMOUNT_FIELDS: [&str; 4] = ["amount_0", "amount_1", "amount_2", "amount_3"];

const NO_ARGS: FieldSchema = FieldSchema::new("no_args", &[]);

const AMOUNT_ARGS: FieldSchema =
    FieldSchema::new("amount", &[FieldSpec::new("amount", FieldType::U64)]);

const DECIMALS_ARGS: FieldSchema =
    FieldSchema::new("token_2022_mint", &[FieldSpec::new("decimals", FieldType::U8)]);

const INIT_ACCOUNT_ARGS: FieldSchema = FieldSchema::new(
    "token_2022_init_account",
    &[FieldSpec::new("reserved", FieldType::U8)],
);

const TOKEN_ARGS: FieldSchema = FieldSchema::new(
    "token_amount",
    &[
        FieldSpec::new("decimals", FieldType::U8),
        FieldSpec::new("amount", FieldType::U64),
    ],
);

const INIT_CONFIG_ARGS: FieldSchema = FieldSchema::new(
    "init_config",
    &[
        FieldSpec::new("is_authorized", FieldType::Bool),
        FieldSpec::new("status", FieldType::Enum8(&STATUS_TABLE)),
        FieldSpec::new("fee", FieldType::U64),
        FieldSpec::new("label", FieldType::FixedString(LABEL_LEN)),
    ],
);

const UPDATE_CONFIG_ARGS: FieldSchema = FieldSchema::new(
    "update_config",
    &[
        FieldSpec::new("flag_0", FieldType::Bool),
        FieldSpec::new("flag_1", FieldType::Bool),
        FieldSpec::new("flag_2", FieldType::Bool),
        FieldSpec::new("flag_3", FieldType::Bool),
        FieldSpec::new("selector", FieldType::Enum8(&SELECTOR_TABLE)),
        FieldSpec::new("status", FieldType::Enum8(&STATUS_TABLE)),
        FieldSpec::new("pad", FieldType::Padding(2)),
        FieldSpec::new("word_0", FieldType::U32),
        FieldSpec::new("word_1", FieldType::U32),
        FieldSpec::new("word_2", FieldType::U32),
        FieldSpec::new("word_3", FieldType::U32),
        FieldSpec::new("amount_0", FieldType::U64),
        FieldSpec::new("amount_1", FieldType::U64),
        FieldSpec::new("amount_2", FieldType::U64),
        FieldSpec::new("amount_3", FieldType::U64),
        FieldSpec::new("label", FieldType::FixedString(LABEL_LEN)),
    ],
);

const ESCROW_MAKE_ARGS: FieldSchema = FieldSchema::new(
    "escrow_make",
    &[
        FieldSpec::new("decimals_x", FieldType::U8),
        FieldSpec::new("amount_x", FieldType::U64),
        FieldSpec::new("decimals_y", FieldType::U8),
        FieldSpec::new("amount_y", FieldType::U64),
        FieldSpec::new("id", FieldType::U64),
    ],
);

const ID_ARGS: FieldSchema = FieldSchema::new("escrow_id", &[FieldSpec::new("id", FieldType::U64)]);

const RESIZE_ARGS: FieldSchema =
    FieldSchema::new("config_resize", &[FieldSpec::new("new_size", FieldType::U64)]);

// =============================================================================
// INSTRUCTION ENUM
// =============================================================================

/// All instructions supported by the vault program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VaultInstruction {
    /// Move lamports from the owner into the owner's vault address.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Owner
    /// 1. `[writable]` Vault
    /// 2. `[]` Vault program
    /// 3. `[]` System program
    Deposit { amount: u64 },

    /// Move lamports from the vault back to the owner.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Owner
    /// 1. `[writable]` Vault
    /// 2. `[]` Vault program
    Withdraw { amount: u64 },

    /// Create a Token-2022 mint with `decimals` (at most [`MAX_DECIMALS`]).
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Owner
    Token2022Mint { decimals: u8 },

    /// Create and initialize a Token-2022 token account.
    ///
    /// The program requires one argument byte and ignores its value.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Payer
    /// 1. `[]` Token account owner
    /// 2. `[]` Mint
    /// 3. `[signer, writable]` New token account
    /// 4. `[]` Token program
    /// 5. `[]` System program
    Token2022InitAccount { reserved: u8 },

    /// Transfer tokens from the authority's ATA into a wallet's ATA.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Authority
    /// 1. `[writable]` Source ATA
    /// 2. `[writable]` Destination ATA
    /// 3. `[]` Destination wallet
    /// 4. `[]` Mint
    /// 5. `[]` Token program
    /// 6. `[]` System program
    /// 7. `[]` Associated token program
    TokenDeposit { decimals: u8, amount: u64 },

    /// Transfer tokens out of the vault's ATA.
    ///
    /// Same account order as `TokenDeposit`, with the vault in slot 3.
    TokenWithdraw { decimals: u8, amount: u64 },

    /// Create the config account.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Authority (payer)
    /// 1. `[writable]` Config
    /// 2-5. `[]` Mints
    /// 6. `[]` Owner
    /// 7. `[]` Admin
    /// 8. `[]` System program
    InitConfig {
        is_authorized: bool,
        status: Status,
        fee: u64,
        label: String,
    },

    /// Change one config field, picked by `selector`.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Owner or admin
    /// 1. `[writable]` Config
    /// 2. `[]` Extra account 1 (new admin when `selector == Admin`)
    /// 3. `[]` Extra account 2
    UpdateConfig(UpdateConfigArgs),

    /// Close the config account and reclaim its lamports.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Authority
    /// 1. `[writable]` Config
    /// 2. `[writable]` Lamport destination
    CloseConfig,

    /// Open an escrow: lock `amount_x` of mint X, ask `amount_y` of mint Y.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Maker
    /// 1. `[writable]` Maker ATA for X
    /// 2. `[writable]` Escrow ATA for X
    /// 3. `[writable]` Escrow
    /// 4. `[]` Mint X
    /// 5. `[]` Mint Y
    /// 6. `[writable]` Config
    /// 7. `[]` Token program
    /// 8. `[]` System program
    /// 9. `[]` Associated token program
    EscrowMake {
        decimals_x: u8,
        amount_x: u64,
        decimals_y: u8,
        amount_y: u64,
        id: u64,
    },

    /// Settle an escrow back to the maker.
    ///
    /// Accounts: see [`escrow_withdraw`].
    EscrowWithdraw { id: u64 },

    /// Cancel an escrow. Same accounts as `EscrowWithdraw`.
    EscrowCancel,

    /// Reallocate the config account to `new_size` bytes.
    ///
    /// Accounts:
    /// 0. `[signer, writable]` Authority
    /// 1. `[writable]` Config
    /// 2. `[]` Program owner
    /// 3. `[]` System program
    ConfigResize { new_size: u64 },
}

impl VaultInstruction {
    /// Every defined discriminator, in ascending order.
    pub const DISCRIMINATORS: [u8; 13] = [0, 1, 2, 4, 5, 6, 12, 13, 14, 15, 17, 18, 19];

    pub fn discriminator(&self) -> u8 {
        match self {
            VaultInstruction::Deposit { .. } => 0,
            VaultInstruction::Withdraw { .. } => 1,
            VaultInstruction::Token2022Mint { .. } => 2,
            VaultInstruction::Token2022InitAccount { .. } => 4,
            VaultInstruction::TokenDeposit { .. } => 5,
            VaultInstruction::TokenWithdraw { .. } => 6,
            VaultInstruction::InitConfig { .. } => 12,
            VaultInstruction::UpdateConfig(_) => 13,
            VaultInstruction::CloseConfig => 14,
            VaultInstruction::EscrowMake { .. } => 15,
            VaultInstruction::EscrowWithdraw { .. } => 17,
            VaultInstruction::EscrowCancel => 18,
            VaultInstruction::ConfigResize { .. } => 19,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VaultInstruction::Deposit { .. } => "Deposit",
            VaultInstruction::Withdraw { .. } => "Withdraw",
            VaultInstruction::Token2022Mint { .. } => "Token2022Mint",
            VaultInstruction::Token2022InitAccount { .. } => "Token2022InitAccount",
            VaultInstruction::TokenDeposit { .. } => "TokenDeposit",
            VaultInstruction::TokenWithdraw { .. } => "TokenWithdraw",
            VaultInstruction::InitConfig { .. } => "InitConfig",
            VaultInstruction::UpdateConfig(_) => "UpdateConfig",
            VaultInstruction::CloseConfig => "CloseConfig",
            VaultInstruction::EscrowMake { .. } => "EscrowMake",
            VaultInstruction::EscrowWithdraw { .. } => "EscrowWithdraw",
            VaultInstruction::EscrowCancel => "EscrowCancel",
            VaultInstruction::ConfigResize { .. } => "ConfigResize",
        }
    }

    /// Argument layout for a discriminator, `None` if it is not defined.
    pub fn schema_for(discriminator: u8) -> Option<FieldSchema> {
        Some(match discriminator {
            0 | 1 => AMOUNT_ARGS,
            2 => DECIMALS_ARGS,
            4 => INIT_ACCOUNT_ARGS,
            5 | 6 => TOKEN_ARGS,
            12 => INIT_CONFIG_ARGS,
            13 => UPDATE_CONFIG_ARGS,
            14 | 18 => NO_ARGS,
            15 => ESCROW_MAKE_ARGS,
            17 => ID_ARGS,
            19 => RESIZE_ARGS,
            _ => return None,
        })
    }

    /// Argument values in schema order.
    pub fn args(&self) -> Vec<FieldValue> {
        match self {
            VaultInstruction::Deposit { amount } | VaultInstruction::Withdraw { amount } => {
                vec![FieldValue::uint(*amount)]
            }
            VaultInstruction::Token2022Mint { decimals } => vec![FieldValue::uint(*decimals)],
            VaultInstruction::Token2022InitAccount { reserved } => {
                vec![FieldValue::uint(*reserved)]
            }
            VaultInstruction::TokenDeposit { decimals, amount }
            | VaultInstruction::TokenWithdraw { decimals, amount } => {
                vec![FieldValue::uint(*decimals), FieldValue::uint(*amount)]
            }
            VaultInstruction::InitConfig {
                is_authorized,
                status,
                fee,
                label,
            } => vec![
                FieldValue::Bool(*is_authorized),
                FieldValue::Enum(status.as_symbol()),
                FieldValue::uint(*fee),
                FieldValue::Text(label.clone()),
            ],
            VaultInstruction::UpdateConfig(args) => {
                let mut values: Vec<FieldValue> =
                    args.flags.iter().copied().map(FieldValue::Bool).collect();
                values.push(FieldValue::Enum(args.selector.as_symbol()));
                values.push(FieldValue::Enum(args.status.as_symbol()));
                values.push(FieldValue::Padding);
                values.extend(args.words.iter().copied().map(FieldValue::uint));
                values.extend(args.amounts.iter().copied().map(FieldValue::uint));
                values.push(FieldValue::Text(args.label.clone()));
                values
            }
            VaultInstruction::CloseConfig | VaultInstruction::EscrowCancel => Vec::new(),
            VaultInstruction::EscrowMake {
                decimals_x,
                amount_x,
                decimals_y,
                amount_y,
                id,
            } => vec![
                FieldValue::uint(*decimals_x),
                FieldValue::uint(*amount_x),
                FieldValue::uint(*decimals_y),
                FieldValue::uint(*amount_y),
                FieldValue::uint(*id),
            ],
            VaultInstruction::EscrowWithdraw { id } => vec![FieldValue::uint(*id)],
            VaultInstruction::ConfigResize { new_size } => vec![FieldValue::uint(*new_size)],
        }
    }

    // =========================================================================
    // UNPACK (Deserialize)
    // =========================================================================

    /// Parse instruction data.
    ///
    /// # Errors
    /// * `EmptyPayload` - no discriminator byte
    /// * `UnknownDiscriminator` - first byte names no instruction
    /// * `SchemaLength` - argument bytes are not exactly the variant's size
    /// * `Field` - an argument holds an illegal byte (bool, status, selector,
    ///   padding) or decimals above [`MAX_DECIMALS`]
    pub fn unpack(input: &[u8]) -> Result<Self, CodecError> {
        let (&discriminator, rest) = input.split_first().ok_or(CodecError::EmptyPayload)?;
        let schema = Self::schema_for(discriminator)
            .ok_or(CodecError::UnknownDiscriminator(discriminator))?;
        let record = decode(rest, &schema)?;

        let instruction = Self::from_args(discriminator, &record)?;
        instruction.check_args()?;
        Ok(instruction)
    }

    /// Range checks the schema cannot express.
    fn check_args(&self) -> Result<(), CodecError> {
        match *self {
            VaultInstruction::Token2022Mint { decimals } if decimals > MAX_DECIMALS => {
                Err(CodecError::DecimalsOutOfRange {
                    decimals,
                    max: MAX_DECIMALS,
                }
                .at_field("decimals", 0))
            }
            _ => Ok(()),
        }
    }

    fn from_args(discriminator: u8, record: &Record) -> Result<Self, CodecError> {
        Ok(match discriminator {
            0 => VaultInstruction::Deposit {
                amount: record.u64("amount")?,
            },
            1 => VaultInstruction::Withdraw {
                amount: record.u64("amount")?,
            },
            2 => VaultInstruction::Token2022Mint {
                decimals: record.u8("decimals")?,
            },
            4 => VaultInstruction::Token2022InitAccount {
                reserved: record.u8("reserved")?,
            },
            5 => VaultInstruction::TokenDeposit {
                decimals: record.u8("decimals")?,
                amount: record.u64("amount")?,
            },
            6 => VaultInstruction::TokenWithdraw {
                decimals: record.u8("decimals")?,
                amount: record.u64("amount")?,
            },
            12 => VaultInstruction::InitConfig {
                is_authorized: record.bool("is_authorized")?,
                status: Status::from_symbol(record.symbol("status")?)?,
                fee: record.u64("fee")?,
                label: record.text("label")?,
            },
            13 => {
                let mut args = UpdateConfigArgs {
                    selector: ConfigSelector::from_symbol(record.symbol("selector")?)?,
                    status: Status::from_symbol(record.symbol("status")?)?,
                    label: record.text("label")?,
                    ..UpdateConfigArgs::default()
                };
                for (flag, name) in args.flags.iter_mut().zip(FLAG_FIELDS) {
                    *flag = record.bool(name)?;
                }
                for (word, name) in args.words.iter_mut().zip(WORD_FIELDS) {
                    *word = record.u32(name)?;
                }
                for (amount, name) in args.amounts.iter_mut().zip(AMOUNT_FIELDS) {
                    *amount = record.u64(name)?;
                }
                VaultInstruction::UpdateConfig(args)
            }
            14 => VaultInstruction::CloseConfig,
            15 => VaultInstruction::EscrowMake {
                decimals_x: record.u8("decimals_x")?,
                amount_x: record.u64("amount_x")?,
                decimals_y: record.u8("decimals_y")?,
                amount_y: record.u64("amount_y")?,
                id: record.u64("id")?,
            },
            17 => VaultInstruction::EscrowWithdraw {
                id: record.u64("id")?,
            },
            18 => VaultInstruction::EscrowCancel,
            19 => VaultInstruction::ConfigResize {
                new_size: record.u64("new_size")?,
            },
            other => return Err(CodecError::UnknownDiscriminator(other)),
        })
    }

    // =========================================================================
    // PACK (Serialize)
    // =========================================================================

    /// Pack instruction into bytes.
    ///
    /// This is the inverse of `unpack()`. Labels longer than 32 bytes are
    /// truncated, so only labels that fit come back unchanged.
    pub fn pack(&self) -> Result<Vec<u8>, CodecError> {
        self.check_args()?;
        let discriminator = self.discriminator();
        let schema = Self::schema_for(discriminator)
            .ok_or(CodecError::UnknownDiscriminator(discriminator))?;
        let args = schema.encode(&self.args())?;
        Ok(build(discriminator, &[&args]))
    }
}

// =============================================================================
// INSTRUCTION CONSTRUCTORS
// =============================================================================

/// Token accounts shared by `TokenDeposit` and `TokenWithdraw`.
#[derive(Clone, Copy, Debug)]
pub struct TokenTransferAccounts {
    pub authority: Pubkey,
    pub from_ata: Pubkey,
    pub to_ata: Pubkey,
    /// Destination wallet for deposits, the vault for withdrawals.
    pub wallet: Pubkey,
    pub mint: Pubkey,
    pub token_program: Pubkey,
}

/// Accounts for `Token2022InitAccount`.
#[derive(Clone, Copy, Debug)]
pub struct InitTokenAccountAccounts {
    pub payer: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub token_account: Pubkey,
}

/// Accounts for `InitConfig`.
#[derive(Clone, Copy, Debug)]
pub struct InitConfigAccounts {
    pub authority: Pubkey,
    pub config: Pubkey,
    pub mints: [Pubkey; 4],
    pub owner: Pubkey,
    pub admin: Pubkey,
}

/// Accounts for `EscrowMake`.
#[derive(Clone, Copy, Debug)]
pub struct EscrowMakeAccounts {
    pub maker: Pubkey,
    pub maker_ata_x: Pubkey,
    pub escrow_ata: Pubkey,
    pub escrow: Pubkey,
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub config: Pubkey,
    pub token_program: Pubkey,
}

/// Accounts for `EscrowWithdraw` and `EscrowCancel`.
#[derive(Clone, Copy, Debug)]
pub struct EscrowSettleAccounts {
    pub maker: Pubkey,
    pub maker_ata_x: Pubkey,
    pub maker_ata_y: Pubkey,
    pub escrow_ata_x: Pubkey,
    pub escrow_ata_y: Pubkey,
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub escrow: Pubkey,
    pub config: Pubkey,
    pub token_program: Pubkey,
}

fn instruction(
    program_id: &Pubkey,
    ix: &VaultInstruction,
    accounts: Vec<AccountMeta>,
) -> Result<Instruction, CodecError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: ix.pack()?,
    })
}

pub fn deposit(
    program_id: &Pubkey,
    owner: &Pubkey,
    vault: &Pubkey,
    amount: u64,
) -> Result<Instruction, CodecError> {
    instruction(
        program_id,
        &VaultInstruction::Deposit { amount },
        vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(*program_id, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

pub fn withdraw(
    program_id: &Pubkey,
    owner: &Pubkey,
    vault: &Pubkey,
    amount: u64,
) -> Result<Instruction, CodecError> {
    instruction(
        program_id,
        &VaultInstruction::Withdraw { amount },
        vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
    )
}

pub fn token_2022_mint(
    program_id: &Pubkey,
    owner: &Pubkey,
    decimals: u8,
) -> Result<Instruction, CodecError> {
    instruction(
        program_id,
        &VaultInstruction::Token2022Mint { decimals },
        vec![AccountMeta::new(*owner, true)],
    )
}

/// Build a `Token2022InitAccount` instruction against the Token-2022
/// program named in `config`.
pub fn token_2022_init_account(
    config: &VaultConfig,
    accounts: &InitTokenAccountAccounts,
) -> Result<Instruction, CodecError> {
    instruction(
        &config.program_id,
        &VaultInstruction::Token2022InitAccount { reserved: 0 },
        vec![
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new_readonly(accounts.owner, false),
            AccountMeta::new_readonly(accounts.mint, false),
            AccountMeta::new(accounts.token_account, true),
            AccountMeta::new_readonly(config.token_2022_program_id, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

fn token_transfer_metas(config: &VaultConfig, accounts: &TokenTransferAccounts) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(accounts.authority, true),
        AccountMeta::new(accounts.from_ata, false),
        AccountMeta::new(accounts.to_ata, false),
        AccountMeta::new_readonly(accounts.wallet, false),
        AccountMeta::new_readonly(accounts.mint, false),
        AccountMeta::new_readonly(accounts.token_program, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(config.associated_token_program_id, false),
    ]
}

pub fn token_deposit(
    config: &VaultConfig,
    accounts: &TokenTransferAccounts,
    decimals: u8,
    amount: u64,
) -> Result<Instruction, CodecError> {
    instruction(
        &config.program_id,
        &VaultInstruction::TokenDeposit { decimals, amount },
        token_transfer_metas(config, accounts),
    )
}

pub fn token_withdraw(
    config: &VaultConfig,
    accounts: &TokenTransferAccounts,
    decimals: u8,
    amount: u64,
) -> Result<Instruction, CodecError> {
    instruction(
        &config.program_id,
        &VaultInstruction::TokenWithdraw { decimals, amount },
        token_transfer_metas(config, accounts),
    )
}

pub fn init_config(
    program_id: &Pubkey,
    accounts: &InitConfigAccounts,
    is_authorized: bool,
    status: Status,
    fee: u64,
    label: &str,
) -> Result<Instruction, CodecError> {
    let mut metas = vec![
        AccountMeta::new(accounts.authority, true),
        AccountMeta::new(accounts.config, false),
    ];
    metas.extend(
        accounts
            .mints
            .iter()
            .map(|mint| AccountMeta::new_readonly(*mint, false)),
    );
    metas.push(AccountMeta::new_readonly(accounts.owner, false));
    metas.push(AccountMeta::new_readonly(accounts.admin, false));
    metas.push(AccountMeta::new_readonly(system_program::id(), false));

    instruction(
        program_id,
        &VaultInstruction::InitConfig {
            is_authorized,
            status,
            fee,
            label: label.to_string(),
        },
        metas,
    )
}

pub fn update_config(
    program_id: &Pubkey,
    signer: &Pubkey,
    config: &Pubkey,
    extra: [&Pubkey; 2],
    args: UpdateConfigArgs,
) -> Result<Instruction, CodecError> {
    instruction(
        program_id,
        &VaultInstruction::UpdateConfig(args),
        vec![
            AccountMeta::new(*signer, true),
            AccountMeta::new(*config, false),
            AccountMeta::new_readonly(*extra[0], false),
            AccountMeta::new_readonly(*extra[1], false),
        ],
    )
}

pub fn close_config(
    program_id: &Pubkey,
    authority: &Pubkey,
    config: &Pubkey,
    destination: &Pubkey,
) -> Result<Instruction, CodecError> {
    instruction(
        program_id,
        &VaultInstruction::CloseConfig,
        vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(*config, false),
            AccountMeta::new(*destination, false),
        ],
    )
}

pub fn config_resize(
    program_id: &Pubkey,
    authority: &Pubkey,
    config: &Pubkey,
    program_owner: &Pubkey,
    new_size: u64,
) -> Result<Instruction, CodecError> {
    instruction(
        program_id,
        &VaultInstruction::ConfigResize { new_size },
        vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(*config, false),
            AccountMeta::new_readonly(*program_owner, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

pub fn escrow_make(
    config: &VaultConfig,
    accounts: &EscrowMakeAccounts,
    decimals_x: u8,
    amount_x: u64,
    decimals_y: u8,
    amount_y: u64,
    id: u64,
) -> Result<Instruction, CodecError> {
    instruction(
        &config.program_id,
        &VaultInstruction::EscrowMake {
            decimals_x,
            amount_x,
            decimals_y,
            amount_y,
            id,
        },
        vec![
            AccountMeta::new(accounts.maker, true),
            AccountMeta::new(accounts.maker_ata_x, false),
            AccountMeta::new(accounts.escrow_ata, false),
            AccountMeta::new(accounts.escrow, false),
            AccountMeta::new_readonly(accounts.mint_x, false),
            AccountMeta::new_readonly(accounts.mint_y, false),
            AccountMeta::new(accounts.config, false),
            AccountMeta::new_readonly(accounts.token_program, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(config.associated_token_program_id, false),
        ],
    )
}

fn escrow_settle_metas(config: &VaultConfig, accounts: &EscrowSettleAccounts) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(accounts.maker, true),
        AccountMeta::new(accounts.maker_ata_x, false),
        AccountMeta::new(accounts.maker_ata_y, false),
        AccountMeta::new(accounts.escrow_ata_x, false),
        AccountMeta::new(accounts.escrow_ata_y, false),
        AccountMeta::new_readonly(accounts.mint_x, false),
        AccountMeta::new_readonly(accounts.mint_y, false),
        AccountMeta::new(accounts.escrow, false),
        AccountMeta::new(accounts.config, false),
        AccountMeta::new_readonly(accounts.token_program, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(config.associated_token_program_id, false),
    ]
}

/// Build an `EscrowWithdraw` instruction.
///
/// Accounts:
/// 0. `[signer, writable]` Maker
/// 1. `[writable]` Maker ATA for X
/// 2. `[writable]` Maker ATA for Y
/// 3. `[writable]` Escrow ATA for X
/// 4. `[writable]` Escrow ATA for Y
/// 5. `[]` Mint X
/// 6. `[]` Mint Y
/// 7. `[writable]` Escrow
/// 8. `[writable]` Config
/// 9. `[]` Token program
/// 10. `[]` System program
/// 11. `[]` Associated token program
pub fn escrow_withdraw(
    config: &VaultConfig,
    accounts: &EscrowSettleAccounts,
    id: u64,
) -> Result<Instruction, CodecError> {
    instruction(
        &config.program_id,
        &VaultInstruction::EscrowWithdraw { id },
        escrow_settle_metas(config, accounts),
    )
}

pub fn escrow_cancel(
    config: &VaultConfig,
    accounts: &EscrowSettleAccounts,
) -> Result<Instruction, CodecError> {
    instruction(
        &config.program_id,
        &VaultInstruction::EscrowCancel,
        escrow_settle_metas(config, accounts),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_variants() -> Vec<VaultInstruction> {
        vec![
            VaultInstruction::Deposit {
                amount: 460_000_000,
            },
            VaultInstruction::Withdraw { amount: 1 },
            VaultInstruction::Token2022Mint { decimals: 6 },
            VaultInstruction::Token2022InitAccount { reserved: 0 },
            VaultInstruction::TokenDeposit {
                decimals: 6,
                amount: 274_000_000,
            },
            VaultInstruction::TokenWithdraw {
                decimals: 9,
                amount: u64::MAX,
            },
            VaultInstruction::InitConfig {
                is_authorized: true,
                status: Status::Active,
                fee: 111_000_000,
                label: "MoonDog to the Moon!".to_string(),
            },
            VaultInstruction::UpdateConfig(UpdateConfigArgs {
                selector: ConfigSelector::Fee,
                status: Status::Paused,
                words: [1_700_000_000, 0, 0, 0],
                amounts: [123_000_000, 274_000_000_000, 0, 0],
                label: "MoonDog to the Marzzz!".to_string(),
                ..UpdateConfigArgs::default()
            }),
            VaultInstruction::CloseConfig,
            VaultInstruction::EscrowMake {
                decimals_x: 6,
                amount_x: 1_000,
                decimals_y: 9,
                amount_y: 2_000,
                id: 7,
            },
            VaultInstruction::EscrowWithdraw { id: 7 },
            VaultInstruction::EscrowCancel,
            VaultInstruction::ConfigResize { new_size: 512 },
        ]
    }

    #[test]
    fn test_deposit_payload_bytes() {
        let data = VaultInstruction::Deposit {
            amount: 460_000_000,
        }
        .pack()
        .unwrap();

        let mut expected = vec![0x00];
        expected.extend_from_slice(&460_000_000u64.to_le_bytes());
        assert_eq!(data, expected);
        assert_eq!(data, build(0, &[&460_000_000u64.to_le_bytes()]));
        assert_eq!(crate::numeric::decode_u64(&data[1..]).unwrap(), 460_000_000);
    }

    #[test]
    fn test_pack_unpack_every_variant() {
        for ix in all_variants() {
            let data = ix.pack().unwrap();
            assert_eq!(data[0], ix.discriminator());
            let schema = VaultInstruction::schema_for(ix.discriminator()).unwrap();
            assert_eq!(data.len(), 1 + schema.len());
            assert_eq!(VaultInstruction::unpack(&data).unwrap(), ix);
        }
    }

    #[test]
    fn test_discriminators_are_unique() {
        let variants = all_variants();
        let seen: HashSet<u8> = variants.iter().map(|ix| ix.discriminator()).collect();
        assert_eq!(seen.len(), variants.len());

        let mut listed: Vec<u8> = variants.iter().map(|ix| ix.discriminator()).collect();
        listed.sort_unstable();
        assert_eq!(listed, VaultInstruction::DISCRIMINATORS);
    }

    #[test]
    fn test_init_config_layout() {
        let data = VaultInstruction::InitConfig {
            is_authorized: true,
            status: Status::Active,
            fee: 111_000_000,
            label: "MoonDog to the Moon!".to_string(),
        }
        .pack()
        .unwrap();

        assert_eq!(data.len(), 1 + 1 + 1 + 8 + 32);
        assert_eq!(&data[..3], &[12, 1, 1]);
        assert_eq!(&data[3..11], &111_000_000u64.to_le_bytes());
        assert_eq!(&data[11..31], b"MoonDog to the Moon!");
        assert!(data[31..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_update_config_layout() {
        let args = UpdateConfigArgs {
            selector: ConfigSelector::Fee,
            status: Status::Paused,
            words: [1_700_000_000, 0, 0, 0],
            amounts: [123_000_000, 274_000_000_000, 0, 0],
            label: "MoonDog to the Marzzz!".to_string(),
            ..UpdateConfigArgs::default()
        };
        let data = VaultInstruction::UpdateConfig(args.clone()).pack().unwrap();

        assert_eq!(data.len(), 89);
        assert_eq!(data[0], 13);
        assert_eq!(&data[1..5], &[0, 0, 0, 0]);
        assert_eq!(&data[5..9], &[1, 3, 0, 0]);
        assert_eq!(&data[9..13], &1_700_000_000u32.to_le_bytes());
        assert_eq!(&data[25..33], &123_000_000u64.to_le_bytes());
        assert_eq!(&data[33..41], &274_000_000_000u64.to_le_bytes());
        assert_eq!(&data[57..79], b"MoonDog to the Marzzz!");

        assert_eq!(args.timestamp(), 1_700_000_000);
        assert_eq!(args.fee(), 123_000_000);
        assert_eq!(args.token_amount(), 274_000_000_000);
    }

    #[test]
    fn test_unpack_rejects_bad_input() {
        assert_eq!(
            VaultInstruction::unpack(&[]).unwrap_err(),
            CodecError::EmptyPayload
        );
        assert_eq!(
            VaultInstruction::unpack(&[3]).unwrap_err(),
            CodecError::UnknownDiscriminator(3)
        );
        assert_eq!(
            VaultInstruction::unpack(&[0, 1, 2, 3]).unwrap_err(),
            CodecError::SchemaLength {
                expected: 8,
                actual: 3
            }
        );
        assert_eq!(
            VaultInstruction::unpack(&[14, 0]).unwrap_err(),
            CodecError::SchemaLength {
                expected: 0,
                actual: 1
            }
        );

        let mut data = VaultInstruction::UpdateConfig(UpdateConfigArgs::default())
            .pack()
            .unwrap();
        data[5] = 3;
        assert_eq!(
            VaultInstruction::unpack(&data).unwrap_err().root(),
            &CodecError::InvalidEnum {
                table: "selector",
                value: 3
            }
        );
    }

    #[test]
    fn test_update_config_padding_must_be_zero() {
        let mut data = VaultInstruction::UpdateConfig(UpdateConfigArgs::default())
            .pack()
            .unwrap();
        assert_eq!(&data[7..9], &[0, 0]);
        data[7] = 0xAB;

        assert_eq!(
            VaultInstruction::unpack(&data).unwrap_err(),
            CodecError::NonZeroPadding {
                index: 0,
                value: 0xAB
            }
            .at_field("pad", 6)
        );
    }

    #[test]
    fn test_token_2022_payloads() {
        assert_eq!(
            VaultInstruction::unpack(&[2, 6]).unwrap(),
            VaultInstruction::Token2022Mint { decimals: 6 }
        );
        assert_eq!(
            VaultInstruction::unpack(&[2, 18]).unwrap(),
            VaultInstruction::Token2022Mint { decimals: 18 }
        );
        let err = VaultInstruction::unpack(&[2, 19]).unwrap_err();
        assert_eq!(
            err.root(),
            &CodecError::DecimalsOutOfRange {
                decimals: 19,
                max: MAX_DECIMALS
            }
        );
        assert!(VaultInstruction::Token2022Mint { decimals: 19 }
            .pack()
            .is_err());

        // Any argument byte is accepted and kept.
        assert_eq!(
            VaultInstruction::unpack(&[4, 0]).unwrap(),
            VaultInstruction::Token2022InitAccount { reserved: 0 }
        );
        assert_eq!(
            VaultInstruction::Token2022InitAccount { reserved: 7 }
                .pack()
                .unwrap(),
            vec![4, 7]
        );
        assert_eq!(
            VaultInstruction::unpack(&[4]).unwrap_err(),
            CodecError::SchemaLength {
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn test_token_2022_accounts() {
        let config = VaultConfig::default();
        let owner = Pubkey::new_unique();

        let ix = token_2022_mint(&config.program_id, &owner, 9).unwrap();
        assert_eq!(ix.data, vec![2, 9]);
        assert_eq!(ix.accounts.len(), 1);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);

        let accounts = InitTokenAccountAccounts {
            payer: Pubkey::new_unique(),
            owner,
            mint: Pubkey::new_unique(),
            token_account: Pubkey::new_unique(),
        };
        let ix = token_2022_init_account(&config, &accounts).unwrap();
        assert_eq!(ix.data, vec![4, 0]);
        let keys: Vec<Pubkey> = ix.accounts.iter().map(|m| m.pubkey).collect();
        assert_eq!(
            keys,
            [
                accounts.payer,
                accounts.owner,
                accounts.mint,
                accounts.token_account,
                config.token_2022_program_id,
                system_program::id(),
            ]
        );
        assert!(ix.accounts[3].is_signer && ix.accounts[3].is_writable);
        assert!(!ix.accounts[1].is_writable);
    }

    #[test]
    fn test_deposit_accounts() {
        let program_id = crate::id();
        let owner = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let ix = deposit(&program_id, &owner, &vault, 460_000_000).unwrap();

        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.accounts.len(), 4);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, vault);
        assert!(ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[3].pubkey, system_program::id());
        assert_eq!(
            VaultInstruction::unpack(&ix.data).unwrap(),
            VaultInstruction::Deposit {
                amount: 460_000_000
            }
        );
    }

    #[test]
    fn test_escrow_settle_accounts() {
        let config = VaultConfig::default();
        let accounts = EscrowSettleAccounts {
            maker: Pubkey::new_unique(),
            maker_ata_x: Pubkey::new_unique(),
            maker_ata_y: Pubkey::new_unique(),
            escrow_ata_x: Pubkey::new_unique(),
            escrow_ata_y: Pubkey::new_unique(),
            mint_x: Pubkey::new_unique(),
            mint_y: Pubkey::new_unique(),
            escrow: Pubkey::new_unique(),
            config: Pubkey::new_unique(),
            token_program: config.token_program_id,
        };

        let ix = escrow_withdraw(&config, &accounts, 7).unwrap();
        assert_eq!(ix.accounts.len(), 12);
        assert_eq!(ix.accounts[7].pubkey, accounts.escrow);
        assert_eq!(ix.accounts[11].pubkey, config.associated_token_program_id);
        assert_eq!(ix.data, build(17, &[&7u64.to_le_bytes()]));

        let ix = escrow_cancel(&config, &accounts).unwrap();
        assert_eq!(ix.data, vec![18]);
    }
}
