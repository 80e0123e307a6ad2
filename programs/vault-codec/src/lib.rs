//! # Vault Codec
//!
//! Client-side codec for the vault program: byte-exact instruction payloads,
//! account state decoding and program-derived address resolution.
//!
//! ## Overview
//!
//! This crate allows you to:
//! - Encode unsigned integers, booleans, status bytes and fixed-length labels
//! - Describe an account or instruction layout once, as a [`FieldSchema`]
//! - Decode raw account bytes into a [`Record`] or a typed struct
//! - Build every vault instruction with its ordered account list
//! - Derive config, vault, escrow and associated token addresses
//! - Drive all of the above through any [`LedgerClient`]
//!
//! ## Account Types
//!
//! | Account Type | Size | Description |
//! |--------------|------|-------------|
//! | ConfigAccount | 287 bytes | Program-wide settings and balances |
//! | Escrow | 105 bytes | One open swap offer |
//!
//! ## Instructions
//!
//! | # | Instruction | Description |
//! |---|-------------|-------------|
//! | 0 | Deposit | Lamports into the owner's vault |
//! | 1 | Withdraw | Lamports back to the owner |
//! | 2 | Token2022Mint | Create a Token-2022 mint |
//! | 4 | Token2022InitAccount | Create a Token-2022 token account |
//! | 5 | TokenDeposit | Tokens between ATAs |
//! | 6 | TokenWithdraw | Tokens out of the vault ATA |
//! | 12 | InitConfig | Create the config account |
//! | 13 | UpdateConfig | Change one config field |
//! | 14 | CloseConfig | Close the config account |
//! | 15 | EscrowMake | Open an escrow |
//! | 17 | EscrowWithdraw | Settle an escrow |
//! | 18 | EscrowCancel | Cancel an escrow |
//! | 19 | ConfigResize | Reallocate the config account |

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Fixed-width integers, strict booleans and enum tables
pub mod numeric;

/// Null-padded fixed-length strings
pub mod text;

/// Field layouts, values and decoded records
pub mod schema;

/// Schema-driven account decoding
pub mod decoder;

/// Typed account records (ConfigAccount, Escrow)
pub mod state;

/// Instruction definitions, packing and constructors
pub mod instruction;

/// Program derived address derivation
pub mod pda;

/// Codec error codes and the vault program's failure table
pub mod error;

/// Program identifiers
pub mod config;

/// Ledger interface and vault client
pub mod client;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use client::{ClientError, LedgerClient, VaultClient};
pub use config::VaultConfig;
pub use decoder::decode;
pub use error::{CodecError, ProgramFailure};
pub use instruction::{ConfigSelector, UpdateConfigArgs, VaultInstruction};
pub use schema::{FieldSchema, FieldSpec, FieldType, FieldValue, Record};
pub use state::{ConfigAccount, Escrow, Pack, Status};

// =============================================================================
// PROGRAM ID
// =============================================================================

// Address of the deployed vault program
solana_program::declare_id!("7EKqBVYSCmJbt2T8tGSmwzNKnpL29RqcJcyUr9aEEr6e");
