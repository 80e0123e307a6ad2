//! Codec Error Types
//!
//! Every encode, decode and derivation failure in this crate is a
//! [`CodecError`]. Nothing is recovered locally: callers receive the error
//! with enough context (field name, byte offset, attempted value) to spot a
//! schema or program-version mismatch.
//!
//! # Error Code Ranges
//!
//! | Range | Category |
//! |-------|----------|
//! | 0-4 | Numeric / enum / text codec |
//! | 5-10 | Schema and record decoding |
//! | 11-12, 17 | Instruction payloads |
//! | 13-16 | Address derivation |
//!
//! These codes belong to this crate. The vault program reports its own
//! failures with a separate table, see [`ProgramFailure`].

use solana_program::{instruction::InstructionError, program_error::ProgramError};
use thiserror::Error;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Errors returned by the codec, decoder, builder and address resolver.
///
/// # Important
///
/// The numeric codes returned by [`CodecError::code`] are stable.
/// Add new variants at the end of the code table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    // =========================================================================
    // CODEC ERRORS (0-4)
    // =========================================================================

    /// Error 0: value does not fit in the target width.
    ///
    /// `value` is kept as a decimal string so arbitrarily large inputs
    /// survive into the message unchanged.
    #[error("value {value} does not fit in {width} byte(s)")]
    Overflow { value: String, width: usize },

    /// Error 1: negative value where an unsigned one is required.
    #[error("negative value {value} cannot be encoded as unsigned")]
    Range { value: String },

    /// Error 2: byte outside a closed symbolic set (bool or enum table).
    #[error("byte {value} is not a valid `{table}` value")]
    InvalidEnum { table: &'static str, value: u8 },

    /// Error 3: symbol is not part of the enum table.
    #[error("symbol `{symbol}` is not part of `{table}`")]
    UnknownSymbol { table: &'static str, symbol: String },

    /// Error 4: fixed string bytes are not valid UTF-8 after trimming.
    #[error("fixed string of {len} byte(s) is not valid UTF-8")]
    InvalidText { len: usize },

    // =========================================================================
    // SCHEMA ERRORS (5-10)
    // =========================================================================

    /// Error 5: buffer length differs from the schema's total width.
    ///
    /// Raised for buffers that are too short and too long alike.
    #[error("schema expects {expected} byte(s), buffer has {actual}")]
    SchemaLength { expected: usize, actual: usize },

    /// Error 6: a single field failed to decode.
    #[error("field `{name}` at offset {offset}: {source}")]
    Field {
        name: &'static str,
        offset: usize,
        #[source]
        source: Box<CodecError>,
    },

    /// Error 7: the value supplied for a field has the wrong kind.
    #[error("field `{field}` expects a {expected} value")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// Error 8: wrong number of values for a schema.
    #[error("schema `{schema}` has {expected} field(s), got {actual} value(s)")]
    FieldCount {
        schema: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Error 9: record has no field with this name.
    #[error("record has no field `{name}`")]
    MissingField { name: String },

    /// Error 10: a padding field holds a non-zero byte.
    #[error("padding byte {index} is {value:#04x}, expected zero")]
    NonZeroPadding { index: usize, value: u8 },

    // =========================================================================
    // INSTRUCTION ERRORS (11-12)
    // =========================================================================

    /// Error 11: payload has no discriminator byte.
    #[error("instruction payload is empty")]
    EmptyPayload,

    /// Error 12: discriminator does not name a known operation.
    #[error("unknown instruction discriminator {0}")]
    UnknownDiscriminator(u8),

    // =========================================================================
    // ADDRESS DERIVATION ERRORS (13-16)
    // =========================================================================

    /// Error 13: no bump in 255..=0 produced an off-curve address.
    #[error("no valid program address found for the given seeds")]
    NoValidAddress,

    /// Error 14: too many seeds (the bump takes the last slot).
    #[error("{count} seed(s) given, at most {max} allowed")]
    TooManySeeds { count: usize, max: usize },

    /// Error 15: a seed is longer than `MAX_SEED_LEN`.
    #[error("seed {index} is {len} byte(s), at most {max} allowed")]
    SeedTooLong { index: usize, len: usize, max: usize },

    /// Error 16: the candidate for an explicit bump lies on the curve.
    #[error("bump {bump} yields an on-curve address")]
    AddressOnCurve { bump: u8 },

    // =========================================================================
    // ARGUMENT RANGE ERRORS (17)
    // =========================================================================

    /// Error 17: mint decimals above the program's limit.
    #[error("{decimals} decimals exceeds the maximum of {max}")]
    DecimalsOutOfRange { decimals: u8, max: u8 },
}

impl CodecError {
    /// Stable numeric code for this error.
    pub fn code(&self) -> u32 {
        match self {
            CodecError::Overflow { .. } => 0,
            CodecError::Range { .. } => 1,
            CodecError::InvalidEnum { .. } => 2,
            CodecError::UnknownSymbol { .. } => 3,
            CodecError::InvalidText { .. } => 4,
            CodecError::SchemaLength { .. } => 5,
            CodecError::Field { .. } => 6,
            CodecError::TypeMismatch { .. } => 7,
            CodecError::FieldCount { .. } => 8,
            CodecError::MissingField { .. } => 9,
            CodecError::NonZeroPadding { .. } => 10,
            CodecError::EmptyPayload => 11,
            CodecError::UnknownDiscriminator(_) => 12,
            CodecError::NoValidAddress => 13,
            CodecError::TooManySeeds { .. } => 14,
            CodecError::SeedTooLong { .. } => 15,
            CodecError::AddressOnCurve { .. } => 16,
            CodecError::DecimalsOutOfRange { .. } => 17,
        }
    }

    /// Innermost error, looking through `Field` annotations.
    pub fn root(&self) -> &CodecError {
        match self {
            CodecError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// Annotate a per-field failure with its name and byte offset.
    pub(crate) fn at_field(self, name: &'static str, offset: usize) -> Self {
        CodecError::Field {
            name,
            offset,
            source: Box::new(self),
        }
    }
}

// =============================================================================
// CONVERSION TO PROGRAMERROR
// =============================================================================

/// Convert CodecError to ProgramError.
///
/// Lets a program (or a test double of one) reject a payload with `?`:
///
/// ```ignore
/// let ix = VaultInstruction::unpack(instruction_data)?;
/// ```
///
/// Field annotations are dropped; the code of the innermost error is used.
impl From<CodecError> for ProgramError {
    fn from(e: CodecError) -> Self {
        ProgramError::Custom(e.root().code())
    }
}

// =============================================================================
// VAULT PROGRAM FAILURES
// =============================================================================

/// Failure codes raised by the vault program itself, as
/// `ProgramError::Custom(code)`.
///
/// This table is unrelated to [`CodecError::code`]: `Custom(12)` from the
/// program means `AtaOrMint`, not `UnknownDiscriminator`. Codes follow the
/// program's declaration order.
#[repr(u32)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramFailure {
    #[error("invalid instruction discriminator")]
    InvalidDiscriminator = 0,
    #[error("account is not a signer")]
    NotSigner = 1,
    #[error("account is not writable")]
    NotWritable = 2,
    #[error("account is not executable")]
    NotExecutable = 3,
    #[error("zero is not a valid input")]
    ZeroAsInput = 4,
    #[error("decimals do not match the mint")]
    DecimalsValue = 5,
    #[error("mint data length is wrong")]
    MintDataLen = 6,
    #[error("token account data length is wrong")]
    TokAcctDataLen = 7,
    #[error("Token-2022 account data length is wrong")]
    Tok22AcctDataLen = 8,
    #[error("unexpected token program")]
    TokenProgram = 9,
    #[error("unexpected system program")]
    SystemProgram = 10,
    #[error("ATA does not belong to the owner")]
    AtaOrOwner = 11,
    #[error("ATA does not belong to the mint")]
    AtaOrMint = 12,
    #[error("ATA check failed")]
    AtaCheckFailed = 13,
    #[error("ATA owner is invalid")]
    AtaOwnerInvalid = 14,
    #[error("PDA is owned by another program")]
    ForeignPda = 15,
    #[error("account holds no lamports")]
    EmptyLamport = 16,
    #[error("account data is empty")]
    EmptyData = 17,
    #[error("wrong account type")]
    AcctType = 18,
    #[error("string is longer than allowed")]
    StrOverMax = 19,
    #[error("string is shorter than allowed")]
    StrUnderMin = 20,
    #[error("instruction data is too short")]
    InputDataUnderMin = 21,
    #[error("instruction data is too long")]
    InputDataOverMax = 22,
    #[error("PDA is not initialized")]
    PdaNotInitialized = 23,
    #[error("u64 argument could not be parsed")]
    ParseU64 = 24,
    #[error("Token-2022 account discriminator offset is wrong")]
    Tok22AcctDiscOffset = 25,
    #[error("byte is not a valid status")]
    InputU8InvalidForStatus = 26,
    #[error("byte is not a valid bool")]
    InputU8InvalidForBool = 27,
    #[error("u64 argument has the wrong size")]
    U64ByteSizeInvalid = 28,
    #[error("u32 argument has the wrong size")]
    U32ByteSizeInvalid = 29,
    #[error("u16 argument has the wrong size")]
    U16ByteSizeInvalid = 30,
    #[error("u8 argument has the wrong size")]
    U8ByteSizeInvalid = 31,
    #[error("vault PDA does not match")]
    VaultPda = 32,
    #[error("config data length is wrong")]
    ConfigDataLength = 33,
    #[error("unknown config selector")]
    FunctionSelector = 34,
    #[error("config PDA does not match")]
    ConfigPda = 35,
    #[error("status not allowed here")]
    InputStatus = 36,
    #[error("arithmetic overflow")]
    MathOverflow = 37,
    #[error("arithmetic underflow")]
    MathUnderflow = 38,
    #[error("Token-2022 mint is not rent exempt")]
    NotRentExemptMint22 = 39,
    #[error("Token-2022 token account is not rent exempt")]
    NotRentExemptTokAcct22 = 40,
    #[error("PDA is not rent exempt")]
    NotRentExemptPda = 41,
    #[error("mint or mint authority mismatch")]
    MintOrMintAuthority = 42,
    #[error("mint is not owned by the token program")]
    MintOrTokenProgram = 43,
    #[error("unrecognized error value")]
    ErrorValue = 44,
    #[error("PDA authority mismatch")]
    PdaAuthority = 45,
    #[error("insufficient funds")]
    InsufficientFundNominal = 46,
    #[error("destination wallet mismatch")]
    ToWallet = 47,
    #[error("PDA data length is wrong")]
    PdaDataLen = 48,
    #[error("expected a 32-byte slice")]
    ByteSliceSize32 = 49,
    #[error("expected a 10-byte slice")]
    ByteSliceSize10 = 50,
    #[error("expected a 6-byte slice")]
    ByteSliceSize6 = 51,
    #[error("unexpected associated token program")]
    AtokenGPvbd = 52,
    #[error("clock sysvar unavailable")]
    ClockGet = 53,
    #[error("only the owner may do this")]
    OnlyOwner = 54,
}

impl ProgramFailure {
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Name of the failure as the program spells it in logs.
    pub fn name(self) -> &'static str {
        match self {
            ProgramFailure::InvalidDiscriminator => "InvalidDiscriminator",
            ProgramFailure::NotSigner => "NotSigner",
            ProgramFailure::NotWritable => "NotWritable",
            ProgramFailure::NotExecutable => "NotExecutable",
            ProgramFailure::ZeroAsInput => "ZeroAsInput",
            ProgramFailure::DecimalsValue => "DecimalsValue",
            ProgramFailure::MintDataLen => "MintDataLen",
            ProgramFailure::TokAcctDataLen => "TokAcctDataLen",
            ProgramFailure::Tok22AcctDataLen => "Tok22AcctDataLen",
            ProgramFailure::TokenProgram => "TokenProgram",
            ProgramFailure::SystemProgram => "SystemProgram",
            ProgramFailure::AtaOrOwner => "AtaOrOwner",
            ProgramFailure::AtaOrMint => "AtaOrMint",
            ProgramFailure::AtaCheckFailed => "AtaCheckFailed",
            ProgramFailure::AtaOwnerInvalid => "AtaOwnerInvalid",
            ProgramFailure::ForeignPda => "ForeignPda",
            ProgramFailure::EmptyLamport => "EmptyLamport",
            ProgramFailure::EmptyData => "EmptyData",
            ProgramFailure::AcctType => "AcctType",
            ProgramFailure::StrOverMax => "StrOverMax",
            ProgramFailure::StrUnderMin => "StrUnderMin",
            ProgramFailure::InputDataUnderMin => "InputDataUnderMin",
            ProgramFailure::InputDataOverMax => "InputDataOverMax",
            ProgramFailure::PdaNotInitialized => "PdaNotInitialized",
            ProgramFailure::ParseU64 => "ParseU64",
            ProgramFailure::Tok22AcctDiscOffset => "Tok22AcctDiscOffset",
            ProgramFailure::InputU8InvalidForStatus => "InputU8InvalidForStatus",
            ProgramFailure::InputU8InvalidForBool => "InputU8InvalidForBool",
            ProgramFailure::U64ByteSizeInvalid => "U64ByteSizeInvalid",
            ProgramFailure::U32ByteSizeInvalid => "U32ByteSizeInvalid",
            ProgramFailure::U16ByteSizeInvalid => "U16ByteSizeInvalid",
            ProgramFailure::U8ByteSizeInvalid => "U8ByteSizeInvalid",
            ProgramFailure::VaultPda => "VaultPda",
            ProgramFailure::ConfigDataLength => "ConfigDataLength",
            ProgramFailure::FunctionSelector => "FunctionSelector",
            ProgramFailure::ConfigPda => "ConfigPda",
            ProgramFailure::InputStatus => "InputStatus",
            ProgramFailure::MathOverflow => "MathOverflow",
            ProgramFailure::MathUnderflow => "MathUnderflow",
            ProgramFailure::NotRentExemptMint22 => "NotRentExemptMint22",
            ProgramFailure::NotRentExemptTokAcct22 => "NotRentExemptTokAcct22",
            ProgramFailure::NotRentExemptPda => "NotRentExemptPda",
            ProgramFailure::MintOrMintAuthority => "MintOrMintAuthority",
            ProgramFailure::MintOrTokenProgram => "MintOrTokenProgram",
            ProgramFailure::ErrorValue => "ErrorValue",
            ProgramFailure::PdaAuthority => "PdaAuthority",
            ProgramFailure::InsufficientFundNominal => "InsufficientFundNominal",
            ProgramFailure::ToWallet => "ToWallet",
            ProgramFailure::PdaDataLen => "PdaDataLen",
            ProgramFailure::ByteSliceSize32 => "ByteSliceSize32",
            ProgramFailure::ByteSliceSize10 => "ByteSliceSize10",
            ProgramFailure::ByteSliceSize6 => "ByteSliceSize6",
            ProgramFailure::AtokenGPvbd => "AtokenGPvbd",
            ProgramFailure::ClockGet => "ClockGet",
            ProgramFailure::OnlyOwner => "OnlyOwner",
        }
    }

    /// Look up a program failure behind a `ProgramError::Custom` code.
    pub fn from_program_error(error: &ProgramError) -> Option<Self> {
        match error {
            ProgramError::Custom(code) => Self::try_from(*code).ok(),
            _ => None,
        }
    }

    /// Same lookup for an error reported by a transaction.
    pub fn from_instruction_error(error: &InstructionError) -> Option<Self> {
        match error {
            InstructionError::Custom(code) => Self::try_from(*code).ok(),
            _ => None,
        }
    }
}

impl TryFrom<u32> for ProgramFailure {
    type Error = u32;

    /// Unknown codes are handed back unchanged.
    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProgramFailure::InvalidDiscriminator),
            1 => Ok(ProgramFailure::NotSigner),
            2 => Ok(ProgramFailure::NotWritable),
            3 => Ok(ProgramFailure::NotExecutable),
            4 => Ok(ProgramFailure::ZeroAsInput),
            5 => Ok(ProgramFailure::DecimalsValue),
            6 => Ok(ProgramFailure::MintDataLen),
            7 => Ok(ProgramFailure::TokAcctDataLen),
            8 => Ok(ProgramFailure::Tok22AcctDataLen),
            9 => Ok(ProgramFailure::TokenProgram),
            10 => Ok(ProgramFailure::SystemProgram),
            11 => Ok(ProgramFailure::AtaOrOwner),
            12 => Ok(ProgramFailure::AtaOrMint),
            13 => Ok(ProgramFailure::AtaCheckFailed),
            14 => Ok(ProgramFailure::AtaOwnerInvalid),
            15 => Ok(ProgramFailure::ForeignPda),
            16 => Ok(ProgramFailure::EmptyLamport),
            17 => Ok(ProgramFailure::EmptyData),
            18 => Ok(ProgramFailure::AcctType),
            19 => Ok(ProgramFailure::StrOverMax),
            20 => Ok(ProgramFailure::StrUnderMin),
            21 => Ok(ProgramFailure::InputDataUnderMin),
            22 => Ok(ProgramFailure::InputDataOverMax),
            23 => Ok(ProgramFailure::PdaNotInitialized),
            24 => Ok(ProgramFailure::ParseU64),
            25 => Ok(ProgramFailure::Tok22AcctDiscOffset),
            26 => Ok(ProgramFailure::InputU8InvalidForStatus),
            27 => Ok(ProgramFailure::InputU8InvalidForBool),
            28 => Ok(ProgramFailure::U64ByteSizeInvalid),
            29 => Ok(ProgramFailure::U32ByteSizeInvalid),
            30 => Ok(ProgramFailure::U16ByteSizeInvalid),
            31 => Ok(ProgramFailure::U8ByteSizeInvalid),
            32 => Ok(ProgramFailure::VaultPda),
            33 => Ok(ProgramFailure::ConfigDataLength),
            34 => Ok(ProgramFailure::FunctionSelector),
            35 => Ok(ProgramFailure::ConfigPda),
            36 => Ok(ProgramFailure::InputStatus),
            37 => Ok(ProgramFailure::MathOverflow),
            38 => Ok(ProgramFailure::MathUnderflow),
            39 => Ok(ProgramFailure::NotRentExemptMint22),
            40 => Ok(ProgramFailure::NotRentExemptTokAcct22),
            41 => Ok(ProgramFailure::NotRentExemptPda),
            42 => Ok(ProgramFailure::MintOrMintAuthority),
            43 => Ok(ProgramFailure::MintOrTokenProgram),
            44 => Ok(ProgramFailure::ErrorValue),
            45 => Ok(ProgramFailure::PdaAuthority),
            46 => Ok(ProgramFailure::InsufficientFundNominal),
            47 => Ok(ProgramFailure::ToWallet),
            48 => Ok(ProgramFailure::PdaDataLen),
            49 => Ok(ProgramFailure::ByteSliceSize32),
            50 => Ok(ProgramFailure::ByteSliceSize10),
            51 => Ok(ProgramFailure::ByteSliceSize6),
            52 => Ok(ProgramFailure::AtokenGPvbd),
            53 => Ok(ProgramFailure::ClockGet),
            54 => Ok(ProgramFailure::OnlyOwner),
            other => Err(other),
        }
    }
}
