//! Program Derived Addresses
//!
//! Off-chain derivation that matches the runtime bit for bit.
//!
//! # Derivation
//!
//! ```text
//! candidate = sha256(seed_0 || ... || seed_n || [bump] || program_id || "ProgramDerivedAddress")
//! ```
//!
//! The bump is searched from 255 down to 0 and the first candidate that is
//! NOT a valid ed25519 point wins. An address off the curve has no private
//! key, so only the program can sign for it.
//!
//! # Vault Program Seeds
//!
//! | Account | Seeds |
//! |---------|-------|
//! | Config | `["proj_config"]` |
//! | Vault | `["vault", owner]` |
//! | Escrow | `["escrow", maker, id (u64 LE)]` |
//! | ATA | `[owner, token_program, mint]` under the ATA program |

use crate::{config::associated_token, error::CodecError};
use solana_program::{hash::hashv, pubkey::Pubkey};

/// Maximum number of seeds, including the bump.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

pub const CONFIG_SEED: &[u8] = b"proj_config";
pub const VAULT_SEED: &[u8] = b"vault";
pub const ESCROW_SEED: &[u8] = b"escrow";

// =============================================================================
// GENERIC DERIVATION
// =============================================================================

fn check_seeds(seeds: &[&[u8]]) -> Result<(), CodecError> {
    // The bump occupies the last slot.
    if seeds.len() >= MAX_SEEDS {
        return Err(CodecError::TooManySeeds {
            count: seeds.len(),
            max: MAX_SEEDS - 1,
        });
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(CodecError::SeedTooLong {
                index,
                len: seed.len(),
                max: MAX_SEED_LEN,
            });
        }
    }
    Ok(())
}

fn candidate(seeds: &[&[u8]], bump: u8, program_id: &Pubkey) -> Pubkey {
    let bump = [bump];
    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 3);
    parts.extend_from_slice(seeds);
    parts.push(&bump);
    parts.push(program_id.as_ref());
    parts.push(PDA_MARKER);
    Pubkey::new_from_array(hashv(&parts).to_bytes())
}

/// Derive the address for an explicit bump.
///
/// # Errors
/// * `AddressOnCurve` - the candidate is a valid curve point
/// * `TooManySeeds` / `SeedTooLong` - seed limits exceeded
pub fn create_program_address(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey, CodecError> {
    check_seeds(seeds)?;
    let address = candidate(seeds, bump, program_id);
    if address.is_on_curve() {
        return Err(CodecError::AddressOnCurve { bump });
    }
    Ok(address)
}

/// Find the canonical `(address, bump)` for `seeds` under `program_id`.
///
/// Seeds are hashed in the order given. The loop is bounded to 256
/// candidates; if every one lies on the curve the result is
/// `NoValidAddress`.
///
/// ```
/// use vault_codec::pda::find_program_address;
/// use solana_program::pubkey::Pubkey;
///
/// let program_id = Pubkey::new_unique();
/// let (address, bump) = find_program_address(&[b"vault"], &program_id).unwrap();
/// assert_eq!((address, bump), Pubkey::find_program_address(&[b"vault"], &program_id));
/// ```
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), CodecError> {
    check_seeds(seeds)?;
    for bump in (0..=u8::MAX).rev() {
        let address = candidate(seeds, bump, program_id);
        if !address.is_on_curve() {
            return Ok((address, bump));
        }
    }
    Err(CodecError::NoValidAddress)
}

// =============================================================================
// WELL-KNOWN ADDRESSES
// =============================================================================

/// Associated token account of `owner` for `mint`.
///
/// Pass the SPL Token or Token-2022 id as `token_program_id`; the same owner
/// and mint give a different address under each.
pub fn derive_associated_address(
    owner: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Result<Pubkey, CodecError> {
    find_program_address(
        &[owner.as_ref(), token_program_id.as_ref(), mint.as_ref()],
        &associated_token::id(),
    )
    .map(|(address, _)| address)
}

/// The program's single config account.
pub fn config_address(program_id: &Pubkey) -> Result<(Pubkey, u8), CodecError> {
    find_program_address(&[CONFIG_SEED], program_id)
}

/// Lamport vault owned by the program on behalf of `owner`.
pub fn vault_address(program_id: &Pubkey, owner: &Pubkey) -> Result<(Pubkey, u8), CodecError> {
    find_program_address(&[VAULT_SEED, owner.as_ref()], program_id)
}

/// Escrow number `id` opened by `maker`.
pub fn escrow_address(
    program_id: &Pubkey,
    maker: &Pubkey,
    id: u64,
) -> Result<(Pubkey, u8), CodecError> {
    find_program_address(&[ESCROW_SEED, maker.as_ref(), &id.to_le_bytes()], program_id)
}
