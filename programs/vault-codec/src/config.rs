//! Program Identifiers
//!
//! Well-known program ids and the [`VaultConfig`] value that carries the set
//! a client talks to. Nothing here is global or mutable: tests and callers
//! build their own `VaultConfig` when they target a different deployment.

use solana_program::{pubkey::Pubkey, system_program};

/// SPL Token program.
pub mod spl_token {
    solana_program::declare_id!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
}

/// Token-2022 program.
pub mod spl_token_2022 {
    solana_program::declare_id!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");
}

/// Associated Token Account program.
pub mod associated_token {
    solana_program::declare_id!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
}

/// Program ids used to build instructions and derive addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultConfig {
    /// The vault program itself.
    pub program_id: Pubkey,
    pub token_program_id: Pubkey,
    pub token_2022_program_id: Pubkey,
    pub associated_token_program_id: Pubkey,
    pub system_program_id: Pubkey,
}

impl VaultConfig {
    /// Same well-known ids, different vault deployment.
    pub fn with_program_id(program_id: Pubkey) -> Self {
        Self {
            program_id,
            ..Self::default()
        }
    }

    /// Whether `program_id` is one of the two token programs.
    pub fn is_token_program(&self, program_id: &Pubkey) -> bool {
        *program_id == self.token_program_id || *program_id == self.token_2022_program_id
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            program_id: crate::id(),
            token_program_id: spl_token::id(),
            token_2022_program_id: spl_token_2022::id(),
            associated_token_program_id: associated_token::id(),
            system_program_id: system_program::id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids() {
        let config = VaultConfig::default();
        assert_eq!(config.program_id, crate::id());
        assert_eq!(
            config.token_program_id.to_string(),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
        assert_eq!(
            config.associated_token_program_id.to_string(),
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
        );
        assert!(config.is_token_program(&spl_token_2022::id()));
        assert!(!config.is_token_program(&config.system_program_id));
    }

    #[test]
    fn test_with_program_id() {
        let program_id = Pubkey::new_unique();
        let config = VaultConfig::with_program_id(program_id);
        assert_eq!(config.program_id, program_id);
        assert_eq!(config.token_program_id, spl_token::id());
    }
}
